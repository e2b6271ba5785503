//! Optional semantic class-name enrichment.
//!
//! An external collaborator receives the emitted node list (serialized
//! losslessly) and may return a structurally identical copy with better
//! class identifiers. The validator accepts the candidate only when its
//! shape matches exactly; any violation, like any service failure, falls
//! back to the deterministic local naming. The two failure kinds are
//! indistinguishable for correctness purposes and differ only in logging.

use crate::markup::MarkupNode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("enrichment service failed: {0}")]
    Service(String),
}

/// The candidate did not match the source structure.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("enriched tree does not match the source structure")]
pub struct Rejected;

/// External enrichment collaborator. The response is raw JSON on purpose:
/// the validator decides whether it can be trusted.
#[allow(async_fn_in_trait)]
pub trait Enricher {
    async fn enrich(&self, nodes: &[MarkupNode]) -> Result<Value, EnrichError>;
}

const REQUIRED_KEYS: [&str; 4] = ["tag", "styleID", "isSVG", "classID"];
const OPTIONAL_KEYS: [&str; 4] = ["content", "svg", "src", "children"];
const VALID_TAGS: [&str; 3] = ["div", "span", "img"];

fn same_json_type(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    )
}

/// Structural equality between the serialized original nodes and a
/// candidate array: same lengths at every level, every required field
/// present with a matching primitive type, optional fields present in the
/// candidate whenever the original has them (`children` recursed), and no
/// unexpected fields.
pub fn is_structure_identical(original: &[Value], candidate: &Value) -> bool {
    let Some(candidate_nodes) = candidate.as_array() else {
        debug!("candidate is not an array");
        return false;
    };
    if original.len() != candidate_nodes.len() {
        debug!(
            original = original.len(),
            candidate = candidate_nodes.len(),
            "node count mismatch"
        );
        return false;
    }

    for (index, (original_node, candidate_node)) in
        original.iter().zip(candidate_nodes).enumerate()
    {
        let Some(candidate_object) = candidate_node.as_object() else {
            debug!(index, "candidate node is not an object");
            return false;
        };
        let Some(original_object) = original_node.as_object() else {
            return false;
        };

        for key in REQUIRED_KEYS {
            let Some(candidate_value) = candidate_object.get(key) else {
                debug!(index, key, "missing required field");
                return false;
            };
            if key == "tag" {
                let tag_ok = candidate_value
                    .as_str()
                    .map_or(false, |tag| VALID_TAGS.contains(&tag));
                if !tag_ok {
                    debug!(index, "invalid tag value");
                    return false;
                }
            }
            let Some(original_value) = original_object.get(key) else {
                return false;
            };
            if !same_json_type(original_value, candidate_value) {
                debug!(index, key, "required field type mismatch");
                return false;
            }
        }

        for key in OPTIONAL_KEYS {
            let Some(original_value) = original_object.get(key) else {
                continue;
            };
            let Some(candidate_value) = candidate_object.get(key) else {
                debug!(index, key, "missing optional field");
                return false;
            };
            if key == "children" {
                let Some(original_children) = original_value.as_array() else {
                    return false;
                };
                if !is_structure_identical(original_children, candidate_value) {
                    debug!(index, "children structure mismatch");
                    return false;
                }
            } else if !same_json_type(original_value, candidate_value) {
                debug!(index, key, "optional field type mismatch");
                return false;
            }
        }

        for key in candidate_object.keys() {
            if !REQUIRED_KEYS.contains(&key.as_str()) && !OPTIONAL_KEYS.contains(&key.as_str()) {
                debug!(index, key = key.as_str(), "unexpected field");
                return false;
            }
        }
    }

    true
}

/// Validate a candidate against the emitted tree. On success the candidate
/// deserializes into markup nodes; any violation rejects it wholesale.
pub fn validate_enriched(
    original: &[MarkupNode],
    candidate: &Value,
) -> Result<Vec<MarkupNode>, Rejected> {
    let serialized: Vec<Value> = original
        .iter()
        .map(|node| serde_json::to_value(node).unwrap_or(Value::Null))
        .collect();
    if !is_structure_identical(&serialized, candidate) {
        return Err(Rejected);
    }
    serde_json::from_value(candidate.clone()).map_err(|error| {
        debug!(%error, "validated candidate failed to deserialize");
        Rejected
    })
}

/// Graft the candidate's class identifiers onto the emitted tree. Shapes
/// are known to match by the time this runs, so the walk is positional;
/// everything except `classID` keeps the local value.
pub fn apply_enriched_classes(nodes: &mut [MarkupNode], enriched: &[MarkupNode]) {
    for (node, better) in nodes.iter_mut().zip(enriched) {
        node.class_id = better.class_id.clone();
        if let (Some(children), Some(better_children)) =
            (node.children.as_mut(), better.children.as_ref())
        {
            apply_enriched_classes(children, better_children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupTag;

    fn sample_tree() -> Vec<MarkupNode> {
        vec![MarkupNode::new(MarkupTag::Block, "card").with_children(vec![
            MarkupNode::new(MarkupTag::Inline, "card_span").with_content("hi"),
        ])]
    }

    fn serialized(nodes: &[MarkupNode]) -> Value {
        serde_json::to_value(nodes).unwrap()
    }

    #[test]
    fn identical_shape_with_different_class_values_is_accepted() {
        let original = sample_tree();
        let mut candidate = serialized(&original);
        candidate[0]["classID"] = Value::String("product-card".into());
        candidate[0]["children"][0]["classID"] = Value::String("card-title".into());

        let enriched = validate_enriched(&original, &candidate).unwrap();
        assert_eq!(enriched[0].class_id, "product-card");
    }

    #[test]
    fn missing_class_id_rejects_the_whole_candidate() {
        let original = sample_tree();
        let mut candidate = serialized(&original);
        candidate[0]
            .as_object_mut()
            .unwrap()
            .remove("classID");
        assert_eq!(validate_enriched(&original, &candidate), Err(Rejected));
    }

    #[test]
    fn nested_length_mismatch_rejects() {
        let original = sample_tree();
        let mut candidate = serialized(&original);
        candidate[0]["children"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({
                "tag": "span", "styleID": "extra", "classID": "", "isSVG": false
            }));
        assert_eq!(validate_enriched(&original, &candidate), Err(Rejected));
    }

    #[test]
    fn unexpected_fields_reject() {
        let original = sample_tree();
        let mut candidate = serialized(&original);
        candidate[0]["injected"] = Value::Bool(true);
        assert_eq!(validate_enriched(&original, &candidate), Err(Rejected));
    }

    #[test]
    fn invalid_tag_value_rejects() {
        let original = sample_tree();
        let mut candidate = serialized(&original);
        candidate[0]["tag"] = Value::String("script".into());
        assert_eq!(validate_enriched(&original, &candidate), Err(Rejected));
    }

    #[test]
    fn non_array_candidate_rejects() {
        let original = sample_tree();
        assert_eq!(
            validate_enriched(&original, &Value::String("garbage".into())),
            Err(Rejected)
        );
    }

    #[test]
    fn grafting_updates_only_class_ids() {
        let mut original = sample_tree();
        let candidate = {
            let mut copy = original.clone();
            copy[0].class_id = "card".into();
            copy[0].children.as_mut().unwrap()[0].class_id = "title".into();
            copy
        };
        apply_enriched_classes(&mut original, &candidate);
        assert_eq!(original[0].class_id, "card");
        assert_eq!(original[0].style_id, "card");
        assert_eq!(original[0].children.as_ref().unwrap()[0].class_id, "title");
    }
}
