use criterion::{criterion_group, criterion_main, Criterion};
use scenemark_compiler_html::Converter;
use scenemark_scene::{
    ConversionSettings, HostError, LayoutMode, NodeType, Paint, RawNode, RawTextSegment, Rect,
    Rgb, SceneHost, SolidPaint,
};

struct BenchHost;

impl SceneHost for BenchHost {
    async fn text_segments(&self, _node_id: &str) -> Result<Vec<RawTextSegment>, HostError> {
        Ok(vec![RawTextSegment {
            characters: "Label".into(),
            font_family: "Inter".into(),
            font_size: 14.0,
            ..RawTextSegment::default()
        }])
    }

    async fn resolve_color_variable(&self, _variable_id: &str) -> Result<Option<String>, HostError> {
        Ok(None)
    }

    async fn export_raster(
        &self,
        node_id: &str,
        _exclude_children: bool,
    ) -> Result<Vec<u8>, HostError> {
        Err(HostError::ExportFailed {
            id: node_id.to_string(),
            reason: "bench".into(),
        })
    }

    async fn export_vector(&self, _node_id: &str) -> Result<String, HostError> {
        Ok("<svg></svg>".into())
    }
}

fn card(index: usize) -> RawNode {
    let base = (index * 120) as f64;
    RawNode {
        id: format!("1:{index}"),
        name: "Card".into(),
        node_type: Some(NodeType::Frame),
        absolute_bounding_box: Some(Rect {
            x: base,
            y: 0.0,
            width: 100.0,
            height: 80.0,
        }),
        layout_mode: Some(LayoutMode::Vertical),
        item_spacing: Some(8.0),
        fills: vec![Paint::Solid(SolidPaint {
            color: Rgb {
                r: 0.95,
                g: 0.95,
                b: 0.95,
            },
            opacity: None,
            visible: true,
            blend_mode: Default::default(),
            bound_variables: None,
            variable_color_name: None,
        })],
        children: vec![RawNode {
            id: format!("1:{index}:text"),
            name: "Title".into(),
            node_type: Some(NodeType::Text),
            absolute_bounding_box: Some(Rect {
                x: base + 8.0,
                y: 8.0,
                width: 84.0,
                height: 20.0,
            }),
            ..RawNode::default()
        }],
        ..RawNode::default()
    }
}

fn bench_convert(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let nodes: Vec<RawNode> = (0..50).map(card).collect();
    let settings = ConversionSettings::default();

    c.bench_function("convert_50_cards", |b| {
        b.iter(|| {
            runtime.block_on(async {
                Converter::new()
                    .convert(nodes.clone(), &BenchHost, &settings)
                    .await
                    .unwrap()
                    .unwrap()
            })
        })
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
