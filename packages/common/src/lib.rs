pub mod error;
pub mod format;
pub mod warnings;

pub use error::*;
pub use format::*;
pub use warnings::*;

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;
