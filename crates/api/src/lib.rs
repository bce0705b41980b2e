pub mod accessor;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use accessor::{AssetAccessor, AssetPredicate, SubmodelPredicate, id_short_is};
pub use error::{ApiError, ApiResult};
pub use models::*;
