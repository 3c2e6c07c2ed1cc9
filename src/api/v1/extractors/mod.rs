pub mod auth_ctx;
pub mod json;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor, CurrentIdentity};
pub use json::ApiJson;
