/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Give handlers the per-request context (AuthCtx) built by the access middleware
 * - axum-specific code stays in core; the type lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - CurrentIdentity
 */

mod core;
mod types;

pub use self::core::{AuthCtxExtractor, CurrentIdentity};
pub use types::AuthCtx;
