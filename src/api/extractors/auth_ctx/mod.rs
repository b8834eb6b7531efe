/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Provide the authorized request context (AuthCtx) to handlers
 * - axum-specific code stays in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::AuthCtx;
