/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth::access (bearer verification), http (request id/trace/limits), security_headers
 */
pub mod auth;
pub mod http;
pub mod security_headers;
