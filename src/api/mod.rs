/*
 * Responsibility
 * - Entry point of the HTTP surface (re-exports routes())
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
