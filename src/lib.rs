//! Bearer-token gate for a small Cloud Run HTTP service.
//!
//! `services::auth` is the verification core (credential extraction, static / signed
//! token verification, authorization decision). Everything else is the axum shell
//! around it.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
