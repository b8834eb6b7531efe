pub mod secure;
pub mod services;
