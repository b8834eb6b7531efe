pub mod health;
pub mod secure;
pub mod services;
