use serde::{Deserialize, Serialize};

pub const SECURE_MESSAGE: &str = "Request authorized successfully!";
pub const SECURE_DATA: &str = "This is your secure response data.";

/// Body of `GET /api/secure` on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecureResponse {
    pub success: bool,
    pub message: String,
    pub data: String,
}

impl SecureResponse {
    pub fn authorized() -> Self {
        Self {
            success: true,
            message: SECURE_MESSAGE.to_string(),
            data: SECURE_DATA.to_string(),
        }
    }
}
