pub mod credential;
pub mod decision;
pub mod factory;
pub mod issuer;
pub mod verifier;

pub use credential::{Credential, MissingCredential};
pub use decision::{AuthorizationDecision, Denial, decide};
pub use factory::build_verification_mode;
pub use issuer::TokenIssuer;
pub use verifier::{VerificationMode, VerificationOutcome};
