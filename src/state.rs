/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - verifier: VerificationMode fixed at startup, read-only afterwards
 *   - lister: collaborator behind /api/services
 * - Cheap to Clone (everything inside is Arc)
 */
use std::sync::Arc;

use crate::services::auth::VerificationMode;
use crate::services::cloud_run::ServiceLister;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<VerificationMode>,
    pub lister: Arc<dyn ServiceLister>,
}

impl AppState {
    pub fn new(verifier: Arc<VerificationMode>, lister: Arc<dyn ServiceLister>) -> Self {
        Self { verifier, lister }
    }
}
