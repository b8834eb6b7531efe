use serde::Serialize;

use crate::services::cloud_run::{CloudRunService, ServiceListing};

/// Body of `GET /api/services` on success.
#[derive(Debug, Clone, Serialize)]
pub struct ServicesResponse {
    pub success: bool,
    pub project: String,
    pub region: String,
    pub count: usize,
    pub services: Vec<CloudRunService>,
}

impl From<ServiceListing> for ServicesResponse {
    fn from(listing: ServiceListing) -> Self {
        Self {
            success: true,
            project: listing.project,
            region: listing.region,
            count: listing.services.len(),
            services: listing.services,
        }
    }
}
