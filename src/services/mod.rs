/*
 * Responsibility
 * - auth: credential extraction, token verification, authorization decision, issuance
 * - cloud_run: the resource lister behind /api/services
 */
pub mod auth;
pub mod cloud_run;
