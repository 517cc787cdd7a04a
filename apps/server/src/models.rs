use serde::{Deserialize, Serialize};

/// Payload of the liveness endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    pub version: String,
}

/// Discovery payload of the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub docs: String,
}
