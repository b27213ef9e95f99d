// models.rs
// Wire types for the Docker volume plugin protocol

use crate::driver::{DriverError, VolumeInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Request structures

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRequest {
    pub name: String,
    #[serde(default)]
    pub opts: Option<HashMap<String, String>>,
}

/// Request carrying only a volume name (Get, Remove, Path).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeRequest {
    pub name: String,
}

/// Mount/Unmount request. The caller ID is part of the protocol but unused
/// here: datasets stay mounted for their whole lifetime.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MountRequest {
    pub name: String,
    #[serde(rename = "ID", default)]
    pub id: String,
}

// Response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Volume {
    pub name: String,
    pub mountpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<VolumeInfo> for Volume {
    fn from(info: VolumeInfo) -> Self {
        Volume {
            name: info.name,
            mountpoint: info.mountpoint,
            created_at: info.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResponse {
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetResponse {
    pub volume: Volume,
}

/// Response for both Path and Mount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MountpointResponse {
    pub mountpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capability {
    pub scope: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapabilitiesResponse {
    pub capabilities: Capability,
}

impl CapabilitiesResponse {
    /// Volumes are host-local, never shareable across hosts. This is a
    /// static declaration, not a runtime check.
    pub fn local() -> Self {
        CapabilitiesResponse {
            capabilities: Capability {
                scope: "local".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivateResponse {
    pub implements: Vec<&'static str>,
}

impl ActivateResponse {
    pub fn volume_driver() -> Self {
        ActivateResponse {
            implements: vec!["VolumeDriver"],
        }
    }
}

/// Error payload, also returned with an empty message on bare-ack success
/// (Create, Remove, Unmount).
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Err")]
    pub err: String,
}

impl ErrorResponse {
    pub fn ok() -> Self {
        ErrorResponse { err: String::new() }
    }
}

impl From<&DriverError> for ErrorResponse {
    fn from(e: &DriverError) -> Self {
        ErrorResponse { err: e.to_string() }
    }
}
