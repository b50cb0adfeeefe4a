//! Caller-side intake settings.
//!
//! The parser accepts any text; limits on what reaches it are imposed
//! here by the code that receives uploads.

use crate::ovpn::error::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upload ceiling: 1 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeSettings {
    /// Largest upload accepted, in bytes.
    pub max_upload_bytes: usize,
    /// Drop a leading UTF-8 byte-order mark before parsing.
    pub strip_byte_order_mark: bool,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            strip_byte_order_mark: true,
        }
    }
}

impl IntakeSettings {
    pub fn from_json_str(json: &str) -> IntakeResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> IntakeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| IntakeError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> IntakeResult<()> {
        if self.max_upload_bytes == 0 {
            return Err(IntakeError::Settings(
                "maxUploadBytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
