use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};

/// Field holding the module-side pointer on wasm-bindgen generated objects.
pub const DEFAULT_POINTER_FIELD: &str = "__wbg_ptr";
/// Field holding the shared-type tag.
pub const DEFAULT_TYPE_FIELD: &str = "type";

/// Names of the fields read from foreign objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    pub pointer_field: String,
    pub type_field: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            pointer_field: DEFAULT_POINTER_FIELD.to_string(),
            type_field: DEFAULT_TYPE_FIELD.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reject empty field names.
    pub fn validate(self) -> Result<Self> {
        if self.pointer_field.is_empty() {
            return Err(BridgeError::Config("pointerField must not be empty".into()));
        }
        if self.type_field.is_empty() {
            return Err(BridgeError::Config("typeField must not be empty".into()));
        }
        Ok(self)
    }
}
