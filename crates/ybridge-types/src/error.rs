//! Bridge error types.

use thiserror::Error;

/// Errors raised at the host/module boundary.
///
/// Every error is a hard stop for the violating call; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The object carries no usable pointer field.
    #[error("object is not a WebAssembly-backed value (missing numeric `{field}` field)")]
    NotWasmObject { field: String },

    /// `stage_into` was called without a pending classified string.
    #[error("no string is buffered for staging")]
    NoBufferedString,

    /// The staged bytes do not fit the memory window at the requested offset.
    #[error("cannot write {len} bytes at offset {offset} into linear memory of {size} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// The bridge configuration was rejected.
    #[error("invalid bridge configuration: {0}")]
    Config(String),
}

impl BridgeError {
    pub fn not_wasm_object(field: impl Into<String>) -> Self {
        Self::NotWasmObject {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BridgeError::not_wasm_object("__wbg_ptr").to_string(),
            "object is not a WebAssembly-backed value (missing numeric `__wbg_ptr` field)"
        );
        assert_eq!(
            BridgeError::NoBufferedString.to_string(),
            "no string is buffered for staging"
        );
        assert_eq!(
            BridgeError::OutOfBounds {
                offset: 10,
                len: 4,
                size: 12
            }
            .to_string(),
            "cannot write 4 bytes at offset 10 into linear memory of 12 bytes"
        );
    }
}
