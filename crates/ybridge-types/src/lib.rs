//! Shared types for ybridge.
//!
//! This crate defines the wire tags exchanged with module-side glue, the
//! host value model, the foreign-object field accessor, the error taxonomy
//! and the bridge configuration. It holds no runtime state.

mod config;
mod error;
mod tag;
mod value;

pub use config::{BridgeConfig, DEFAULT_POINTER_FIELD, DEFAULT_TYPE_FIELD};
pub use error::BridgeError;
pub use tag::{to_uint32, Tag, TypeTag};
pub use value::{ForeignObject, HostObject, HostValue};

/// Result type used throughout ybridge.
pub type Result<T> = std::result::Result<T, BridgeError>;
