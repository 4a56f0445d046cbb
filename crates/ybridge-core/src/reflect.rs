//! Pointer and type-tag reflection on foreign objects.
//!
//! The two lookups are deliberately asymmetric: a missing pointer is a caller
//! error and fails, a missing type tag is an ordinary "untyped" answer.

use ybridge_types::{to_uint32, BridgeError, ForeignObject, Result, TypeTag};

/// Read the module-side pointer stored in `field`.
///
/// Fails with [`BridgeError::NotWasmObject`] when the field is absent or is
/// not a number. Any number is accepted and converted with `ToUint32`, the
/// same coercion wasm-bindgen applies to a `u32` argument.
pub fn get_foreign_pointer<O: ForeignObject + ?Sized>(obj: &O, field: &str) -> Result<u32> {
    obj.numeric_field(field)
        .map(to_uint32)
        .ok_or_else(|| BridgeError::not_wasm_object(field))
}

/// Read the type tag stored in `field`, masked to its low byte.
///
/// Returns [`TypeTag::UNKNOWN`] when there is no numeric tag.
pub fn get_type_tag<O: ForeignObject + ?Sized>(obj: &O, field: &str) -> TypeTag {
    obj.numeric_field(field)
        .map_or(TypeTag::UNKNOWN, TypeTag::from_field)
}
