//! ybridge boundary helpers for JavaScript hosts.
//!
//! Generated binding glue calls these to introspect values handed across
//! the boundary. Bridge state lives in this module instance; JavaScript
//! runs it on a single thread.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { classify, stageInto, getForeignPointer, getTypeTag } from 'ybridge-wasm';
//!
//! await init();
//!
//! classify("héllo", (tag, payload) => {
//!   // tag === 5 (string), payload === 6 (UTF-8 bytes)
//!   const ptr = alloc(payload);
//!   stageInto(ptr);
//! });
//!
//! getTypeTag({ type: 300 });      // 44
//! getForeignPointer({});          // throws
//! ```

mod js;

use std::cell::RefCell;

use tracing::debug;
use wasm_bindgen::prelude::*;
use ybridge_core::{reflect, Bridge};
use ybridge_types::{BridgeConfig, BridgeError};

pub use js::{ByteView, JsHost, ModuleMemory};

thread_local! {
    static BRIDGE: RefCell<Bridge<ModuleMemory>> =
        RefCell::new(Bridge::new(ModuleMemory::current()));
}

/// Snapshot of the configured field names.
///
/// Field lookups can run JavaScript getters, and those may call back into
/// this module, so no bridge borrow may be held across them.
fn field_names() -> BridgeConfig {
    BRIDGE.with(|bridge| bridge.borrow().config().clone())
}

fn to_js_error(err: BridgeError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Read the module-side pointer of a wasm-bindgen object.
///
/// Throws when the object has no numeric pointer field.
#[wasm_bindgen(js_name = getForeignPointer)]
pub fn get_foreign_pointer(obj: &JsValue) -> Result<u32, JsValue> {
    let field = field_names().pointer_field;
    reflect::get_foreign_pointer(&JsHost(obj), &field).map_err(to_js_error)
}

/// Read the low byte of the object's type field; 255 when it has none.
#[wasm_bindgen(js_name = getTypeTag)]
pub fn get_type_tag(obj: &JsValue) -> u8 {
    let field = field_names().type_field;
    reflect::get_type_tag(&JsHost(obj), &field).0
}

/// Classify `value` and call `callback(tag, payload)` before returning.
///
/// For strings (tag 5) the payload is the UTF-8 byte length, and the bytes
/// wait for the next `stageInto` call. The bridge is released before the
/// callback runs, so the callback may call `stageInto` itself.
#[wasm_bindgen]
pub fn classify(value: &JsValue, callback: &js_sys::Function) -> Result<(), JsValue> {
    let (tag, payload) = BRIDGE.with(|bridge| bridge.borrow_mut().classify(&JsHost(value)));
    callback.call2(
        &JsValue::UNDEFINED,
        &JsValue::from(tag.code()),
        &JsValue::from_f64(payload),
    )?;
    Ok(())
}

/// Copy the pending string into linear memory at `offset`.
///
/// Returns the number of bytes written. Throws when no string is pending or
/// the bytes do not fit.
#[wasm_bindgen(js_name = stageInto)]
pub fn stage_into(offset: u32) -> Result<u32, JsValue> {
    BRIDGE
        .with(|bridge| bridge.borrow_mut().stage_into(offset as usize))
        .map(|written| written as u32)
        .map_err(to_js_error)
}

/// Override the pointer and type field names.
///
/// Accepts `{ pointerField?: string, typeField?: string }`; `undefined`
/// restores the defaults.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        BridgeConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<BridgeConfig>(options)
            .map_err(|e| to_js_error(BridgeError::Config(e.to_string())))?
            .validate()
            .map_err(to_js_error)?
    };
    debug!(
        pointer_field = %config.pointer_field,
        type_field = %config.type_field,
        "configured bridge"
    );
    BRIDGE.with(|bridge| bridge.borrow_mut().set_config(config));
    Ok(())
}
