//! `JsValue` adapters for the core traits.

use js_sys::{Array, Number, Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::{JsCast, JsValue};
use ybridge_core::memory::check_bounds;
use ybridge_core::{Classified, Classify, LinearMemory, MemoryWindow};
use ybridge_types::{ForeignObject, Result};

/// A borrowed JavaScript value seen through the core traits.
#[derive(Debug, Clone, Copy)]
pub struct JsHost<'a>(pub &'a JsValue);

impl ForeignObject for JsHost<'_> {
    fn numeric_field(&self, name: &str) -> Option<f64> {
        // Reflect.get throws on primitives.
        Reflect::get(self.0, &JsValue::from_str(name))
            .ok()?
            .as_f64()
    }
}

impl Classify for JsHost<'_> {
    fn classify(&self) -> Classified {
        let value = self.0;
        if value.is_undefined() {
            Classified::undefined()
        } else if value.is_null() {
            Classified::null()
        } else if let Some(n) = value.as_f64() {
            Classified::number(n)
        } else if let Some(b) = value.as_bool() {
            Classified::boolean(b)
        } else if value.is_bigint() {
            Classified::bigint(Number::new(value).value_of())
        } else if let Some(s) = value.as_string() {
            Classified::text(&s)
        } else if Array::is_array(value) {
            Classified::array()
        } else if value.is_object() {
            Classified::object()
        } else {
            Classified::unclassifiable()
        }
    }
}

/// The module's linear memory as seen from JavaScript.
pub struct ModuleMemory {
    memory: WebAssembly::Memory,
}

impl ModuleMemory {
    /// This module's own memory.
    pub fn current() -> Self {
        Self::new(wasm_bindgen::memory().unchecked_into())
    }

    pub fn new(memory: WebAssembly::Memory) -> Self {
        Self { memory }
    }
}

impl LinearMemory for ModuleMemory {
    /// The current `ArrayBuffer`. A grow replaces it, so `===` on the
    /// buffer tells whether a cached view is still live.
    type Backing = JsValue;
    type View = ByteView;

    fn backing(&self) -> JsValue {
        self.memory.buffer()
    }

    fn view(&self) -> ByteView {
        ByteView(Uint8Array::new(&self.memory.buffer()))
    }
}

/// `Uint8Array` over one memory buffer.
pub struct ByteView(Uint8Array);

impl MemoryWindow for ByteView {
    fn byte_len(&self) -> usize {
        self.0.length() as usize
    }

    fn write(&self, offset: usize, bytes: &[u8]) -> Result<()> {
        check_bounds(offset, bytes.len(), self.byte_len())?;
        self.0
            .subarray(offset as u32, (offset + bytes.len()) as u32)
            .copy_from(bytes);
        Ok(())
    }
}
