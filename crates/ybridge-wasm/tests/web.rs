//! wasm-bindgen tests for the JavaScript surface.
//!
//! Run with `wasm-pack test --node crates/ybridge-wasm`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, BigInt, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use ybridge_core::{classify as classify_value, Tag};
use ybridge_wasm::{classify, configure, get_foreign_pointer, get_type_tag, stage_into, JsHost};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn tag_of(value: &JsValue) -> Tag {
    classify_value(&JsHost(value)).tag()
}

fn object_with(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (name, value) in fields {
        Reflect::set(&obj, &JsValue::from_str(name), value).unwrap();
    }
    obj.into()
}

/// Run the exported `classify` and return what the callback received.
fn classify_via_callback(value: &JsValue) -> (i32, f64) {
    let sink = Array::new();
    let callback = Function::new_with_args("tag, payload", "this.push(tag, payload)");
    let bound = callback.bind(&sink);
    classify(value, &bound).unwrap();
    (
        sink.get(0).as_f64().unwrap() as i32,
        sink.get(1).as_f64().unwrap(),
    )
}

// ══════════════════════════════════════════════════════════════════════════════
// Classification
// ══════════════════════════════════════════════════════════════════════════════

#[wasm_bindgen_test]
fn every_kind_has_its_own_tag() {
    assert_eq!(tag_of(&JsValue::UNDEFINED), Tag::Undefined);
    assert_eq!(tag_of(&JsValue::NULL), Tag::Null);
    assert_eq!(tag_of(&JsValue::from_f64(1.5)), Tag::Number);
    assert_eq!(tag_of(&JsValue::TRUE), Tag::Boolean);
    assert_eq!(tag_of(&BigInt::from(7i64).into()), Tag::BigInt);
    assert_eq!(tag_of(&JsValue::from_str("s")), Tag::String);
    assert_eq!(tag_of(&Array::new().into()), Tag::Array);
    assert_eq!(tag_of(&Object::new().into()), Tag::Object);
    assert_eq!(tag_of(&Function::new_no_args("").into()), Tag::Unclassifiable);
    assert_eq!(tag_of(&JsValue::symbol(Some("s"))), Tag::Unclassifiable);
}

#[wasm_bindgen_test]
fn callback_receives_wire_pair() {
    assert_eq!(classify_via_callback(&JsValue::FALSE), (3, 0.0));
    assert_eq!(classify_via_callback(&JsValue::from_f64(-8.0)), (2, -8.0));
    assert_eq!(classify_via_callback(&Array::new().into()), (6, 0.0));
}

#[wasm_bindgen_test]
fn bigint_payload_rounds_like_number() {
    let n = BigInt::new(&JsValue::from_str("9007199254740993")).unwrap();
    assert_eq!(classify_via_callback(&n.into()), (4, 9_007_199_254_740_992.0));
}

// ══════════════════════════════════════════════════════════════════════════════
// Staging
// ══════════════════════════════════════════════════════════════════════════════

#[wasm_bindgen_test]
fn string_is_staged_into_own_memory() {
    let mut target = vec![0u8; 16];
    let offset = target.as_mut_ptr() as u32;

    assert_eq!(classify_via_callback(&JsValue::from_str("héllo")), (5, 6.0));
    assert_eq!(stage_into(offset).unwrap(), 6);
    assert_eq!(&target[..6], "héllo".as_bytes());
    assert_eq!(target[6], 0);

    assert!(stage_into(offset).is_err());
}

// ══════════════════════════════════════════════════════════════════════════════
// Reflection
// ══════════════════════════════════════════════════════════════════════════════

#[wasm_bindgen_test]
fn reflection_defaults() {
    let obj = object_with(&[
        ("__wbg_ptr", JsValue::from_f64(1024.0)),
        ("type", JsValue::from_f64(300.0)),
    ]);
    assert_eq!(get_foreign_pointer(&obj).unwrap(), 1024);
    assert_eq!(get_type_tag(&obj), 44);

    let bare = Object::new().into();
    assert!(get_foreign_pointer(&bare).is_err());
    assert_eq!(get_type_tag(&bare), 255);
    assert!(get_foreign_pointer(&JsValue::UNDEFINED).is_err());
    assert_eq!(get_type_tag(&JsValue::from_f64(3.0)), 255);
}

#[wasm_bindgen_test]
fn configure_renames_fields() {
    let options = object_with(&[("pointerField", JsValue::from_str("ptr"))]);
    configure(options).unwrap();
    let obj = object_with(&[("ptr", JsValue::from_f64(64.0))]);
    assert_eq!(get_foreign_pointer(&obj).unwrap(), 64);

    configure(JsValue::UNDEFINED).unwrap();
    assert!(get_foreign_pointer(&obj).is_err());

    let bad = object_with(&[("typeField", JsValue::from_str(""))]);
    assert!(configure(bad).is_err());
}

#[wasm_bindgen_test]
fn getters_may_call_back_into_the_module() {
    let getter = Closure::wrap(Box::new(|| {
        configure(JsValue::UNDEFINED).unwrap();
        JsValue::from_f64(512.0)
    }) as Box<dyn FnMut() -> JsValue>);
    let descriptor = object_with(&[("get", getter.as_ref().clone())]);
    let obj = Object::new();
    Object::define_property(
        &obj,
        &JsValue::from_str("__wbg_ptr"),
        descriptor.unchecked_ref::<Object>(),
    );
    Object::define_property(
        &obj,
        &JsValue::from_str("type"),
        descriptor.unchecked_ref::<Object>(),
    );

    assert_eq!(get_foreign_pointer(&obj).unwrap(), 512);
    assert_eq!(get_type_tag(&obj), 0);
}
