//! Host value model.
//!
//! [`HostValue`] is the Rust-side picture of an arbitrary value handed across
//! the boundary. Each variant corresponds to one runtime kind of the host, so
//! classification is a plain `match` rather than a chain of loose predicates.

use num_bigint::BigInt;
use std::collections::BTreeMap;

/// A value received from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// No value supplied.
    Undefined,
    /// The explicit empty reference.
    Null,
    Number(f64),
    Boolean(bool),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    String(String),
    /// Sequential collection.
    Array(Vec<HostValue>),
    /// Any other composite.
    Object(HostObject),
    /// Callable. Not classifiable.
    Function,
    /// Unique symbol with an optional description. Not classifiable.
    Symbol(Option<String>),
}

impl HostValue {
    /// Convert a JSON document, following `JSON.parse` semantics: every
    /// number becomes a `Number`.
    pub fn from_json(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => HostValue::Null,
            Json::Bool(b) => HostValue::Boolean(b),
            Json::Number(n) => HostValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => HostValue::String(s),
            Json::Array(items) => {
                HostValue::Array(items.into_iter().map(HostValue::from_json).collect())
            }
            Json::Object(map) => HostValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, HostValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Boolean(b)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<BigInt> for HostValue {
    fn from(n: BigInt) -> Self {
        HostValue::BigInt(n)
    }
}

impl From<HostObject> for HostValue {
    fn from(obj: HostObject) -> Self {
        HostValue::Object(obj)
    }
}

/// Plain object: named fields in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostObject {
    fields: BTreeMap<String, HostValue>,
}

impl HostObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.fields.get(name)
    }
}

impl FromIterator<(String, HostValue)> for HostObject {
    fn from_iter<I: IntoIterator<Item = (String, HostValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Field access on a value assumed to originate from the module's own
/// object set.
pub trait ForeignObject {
    /// Numeric value of the named field, or `None` when the field is absent
    /// or holds something other than a number.
    fn numeric_field(&self, name: &str) -> Option<f64>;
}

impl ForeignObject for HostObject {
    fn numeric_field(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(HostValue::Number(n)) => Some(*n),
            _ => None,
        }
    }
}

impl ForeignObject for HostValue {
    fn numeric_field(&self, name: &str) -> Option<f64> {
        self.as_object()?.numeric_field(name)
    }
}
