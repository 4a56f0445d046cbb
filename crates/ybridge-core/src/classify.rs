//! Value classification.
//!
//! Every host value maps to exactly one [`Tag`]. Kinds are checked in wire
//! order (undefined, null, number, boolean, bigint, string, array, object);
//! anything left over is [`Tag::Unclassifiable`]. Host bindings that only
//! have loose predicates must keep that order, since arrays also answer to
//! the object check.

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use ybridge_types::{HostValue, Tag};

use crate::stage::StagedText;

/// Result of classifying one host value.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// Any non-text kind. `payload` is meaningful only for number, boolean
    /// and bigint.
    Scalar { tag: Tag, payload: f64 },
    /// Text, already encoded. The payload is its byte length.
    Text(StagedText),
}

impl Classified {
    pub fn undefined() -> Self {
        Self::unit(Tag::Undefined)
    }

    pub fn null() -> Self {
        Self::unit(Tag::Null)
    }

    pub fn number(n: f64) -> Self {
        Classified::Scalar {
            tag: Tag::Number,
            payload: n,
        }
    }

    pub fn boolean(b: bool) -> Self {
        Classified::Scalar {
            tag: Tag::Boolean,
            payload: if b { 1.0 } else { 0.0 },
        }
    }

    /// Bigint carried as its nearest `f64`. Precision beyond the 53-bit
    /// mantissa is lost, rounding half to even.
    pub fn bigint(n: f64) -> Self {
        Classified::Scalar {
            tag: Tag::BigInt,
            payload: n,
        }
    }

    pub fn text(s: &str) -> Self {
        Classified::Text(StagedText::encode(s))
    }

    pub fn array() -> Self {
        Self::unit(Tag::Array)
    }

    pub fn object() -> Self {
        Self::unit(Tag::Object)
    }

    pub fn unclassifiable() -> Self {
        Self::unit(Tag::Unclassifiable)
    }

    fn unit(tag: Tag) -> Self {
        Classified::Scalar { tag, payload: 0.0 }
    }

    pub fn tag(&self) -> Tag {
        match self {
            Classified::Scalar { tag, .. } => *tag,
            Classified::Text(_) => Tag::String,
        }
    }

    pub fn payload(&self) -> f64 {
        match self {
            Classified::Scalar { payload, .. } => *payload,
            Classified::Text(text) => text.len() as f64,
        }
    }

    /// The `(tag, payload)` pair handed to module-side glue.
    pub fn wire(&self) -> (Tag, f64) {
        (self.tag(), self.payload())
    }

    /// Split into the wire pair and the pending text, if any.
    pub fn into_parts(self) -> ((Tag, f64), Option<StagedText>) {
        let wire = self.wire();
        match self {
            Classified::Scalar { .. } => (wire, None),
            Classified::Text(text) => (wire, Some(text)),
        }
    }
}

/// Host values that can be classified.
pub trait Classify {
    fn classify(&self) -> Classified;
}

impl Classify for HostValue {
    fn classify(&self) -> Classified {
        match self {
            HostValue::Undefined => Classified::undefined(),
            HostValue::Null => Classified::null(),
            HostValue::Number(n) => Classified::number(*n),
            HostValue::Boolean(b) => Classified::boolean(*b),
            HostValue::BigInt(n) => Classified::bigint(bigint_to_f64(n)),
            HostValue::String(s) => Classified::text(s),
            HostValue::Array(_) => Classified::array(),
            HostValue::Object(_) => Classified::object(),
            HostValue::Function | HostValue::Symbol(_) => Classified::unclassifiable(),
        }
    }
}

/// Classify any host value.
pub fn classify<V: Classify + ?Sized>(value: &V) -> Classified {
    value.classify()
}

/// Nearest `f64`, saturating to the matching infinity like `Number(n)`.
fn bigint_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(match n.sign() {
        Sign::Minus => f64::NEG_INFINITY,
        _ => f64::INFINITY,
    })
}
