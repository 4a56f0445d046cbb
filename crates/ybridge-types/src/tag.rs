use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant reported for a classified host value.
///
/// The integer codes are a wire contract: module-side glue switches on them,
/// so they must never be renumbered.
///
/// | Code | Kind           |
/// |------|----------------|
/// | 0    | undefined      |
/// | 1    | null           |
/// | 2    | number         |
/// | 3    | boolean        |
/// | 4    | bigint         |
/// | 5    | string         |
/// | 6    | array          |
/// | 7    | object         |
/// | -1   | unclassifiable |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum Tag {
    Undefined = 0,
    Null = 1,
    Number = 2,
    Boolean = 3,
    BigInt = 4,
    String = 5,
    Array = 6,
    Object = 7,
    Unclassifiable = -1,
}

impl Tag {
    /// All tags, in classification priority order.
    pub const ALL: [Tag; 9] = [
        Tag::Undefined,
        Tag::Null,
        Tag::Number,
        Tag::Boolean,
        Tag::BigInt,
        Tag::String,
        Tag::Array,
        Tag::Object,
        Tag::Unclassifiable,
    ];

    /// Wire code of this tag.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Decode a wire code.
    pub fn from_code(code: i32) -> Option<Tag> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Undefined => "undefined",
            Tag::Null => "null",
            Tag::Number => "number",
            Tag::Boolean => "boolean",
            Tag::BigInt => "bigint",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Object => "object",
            Tag::Unclassifiable => "unclassifiable",
        }
    }
}

impl From<Tag> for i32 {
    fn from(tag: Tag) -> i32 {
        tag.code()
    }
}

impl TryFrom<i32> for Tag {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Tag::from_code(code).ok_or_else(|| format!("unknown tag code {code}"))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

/// Low byte of a foreign object's `type` field.
///
/// `TypeTag::UNKNOWN` (255) stands for "no tag": the field was absent or
/// not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeTag(pub u8);

impl TypeTag {
    pub const UNKNOWN: Self = Self(255);

    /// Mask a numeric field value the way JavaScript evaluates `value & 0xFF`:
    /// the number goes through `ToInt32` first (truncation, then modulo 2^32),
    /// so `300 -> 44`, `-1 -> 255`, `3.9 -> 3` and non-finite values give 0.
    pub fn from_field(value: f64) -> Self {
        Self((to_int32(value) & 0xFF) as u8)
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const TWO_POW_32: f64 = 4_294_967_296.0;

/// JavaScript `ToUint32` (`value >>> 0`): truncate, then wrap modulo 2^32.
/// Non-finite values give 0.
pub fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let mut m = value.trunc() % TWO_POW_32;
    if m < 0.0 {
        m += TWO_POW_32;
    }
    m as u32
}

fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_codes_are_wire_stable() {
        assert_eq!(Tag::Undefined.code(), 0);
        assert_eq!(Tag::Null.code(), 1);
        assert_eq!(Tag::Number.code(), 2);
        assert_eq!(Tag::Boolean.code(), 3);
        assert_eq!(Tag::BigInt.code(), 4);
        assert_eq!(Tag::String.code(), 5);
        assert_eq!(Tag::Array.code(), 6);
        assert_eq!(Tag::Object.code(), 7);
        assert_eq!(Tag::Unclassifiable.code(), -1);
    }

    #[test]
    fn tag_from_code() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(Tag::from_code(8), None);
        assert_eq!(Tag::from_code(255), None);
    }

    #[test]
    fn tag_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Tag::String).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Tag::Unclassifiable).unwrap(), "-1");
        let tag: Tag = serde_json::from_str("6").unwrap();
        assert_eq!(tag, Tag::Array);
        assert!(serde_json::from_str::<Tag>("42").is_err());
    }

    #[test]
    fn tag_display() {
        assert_eq!(Tag::BigInt.to_string(), "bigint(4)");
    }

    #[test]
    fn type_tag_masks_low_byte() {
        assert_eq!(TypeTag::from_field(0.0), TypeTag(0));
        assert_eq!(TypeTag::from_field(7.0), TypeTag(7));
        assert_eq!(TypeTag::from_field(255.0), TypeTag(255));
        assert_eq!(TypeTag::from_field(256.0), TypeTag(0));
        assert_eq!(TypeTag::from_field(300.0), TypeTag(44));
    }

    #[test]
    fn type_tag_follows_to_int32() {
        assert_eq!(TypeTag::from_field(-1.0), TypeTag(255));
        assert_eq!(TypeTag::from_field(3.9), TypeTag(3));
        assert_eq!(TypeTag::from_field(-3.9), TypeTag(253));
        assert_eq!(TypeTag::from_field(f64::NAN), TypeTag(0));
        assert_eq!(TypeTag::from_field(f64::INFINITY), TypeTag(0));
        assert_eq!(TypeTag::from_field(4_294_967_296.0 + 5.0), TypeTag(5));
    }

    #[test]
    fn uint32_wraps_like_unsigned_shift() {
        assert_eq!(to_uint32(1048.0), 1048);
        assert_eq!(to_uint32(1.5), 1);
        assert_eq!(to_uint32(-4.0), 4_294_967_292);
        assert_eq!(to_uint32(4_294_967_296.0), 0);
        assert_eq!(to_uint32(4_294_967_297.0), 1);
        assert_eq!(to_uint32(f64::NAN), 0);
        assert_eq!(to_uint32(f64::NEG_INFINITY), 0);
    }
}
