//! # Typed-Value Codec
//!
//! A `NOP` word carries a typed literal: `[00000][type:6][payload:21]`.
//!
//! | Tag | Type    | Payload                                               |
//! |-----|---------|-------------------------------------------------------|
//! | 1   | Boolean | 1 is true, anything else false                        |
//! | 2   | Natural | unsigned, `0..2^21`                                   |
//! | 3   | Integer | 21-bit two's complement, `-2^20..2^20`                |
//! | 4   | Float   | sign(1) exponent(8, bias 127) mantissa(12)            |
//! | 5   | Char    | Unicode code point (surrogates included), `0x10FFFF` max |
//!
//! Tags 0 and 6-63 are reserved. A word that is not a typed literal is a
//! *register word*: its low 16 bits read as a two's-complement value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::{
    encode_literal, extract_opcode, extract_payload, extract_type_tag, sign_extend, PAYLOAD_BITS,
    PAYLOAD_MASK,
};
use crate::error::IsaError;
use crate::RegisterWord;

/// Smallest Integer literal
pub const INTEGER_MIN: i32 = -(1 << (PAYLOAD_BITS - 1));

/// Largest Integer literal
pub const INTEGER_MAX: i32 = (1 << (PAYLOAD_BITS - 1)) - 1;

/// Largest Natural literal
pub const NATURAL_MAX: u32 = PAYLOAD_MASK;

/// Mantissa bits kept by the Float encoding
pub const FLOAT_MANTISSA_BITS: u32 = 12;

/// Largest Char code point
pub const CHAR_MAX: u32 = 0x10_FFFF;

/// Type tag of a typed literal
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Boolean = 1,
    Natural = 2,
    Integer = 3,
    Float = 4,
    Char = 5,
}

impl TypeTag {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(TypeTag::Boolean),
            2 => Some(TypeTag::Natural),
            3 => Some(TypeTag::Integer),
            4 => Some(TypeTag::Float),
            5 => Some(TypeTag::Char),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Boolean => "boolean",
            TypeTag::Natural => "natural",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Char => "char",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A decoded value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    Boolean(bool),
    Natural(u32),
    Integer(i32),
    Float(f32),
    /// Code point, possibly a lone surrogate
    Char(u32),
    /// Untagged 16-bit register contents
    RegisterWord(RegisterWord),
}

/// Decode a payload under the given tag.
///
/// Bits above the 21-bit payload field are ignored.
pub fn decode(payload: u32, tag: u8) -> Result<TypedValue, IsaError> {
    let tag = TypeTag::from_u8(tag).ok_or(IsaError::InvalidTypeTag(tag))?;
    let payload = payload & PAYLOAD_MASK;

    let value = match tag {
        TypeTag::Boolean => TypedValue::Boolean(payload == 1),
        TypeTag::Natural => TypedValue::Natural(payload),
        TypeTag::Integer => TypedValue::Integer(sign_extend(payload, PAYLOAD_BITS)),
        TypeTag::Float => TypedValue::Float(f32::from_bits(unpack_float(payload))),
        TypeTag::Char => {
            if payload > CHAR_MAX {
                return Err(IsaError::InvalidPayload {
                    kind: tag.name(),
                    payload,
                });
            }
            TypedValue::Char(payload)
        }
    };
    Ok(value)
}

// f32 [s:1][e:8][m:23]  <->  payload [s:1][e:8][m:12]
const fn pack_float(bits: u32) -> u32 {
    let sign = bits >> 31;
    let exponent = (bits >> 23) & 0xFF;
    let mantissa = (bits >> (23 - FLOAT_MANTISSA_BITS)) & 0xFFF;
    (sign << 20) | (exponent << FLOAT_MANTISSA_BITS) | mantissa
}

const fn unpack_float(payload: u32) -> u32 {
    let sign = (payload >> 20) & 1;
    let exponent = (payload >> FLOAT_MANTISSA_BITS) & 0xFF;
    let mantissa = payload & 0xFFF;
    (sign << 31) | (exponent << 23) | (mantissa << (23 - FLOAT_MANTISSA_BITS))
}

impl TypedValue {
    /// Char literal from a Rust `char`
    pub const fn from_char(c: char) -> Self {
        TypedValue::Char(c as u32)
    }

    /// The Char literal as a Rust `char`, `None` for surrogates and non-chars
    pub fn as_char(&self) -> Option<char> {
        match *self {
            TypedValue::Char(c) => char::from_u32(c),
            _ => None,
        }
    }

    /// Type tag, or `None` for an untagged register word
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            TypedValue::Boolean(_) => Some(TypeTag::Boolean),
            TypedValue::Natural(_) => Some(TypeTag::Natural),
            TypedValue::Integer(_) => Some(TypeTag::Integer),
            TypedValue::Float(_) => Some(TypeTag::Float),
            TypedValue::Char(_) => Some(TypeTag::Char),
            TypedValue::RegisterWord(_) => None,
        }
    }

    /// Encode into a 21-bit payload.
    ///
    /// Register words encode to their raw 16-bit pattern.
    pub fn encode(&self) -> Result<u32, IsaError> {
        match *self {
            TypedValue::Boolean(b) => Ok(b as u32),
            TypedValue::Natural(n) => {
                if n > NATURAL_MAX {
                    return Err(IsaError::ValueOutOfRange {
                        kind: "natural",
                        value: n.to_string(),
                    });
                }
                Ok(n)
            }
            TypedValue::Integer(i) => {
                if !(INTEGER_MIN..=INTEGER_MAX).contains(&i) {
                    return Err(IsaError::ValueOutOfRange {
                        kind: "integer",
                        value: i.to_string(),
                    });
                }
                Ok(i as u32 & PAYLOAD_MASK)
            }
            TypedValue::Float(x) => Ok(pack_float(x.to_bits())),
            TypedValue::Char(c) => {
                if c > CHAR_MAX {
                    return Err(IsaError::ValueOutOfRange {
                        kind: "char",
                        value: c.to_string(),
                    });
                }
                Ok(c)
            }
            TypedValue::RegisterWord(v) => Ok(v as u16 as u32),
        }
    }

    /// Encode as a full memory word (a `NOP` literal, or raw bits for a register word)
    pub fn to_word(&self) -> Result<u32, IsaError> {
        let payload = self.encode()?;
        Ok(match self.tag() {
            Some(tag) => encode_literal(tag.to_u8() as u32, payload),
            None => payload,
        })
    }

    /// Interpret a memory word.
    ///
    /// `NOP` words with tag 1-5 go through the codec, tags 6 and above are
    /// rejected, and everything else is a raw register word.
    pub fn from_word(word: u32) -> Result<Self, IsaError> {
        if extract_opcode(word) == 0 {
            let tag = extract_type_tag(word) as u8;
            if tag != 0 {
                return decode(extract_payload(word), tag);
            }
        }
        Ok(TypedValue::RegisterWord(word as u16 as i16))
    }

    /// Convert to a 16-bit register value.
    ///
    /// Naturals, integers and chars wrap. Floats truncate toward zero and
    /// saturate at the register limits (NaN becomes 0).
    pub fn to_register_word(&self) -> RegisterWord {
        match *self {
            TypedValue::Boolean(b) => b as i16,
            TypedValue::Natural(n) => n as u16 as i16,
            TypedValue::Integer(i) => i as i16,
            TypedValue::Float(x) => x as i16,
            TypedValue::Char(c) => c as u16 as i16,
            TypedValue::RegisterWord(v) => v,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Natural(n) => write!(f, "{}", n),
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Float(x) => write!(f, "{:?}", x),
            TypedValue::Char(c) => match char::from_u32(*c) {
                Some(ch) => write!(f, "{:?}", ch),
                None => write!(f, "'\\u{{{:x}}}'", c),
            },
            TypedValue::RegisterWord(v) => write!(f, "{}", v),
        }
    }
}
