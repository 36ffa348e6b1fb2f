//! Minimal reader for base64 XDR `ScVal`s, the RPC's default encoding for
//! event topics and data.
//!
//! Only the value shapes the ledger contract publishes are understood:
//! booleans, integers, strings, symbols, bytes, vectors, maps and addresses.
//! Anything else decodes to `None` and the caller falls back to the raw text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

pub const SCV_BOOL: u32 = 0;
pub const SCV_VOID: u32 = 1;
pub const SCV_U32: u32 = 3;
pub const SCV_I32: u32 = 4;
pub const SCV_U64: u32 = 5;
pub const SCV_I64: u32 = 6;
pub const SCV_TIMEPOINT: u32 = 7;
pub const SCV_DURATION: u32 = 8;
pub const SCV_U128: u32 = 9;
pub const SCV_I128: u32 = 10;
pub const SCV_BYTES: u32 = 13;
pub const SCV_STRING: u32 = 14;
pub const SCV_SYMBOL: u32 = 15;
pub const SCV_VEC: u32 = 16;
pub const SCV_MAP: u32 = 17;
pub const SCV_ADDRESS: u32 = 18;

const ADDRESS_ACCOUNT: u32 = 0;
const ADDRESS_CONTRACT: u32 = 1;
const KEY_TYPE_ED25519: u32 = 0;

/// Nesting limit for vectors and maps.
const MAX_DEPTH: usize = 16;

/// A decoded `ScVal`. Integers keep full precision as decimal strings and
/// addresses are rendered as strkeys (`G…` / `C…`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScValue {
    Bool(bool),
    Void,
    Int(String),
    Bytes(Vec<u8>),
    Str(String),
    Symbol(String),
    Vec(Vec<ScValue>),
    Map(Vec<(ScValue, ScValue)>),
    Address(String),
}

impl ScValue {
    /// JSON view used by the event decoder: maps become objects keyed by
    /// their symbol/string keys, integers stay strings, bytes become hex.
    pub fn into_json(self) -> Value {
        match self {
            ScValue::Bool(b) => Value::Bool(b),
            ScValue::Void => Value::Null,
            ScValue::Int(s) | ScValue::Str(s) | ScValue::Symbol(s) | ScValue::Address(s) => {
                Value::String(s)
            }
            ScValue::Bytes(b) => Value::String(hex::encode(b)),
            ScValue::Vec(items) => Value::Array(items.into_iter().map(Self::into_json).collect()),
            ScValue::Map(entries) => {
                let mut map = Map::new();
                for (key, val) in entries {
                    let key = match key.into_json() {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    map.insert(key, val.into_json());
                }
                Value::Object(map)
            }
        }
    }
}

/// Decode a base64 `ScVal`. Returns `None` for anything that is not valid
/// base64 or not a supported value.
pub fn decode(raw: &str) -> Option<ScValue> {
    let bytes = STANDARD.decode(raw.trim()).ok()?;
    let mut reader = Reader {
        buf: &bytes,
        pos: 0,
    };
    let value = reader.scval(0)?;
    // Trailing bytes mean this was not a single ScVal after all.
    (reader.pos == bytes.len()).then_some(value)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn u32(&mut self) -> Option<u32> {
        Some(u32::from_be_bytes(self.take(4)?.try_into().ok()?))
    }

    fn u64(&mut self) -> Option<u64> {
        Some(u64::from_be_bytes(self.take(8)?.try_into().ok()?))
    }

    fn array32(&mut self) -> Option<[u8; 32]> {
        self.take(32)?.try_into().ok()
    }

    /// Variable-length opaque, padded to a 4-byte boundary.
    fn var_opaque(&mut self) -> Option<&'a [u8]> {
        let len = self.u32()? as usize;
        let data = self.take(len)?;
        let pad = (4 - len % 4) % 4;
        self.take(pad)?;
        Some(data)
    }

    fn text(&mut self) -> Option<String> {
        String::from_utf8(self.var_opaque()?.to_vec()).ok()
    }

    /// `ScVec` and `ScMap` are optional; absent decodes as empty.
    fn present(&mut self) -> Option<bool> {
        match self.u32()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }

    fn scval(&mut self, depth: usize) -> Option<ScValue> {
        if depth > MAX_DEPTH {
            return None;
        }
        let value = match self.u32()? {
            SCV_BOOL => ScValue::Bool(self.u32()? != 0),
            SCV_VOID => ScValue::Void,
            SCV_U32 => ScValue::Int(self.u32()?.to_string()),
            SCV_I32 => ScValue::Int((self.u32()? as i32).to_string()),
            SCV_U64 | SCV_TIMEPOINT | SCV_DURATION => ScValue::Int(self.u64()?.to_string()),
            SCV_I64 => ScValue::Int((self.u64()? as i64).to_string()),
            SCV_U128 => {
                let hi = self.u64()? as u128;
                let lo = self.u64()? as u128;
                ScValue::Int(((hi << 64) | lo).to_string())
            }
            SCV_I128 => {
                let hi = self.u64()? as i64 as i128;
                let lo = self.u64()? as i128;
                ScValue::Int(((hi << 64) | lo).to_string())
            }
            SCV_BYTES => ScValue::Bytes(self.var_opaque()?.to_vec()),
            SCV_STRING => ScValue::Str(self.text()?),
            SCV_SYMBOL => ScValue::Symbol(self.text()?),
            SCV_VEC => {
                let mut items = Vec::new();
                if self.present()? {
                    let len = self.u32()?;
                    for _ in 0..len {
                        items.push(self.scval(depth + 1)?);
                    }
                }
                ScValue::Vec(items)
            }
            SCV_MAP => {
                let mut entries = Vec::new();
                if self.present()? {
                    let len = self.u32()?;
                    for _ in 0..len {
                        let key = self.scval(depth + 1)?;
                        let val = self.scval(depth + 1)?;
                        entries.push((key, val));
                    }
                }
                ScValue::Map(entries)
            }
            SCV_ADDRESS => ScValue::Address(self.address()?),
            _ => return None,
        };
        Some(value)
    }

    fn address(&mut self) -> Option<String> {
        match self.u32()? {
            ADDRESS_ACCOUNT => {
                if self.u32()? != KEY_TYPE_ED25519 {
                    return None;
                }
                Some(stellar_strkey::ed25519::PublicKey(self.array32()?).to_string())
            }
            ADDRESS_CONTRACT => Some(stellar_strkey::Contract(self.array32()?).to_string()),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::build::*;
    use super::*;

    #[test]
    fn symbol_is_unpadded() {
        assert_eq!(
            decode(&b64(symbol("funded"))),
            Some(ScValue::Symbol("funded".to_string()))
        );
    }

    #[test]
    fn negative_i128_keeps_sign() {
        assert_eq!(
            decode(&b64(i128(-5_000))),
            Some(ScValue::Int("-5000".to_string()))
        );
        assert_eq!(
            decode(&b64(i128(i128::MAX))),
            Some(ScValue::Int(i128::MAX.to_string()))
        );
    }

    #[test]
    fn account_address_renders_as_strkey() {
        let key = [7u8; 32];
        let expected = stellar_strkey::ed25519::PublicKey(key).to_string();
        assert!(expected.starts_with('G'));
        assert_eq!(decode(&b64(account(key))), Some(ScValue::Address(expected)));
    }

    #[test]
    fn map_becomes_json_object() {
        let xdr = map(&[
            ("account", account([1u8; 32])),
            ("allowed", boolean(false)),
        ]);
        let json = decode(&b64(xdr)).unwrap().into_json();
        assert_eq!(json["allowed"], Value::Bool(false));
        assert!(json["account"].as_str().unwrap().starts_with('G'));
    }

    #[test]
    fn truncated_or_trailing_input_is_rejected() {
        let mut xdr = u64(9);
        xdr.pop();
        assert_eq!(decode(&b64(xdr)), None);

        let mut xdr = u64(9);
        xdr.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(decode(&b64(xdr)), None);
    }

    #[test]
    fn plain_words_are_not_xdr() {
        assert_eq!(decode("refunded"), None);
        assert_eq!(decode("withdrawn"), None);
    }

    #[test]
    fn unsupported_tags_are_rejected() {
        assert_eq!(decode(&b64(42u32.to_be_bytes().to_vec())), None);
    }
}
