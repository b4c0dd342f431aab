//! Typed SNMP values and coercion from walk dump text.
//!
//! A walk dump declares each value with a textual type tag (`Counter32`,
//! `Hex-STRING`, ...). [`TypeTag`] is the closed set of recognized tags and
//! [`TypeTag::coerce`] turns the accumulated value lines for a record into a
//! canonical [`Value`]. The same coercion path serves both dump loading and
//! control-API updates, so both stay consistent.

use crate::error::CoerceErrorKind;
use crate::oid::{Oid, sanitize_dotted};
use bytes::Bytes;
use std::fmt;
use std::net::Ipv4Addr;

/// SNMP value.
///
/// Closed variant set over everything a walk dump can carry. Each dump type
/// tag maps to exactly one variant, selected by an exhaustive match in
/// [`TypeTag::coerce`], so adding a type is a compile-time-checked extension.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// INTEGER (signed 32-bit; `-1` is the unparseable-input sentinel)
    Integer(i32),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Counter64 (unsigned 64-bit).
    ///
    /// Kept on its own branch end to end: protocol layers are known to
    /// mis-encode Counter64 when it is funneled through a 32-bit path, so
    /// the coercer never lets it share one.
    Counter64(u64),

    /// Gauge32 / Unsigned32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// OCTET STRING decoded from hex byte pairs
    OctetString(Bytes),

    /// Quoted text, possibly multi-line (lines joined with `\n`)
    Text(String),

    /// IpAddress (4 bytes, big-endian)
    IpAddress([u8; 4]),

    /// OBJECT IDENTIFIER as a value leaf (not a key)
    ObjectIdentifier(Oid),

    /// TimeTicks (hundredths of seconds)
    TimeTicks(u32),
}

impl Value {
    /// Try to get as i32.
    ///
    /// Returns `Some(i32)` for [`Value::Integer`], `None` otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    ///
    /// Returns `Some(u32)` for [`Value::Counter32`], [`Value::Gauge32`], or
    /// [`Value::TimeTicks`]. Returns `None` otherwise.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64.
    ///
    /// Returns `Some(u64)` for [`Value::Counter64`] or any 32-bit unsigned
    /// variant. Returns `None` otherwise.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v as u64),
            _ => None,
        }
    }

    /// Try to get as bytes.
    ///
    /// Returns `Some(&[u8])` for [`Value::OctetString`], `None` otherwise.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as text.
    ///
    /// Returns `Some(&str)` for [`Value::Text`], `None` otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as OID.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// Try to get as IP address.
    pub fn as_ip(&self) -> Option<Ipv4Addr> {
        match self {
            Value::IpAddress(bytes) => Some(Ipv4Addr::from(*bytes)),
            _ => None,
        }
    }

    /// The type tag this value would carry in a dump.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Counter32(_) => TypeTag::Counter32,
            Value::Counter64(_) => TypeTag::Counter64,
            Value::Gauge32(_) => TypeTag::Gauge32,
            Value::OctetString(_) => TypeTag::HexString,
            Value::Text(_) => TypeTag::String,
            Value::IpAddress(_) => TypeTag::IpAddress,
            Value::ObjectIdentifier(_) => TypeTag::Oid,
            Value::TimeTicks(_) => TypeTag::Timeticks,
        }
    }
}

impl fmt::Display for Value {
    /// Formats in the dump's own notation, so a re-serialized value reads the
    /// way it was captured. Counter64 prints its full 64-bit magnitude.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Counter32(v) => write!(f, "{}", v),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::Gauge32(v) => write!(f, "{}", v),
            Value::OctetString(data) => {
                let mut first = true;
                for byte in data.iter() {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02X}", byte)?;
                    first = false;
                }
                Ok(())
            }
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::IpAddress(addr) => write!(f, "{}", Ipv4Addr::from(*addr)),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::TimeTicks(v) => write!(f, "({})", v),
        }
    }
}

/// Textual type tag of a walk dump record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Counter32,
    Counter64,
    Gauge32,
    HexString,
    Integer,
    IpAddress,
    Oid,
    String,
    Timeticks,
}

impl TypeTag {
    /// Coerce accumulated value lines into a typed [`Value`].
    ///
    /// `lines` holds the header value plus any continuation lines; only
    /// `Hex-STRING` and `STRING` consume more than the first line.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmposter::value::{TypeTag, Value};
    ///
    /// // Counters hidden in human-readable wrappers still parse
    /// let v = TypeTag::Counter32.coerce(&["(42) some counter"]).unwrap();
    /// assert_eq!(v, Value::Counter32(42));
    ///
    /// // Unparseable integers fall back to the -1 sentinel
    /// let v = TypeTag::Integer.coerce(&["garbage"]).unwrap();
    /// assert_eq!(v, Value::Integer(-1));
    /// ```
    pub fn coerce<S: AsRef<str>>(self, lines: &[S]) -> Result<Value, CoerceErrorKind> {
        let first = lines
            .first()
            .map(|l| l.as_ref())
            .ok_or(CoerceErrorKind::EmptyValue)?;

        match self {
            TypeTag::Counter32 => Ok(Value::Counter32(try_int(first) as u32)),
            TypeTag::Gauge32 => Ok(Value::Gauge32(try_int(first) as u32)),
            TypeTag::Integer => Ok(Value::Integer(try_int(first) as i32)),

            // Counter64 never takes the 32-bit fallback path; a value that
            // does not parse is an error rather than -1.
            TypeTag::Counter64 => first
                .trim()
                .parse::<u64>()
                .map(Value::Counter64)
                .map_err(|_| CoerceErrorKind::InvalidCounter64(first.into())),

            TypeTag::HexString => decode_hex_lines(lines).map(Value::OctetString),

            TypeTag::IpAddress => {
                let sanitized = sanitize_dotted(first.trim());
                sanitized
                    .parse::<Ipv4Addr>()
                    .map(|ip| Value::IpAddress(ip.octets()))
                    .map_err(|_| CoerceErrorKind::InvalidIpAddress(first.into()))
            }

            TypeTag::Oid => Oid::parse_sanitized(first)
                .map(Value::ObjectIdentifier)
                .map_err(|_| CoerceErrorKind::InvalidOidValue(first.into())),

            TypeTag::String => {
                let joined = lines
                    .iter()
                    .map(|l| l.as_ref().trim_matches('"'))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Value::Text(joined))
            }

            TypeTag::Timeticks => parse_timeticks(first)
                .map(Value::TimeTicks)
                .ok_or_else(|| CoerceErrorKind::MalformedTimeticks(first.into())),
        }
    }

    /// The tag text as it appears in a dump header.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Counter32 => "Counter32",
            TypeTag::Counter64 => "Counter64",
            TypeTag::Gauge32 => "Gauge32",
            TypeTag::HexString => "Hex-STRING",
            TypeTag::Integer => "INTEGER",
            TypeTag::IpAddress => "IpAddress",
            TypeTag::Oid => "OID",
            TypeTag::String => "STRING",
            TypeTag::Timeticks => "Timeticks",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeTag {
    type Err = CoerceErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Counter32" => Ok(TypeTag::Counter32),
            "Counter64" => Ok(TypeTag::Counter64),
            "Gauge32" => Ok(TypeTag::Gauge32),
            "Hex-STRING" => Ok(TypeTag::HexString),
            "INTEGER" => Ok(TypeTag::Integer),
            "IpAddress" => Ok(TypeTag::IpAddress),
            "OID" => Ok(TypeTag::Oid),
            "STRING" => Ok(TypeTag::String),
            "Timeticks" => Ok(TypeTag::Timeticks),
            other => Err(CoerceErrorKind::UnknownTag(other.into())),
        }
    }
}

/// Lenient integer parse with the dump-format fallbacks.
///
/// Tries a direct parse first, then a parenthesized decimal run (counters are
/// sometimes captured inside wrappers like `"(12345) 3 days, 10:17:36"`),
/// then a leading bare decimal run. Everything else is the `-1` sentinel.
fn try_int(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return v;
    }

    if let Some(v) = paren_decimal(s) {
        return v as i64;
    }

    let leading: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !leading.is_empty()
        && let Ok(v) = leading.parse::<i64>()
    {
        return v;
    }

    -1
}

/// Extract the decimal run inside the first `(...)` pair, if any.
fn paren_decimal(s: &str) -> Option<u64> {
    let open = s.find('(')?;
    let rest = &s[open + 1..];
    let close = rest.find(')')?;
    rest[..close].trim().parse::<u64>().ok()
}

/// Parse a Timeticks value: a bare count or the `(N) description` wrapper.
///
/// Both forms occur in practice: the walk parser pre-unwraps the wrapper when
/// it reads a dump, and the control API submits bare counts.
fn parse_timeticks(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    if s.starts_with('(') {
        return paren_decimal(s).and_then(|v| u32::try_from(v).ok());
    }
    None
}

/// Decode Hex-STRING lines to raw bytes.
///
/// Lines are sanitized (dumps obscure byte values the same way they obscure
/// addresses), joined with single spaces, re-split on whitespace, and each
/// token decoded as one byte.
fn decode_hex_lines<S: AsRef<str>>(lines: &[S]) -> Result<Bytes, CoerceErrorKind> {
    let joined = lines
        .iter()
        .map(|l| sanitize_dotted(l.as_ref().trim()).into_owned())
        .collect::<Vec<_>>()
        .join(" ");

    let mut bytes = Vec::new();
    for token in joined.split_whitespace() {
        let byte = u8::from_str_radix(token, 16)
            .map_err(|_| CoerceErrorKind::InvalidHexByte(token.into()))?;
        bytes.push(byte);
    }

    Ok(Bytes::from(bytes))
}
