//! Error types for snmposter.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.
//!
//! Only startup errors (`Io`, `Config`, `Walk`) are fatal; everything that can
//! happen in steady-state read/update traffic is reported and recovered.

use std::net::IpAddr;
use std::path::PathBuf;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Segment is not a decimal number.
    InvalidArc,
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
        }
    }
}

/// Value coercion error kinds.
///
/// Returned by [`TypeTag::coerce`](crate::value::TypeTag::coerce). Integer
/// parse failures are not represented here: the integer family recovers with
/// the `-1` sentinel instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceErrorKind {
    /// No value lines to coerce.
    EmptyValue,
    /// Counter64 value is not an unsigned 64-bit integer.
    InvalidCounter64(Box<str>),
    /// Hex-STRING token is not a hex byte pair.
    InvalidHexByte(Box<str>),
    /// IpAddress value is not a dotted quad.
    InvalidIpAddress(Box<str>),
    /// OID-valued leaf does not parse as an identifier.
    InvalidOidValue(Box<str>),
    /// Timeticks value is neither a bare count nor a `(N) description` wrapper.
    MalformedTimeticks(Box<str>),
    /// Type tag is not one of the recognized dump tags.
    UnknownTag(Box<str>),
}

impl std::fmt::Display for CoerceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue => write!(f, "no value to coerce"),
            Self::InvalidCounter64(v) => write!(f, "not a Counter64 value: {:?}", v),
            Self::InvalidHexByte(t) => write!(f, "not a hex byte: {:?}", t),
            Self::InvalidIpAddress(v) => write!(f, "not an IPv4 address: {:?}", v),
            Self::InvalidOidValue(v) => write!(f, "not an OID value: {:?}", v),
            Self::MalformedTimeticks(v) => {
                write!(
                    f,
                    "expected \"(N) description\" or a bare count, got {:?}",
                    v
                )
            }
            Self::UnknownTag(t) => write!(f, "unknown type tag {:?}", t),
        }
    }
}

/// Configuration file error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// Row does not have both a dump path and an address.
    MissingColumn,
    /// Address column is not an IP address.
    InvalidAddress(Box<str>),
    /// Two rows claim the same address.
    DuplicateAddress(IpAddr),
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn => write!(f, "expected \"dump-path,address\""),
            Self::InvalidAddress(a) => write!(f, "invalid agent address {:?}", a),
            Self::DuplicateAddress(a) => write!(f, "address {} already configured", a),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error reading a dump or configuration file.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed configuration row (startup-fatal).
    #[error("configuration error at {path}:{line}: {kind}")]
    Config {
        path: PathBuf,
        line: usize,
        kind: ConfigErrorKind,
    },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// A walk dump record whose value cannot be coerced (startup-fatal for
    /// the agent loading that dump).
    #[error("walk dump line {line}: cannot coerce {oid} ({tag}): {kind}")]
    Walk {
        line: usize,
        oid: crate::oid::Oid,
        tag: crate::value::TypeTag,
        kind: CoerceErrorKind,
    },

    /// Update batch references an address with no registered agent.
    #[error("no agent registered for {address}")]
    UnknownAddress { address: IpAddr },

    /// Control API request body is not valid JSON for an update request.
    #[error("invalid update request body: {source}")]
    UpdateBody {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Create an I/O error carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
