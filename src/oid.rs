//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for
//! common identifiers, and compare arc-by-arc so that `1.9 < 1.10` — the
//! ordering GETNEXT-style range walks depend on.

use crate::error::{Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// Accepts any iterator of `u32` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmposter::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// Empty segments (doubled or trailing dots) are skipped. A segment that
    /// is not a decimal number is an [`Error::InvalidOid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use snmposter::oid::Oid;
    ///
    /// let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
    /// assert_eq!(oid.len(), 9);
    /// assert!(Oid::parse("1.3.abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        for part in s.split('.') {
            if part.is_empty() {
                continue;
            }

            let arc: u32 = part.parse().map_err(|_| {
                Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s.to_string())
            })?;

            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Parse an identifier from a walk dump, sanitizing it first.
    ///
    /// Capture files sometimes obscure addresses and indices with non-numeric
    /// characters; those are normalized by [`sanitize_dotted`] before parsing,
    /// so `"1.x.3"` becomes the identifier `1.1.3`.
    pub fn parse_sanitized(s: &str) -> Result<Self> {
        Self::parse(sanitize_dotted(s.trim()).as_ref())
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// Returns `true` if `self` begins with the same arcs as `other`.
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }
}

/// Replace every character outside `[0-9a-fA-F. ]` with the digit `1`.
///
/// Walk dumps are often shared with IP addresses and other identifying values
/// obscured (`10.x.0.1`, `DE xx BE EF`). Substituting `1` keeps such captures
/// loadable while preserving their shape. Hex digits are kept because the
/// same rule is applied to Hex-STRING byte tokens.
///
/// # Examples
///
/// ```
/// use snmposter::oid::sanitize_dotted;
///
/// assert_eq!(sanitize_dotted("1.x.3"), "1.1.3");
/// assert_eq!(sanitize_dotted("10.x.0.1"), "10.1.0.1");
/// assert_eq!(sanitize_dotted("1.3.6.1"), "1.3.6.1");
/// ```
pub fn sanitize_dotted(s: &str) -> Cow<'_, str> {
    if s
        .bytes()
        .all(|b| b.is_ascii_hexdigit() || b == b'.' || b == b' ')
    {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.chars()
            .map(|c| {
                if c.is_ascii_hexdigit() || c == '.' || c == ' ' {
                    c
                } else {
                    '1'
                }
            })
            .collect(),
    )
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID at compile time.
///
/// # Examples
///
/// ```
/// use snmposter::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    }

    #[test]
    fn test_parse_invalid_arc() {
        assert!(Oid::parse("1.3.abc.1").is_err());
        assert!(Oid::parse("1.3.-6.1").is_err());
    }

    #[test]
    fn test_parse_empty_segments() {
        let oid = Oid::parse("1..3.").unwrap();
        assert_eq!(oid.arcs(), &[1, 3]);

        let empty = Oid::parse("").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_sanitized() {
        let oid = Oid::parse_sanitized("1.x.3").unwrap();
        assert_eq!(oid, oid!(1, 1, 3));

        // Hex digits survive sanitization and then fail numeric parsing
        assert!(Oid::parse_sanitized("1.a.3").is_err());
    }

    #[test]
    fn test_sanitize_dotted() {
        assert_eq!(sanitize_dotted("10.x.0.1"), "10.1.0.1");
        assert_eq!(sanitize_dotted("DE xx BE EF"), "DE 11 BE EF");
        // Untouched input borrows rather than allocating
        assert!(matches!(sanitize_dotted("1.3.6.1"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_segment_wise_ordering() {
        // "1.10" must sort after "1.9" even though it is lexicographically
        // smaller as a plain string
        let a = Oid::parse("1.9").unwrap();
        let b = Oid::parse("1.10").unwrap();
        assert!(a < b);

        // Prefixes sort before their extensions
        let prefix = oid!(1, 3, 6);
        let child = oid!(1, 3, 6, 0);
        assert!(prefix < child);
    }

    #[test]
    fn test_starts_with() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        let prefix = Oid::parse("1.3.6.1").unwrap();
        assert!(oid.starts_with(&prefix));
        assert!(!prefix.starts_with(&oid));
        assert!(oid.starts_with(&Oid::empty()));
    }

    #[test]
    fn test_macro() {
        let oid = oid!(1, 3, 6, 1);
        assert_eq!(oid.arcs(), &[1, 3, 6, 1]);
    }

    #[test]
    fn test_fromstr_roundtrip() {
        let original = oid!(1, 3, 6, 1, 4, 1, 9, 9, 42);
        let parsed: Oid = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
