//! Walk dump parsing.
//!
//! A walk dump is the textual output of an `snmpwalk`-style capture: one
//! header line per object, with quoted strings and hex dumps continuing over
//! following physical lines. Vendors deviate from the format in small ways,
//! so parsing is lenient: a line that is neither a header nor part of an
//! active record is skipped, not fatal. Coercion failures inside a record
//! (a malformed Timeticks wrapper, a bad hex byte) do propagate, because a
//! silently wrong value defeats the point of replaying a capture.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::value::{TypeTag, Value};

/// One parsed `(identifier, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub oid: Oid,
    pub value: Value,
}

/// A header line split into its parts, before coercion.
enum Header<'a> {
    /// `<oid> = <Type>: <value>`
    Typed {
        oid: &'a str,
        tag: &'a str,
        value: &'a str,
    },
    /// `<oid> = "<quoted>"` — no type tag, implicitly STRING
    Quoted { oid: &'a str, value: &'a str },
}

/// The record currently being accumulated.
struct PendingRecord {
    line: usize,
    oid: Oid,
    /// `None` when the header carried an unrecognized type tag; the record
    /// still consumes its continuation lines and is dropped at flush.
    tag: Option<TypeTag>,
    lines: Vec<String>,
}

/// Parse a whole walk dump held in memory.
///
/// # Examples
///
/// ```
/// use snmposter::walk::parse_str;
/// use snmposter::value::Value;
///
/// let records = parse_str("1.3.6.1.2.1.1.3.0 = Timeticks: (12345) 0:02:03.45\n").unwrap();
/// assert_eq!(records[0].value, Value::TimeTicks(12345));
/// ```
pub fn parse_str(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut pending: Option<PendingRecord> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        match match_header(line) {
            Some(header) => {
                flush(pending.take(), &mut records)?;
                pending = start_record(header, line_no);
            }
            None => match pending.as_mut() {
                Some(p) => p.lines.push(line.trim_matches('"').to_string()),
                None => {
                    tracing::debug!(
                        target: "snmposter::walk",
                        line = line_no,
                        "skipping unrecognized line outside any record"
                    );
                }
            },
        }
    }

    flush(pending, &mut records)?;
    Ok(records)
}

/// Read and parse a walk dump file.
pub fn load_walk(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_str(&text)
}

/// Match the two header forms.
///
/// A right-hand side that is a complete quoted string is always the implicit
/// STRING form, even when the quoted text contains a colon; otherwise the
/// first colon splits type tag from value. Anything else is a continuation.
fn match_header(line: &str) -> Option<Header<'_>> {
    let (lhs, rhs) = line.split_once(" = ")?;
    if lhs.is_empty() || lhs.contains(' ') {
        return None;
    }

    if rhs.len() >= 2 && rhs.starts_with('"') && rhs.ends_with('"') {
        return Some(Header::Quoted {
            oid: lhs,
            value: rhs,
        });
    }

    let (tag, value) = rhs.split_once(':')?;
    if tag.is_empty() {
        return None;
    }

    Some(Header::Typed {
        oid: lhs,
        tag,
        value: value.trim_start(),
    })
}

/// Open a new pending record from a header line.
///
/// Returns `None` when the identifier does not survive sanitization; the
/// record (and any continuation lines it would have owned) is then skipped.
fn start_record(header: Header<'_>, line_no: usize) -> Option<PendingRecord> {
    let (oid_text, tag, value) = match header {
        Header::Typed { oid, tag, value } => (oid, tag.parse::<TypeTag>().ok(), value),
        Header::Quoted { oid, value } => (oid, Some(TypeTag::String), value),
    };

    let oid = match Oid::parse_sanitized(oid_text) {
        Ok(oid) => oid,
        Err(_) => {
            tracing::debug!(
                target: "snmposter::walk",
                line = line_no,
                identifier = oid_text,
                "skipping record with unparseable identifier"
            );
            return None;
        }
    };

    let mut first = value.trim_matches('"').to_string();

    // Timeticks values arrive as `(N) description`; unwrap the count here so
    // the value survives continuation accumulation as a plain number. A
    // wrapper that does not unwrap is left as-is and rejected at coercion.
    if tag == Some(TypeTag::Timeticks)
        && let Some(ticks) = timeticks_count(&first)
    {
        first = ticks.to_string();
    }

    Some(PendingRecord {
        line: line_no,
        oid,
        tag,
        lines: vec![first],
    })
}

/// Extract `N` from a `(N) description` wrapper.
fn timeticks_count(value: &str) -> Option<u64> {
    let rest = value.strip_prefix('(')?;
    let close = rest.find(')')?;
    rest[..close].trim().parse::<u64>().ok()
}

/// Coerce and emit the pending record, if any.
fn flush(pending: Option<PendingRecord>, records: &mut Vec<Record>) -> Result<()> {
    let Some(p) = pending else {
        return Ok(());
    };

    let Some(tag) = p.tag else {
        tracing::debug!(
            target: "snmposter::walk",
            line = p.line,
            oid = %p.oid,
            "skipping record with unrecognized type tag"
        );
        return Ok(());
    };

    match tag.coerce(&p.lines) {
        Ok(value) => {
            records.push(Record { oid: p.oid, value });
            Ok(())
        }
        Err(kind) => Err(Error::Walk {
            line: p.line,
            oid: p.oid,
            tag,
            kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use bytes::Bytes;

    #[test]
    fn test_typed_records() {
        let records = parse_str(
            "1.3.6.1.2.1.2.2.1.10.1 = Counter32: 284527676\n\
             1.3.6.1.2.1.1.3.0 = Timeticks: (2695) 0:00:26.95\n\
             1.3.6.1.2.1.4.20.1.1.10.0.0.1 = IpAddress: 10.0.0.1\n",
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value, Value::Counter32(284527676));
        assert_eq!(records[1].value, Value::TimeTicks(2695));
        assert_eq!(records[2].value, Value::IpAddress([10, 0, 0, 1]));
    }

    #[test]
    fn test_implicit_string_header() {
        let records = parse_str("1.3.6.1.2.1.1.5.0 = \"core-switch-1\"\n").unwrap();
        assert_eq!(records[0].oid, oid!(1, 3, 6, 1, 2, 1, 1, 5, 0));
        assert_eq!(records[0].value, Value::Text("core-switch-1".into()));
    }

    #[test]
    fn test_implicit_string_with_colon() {
        // A complete quoted value containing a colon is the STRING form,
        // not a type tag
        let records = parse_str("1.3.6.1.2.1.1.6.0 = \"rack: 12\"\n").unwrap();
        assert_eq!(records[0].value, Value::Text("rack: 12".into()));
    }

    #[test]
    fn test_multi_line_string() {
        let records = parse_str(
            "1.3.6.1.2.1.1.1.0 = STRING: \"line1\nline2\"\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, Value::Text("line1\nline2".into()));
    }

    #[test]
    fn test_multi_line_hex_string() {
        let records = parse_str(
            "1.3.6.1.2.1.2.2.1.6.1 = Hex-STRING: DE AD\nBE EF\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].value,
            Value::OctetString(Bytes::from_static(&[0xDE, 0xAD, 0xBE, 0xEF]))
        );
    }

    #[test]
    fn test_sanitized_identifier() {
        let records = parse_str("1.x.3 = INTEGER: 7\n").unwrap();
        assert_eq!(records[0].oid, oid!(1, 1, 3));
    }

    #[test]
    fn test_leading_junk_skipped() {
        let records = parse_str(
            "# comment from the capture tool\n\
             \n\
             1.3.6.1.2.1.1.7.0 = INTEGER: 72\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, Value::Integer(72));
    }

    #[test]
    fn test_unknown_tag_record_dropped_with_continuations() {
        let records = parse_str(
            "1.3.6.1.4.1.9.1.0 = Opaque: something\n\
             more of the opaque value\n\
             1.3.6.1.4.1.9.2.0 = INTEGER: 5\n",
        )
        .unwrap();
        // The Opaque record and its continuation vanish; the next record
        // is unaffected
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].oid, oid!(1, 3, 6, 1, 4, 1, 9, 2, 0));
    }

    #[test]
    fn test_flush_at_eof() {
        let records = parse_str("1.3.6.1.2.1.1.1.0 = STRING: \"no trailing newline\"").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_timeticks_propagates() {
        let err = parse_str("1.3.6.1.2.1.1.3.0 = Timeticks: 3 days\n").unwrap_err();
        match err {
            Error::Walk { line, tag, .. } => {
                assert_eq!(line, 1);
                assert_eq!(tag, TypeTag::Timeticks);
            }
            other => panic!("expected Walk error, got {other:?}"),
        }
    }

    #[test]
    fn test_counter64_not_truncated() {
        let records = parse_str("1.3.6.1.2.1.31.1.1.1.6.1 = Counter64: 184467440737\n").unwrap();
        assert_eq!(records[0].value, Value::Counter64(184_467_440_737));
    }

    #[test]
    fn test_load_walk_missing_file() {
        let err = load_walk("/nonexistent/walk.dump").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
