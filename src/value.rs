use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;

/// Core value types for SQLite operations
///
/// Mirrors the SQLite storage classes. Used both as the bound lookup value
/// and as the cells of a fetched [`crate::Row`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

// SQLite has no boolean storage class; booleans are stored as 0/1.
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(r) => ValueRef::Real(*r),
            Value::Text(text) => ValueRef::Text(text.as_bytes()),
            Value::Blob(bytes) => ValueRef::Blob(bytes),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

/// Tuple-cell rendering: `None`, `42`, `1.5`, `'text'`, `b'\x00'`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => fmt_real(*r, f),
            Value::Text(text) => {
                f.write_str("'")?;
                for ch in text.chars() {
                    match ch {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
                        _ => write!(f, "{ch}")?,
                    }
                }
                f.write_str("'")
            }
            Value::Blob(bytes) => {
                f.write_str("b'")?;
                for byte in bytes {
                    write!(f, "\\x{byte:02x}")?;
                }
                f.write_str("'")
            }
        }
    }
}

/// Reals as `1.0`, `2.5`, `1e+20`, `1.5e-05`, `inf`, `nan`.
fn fmt_real(r: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.is_nan() {
        return f.write_str("nan");
    }
    if r.is_infinite() {
        return f.write_str(if r > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = r.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{r:e}");
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return write!(f, "{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
        return f.write_str(&formatted);
    }
    // Debug keeps the fractional part on whole numbers (1.0, not 1).
    write!(f, "{r:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_tuple_cells() {
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Real(1.0).to_string(), "1.0");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Real(-0.25).to_string(), "-0.25");
        assert_eq!(Value::Real(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::Real(1e20).to_string(), "1e+20");
        assert_eq!(Value::Real(-1e100).to_string(), "-1e+100");
        assert_eq!(Value::Real(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Value::Real(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Real(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value::Real(f64::NAN).to_string(), "nan");
        assert_eq!(Value::from("a@aol.com").to_string(), "'a@aol.com'");
        assert_eq!(Value::Blob(vec![0, 255]).to_string(), "b'\\x00\\xff'");
    }

    #[test]
    fn display_escapes_quotes() {
        assert_eq!(Value::from("it's").to_string(), "'it\\'s'");
        assert_eq!(Value::from("a\\b").to_string(), "'a\\\\b'");
    }

    #[test]
    fn display_escapes_control_characters() {
        assert_eq!(Value::from("a\tb\r\nc").to_string(), "'a\\tb\\r\\nc'");
        assert_eq!(Value::from("\u{0}\u{1b}\u{7f}").to_string(), "'\\x00\\x1b\\x7f'");
        assert_eq!(Value::from("café").to_string(), "'café'");
        assert!(!Value::from("x\ry\u{b}").to_string().contains(char::is_control));
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(true), Value::Integer(1));
        assert_eq!(Value::from(3_i32), Value::Integer(3));
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
        assert_eq!(Value::from(ValueRef::Text(b"bob")), Value::Text("bob".into()));
        assert!(Value::from(ValueRef::Null).is_null());
        assert_eq!(Value::from("t").as_text(), Some("t"));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Integer(1),
            Value::Real(0.5),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,1,0.5,"x"]"#);
    }
}
