use serde::{Deserialize, Serialize};

/// A single cell value in a park record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Infer a typed value from a raw text cell: integer first, then float, then text.
    ///
    /// Non-finite spellings such as `NaN` or `inf` stay text so they are reported
    /// as malformed when used numerically. Digit strings with a leading zero (`007`)
    /// stay text so codes keep their spelling; they still read as numbers through
    /// [`Value::as_f64`].
    ///
    /// # Examples
    ///
    /// ```
    /// use park_inventory_analyzer::Value;
    ///
    /// assert_eq!(Value::infer("42"), Value::Integer(42));
    /// assert_eq!(Value::infer("12.5"), Value::Float(12.5));
    /// assert_eq!(Value::infer("Jongno-gu"), Value::Text("Jongno-gu".into()));
    /// ```
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if has_leading_zero(trimmed) {
            return Value::Text(raw.to_string());
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => Value::Text(raw.to_string()),
        }
    }

    /// Numeric view of this value, if it represents a finite number.
    ///
    /// Text values are parsed after trimming whitespace.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// Whether this value holds text rather than a number.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }
}

/// Codes such as `007` or `01`: a zero followed by another digit.
fn has_leading_zero(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s).as_bytes();
    digits.len() > 1 && digits[0] == b'0' && digits[1].is_ascii_digit()
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer() {
        assert_eq!(Value::infer("1500"), Value::Integer(1500));
        assert_eq!(Value::infer(" -7 "), Value::Integer(-7));
    }

    #[test]
    fn test_infer_float() {
        assert_eq!(Value::infer("2890.5"), Value::Float(2890.5));
        assert_eq!(Value::infer("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(Value::infer("근린공원"), Value::Text("근린공원".to_string()));
        assert_eq!(Value::infer(""), Value::Text(String::new()));
    }

    #[test]
    fn test_infer_non_finite_stays_text() {
        assert!(Value::infer("NaN").is_text());
        assert!(Value::infer("inf").is_text());
    }

    #[test]
    fn test_infer_leading_zero_codes_stay_text() {
        assert_eq!(Value::infer("007"), Value::Text("007".to_string()));
        assert_eq!(Value::infer("01"), Value::Text("01".to_string()));
        assert_eq!(Value::infer("-01"), Value::Text("-01".to_string()));
        assert_ne!(Value::infer("01"), Value::infer("1"));
        assert_eq!(Value::infer("01").as_f64(), Some(1.0));
        assert_eq!(Value::infer("0"), Value::Integer(0));
        assert_eq!(Value::infer("0.5"), Value::Float(0.5));
        assert_eq!(Value::infer("10"), Value::Integer(10));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Integer(10).as_f64(), Some(10.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Text(" 3.25 ".to_string()).as_f64(), Some(3.25));
    }

    #[test]
    fn test_as_f64_rejects_garbage() {
        assert_eq!(Value::Text("N/A".to_string()).as_f64(), None);
        assert_eq!(Value::Text(String::new()).as_f64(), None);
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
        assert_eq!(Value::Text("inf".to_string()).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(5).to_string(), "5");
        assert_eq!(Value::Float(5.5).to_string(), "5.5");
        assert_eq!(Value::Text("Gangnam-gu".to_string()).to_string(), "Gangnam-gu");
    }

    #[test]
    fn test_json_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[3, 4.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Integer(3),
                Value::Float(4.5),
                Value::Text("x".to_string())
            ]
        );
    }
}
