// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar as the store knows it. The store has no schema, so the intended
/// type of an input has to be guessed from its text: numeric-looking input
/// becomes a number so server-side index/sort semantics work on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Turns raw text input into a typed scalar. Never fails: input that is
    /// not a complete numeric literal stays text, and empty input stays the
    /// empty string rather than becoming zero.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Text(raw.to_owned());
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::Int(int);
        }
        if let Ok(float) = trimmed.parse::<f64>()
            && float.is_finite()
        {
            // JSON cannot carry inf/NaN, so non-finite literals stay text.
            return Self::Float(float);
        }
        Self::Text(raw.to_owned())
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use anyhow::Result;

    #[test]
    fn integer_literal_coerces_to_int() {
        assert_eq!(Value::coerce("40"), Value::Int(40));
        assert_eq!(Value::coerce("-7"), Value::Int(-7));
        assert_eq!(Value::coerce("  25 "), Value::Int(25));
    }

    #[test]
    fn float_literal_coerces_to_float() {
        assert_eq!(Value::coerce("2.5"), Value::Float(2.5));
        assert_eq!(Value::coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn partial_numeric_input_stays_text() {
        assert_eq!(Value::coerce("40x"), Value::Text("40x".to_owned()));
        assert_eq!(Value::coerce("4 0"), Value::Text("4 0".to_owned()));
        assert_eq!(Value::coerce("Juan"), Value::Text("Juan".to_owned()));
    }

    #[test]
    fn empty_input_stays_empty_text_never_zero() {
        assert_eq!(Value::coerce(""), Value::Text(String::new()));
        assert_eq!(Value::coerce("   "), Value::Text("   ".to_owned()));
    }

    #[test]
    fn non_finite_literals_stay_text() {
        assert_eq!(Value::coerce("inf"), Value::Text("inf".to_owned()));
        assert_eq!(Value::coerce("NaN"), Value::Text("NaN".to_owned()));
    }

    #[test]
    fn coercion_is_idempotent_on_text_output() {
        for raw in ["Juan", "40x", "", "maría@email.com"] {
            let first = Value::coerce(raw);
            assert_eq!(Value::coerce(&first.to_string()), first);
        }
    }

    #[test]
    fn wire_format_is_untagged() -> Result<()> {
        assert_eq!(serde_json::to_string(&Value::Int(40))?, "40");
        assert_eq!(serde_json::to_string(&Value::Float(2.5))?, "2.5");
        assert_eq!(
            serde_json::to_string(&Value::Text("Juan".to_owned()))?,
            "\"Juan\""
        );

        let decoded: Value = serde_json::from_str("30")?;
        assert_eq!(decoded, Value::Int(30));
        Ok(())
    }
}
