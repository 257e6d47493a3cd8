//! Best-effort scalar coercion for flattened leaves.
//!
//! eBay returns every value as text. During flattening, text that reads
//! unambiguously as a number becomes a JSON number and the literals `true`
//! and `false` become booleans. This can corrupt all-digit identifiers, so
//! the behavior is a [`ScalarCoercion`] policy: it can be switched off, or
//! individual field names can be exempted.

use std::collections::BTreeSet;

use serde_json::{Number, Value};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Policy controlling string-to-number and string-to-boolean coercion.
///
/// # Example
///
/// ```rust
/// use ebay_api::ScalarCoercion;
/// use serde_json::json;
///
/// let coercion = ScalarCoercion::default().with_exempt_field("ItemID");
///
/// assert_eq!(coercion.coerce(Some("Quantity"), "3".to_string()), json!(3));
/// assert_eq!(coercion.coerce(Some("ItemID"), "0123".to_string()), json!("0123"));
/// assert_eq!(coercion.coerce(None, "false".to_string()), json!(false));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarCoercion {
    enabled: bool,
    exempt_fields: BTreeSet<String>,
}

impl Default for ScalarCoercion {
    fn default() -> Self {
        Self {
            enabled: true,
            exempt_fields: BTreeSet::new(),
        }
    }
}

impl ScalarCoercion {
    /// Returns a policy that never coerces; all leaves stay strings.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            exempt_fields: BTreeSet::new(),
        }
    }

    /// Exempts a field name from coercion. Values under this field stay strings.
    #[must_use]
    pub fn with_exempt_field(mut self, field: impl Into<String>) -> Self {
        self.exempt_fields.insert(field.into());
        self
    }

    /// Returns `true` if coercion is switched on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if values under `field` are never coerced.
    #[must_use]
    pub fn is_exempt(&self, field: &str) -> bool {
        self.exempt_fields.contains(field)
    }

    /// Coerces a string leaf found under `field`.
    #[must_use]
    pub fn coerce(&self, field: Option<&str>, text: String) -> Value {
        if !self.enabled || field.is_some_and(|f| self.is_exempt(f)) {
            return Value::String(text);
        }

        match text.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => parse_number(&text).map_or(Value::String(text), Value::Number),
        }
    }
}

/// Parses text that is unambiguously a decimal number.
///
/// Whole values come back as integers (`"100.00"` is `100`). Integer text
/// too large for 64 bits, non-finite values and anything with surrounding
/// whitespace are rejected.
#[must_use]
pub fn parse_number(text: &str) -> Option<Number> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
    {
        return None;
    }

    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::from(n));
        }
        return text
            .strip_prefix('+')
            .unwrap_or(text)
            .parse::<u64>()
            .ok()
            .map(Number::from);
    }

    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

/// Casts an amount value to a number when it reads as one.
///
/// Amounts are cast regardless of the [`ScalarCoercion`] policy.
#[must_use]
pub fn cast_amount(value: Value) -> Value {
    match value {
        Value::String(text) => parse_number(&text).map_or(Value::String(text), Value::Number),
        other => other,
    }
}
