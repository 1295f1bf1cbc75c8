use serde_json::Value;

/// Result of a numeric coercion.
///
/// `defaulted` is set whenever the input could not be read as a number and
/// the contract fell back to 0.0. Callers that only care about the value
/// can go through [`normalize_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced {
    pub value: f64,
    pub defaulted: bool,
}

impl Coerced {
    fn defaulted() -> Self {
        Coerced { value: 0.0, defaulted: true }
    }

    fn parsed(value: f64) -> Self {
        Coerced { value, defaulted: false }
    }
}

/// Coerce an arbitrary API value into a clean float.
///
/// Upstream values arrive as free-form localized strings ("1 234,50 €"),
/// plain numbers, or one-element lists depending on API mood. This is the
/// single chokepoint that makes downstream arithmetic safe: it never
/// errors, it degrades to a defaulted 0.0 instead.
pub fn coerce_number(raw: Option<&Value>) -> Coerced {
    match raw {
        None | Some(Value::Null) => Coerced::defaulted(),
        Some(Value::Array(items)) => match items.first() {
            Some(first) => coerce_number(Some(first)),
            None => coerce_text("0"),
        },
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => Coerced::parsed(f),
            None => Coerced::defaulted(),
        },
        Some(Value::String(s)) => coerce_text(s),
        Some(other) => coerce_text(&other.to_string()),
    }
}

/// Coerce a text fragment into a clean float.
///
/// Keeps digits and the two decimal-separator characters, drops everything
/// else (currency symbols, unit suffixes, letters, all spacing including
/// non-breaking spaces), then reads the comma as a decimal separator.
/// Known simplification: US-style "1,234" parses as 1.234.
pub fn coerce_text(text: &str) -> Coerced {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Coerced::defaulted();
    }
    match cleaned.parse::<f64>() {
        Ok(f) => Coerced::parsed(f),
        Err(_) => Coerced::defaulted(),
    }
}

/// Convenience wrapper when the defaulted flag is not needed.
pub fn normalize_number(raw: Option<&Value>) -> f64 {
    coerce_number(raw).value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn localized_price_string() {
        let c = coerce_number(Some(&json!("1\u{a0}234,50 €")));
        assert_eq!(c.value, 1234.50);
        assert!(!c.defaulted);
    }

    #[test]
    fn garbage_inputs_default_to_zero() {
        for v in [json!(null), json!(""), json!([""]), json!("pas de prix")] {
            let c = coerce_number(Some(&v));
            assert_eq!(c.value, 0.0);
            assert!(c.defaulted, "expected defaulted for {v:?}");
        }
        assert_eq!(coerce_number(None), Coerced::defaulted());
    }

    #[test]
    fn list_wrapped_price_takes_first_element() {
        assert_eq!(coerce_number(Some(&json!([125000, 1300]))).value, 125000.0);
        // empty list behaves like the literal "0"
        let c = coerce_number(Some(&json!([])));
        assert_eq!(c.value, 0.0);
        assert!(!c.defaulted);
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(coerce_number(Some(&json!(185000))).value, 185000.0);
        assert_eq!(coerce_number(Some(&json!(54.5))).value, 54.5);
    }

    #[test]
    fn unit_suffix_is_stripped() {
        assert_eq!(coerce_text("54.5 m²").value, 54.5);
        assert_eq!(coerce_text("120 kr/mån").value, 120.0);
    }

    #[test]
    fn comma_reads_as_decimal_separator() {
        assert_eq!(coerce_text("54,5").value, 54.5);
        // documented simplification, not a locale-correct parse
        assert_eq!(coerce_text("1,234").value, 1.234);
    }

    #[test]
    fn multiple_separators_default_to_zero() {
        let c = coerce_text("1.234.567");
        assert_eq!(c.value, 0.0);
        assert!(c.defaulted);
    }

    #[test]
    fn idempotent_on_own_output() {
        for input in ["1 234,50 €", "54.5 m²", "abc", "", "0", "125000"] {
            let once = coerce_text(input).value;
            let twice = coerce_text(&once.to_string()).value;
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
