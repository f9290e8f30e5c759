// src/utils/form_value.rs

//! Loose scalar values as they arrive from a submitted form, plus the
//! truthiness and lossy casting rules the compose transformer relies on.

use serde::Deserialize;

/// A single submitted field value.
///
/// Browsers send everything as text, but JSON clients may send numbers and
/// booleans; all of them go through the same coercion rules. `null` never
/// reaches this type: it deserializes into the surrounding `Option` as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl FormValue {
    /// `false`, `0`, `0.0`, `""` and `"0"` are falsy. `"0.0"` and `" "` are not.
    pub fn is_falsy(&self) -> bool {
        match self {
            FormValue::Bool(b) => !b,
            FormValue::Int(i) => *i == 0,
            FormValue::Float(f) => *f == 0.0,
            FormValue::Text(s) => s.is_empty() || s == "0",
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            FormValue::Bool(true) => "1".to_string(),
            FormValue::Bool(false) => String::new(),
            FormValue::Int(i) => i.to_string(),
            // Display already drops the trailing ".0" of integral floats.
            FormValue::Float(f) => f.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }

    /// Lossy integer cast. Never fails: anything unreadable becomes 0.
    pub fn to_int(&self) -> i64 {
        match self {
            FormValue::Bool(b) => i64::from(*b),
            FormValue::Int(i) => *i,
            FormValue::Float(f) => float_to_int(*f),
            FormValue::Text(s) => text_to_int(s),
        }
    }

    /// Loose `==` against an integer. Text only matches when the whole
    /// string (ignoring surrounding whitespace) is a number.
    ///
    /// Booleans never match, even `true` against a non-zero id: the flags
    /// checked with this (`-1` no-reply, `1` delete) must be that exact number.
    pub fn loosely_equals(&self, expected: i64) -> bool {
        match self {
            FormValue::Bool(_) => false,
            FormValue::Int(i) => *i == expected,
            FormValue::Float(f) => *f == expected as f64,
            FormValue::Text(s) => {
                let trimmed = s.trim_matches(is_form_whitespace);
                match scan_numeric_prefix(trimmed) {
                    Some(prefix) if prefix.len == trimmed.len() => {
                        match parse_prefix(trimmed, &prefix) {
                            Number::Int(i) => i == expected,
                            Number::Float(f) => f == expected as f64,
                        }
                    }
                    _ => false,
                }
            }
        }
    }
}

/// Missing key, empty string, or numeric zero: the trigger for defaulting a field.
pub fn is_absent_or_zero(value: Option<&FormValue>) -> bool {
    value.is_none_or(FormValue::is_falsy)
}

pub fn to_text(value: Option<&FormValue>) -> String {
    value.map(FormValue::to_text).unwrap_or_default()
}

pub fn to_int(value: Option<&FormValue>) -> i64 {
    value.map_or(0, FormValue::to_int)
}

pub fn to_bool(value: Option<&FormValue>) -> bool {
    !is_absent_or_zero(value)
}

/// Falsy values default to 0, everything else is integer-cast.
pub fn to_int_or_zero(value: Option<&FormValue>) -> i64 {
    if is_absent_or_zero(value) { 0 } else { to_int(value) }
}

fn is_form_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn float_to_int(f: f64) -> i64 {
    if !f.is_finite() {
        return 0;
    }
    // `as` saturates at the i64 bounds.
    f.trunc() as i64
}

fn text_to_int(s: &str) -> i64 {
    let trimmed = s.trim_start_matches(is_form_whitespace);
    match scan_numeric_prefix(trimmed) {
        Some(prefix) => match parse_prefix(trimmed, &prefix) {
            Number::Int(i) => i,
            Number::Float(f) => float_to_int(f),
        },
        None => 0,
    }
}

struct NumericPrefix {
    len: usize,
    is_float: bool,
}

enum Number {
    Int(i64),
    Float(f64),
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run, if it holds any digit.
fn scan_numeric_prefix(s: &str) -> Option<NumericPrefix> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut digits = pos - int_start;
    let mut is_float = false;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if digits > 0 || end > frac_start {
            digits += end - frac_start;
            pos = end;
            is_float = true;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > exp_start {
            pos = end;
            is_float = true;
        }
    }

    Some(NumericPrefix { len: pos, is_float })
}

fn parse_prefix(s: &str, prefix: &NumericPrefix) -> Number {
    let literal = &s[..prefix.len];
    if !prefix.is_float {
        if let Ok(i) = literal.parse::<i64>() {
            return Number::Int(i);
        }
        // Too many digits for i64: saturate by sign.
        return if literal.starts_with('-') {
            Number::Int(i64::MIN)
        } else {
            Number::Int(i64::MAX)
        };
    }
    Number::Float(literal.parse::<f64>().unwrap_or(0.0))
}
