//! Default parameter values as source literals.

use facade_types::{DefaultValue, Parameter};

/// A default value with no literal spelling. Carries the literal kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLiteral(pub String);

/// Literal text for a parameter's default, or `None` if it has none.
///
/// A parameter marked `has_default` without an explicit value defaults to
/// `default`, which is valid for reference and value types alike.
pub fn default_literal(parameter: &Parameter) -> Result<Option<String>, UnsupportedLiteral> {
    if !parameter.has_default {
        return Ok(None);
    }
    match &parameter.default_value {
        None => Ok(Some("default".to_string())),
        Some(value) => render_literal(value).map(Some),
    }
}

pub fn render_literal(value: &DefaultValue) -> Result<String, UnsupportedLiteral> {
    let unsupported = || UnsupportedLiteral(value.kind_name().to_string());

    let text = match value {
        DefaultValue::Null => "default".to_string(),
        DefaultValue::Bool(b) => b.to_string(),
        DefaultValue::Char(c) => format!("'{}'", escape(&c.to_string(), '\'')),
        DefaultValue::String(s) => format!("\"{}\"", escape(s, '"')),
        DefaultValue::Int(i) => i.to_string(),
        DefaultValue::Long(l) => format!("{}L", l),
        DefaultValue::Float(f) if f.is_finite() => format!("{:?}F", f),
        DefaultValue::Double(d) if d.is_finite() => format!("{:?}D", d),
        DefaultValue::Decimal(text) if is_decimal_text(text) => format!("{}M", text.trim()),
        DefaultValue::Float(_)
        | DefaultValue::Double(_)
        | DefaultValue::Decimal(_)
        | DefaultValue::Other { .. } => return Err(unsupported()),
    };

    Ok(text)
}

fn is_decimal_text(text: &str) -> bool {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}
