//! String to `Vec<T>` conversion for PostgreSQL array literals
//!
//! Accepts one-dimensional array literals such as `{1,2,3}` or
//! `{"a b",NULL,c}` and plain JSON arrays such as `[1,2,3]`. Literal elements
//! are rewritten into a JSON array and decoded with `serde_json`, so the element
//! type only needs to be deserializable.

use crate::core::{HelperError, HelperResult};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

/// Types that can be decoded from array literal elements
pub trait ArrayElement: DeserializeOwned {
    /// Whether bare literal elements must become JSON strings
    const TEXTUAL: bool = false;
}

impl ArrayElement for String {
    const TEXTUAL: bool = true;
}

impl ArrayElement for Uuid {
    const TEXTUAL: bool = true;
}

impl ArrayElement for NaiveDate {
    const TEXTUAL: bool = true;
}

impl<T: ArrayElement> ArrayElement for Option<T> {
    const TEXTUAL: bool = T::TEXTUAL;
}

impl ArrayElement for i16 {}
impl ArrayElement for i32 {}
impl ArrayElement for i64 {}
impl ArrayElement for u32 {}
impl ArrayElement for u64 {}
impl ArrayElement for f32 {}
impl ArrayElement for f64 {}
impl ArrayElement for bool {}
impl ArrayElement for serde_json::Value {}

#[derive(Debug, PartialEq)]
enum Element {
    Null,
    Quoted(String),
    Bare(String),
}

/// Parse an array literal or JSON array into a vector
///
/// Blank input, `{}` and `null` give an empty vector.
pub fn try_convert_to_slice<T: ArrayElement>(input: &str) -> HelperResult<Vec<T>> {
    let input = input.trim();
    if input.is_empty() || input == "{}" || input == "null" {
        return Ok(Vec::new());
    }

    let json = match input
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(body) => literal_to_json::<T>(input, body)?,
        None => input.to_string(),
    };

    Ok(serde_json::from_str(&json)?)
}

/// Like [`try_convert_to_slice`], but returns an empty vector on failure
pub fn convert_to_slice<T: ArrayElement>(input: &str) -> Vec<T> {
    try_convert_to_slice(input).unwrap_or_else(|e| {
        debug!("Array conversion of {:?} failed: {}", input, e);
        Vec::new()
    })
}

fn literal_to_json<T: ArrayElement>(input: &str, body: &str) -> HelperResult<String> {
    let items: Vec<String> = split_elements(input, body)?
        .into_iter()
        .map(|element| match element {
            Element::Null => "null".to_string(),
            Element::Quoted(text) | Element::Bare(text) if T::TEXTUAL => {
                serde_json::Value::String(text).to_string()
            }
            Element::Quoted(text) | Element::Bare(text) => text,
        })
        .collect();

    Ok(format!("[{}]", items.join(",")))
}

fn split_elements(input: &str, body: &str) -> HelperResult<Vec<Element>> {
    let mut elements = Vec::new();
    let mut buf = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut escaped = false;

    for c in body.chars() {
        if escaped {
            buf.push(c);
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            '"' => {
                // Whitespace ahead of an opening quote is not part of the element
                if !quoted && buf.trim().is_empty() {
                    buf.clear();
                }
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' if !in_quotes => {
                elements.extend(finish_element(&mut buf, &mut quoted));
            }
            '{' | '}' if !in_quotes => {
                return Err(HelperError::unparseable(
                    input,
                    "nested arrays are not supported",
                ));
            }
            c if !in_quotes && quoted && c.is_whitespace() => {}
            c => buf.push(c),
        }
    }

    if in_quotes || escaped {
        return Err(HelperError::unparseable(input, "unterminated quoted element"));
    }

    elements.extend(finish_element(&mut buf, &mut quoted));
    Ok(elements)
}

fn finish_element(buf: &mut String, quoted: &mut bool) -> Option<Element> {
    let text = std::mem::take(buf);
    if std::mem::take(quoted) {
        return Some(Element::Quoted(text));
    }

    let text = text.trim();
    if text.is_empty() {
        None
    } else if text.eq_ignore_ascii_case("NULL") {
        Some(Element::Null)
    } else {
        Some(Element::Bare(text.to_string()))
    }
}
