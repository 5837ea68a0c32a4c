//! Text utilities for property values and XML content.
//!
//! - [`ValueTokens`] splits property text into value tokens, honouring
//!   double-quoted spans.
//! - [`quote_token`] is its inverse for a single token.
//! - [`escape_text`] and [`escape_attribute`] make arbitrary strings safe to
//!   embed in element content and attribute values.

use std::borrow::Cow;

/// Iterator over the value tokens of a property's text.
///
/// Tokens are separated by whitespace. A token that begins with `"` runs to
/// the next `"` (or to the end of the input when the quote is never closed)
/// and may contain whitespace; the quotes are not part of the token.
///
/// # Example
/// ```
/// use jccl::text::ValueTokens;
///
/// let tokens: Vec<_> = ValueTokens::new(r#"foo "bar baz" qux"#).collect();
/// assert_eq!(tokens, ["foo", "bar baz", "qux"]);
/// ```
#[derive(Clone, Debug)]
pub struct ValueTokens<'a> {
    rest: &'a str,
}

impl<'a> ValueTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for ValueTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.rest.trim_start();
        if start.is_empty() {
            self.rest = start;
            return None;
        }

        if let Some(quoted) = start.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => {
                    self.rest = &quoted[end + 1..];
                    Some(&quoted[..end])
                }
                None => {
                    self.rest = "";
                    Some(quoted)
                }
            }
        } else {
            let end = start.find(char::is_whitespace).unwrap_or(start.len());
            self.rest = &start[end..];
            Some(&start[..end])
        }
    }
}

/// The written form of one token, such that [`ValueTokens`] reads it back
/// unchanged.
///
/// Tokens are quoted only when they are empty or hold whitespace. A token
/// holding `"` cannot be quoted, so it is written bare, which works unless
/// it also holds whitespace or starts with `"`. Those tokens have no written
/// form and give `None`.
///
/// ```
/// use jccl::text::quote_token;
///
/// assert_eq!(quote_token("red").as_deref(), Some("red"));
/// assert_eq!(quote_token("deep blue").as_deref(), Some("\"deep blue\""));
/// assert_eq!(quote_token("say \"hi\""), None);
/// ```
pub fn quote_token(token: &str) -> Option<Cow<'_, str>> {
    let spaced = token.contains(char::is_whitespace);
    if token.contains('"') {
        if spaced || token.starts_with('"') {
            return None;
        }
        return Some(Cow::Borrowed(token));
    }
    if spaced || token.is_empty() {
        Some(Cow::Owned(format!("\"{token}\"")))
    } else {
        Some(Cow::Borrowed(token))
    }
}

/// Escape `&`, `<` and `>` for use in XML text.
///
/// Returns the input unchanged (borrowed) when none of the three is present.
/// Each character of the input is examined once, so the `&` of an entity
/// produced here is never escaped again.
pub fn escape_text(original: &str) -> Cow<'_, str> {
    if !original.contains(['&', '<', '>']) {
        return Cow::Borrowed(original);
    }
    let mut escaped = String::with_capacity(original.len() + 8);
    for ch in original.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Escape a string for use inside a double-quoted attribute value.
///
/// Same as [`escape_text`], plus `"` and newlines.
pub fn escape_attribute(original: &str) -> Cow<'_, str> {
    if !original.contains(['"', '\n']) {
        return escape_text(original);
    }
    let text = escape_text(original);
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#xA;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
