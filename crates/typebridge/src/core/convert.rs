//! Convert functions attached to conversion rules.
//!
//! The registry treats a convert function as opaque: it is handed the caller's
//! code fragment plus optional type context and returns whatever the surrounding
//! code generator wants emitted. Closures implement [`Converter`] directly;
//! [`Template`] covers the common case of string substitution and is what the
//! YAML table format produces.

use std::fmt;

use crate::error::{ConvertError, Result};

/// Emits the code (or value) for converting between two types.
///
/// - forward conversions receive the caller's code and optional type context
/// - backward conversions receive only the code
/// - initializer lookups receive the rule's init argument as `code`
pub trait Converter: Send + Sync {
    fn convert(&self, code: &str, context: Option<&str>) -> String;
}

impl<F> Converter for F
where
    F: Fn(&str, Option<&str>) -> String + Send + Sync,
{
    fn convert(&self, code: &str, context: Option<&str>) -> String {
        self(code, context)
    }
}

/// Returns the code unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Converter for Identity {
    fn convert(&self, code: &str, _context: Option<&str>) -> String {
        code.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Code,
    Context,
}

/// Substitution template with `{code}` and `{context}` placeholders.
///
/// `{{` and `}}` produce literal braces. A missing context renders as an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Placeholder for the caller's code fragment.
    pub const CODE: &'static str = "{code}";
    /// Placeholder for the extra type context.
    pub const CONTEXT: &'static str = "{context}";

    /// Parse a template, rejecting unknown or unterminated placeholders.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(ConvertError::Config(format!(
                            "Unterminated placeholder in template '{}'",
                            source
                        )));
                    }
                    let segment = match name.as_str() {
                        "code" => Segment::Code,
                        "context" => Segment::Context,
                        other => {
                            return Err(ConvertError::Config(format!(
                                "Unknown placeholder '{{{}}}' in template '{}' (expected {{code}} or {{context}})",
                                other, source
                            )))
                        }
                    };
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(ConvertError::Config(format!(
                        "Unmatched '}}' in template '{}'",
                        source
                    )))
                }
                other => text.push(other),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The `{code}` template.
    pub fn identity() -> Self {
        Self {
            source: Self::CODE.to_string(),
            segments: vec![Segment::Code],
        }
    }

    /// Original template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render with the given substitutions.
    pub fn render(&self, code: &str, context: Option<&str>) -> String {
        let mut out = String::with_capacity(self.source.len() + code.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Code => out.push_str(code),
                Segment::Context => out.push_str(context.unwrap_or_default()),
            }
        }
        out
    }
}

impl Converter for Template {
    fn convert(&self, code: &str, context: Option<&str>) -> String {
        self.render(code, context)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
