//! Placeholder templates: `"<id>"` refers to attribute `id` of the source object.

use serde_json::Value;

/// Extract attribute name from a placeholder template.
///
/// The template is an identifier in angle brackets, optionally surrounded by
/// whitespace on either side of each bracket. Only the first bracket pair is
/// honored, text after it is ignored. Returns `None` for anything else, which
/// callers treat as a literal value.
///
/// ```
/// use linkfield::placeholder;
///
/// assert_eq!(placeholder(" < id > "), Some("id"));
/// assert_eq!(placeholder("<>"), None);
/// assert_eq!(placeholder("id"), None);
/// ```
pub fn placeholder(template: &str) -> Option<&str> {
    let rest = template.trim_start().strip_prefix('<')?;
    let (inner, _) = rest.split_once('>')?;
    let name = inner.trim();

    if name.is_empty() || name.contains(|ch: char| ch.is_whitespace() || ch == '<') {
        None
    } else {
        Some(name)
    }
}

/// URL argument of a [`UrlFor`](crate::UrlFor) field.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Read from the named attribute of the source object at serialization time.
    Attribute(String),
    /// Passed to the URL builder as-is.
    Literal(Value),
}

impl Param {
    /// Classify an argument value: strings holding a placeholder become
    /// [`Param::Attribute`], everything else is a literal.
    pub fn parse(value: impl Into<Value>) -> Self {
        let value = value.into();
        let attribute = value.as_str().and_then(placeholder).map(str::to_owned);

        match attribute {
            Some(name) => Self::Attribute(name),
            None => Self::Literal(value),
        }
    }
}
