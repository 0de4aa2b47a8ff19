use std::fmt::Display;
use std::str::FromStr;

type Result<T> = std::result::Result<T, Error>;

/// Parsed route path, e.g. `/authors/{id}/posts/{*rest}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
    captures: Vec<String>,
    wildcard: Option<String>,
}

impl PathTemplate {
    /// Parse dynamic path expression, normalizing it in the process.
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim_end_matches('/');
        let (expr, wildcard) = split_wildcard(expr)?;

        let mut segments = vec![];
        let mut captures: Vec<String> = vec![];

        for seg in expr.split('/').filter(|seg| !seg.is_empty()) {
            match capture_of(seg)? {
                Some(ident) if ident.starts_with('*') => return Err(Error::InvalidWildcard),
                Some(ident) => {
                    let ident = assert_ident(ident)?;
                    if captures.iter().any(|known| known == ident)
                        || wildcard.as_deref() == Some(ident)
                    {
                        return Err(Error::DuplicateCapture(ident.to_owned()));
                    }

                    segments.push(Segment::Capture(ident.to_owned()));
                    captures.push(ident.to_owned());
                }
                None => segments.push(Segment::Static(assert_url_segment(seg)?.to_owned())),
            }
        }

        Ok(Self {
            segments,
            captures,
            wildcard,
        })
    }

    /// Get slash-separated segments of parsed URL template.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of capture variables, in path order.
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Get ident of wildcard capture (if present).
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// Position of a named capture.
    pub fn capture_index(&self, ident: &str) -> Option<usize> {
        self.captures.iter().position(|id| id == ident)
    }

    /// Get count of captures in this template (including wildcard capture)
    pub fn param_count(&self) -> usize {
        self.captures.len() + usize::from(self.wildcard.is_some())
    }

    /// Check, if template has no segments at all (root path).
    pub fn is_blank(&self) -> bool {
        self.segments.is_empty() && self.wildcard.is_none()
    }
}

impl FromStr for PathTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for PathTemplate {
    /// Canonical form of the template, e.g. `/a/{b}/{*c}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_blank() {
            return f.write_str("/");
        }

        for seg in &self.segments {
            match seg {
                Segment::Static(seg) => write!(f, "/{seg}")?,
                Segment::Capture(ident) => write!(f, "/{{{ident}}}")?,
            }
        }

        if let Some(ident) = &self.wildcard {
            write!(f, "/{{*{ident}}}")?;
        }

        Ok(())
    }
}

/// A segment of dynamic path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A static segment, that shouldn't be substituted for an actual value
    /// (contains valid, percent-encoded value for segment).
    Static(String),
    /// A dynamic segment, that should be substituted for a value
    /// (contains a name of capture variable, that is a valid Rust ident).
    Capture(String),
}

/// An error type for parsing dynamic URL paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unclosed capture")]
    UnclosedCapture,
    /// Wildcard captures are only accepted at the end of dynamic path
    #[error("wildcard can only be the last capture in path template")]
    InvalidWildcard,
    /// Capture variable wasn't a valid Rust ident.
    #[error("capture ident should be a valid Rust ident")]
    InvalidIdent,
    /// Static segment contained invalid URL path character.
    #[error("static segments of template should be valid url path substrings")]
    InvalidPathChar,
    #[error("capture `{0}` appears more than once")]
    DuplicateCapture(String),
}

fn is_valid_ident(segment: &str) -> bool {
    segment.starts_with(|ch| char::is_alphabetic(ch) || ch == '_')
        && segment.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

fn assert_ident(seg: &str) -> Result<&str> {
    if is_valid_ident(seg) {
        Ok(seg)
    } else {
        Err(Error::InvalidIdent)
    }
}

/// Split trailing `{*ident}` segment off the expression.
fn split_wildcard(expr: &str) -> Result<(&str, Option<String>)> {
    let (head, last) = expr.rsplit_once('/').unwrap_or(("", expr));

    match capture_of(last)?.and_then(|capture| capture.strip_prefix('*')) {
        Some(ident) => Ok((head, Some(assert_ident(ident)?.to_owned()))),
        None => Ok((expr, None)),
    }
}

fn capture_of(seg: &str) -> Result<Option<&str>> {
    match (seg.strip_prefix('{'), seg.ends_with('}')) {
        (Some(inner), true) => Ok(inner.strip_suffix('}')),
        (None, false) => Ok(None),
        _ => Err(Error::UnclosedCapture),
    }
}

fn is_valid_url_path_char(ch: char) -> bool {
    matches!(ch,
        'A'..='Z'
        | 'a'..='z'
        | '0'..='9'
        | '-'
        | '.'
        | '_'
        | '~'
        | '!'
        | '$'
        | '&'
        | '\''
        | '('
        | ')'
        | '*'
        | '+'
        | ','
        | ';'
        | '='
        | ':'
        | '@'
    )
}

fn assert_url_segment(seg: &str) -> Result<&str> {
    if seg.chars().all(is_valid_url_path_char) {
        Ok(seg)
    } else {
        Err(Error::InvalidPathChar)
    }
}
