use std::collections::BTreeMap;

use paths::UrlBuilder;
use serde_json::{Map, Value};

use crate::attributes::AttributeSource;
use crate::error::Result;
use crate::url_for::UrlFor;

/// Declaration of nested links: maps and sequences with [`UrlFor`] fields
/// and literal values as leaves.
///
/// Use [`links!`](crate::links) for a JSON-like syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Url(UrlFor),
    Literal(Value),
    Map(BTreeMap<String, Link>),
    Seq(Vec<Link>),
}

impl Link {
    pub fn map<K, L>(entries: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<Link>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, link)| (key.into(), link.into()))
                .collect(),
        )
    }

    pub fn seq<L: Into<Link>>(items: impl IntoIterator<Item = L>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Produce a tree of the same shape, with every [`UrlFor`] leaf
    /// replaced by its serialized value.
    pub fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        match self {
            Self::Url(field) => field.serialize(source, urls),
            Self::Literal(value) => Ok(value.clone()),
            Self::Map(entries) => entries
                .iter()
                .map(|(key, link)| Ok((key.clone(), link.serialize(source, urls)?)))
                .collect::<Result<Map<String, Value>>>()
                .map(Value::Object),
            Self::Seq(items) => items
                .iter()
                .map(|link| link.serialize(source, urls))
                .collect::<Result<Vec<Value>>>()
                .map(Value::Array),
        }
    }
}

impl From<UrlFor> for Link {
    fn from(value: UrlFor) -> Self {
        Self::Url(value)
    }
}

impl From<Value> for Link {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Link {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for Link {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<BTreeMap<String, Link>> for Link {
    fn from(value: BTreeMap<String, Link>) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Link>> for Link {
    fn from(value: Vec<Link>) -> Self {
        Self::Seq(value)
    }
}

/// Build a [`Link`] tree with JSON-like syntax.
///
/// Keys are string literals; values are nested `{...}` maps, `[...]`
/// sequences, literals (strings, numbers including negative ones, booleans),
/// or parenthesized expressions convertible into [`Link`].
///
/// ```
/// use linkfield::{links, Link, UrlFor};
///
/// let tree = links!({
///     "self": {
///         "href": (UrlFor::new("author").arg("id", "<id>")),
///         "title": "The author",
///         "rank": -1,
///     },
///     "related": [(UrlFor::new("authors"))],
/// });
///
/// assert!(matches!(tree, Link::Map(_)));
/// ```
#[macro_export]
macro_rules! links {
    (@map [$($out:tt)*]) => {
        $crate::Link::Map(::std::collections::BTreeMap::from([$($out)*]))
    };
    (@map [$($out:tt)*] $key:literal : $value:literal $(, $($rest:tt)*)?) => {
        $crate::links!(@map [$($out)* (::std::string::String::from($key), $crate::links!($value)),] $($($rest)*)?)
    };
    (@map [$($out:tt)*] $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $crate::links!(@map [$($out)* (::std::string::String::from($key), $crate::links!($value)),] $($($rest)*)?)
    };
    (@seq [$($out:tt)*]) => {
        $crate::Link::Seq(::std::vec![$($out)*])
    };
    (@seq [$($out:tt)*] $value:literal $(, $($rest:tt)*)?) => {
        $crate::links!(@seq [$($out)* $crate::links!($value),] $($($rest)*)?)
    };
    (@seq [$($out:tt)*] $value:tt $(, $($rest:tt)*)?) => {
        $crate::links!(@seq [$($out)* $crate::links!($value),] $($($rest)*)?)
    };
    ({ $($body:tt)* }) => {
        $crate::links!(@map [] $($body)*)
    };
    ([ $($body:tt)* ]) => {
        $crate::links!(@seq [] $($body)*)
    };
    ($value:literal) => {
        $crate::Link::Literal($crate::serde_json::Value::from($value))
    };
    ($value:expr) => {
        $crate::Link::from($value)
    };
}

/// Field, serialized to a tree of links.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlinks {
    links: Link,
    allow_none: bool,
}

impl Hyperlinks {
    pub fn new(links: impl Into<Link>) -> Self {
        Self {
            links: links.into(),
            allow_none: false,
        }
    }

    /// Accept null on deserialization.
    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    pub fn links(&self) -> &Link {
        &self.links
    }

    pub fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        tracing::trace!("serializing hyperlinks");
        self.links.serialize(source, urls)
    }

    /// Links are not parsed back, the value is returned unchanged.
    pub fn deserialize(&self, value: Value) -> Result<Value> {
        crate::field::passthrough(value, self.allow_none)
    }
}
