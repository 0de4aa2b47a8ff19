//! # `linkfield`: hyperlink fields for serialized objects
//!
//! Embed URLs of named endpoints and nested link structures into serialized
//! objects, next to their regular fields.
//!
//! ## How does it work
//!
//! A [`UrlFor`] field names an endpoint and its URL arguments. Arguments are
//! literals or placeholder templates like `"<id>"`, read from the serialized
//! object through [`AttributeSource`]. A [`Hyperlinks`] field holds a whole
//! [`Link`] tree of such fields and literal values, and serializes into a
//! JSON value of the same shape.
//!
//! URLs are produced by a [`UrlBuilder`](paths::UrlBuilder), passed explicitly
//! on every serialization. [`paths::RouteTable`] bound to a
//! [`paths::RequestContext`] is the bundled implementation; with `axum` or
//! `actix-web` features it can be extracted in request handlers directly.
//!
//! ```
//! use linkfield::paths::{RequestContext, RouteTable};
//! use linkfield::{links, Attributes, Hyperlinks};
//! use linkfield::UrlFor;
//! use serde_json::json;
//!
//! #[derive(Debug, Attributes)]
//! struct Author {
//!     id: u32,
//! }
//!
//! let routes = RouteTable::new()
//!     .route("author", "/authors/{id}")?
//!     .route("authors", "/authors")?;
//! let urls = routes.bind(RequestContext::new());
//!
//! let field = Hyperlinks::new(links!([
//!     { "rel": "self", "href": (UrlFor::new("author").arg("id", "<id>")) },
//!     { "rel": "collection", "href": (UrlFor::new("authors")) },
//! ]));
//!
//! assert_eq!(
//!     field.serialize(&Author { id: 7 }, &urls)?,
//!     json!([
//!         { "rel": "self", "href": "/authors/7" },
//!         { "rel": "collection", "href": "/authors" },
//!     ])
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attributes;
mod error;
mod field;
mod hyperlinks;
mod placeholder;
mod url_for;

pub use attributes::{Attribute, AttributeSource};
pub use error::{Error, Result};
pub use field::{LinkField, LinkSchema};
pub use hyperlinks::{Hyperlinks, Link};
pub use placeholder::{placeholder, Param};
pub use url_for::UrlFor;

#[cfg(feature = "derive")]
pub use linkfield_macros::Attributes;

pub use paths;
pub use serde;
pub use serde_json;

