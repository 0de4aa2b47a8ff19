//! # `linkfield`: hyperlink fields for serialized objects
//!
//! `proc-macro` crate for `#[derive(Attributes)]`.
//!
//! The derive implements `linkfield::AttributeSource` for a struct with named
//! fields, so that placeholder templates (`"<id>"`) of link fields can read
//! its fields. Field values are converted with `serde`, so every field that
//! isn't skipped should implement `Serialize`. The struct should implement
//! `Debug`, which identifies it in error messages.
//!
//! ## Attributes
//!
//! - `#[linkfield(rename_all = "...")]` on the struct: case of attribute names,
//!   one of `camelCase`, `snake_case`, `kebab-case`, `PascalCase`,
//!   `SCREAMING_SNAKE_CASE`.
//! - `#[linkfield(rename = "...")]` on a field: explicit attribute name.
//! - `#[linkfield(skip)]` on a field: field is not visible as an attribute.
//!
//! ```
//! use linkfield::{Attribute, AttributeSource, Attributes};
//!
//! #[derive(Debug, Attributes)]
//! #[linkfield(rename_all = "camelCase")]
//! struct Book {
//!     book_id: u32,
//!     #[linkfield(rename = "writer")]
//!     author: String,
//!     #[linkfield(skip)]
//!     secret: String,
//! }
//!
//! let book = Book { book_id: 1, author: "Fred".into(), secret: "x".into() };
//!
//! assert_eq!(book.attribute("bookId").unwrap(), Attribute::Present(1.into()));
//! assert_eq!(book.attribute("writer").unwrap(), Attribute::Present("Fred".into()));
//! assert_eq!(book.attribute("secret").unwrap(), Attribute::Absent);
//! ```

use proc_macro::TokenStream;

/// # `Attributes` derive macro
///
/// Implements `linkfield::AttributeSource` for a struct with named fields.
/// Enums, unions, tuple and unit structs are rejected at compile time.
#[proc_macro_derive(Attributes, attributes(linkfield))]
pub fn attributes(input: TokenStream) -> TokenStream {
    linkfield_macro_impl::attributes(input.into()).into()
}
