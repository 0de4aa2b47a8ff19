//! Path templates, named route table and URL builder, used by `linkfield` crate

#[cfg(feature = "actix-web")]
mod actix_web;
#[cfg(feature = "axum")]
mod axum;
pub mod path_serializer;
pub mod path_template;
pub mod routes;

pub use path_serializer::{ArgsSerializer, Result, SerializedUrl};
pub use path_template::{PathTemplate, Segment};
pub use routes::{BuildError, RequestContext, RouteTable, UrlArgs, UrlBuilder, Urls};

/// Serialize URL arguments into dynamic path template.
///
/// ## Returns
///
/// Valid, percent encoded path with dynamic segments of template substituted
/// for argument values, and query pairs for the remaining arguments.
pub fn serialize<A>(template: &PathTemplate, args: &A) -> Result<SerializedUrl>
where
    A: serde::Serialize + ?Sized,
{
    let mut serializer = ArgsSerializer::new(template);
    serde::Serialize::serialize(args, &mut serializer)?;
    serializer.finalize()
}
