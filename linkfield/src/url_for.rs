use std::collections::BTreeMap;

use paths::{UrlArgs, UrlBuilder};
use serde_json::Value;

use crate::attributes::{self, Attribute, AttributeSource};
use crate::error::{Error, Result};
use crate::placeholder::Param;

/// Field, serialized to the URL of a named endpoint.
///
/// Arguments are either literals or placeholder templates (`"<id>"`),
/// resolved against the serialized object.
///
/// ```
/// use linkfield::paths::{RequestContext, RouteTable};
/// use linkfield::UrlFor;
/// use serde_json::json;
///
/// let routes = RouteTable::new().route("author", "/authors/{id}")?;
/// let urls = routes.bind(RequestContext::new());
///
/// let field = UrlFor::new("author").arg("id", "<id>");
/// assert_eq!(field.serialize(&json!({ "id": 42 }), &urls)?, json!("/authors/42"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UrlFor {
    endpoint: String,
    params: BTreeMap<String, Param>,
    external: bool,
    allow_none: bool,
}

impl UrlFor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
            external: false,
            allow_none: false,
        }
    }

    /// Field, serialized to an absolute URL (with scheme and host).
    pub fn absolute(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).external(true)
    }

    /// Add URL argument. String values holding a placeholder
    /// are read from the source object.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), Param::parse(value));
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// Accept null on deserialization.
    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, Param> {
        &self.params
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn allows_none(&self) -> bool {
        self.allow_none
    }

    /// Resolve URL arguments against `source`.
    ///
    /// Returns `None`, if any referenced attribute is null.
    pub fn resolve(&self, source: &dyn AttributeSource) -> Result<Option<UrlArgs>> {
        let mut args = UrlArgs::new();

        for (name, param) in &self.params {
            let value = match param {
                Param::Literal(value) => value.clone(),
                Param::Attribute(attr) => {
                    let attribute = attributes::lookup(source, attr).map_err(|err| {
                        Error::Serialize {
                            name: attr.clone(),
                            source: err,
                        }
                    })?;

                    match attribute {
                        Attribute::Present(value) => value,
                        Attribute::Null => {
                            tracing::trace!(endpoint = %self.endpoint, attribute = %attr, "null attribute, skipping url");
                            return Ok(None);
                        }
                        Attribute::Absent => {
                            tracing::debug!(endpoint = %self.endpoint, attribute = %attr, "attribute not found on source object");
                            return Err(Error::Attribute {
                                name: attr.clone(),
                                object: format!("{source:?}"),
                            });
                        }
                    }
                }
            };

            args.insert(name.clone(), value);
        }

        Ok(Some(args))
    }

    /// Serialize field for `source`: URL string, or null if a referenced attribute is null.
    pub fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        let Some(args) = self.resolve(source)? else {
            return Ok(Value::Null);
        };

        let url = urls.build_url(&self.endpoint, &args, self.external)?;
        Ok(Value::String(url))
    }

    /// URLs are not parsed back, the value is returned unchanged.
    pub fn deserialize(&self, value: Value) -> Result<Value> {
        crate::field::passthrough(value, self.allow_none)
    }
}

#[cfg(test)]
mod tests {
    use paths::{BuildError, RequestContext, RouteTable, Urls};
    use serde_json::json;

    use super::UrlFor;
    use crate::error::Error;

    fn urls() -> Urls {
        RouteTable::new()
            .route("author", "/authors/{id}")
            .and_then(|routes| routes.route("authors", "/authors"))
            .unwrap()
            .bind(RequestContext::new().with_host("localhost"))
    }

    #[test]
    fn literal_and_template_args() {
        let field = UrlFor::new("authors").arg("sort", "name").arg("page", "<page>");

        assert_eq!(
            field.serialize(&json!({ "page": 0 }), &urls()).unwrap(),
            json!("/authors?page=0&sort=name")
        );
    }

    #[test]
    fn falsy_values_resolve() {
        let field = UrlFor::new("authors").arg("active", "<active>").arg("q", "<q>");

        assert_eq!(
            field.serialize(&json!({ "active": false, "q": "" }), &urls()).unwrap(),
            json!("/authors?active=false&q=")
        );
    }

    #[test]
    fn null_attribute_serializes_to_null() {
        let field = UrlFor::new("author").arg("id", "<id>");

        assert_eq!(field.resolve(&json!({ "id": null })).unwrap(), None);
        assert_eq!(field.serialize(&json!({ "id": null }), &urls()).unwrap(), json!(null));
    }

    #[test]
    fn dotted_attribute() {
        let field = UrlFor::new("author").arg("id", "<author.id>");
        let book = json!({ "author": { "id": 5 } });

        assert_eq!(field.serialize(&book, &urls()).unwrap(), json!("/authors/5"));
    }

    #[test]
    fn missing_attribute() {
        let field = UrlFor::new("author").arg("id", "<not-an-attr>");
        let source = json!({ "id": 1 });

        let err = field.serialize(&source, &urls()).unwrap_err();

        assert!(matches!(&err, Error::Attribute { name, .. } if name == "not-an-attr"));
        assert!(err
            .to_string()
            .contains(&format!("{:?} is not a valid attribute of {:?}", "not-an-attr", source)));
    }

    #[test]
    fn build_error_propagates() {
        let err = UrlFor::new("badendpoint")
            .serialize(&json!({}), &urls())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Build(BuildError::UnknownEndpoint(endpoint)) if endpoint == "badendpoint"
        ));
    }

    #[test]
    fn absolute() {
        let field = UrlFor::absolute("authors");

        assert!(field.is_external());
        assert_eq!(
            field.serialize(&json!({}), &urls()).unwrap(),
            json!("http://localhost/authors")
        );
    }

    #[test]
    fn deserialize_is_noop() {
        let field = UrlFor::new("author").arg("id", "<not-an-attr>");

        assert_eq!(field.deserialize(json!("foo")).unwrap(), json!("foo"));
        assert!(matches!(field.deserialize(json!(null)), Err(Error::Null)));
        assert_eq!(
            field.allow_none(true).deserialize(json!(null)).unwrap(),
            json!(null)
        );
    }
}
