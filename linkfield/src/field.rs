use std::fmt::Debug;
use std::sync::Arc;

use paths::UrlBuilder;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::attributes::AttributeSource;
use crate::error::{Error, Result};
use crate::hyperlinks::{Hyperlinks, Link};
use crate::url_for::UrlFor;

/// Field, whose value is computed from the serialized object
/// instead of being read from it.
pub trait LinkField: Debug + Send + Sync {
    fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value>;

    fn deserialize(&self, value: Value) -> Result<Value>;
}

impl LinkField for UrlFor {
    fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        UrlFor::serialize(self, source, urls)
    }

    fn deserialize(&self, value: Value) -> Result<Value> {
        UrlFor::deserialize(self, value)
    }
}

impl LinkField for Hyperlinks {
    fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        Hyperlinks::serialize(self, source, urls)
    }

    fn deserialize(&self, value: Value) -> Result<Value> {
        Hyperlinks::deserialize(self, value)
    }
}

impl LinkField for Link {
    fn serialize(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Value> {
        Link::serialize(self, source, urls)
    }

    fn deserialize(&self, value: Value) -> Result<Value> {
        passthrough(value, false)
    }
}

pub(crate) fn passthrough(value: Value, allow_none: bool) -> Result<Value> {
    if value.is_null() && !allow_none {
        Err(Error::Null)
    } else {
        Ok(value)
    }
}

/// Named link fields, embedded next to the regular fields of an object.
///
/// ```
/// use linkfield::paths::{RequestContext, RouteTable};
/// use linkfield::{links, Hyperlinks, LinkSchema, UrlFor};
/// use serde_json::json;
///
/// let routes = RouteTable::new()
///     .route("author", "/authors/{id}")?
///     .route("authors", "/authors")?;
/// let urls = routes.bind(RequestContext::new());
///
/// let schema = LinkSchema::new()
///     .field("url", UrlFor::new("author").arg("id", "<id>"))
///     .field("_links", Hyperlinks::new(links!({ "collection": (UrlFor::new("authors")) })));
///
/// let author = json!({ "id": 1, "name": "Fred" });
/// assert_eq!(
///     schema.dump_object(&author, &urls)?,
///     json!({
///         "id": 1,
///         "name": "Fred",
///         "url": "/authors/1",
///         "_links": { "collection": "/authors" },
///     })
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkSchema {
    fields: Vec<(String, Arc<dyn LinkField>)>,
}

impl LinkSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add field under `name`, replacing any field with the same name.
    pub fn field(mut self, name: impl Into<String>, field: impl LinkField + 'static) -> Self {
        let name = name.into();
        let field: Arc<dyn LinkField> = Arc::new(field);

        match self.fields.iter().position(|(known, _)| *known == name) {
            Some(idx) => self.fields[idx].1 = field,
            None => self.fields.push((name, field)),
        }

        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &dyn LinkField)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.as_ref()))
    }

    /// Serialize every field for `source`.
    pub fn dump(&self, source: &dyn AttributeSource, urls: &dyn UrlBuilder) -> Result<Map<String, Value>> {
        self.fields
            .iter()
            .map(|(name, field)| {
                tracing::trace!(field = %name, "serializing link field");
                Ok((name.clone(), field.serialize(source, urls)?))
            })
            .collect()
    }

    /// Serialize `object` and embed link fields into it.
    /// Link fields replace regular fields of the same name.
    pub fn dump_object<T>(&self, object: &T, urls: &dyn UrlBuilder) -> Result<Value>
    where
        T: Serialize + AttributeSource,
    {
        let Value::Object(mut map) = serde_json::to_value(object)? else {
            return Err(Error::NotAnObject);
        };

        map.extend(self.dump(object, urls)?);
        Ok(Value::Object(map))
    }

    /// Deserialize link fields present in `data`, leaving other entries untouched.
    pub fn load(&self, mut data: Map<String, Value>) -> Result<Map<String, Value>> {
        for (name, field) in &self.fields {
            if let Some(value) = data.remove(name) {
                data.insert(name.clone(), field.deserialize(value)?);
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use paths::{RequestContext, RouteTable, Urls};
    use serde_json::{json, Map};

    use super::{LinkField, LinkSchema};
    use crate::error::Error;
    use crate::{Hyperlinks, UrlFor};

    fn urls() -> Urls {
        RouteTable::new()
            .route("author", "/authors/{id}")
            .unwrap()
            .bind(RequestContext::new())
    }

    #[test]
    fn trait_objects() {
        let fields: Vec<Box<dyn LinkField>> = vec![
            Box::new(UrlFor::new("author").arg("id", "<id>")),
            Box::new(Hyperlinks::new(crate::links!(["x"]))),
            Box::new(crate::links!({ "up": (UrlFor::new("author").arg("id", 1)) })),
        ];

        let values: Vec<_> = fields
            .iter()
            .map(|field| field.serialize(&json!({ "id": 2 }), &urls()).unwrap())
            .collect();

        assert_eq!(
            values,
            [json!("/authors/2"), json!(["x"]), json!({ "up": "/authors/1" })]
        );
    }

    #[test]
    fn field_replaces_same_name() {
        let schema = LinkSchema::new()
            .field("url", UrlFor::new("first"))
            .field("url", UrlFor::new("author").arg("id", 1));

        assert_eq!(schema.fields().count(), 1);
        assert_eq!(
            schema.dump(&json!({}), &urls()).unwrap(),
            Map::from_iter([("url".to_owned(), json!("/authors/1"))])
        );
    }

    #[test]
    fn dump_object_requires_map() {
        let schema = LinkSchema::new().field("url", UrlFor::new("author").arg("id", 1));

        assert!(matches!(
            schema.dump_object(&json!([1, 2]), &urls()),
            Err(Error::NotAnObject)
        ));
    }

    #[test]
    fn load() {
        let schema = LinkSchema::new()
            .field("url", UrlFor::new("author").allow_none(true))
            .field("_links", Hyperlinks::new(crate::links!({})));

        let data = json!({ "name": "Fred", "url": null, "_links": { "self": "/authors/1" } });
        let data = data.as_object().cloned().unwrap();

        assert_eq!(schema.load(data.clone()).unwrap(), data);

        let mut without_links = data;
        without_links.insert("_links".to_owned(), json!(null));
        assert!(matches!(schema.load(without_links), Err(Error::Null)));
    }
}
