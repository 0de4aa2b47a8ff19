//! Named-attribute access on source objects.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Result of an attribute lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Present(Value),
    /// Attribute exists, but has no value.
    Null,
    /// Object has no such attribute.
    Absent,
}

impl Attribute {
    /// Attribute holding a serialized field value.
    pub fn of<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self::from)
    }

    fn get(self, key: &str) -> Self {
        match self {
            Self::Present(Value::Object(mut map)) => map.remove(key).map_or(Self::Absent, Self::from),
            Self::Present(_) | Self::Absent => Self::Absent,
            Self::Null => Self::Null,
        }
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            value => Self::Present(value),
        }
    }
}

/// Object, whose attributes can be referenced by link fields.
///
/// The `Debug` representation identifies the object in error messages.
/// Implement it with `#[derive(Attributes)]` for plain structs.
pub trait AttributeSource: Debug {
    fn attribute(&self, name: &str) -> serde_json::Result<Attribute>;
}

/// Look up a possibly dotted attribute path (`author.id`).
///
/// The first segment is read from `source`, the rest walk nested objects.
/// A null value on the way makes the whole path null.
pub fn lookup(source: &dyn AttributeSource, path: &str) -> serde_json::Result<Attribute> {
    let mut keys = path.split('.');
    let first = keys.next().unwrap_or(path);

    Ok(keys.fold(source.attribute(first)?, Attribute::get))
}

impl AttributeSource for Value {
    fn attribute(&self, name: &str) -> serde_json::Result<Attribute> {
        match self {
            Value::Object(map) => map.attribute(name),
            _ => Ok(Attribute::Absent),
        }
    }
}

impl AttributeSource for Map<String, Value> {
    fn attribute(&self, name: &str) -> serde_json::Result<Attribute> {
        Ok(self.get(name).cloned().map_or(Attribute::Absent, Attribute::from))
    }
}

impl<V: Serialize + Debug, S: BuildHasher> AttributeSource for HashMap<String, V, S> {
    fn attribute(&self, name: &str) -> serde_json::Result<Attribute> {
        self.get(name).map_or(Ok(Attribute::Absent), Attribute::of)
    }
}

impl<V: Serialize + Debug> AttributeSource for BTreeMap<String, V> {
    fn attribute(&self, name: &str) -> serde_json::Result<Attribute> {
        self.get(name).map_or(Ok(Attribute::Absent), Attribute::of)
    }
}

macro_rules! forward_source {
    ($($ptr:ty),*) => {
        $(impl<T: AttributeSource + ?Sized> AttributeSource for $ptr {
            fn attribute(&self, name: &str) -> serde_json::Result<Attribute> {
                (**self).attribute(name)
            }
        })*
    };
}

forward_source!(&T, Box<T>, Rc<T>, Arc<T>);
