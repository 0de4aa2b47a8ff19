use crate::path_template::{PathTemplate, Segment};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::ser::{
    Impossible, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeTuple,
    SerializeTupleStruct, Serializer,
};
use std::fmt::Display;

/// Result type for this [`ArgsSerializer`] functionality.
pub type Result<T> = std::result::Result<T, Error>;

/// Characters left as-is in path segments and query components.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path and query produced from a template and a set of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedUrl {
    /// Percent encoded path, always starting with `/`.
    pub path: String,
    /// Raw (not yet encoded) query pairs, in serialization order.
    pub query: Vec<(String, String)>,
}

impl SerializedUrl {
    /// Encoded query string without leading `?`, if there are any query pairs.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }

        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect();

        Some(pairs.join("&"))
    }
}

impl Display for SerializedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        match self.query_string() {
            Some(query) => write!(f, "?{query}"),
            None => Ok(()),
        }
    }
}

/// URL arguments serializer.
///
/// # Accepted serialized values
///
/// * Maps and flat structures: entries named after a capture fill the path,
///   an entry named after the wildcard capture fills the tail of the path,
///   every other entry becomes a query pair.
/// * Tuples, filling captures (and then the wildcard) positionally.
/// * A single plain value (or sequence), if the template has exactly one capture.
///
/// Sequences are only accepted for the wildcard capture and for query
/// entries (the key is then repeated). Null values are dropped, so a capture
/// with a null value is reported as missing on [`finalize`](Self::finalize).
pub struct ArgsSerializer<'t> {
    template: &'t PathTemplate,
    values: Vec<Option<String>>,
    wildcard_values: Vec<String>,
    query: Vec<(String, String)>,
    next_key: Option<String>,
    position: usize,
}

impl<'t> ArgsSerializer<'t> {
    /// Create new serializer from [`PathTemplate`].
    pub fn new(template: &'t PathTemplate) -> Self {
        Self {
            template,
            values: vec![None; template.captures().len()],
            wildcard_values: vec![],
            query: vec![],
            next_key: None,
            position: 0,
        }
    }

    /// Create interpolated URL after serialization
    /// and reset this instance, allowing for reuse with another serialized value.
    ///
    /// If you don't need to reuse the serializer,
    /// use [`crate::serialize`] short-hand function instead.
    pub fn finalize(&mut self) -> Result<SerializedUrl> {
        let values = std::mem::replace(&mut self.values, vec![None; self.template.captures().len()]);
        let wildcard_values = std::mem::take(&mut self.wildcard_values);
        let query = std::mem::take(&mut self.query);
        self.next_key = None;
        self.position = 0;

        let mut output = String::new();

        for segment in self.template.segments() {
            output.push('/');
            match segment {
                Segment::Static(segment) => output.push_str(segment),
                Segment::Capture(ident) => {
                    let idx = self
                        .template
                        .capture_index(ident)
                        .ok_or_else(|| Error::MissingCapture(ident.clone()))?;
                    let value = values[idx]
                        .as_deref()
                        .ok_or_else(|| Error::MissingCapture(ident.clone()))?;
                    output.push_str(value);
                }
            }
        }

        for segment in wildcard_values {
            output.push('/');
            output.push_str(&segment);
        }

        if output.is_empty() {
            output.push('/');
        }

        Ok(SerializedUrl {
            path: output,
            query,
        })
    }

    fn set_named(&mut self, name: String, arg: Arg) -> Result<()> {
        if let Some(idx) = self.template.capture_index(&name) {
            self.values[idx] = match arg {
                Arg::Value(value) => Some(encode(&value)),
                Arg::Null => None,
                Arg::Seq(_) => return Err(Error::NonWildcardCapture),
            };
        } else if self.template.wildcard() == Some(name.as_str()) {
            self.wildcard_values = match arg {
                Arg::Value(value) => value
                    .split('/')
                    .filter(|part| !part.is_empty())
                    .map(encode)
                    .collect(),
                Arg::Seq(values) => values.iter().map(|value| encode(value)).collect(),
                Arg::Null => vec![],
            };
        } else {
            match arg {
                Arg::Value(value) => self.query.push((name, value)),
                Arg::Seq(values) => self
                    .query
                    .extend(values.into_iter().map(|value| (name.clone(), value))),
                Arg::Null => {}
            }
        }

        Ok(())
    }

    fn set_positional(&mut self, arg: Arg) -> Result<()> {
        let name = match self.template.captures().get(self.position) {
            Some(name) => name.clone(),
            None if self.position == self.template.captures().len() => self
                .template
                .wildcard()
                .ok_or(Error::InvalidLen)?
                .to_owned(),
            None => return Err(Error::InvalidLen),
        };

        self.position += 1;
        self.set_named(name, arg)
    }

    fn set_single(&mut self, arg: Arg) -> Result<()> {
        if self.template.param_count() == 1 {
            self.set_positional(arg)
        } else {
            Err(Error::InvalidLen)
        }
    }

    fn assert_len(&self, len: usize) -> Result<()> {
        if self.template.param_count() == len {
            Ok(())
        } else {
            Err(Error::InvalidLen)
        }
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Serialized form of a single argument.
#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Value(String),
    Seq(Vec<String>),
    Null,
}

macro_rules! forward_to_arg {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, v: $prim_ty) -> Result<()> {
            let arg = ArgSerializer.$trait_fn(v)?;
            self.set_single(arg)
        })*
    };
}

impl<'m, 't> Serializer for &'m mut ArgsSerializer<'t> {
    type Ok = ();
    type Error = Error;

    type SerializeMap = Self;
    type SerializeSeq = SeqArgs<'m, 't>;
    type SerializeStruct = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;

    forward_to_arg!(
        (serialize_bool, bool),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_bytes, &[u8]),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
        (serialize_u128, u128),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_i128, i128),
        (serialize_f32, f32),
        (serialize_f64, f64)
    );

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        let arg = ArgSerializer.serialize_unit_variant(name, variant_index, variant)?;
        self.set_single(arg)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::TypeNotSupported("newtype variant"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqArgs {
            parent: self,
            items: vec![],
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.assert_len(len)?;
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::TypeNotSupported("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::TypeNotSupported("struct variant"))
    }
}

impl<'m, 't> SerializeMap for &'m mut ArgsSerializer<'t> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ArgSerializer)? {
            Arg::Value(key) => {
                self.next_key = Some(key);
                Ok(())
            }
            _ => Err(Error::KeyMustBeString),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.next_key.take().ok_or(Error::KeyMustBeString)?;
        let arg = value.serialize(ArgSerializer)?;
        self.set_named(key, arg)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'m, 't> SerializeStruct for &'m mut ArgsSerializer<'t> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let arg = value.serialize(ArgSerializer)?;
        self.set_named(key.to_owned(), arg)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'m, 't> SerializeTuple for &'m mut ArgsSerializer<'t> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let arg = value.serialize(ArgSerializer)?;
        self.set_positional(arg)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'m, 't> SerializeTupleStruct for &'m mut ArgsSerializer<'t> {
    type Ok = <Self as SerializeTuple>::Ok;
    type Error = <Self as SerializeTuple>::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        SerializeTuple::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        SerializeTuple::end(self)
    }
}

/// Collects a top-level sequence, passed as the only argument.
pub struct SeqArgs<'m, 't> {
    parent: &'m mut ArgsSerializer<'t>,
    items: Vec<String>,
}

impl<'m, 't> SerializeSeq for SeqArgs<'m, 't> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        push_element(&mut self.items, value)
    }

    fn end(self) -> Result<()> {
        self.parent.set_single(Arg::Seq(self.items))
    }
}

fn push_element<T>(items: &mut Vec<String>, value: &T) -> Result<()>
where
    T: ?Sized + Serialize,
{
    match value.serialize(ArgSerializer)? {
        Arg::Value(value) => items.push(value),
        Arg::Null => {}
        Arg::Seq(_) => return Err(Error::DeepNesting),
    }

    Ok(())
}

/// Serializer of a single argument value into its raw string form.
struct ArgSerializer;

macro_rules! impl_with_to_string {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, v: $prim_ty) -> Result<Arg> {
            Ok(Arg::Value(v.to_string()))
        })*
    };
}

impl Serializer for ArgSerializer {
    type Ok = Arg;
    type Error = Error;

    type SerializeMap = Impossible<Arg, Error>;
    type SerializeSeq = ArgSeq;
    type SerializeStruct = Impossible<Arg, Error>;
    type SerializeTuple = ArgSeq;
    type SerializeTupleStruct = ArgSeq;
    type SerializeStructVariant = Impossible<Arg, Error>;
    type SerializeTupleVariant = Impossible<Arg, Error>;

    impl_with_to_string!(
        (serialize_bool, bool),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
        (serialize_u128, u128),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_i128, i128),
        (serialize_f32, f32),
        (serialize_f64, f64)
    );

    fn serialize_bytes(self, _v: &[u8]) -> Result<Arg> {
        Err(Error::TypeNotSupported("&[u8]"))
    }

    fn serialize_none(self) -> Result<Arg> {
        Ok(Arg::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Arg>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Arg> {
        Ok(Arg::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Arg> {
        Ok(Arg::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Arg> {
        Ok(Arg::Value(variant.to_lowercase()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Arg>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Arg>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::TypeNotSupported("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<ArgSeq> {
        Ok(ArgSeq(vec![]))
    }

    fn serialize_tuple(self, _len: usize) -> Result<ArgSeq> {
        Ok(ArgSeq(vec![]))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<ArgSeq> {
        Ok(ArgSeq(vec![]))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::TypeNotSupported("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::DeepNesting)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::DeepNesting)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::TypeNotSupported("struct variant"))
    }
}

struct ArgSeq(Vec<String>);

impl SerializeSeq for ArgSeq {
    type Ok = Arg;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        push_element(&mut self.0, value)
    }

    fn end(self) -> Result<Arg> {
        Ok(Arg::Seq(self.0))
    }
}

impl SerializeTuple for ArgSeq {
    type Ok = Arg;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Arg> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for ArgSeq {
    type Ok = Arg;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Arg> {
        SerializeSeq::end(self)
    }
}

/// Type of errors, returned by [`ArgsSerializer`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Byte slices and any enum variant, other than
    /// unit variants are not supported
    #[error("type `{0}` is not supported")]
    TypeNotSupported(&'static str),
    /// Custom error variant in accordance with serde guidelines.
    #[error("{0}")]
    Custom(String),
    /// Serialized tuple had an element count not matching with
    /// capture count in template, or a plain value was given for
    /// a template with several captures.
    #[error("number of serialized elements doesn't match path template")]
    InvalidLen,
    /// Sequence was passed as non-wildcard capture value.
    #[error("only the wildcard capture accepts a sequence")]
    NonWildcardCapture,
    /// Argument value was a map, a struct or a sequence of sequences.
    #[error("only plain values or sequences of plain values can be used as url arguments")]
    DeepNesting,
    /// When finalizing, serialized value didn't contain a value for a certain capture.
    #[error("missing required capture member: {0}")]
    MissingCapture(String),
    #[error("argument names should serialize to plain values")]
    KeyMustBeString,
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}
