//! Structural type model walked by the schema reflector
//!
//! Rust has no runtime reflection, so types describe themselves through
//! [`Reflect`]. Object shapes list their fields in declaration order together
//! with the metadata annotations ([`Tags`]) that drive both the JSON Schema
//! keywords and the form rendering hints.
//!
//! ```rust
//! use jsonform::{Field, ObjectShape, Reflect, Shape};
//!
//! struct User {
//!     first_name: String,
//!     age: i64,
//! }
//!
//! impl Reflect for User {
//!     fn shape() -> Shape {
//!         ObjectShape::new::<Self>()
//!             .title("User")
//!             .field(Field::new::<String>("firstName").tag("required", "true").tag("minLength", "3"))
//!             .field(Field::new::<i64>("age").tag("minimum", "1"))
//!             .into()
//!     }
//! }
//! ```

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, SchemaObject};
use schemars::JsonSchema;
use serde_json::Value;
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

/// Structure of a type as seen by the schema reflector
#[derive(Debug, Clone)]
pub enum Shape {
    /// Leaf value with a ready-made schema
    Scalar(SchemaObject),
    /// Sequence of items
    Array(Box<Shape>),
    /// String-keyed map of values
    Map(Box<Shape>),
    /// Structure with named fields
    Object(ObjectShape),
    /// Value that may be null
    Nullable(Box<Shape>),
}

impl Shape {
    /// Leaf shape using the `schemars` schema of `T`
    pub fn scalar<T: JsonSchema>() -> Self {
        let mut gen = SchemaGenerator::default();
        Shape::Scalar(T::json_schema(&mut gen).into_object())
    }

    /// String leaf restricted to the given values
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shape::Scalar(SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            enum_values: Some(values.into_iter().map(|v| Value::String(v.into())).collect()),
            ..Default::default()
        })
    }

    pub fn array_of<T: Reflect>() -> Self {
        Shape::Array(Box::new(T::shape()))
    }
}

impl From<ObjectShape> for Shape {
    fn from(shape: ObjectShape) -> Self {
        Shape::Object(shape)
    }
}

/// Named fields of a structure, in declaration order
#[derive(Debug, Clone)]
pub struct ObjectShape {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

impl ObjectShape {
    pub fn new<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            title: None,
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// A structure field: serialized name, lazily resolved shape and annotations
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub(crate) shape: fn() -> Shape,
    pub tags: Tags,
}

impl Field {
    pub fn new<T: Reflect>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: T::shape,
            tags: Tags::default(),
        }
    }

    /// Field with an explicit shape constructor, for wrapper or enum-like types
    pub fn with_shape(name: impl Into<String>, shape: fn() -> Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            tags: Tags::default(),
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

/// Ordered key/value metadata attached to a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, replacing an earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// Identity of a sample's underlying type, with pointer-like wrappers stripped
#[derive(Debug, Clone, Copy)]
pub struct SampleType {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) shape: fn() -> Shape,
}

impl SampleType {
    pub fn of<T: Reflect>() -> Self {
        T::sample_type()
    }

    /// Identity of `T` itself, without indirection
    pub fn direct<T: Reflect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            shape: T::shape,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `app::model::User`
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl PartialEq for SampleType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SampleType {}

/// Types that can describe their structure to the schema reflector
pub trait Reflect: 'static {
    fn shape() -> Shape;

    /// Identity used for registry lookups; wrappers delegate to the wrapped type
    fn sample_type() -> SampleType
    where
        Self: Sized,
    {
        SampleType::direct::<Self>()
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::scalar::<$ty>()
                }
            }
        )*
    };
}

impl_scalar!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    Value
);

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        match T::shape() {
            Shape::Nullable(inner) => Shape::Nullable(inner),
            shape => Shape::Nullable(Box::new(shape)),
        }
    }

    fn sample_type() -> SampleType {
        T::sample_type()
    }
}

macro_rules! impl_indirect {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $wrapper<T> {
                fn shape() -> Shape {
                    T::shape()
                }

                fn sample_type() -> SampleType {
                    T::sample_type()
                }
            }
        )*
    };
}

impl_indirect!(Box, Arc, Rc);

impl<T: Reflect> Reflect for &'static T {
    fn shape() -> Shape {
        T::shape()
    }

    fn sample_type() -> SampleType {
        T::sample_type()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::array_of::<T>()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::array_of::<T>()
    }
}

impl<T: Reflect> Reflect for HashSet<T> {
    fn shape() -> Shape {
        Shape::array_of::<T>()
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::array_of::<T>()
    }
}

impl<V: Reflect> Reflect for HashMap<String, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(V::shape()))
    }
}

impl<V: Reflect> Reflect for BTreeMap<String, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(V::shape()))
    }
}
