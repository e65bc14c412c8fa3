//! JSON Schema reflection over the [`Shape`] type model
//!
//! The reflector walks a sample type depth-first, builds its schema and hands
//! every property to an interception callback once the property schema (and
//! everything below it) is complete. Children are therefore reported before
//! the array that contains them.

use schemars::schema::{
    ArrayValidation, InstanceType, ObjectValidation, Schema, SchemaObject, SingleOrVec,
};
use serde_json::Value;
use std::any::TypeId;

use crate::domain::path::ITEMS_MARKER;
use crate::domain::{FormError, FormResult, ObjectShape, PropertyPath, SampleType, Shape, Tags};
use crate::engine::tags::parse_bool;

/// Property reported to the interception callback
#[derive(Debug)]
pub struct PropertyEvent<'a> {
    /// Path of the enclosing value, starting at the root
    pub path: &'a PropertyPath,
    /// Leaf name of the property (`[]` for the elements of a nested array)
    pub name: &'a str,
    pub tags: &'a Tags,
    /// Objects are groupings, not form keys
    pub is_object: bool,
}

impl PropertyEvent<'_> {
    pub fn key(&self) -> String {
        self.path.key(self.name)
    }
}

/// Builds JSON Schemas from sample types
#[derive(Debug, Default, Clone, Copy)]
pub struct Reflector;

impl Reflector {
    pub fn new() -> Self {
        Self
    }

    /// Reflect the schema of `sample`, calling `intercept` for every property.
    ///
    /// The first error returned by `intercept` aborts the traversal.
    pub fn reflect<F>(&self, sample: SampleType, mut intercept: F) -> FormResult<SchemaObject>
    where
        F: FnMut(&PropertyEvent<'_>) -> FormResult<()>,
    {
        let mut walk = Walk {
            intercept: &mut intercept,
            objects: Vec::new(),
            leaves: 0,
            muted: 0,
        };

        walk.schema(sample.shape(), &PropertyPath::root())
    }
}

struct Walk<'f, F> {
    intercept: &'f mut F,
    /// Objects currently being expanded, to detect recursion
    objects: Vec<TypeId>,
    /// Non-object properties reported so far
    leaves: usize,
    /// Map values are not addressable by form keys
    muted: usize,
}

impl<F> Walk<'_, F>
where
    F: FnMut(&PropertyEvent<'_>) -> FormResult<()>,
{
    fn schema(&mut self, shape: Shape, path: &PropertyPath) -> FormResult<SchemaObject> {
        match shape {
            Shape::Scalar(schema) => Ok(schema),
            Shape::Nullable(inner) => {
                let mut schema = self.schema(*inner, path)?;
                add_null(&mut schema);
                Ok(schema)
            }
            Shape::Array(items) => self.array(*items, path),
            Shape::Map(values) => {
                self.muted += 1;
                let values = self.schema(*values, &path.push_items());
                self.muted -= 1;

                Ok(SchemaObject {
                    instance_type: Some(InstanceType::Object.into()),
                    object: Some(Box::new(ObjectValidation {
                        additional_properties: Some(Box::new(Schema::Object(values?))),
                        ..Default::default()
                    })),
                    ..Default::default()
                })
            }
            Shape::Object(object) => self.object(object, path),
        }
    }

    fn array(&mut self, items: Shape, path: &PropertyPath) -> FormResult<SchemaObject> {
        let nested_array = matches!(strip_nullable(&items), Shape::Array(_));
        let leaves_before = self.leaves;

        let items = self.schema(items, &path.push_items())?;

        // Elements of a nested array have no property of their own; report
        // them so their section can be attached to the outer array.
        if nested_array && self.leaves > leaves_before {
            self.report(path, ITEMS_MARKER, &Tags::default(), &items)?;
        }

        Ok(SchemaObject {
            instance_type: Some(InstanceType::Array.into()),
            array: Some(Box::new(ArrayValidation {
                items: Some(SingleOrVec::Single(Box::new(Schema::Object(items)))),
                ..Default::default()
            })),
            ..Default::default()
        })
    }

    fn object(&mut self, object: ObjectShape, path: &PropertyPath) -> FormResult<SchemaObject> {
        if self.objects.contains(&object.type_id) {
            return Err(FormError::RecursiveType {
                type_name: object.type_name.to_string(),
            });
        }
        self.objects.push(object.type_id);

        let mut validation = ObjectValidation::default();

        for field in &object.fields {
            if field.name.contains(ITEMS_MARKER) {
                return Err(FormError::InvalidFieldName {
                    field: field.name.clone(),
                });
            }

            let mut property = self.schema(field.shape(), &path.push_property(&field.name))?;
            if apply_schema_tags(&mut property, &field.name, &field.tags)? {
                validation.required.insert(field.name.clone());
            }

            self.report(path, &field.name, &field.tags, &property)?;
            validation
                .properties
                .insert(field.name.clone(), Schema::Object(property));
        }

        self.objects.pop();

        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::Object.into()),
            object: Some(Box::new(validation)),
            ..Default::default()
        };
        if object.title.is_some() || object.description.is_some() {
            let metadata = schema.metadata();
            metadata.title = object.title;
            metadata.description = object.description;
        }

        Ok(schema)
    }

    fn report(
        &mut self,
        path: &PropertyPath,
        name: &str,
        tags: &Tags,
        schema: &SchemaObject,
    ) -> FormResult<()> {
        if self.muted > 0 {
            return Ok(());
        }

        let event = PropertyEvent {
            path,
            name,
            tags,
            is_object: has_type(schema, InstanceType::Object),
        };
        if !event.is_object {
            self.leaves += 1;
        }

        tracing::trace!(path = %path, name, is_object = event.is_object, "Intercepted property");
        (self.intercept)(&event)
    }
}

fn strip_nullable(shape: &Shape) -> &Shape {
    match shape {
        Shape::Nullable(inner) => strip_nullable(inner),
        other => other,
    }
}

fn add_null(schema: &mut SchemaObject) {
    schema.instance_type = match schema.instance_type.take() {
        Some(SingleOrVec::Single(ty)) if *ty != InstanceType::Null => {
            Some(SingleOrVec::Vec(vec![*ty, InstanceType::Null]))
        }
        Some(SingleOrVec::Vec(mut types)) => {
            if !types.contains(&InstanceType::Null) {
                types.push(InstanceType::Null);
            }
            Some(SingleOrVec::Vec(types))
        }
        other => other,
    };
}

/// Apply the schema keywords found in `tags` to a property schema.
///
/// Returns whether the property is tagged as required.
fn apply_schema_tags(schema: &mut SchemaObject, field: &str, tags: &Tags) -> FormResult<bool> {
    let mut required = false;

    for (key, value) in tags.iter() {
        match key {
            "title" => schema.metadata().title = Some(value.to_string()),
            "description" => schema.metadata().description = Some(value.to_string()),
            "required" => required = parse_bool(field, key, value)?,
            "readOnly" => schema.metadata().read_only = parse_bool(field, key, value)?,
            "deprecated" => schema.metadata().deprecated = parse_bool(field, key, value)?,
            "default" => {
                let default = literal(schema, value);
                schema.metadata().default = Some(default);
            }
            "example" => {
                let example = literal(schema, value);
                schema.metadata().examples.push(example);
            }
            "format" => schema.format = Some(value.to_string()),
            "minLength" => schema.string().min_length = Some(parse_u32(field, key, value)?),
            "maxLength" => schema.string().max_length = Some(parse_u32(field, key, value)?),
            "pattern" => schema.string().pattern = Some(value.to_string()),
            "minimum" => schema.number().minimum = Some(parse_f64(field, key, value)?),
            "maximum" => schema.number().maximum = Some(parse_f64(field, key, value)?),
            "exclusiveMinimum" => {
                schema.number().exclusive_minimum = Some(parse_f64(field, key, value)?)
            }
            "exclusiveMaximum" => {
                schema.number().exclusive_maximum = Some(parse_f64(field, key, value)?)
            }
            "multipleOf" => schema.number().multiple_of = Some(parse_f64(field, key, value)?),
            "minItems" => schema.array().min_items = Some(parse_u32(field, key, value)?),
            "maxItems" => schema.array().max_items = Some(parse_u32(field, key, value)?),
            "uniqueItems" => schema.array().unique_items = Some(parse_bool(field, key, value)?),
            "enum" => schema.enum_values = Some(enum_values(schema, field, key, value)?),
            _ => {}
        }
    }

    Ok(required)
}

/// Whether the schema declares `ty`; untyped schemas declare nothing
fn has_type(schema: &SchemaObject, ty: InstanceType) -> bool {
    match &schema.instance_type {
        Some(SingleOrVec::Single(single)) => **single == ty,
        Some(SingleOrVec::Vec(types)) => types.contains(&ty),
        None => false,
    }
}

fn is_numeric(schema: &SchemaObject) -> bool {
    has_type(schema, InstanceType::Integer) || has_type(schema, InstanceType::Number)
}

/// Tag value as a JSON literal; strings stay verbatim
fn literal(schema: &SchemaObject, value: &str) -> Value {
    if has_type(schema, InstanceType::String) {
        return Value::String(value.to_string());
    }
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn enum_values(schema: &SchemaObject, field: &str, key: &str, value: &str) -> FormResult<Vec<Value>> {
    let numeric = is_numeric(schema);

    value
        .split(',')
        .map(str::trim)
        .map(|item| {
            if numeric {
                serde_json::from_str::<serde_json::Number>(item)
                    .map(Value::Number)
                    .map_err(|e| FormError::metadata(field, key, e))
            } else {
                Ok(Value::String(item.to_string()))
            }
        })
        .collect()
}

fn parse_u32(field: &str, key: &str, value: &str) -> FormResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|e| FormError::metadata(field, key, e))
}

fn parse_f64(field: &str, key: &str, value: &str) -> FormResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|e| FormError::metadata(field, key, e))
}
