//! Draft-3 style required markers
//!
//! jsonform reads required-ness from a boolean `required` on each property
//! schema, the convention of JSON Schema draft 3. The reflected schema carries
//! draft-4 `required` name lists, so the top-level list is moved onto its
//! properties and then cleared. The transform is lossy and one-way.

use schemars::schema::{Schema, SchemaObject};
use serde_json::Value;

/// Extension key of the per-property marker
pub const REQUIRED: &str = "required";

/// Move the `required` list of `schema` onto its properties and clear it.
///
/// A required property that is an object with a `required` list of its own is
/// converted first, so the marker never shares the key with a list.
pub fn inline_required(schema: &mut SchemaObject) {
    let Some(object) = schema.object.as_mut() else {
        return;
    };

    let names = std::mem::take(&mut object.required);
    for name in names {
        if let Some(Schema::Object(property)) = object.properties.get_mut(&name) {
            inline_required(property);
            property
                .extensions
                .insert(REQUIRED.to_string(), Value::Bool(true));
        }
    }
}

/// Whether a property schema carries the draft-3 marker
pub fn is_marked_required(schema: &SchemaObject) -> bool {
    schema.extensions.get(REQUIRED) == Some(&Value::Bool(true))
}
