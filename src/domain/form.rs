//! Form descriptor types serialized toward the jsonform browser library

use schemars::schema::SchemaObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Form type of synthetic grouping nodes
pub const SECTION: &str = "section";
/// Form type of array containers
pub const ARRAY: &str = "array";
/// Form type of the submit button directive
pub const SUBMIT: &str = "submit";

/// Rendering directive for a single form key or a group of keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormItem {
    /// Dotted path from the root value, `[]` marks array elements (e.g. `neighbors[].bio`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    /// Widget override: textarea, password, array, section, submit, hidden...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    #[serde(rename = "title", default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    /// Children of `section` and `array` nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FormItem>,

    #[serde(rename = "readonly", default, skip_serializing_if = "is_false")]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
    #[serde(rename = "notitle", default, skip_serializing_if = "is_false")]
    pub no_title: bool,
    #[serde(rename = "htmlClass", default, skip_serializing_if = "Option::is_none")]
    pub html_class: Option<String>,
    #[serde(rename = "htmlMetaData", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub html_meta_data: BTreeMap<String, String>,
    #[serde(rename = "fieldHtmlClass", default, skip_serializing_if = "Option::is_none")]
    pub field_html_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "inlinetitle", default, skip_serializing_if = "Option::is_none")]
    pub inline_title: Option<String>,
    /// Labels for enum values
    #[serde(rename = "titleMap", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title_map: BTreeMap<String, String>,
    /// Button mode for radio buttons
    #[serde(rename = "activeClass", default, skip_serializing_if = "Option::is_none")]
    pub active_class: Option<String>,
    #[serde(rename = "helpvalue", default, skip_serializing_if = "Option::is_none")]
    pub help_value: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FormItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Empty grouping node that collects the children of an array element
    pub fn section() -> Self {
        Self {
            form_type: Some(SECTION.to_string()),
            ..Default::default()
        }
    }

    /// Submit button directive
    pub fn submit(title: impl Into<String>) -> Self {
        Self {
            form_type: Some(SUBMIT.to_string()),
            form_title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, form_type: impl Into<String>) -> Self {
        self.form_type = Some(form_type.into());
        self
    }

    pub fn with_items(mut self, items: Vec<FormItem>) -> Self {
        self.items = items;
        self
    }

    pub fn form_type(&self) -> Option<&str> {
        self.form_type.as_deref()
    }

    /// Depth-first search for an item by key
    pub fn find(&self, key: &str) -> Option<&FormItem> {
        if self.key == key {
            return Some(self);
        }
        self.items.iter().find_map(|item| item.find(key))
    }
}

/// Form descriptor paired with the JSON Schema it renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<FormItem>,
    pub schema: SchemaObject,
}

impl FormSchema {
    /// Search the whole form tree for an item by key
    pub fn find(&self, key: &str) -> Option<&FormItem> {
        self.form.iter().find_map(|item| item.find(key))
    }

    /// Top-level property schema by name
    pub fn property(&self, name: &str) -> Option<&SchemaObject> {
        match self.schema.object.as_ref()?.properties.get(name)? {
            schemars::schema::Schema::Object(obj) => Some(obj),
            schemars::schema::Schema::Bool(_) => None,
        }
    }
}
