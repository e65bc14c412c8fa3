//! Form descriptor assembly
//!
//! Leaves arrive as a flat stream keyed by path strings. Keys containing `[]`
//! belong to an array element and are collected into a pending `section`
//! under the key of their array. When the array itself arrives it becomes an
//! `array` item wrapping that section. Nothing but the key strings is needed,
//! so arbitrarily deep arrays of arrays of objects nest correctly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::form::ARRAY;
use crate::domain::path::items_parent;
use crate::domain::{FormItem, FormResult};
use crate::engine::reflector::PropertyEvent;
use crate::engine::tags::populate_form_item;

/// Default title of the trailing submit directive
pub const DEFAULT_SUBMIT_TITLE: &str = "Submit";

/// Placement of the submit button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPolicy {
    /// Append a submit directive to every form descriptor
    #[default]
    Append,
    /// Leave the button to the render layer
    Delegate,
}

/// Builds the ordered form tree from intercepted properties
#[derive(Debug)]
pub struct FormBuilder {
    form: Vec<FormItem>,
    sections: HashMap<String, FormItem>,
    submit: Option<String>,
}

impl FormBuilder {
    pub fn new(policy: SubmitPolicy, submit_title: &str) -> Self {
        let submit = match policy {
            SubmitPolicy::Append => Some(submit_title.to_string()),
            SubmitPolicy::Delegate => None,
        };

        Self {
            form: Vec::new(),
            sections: HashMap::new(),
            submit,
        }
    }

    /// Interception callback: turn a non-object property into a form item
    pub fn intercept(&mut self, event: &PropertyEvent<'_>) -> FormResult<()> {
        if event.is_object {
            return Ok(());
        }

        let mut item = FormItem::new(event.key());
        populate_form_item(&mut item, event.name, event.tags)?;
        self.push(item);

        Ok(())
    }

    /// Place a leaf item in the tree
    pub fn push(&mut self, mut item: FormItem) {
        // The array arrives after its children.
        if let Some(section) = self.sections.remove(&item.key) {
            item.form_type = Some(ARRAY.to_string());
            item.items = vec![section];
        }

        match items_parent(&item.key).map(str::to_string) {
            Some(parent) => self
                .sections
                .entry(parent)
                .or_insert_with(FormItem::section)
                .items
                .push(item),
            None => self.form.push(item),
        }
    }

    /// Finish the tree, appending the submit directive when configured
    pub fn finish(mut self) -> Vec<FormItem> {
        if !self.sections.is_empty() {
            tracing::trace!(
                orphans = ?self.sections.keys().collect::<Vec<_>>(),
                "Dropping sections without an array property"
            );
        }

        if let Some(title) = self.submit.take() {
            self.form.push(FormItem::submit(title));
        }

        self.form
    }
}
