//! Form rendering hints read from field metadata
//!
//! Keys follow the attribute names of [`FormItem`]:
//!
//! | tag | attribute | value |
//! |-----|-----------|-------|
//! | `formType` | `type` | text |
//! | `formTitle` | `title` | text |
//! | `readOnly`, `noTitle` | `readonly`, `notitle` | `true`/`false` |
//! | `htmlMetaData`, `titleMap` | maps | JSON object of strings |
//! | `prepend`, `append`, `htmlClass`, `fieldHtmlClass`, `placeholder`, `inlineTitle`, `activeClass`, `helpValue` | same | text |

use std::collections::BTreeMap;

use crate::domain::{FormError, FormItem, FormResult, Tags};

/// Copy the form hints found in `tags` onto `item`.
///
/// Absent keys leave attributes untouched; unknown keys are ignored.
pub fn populate_form_item(item: &mut FormItem, field: &str, tags: &Tags) -> FormResult<()> {
    for (key, value) in tags.iter() {
        match key {
            "formType" => item.form_type = Some(value.to_string()),
            "formTitle" => item.form_title = Some(value.to_string()),
            "readOnly" => item.read_only = parse_bool(field, key, value)?,
            "noTitle" => item.no_title = parse_bool(field, key, value)?,
            "prepend" => item.prepend = Some(value.to_string()),
            "append" => item.append = Some(value.to_string()),
            "htmlClass" => item.html_class = Some(value.to_string()),
            "htmlMetaData" => item.html_meta_data = parse_map(field, key, value)?,
            "fieldHtmlClass" => item.field_html_class = Some(value.to_string()),
            "placeholder" => item.placeholder = Some(value.to_string()),
            "inlineTitle" => item.inline_title = Some(value.to_string()),
            "titleMap" => item.title_map = parse_map(field, key, value)?,
            "activeClass" => item.active_class = Some(value.to_string()),
            "helpValue" => item.help_value = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(())
}

pub(crate) fn parse_bool(field: &str, key: &str, value: &str) -> FormResult<bool> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|e| FormError::metadata(field, key, e))
}

fn parse_map(field: &str, key: &str, value: &str) -> FormResult<BTreeMap<String, String>> {
    serde_json::from_str(value).map_err(|e| FormError::metadata(field, key, e))
}
