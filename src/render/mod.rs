//! Page rendering of one or more forms
//!
//! [`Repository::renderable_data`] resolves the schema of every form and
//! flattens forms and page options into [`PageRenderData`]. Markup is left to
//! a [`TemplateEngine`]; [`Renderer`] ties both together.

pub mod templates;

pub use templates::{TemplateEngine, TeraTemplates, FORM_TEMPLATE};

use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

use crate::domain::{FormResult, FormSchema, Reflect, SampleType};
use crate::repository::Repository;

/// Submission parameters and schema source of one form on a page
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// DOM id of the form container, generated from the position when absent
    pub name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub submit_url: String,
    /// HTTP verb used on submit, `POST` when empty
    pub submit_method: String,
    /// Status the submit endpoint answers on success
    pub success_status: Option<u16>,
    /// URL the browser loads the initial value from
    pub value_url: Option<String>,

    /// Pre-resolved schema, takes precedence over name and sample
    pub schema: Option<Arc<FormSchema>>,
    /// Name of an added schema
    pub schema_name: Option<String>,
    /// Type whose schema is resolved (and added outside strict mode)
    pub sample: Option<SampleType>,
    /// Initial value of an edit form
    pub value: Option<Value>,

    /// Client-side callbacks, JavaScript sources passed through verbatim
    pub on_success: Option<String>,
    pub on_fail: Option<String>,
    pub on_error: Option<String>,
    pub on_before_submit: Option<String>,
    pub on_request_finished: Option<String>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn submit(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.submit_method = method.into();
        self.submit_url = url.into();
        self
    }

    pub fn success_status(mut self, status: u16) -> Self {
        self.success_status = Some(status);
        self
    }

    /// Form for values of type `T`, starting empty
    pub fn sample<T: Reflect>(mut self) -> Self {
        self.sample = Some(SampleType::of::<T>());
        self
    }

    /// Form for `value`, prefilled with it
    pub fn value<T: Reflect + Serialize>(mut self, value: &T) -> FormResult<Self> {
        self.sample = Some(SampleType::of::<T>());
        self.value = Some(serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    pub fn on_success(mut self, source: impl Into<String>) -> Self {
        self.on_success = Some(source.into());
        self
    }

    pub fn on_fail(mut self, source: impl Into<String>) -> Self {
        self.on_fail = Some(source.into());
        self
    }

    pub fn on_error(mut self, source: impl Into<String>) -> Self {
        self.on_error = Some(source.into());
        self
    }

    pub fn on_before_submit(mut self, source: impl Into<String>) -> Self {
        self.on_before_submit = Some(source.into());
        self
    }

    pub fn on_request_finished(mut self, source: impl Into<String>) -> Self {
        self.on_request_finished = Some(source.into());
        self
    }

    fn callbacks(&self) -> Vec<Callback> {
        [
            ("onSuccess", &self.on_success),
            ("onFail", &self.on_fail),
            ("onError", &self.on_error),
            ("onBeforeSubmit", &self.on_before_submit),
            ("onRequestFinished", &self.on_request_finished),
        ]
        .into_iter()
        .filter_map(|(name, source)| {
            source.as_ref().map(|source| Callback {
                name,
                source: source.clone(),
            })
        })
        .collect()
    }
}

/// Page-level options
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: String,
    /// Raw HTML appended to `<head>`
    pub append_html_head: String,
    /// Raw HTML before the first form
    pub prepend_html: String,
    /// Raw HTML after the last form
    pub append_html: String,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Form parameters as read by the browser-side form controller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormParams {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submit_url: String,
    pub submit_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Arc<FormSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Client callback attached to the form parameters by the template
#[derive(Debug, Clone, Serialize)]
pub struct Callback {
    pub name: &'static str,
    pub source: String,
}

/// One form, ready for template injection
#[derive(Debug, Clone, Serialize)]
pub struct FormData {
    pub id: String,
    pub params: FormParams,
    /// `params` as JSON that is safe inside a `<script>` element
    pub params_json: String,
    pub callbacks: Vec<Callback>,
}

/// Template data of a page
#[derive(Debug, Clone, Serialize)]
pub struct PageRenderData {
    pub title: String,
    pub base_url: String,
    pub append_html_head: String,
    pub prepend_html: String,
    pub append_html: String,
    pub forms: Vec<FormData>,
}

impl Repository {
    /// Resolve the schema of every form and assemble page template data.
    ///
    /// Schema source precedence: pre-resolved schema, schema name, sample type.
    /// Sample types are added on demand unless the repository is strict.
    pub fn renderable_data(&self, forms: &[Form], page: &Page) -> FormResult<PageRenderData> {
        let mut data = Vec::with_capacity(forms.len());

        for (idx, form) in forms.iter().enumerate() {
            let (schema, schema_name) = match (&form.schema, &form.schema_name, form.sample) {
                (Some(schema), name, _) => (Some(schema.clone()), name.clone()),
                (None, Some(name), _) => (Some(self.get_schema_by_name(name)?), Some(name.clone())),
                (None, None, Some(sample)) => {
                    let schema = self.resolve_type(sample)?;
                    (Some(schema), Some(self.name_of(sample)?))
                }
                (None, None, None) => (None, None),
            };

            let submit_method = if form.submit_method.is_empty() {
                "POST".to_string()
            } else {
                form.submit_method.clone()
            };

            let params = FormParams {
                title: form.title.clone(),
                description: form.description.clone(),
                schema_name,
                value_url: form.value_url.clone(),
                submit_url: form.submit_url.clone(),
                submit_method,
                success_status: form.success_status,
                schema,
                value: form.value.clone(),
            };

            data.push(FormData {
                id: form.name.clone().unwrap_or_else(|| format!("form-{}", idx)),
                params_json: script_safe_json(&params)?,
                params,
                callbacks: form.callbacks(),
            });
        }

        Ok(PageRenderData {
            title: page.title.clone(),
            base_url: self.base_url().to_string(),
            append_html_head: page.append_html_head.clone(),
            prepend_html: page.prepend_html.clone(),
            append_html: page.append_html.clone(),
            forms: data,
        })
    }
}

/// Serialize to JSON that cannot terminate an enclosing `<script>` element
pub fn script_safe_json<T: Serialize>(value: &T) -> FormResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Renders pages of forms from a repository
pub struct Renderer<E = TeraTemplates> {
    repository: Arc<Repository>,
    templates: E,
}

impl Renderer<TeraTemplates> {
    /// Renderer with the embedded page template
    pub fn embedded(repository: Arc<Repository>) -> FormResult<Self> {
        Ok(Self::new(repository, TeraTemplates::embedded()?))
    }
}

impl<E: TemplateEngine> Renderer<E> {
    pub fn new(repository: Arc<Repository>, templates: E) -> Self {
        Self {
            repository,
            templates,
        }
    }

    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    /// Write the page with `forms` to `out`
    pub fn render(&self, out: &mut dyn Write, page: &Page, forms: &[Form]) -> FormResult<()> {
        let data = self.repository.renderable_data(forms, page)?;
        let data = serde_json::to_value(&data)?;

        self.templates.render(FORM_TEMPLATE, &data, out)
    }

    /// Render the page into a string
    pub fn render_to_string(&self, page: &Page, forms: &[Form]) -> FormResult<String> {
        let mut out = Vec::new();
        self.render(&mut out, page, forms)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
