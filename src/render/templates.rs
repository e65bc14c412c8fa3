//! Template engines for page markup

use serde_json::Value;
use std::io::Write;
use tera::{Context, Tera};

use crate::domain::FormResult;

/// Name of the page template
pub const FORM_TEMPLATE: &str = "form.html";

const EMBEDDED_FORM_TEMPLATE: &str = include_str!("../../templates/form.html");

/// Renders a named template with JSON data
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, data: &Value, out: &mut dyn Write) -> FormResult<()>;
}

/// Tera-backed templates, autoescaping `.html` templates
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Templates with only the embedded page template
    pub fn embedded() -> FormResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(FORM_TEMPLATE, EMBEDDED_FORM_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Templates loaded from a glob such as `templates/**/*.html`.
    ///
    /// The embedded page template is registered when the glob does not
    /// provide one.
    pub fn from_glob(glob: &str) -> FormResult<Self> {
        let mut tera = Tera::new(glob)?;
        if !tera.get_template_names().any(|name| name == FORM_TEMPLATE) {
            tera.add_raw_template(FORM_TEMPLATE, EMBEDDED_FORM_TEMPLATE)?;
        }
        tracing::debug!(
            glob,
            templates = tera.get_template_names().count(),
            "Loaded templates"
        );
        Ok(Self { tera })
    }

    pub fn tera(&self) -> &Tera {
        &self.tera
    }
}

impl TemplateEngine for TeraTemplates {
    fn render(&self, template: &str, data: &Value, out: &mut dyn Write) -> FormResult<()> {
        let context = Context::from_value(data.clone())?;
        self.tera.render_to(template, &context, out)?;
        Ok(())
    }
}
