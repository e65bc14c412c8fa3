//! Schema-to-form reflection engine
//!
//! - [`reflector`]: JSON Schema from a sample type, with per-property interception
//! - [`builder`]: form descriptor tree from the intercepted properties
//! - [`tags`]: form rendering hints from field metadata
//! - [`required`]: draft-3 required markers

pub mod builder;
pub mod reflector;
pub mod required;
pub mod tags;

pub use builder::{FormBuilder, SubmitPolicy, DEFAULT_SUBMIT_TITLE};
pub use reflector::{PropertyEvent, Reflector};

use crate::domain::{FormResult, FormSchema, SampleType};

/// Options applied to every built form descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub submit: SubmitPolicy,
    pub submit_title: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            submit: SubmitPolicy::Append,
            submit_title: DEFAULT_SUBMIT_TITLE.to_string(),
        }
    }
}

/// Reflect `sample` into a schema and its form descriptor.
///
/// Errors are returned unwrapped; callers add registration context.
pub fn build_form_schema(
    reflector: &Reflector,
    sample: SampleType,
    options: &BuildOptions,
) -> FormResult<FormSchema> {
    let mut builder = FormBuilder::new(options.submit, &options.submit_title);

    let mut schema = reflector.reflect(sample, |event| builder.intercept(event))?;
    required::inline_required(&mut schema);

    Ok(FormSchema {
        form: builder.finish(),
        schema,
    })
}
