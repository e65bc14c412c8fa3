//! # jsonform - JSON Schema forms from Rust types
//!
//! Derives a JSON Schema and a matching form layout (the `form` descriptor
//! consumed by the jsonform browser library) from a sample type, keeps them
//! in a named repository and renders HTML pages hosting one or more forms.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonform::{Field, ObjectShape, Reflect, Repository, Shape};
//!
//! struct User;
//!
//! impl Reflect for User {
//!     fn shape() -> Shape {
//!         ObjectShape::new::<Self>()
//!             .field(Field::new::<String>("firstName").tag("required", "true"))
//!             .field(Field::new::<i64>("age").tag("minimum", "1"))
//!             .into()
//!     }
//! }
//!
//! # fn main() -> jsonform::FormResult<()> {
//! let repo = Repository::new();
//! repo.add(&User, "user")?;
//!
//! let schema = repo.get_schema_by_name("user")?;
//! assert_eq!(schema.form.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: type model, form items and errors
//! - **Engine**: schema reflection and form descriptor building
//! - **Repository**: named registry of built schemas
//! - **Render**: page data assembly and HTML templates
//! - **Config**: settings loading and validation

pub mod cli;
pub mod config;
pub mod demo;
pub mod domain;
pub mod engine;
pub mod render;
pub mod repository;

pub use config::Settings;
pub use domain::{
    Field, FormError, FormItem, FormResult, FormSchema, ObjectShape, Reflect, SampleType, Shape,
    Tags,
};
pub use engine::{Reflector, SubmitPolicy};
pub use render::{Form, Page, PageRenderData, Renderer, TemplateEngine, TeraTemplates};
pub use repository::Repository;
