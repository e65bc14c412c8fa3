pub mod error;
pub mod form;
pub mod path;
pub mod shape;

pub use error::{FormError, FormResult};
pub use form::{FormItem, FormSchema};
pub use path::{PathSegment, PropertyPath};
pub use shape::{Field, ObjectShape, Reflect, SampleType, Shape, Tags};
