//! Registry of form schemas by name and by sample type

use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{FormError, FormResult, FormSchema, Reflect, SampleType};
use crate::engine::{build_form_schema, BuildOptions, Reflector, SubmitPolicy};

/// Default prefix under which the web layer serves schemas and assets
pub const DEFAULT_BASE_URL: &str = "/json-form/";

#[derive(Debug, Default)]
struct Registry {
    schemas_by_name: HashMap<String, Arc<FormSchema>>,
    names_by_type: HashMap<TypeId, String>,
    types_by_name: HashMap<String, TypeId>,
}

impl Registry {
    /// Default name of a type that has no registered name yet.
    ///
    /// Fails when another type already owns that name.
    fn default_name_for(&self, sample: SampleType) -> FormResult<String> {
        let name = default_name(sample.name());
        match self.types_by_name.get(&name) {
            Some(owner) if *owner != sample.id() => Err(FormError::DuplicateName { name }),
            _ => Ok(name),
        }
    }
}

/// Form schema repository.
///
/// Registration is add-only: names are unique and never overwritten. A single
/// lock guards both maps and is held for the whole build-and-store sequence,
/// so concurrent registrations of one name resolve to exactly one winner.
#[derive(Debug)]
pub struct Repository {
    strict: bool,
    options: BuildOptions,
    base_url: String,
    reflector: Reflector,
    registry: Mutex<Registry>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    pub fn new() -> Self {
        Self {
            strict: false,
            options: BuildOptions::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            reflector: Reflector::new(),
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_strict(settings.strict)
            .with_submit(settings.submit, &settings.submit_title)
            .with_base_url(&settings.base_url)
    }

    /// Require every schema to be added before it is rendered
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_submit(mut self, policy: SubmitPolicy, title: &str) -> Self {
        self.options = BuildOptions {
            submit: policy,
            submit_title: title.to_string(),
        };
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the schema for a sample value.
    ///
    /// Returns the registered name of the sample's type, or its default name.
    /// Outside strict mode an unregistered type is registered under the
    /// default name first. A default name already taken by another type is a
    /// `DuplicateName` error.
    pub fn name<T: Reflect>(&self, _sample: &T) -> FormResult<String> {
        self.name_of(SampleType::of::<T>())
    }

    pub fn name_of(&self, sample: SampleType) -> FormResult<String> {
        let mut registry = self.registry.lock();

        if let Some(name) = registry.names_by_type.get(&sample.id()) {
            return Ok(name.clone());
        }

        let name = registry.default_name_for(sample)?;
        if !self.strict {
            tracing::debug!(name = %name, type_name = sample.name(), "Auto-registering form schema");
            self.register(&mut registry, sample, &name)?;
        }

        Ok(name)
    }

    /// Register the schema of `sample` under `name`
    pub fn add<T: Reflect>(&self, _sample: &T, name: impl Into<String>) -> FormResult<()> {
        self.add_type(SampleType::of::<T>(), name)
    }

    /// Register the schema of `sample` under its default name, returning the name
    pub fn add_default<T: Reflect>(&self, _sample: &T) -> FormResult<String> {
        let sample = SampleType::of::<T>();
        let name = default_name(sample.name());
        self.add_type(sample, name.clone())?;
        Ok(name)
    }

    pub fn add_type(&self, sample: SampleType, name: impl Into<String>) -> FormResult<()> {
        let name = name.into();
        let mut registry = self.registry.lock();
        self.register(&mut registry, sample, &name)?;
        Ok(())
    }

    fn register(
        &self,
        registry: &mut Registry,
        sample: SampleType,
        name: &str,
    ) -> FormResult<Arc<FormSchema>> {
        if registry.schemas_by_name.contains_key(name) {
            return Err(FormError::DuplicateName {
                name: name.to_string(),
            });
        }

        let form_schema = build_form_schema(&self.reflector, sample, &self.options).map_err(
            |source| FormError::SchemaBuild {
                name: name.to_string(),
                source: Box::new(source),
            },
        )?;
        let form_schema = Arc::new(form_schema);

        registry
            .schemas_by_name
            .insert(name.to_string(), form_schema.clone());
        registry
            .names_by_type
            .entry(sample.id())
            .or_insert_with(|| name.to_string());
        registry.types_by_name.insert(name.to_string(), sample.id());

        tracing::debug!(
            name,
            type_name = sample.name(),
            items = form_schema.form.len(),
            "Registered form schema"
        );

        Ok(form_schema)
    }

    /// Previously added schema of a sample value
    pub fn schema<T: Reflect>(&self, _sample: &T) -> Option<Arc<FormSchema>> {
        self.schema_of(SampleType::of::<T>())
    }

    pub fn schema_of(&self, sample: SampleType) -> Option<Arc<FormSchema>> {
        let registry = self.registry.lock();
        let name = registry.names_by_type.get(&sample.id())?;

        registry.schemas_by_name.get(name).cloned()
    }

    /// Previously added schema by name
    pub fn schema_by_name(&self, name: &str) -> Option<Arc<FormSchema>> {
        self.registry.lock().schemas_by_name.get(name).cloned()
    }

    /// Previously added schema by name, for schema-serving endpoints
    pub fn get_schema_by_name(&self, name: &str) -> FormResult<Arc<FormSchema>> {
        self.schema_by_name(name).ok_or_else(|| FormError::NotFound {
            name: name.to_string(),
        })
    }

    /// Schema of a sample value, auto-registering it outside strict mode
    pub fn resolve<T: Reflect>(&self, _sample: &T) -> FormResult<Arc<FormSchema>> {
        self.resolve_type(SampleType::of::<T>())
    }

    pub fn resolve_type(&self, sample: SampleType) -> FormResult<Arc<FormSchema>> {
        let mut registry = self.registry.lock();

        if let Some(schema) = registry
            .names_by_type
            .get(&sample.id())
            .and_then(|name| registry.schemas_by_name.get(name))
        {
            return Ok(schema.clone());
        }

        if self.strict {
            return Err(FormError::NotFound {
                name: default_name(sample.name()),
            });
        }
        let name = registry.default_name_for(sample)?;

        tracing::debug!(name = %name, type_name = sample.name(), "Auto-registering form schema");
        self.register(&mut registry, sample, &name)
    }

    /// Names of added schemas
    pub fn names(&self) -> HashSet<String> {
        self.registry.lock().schemas_by_name.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.registry.lock().schemas_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default schema name of a type: module paths stripped, lower-cased.
///
/// `app::model::User` becomes `user`, `app::Page<app::User>` becomes `page<user>`.
pub fn default_name(type_name: &str) -> String {
    let mut name = String::with_capacity(type_name.len());
    let mut token = String::new();

    let flush = |token: &mut String, name: &mut String| {
        if let Some(last) = token.rsplit("::").next() {
            name.push_str(last);
        }
        token.clear();
    };

    for c in type_name.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            flush(&mut token, &mut name);
            name.push(c);
        }
    }
    flush(&mut token, &mut name);

    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, ObjectShape, Shape};

    struct Thing;

    impl Reflect for Thing {
        fn shape() -> Shape {
            ObjectShape::new::<Self>()
                .field(Field::new::<String>("name").tag("required", "true"))
                .into()
        }
    }

    struct Other;

    impl Reflect for Other {
        fn shape() -> Shape {
            ObjectShape::new::<Self>().field(Field::new::<i32>("count")).into()
        }
    }

    struct Broken;

    impl Reflect for Broken {
        fn shape() -> Shape {
            ObjectShape::new::<Self>()
                .field(Field::new::<bool>("flag").tag("required", "maybe"))
                .into()
        }
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name("app::model::User"), "user");
        assert_eq!(default_name("User"), "user");
        assert_eq!(default_name("app::Page<app::model::User>"), "page<user>");
        assert_eq!(default_name("(i32, app::Pair)"), "(i32, pair)");
    }

    #[test]
    fn test_name_is_idempotent() {
        let repo = Repository::new();

        let first = repo.name(&Thing).unwrap();
        let second = repo.name(&Thing).unwrap();

        assert_eq!(first, "thing");
        assert_eq!(first, second);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_strict_name_does_not_register() {
        let repo = Repository::new().with_strict(true);

        assert_eq!(repo.name(&Thing).unwrap(), "thing");
        assert!(repo.is_empty());
        assert!(repo.resolve(&Thing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_registered_name_wins_over_default() {
        let repo = Repository::new();
        repo.add(&Thing, "custom").unwrap();

        assert_eq!(repo.name(&Box::new(Thing)).unwrap(), "custom");
        assert!(repo.schema(&Thing).is_some());
        assert!(repo.schema_by_name("thing").is_none());
    }

    #[test]
    fn test_default_name_owned_by_another_type() {
        let repo = Repository::new();
        repo.add(&Other, "thing").unwrap();

        assert!(repo.name(&Thing).unwrap_err().is_duplicate());
        assert!(repo.resolve(&Thing).unwrap_err().is_duplicate());
        assert!(repo.schema(&Thing).is_none());
        assert!(repo.schema(&Other).is_some());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_strict_default_name_owned_by_another_type() {
        let repo = Repository::new().with_strict(true);
        repo.add(&Other, "thing").unwrap();

        assert!(repo.name(&Thing).unwrap_err().is_duplicate());
        assert!(repo.resolve(&Thing).unwrap_err().is_not_found());
        assert!(repo.schema(&Thing).is_none());
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let repo = Repository::new();
        repo.add(&Thing, "x").unwrap();
        let before = repo.schema_by_name("x").unwrap();

        let err = repo.add(&Other, "x").unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.schema_by_name("x").unwrap(), before);
        assert!(repo.schema(&Other).is_none());
    }

    #[test]
    fn test_failed_build_stores_nothing() {
        let repo = Repository::new();
        let err = repo.add(&Broken, "broken").unwrap_err();

        match err {
            FormError::SchemaBuild { name, source } => {
                assert_eq!(name, "broken");
                assert!(matches!(*source, FormError::MetadataParse { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(repo.names().is_empty());
    }

    #[test]
    fn test_get_schema_by_name_not_found() {
        let repo = Repository::new();
        let err = repo.get_schema_by_name("missing").unwrap_err();
        assert!(matches!(err, FormError::NotFound { name } if name == "missing"));
    }

    #[test]
    fn test_concurrent_adds_have_one_winner() {
        let repo = Repository::new();

        let results: Vec<FormResult<()>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| repo.add(&Thing, "shared"))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(FormError::is_duplicate));
    }
}
