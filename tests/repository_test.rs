mod common;

use common::{Collections, Grid, Person, Triple};
use jsonform::demo::{User, UserWithNeighbors};
use jsonform::engine::required::is_marked_required;
use jsonform::{FormError, Repository, SubmitPolicy};
use serde_json::json;

#[test]
fn test_scalar_form_and_required_markers() -> anyhow::Result<()> {
    let repo = Repository::new();
    repo.add(&Person::default(), "user")?;

    let schema = repo.get_schema_by_name("user")?;
    assert_eq!(
        serde_json::to_value(&schema.form)?,
        json!([
            {"key": "firstName"},
            {"key": "age"},
            {"type": "submit", "title": "Submit"}
        ])
    );

    let value = serde_json::to_value(&schema.schema)?;
    assert_eq!(value["properties"]["firstName"]["required"], json!(true));
    assert_eq!(value["properties"]["firstName"]["minLength"], json!(3));
    assert!(value["properties"]["age"].get("required").is_none());
    assert!(value.get("required").is_none());

    Ok(())
}

#[test]
fn test_required_list_becomes_property_markers() -> anyhow::Result<()> {
    let repo = Repository::new();
    let schema = repo.resolve(&Triple)?;
    let value = serde_json::to_value(&schema.schema)?;

    assert!(value.get("required").is_none());
    assert_eq!(value["properties"]["a"]["required"], json!(true));
    assert_eq!(value["properties"]["b"]["required"], json!(true));
    assert!(value["properties"]["c"].get("required").is_none());

    let a = schema.property("a").expect("property a");
    assert!(is_marked_required(a));

    Ok(())
}

#[test]
fn test_nested_arrays_of_objects() -> anyhow::Result<()> {
    let repo = Repository::new().with_submit(SubmitPolicy::Delegate, "");
    let name = repo.add_default(&Collections::default())?;
    assert_eq!(name, "collections");

    let schema = repo.get_schema_by_name(&name)?;
    assert_eq!(
        serde_json::to_value(&schema.form)?,
        json!([
            {
                "key": "objects",
                "type": "array",
                "items": [{
                    "type": "section",
                    "items": [
                        {"key": "objects[].foo", "type": "textarea"},
                        {"key": "objects[].more"},
                        {
                            "key": "objects[].bars",
                            "type": "array",
                            "items": [{
                                "type": "section",
                                "items": [{"key": "objects[].bars[].bar"}]
                            }]
                        }
                    ]
                }]
            },
            {"key": "strings"}
        ])
    );

    let value = serde_json::to_value(&schema.schema)?;
    let bars = &value["properties"]["objects"]["items"]["properties"]["bars"];
    assert_eq!(bars["type"], json!(["array", "null"]));
    assert_eq!(bars["title"], json!("Bars"));
    assert_eq!(
        bars["items"]["properties"]["bar"],
        json!({"type": "string", "title": "Bar"})
    );
    assert_eq!(value["properties"]["strings"]["items"], json!({"type": "string"}));

    Ok(())
}

#[test]
fn test_user_with_neighbors_layout() -> anyhow::Result<()> {
    let repo = Repository::new().with_submit(SubmitPolicy::Delegate, "");
    let schema = repo.resolve(&UserWithNeighbors::default())?;

    let leaves = |prefix: &str| {
        ["firstName", "lastName", "locale", "age", "status", "bio"]
            .iter()
            .map(|leaf| {
                let key = format!("{prefix}{leaf}");
                if *leaf == "bio" {
                    json!({"key": key, "type": "textarea"})
                } else {
                    json!({"key": key})
                }
            })
            .collect::<Vec<_>>()
    };

    let mut expected = leaves("user.");
    expected.push(json!({
        "key": "neighbors",
        "type": "array",
        "items": [{"type": "section", "items": leaves("neighbors[].")}]
    }));

    assert_eq!(serde_json::to_value(&schema.form)?, json!(expected));

    let value = serde_json::to_value(&schema.schema)?;
    let user = &value["properties"]["user"];
    assert_eq!(user["title"], json!("User"));
    assert_eq!(user["description"], json!("The user."));
    assert_eq!(user["required"], json!(["firstName", "lastName"]));
    assert_eq!(user["properties"]["locale"]["enum"], json!(["ru-RU", "en-US"]));
    assert_eq!(
        user["properties"]["status"]["enum"],
        json!(["new", "approved", "active", "deleted"])
    );
    assert_eq!(
        value["properties"]["neighbors"]["items"]["description"],
        json!("User is a sample entity.")
    );

    Ok(())
}

#[test]
fn test_name_idempotent_across_wrappers() -> anyhow::Result<()> {
    let repo = Repository::new();

    let first = repo.name(&User::default())?;
    let second = repo.name(&Box::new(User::default()))?;
    let third = repo.name(&Some(User::default()))?;

    assert_eq!(first, "user");
    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(repo.len(), 1);

    Ok(())
}

#[test]
fn test_add_only_registration() -> anyhow::Result<()> {
    let repo = Repository::new();
    repo.add(&Person::default(), "x")?;
    let stored = repo.get_schema_by_name("x")?;

    let err = repo.add(&User::default(), "x").unwrap_err();
    assert!(matches!(err, FormError::DuplicateName { ref name } if name == "x"));
    assert_eq!(repo.get_schema_by_name("x")?, stored);

    Ok(())
}

#[test]
fn test_strict_repository_refuses_auto_registration() {
    let repo = Repository::new().with_strict(true);

    assert!(repo.resolve(&User::default()).unwrap_err().is_not_found());
    assert!(repo.schema(&User::default()).is_none());
    assert!(repo.names().is_empty());
}

#[test]
fn test_second_name_for_same_type_keeps_first() -> anyhow::Result<()> {
    let repo = Repository::new();
    repo.add(&User::default(), "first")?;
    repo.add(&User::default(), "second")?;

    assert_eq!(repo.name(&User::default())?, "first");
    assert!(repo.schema_by_name("second").is_some());
    assert_eq!(repo.len(), 2);

    Ok(())
}

#[test]
fn test_default_name_taken_by_another_type() -> anyhow::Result<()> {
    let repo = Repository::new();
    repo.add(&Person::default(), "user")?;

    assert!(repo.name(&User::default()).unwrap_err().is_duplicate());
    assert!(repo.schema(&User::default()).is_none());
    assert!(repo.schema(&Person::default()).is_some());

    let renamed = Repository::new();
    renamed.add(&Person::default(), "user")?;
    renamed.add(&User::default(), "account")?;
    assert_eq!(renamed.name(&User::default())?, "account");
    assert_eq!(renamed.schema(&User::default()), renamed.schema_by_name("account"));

    Ok(())
}

#[test]
fn test_array_of_arrays_of_objects() -> anyhow::Result<()> {
    let repo = Repository::new().with_submit(SubmitPolicy::Delegate, "");
    let schema = repo.resolve(&Grid)?;

    assert_eq!(
        serde_json::to_value(&schema.form)?,
        json!([{
            "key": "matrix",
            "type": "array",
            "items": [{
                "type": "section",
                "items": [{
                    "key": "matrix[]",
                    "type": "array",
                    "items": [{
                        "type": "section",
                        "items": [{"key": "matrix[][].v"}]
                    }]
                }]
            }]
        }])
    );

    let value = serde_json::to_value(&schema.schema)?;
    let cell = &value["properties"]["matrix"]["items"]["items"]["properties"]["v"];
    assert_eq!(cell["default"], json!(0));

    Ok(())
}
