//! Sample entities used by the command line tool and benchmarks

use serde::{Deserialize, Serialize};

use crate::domain::{Field, ObjectShape, Reflect, Shape};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    New,
    Approved,
    Active,
    Deleted,
}

impl Reflect for UserStatus {
    fn shape() -> Shape {
        Shape::enumeration(["new", "approved", "active", "deleted"])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub locale: String,
    pub age: i64,
    pub status: UserStatus,
    pub bio: String,
}

impl Reflect for User {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .title("User")
            .description("User is a sample entity.")
            .field(
                Field::new::<String>("firstName")
                    .tag("required", "true")
                    .tag("title", "First name")
                    .tag("minLength", "3"),
            )
            .field(
                Field::new::<String>("lastName")
                    .tag("required", "true")
                    .tag("title", "Last name")
                    .tag("minLength", "3"),
            )
            .field(
                Field::new::<String>("locale")
                    .tag("title", "User locale")
                    .tag("enum", "ru-RU,en-US"),
            )
            .field(Field::new::<i64>("age").tag("title", "Age").tag("minimum", "1"))
            .field(Field::new::<UserStatus>("status").tag("title", "Status"))
            .field(
                Field::new::<String>("bio")
                    .tag("title", "Bio")
                    .tag("description", "A brief description of the person.")
                    .tag("formType", "textarea"),
            )
            .into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserWithNeighbors {
    pub user: User,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<User>,
}

impl Reflect for UserWithNeighbors {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(
                Field::new::<User>("user")
                    .tag("title", "User")
                    .tag("description", "The user."),
            )
            .field(
                Field::new::<Vec<User>>("neighbors")
                    .tag("title", "Neighbors")
                    .tag("description", "A list of neighbors."),
            )
            .into()
    }
}

/// Repository with the sample entities added under their default names
pub fn repository(settings: &crate::config::Settings) -> crate::FormResult<crate::Repository> {
    let repository = crate::Repository::from_settings(settings);
    repository.add_default(&User::default())?;
    repository.add_default(&UserWithNeighbors::default())?;
    Ok(repository)
}
