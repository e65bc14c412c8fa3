#![allow(dead_code)]

use jsonform::{Field, ObjectShape, Reflect, Shape};
use serde::Serialize;

/// Two scalar fields, one required
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub age: i64,
}

impl Reflect for Person {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(
                Field::new::<String>("firstName")
                    .tag("required", "true")
                    .tag("minLength", "3"),
            )
            .field(Field::new::<i64>("age").tag("minimum", "1"))
            .into()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct BarItem {
    pub bar: String,
}

impl Reflect for BarItem {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(Field::new::<String>("bar").tag("title", "Bar"))
            .into()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ObjectItem {
    pub foo: String,
    pub more: Vec<String>,
    pub bars: Vec<BarItem>,
}

impl Reflect for ObjectItem {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(
                Field::new::<String>("foo")
                    .tag("title", "Foo")
                    .tag("formType", "textarea"),
            )
            .field(Field::new::<Option<Vec<String>>>("more").tag("title", "More"))
            .field(Field::new::<Option<Vec<BarItem>>>("bars").tag("title", "Bars"))
            .into()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Collections {
    pub objects: Vec<ObjectItem>,
    pub strings: Vec<String>,
}

impl Reflect for Collections {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(Field::new::<Vec<ObjectItem>>("objects").tag("title", "Objects"))
            .field(Field::new::<Vec<String>>("strings").tag("title", "Strings"))
            .into()
    }
}

/// Required fields `a` and `b`, optional `c`
pub struct Triple;

impl Reflect for Triple {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(Field::new::<String>("a").tag("required", "true"))
            .field(Field::new::<String>("b").tag("required", "true"))
            .field(Field::new::<String>("c"))
            .into()
    }
}

pub struct Cell;

impl Reflect for Cell {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(Field::new::<i32>("v").tag("default", "0"))
            .into()
    }
}

/// Array of arrays of objects
pub struct Grid;

impl Reflect for Grid {
    fn shape() -> Shape {
        ObjectShape::new::<Self>()
            .field(Field::new::<Vec<Vec<Cell>>>("matrix"))
            .into()
    }
}
