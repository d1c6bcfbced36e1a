#![allow(dead_code)]

use crouton_core::{
    schema::{FieldDecl, ModelDecl, ModelRef, Persistent},
    stmt::{Expr, ParamRef, Type},
};

pub struct Player;

impl Persistent for Player {
    fn declare() -> ModelDecl {
        ModelDecl::new("Players")
            .column("id", Type::I32)
            .column("name", Type::String)
            .column("age", Type::I32)
            .column("play_time", Type::I64)
            .field(FieldDecl::has_many::<Character>("characters"))
    }
}

pub struct Character;

impl Persistent for Character {
    fn declare() -> ModelDecl {
        ModelDecl::new("Characters")
            .column("id", Type::I32)
            .column("name", Type::String)
            .field(FieldDecl::belongs_to::<Player>("player"))
    }
}

pub struct Setting;

impl Persistent for Setting {
    fn declare() -> ModelDecl {
        ModelDecl::new("Settings")
            .column("id", Type::I64)
            .column("enabled", Type::Bool)
    }
}

pub fn member<T: Persistent>(path: &[&str]) -> Expr {
    Expr::member(
        ParamRef::Implicit,
        ModelRef::of::<T>(),
        path.iter().map(|step| step.to_string()).collect(),
    )
}
