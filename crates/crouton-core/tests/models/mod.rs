//! Declarations shared by the schema and statement tests.
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
            .field(FieldDecl::has_many::<Item>("items"))
    }
}

pub struct Item;

impl Persistent for Item {
    fn declare() -> ModelDecl {
        ModelDecl::new("Items")
            .column("id", Type::I64)
            .column("label", Type::String)
            .field(FieldDecl::belongs_to::<Character>("owner").rename("character_id"))
    }
}

/// Two references back to `Team`: the foreign key of `games` is ambiguous.
pub struct Team;

impl Persistent for Team {
    fn declare() -> ModelDecl {
        ModelDecl::new("Teams")
            .column("id", Type::I64)
            .field(FieldDecl::has_many::<Game>("games"))
    }
}

pub struct Game;

impl Persistent for Game {
    fn declare() -> ModelDecl {
        ModelDecl::new("Games")
            .column("id", Type::I64)
            .field(FieldDecl::belongs_to::<Team>("home"))
            .field(FieldDecl::belongs_to::<Team>("away"))
    }
}

/// `members` has no back-reference; its key is found through the column
/// binding on `Member::guild_key`.
pub struct Guild;

impl Persistent for Guild {
    fn declare() -> ModelDecl {
        ModelDecl::new("Guilds")
            .column("id", Type::I64)
            .field(FieldDecl::has_many::<Member>("members"))
    }
}

pub struct Member;

impl Persistent for Member {
    fn declare() -> ModelDecl {
        ModelDecl::new("Members")
            .column("id", Type::I64)
            .field(FieldDecl::column("guild_key", Type::I64).references::<Guild>())
    }
}

/// `books` names its foreign key explicitly; `Book` does not model it.
pub struct Author;

impl Persistent for Author {
    fn declare() -> ModelDecl {
        ModelDecl::new("Authors")
            .column("id", Type::I64)
            .column("name", Type::String)
            .field(FieldDecl::has_many::<Book>("books").foreign_key("writer_id"))
    }
}

pub struct Book;

impl Persistent for Book {
    fn declare() -> ModelDecl {
        ModelDecl::new("Books")
            .column("id", Type::I64)
            .column("title", Type::String)
    }
}

/// `tags` cannot be resolved: nothing on `Tag` points back at `Post`.
pub struct Post;

impl Persistent for Post {
    fn declare() -> ModelDecl {
        ModelDecl::new("Posts")
            .column("id", Type::I64)
            .field(FieldDecl::has_many::<Tag>("tags"))
    }
}

pub struct Tag;

impl Persistent for Tag {
    fn declare() -> ModelDecl {
        ModelDecl::new("Tags")
            .column("id", Type::I64)
            .column("post", Type::I64)
    }
}

pub struct Keyless;

impl Persistent for Keyless {
    fn declare() -> ModelDecl {
        ModelDecl::new("Keyless").column("name", Type::String)
    }
}

pub fn member<T: Persistent>(path: &[&str]) -> Expr {
    Expr::member(
        ParamRef::Implicit,
        ModelRef::of::<T>(),
        path.iter().map(|step| step.to_string()).collect(),
    )
}

pub fn member_of<T: Persistent>(param: &str, path: &[&str]) -> Expr {
    Expr::member(
        ParamRef::Named(param.to_string()),
        ModelRef::of::<T>(),
        path.iter().map(|step| step.to_string()).collect(),
    )
}
