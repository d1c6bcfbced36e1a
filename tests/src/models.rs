//! Models shared by the repository tests.

use crouton::{
    row, ChangeSet, Field, FieldDecl, HasMany, Model, ModelDecl, Persistent, Record, Relation,
    Result, Row, Tracked, Type, Value,
};

#[derive(Debug)]
pub struct Player {
    id: Option<i32>,
    name: String,
    age: i32,
    play_time: i64,
    pub characters: HasMany<Character>,
    changes: ChangeSet,
}

impl Player {
    pub const ID: Field<Player, i32> = Field::new("id");
    pub const NAME: Field<Player, String> = Field::new("name");
    pub const AGE: Field<Player, i32> = Field::new("age");
    pub const PLAY_TIME: Field<Player, i64> = Field::new("play_time");
    pub const CHARACTERS: Relation<Player, Character> = Relation::new("characters");

    pub fn new(name: impl Into<String>, age: i32) -> Player {
        Player {
            id: None,
            name: name.into(),
            age,
            play_time: 0,
            characters: HasMany::default(),
            changes: ChangeSet::new(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Player {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.changes.mark("name");
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
        self.changes.mark("age");
    }
}

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

impl Tracked for Player {
    fn is_new(&self) -> bool {
        self.changes.is_new()
    }

    fn dirty_fields(&self) -> Vec<String> {
        self.changes.dirty_fields()
    }

    fn reset_dirty(&self) {
        self.changes.reset_dirty()
    }

    fn mark_persisted(&self) {
        self.changes.mark_persisted()
    }
}

impl Model for Player {
    fn load(record: &Record) -> Result<Self> {
        Ok(Player {
            id: record.field("id")?,
            name: record.field("name")?,
            age: record.field("age")?,
            play_time: record.field("play_time")?,
            characters: record.has_many("characters")?,
            changes: ChangeSet::loaded(),
        })
    }

    fn to_row(&self) -> Row {
        row!(
            "id" => self.id,
            "name" => &self.name,
            "age" => self.age,
            "play_time" => self.play_time,
        )
    }

    fn assign_key(&mut self, key: Value) -> Result<()> {
        self.id = Some(key.try_into()?);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Character {
    id: Option<i32>,
    name: String,
    player: Option<i32>,
    changes: ChangeSet,
}

impl Character {
    pub const ID: Field<Character, i32> = Field::new("id");
    pub const NAME: Field<Character, String> = Field::new("name");
    pub const PLAYER: Field<Character, i32> = Field::new("player");

    pub fn new(name: impl Into<String>, player: &Player) -> Character {
        Character {
            id: None,
            name: name.into(),
            player: player.id(),
            changes: ChangeSet::new(),
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player_id(&self) -> Option<i32> {
        self.player
    }

    pub fn set_player(&mut self, player: &Player) {
        self.player = player.id();
        self.changes.mark("player");
    }
}

impl Persistent for Character {
    fn declare() -> ModelDecl {
        ModelDecl::new("Characters")
            .column("id", Type::I32)
            .column("name", Type::String)
            .field(FieldDecl::belongs_to::<Player>("player"))
    }
}

impl Tracked for Character {
    fn is_new(&self) -> bool {
        self.changes.is_new()
    }

    fn dirty_fields(&self) -> Vec<String> {
        self.changes.dirty_fields()
    }

    fn reset_dirty(&self) {
        self.changes.reset_dirty()
    }

    fn mark_persisted(&self) {
        self.changes.mark_persisted()
    }
}

impl Model for Character {
    fn load(record: &Record) -> Result<Self> {
        Ok(Character {
            id: record.field("id")?,
            name: record.field("name")?,
            player: record.field("player")?,
            changes: ChangeSet::loaded(),
        })
    }

    fn to_row(&self) -> Row {
        row!(
            "id" => self.id,
            "name" => &self.name,
            "player_id" => self.player,
        )
    }

    fn assign_key(&mut self, key: Value) -> Result<()> {
        self.id = Some(key.try_into()?);
        Ok(())
    }
}

/// Declares no primary key; registering it fails.
#[derive(Debug)]
pub struct Keyless {
    changes: ChangeSet,
}

impl Persistent for Keyless {
    fn declare() -> ModelDecl {
        ModelDecl::new("Keyless").column("name", Type::String)
    }
}

impl Tracked for Keyless {
    fn is_new(&self) -> bool {
        self.changes.is_new()
    }

    fn dirty_fields(&self) -> Vec<String> {
        self.changes.dirty_fields()
    }

    fn reset_dirty(&self) {
        self.changes.reset_dirty()
    }
}

impl Model for Keyless {
    fn load(_: &Record) -> Result<Self> {
        Ok(Keyless {
            changes: ChangeSet::loaded(),
        })
    }

    fn to_row(&self) -> Row {
        Row::new()
    }

    fn assign_key(&mut self, _: Value) -> Result<()> {
        Ok(())
    }
}
