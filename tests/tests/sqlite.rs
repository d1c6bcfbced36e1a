use crouton::{Db, Flavor, ParamStyle};
use crouton_driver_sqlite::Sqlite;
use pretty_assertions::assert_eq;
use tests::{assert_ok, assert_some, models, models::*, ExecLog, LoggingExecutor};

const SCHEMA: &str = "
    CREATE TABLE Players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        play_time INTEGER NOT NULL
    );
    CREATE TABLE Characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        player_id INTEGER
    );
";

fn setup(style: ParamStyle) -> (Db, ExecLog) {
    tests::init_tracing();

    let mut sqlite = Sqlite::in_memory();
    assert_ok!(sqlite.execute_batch(SCHEMA));

    let executor = LoggingExecutor::new(sqlite);
    let log = executor.log();

    let db = assert_ok!(models!(Player, Character)
        .flavor(Flavor::Sqlite)
        .param_style(style)
        .build(executor));

    (db, log)
}

fn names(players: &[Player]) -> Vec<&str> {
    players.iter().map(Player::name).collect()
}

#[test]
fn crud_round_trip() {
    let (mut db, _log) = setup(ParamStyle::Placeholders);

    let mut bob = Player::new("Bob", 30);
    let mut alice = Player::new("Alice", 25);
    assert_ok!(db.store(&mut bob));
    assert_ok!(db.store(&mut alice));
    assert_eq!(bob.id(), Some(1));
    assert_eq!(alice.id(), Some(2));

    for name in ["Sword", "Shield"] {
        let mut character = Character::new(name, &bob);
        assert_ok!(db.store(&mut character));
        assert!(character.id().is_some());
    }

    let players = assert_ok!(db.select::<Player>().include(Player::CHARACTERS).all(&mut db));
    assert_eq!(names(&players), ["Bob", "Alice"]);

    let mut characters: Vec<_> = players[0]
        .characters
        .get()
        .iter()
        .map(Character::name)
        .collect();
    characters.sort();
    assert_eq!(characters, ["Shield", "Sword"]);
    assert!(players[1].characters.get().is_empty());

    let adults = assert_ok!(db.select::<Player>().filter(Player::AGE.gt(26)).all(&mut db));
    assert_eq!(names(&adults), ["Bob"]);

    bob.set_name("Robert");
    assert_ok!(db.store(&mut bob));
    let found = assert_some!(assert_ok!(db.find::<Player>(1)));
    assert_eq!(found.name(), "Robert");
    assert_eq!(found.age(), 30);

    assert_ok!(db.delete(&alice));
    let players = assert_ok!(db.select::<Player>().all(&mut db));
    assert_eq!(names(&players), ["Robert"]);

    assert_ok!(db.close());
}

#[test]
fn moving_a_character_updates_its_foreign_key() {
    let (mut db, log) = setup(ParamStyle::Placeholders);

    let mut bob = Player::new("Bob", 30);
    let mut alice = Player::new("Alice", 25);
    assert_ok!(db.store(&mut bob));
    assert_ok!(db.store(&mut alice));

    let mut character = Character::new("Sword", &bob);
    assert_ok!(db.store(&mut character));

    character.set_player(&alice);
    assert_ok!(db.store(&mut character));
    assert_eq!(
        assert_some!(log.last()).sql,
        "UPDATE Characters SET player_id = ?1 WHERE id = ?2;"
    );

    let owned = assert_ok!(db
        .select::<Character>()
        .filter(Character::PLAYER.eq(assert_some!(alice.id())))
        .all(&mut db));
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].player_id(), alice.id());
}

#[test]
fn quotes_survive_inline_values() {
    let (mut db, log) = setup(ParamStyle::Inline);

    let mut player = Player::new("O'Brien", 40);
    assert_ok!(db.store(&mut player));
    assert!(log.sql()[0].contains("'O''Brien'"));

    let found = assert_ok!(db
        .select::<Player>()
        .filter(Player::NAME.eq("O'Brien"))
        .first(&mut db));
    assert_eq!(assert_some!(found).name(), "O'Brien");
}
