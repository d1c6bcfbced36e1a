use crouton::{row, Flavor, Row, Value};
use pretty_assertions::assert_eq;
use tests::{assert_ok, models, models::*, MockExecutor};

fn joined(player: (i64, &str), character: Option<(i64, &str)>) -> Row {
    let (id, name) = player;
    let mut row = row!("_c0" => id, "_c1" => name, "_c2" => 30i64, "_c3" => 0i64);

    match character {
        Some((character_id, character_name)) => {
            row.insert("_c4", character_id);
            row.insert("_c5", character_name);
            row.insert("_c6", id);
        }
        None => {
            row.insert("_c4", Value::Null);
            row.insert("_c5", Value::Null);
            row.insert("_c6", Value::Null);
        }
    }

    row
}

#[test]
fn included_relations_are_loaded_even_when_empty() {
    tests::init_tracing();

    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = assert_ok!(models!(Player, Character).flavor(Flavor::Sqlite).build(mock.clone()));

    mock.respond([
        joined((1, "one"), Some((10, "ten"))),
        joined((1, "one"), Some((11, "eleven"))),
        joined((2, "two"), None),
    ]);

    let players = assert_ok!(db.select::<Player>().include(Player::CHARACTERS).all(&mut db));

    assert_eq!(
        log.sql(),
        ["SELECT x.id AS _c0, x.name AS _c1, x.age AS _c2, x.play_time AS _c3, \
          x1.id AS _c4, x1.name AS _c5, x1.player_id AS _c6 \
          FROM Players x LEFT JOIN Characters x1 ON x.id = x1.player_id"]
    );

    assert_eq!(players.len(), 2);
    assert_eq!(players[0].id(), Some(1));
    assert_eq!(players[0].characters.get().len(), 2);
    assert_eq!(players[0].characters.get()[1].name(), "eleven");
    assert_eq!(players[0].characters.get()[1].player_id(), Some(1));
    assert_eq!(players[1].id(), Some(2));
    assert!(players[1].characters.is_loaded());
    assert_eq!(players[1].characters.get().len(), 0);
}

#[test]
fn relations_not_included_stay_unloaded() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player, Character).build(mock.clone()));

    mock.respond([row!("_c0" => 1i64, "_c1" => "one", "_c2" => 30i64, "_c3" => 0i64)]);

    let players = assert_ok!(db.select::<Player>().all(&mut db));

    assert_eq!(players.len(), 1);
    assert!(!players[0].characters.is_loaded());
    assert!(players[0].characters.try_get().is_none());
}

#[test]
fn repeated_rows_collapse_by_key() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player, Character).build(mock.clone()));

    mock.respond([
        joined((1, "first"), Some((10, "ten"))),
        joined((1, "second"), Some((10, "ten again"))),
    ]);

    let players = assert_ok!(db.select::<Player>().include(Player::CHARACTERS).all(&mut db));

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name(), "first");
    assert_eq!(players[0].characters.get().len(), 1);
    assert_eq!(players[0].characters.get()[0].name(), "ten");
}

#[test]
fn unknown_aliases_are_rejected() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player).build(mock.clone()));

    mock.respond([row!("_c0" => 1i64, "_c9" => "stray")]);

    let err = tests::assert_err!(db.select::<Player>().all(&mut db));
    assert!(err.is_invalid_result(), "err={err}");
}
