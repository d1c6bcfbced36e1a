use crouton::{row, Error, Flavor, ParamStyle, Row, Tracked, Value};
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_none, assert_ok, assert_some, models, models::*, MockExecutor};

fn loaded_player(mock: &MockExecutor) -> (crouton::Db, Player) {
    let mut db = assert_ok!(models!(Player, Character).build(mock.clone()));

    mock.respond([row!("_c0" => 1i64, "_c1" => "old", "_c2" => 30i64, "_c3" => 5i64)]);
    let player = assert_some!(assert_ok!(db.find::<Player>(1)));

    (db, player)
}

#[test]
fn find_selects_by_key() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let (_db, player) = loaded_player(&mock);

    assert_eq!(
        log.sql(),
        ["SELECT x.id AS _c0, x.name AS _c1, x.age AS _c2, x.play_time AS _c3 FROM Players x WHERE (x.id) = (1)"]
    );
    assert_eq!(player.name(), "old");
    assert_eq!(player.age(), 30);
}

#[test]
fn find_without_rows_is_none() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player).build(mock.clone()));

    assert_none!(assert_ok!(db.find::<Player>(42)));
}

#[test]
fn store_updates_only_dirty_fields() {
    let mock = MockExecutor::new();
    let mut log = mock.log();
    let (mut db, mut player) = loaded_player(&mock);
    log.clear();

    player.set_name("new");
    assert_ok!(db.store(&mut player));

    assert_eq!(log.sql(), ["UPDATE Players SET name = 'new' WHERE id = 1;"]);

    assert_ok!(db.store(&mut player));
    assert_eq!(log.len(), 1);
}

#[test]
fn store_of_a_clean_entity_runs_nothing() {
    let mock = MockExecutor::new();
    let mut log = mock.log();
    let (mut db, mut player) = loaded_player(&mock);
    log.clear();

    assert_ok!(db.store(&mut player));
    assert!(log.is_empty());
}

#[test]
fn store_inserts_and_reads_back_the_key() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = assert_ok!(models!(Player).flavor(Flavor::Sqlite).build(mock.clone()));

    mock.respond(Vec::<Row>::new());
    mock.respond([row!("last_insert_rowid()" => 5i64)]);

    let mut player = Player::new("Bob", 30);
    assert_ok!(db.store(&mut player));

    assert_eq!(
        log.sql(),
        [
            "INSERT INTO Players (name, age, play_time) VALUES ('Bob', 30, 0);",
            "SELECT last_insert_rowid();",
        ]
    );
    assert_eq!(player.id(), Some(5));

    // Persisted: the next change is an UPDATE.
    player.set_age(31);
    assert_ok!(db.store(&mut player));
    assert_eq!(
        log.last().map(|op| op.sql),
        Some("UPDATE Players SET age = 31 WHERE id = 5;".to_string())
    );
}

#[test]
fn store_with_placeholders_binds_values() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = assert_ok!(models!(Player)
        .flavor(Flavor::Postgresql)
        .param_style(ParamStyle::Placeholders)
        .build(mock.clone()));

    mock.respond([row!("id" => 8i64)]);

    let mut player = Player::new("Bob", 30);
    assert_ok!(db.store(&mut player));

    let op = assert_some!(log.last());
    assert_eq!(
        op.sql,
        "INSERT INTO Players (name, age, play_time) VALUES ($1, $2, $3) RETURNING id;"
    );
    assert_eq!(op.params, [Value::from("Bob"), Value::I32(30), Value::I64(0)]);
    assert_eq!(player.id(), Some(8));
}

#[test]
fn generic_flavor_needs_explicit_keys() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = assert_ok!(models!(Player).build(mock.clone()));

    let mut player = Player::new("Bob", 30);
    let err = assert_err!(db.store(&mut player));
    assert!(err.is_missing_dialect_hook());
    assert!(log.is_empty());
    assert!(player.is_new());

    let mut player = Player::new("Bob", 30).with_id(3);
    assert_ok!(db.store(&mut player));
    assert_eq!(
        log.sql(),
        ["INSERT INTO Players (id, name, age, play_time) VALUES (3, 'Bob', 30, 0);"]
    );
}

#[test]
fn missing_generated_key_is_an_error() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player).flavor(Flavor::Mysql).build(mock.clone()));

    let mut player = Player::new("Bob", 30);
    let err = assert_err!(db.store(&mut player));
    assert!(err.is_invalid_result(), "err={err}");
}

#[test]
fn delete_by_key() {
    let mock = MockExecutor::new();
    let mut log = mock.log();
    let (mut db, player) = loaded_player(&mock);
    log.clear();

    assert_ok!(db.delete(&player));
    assert_eq!(log.sql(), ["DELETE FROM Players WHERE (id) = (1);"]);
}

#[test]
fn delete_without_key_fails() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player).build(mock.clone()));

    let err = assert_err!(db.delete(&Player::new("Bob", 30)));
    assert_eq!(err.to_string(), "cannot delete `Player` without a primary key value");
}

#[test]
fn executor_errors_propagate_unchanged() {
    let mock = MockExecutor::new();
    let mut db = assert_ok!(models!(Player).build(mock.clone()));

    mock.fail(Error::driver(std::io::Error::other("connection reset")));

    let err = assert_err!(db.select::<Player>().all(&mut db));
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "connection reset");
}

#[test]
fn schema_errors_surface_at_build() {
    let mock = MockExecutor::new();

    let err = assert_err!(models!(Player, Keyless).build(mock.clone()));
    assert!(err.is_invalid_schema());
    assert!(!mock.is_open());
}

#[test]
fn close_closes_the_executor() {
    let mock = MockExecutor::new();
    let db = assert_ok!(models!(Player).build(mock.clone()));
    assert!(mock.is_open());

    assert_ok!(db.close());
    assert!(!mock.is_open());
}
