use crouton::row;
use pretty_assertions::assert_eq;
use tests::{assert_err, assert_none, assert_ok, assert_some, models, models::*, MockExecutor};

const PLAYER_COLUMNS: &str = "x.id AS _c0, x.name AS _c1, x.age AS _c2, x.play_time AS _c3";

fn db(mock: &MockExecutor) -> crouton::Db {
    assert_ok!(models!(Player, Character).build(mock.clone()))
}

#[test]
fn conjunction_of_comparisons() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    let query = db
        .select::<Player>()
        .filter(Player::AGE.gt(18).and(Player::NAME.eq("Bob")));
    assert_ok!(query.all(&mut db));

    assert_eq!(
        log.sql(),
        [format!(
            "SELECT {PLAYER_COLUMNS} FROM Players x WHERE ((x.age) > (18)) AND ((x.name) = ('Bob'))"
        )]
    );
}

#[test]
fn successive_filters_are_and_ed() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    let query = db
        .select::<Player>()
        .filter(Player::AGE.ge(18))
        .filter(Player::PLAY_TIME.lt(100i64));
    assert_ok!(query.all(&mut db));

    let sql = assert_some!(log.last()).sql;
    assert!(
        sql.ends_with(" WHERE ((x.age) >= (18)) AND ((x.play_time) < (100))"),
        "sql={sql}"
    );
}

#[test]
fn set_membership() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    assert_ok!(db
        .select::<Player>()
        .filter(Player::ID.in_list([1, 2, 3]))
        .all(&mut db));

    let sql = assert_some!(log.last()).sql;
    assert!(sql.ends_with(" WHERE (x.id) IN (1, 2, 3)"), "sql={sql}");
}

#[test]
fn named_root_parameter() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    assert_ok!(db
        .select::<Player>()
        .named("p")
        .filter(Player::NAME.of("p").ne("Bob"))
        .all(&mut db));

    assert_eq!(
        log.sql(),
        ["SELECT p.id AS _c0, p.name AS _c1, p.age AS _c2, p.play_time AS _c3 \
          FROM Players p WHERE (p.name) <> ('Bob')"]
    );
}

#[test]
fn navigation_to_a_referenced_key() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    assert_ok!(db
        .select::<Character>()
        .filter(Character::PLAYER.then(Player::ID).eq(1))
        .all(&mut db));
    assert_ok!(db
        .select::<Character>()
        .filter(Character::PLAYER.eq(1))
        .all(&mut db));

    let sql = log.sql();
    assert!(sql[0].ends_with(" FROM Characters x WHERE (x.player_id) = (1)"), "sql={}", sql[0]);
    assert_eq!(sql[0], sql[1]);
}

#[test]
fn filter_on_an_included_relation() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    assert_ok!(db
        .select::<Player>()
        .include(Player::CHARACTERS.alias("c"))
        .filter(Character::NAME.eq("ten"))
        .all(&mut db));

    let sql = assert_some!(log.last()).sql;
    assert!(
        sql.ends_with(
            " FROM Players x LEFT JOIN Characters c ON x.id = c.player_id WHERE (c.name) = ('ten')"
        ),
        "sql={sql}"
    );
}

#[test]
fn explicit_join_condition() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    let join = Player::CHARACTERS.alias("c").on(Character::PLAYER
        .of("c")
        .eq(Player::ID)
        .and(Character::NAME.of("c").ne("retired")));

    assert_ok!(db.select::<Player>().include(join).all(&mut db));

    let sql = assert_some!(log.last()).sql;
    assert!(
        sql.ends_with(
            " LEFT JOIN Characters c ON ((x.id) = (c.player_id)) AND ((c.name) <> ('retired'))"
        ),
        "sql={sql}"
    );
}

#[test]
fn filter_comparing_a_joined_column_with_a_root_column() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = db(&mock);

    assert_ok!(db
        .select::<Player>()
        .include(Player::CHARACTERS.alias("c"))
        .filter(Character::PLAYER.of("c").eq(Player::ID))
        .all(&mut db));

    let sql = assert_some!(log.last()).sql;
    assert!(
        sql.ends_with(" ON x.id = c.player_id WHERE (x.id) = (c.player_id)"),
        "sql={sql}"
    );
}

#[test]
fn comparing_two_root_members_is_ambiguous() {
    let mock = MockExecutor::new();
    let mut db = db(&mock);

    let err = assert_err!(db
        .select::<Player>()
        .filter(Player::AGE.eq(Player::ID))
        .all(&mut db));
    assert!(err.is_ambiguous_condition(), "err={err}");
    assert!(mock.log().is_empty());
}

#[test]
fn table_name_prefix() {
    let mock = MockExecutor::new();
    let log = mock.log();
    let mut db = assert_ok!(models!(Player).table_name_prefix("app_").build(mock.clone()));

    assert_ok!(db.select::<Player>().all(&mut db));
    assert_eq!(
        log.sql(),
        [format!("SELECT {PLAYER_COLUMNS} FROM app_Players x")]
    );
}

#[test]
fn first_returns_the_first_record() {
    let mock = MockExecutor::new();
    let mut db = db(&mock);
    let query = db.select::<Player>();

    assert_none!(assert_ok!(query.first(&mut db)));

    mock.respond([
        row!("_c0" => 2i64, "_c1" => "b", "_c2" => 1i64, "_c3" => 0i64),
        row!("_c0" => 1i64, "_c1" => "a", "_c2" => 1i64, "_c3" => 0i64),
    ]);
    let player = assert_some!(assert_ok!(query.first(&mut db)));
    assert_eq!(player.id(), Some(2));
}
