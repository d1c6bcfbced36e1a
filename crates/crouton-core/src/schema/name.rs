use heck::ToSnakeCase;

/// Column name for a member name: `PlayTime` and `playTime` both become
/// `play_time`.
pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// Conventional foreign key column for a reference member: `owner` becomes
/// `owner_id`.
pub fn foreign_key_name(member: &str) -> String {
    format!("{}_id", snake_case(member))
}
