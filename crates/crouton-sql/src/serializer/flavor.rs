use super::Serializer;

/// SQL dialect.
///
/// Dialects differ only in how generated primary keys are read back after an
/// INSERT and in how placeholders are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// Dialect-neutral SQL with no way to read back generated keys
    #[default]
    Generic,
    Mssql,
    Mysql,
    Postgresql,
    Sqlite,
}

/// How an INSERT reports the primary key the database generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyHook {
    /// `OUTPUT INSERTED.<pk>` before `VALUES`
    Output,

    /// `RETURNING <pk>` after the rows
    Returning,

    /// A separate statement run after the INSERT
    FollowUp(&'static str),
}

impl Flavor {
    pub(super) fn key_hook(self) -> Option<KeyHook> {
        match self {
            Flavor::Generic => None,
            Flavor::Mssql => Some(KeyHook::Output),
            Flavor::Mysql => Some(KeyHook::FollowUp("SELECT LAST_INSERT_ID();")),
            Flavor::Postgresql => Some(KeyHook::Returning),
            Flavor::Sqlite => Some(KeyHook::FollowUp("SELECT last_insert_rowid();")),
        }
    }
}

impl Serializer {
    pub fn generic() -> Serializer {
        Serializer::new(Flavor::Generic)
    }

    pub fn mssql() -> Serializer {
        Serializer::new(Flavor::Mssql)
    }

    pub fn mysql() -> Serializer {
        Serializer::new(Flavor::Mysql)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(Flavor::Postgresql)
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(Flavor::Sqlite)
    }
}
