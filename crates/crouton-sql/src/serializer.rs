#[macro_use]
mod fmt;
use fmt::ToSql;

mod alias;
use alias::ColumnAlias;
pub use alias::{alias_name, ColumnAliasTable};

mod delim;
use delim::{Comma, Delimited};

mod flavor;
pub use flavor::Flavor;
use flavor::KeyHook;

mod params;
pub use params::ParamStyle;

// Fragment serializers
mod expr;
mod name;
mod statement;
mod value;

use name::TableName;

use crouton_core::{
    stmt::{Condition, Statement, Value},
    Error, Result,
};

/// Serializes statements to SQL text.
#[derive(Debug, Clone)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,

    /// Whether values are inlined or bound through placeholders
    style: ParamStyle,

    /// Prepended to every table name
    table_prefix: Option<String>,
}

/// The output of serializing one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    /// SQL text. Empty when the statement has nothing to do.
    pub sql: String,

    /// Values bound to placeholders, in placeholder order
    pub params: Vec<Value>,

    /// Aliases allocated while formatting
    pub aliases: ColumnAliasTable,

    /// Statement to run after `sql` to read back a generated primary key
    pub follow_up: Option<String>,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut Vec<Value>,

    /// Column aliases of the formatting context
    aliases: &'a mut ColumnAliasTable,

    /// True when column references are qualified with their parameter.
    qualify: bool,
}

impl Serializer {
    pub fn new(flavor: Flavor) -> Serializer {
        Serializer {
            flavor,
            style: ParamStyle::Inline,
            table_prefix: None,
        }
    }

    pub fn with_param_style(mut self, style: ParamStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = Some(prefix.into()).filter(|prefix| !prefix.is_empty());
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn param_style(&self) -> ParamStyle {
        self.style
    }

    /// Serializes `stmt` in a fresh formatting context.
    pub fn serialize(&self, stmt: &Statement) -> Result<Formatted> {
        let mut aliases = ColumnAliasTable::new();
        self.serialize_with(stmt, &mut aliases)
    }

    /// Serializes `stmt`, allocating aliases from `aliases`.
    pub fn serialize_with(
        &self,
        stmt: &Statement,
        aliases: &mut ColumnAliasTable,
    ) -> Result<Formatted> {
        let follow_up = match stmt {
            Statement::Insert(insert) if insert.returning_key => match self.flavor.key_hook() {
                Some(KeyHook::FollowUp(sql)) => Some(sql.to_string()),
                Some(_) => None,
                None => {
                    return Err(Error::missing_dialect_hook(format!(
                        "{:?} cannot read back the generated key of `{}`",
                        self.flavor,
                        insert.target.table
                    )))
                }
            },
            _ => None,
        };

        let conditions: Vec<&Condition> = match stmt {
            Statement::Select(select) => select
                .condition()
                .into_iter()
                .chain(select.relations().map(|relation| &relation.condition))
                .collect(),
            Statement::Delete(delete) => delete.condition().into_iter().collect(),
            Statement::Insert(_) | Statement::Update(_) => vec![],
        };

        for condition in conditions {
            expr::check(condition)?;
        }

        let mut sql = String::new();
        let mut params = vec![];

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut sql,
            params: &mut params,
            aliases: &mut *aliases,
            qualify: true,
        };

        stmt.to_sql(&mut fmt);

        tracing::debug!(
            kind = stmt.name(),
            sql = %sql,
            params = params.len(),
            "crouton.serialize"
        );

        Ok(Formatted {
            sql,
            params,
            aliases: aliases.clone(),
            follow_up,
        })
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Serializer::new(Flavor::default())
    }
}
