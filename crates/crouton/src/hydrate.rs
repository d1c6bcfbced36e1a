use crate::{HasMany, Model, Result};

use crouton_core::{
    schema::TypeDescriptor,
    stmt::{FromValue, Key, RelationSpec, Row, Select, Value},
    Error,
};
use crouton_sql::ColumnAliasTable;
use indexmap::IndexMap;
use std::sync::Arc;

/// One instance's worth of result columns, with the records of every joined
/// relation attached.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<TypeDescriptor>,

    /// Statement parameter the record was read from
    param: String,

    /// Values keyed by column name
    row: Row,

    /// Related records by navigation member. Only joined relations appear.
    relations: IndexMap<String, Vec<Record>>,
}

/// Rebuilds the object graph of a select from its flat result rows.
///
/// Result columns are regrouped by parameter, using the alias table the
/// statement was formatted with. Each parameter's rows are deduplicated by
/// primary key, keeping the first row seen. Rows whose key is null are the
/// unmatched side of a left join and are dropped.
#[derive(Debug)]
pub struct Hydrator<'a> {
    select: &'a Select,
    aliases: &'a ColumnAliasTable,
}

impl<'a> Hydrator<'a> {
    pub fn new(select: &'a Select, aliases: &'a ColumnAliasTable) -> Self {
        Self { select, aliases }
    }

    /// Returns the root records in the order their rows first appeared.
    pub fn hydrate(&self, rows: Vec<Row>) -> Result<Vec<Record>> {
        let params = self.select.params();
        let total = rows.len();

        let mut groups: IndexMap<String, IndexMap<Key, Row>> = params
            .iter()
            .map(|(name, _)| (name.to_string(), IndexMap::new()))
            .collect();

        for row in rows {
            for (param, part) in self.split(row)? {
                let Some(descriptor) = params.get(&param) else {
                    return Err(Error::invalid_result(format!(
                        "unknown parameter `{param}` in result"
                    )));
                };

                let Some(key) = part.get(&descriptor.primary_key).and_then(Value::to_key) else {
                    continue;
                };

                groups[&param].entry(key).or_insert(part);
            }
        }

        let root = self.select.root_name();
        let records = groups[root]
            .values()
            .map(|row| self.record(root, row.clone(), &groups))
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(
            rows = total,
            records = records.len(),
            relations = self.select.relations().count(),
            "crouton.hydrate"
        );

        Ok(records)
    }

    /// Splits a result row into one row per parameter, keyed by column.
    fn split(&self, row: Row) -> Result<IndexMap<String, Row>> {
        let mut parts: IndexMap<String, Row> = IndexMap::new();

        for (name, value) in row {
            let (param, column) = match self.aliases.resolve(&name) {
                Some((param, column)) => (param.to_string(), column.to_string()),
                None => match name.split_once('.') {
                    Some((param, column)) => (param.to_string(), column.to_string()),
                    None => {
                        return Err(Error::invalid_result(format!(
                            "unknown column alias `{name}`"
                        )))
                    }
                },
            };

            parts.entry(param).or_default().insert(column, value);
        }

        Ok(parts)
    }

    fn record(
        &self,
        param: &str,
        row: Row,
        groups: &IndexMap<String, IndexMap<Key, Row>>,
    ) -> Result<Record> {
        let mut relations = IndexMap::new();

        for relation in self.select.relations_from(param) {
            relations.insert(
                relation.member.clone(),
                self.related(relation, &row, groups)?,
            );
        }

        Ok(Record {
            descriptor: self.descriptor(param)?.clone(),
            param: param.to_string(),
            row,
            relations,
        })
    }

    fn related(
        &self,
        relation: &RelationSpec,
        row: &Row,
        groups: &IndexMap<String, IndexMap<Key, Row>>,
    ) -> Result<Vec<Record>> {
        let mut related = vec![];

        for candidate in groups[&relation.right].values() {
            if relation.matches(row, candidate)? {
                related.push(self.record(&relation.right, candidate.clone(), groups)?);
            }
        }

        Ok(related)
    }

    fn descriptor(&self, param: &str) -> Result<&Arc<TypeDescriptor>> {
        self.select
            .params()
            .get(param)
            .ok_or_else(|| Error::invalid_result(format!("unknown parameter `{param}` in result")))
    }
}

impl Record {
    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    /// Reads a column. A column the statement did not select reads as null.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.row.get(column).cloned().unwrap_or_default();
        T::from_value(value).map_err(|err| {
            err.context(Error::invalid_result(format!(
                "cannot load `{}.{column}`",
                self.descriptor.table
            )))
        })
    }

    /// Reads the column backing a member.
    pub fn field<T: FromValue>(&self, member: &str) -> Result<T> {
        let descriptor = &self.descriptor;

        let column = if let Some(column) = descriptor.column_for_member(member) {
            &column.name
        } else if let Some(reference) = descriptor.reference(member) {
            &reference.column
        } else {
            return Err(Error::invalid_schema(format!(
                "`{}` has no member `{member}`",
                descriptor.name()
            )));
        };

        self.get(column)
    }

    /// Primary key of the record.
    pub fn key(&self) -> Option<Key> {
        self.row.get(&self.descriptor.primary_key)?.to_key()
    }

    /// Records of a joined relation, or `None` if the relation was not
    /// joined.
    pub fn related(&self, member: &str) -> Option<&[Record]> {
        self.relations.get(member).map(Vec::as_slice)
    }

    /// Loads a has-many member. The result is unloaded when the relation
    /// was not joined.
    pub fn has_many<T: Model>(&self, member: &str) -> Result<HasMany<T>> {
        if self.descriptor.relation(member).is_none() {
            return Err(Error::unresolvable_relation(self.descriptor.name(), member));
        }

        match self.related(member) {
            Some(records) => HasMany::load(records),
            None => Ok(HasMany::default()),
        }
    }
}
