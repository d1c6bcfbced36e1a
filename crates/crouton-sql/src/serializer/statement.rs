use super::{expr::AliasedColumn, Comma, Delimited, Formatter, KeyHook, TableName, ToSql};

use crouton_core::stmt::{Delete, Insert, Select, Statement, Update, UpdateRow, Value};

/// A parenthesized row of values.
struct Tuple<'a>(&'a [Value]);

/// `column = value`
struct Assignment<'a>(&'a str, &'a Value);

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let mut columns = vec![];

        for (param, descriptor) in self.params().iter() {
            for column in &descriptor.columns {
                if self.selects(param, &column.name) {
                    columns.push(AliasedColumn {
                        param,
                        column: &column.name,
                    });
                }
            }
        }

        let root = self.root();
        fmt!(f, "SELECT " Comma(columns) " FROM " TableName(&root.table) " " self.root_name());

        for relation in self.relations() {
            let target = self
                .params()
                .get(&relation.right)
                .expect("joined parameter is registered");

            let right = &relation.right;
            fmt!(f, " LEFT JOIN " TableName(&target.table) " " right " ON ");

            if relation.condition == relation.predicate {
                fmt!(f, &relation.fragment);
            } else {
                fmt!(f, &relation.condition);
            }
        }

        if let Some(condition) = self.condition() {
            fmt!(f, " WHERE " condition);
        }
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let hook = match self.returning_key {
            true => f.serializer.flavor.key_hook(),
            false => None,
        };
        let table = TableName(&self.target.table);
        let key = &self.target.primary_key;

        fmt!(f, "INSERT INTO " table);

        if !self.columns.is_empty() {
            fmt!(f, " (" Comma(&self.columns) ")");
        }

        if hook == Some(KeyHook::Output) {
            fmt!(f, " OUTPUT INSERTED." key);
        }

        if self.columns.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            fmt!(f, " VALUES " Comma(self.rows.iter().map(|row| Tuple(row))));
        }

        if hook == Some(KeyHook::Returning) {
            fmt!(f, " RETURNING " key);
        }

        fmt!(f, ";");
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let qualify = std::mem::replace(&mut f.qualify, false);
        let table = &self.target.table;
        let key = &self.target.primary_key;

        let rows = self
            .rows
            .iter()
            .filter(|row| !row.assignments.is_empty())
            .map(|row| UpdateStatement {
                table,
                key,
                row,
            });

        fmt!(f, Delimited(rows, "\n"));

        f.qualify = qualify;
    }
}

/// One row of an UPDATE as its own statement.
struct UpdateStatement<'a> {
    table: &'a str,
    key: &'a String,
    row: &'a UpdateRow,
}

impl ToSql for UpdateStatement<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let assignments = self
            .row
            .assignments
            .iter()
            .map(|(column, value)| Assignment(column, value));
        let key = &self.row.key;

        fmt!(
            f,
            "UPDATE " TableName(self.table) " SET " Comma(assignments)
            " WHERE " self.key " = " key ";"
        );
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let qualify = std::mem::replace(&mut f.qualify, false);

        fmt!(f, "DELETE FROM " TableName(&self.target().table));

        if let Some(condition) = self.condition() {
            fmt!(f, " WHERE " condition);
        }

        fmt!(f, ";");

        f.qualify = qualify;
    }
}

impl ToSql for Tuple<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "(" Comma(self.0) ")");
    }
}

impl ToSql for Assignment<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, self.0 " = " self.1);
    }
}
