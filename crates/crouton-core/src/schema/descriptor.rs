use super::ModelRef;
use crate::stmt::Type;

/// Resolved metadata for a persistent type.
///
/// Built once per type by the [`Registry`](super::Registry) and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub model: ModelRef,

    /// Name of the backing table
    pub table: String,

    /// Column name of the primary key
    pub primary_key: String,

    /// Physical columns, including synthesized foreign key columns
    pub columns: Vec<ColumnDescriptor>,

    /// Has-many relations declared by the type
    pub relations: Vec<RelationDescriptor>,

    /// Belongs-to references declared by the type
    pub references: Vec<ReferenceDescriptor>,
}

#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// Column name, snake_case unless overridden
    pub name: String,

    /// The member the column is loaded into. `None` for synthesized foreign
    /// key columns that have no member of their own.
    pub member: Option<String>,

    pub ty: Type,

    /// Set for foreign key columns
    pub binding: Option<Binding>,

    pub primary_key: bool,
}

/// The table and key a foreign key column references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub model: ModelRef,
    pub table: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct RelationDescriptor {
    /// Navigation member on the owning type
    pub member: String,

    pub target: ModelRef,

    /// Member on the target type pointing back at the owner, if any
    pub inverse: Option<String>,

    /// Foreign key column on the target table. `None` when neither a
    /// declaration nor a back-reference names it; the join builder then
    /// falls back to the target's column bindings.
    pub foreign_key: Option<String>,

    /// Key on the owning table the foreign key refers to
    pub primary_key: String,
}

#[derive(Debug, Clone)]
pub struct ReferenceDescriptor {
    /// Navigation member on the owning type
    pub member: String,

    pub target: ModelRef,

    /// Foreign key column holding the target's primary key
    pub column: String,
}

impl TypeDescriptor {
    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn column_for_member(&self, member: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.member.as_deref() == Some(member))
    }

    pub fn primary_key_column(&self) -> &ColumnDescriptor {
        self.columns
            .iter()
            .find(|column| column.primary_key)
            .expect("descriptor without a primary key column")
    }

    pub fn relation(&self, member: &str) -> Option<&RelationDescriptor> {
        self.relations
            .iter()
            .find(|relation| relation.member == member)
    }

    pub fn reference(&self, member: &str) -> Option<&ReferenceDescriptor> {
        self.references
            .iter()
            .find(|reference| reference.member == member)
    }

    /// Columns whose binding points at `table`.
    pub fn columns_bound_to<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a ColumnDescriptor> + 'a {
        self.columns.iter().filter(move |column| {
            column
                .binding
                .as_ref()
                .is_some_and(|binding| binding.table == table)
        })
    }

    /// Columns other than the primary key, in declaration order.
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> + '_ {
        self.columns.iter().filter(|column| !column.primary_key)
    }
}
