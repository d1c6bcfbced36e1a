use crate::stmt::Type;

use std::{any::TypeId, fmt, hash};

/// Implemented by every persistent type. The declaration is the only metadata
/// the registry reads; descriptors are derived from it once and cached.
pub trait Persistent: 'static {
    fn declare() -> ModelDecl;
}

/// Identifies a persistent type and knows how to obtain its declaration.
#[derive(Clone, Copy)]
pub struct ModelRef {
    id: TypeId,
    name: &'static str,
    declare: fn() -> ModelDecl,
}

/// The declaration of a persistent type: table, primary key and fields.
#[derive(Debug, Clone)]
pub struct ModelDecl {
    /// Name of the backing table
    pub table: String,

    /// Member name of the primary key field
    pub primary_key: String,

    /// Declared fields, in declaration order
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Member name of the field
    pub name: String,

    pub kind: FieldKind,
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A scalar stored in a column.
    Column {
        ty: Type,

        /// Explicit column name, overriding the snake_case member name
        column: Option<String>,

        /// The model whose primary key this column stores
        references: Option<ModelRef>,
    },

    /// A collection of target instances whose foreign key points at this
    /// model.
    HasMany {
        target: ModelRef,

        /// Explicit foreign key column on the target table
        foreign_key: Option<String>,

        /// Explicit key on this model the foreign key refers to
        primary_key: Option<String>,
    },

    /// A reference to a parent instance, stored as a foreign key column.
    BelongsTo {
        target: ModelRef,

        /// Explicit foreign key column, overriding `<member>_id`
        column: Option<String>,
    },
}

impl ModelRef {
    pub fn of<T: Persistent>() -> ModelRef {
        let name = std::any::type_name::<T>();
        ModelRef {
            id: TypeId::of::<T>(),
            name: name.rsplit("::").next().unwrap_or(name),
            declare: T::declare,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Short Rust name of the type, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declare(&self) -> ModelDecl {
        (self.declare)()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelRef {}

impl hash::Hash for ModelRef {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelRef({})", self.name)
    }
}

impl ModelDecl {
    pub fn new(table: impl Into<String>) -> ModelDecl {
        ModelDecl {
            table: table.into(),
            primary_key: "id".to_string(),
            fields: vec![],
        }
    }

    /// Names the primary key member. Defaults to `id`.
    pub fn primary_key(mut self, member: impl Into<String>) -> Self {
        self.primary_key = member.into();
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Shorthand for a plain column field.
    pub fn column(self, name: impl Into<String>, ty: Type) -> Self {
        self.field(FieldDecl::column(name, ty))
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Column name of the primary key, if the primary key names a column field.
    pub fn primary_key_column(&self) -> Option<(String, Type)> {
        match self.field_by_name(&self.primary_key)?.kind {
            FieldKind::Column { ty, ref column, .. } => Some((
                column
                    .clone()
                    .unwrap_or_else(|| super::snake_case(&self.primary_key)),
                ty,
            )),
            _ => None,
        }
    }
}

impl FieldDecl {
    pub fn column(name: impl Into<String>, ty: Type) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            kind: FieldKind::Column {
                ty,
                column: None,
                references: None,
            },
        }
    }

    pub fn has_many<T: Persistent>(name: impl Into<String>) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            kind: FieldKind::HasMany {
                target: ModelRef::of::<T>(),
                foreign_key: None,
                primary_key: None,
            },
        }
    }

    pub fn belongs_to<T: Persistent>(name: impl Into<String>) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            kind: FieldKind::BelongsTo {
                target: ModelRef::of::<T>(),
                column: None,
            },
        }
    }

    /// Overrides the column name of a column or belongs-to field.
    #[track_caller]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Column { column, .. } | FieldKind::BelongsTo { column, .. } => {
                *column = Some(name.into());
            }
            FieldKind::HasMany { .. } => panic!("has-many field `{}` has no column", self.name),
        }
        self
    }

    /// Marks a column as storing the primary key of `T`.
    #[track_caller]
    pub fn references<T: Persistent>(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Column { references, .. } => *references = Some(ModelRef::of::<T>()),
            _ => panic!("only column fields can reference a model; field=`{}`", self.name),
        }
        self
    }

    /// Declares the foreign key column of a has-many relation explicitly.
    #[track_caller]
    pub fn foreign_key(mut self, name: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::HasMany { foreign_key, .. } => *foreign_key = Some(name.into()),
            _ => panic!("only has-many fields take a foreign key; field=`{}`", self.name),
        }
        self
    }

    /// Declares the key a has-many foreign key refers to explicitly.
    #[track_caller]
    pub fn references_key(mut self, name: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::HasMany { primary_key, .. } => *primary_key = Some(name.into()),
            _ => panic!("only has-many fields take a primary key; field=`{}`", self.name),
        }
        self
    }

    /// Models this field points at, if it is a relation or a reference.
    pub(crate) fn related_model(&self) -> Option<ModelRef> {
        match &self.kind {
            FieldKind::Column { references, .. } => *references,
            FieldKind::HasMany { target, .. } | FieldKind::BelongsTo { target, .. } => {
                Some(*target)
            }
        }
    }
}
