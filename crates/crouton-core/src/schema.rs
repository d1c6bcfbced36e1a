mod decl;
pub use decl::{FieldDecl, FieldKind, ModelDecl, ModelRef, Persistent};

mod descriptor;
pub use descriptor::{
    Binding, ColumnDescriptor, ReferenceDescriptor, RelationDescriptor, TypeDescriptor,
};

mod name;
pub use name::{foreign_key_name, snake_case};

mod registry;
pub use registry::Registry;

mod resolve;
