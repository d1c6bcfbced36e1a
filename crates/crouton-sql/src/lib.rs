pub mod serializer;
pub use serializer::{ColumnAliasTable, Flavor, Formatted, ParamStyle, Serializer};
