mod has_many;
pub use has_many::HasMany;
