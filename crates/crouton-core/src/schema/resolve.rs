use super::{
    foreign_key_name, snake_case, Binding, ColumnDescriptor, FieldKind, ModelDecl, ModelRef,
    ReferenceDescriptor, RelationDescriptor, TypeDescriptor,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::any::TypeId;

/// Builds a [`TypeDescriptor`] from a model declaration.
///
/// Only declarations are consulted, never other descriptors, so building one
/// type never waits on another type's descriptor.
pub(super) struct Resolver {
    model: ModelRef,
    decl: ModelDecl,

    /// Declarations of every type known when the build started, used to find
    /// incoming foreign keys
    known: IndexMap<TypeId, (ModelRef, ModelDecl)>,
}

impl Resolver {
    pub(super) fn new(model: ModelRef, registered: &[ModelRef]) -> Resolver {
        let decl = model.declare();
        let mut resolver = Resolver {
            model,
            decl,
            known: IndexMap::new(),
        };

        for model in registered {
            resolver.discover(*model);
        }
        resolver.discover(model);
        resolver
    }

    /// Walks relation fields to collect every declaration reachable from
    /// `model`.
    fn discover(&mut self, model: ModelRef) {
        let mut pending = vec![model];

        while let Some(model) = pending.pop() {
            if self.known.contains_key(&model.id()) {
                continue;
            }

            let decl = if model == self.model {
                self.decl.clone()
            } else {
                model.declare()
            };

            pending.extend(decl.fields.iter().filter_map(|field| field.related_model()));
            self.known.insert(model.id(), (model, decl));
        }
    }

    fn decl_of(&self, model: ModelRef) -> &ModelDecl {
        &self.known[&model.id()].1
    }

    pub(super) fn resolve(self) -> Result<TypeDescriptor> {
        let name = self.model.name();

        let Some((primary_key, _)) = self.decl.primary_key_column() else {
            return Err(Error::missing_primary_key(name));
        };

        let mut columns = self.columns(&primary_key)?;
        let references = self.references(&mut columns)?;
        let relations = self.relations(&primary_key)?;
        self.synthesize_incoming(&mut columns);

        Ok(TypeDescriptor {
            model: self.model,
            table: self.decl.table.clone(),
            primary_key,
            columns,
            relations,
            references,
        })
    }

    fn columns(&self, primary_key: &str) -> Result<Vec<ColumnDescriptor>> {
        let mut columns: Vec<ColumnDescriptor> = vec![];

        for field in &self.decl.fields {
            let FieldKind::Column {
                ty,
                column,
                references,
            } = &field.kind
            else {
                continue;
            };

            let name = column.clone().unwrap_or_else(|| snake_case(&field.name));

            if columns.iter().any(|existing| existing.name == name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` maps more than one field to column `{name}`",
                    self.model.name()
                )));
            }

            columns.push(ColumnDescriptor {
                primary_key: name == primary_key,
                name,
                member: Some(field.name.clone()),
                ty: *ty,
                binding: references.map(|target| self.binding_to(target)).transpose()?,
            });
        }

        Ok(columns)
    }

    /// Belongs-to fields map onto a foreign key column, reusing a declared
    /// column of the same name when there is one.
    fn references(&self, columns: &mut Vec<ColumnDescriptor>) -> Result<Vec<ReferenceDescriptor>> {
        let mut references = vec![];

        for field in &self.decl.fields {
            let FieldKind::BelongsTo { target, column } = &field.kind else {
                continue;
            };

            let name = column.clone().unwrap_or_else(|| foreign_key_name(&field.name));
            let binding = self.binding_to(*target)?;

            match columns.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => {
                    existing.binding.get_or_insert(binding);
                }
                None => columns.push(ColumnDescriptor {
                    name: name.clone(),
                    member: None,
                    ty: self.key_type(*target)?,
                    binding: Some(binding),
                    primary_key: false,
                }),
            }

            references.push(ReferenceDescriptor {
                member: field.name.clone(),
                target: *target,
                column: name,
            });
        }

        Ok(references)
    }

    fn relations(&self, primary_key: &str) -> Result<Vec<RelationDescriptor>> {
        let mut relations = vec![];

        for field in &self.decl.fields {
            let FieldKind::HasMany {
                target,
                foreign_key,
                primary_key: explicit_primary_key,
            } = &field.kind
            else {
                continue;
            };

            let (foreign_key, inverse) = match foreign_key {
                Some(foreign_key) => (Some(foreign_key.clone()), None),
                None => self.infer_foreign_key(&field.name, *target)?,
            };

            relations.push(RelationDescriptor {
                member: field.name.clone(),
                target: *target,
                inverse,
                foreign_key,
                primary_key: explicit_primary_key
                    .clone()
                    .unwrap_or_else(|| primary_key.to_string()),
            });
        }

        Ok(relations)
    }

    /// Looks for a belongs-to field on the target pointing back at this
    /// model. Exactly one candidate names the foreign key; several are an
    /// error; none defers resolution to the join builder.
    fn infer_foreign_key(
        &self,
        member: &str,
        target: ModelRef,
    ) -> Result<(Option<String>, Option<String>)> {
        let candidates: Vec<_> = self
            .decl_of(target)
            .fields
            .iter()
            .filter_map(|field| match &field.kind {
                FieldKind::BelongsTo {
                    target: back,
                    column,
                } if *back == self.model => Some((
                    column.clone().unwrap_or_else(|| foreign_key_name(&field.name)),
                    field.name.clone(),
                )),
                _ => None,
            })
            .collect();

        match &candidates[..] {
            [] => Ok((None, None)),
            [(foreign_key, inverse)] => Ok((Some(foreign_key.clone()), Some(inverse.clone()))),
            _ => Err(Error::ambiguous_foreign_key(
                self.model.name(),
                member,
                &candidates
                    .iter()
                    .map(|(_, inverse)| format!("{}::{inverse}", target.name()))
                    .collect::<Vec<_>>(),
            )),
        }
    }

    /// Adds a column for every explicitly declared incoming foreign key that
    /// this type does not model itself.
    fn synthesize_incoming(&self, columns: &mut Vec<ColumnDescriptor>) {
        for (owner, decl) in self.known.values() {
            let Some((owner_key, owner_key_ty)) = decl.primary_key_column() else {
                continue;
            };

            for field in &decl.fields {
                let FieldKind::HasMany {
                    target,
                    foreign_key: Some(foreign_key),
                    primary_key,
                } = &field.kind
                else {
                    continue;
                };

                if *target != self.model || columns.iter().any(|c| &c.name == foreign_key) {
                    continue;
                }

                columns.push(ColumnDescriptor {
                    name: foreign_key.clone(),
                    member: None,
                    ty: owner_key_ty,
                    binding: Some(Binding {
                        model: *owner,
                        table: decl.table.clone(),
                        key: primary_key.clone().unwrap_or_else(|| owner_key.clone()),
                    }),
                    primary_key: false,
                });
            }
        }
    }

    fn binding_to(&self, target: ModelRef) -> Result<Binding> {
        let decl = self.decl_of(target);
        let Some((key, _)) = decl.primary_key_column() else {
            return Err(Error::missing_primary_key(target.name()));
        };

        Ok(Binding {
            model: target,
            table: decl.table.clone(),
            key,
        })
    }

    fn key_type(&self, target: ModelRef) -> Result<crate::stmt::Type> {
        self.decl_of(target)
            .primary_key_column()
            .map(|(_, ty)| ty)
            .ok_or_else(|| Error::missing_primary_key(target.name()))
    }
}
