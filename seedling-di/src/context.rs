//! Resolved singleton instances. A [Context] is created by a
//! [ContextFactory](crate::factory::ContextFactory) and never changes afterwards, so it can be
//! shared between readers freely.

use crate::definition::Identifier;
use crate::error::ContextError;
use crate::instance::{downcast, Injectable, Instance, InstanceAnyPtr, InstancePtr};
use crate::matcher::{select_list, select_singular, ListSelection};
use crate::type_reference::TypeReference;

/// Immutable store of constructed singletons, in construction order.
#[derive(Clone, Debug, Default)]
pub struct Context {
    entries: Vec<(Identifier, Instance)>,
}

impl Context {
    pub(crate) fn new(entries: Vec<(Identifier, Instance)>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all singletons in construction order.
    pub fn entries(&self) -> impl Iterator<Item = (&Identifier, &Instance)> {
        self.entries
            .iter()
            .map(|(identifier, instance)| (identifier, instance))
    }

    fn candidates(&self) -> impl Iterator<Item = (&Identifier, &(Identifier, Instance))> {
        self.entries.iter().map(|entry| (&entry.0, entry))
    }

    /// Finds the single instance assignable to `type_ref`, optionally with given name. Returns
    /// `None` if there's no such instance, and fails if there are multiple.
    pub fn find_instance(
        &self,
        type_ref: &TypeReference,
        name: Option<&str>,
    ) -> Result<Option<Instance>, ContextError> {
        select_singular(self.candidates(), type_ref, name)
            .map(|entry| entry.map(|(_, instance)| instance.clone()))
    }

    /// Finds instances for a list type. Element-by-element instances take precedence over an
    /// explicit list instance. Returns an empty list if nothing matches.
    pub fn find_list(
        &self,
        type_ref: &TypeReference,
        name: Option<&str>,
        element_name: Option<&str>,
    ) -> Result<Vec<InstanceAnyPtr>, ContextError> {
        Ok(
            match select_list(self.candidates(), type_ref, name, element_name)? {
                ListSelection::Elements(entries) => entries
                    .into_iter()
                    .flat_map(|(_, instance)| instance.to_elements())
                    .collect(),
                ListSelection::Explicit((_, instance)) => instance.to_elements(),
                ListSelection::Empty => vec![],
            },
        )
    }

    /// Typed version of [Context::find_instance].
    pub fn find_instance_typed<T: Injectable>(
        &self,
        type_ref: &TypeReference,
        name: Option<&str>,
    ) -> Result<Option<InstancePtr<T>>, ContextError> {
        select_singular(self.candidates(), type_ref, name)?
            .map(|(identifier, instance)| match instance {
                Instance::Single(instance) => downcast::<T>(instance.clone())
                    .map_err(|_| ContextError::IncompatibleInstance(identifier.clone())),
                Instance::List(_) => Err(ContextError::IncompatibleInstance(identifier.clone())),
            })
            .transpose()
    }

    /// Typed version of [Context::find_list].
    pub fn find_list_typed<T: Injectable>(
        &self,
        type_ref: &TypeReference,
        name: Option<&str>,
        element_name: Option<&str>,
    ) -> Result<Vec<InstancePtr<T>>, ContextError> {
        let entries = match select_list(self.candidates(), type_ref, name, element_name)? {
            ListSelection::Elements(entries) => entries,
            ListSelection::Explicit(entry) => vec![entry],
            ListSelection::Empty => vec![],
        };

        entries
            .into_iter()
            .flat_map(|(identifier, instance)| {
                instance.to_elements().into_iter().map(move |element| {
                    downcast::<T>(element)
                        .map_err(|_| ContextError::IncompatibleInstance(identifier.clone()))
                })
            })
            .collect()
    }
}
