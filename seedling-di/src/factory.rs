//! Core functionality for creating a [Context] from singleton definitions.
//!
//! Construction runs in one synchronous pass: definitions with failing conditions are dropped,
//! the remaining ones form a resolution graph, which must be acyclic, and every definition is then
//! instantiated in topological order. Any failure aborts the whole construction and no partial
//! context is returned.

use crate::context::Context;
use crate::definition::{Dependency, Identifier, PropertyDependency, SingletonDependency};
use crate::definition_source::DefinitionSource;
use crate::error::ContextError;
use crate::instance::{ErrorPtr, Instance, ResolvedValue, ResolvedValues};
use crate::matcher::{select_list, select_singular, ListSelection};
use crate::property::PropertySource;
use crate::resolution_graph::build_resolution_graph;
use itertools::Itertools;
use tracing::{debug, info, trace};

#[cfg(not(feature = "threadsafe"))]
pub type DefinitionSourcePtr = Box<dyn DefinitionSource>;
#[cfg(feature = "threadsafe")]
pub type DefinitionSourcePtr = Box<dyn DefinitionSource + Send + Sync>;

#[cfg(not(feature = "threadsafe"))]
pub type PropertySourcePtr = Box<dyn PropertySource>;
#[cfg(feature = "threadsafe")]
pub type PropertySourcePtr = Box<dyn PropertySource + Send + Sync>;

/// Factory for [Context]s. Both collaborators are passed explicitly, so they can be replaced with
/// fakes in tests.
pub struct ContextFactory {
    definition_source: DefinitionSourcePtr,
    property_source: PropertySourcePtr,
}

impl ContextFactory {
    pub fn new(definition_source: DefinitionSourcePtr, property_source: PropertySourcePtr) -> Self {
        Self {
            definition_source,
            property_source,
        }
    }

    #[inline]
    pub fn property_source(&self) -> &dyn PropertySource {
        self.property_source.as_ref()
    }

    /// Creates a new context, instantiating every enabled definition exactly once.
    pub fn create_context(&self) -> Result<Context, ContextError> {
        let definitions = self
            .definition_source
            .definitions()
            .into_iter()
            .filter(|definition| {
                let enabled = definition.is_enabled(self.property_source());
                if !enabled {
                    debug!(identifier = %definition.identifier, "Skipping disabled singleton.");
                }

                enabled
            })
            .collect_vec();

        let graph = build_resolution_graph(&definitions);
        let order = graph.topological_indices().map_err(|_| {
            ContextError::DependencyCycleFound(
                graph
                    .cycles()
                    .into_iter()
                    .map(|cycle| cycle.map(|definition| definition.identifier.clone()))
                    .collect(),
            )
        })?;

        let construction_order = order
            .iter()
            .map(|index| &definitions[*index].identifier)
            .join(", ");
        debug!(order = %construction_order, "Resolved construction order.");

        let mut instances: Vec<Option<Instance>> = vec![None; definitions.len()];
        let mut entries = Vec::with_capacity(definitions.len());

        for index in order {
            let definition = &definitions[index];
            let candidates = || {
                definitions
                    .iter()
                    .zip(&instances)
                    .enumerate()
                    .filter(move |(candidate_index, _)| *candidate_index != index)
                    .map(|(_, (candidate, instance))| (&candidate.identifier, instance))
            };

            let values = definition
                .dependencies
                .iter()
                .map(|dependency| match dependency {
                    Dependency::Singleton(dependency) => {
                        resolve_singleton(dependency, candidates())
                    }
                    Dependency::Property(dependency) => {
                        self.resolve_property(&definition.identifier, dependency)
                    }
                })
                .try_collect()?;

            trace!(identifier = %definition.identifier, "Creating singleton.");

            let instance = (definition.instance_provider)(&ResolvedValues::new(values)).map_err(
                |error| ContextError::InstanceCreation {
                    identifier: definition.identifier.clone(),
                    cause: ErrorPtr::from(error),
                },
            )?;

            if instance.is_list() != definition.identifier.type_ref.is_list() {
                return Err(ContextError::IncompatibleInstance(
                    definition.identifier.clone(),
                ));
            }

            instances[index] = Some(instance.clone());
            entries.push((definition.identifier.clone(), instance));
        }

        info!("Created context with {} singletons.", entries.len());

        Ok(Context::new(entries))
    }

    fn resolve_property(
        &self,
        singleton: &Identifier,
        dependency: &PropertyDependency,
    ) -> Result<ResolvedValue, ContextError> {
        match self.property_source.get_or_none(&dependency.key) {
            Some(property) => (dependency.decoder)(&property)
                .map(|value| ResolvedValue::Property(Some(value)))
                .map_err(|_| ContextError::InvalidPropertyType {
                    singleton: singleton.clone(),
                    key: dependency.key.clone(),
                }),
            None if dependency.required => Err(ContextError::PropertyNotFound {
                singleton: singleton.clone(),
                key: dependency.key.clone(),
            }),
            None => Ok(ResolvedValue::Property(None)),
        }
    }
}

fn resolve_singleton<'a, I>(
    dependency: &SingletonDependency,
    candidates: I,
) -> Result<ResolvedValue, ContextError>
where
    I: IntoIterator<Item = (&'a Identifier, &'a Option<Instance>)>,
{
    match dependency {
        SingletonDependency::Singular { type_ref, name } => {
            select_singular(candidates, type_ref, name.as_deref())?
                .and_then(|instance| instance.clone())
                .map(ResolvedValue::from)
                .ok_or_else(|| ContextError::NoCandidatesFound {
                    type_ref: type_ref.clone(),
                    name: name.clone(),
                })
        }
        SingletonDependency::List {
            type_ref,
            name,
            element_name,
        } => Ok(ResolvedValue::List(
            match select_list(candidates, type_ref, name.as_deref(), element_name.as_deref())? {
                ListSelection::Elements(instances) => instances
                    .into_iter()
                    .flatten()
                    .flat_map(Instance::to_elements)
                    .collect(),
                ListSelection::Explicit(instance) => instance
                    .as_ref()
                    .map(Instance::to_elements)
                    .unwrap_or_default(),
                ListSelection::Empty => vec![],
            },
        )),
    }
}
