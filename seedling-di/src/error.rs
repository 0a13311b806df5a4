use crate::definition::Identifier;
use crate::graph::Cycle;
use crate::instance::ErrorPtr;
use crate::type_reference::TypeReference;
use itertools::Itertools;
use thiserror::Error;

/// Errors related to building a [Context](crate::context::Context) and querying it afterwards.
#[derive(Error, Clone, Debug)]
pub enum ContextError {
    #[error("Dependency cycles found:\n{}", render_cycles(.0))]
    DependencyCycleFound(Vec<Cycle<Identifier>>),
    #[error("No candidates found for type {type_ref}{}", render_name(.name))]
    NoCandidatesFound {
        type_ref: TypeReference,
        name: Option<String>,
    },
    #[error(
        "Multiple candidates found for type {type_ref}{}{}",
        render_name(.name),
        render_element_name(.element_name)
    )]
    MultipleCandidatesFound {
        type_ref: TypeReference,
        name: Option<String>,
        element_name: Option<String>,
    },
    #[error("Property '{key}' required by singleton {singleton} not found")]
    PropertyNotFound { singleton: Identifier, key: String },
    #[error("Property '{key}' required by singleton {singleton} has an invalid type")]
    InvalidPropertyType { singleton: Identifier, key: String },
    #[error("Error creating singleton {identifier}: {cause}")]
    InstanceCreation {
        identifier: Identifier,
        cause: ErrorPtr,
    },
    #[error("Singleton {0} produced an instance incompatible with its identifier")]
    IncompatibleInstance(Identifier),
}

fn render_name(name: &Option<String>) -> String {
    name.as_ref()
        .map(|name| format!(" named '{name}'"))
        .unwrap_or_default()
}

fn render_element_name(element_name: &Option<String>) -> String {
    element_name
        .as_ref()
        .map(|name| format!(" with elements named '{name}'"))
        .unwrap_or_default()
}

fn render_cycles(cycles: &[Cycle<Identifier>]) -> String {
    if let [cycle] = cycles {
        return cycle.to_string();
    }

    cycles
        .iter()
        .enumerate()
        .map(|(index, cycle)| format!("Cycle #{}:\n{cycle}", index + 1))
        .join("\n\n")
}

/// Errors related to reading values from a [PropertySource](crate::property::PropertySource).
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum PropertyError {
    #[error("Property not found: {0}")]
    NotFound(String),
    #[error("Property value '{value}' cannot be read as {expected}")]
    IncompatibleType {
        value: String,
        expected: &'static str,
    },
}

/// Errors related to graph algorithms.
#[derive(Error, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum GraphError {
    #[error("Cannot compute a topological order of a cyclic graph")]
    CyclicGraph,
}

/// Errors related to reading [ResolvedValues](crate::instance::ResolvedValues) in instance
/// providers.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ResolvedValueError {
    #[error("Resolved value #{index} is not compatible with {expected}")]
    IncompatibleValue { index: usize, expected: &'static str },
    #[error("Resolved property #{0} is absent")]
    MissingProperty(usize),
}
