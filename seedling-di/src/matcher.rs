//! Decides whether a candidate singleton satisfies a request. The same rules apply to definitions
//! while building the resolution graph and to stored instances when querying a
//! [Context](crate::context::Context).
//!
//! ### Singular requests
//!
//! The candidate type must be assignable to the requested type. An unnamed request matches any
//! candidate name, a named one only the same name.
//!
//! ### List requests
//!
//! | candidate | type condition                         | `element_name` set | `name` set         | neither |
//! |-----------|----------------------------------------|--------------------|--------------------|---------|
//! | list      | equal to the requested list type       | no match           | `name` must match  | match   |
//! | singular  | assignable to the requested element    | must match         | no match           | match   |
//!
//! `element_name` has precedence over `name` for list candidates, while `name` has precedence over
//! `element_name` for singular ones.

use crate::definition::{Identifier, SingletonDependency};
use crate::error::ContextError;
use crate::type_reference::TypeReference;

/// How a candidate matched a list request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ListMatch {
    /// A singular candidate contributing one element.
    Element,
    /// A candidate providing the whole list.
    Explicit,
}

/// Checks if `candidate` satisfies a singular request.
pub fn matches_singular(type_ref: &TypeReference, name: Option<&str>, candidate: &Identifier) -> bool {
    type_ref.is_assignable_from(&candidate.type_ref)
        && name
            .map(|name| candidate.name.as_deref() == Some(name))
            .unwrap_or(true)
}

/// Checks if `candidate` satisfies a list request for `type_ref` (a `List<_>` type).
pub fn matches_list(
    type_ref: &TypeReference,
    name: Option<&str>,
    element_name: Option<&str>,
    candidate: &Identifier,
) -> Option<ListMatch> {
    let candidate_name = candidate.name.as_deref();

    if candidate.type_ref.is_list() {
        let name_matches = match (element_name, name) {
            (Some(_), _) => false,
            (None, Some(name)) => candidate_name == Some(name),
            (None, None) => true,
        };

        (*type_ref == candidate.type_ref && name_matches).then_some(ListMatch::Explicit)
    } else {
        let name_matches = match (name, element_name) {
            (Some(_), _) => false,
            (None, Some(element_name)) => candidate_name == Some(element_name),
            (None, None) => true,
        };

        let type_matches = type_ref
            .element_type()
            .map(|element_type| element_type.is_assignable_from(&candidate.type_ref))
            .unwrap_or(false);

        (type_matches && name_matches).then_some(ListMatch::Element)
    }
}

/// Checks if `candidate` satisfies a dependency of any shape.
pub fn matches_dependency(dependency: &SingletonDependency, candidate: &Identifier) -> bool {
    match dependency {
        SingletonDependency::Singular { type_ref, name } => {
            matches_singular(type_ref, name.as_deref(), candidate)
        }
        SingletonDependency::List {
            type_ref,
            name,
            element_name,
        } => matches_list(type_ref, name.as_deref(), element_name.as_deref(), candidate).is_some(),
    }
}

/// Picks the only candidate matching a singular request.
pub(crate) fn select_singular<'a, T, I>(
    candidates: I,
    type_ref: &TypeReference,
    name: Option<&str>,
) -> Result<Option<T>, ContextError>
where
    I: IntoIterator<Item = (&'a Identifier, T)>,
{
    let mut matching = candidates
        .into_iter()
        .filter(|(identifier, _)| matches_singular(type_ref, name, identifier))
        .map(|(_, candidate)| candidate);

    let first = matching.next();
    if first.is_some() && matching.next().is_some() {
        return Err(ContextError::MultipleCandidatesFound {
            type_ref: type_ref.clone(),
            name: name.map(str::to_string),
            element_name: None,
        });
    }

    Ok(first)
}

/// Candidates chosen for a list request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ListSelection<T> {
    Elements(Vec<T>),
    Explicit(T),
    Empty,
}

/// Picks candidates for a list request. Element-by-element candidates take precedence over an
/// explicit list candidate, of which there can be at most one.
pub(crate) fn select_list<'a, T, I>(
    candidates: I,
    type_ref: &TypeReference,
    name: Option<&str>,
    element_name: Option<&str>,
) -> Result<ListSelection<T>, ContextError>
where
    I: IntoIterator<Item = (&'a Identifier, T)>,
{
    let mut elements = vec![];
    let mut explicit = vec![];

    for (identifier, candidate) in candidates {
        match matches_list(type_ref, name, element_name, identifier) {
            Some(ListMatch::Element) => elements.push(candidate),
            Some(ListMatch::Explicit) => explicit.push(candidate),
            None => {}
        }
    }

    if !elements.is_empty() {
        return Ok(ListSelection::Elements(elements));
    }

    if explicit.len() > 1 {
        return Err(ContextError::MultipleCandidatesFound {
            type_ref: type_ref.clone(),
            name: name.map(str::to_string),
            element_name: element_name.map(str::to_string),
        });
    }

    Ok(explicit
        .pop()
        .map(ListSelection::Explicit)
        .unwrap_or(ListSelection::Empty))
}
