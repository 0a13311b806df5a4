//! Builds the dependency [Graph] over singleton definitions.

use crate::definition::SingletonDefinition;
use crate::graph::{AdjacencyMatrix, Graph};
use crate::matcher::matches_dependency;
use tracing::trace;

/// Creates a graph with an edge from every candidate to every definition depending on it. Property
/// dependencies don't create edges, and a definition is never its own candidate. Multiple
/// candidates for one dependency produce multiple edges; ambiguity is only reported when
/// instantiating.
pub fn build_resolution_graph(definitions: &[SingletonDefinition]) -> Graph<&SingletonDefinition> {
    let mut edges = AdjacencyMatrix::new(definitions.len());

    for (dependent_index, dependent) in definitions.iter().enumerate() {
        for dependency in dependent.singleton_dependencies() {
            for (candidate_index, candidate) in definitions.iter().enumerate() {
                if candidate_index != dependent_index
                    && matches_dependency(dependency, &candidate.identifier)
                {
                    trace!(
                        candidate = %candidate.identifier,
                        dependent = %dependent.identifier,
                        "Adding resolution edge."
                    );
                    edges.add_edge(candidate_index, dependent_index);
                }
            }
        }
    }

    edges.into_graph(definitions.iter().collect())
}

#[cfg(test)]
mod tests {
    use crate::definition::{Dependency, Identifier, SingletonDefinition};
    use crate::instance::Instance;
    use crate::resolution_graph::build_resolution_graph;
    use crate::type_reference::TypeReference;

    fn definition(name: &str, dependencies: Vec<Dependency>) -> SingletonDefinition {
        dependencies.into_iter().fold(
            SingletonDefinition::new(Identifier::new(TypeReference::new(name)), |_| {
                Ok(Instance::single(()))
            }),
            SingletonDefinition::with_dependency,
        )
    }

    #[test]
    fn should_add_edges_from_dependencies_to_dependents() {
        let definitions = vec![
            definition("A", vec![Dependency::singular(TypeReference::new("B"), None)]),
            definition("B", vec![]),
        ];

        let graph = build_resolution_graph(&definitions);
        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn should_add_edges_for_all_candidates() {
        let definitions = vec![
            definition("B", vec![]),
            definition("A", vec![Dependency::list(TypeReference::new("B"), None, None)]),
            definition("B", vec![]),
        ];

        let graph = build_resolution_graph(&definitions);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn should_ignore_self_and_property_dependencies() {
        let definitions = vec![definition(
            "A",
            vec![
                Dependency::singular(TypeReference::new("A"), None),
                Dependency::property::<String>("a", true),
            ],
        )];

        let graph = build_resolution_graph(&definitions);
        assert!(!graph.has_edge(0, 0));
        assert!(!graph.has_cycles());
    }
}
