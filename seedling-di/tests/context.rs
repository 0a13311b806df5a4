#[cfg(feature = "threadsafe")]
mod context_test {
    use seedling_di::context::Context;
    use seedling_di::definition::{Condition, Dependency, Identifier, SingletonDefinition};
    use seedling_di::factory::{ContextFactory, DefinitionSourcePtr, PropertySourcePtr};
    use seedling_di::instance::{downcast, Instance, InstanceAnyPtr, InstancePtr, ResolvedValue};
    use seedling_di::property::MapPropertySource;
    use seedling_di::type_reference::{BaseType, TypeReference};
    use seedling_di::ContextError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    struct Leaf;

    struct Node {
        children: Vec<InstanceAnyPtr>,
    }

    fn type_ref(name: &str) -> TypeReference {
        TypeReference::new(name)
    }

    fn leaf(name: &str) -> SingletonDefinition {
        SingletonDefinition::new(Identifier::new(type_ref(name)), |_| Ok(Instance::single(Leaf)))
    }

    /// Definition whose instance holds all its singular dependencies.
    fn node(name: &str, dependencies: &[&str]) -> SingletonDefinition {
        let count = dependencies.len();
        dependencies.iter().fold(
            SingletonDefinition::new(Identifier::new(type_ref(name)), move |values| {
                Ok(Instance::single(Node {
                    children: (0..count)
                        .filter_map(|index| match values.get(index) {
                            Some(ResolvedValue::Instance(instance)) => Some(instance.clone()),
                            _ => None,
                        })
                        .collect(),
                }))
            }),
            |definition, dependency| {
                definition.with_dependency(Dependency::singular(type_ref(dependency), None))
            },
        )
    }

    fn create_context(
        definitions: Vec<SingletonDefinition>,
        properties: MapPropertySource,
    ) -> Result<Context, ContextError> {
        ContextFactory::new(
            Box::new(definitions) as DefinitionSourcePtr,
            Box::new(properties) as PropertySourcePtr,
        )
        .create_context()
    }

    #[test]
    fn should_share_instances_along_chain() {
        let definitions = vec![
            SingletonDefinition::new(Identifier::new(type_ref("A")), |values| {
                Ok(Instance::single(values.instance::<Node>(0)?))
            })
            .with_dependency(Dependency::singular(type_ref("B"), None)),
            node("B", &["C"]),
            leaf("C"),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(context.size(), 3);

        let a = context
            .find_instance_typed::<InstancePtr<Node>>(&type_ref("A"), None)
            .unwrap()
            .unwrap();
        let b = context
            .find_instance_typed::<Node>(&type_ref("B"), None)
            .unwrap()
            .unwrap();
        let c = context
            .find_instance_typed::<Leaf>(&type_ref("C"), None)
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&*a, &b));
        assert!(Arc::ptr_eq(
            &downcast::<Leaf>(b.children[0].clone()).ok().unwrap(),
            &c
        ));
    }

    #[test]
    fn should_construct_in_dependency_order() {
        let definitions = vec![node("A", &["B"]), node("B", &["C"]), leaf("C"), leaf("D")];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        let order = context
            .entries()
            .map(|(identifier, _)| identifier.type_ref.to_string())
            .collect::<Vec<_>>();

        assert_eq!(order, vec!["C", "B", "A", "D"]);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn should_share_context_between_threads() {
        assert_send_sync::<Context>();

        let context = Arc::new(
            create_context(vec![leaf("A"), node("B", &["A"])], MapPropertySource::default())
                .unwrap(),
        );

        let handles = (0..4)
            .map(|_| {
                let context = context.clone();
                thread::spawn(move || {
                    context
                        .find_instance_typed::<Node>(&type_ref("B"), None)
                        .unwrap()
                        .is_some()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn should_share_diamond_dependency() {
        let definitions = vec![
            SingletonDefinition::new(Identifier::new(type_ref("A")), |values| {
                Ok(Instance::single((
                    values.instance::<Node>(0)?,
                    values.instance::<Node>(1)?,
                )))
            })
            .with_dependency(Dependency::singular(type_ref("B"), None))
            .with_dependency(Dependency::singular(type_ref("C"), None)),
            node("B", &["D"]),
            node("C", &["D"]),
            leaf("D"),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        let a = context
            .find_instance_typed::<(InstancePtr<Node>, InstancePtr<Node>)>(&type_ref("A"), None)
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&a.0.children[0], &a.1.children[0]));
    }

    #[test]
    fn should_invoke_each_provider_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let counted = SingletonDefinition::new(Identifier::new(type_ref("Shared")), |_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Instance::single(Leaf))
        });

        let definitions = vec![
            node("A", &["Shared"]),
            node("B", &["Shared"]),
            node("C", &["Shared"]),
            counted,
        ];

        create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_reject_ambiguous_dependency() {
        let definitions = vec![leaf("A"), leaf("A"), node("B", &["A"])];

        let error = create_context(definitions, MapPropertySource::default()).unwrap_err();
        assert!(matches!(
            error,
            ContextError::MultipleCandidatesFound { ref type_ref, .. } if *type_ref == TypeReference::new("A")
        ));
        assert_eq!(error.to_string(), "Multiple candidates found for type A");
    }

    #[test]
    fn should_reject_dependency_cycle() {
        let definitions = vec![node("A", &["B"]), node("B", &["C"]), node("C", &["A"])];

        match create_context(definitions, MapPropertySource::default()).unwrap_err() {
            ContextError::DependencyCycleFound(cycles) => {
                assert_eq!(cycles.len(), 1);

                let mut members = cycles[0]
                    .nodes()
                    .iter()
                    .map(|identifier| identifier.type_ref.to_string())
                    .collect::<Vec<_>>();
                members.sort();
                assert_eq!(members, vec!["A", "B", "C"]);
            }
            error => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn should_report_overlapping_dependency_cycles() {
        let definitions = vec![node("A", &["C"]), node("B", &["A"]), node("C", &["B", "A"])];

        match create_context(definitions, MapPropertySource::default()).unwrap_err() {
            ContextError::DependencyCycleFound(cycles) => {
                let cycles = cycles
                    .iter()
                    .map(|cycle| {
                        cycle
                            .nodes()
                            .iter()
                            .map(|identifier| identifier.type_ref.to_string())
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>();

                assert_eq!(cycles, vec![vec!["A", "B", "C"], vec!["A", "C"]]);
            }
            error => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn should_render_dependency_cycle() {
        let definitions = vec![node("A", &["B"]), node("B", &["A"])];

        let error = create_context(definitions, MapPropertySource::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Dependency cycles found:\n┌->A -> B -┐\n└----------┘"
        );
    }

    #[test]
    fn should_keep_definitions_with_matching_conditions() {
        let definitions = vec![
            SingletonDefinition::new(Identifier::named(type_ref("Storage"), "memory"), |_| {
                Ok(Instance::single(Leaf))
            })
            .with_condition(Condition::on_property("storage", "memory")),
            SingletonDefinition::new(Identifier::named(type_ref("Storage"), "disk"), |_| {
                Ok(Instance::single(Leaf))
            })
            .with_condition(Condition::on_property("storage", "disk")),
            node("Service", &["Storage"]),
        ];

        let context = create_context(
            definitions,
            MapPropertySource::default().with_property("storage", "disk"),
        )
        .unwrap();

        assert_eq!(context.size(), 2);
        assert!(context
            .find_instance(&type_ref("Storage"), Some("disk"))
            .unwrap()
            .is_some());
        assert!(context
            .find_instance(&type_ref("Storage"), Some("memory"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn should_drop_all_definitions_with_failing_conditions() {
        let definitions = vec![
            leaf("Storage").with_condition(Condition::on_property("storage", "memory")),
            leaf("Storage").with_condition(Condition::on_property("storage", "disk")),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert!(context.is_empty());
    }

    #[test]
    fn should_inject_implementations_of_interfaces() {
        let repository = BaseType::new("Repository");
        let user_repository = BaseType::new("UserRepository").with_supertype(repository.clone());

        let definitions = vec![
            SingletonDefinition::new(Identifier::new(user_repository.into()), |_| {
                Ok(Instance::single(Leaf))
            }),
            SingletonDefinition::new(Identifier::new(type_ref("Service")), |values| {
                Ok(Instance::single(Node {
                    children: vec![values.instance::<Leaf>(0)? as InstanceAnyPtr],
                }))
            })
            .with_dependency(Dependency::singular(repository.into(), None)),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(context.size(), 2);
    }

    #[test]
    fn should_not_inject_supertype_for_subtype() {
        let repository = BaseType::new("Repository");
        let user_repository = BaseType::new("UserRepository").with_supertype(repository.clone());

        let definitions = vec![
            SingletonDefinition::new(Identifier::new(repository.into()), |_| {
                Ok(Instance::single(Leaf))
            }),
            node("Service", &[]).with_dependency(Dependency::singular(user_repository.into(), None)),
        ];

        assert!(matches!(
            create_context(definitions, MapPropertySource::default()).unwrap_err(),
            ContextError::NoCandidatesFound { .. }
        ));
    }

    fn element(name: &str, value: u8) -> SingletonDefinition {
        SingletonDefinition::new(Identifier::named(type_ref("B"), name), move |_| {
            Ok(Instance::single(value))
        })
    }

    fn explicit_list(name: &str, values: [u8; 2]) -> SingletonDefinition {
        SingletonDefinition::new(
            Identifier::named(TypeReference::list_of(type_ref("B")), name),
            move |_| Ok(Instance::list(values)),
        )
    }

    fn list_consumer(name: Option<&str>, element_name: Option<&str>) -> SingletonDefinition {
        SingletonDefinition::new(Identifier::new(type_ref("Consumer")), |values| {
            Ok(Instance::single(
                values
                    .list::<u8>(0)?
                    .into_iter()
                    .map(|value| *value)
                    .collect::<Vec<_>>(),
            ))
        })
        .with_dependency(Dependency::list(
            type_ref("B"),
            name.map(str::to_string),
            element_name.map(str::to_string),
        ))
    }

    fn consumed(context: &Context) -> Vec<u8> {
        context
            .find_instance_typed::<Vec<u8>>(&type_ref("Consumer"), None)
            .unwrap()
            .map(|values| (*values).clone())
            .unwrap()
    }

    #[test]
    fn should_prefer_element_by_element_definitions() {
        let definitions = vec![
            element("b1", 1),
            explicit_list("explicit", [3, 4]),
            element("b2", 2),
            list_consumer(None, None),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(consumed(&context), vec![1, 2]);
    }

    #[test]
    fn should_select_elements_by_name() {
        let definitions = vec![
            element("b1", 1),
            explicit_list("explicit", [3, 4]),
            element("b2", 2),
            list_consumer(None, Some("b2")),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(consumed(&context), vec![2]);
    }

    #[test]
    fn should_select_explicit_list_by_name() {
        let definitions = vec![
            element("b1", 1),
            explicit_list("explicit", [3, 4]),
            explicit_list("other", [5, 6]),
            list_consumer(Some("explicit"), None),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert_eq!(consumed(&context), vec![3, 4]);
    }

    #[test]
    fn should_reject_multiple_explicit_lists() {
        let definitions = vec![
            explicit_list("first", [3, 4]),
            explicit_list("second", [5, 6]),
            list_consumer(None, None),
        ];

        assert!(matches!(
            create_context(definitions, MapPropertySource::default()).unwrap_err(),
            ContextError::MultipleCandidatesFound { .. }
        ));
    }

    #[test]
    fn should_resolve_empty_list_without_candidates() {
        let definitions = vec![list_consumer(None, None)];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        assert!(consumed(&context).is_empty());
    }

    #[test]
    fn should_query_lists_from_context() {
        let definitions = vec![
            element("b1", 1),
            explicit_list("explicit", [3, 4]),
            element("b2", 2),
        ];

        let context = create_context(definitions, MapPropertySource::default()).unwrap();
        let list = TypeReference::list_of(type_ref("B"));

        let values = |name: Option<&str>, element_name: Option<&str>| {
            context
                .find_list_typed::<u8>(&list, name, element_name)
                .unwrap()
                .into_iter()
                .map(|value| *value)
                .collect::<Vec<_>>()
        };

        assert_eq!(values(None, None), vec![1, 2]);
        assert_eq!(values(None, Some("b1")), vec![1]);
        assert_eq!(values(Some("explicit"), None), vec![3, 4]);
        assert!(values(Some("missing"), None).is_empty());
    }
}
