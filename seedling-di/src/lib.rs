//! Dependency injection resolution engine. Given a set of declarative
//! [singleton definitions](definition::SingletonDefinition), it determines a valid construction
//! order, instantiates every singleton exactly once and answers later lookups by type and optional
//! name.
//!
//! ```
//! use seedling_di::definition::{Dependency, Identifier, SingletonDefinition};
//! use seedling_di::factory::{ContextFactory, DefinitionSourcePtr, PropertySourcePtr};
//! use seedling_di::instance::{Instance, InstancePtr};
//! use seedling_di::property::MapPropertySource;
//! use seedling_di::type_reference::{BaseType, TypeReference};
//!
//! struct Greeter {
//!     greeting: InstancePtr<String>,
//! }
//!
//! let greeter = BaseType::new("Greeter");
//! let definitions = vec![SingletonDefinition::new(Identifier::new(greeter.clone().into()), |values| {
//!     Ok(Instance::single(Greeter {
//!         greeting: values.property(0)?,
//!     }))
//! })
//! .with_dependency(Dependency::property::<String>("greeting", true))];
//!
//! let factory = ContextFactory::new(
//!     Box::new(definitions) as DefinitionSourcePtr,
//!     Box::new(MapPropertySource::default().with_property("greeting", "hello")) as PropertySourcePtr,
//! );
//!
//! let context = factory.create_context().unwrap();
//! let greeter = context
//!     .find_instance_typed::<Greeter>(&greeter.into(), None)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(*greeter.greeting, "hello");
//! ```
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers and `Send + Sync` trait bounds (default)

pub mod context;
pub mod definition;
pub mod definition_source;
mod error;
pub mod factory;
pub mod graph;
pub mod instance;
pub mod matcher;
pub mod property;
pub mod resolution_graph;
pub mod type_reference;

pub use error::{ContextError, GraphError, PropertyError, ResolvedValueError};
pub use inventory::submit;
