//! Declarative singleton definitions: what a singleton is, what it needs and how to build it.
//!
//! ```
//! use seedling_di::definition::{Dependency, Identifier, SingletonDefinition};
//! use seedling_di::instance::Instance;
//! use seedling_di::type_reference::TypeReference;
//!
//! struct Repository;
//!
//! struct Service {
//!     repository: seedling_di::instance::InstancePtr<Repository>,
//!     timeout: seedling_di::instance::InstancePtr<i64>,
//! }
//!
//! let repository = SingletonDefinition::new(
//!     Identifier::new(TypeReference::new("Repository")),
//!     |_| Ok(Instance::single(Repository)),
//! );
//!
//! let service = SingletonDefinition::new(Identifier::new(TypeReference::new("Service")), |values| {
//!     Ok(Instance::single(Service {
//!         repository: values.instance(0)?,
//!         timeout: values.property(1)?,
//!     }))
//! })
//! .with_dependency(Dependency::singular(TypeReference::new("Repository"), None))
//! .with_dependency(Dependency::property::<i64>("service.timeout", true));
//! ```

use crate::instance::{Instance, ProviderError, ResolvedValues};
use crate::property::{decode_property, FromProperty, PropertyDecoder, PropertySource};
use crate::type_reference::TypeReference;
use derivative::Derivative;
use std::fmt::{Display, Formatter};
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

/// Identifies a produced singleton by type and optional name. Identifiers don't need to be unique:
/// duplicates are multiple candidates of the same type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Identifier {
    pub type_ref: TypeReference,
    pub name: Option<String>,
}

impl Identifier {
    pub fn new(type_ref: TypeReference) -> Self {
        Self {
            type_ref,
            name: None,
        }
    }

    pub fn named<T: ToString>(type_ref: TypeReference, name: T) -> Self {
        Self {
            type_ref,
            name: Some(name.to_string()),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}(\"{name}\")", self.type_ref),
            None => write!(f, "{}", self.type_ref),
        }
    }
}

/// Registration condition. A definition is kept only if all its conditions hold.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Condition {
    /// True if the textual form of the property equals `having_value`.
    OnProperty {
        property: String,
        having_value: String,
    },
}

impl Condition {
    pub fn on_property<P: ToString, V: ToString>(property: P, having_value: V) -> Self {
        Self::OnProperty {
            property: property.to_string(),
            having_value: having_value.to_string(),
        }
    }

    pub fn matches(&self, properties: &dyn PropertySource) -> bool {
        match self {
            Self::OnProperty {
                property,
                having_value,
            } => properties
                .get_or_none(property)
                .map(|value| value.to_string() == *having_value)
                .unwrap_or(false),
        }
    }
}

/// Dependency on other singletons.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SingletonDependency {
    /// Exactly one singleton assignable to `type_ref`, optionally with given name.
    Singular {
        type_ref: TypeReference,
        name: Option<String>,
    },
    /// A list of singletons. `type_ref` is a `List<_>` type; `name` selects an explicit list
    /// singleton while `element_name` selects element-by-element singletons.
    List {
        type_ref: TypeReference,
        name: Option<String>,
        element_name: Option<String>,
    },
}

/// Dependency on an external property.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct PropertyDependency {
    pub key: String,

    #[derivative(Debug = "ignore")]
    pub decoder: PropertyDecoder,

    /// Missing required properties fail construction, while missing optional ones resolve to
    /// absence.
    pub required: bool,
}

/// A single input of an [InstanceProvider].
#[derive(Clone, Debug)]
pub enum Dependency {
    Singleton(SingletonDependency),
    Property(PropertyDependency),
}

impl Dependency {
    pub fn singular(type_ref: TypeReference, name: Option<String>) -> Self {
        Self::Singleton(SingletonDependency::Singular { type_ref, name })
    }

    /// Creates a list dependency for elements of type `element_type`.
    pub fn list(
        element_type: TypeReference,
        name: Option<String>,
        element_name: Option<String>,
    ) -> Self {
        Self::Singleton(SingletonDependency::List {
            type_ref: TypeReference::list_of(element_type),
            name,
            element_name,
        })
    }

    /// Creates a property dependency decoded as `T`.
    pub fn property<T: FromProperty>(key: &str, required: bool) -> Self {
        Self::Property(PropertyDependency {
            key: key.to_string(),
            decoder: decode_property::<T>,
            required,
        })
    }
}

#[cfg(not(feature = "threadsafe"))]
pub type InstanceProvider = Rc<dyn Fn(&ResolvedValues) -> Result<Instance, ProviderError>>;
#[cfg(feature = "threadsafe")]
pub type InstanceProvider =
    Arc<dyn Fn(&ResolvedValues) -> Result<Instance, ProviderError> + Send + Sync>;

/// Recipe for exactly one singleton instance.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct SingletonDefinition {
    pub identifier: Identifier,

    /// Inputs of the provider, in the order the provider receives them.
    pub dependencies: Vec<Dependency>,

    pub conditions: Vec<Condition>,

    /// Constructor receiving resolved dependency values. Called exactly once per constructed
    /// context.
    #[derivative(Debug = "ignore")]
    pub instance_provider: InstanceProvider,
}

impl SingletonDefinition {
    #[cfg(feature = "threadsafe")]
    pub fn new<F>(identifier: Identifier, instance_provider: F) -> Self
    where
        F: Fn(&ResolvedValues) -> Result<Instance, ProviderError> + Send + Sync + 'static,
    {
        Self {
            identifier,
            dependencies: vec![],
            conditions: vec![],
            instance_provider: Arc::new(instance_provider),
        }
    }

    #[cfg(not(feature = "threadsafe"))]
    pub fn new<F>(identifier: Identifier, instance_provider: F) -> Self
    where
        F: Fn(&ResolvedValues) -> Result<Instance, ProviderError> + 'static,
    {
        Self {
            identifier,
            dependencies: vec![],
            conditions: vec![],
            instance_provider: Rc::new(instance_provider),
        }
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Checks if all conditions hold for given properties.
    pub fn is_enabled(&self, properties: &dyn PropertySource) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(properties))
    }

    pub fn singleton_dependencies(&self) -> impl Iterator<Item = &SingletonDependency> {
        self.dependencies
            .iter()
            .filter_map(|dependency| match dependency {
                Dependency::Singleton(dependency) => Some(dependency),
                Dependency::Property(_) => None,
            })
    }
}
