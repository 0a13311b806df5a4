//! Sources of [SingletonDefinition]s. Definitions are supplied once, up front, when creating a
//! [Context](crate::context::Context).
//!
//! Definitions can be registered statically, at link time, and later collected by a
//! [StaticDefinitionSource]:
//!
//! ```
//! use seedling_di::definition::{Identifier, SingletonDefinition};
//! use seedling_di::definition_source::{DefinitionRegisterer, DefinitionSource, StaticDefinitionSource};
//! use seedling_di::instance::Instance;
//! use seedling_di::submit;
//! use seedling_di::type_reference::TypeReference;
//!
//! fn clock() -> SingletonDefinition {
//!     SingletonDefinition::new(Identifier::new(TypeReference::new("Clock")), |_| {
//!         Ok(Instance::single(42u64))
//!     })
//! }
//!
//! submit! {
//!     DefinitionRegisterer { register: clock }
//! }
//!
//! # fn main() {
//! assert!(!StaticDefinitionSource.definitions().is_empty());
//! # }
//! ```

use crate::definition::SingletonDefinition;
#[cfg(test)]
use mockall::automock;

/// Supplies the complete list of definitions.
#[cfg_attr(test, automock)]
pub trait DefinitionSource {
    fn definitions(&self) -> Vec<SingletonDefinition>;
}

impl DefinitionSource for Vec<SingletonDefinition> {
    #[inline]
    fn definitions(&self) -> Vec<SingletonDefinition> {
        self.clone()
    }
}

/// Static registration entry, submitted with [submit](crate::submit).
pub struct DefinitionRegisterer {
    pub register: fn() -> SingletonDefinition,
}

inventory::collect!(DefinitionRegisterer);

/// Collects all statically registered definitions, in registration order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StaticDefinitionSource;

impl DefinitionSource for StaticDefinitionSource {
    fn definitions(&self) -> Vec<SingletonDefinition> {
        inventory::iter::<DefinitionRegisterer>
            .into_iter()
            .map(|registerer| (registerer.register)())
            .collect()
    }
}
