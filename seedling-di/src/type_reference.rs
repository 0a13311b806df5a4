//! Generic-aware type descriptors. A [TypeReference] is built by hand as a tree of named types and
//! their type arguments, so matching never depends on runtime reflection:
//!
//! ```
//! use seedling_di::type_reference::{BaseType, TypeReference};
//!
//! let repository = BaseType::new("Repository");
//! let user_repository = BaseType::new("UserRepository").with_supertype(repository.clone());
//!
//! assert!(TypeReference::from(repository).is_assignable_from(&user_repository.into()));
//! ```

use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Name of the built-in ordered sequence type.
pub const LIST_TYPE_NAME: &str = "List";

/// A named type together with all its direct supertypes (classes or implemented interfaces).
/// Subtyping is transitive through supertypes.
#[derive(Clone, Debug)]
pub struct BaseType {
    name: String,
    supertypes: Vec<BaseType>,
}

impl BaseType {
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            supertypes: vec![],
        }
    }

    /// Adds a direct supertype.
    pub fn with_supertype(mut self, supertype: BaseType) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn supertypes(&self) -> &[BaseType] {
        &self.supertypes
    }

    /// Checks if this type is `name` or any of its direct or transitive subtypes.
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.name == name
            || self
                .supertypes
                .iter()
                .any(|supertype| supertype.is_subtype_of(name))
    }
}

impl PartialEq for BaseType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BaseType {}

impl Hash for BaseType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Reified type: base type, ordered generic arguments and a nullability flag. Nullability does
/// not take part in matching nor equality.
#[derive(Clone, Debug)]
pub struct TypeReference {
    base: BaseType,
    arguments: Vec<TypeReference>,
    nullable: bool,
}

impl TypeReference {
    /// Creates a non-generic reference to a type without supertypes.
    pub fn new<T: ToString>(name: T) -> Self {
        BaseType::new(name).into()
    }

    /// Creates a `List<element>` reference.
    pub fn list_of(element: TypeReference) -> Self {
        Self::new(LIST_TYPE_NAME).with_arguments([element])
    }

    pub fn with_arguments<I: IntoIterator<Item = TypeReference>>(mut self, arguments: I) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[inline]
    pub fn base(&self) -> &BaseType {
        &self.base
    }

    #[inline]
    pub fn arguments(&self) -> &[TypeReference] {
        &self.arguments
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        self.base.name == LIST_TYPE_NAME
    }

    /// Returns the element type of a list reference.
    pub fn element_type(&self) -> Option<&TypeReference> {
        if !self.is_list() {
            return None;
        }

        match self.arguments.as_slice() {
            [element] => Some(element),
            _ => None,
        }
    }

    /// Checks if a value of type `other` can be used where this type is expected. The base type of
    /// `other` must be the same or a subtype, and every type argument must be covariantly
    /// assignable.
    pub fn is_assignable_from(&self, other: &TypeReference) -> bool {
        other.base.is_subtype_of(&self.base.name)
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(argument, other_argument)| argument.is_assignable_from(other_argument))
    }
}

impl From<BaseType> for TypeReference {
    fn from(base: BaseType) -> Self {
        Self {
            base,
            arguments: vec![],
            nullable: false,
        }
    }
}

impl PartialEq for TypeReference {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.arguments == other.arguments
    }
}

impl Eq for TypeReference {}

impl Hash for TypeReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.arguments.hash(state);
    }
}

impl Display for TypeReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base.name)?;

        if !self.arguments.is_empty() {
            write!(f, "<{}>", self.arguments.iter().join(", "))?;
        }

        if self.nullable {
            write!(f, "?")?;
        }

        Ok(())
    }
}
