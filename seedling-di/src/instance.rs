//! Pointer types for singleton instances and the values handed to
//! [InstanceProvider](crate::definition::InstanceProvider)s.

use crate::error::ResolvedValueError;
use std::any::{type_name, Any};
use std::error::Error;
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type InstancePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type InstancePtr<T> = Arc<T>;

#[cfg(not(feature = "threadsafe"))]
pub type InstanceAnyPtr = InstancePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type InstanceAnyPtr = InstancePtr<dyn Any + Send + Sync + 'static>;

#[cfg(not(feature = "threadsafe"))]
pub type ErrorPtr = InstancePtr<dyn Error + 'static>;
#[cfg(feature = "threadsafe")]
pub type ErrorPtr = InstancePtr<dyn Error + Send + Sync + 'static>;

/// Error returned by instance providers. Any error type converts into it with `?`.
#[cfg(not(feature = "threadsafe"))]
pub type ProviderError = Box<dyn Error + 'static>;
#[cfg(feature = "threadsafe")]
pub type ProviderError = Box<dyn Error + Send + Sync + 'static>;

/// Marker for types which can be stored as singleton instances.
#[cfg(not(feature = "threadsafe"))]
pub trait Injectable: Any {}
#[cfg(feature = "threadsafe")]
pub trait Injectable: Any + Send + Sync {}

#[cfg(not(feature = "threadsafe"))]
impl<T: Any> Injectable for T {}
#[cfg(feature = "threadsafe")]
impl<T: Any + Send + Sync> Injectable for T {}

/// Value produced by a singleton definition. Definitions identified by a list type produce
/// [Instance::List], all others produce [Instance::Single].
#[derive(Clone, Debug)]
pub enum Instance {
    Single(InstanceAnyPtr),
    List(Vec<InstanceAnyPtr>),
}

impl Instance {
    pub fn single<T: Injectable>(value: T) -> Self {
        Self::Single(InstancePtr::new(value) as InstanceAnyPtr)
    }

    pub fn list<T: Injectable, I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::List(
            values
                .into_iter()
                .map(|value| InstancePtr::new(value) as InstanceAnyPtr)
                .collect(),
        )
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the instance itself or the list elements.
    pub fn to_elements(&self) -> Vec<InstanceAnyPtr> {
        match self {
            Self::Single(instance) => vec![instance.clone()],
            Self::List(instances) => instances.clone(),
        }
    }
}

impl From<Instance> for ResolvedValue {
    fn from(instance: Instance) -> Self {
        match instance {
            Instance::Single(instance) => Self::Instance(instance),
            Instance::List(instances) => Self::List(instances),
        }
    }
}

/// Downcasts a type-erased instance to a concrete type, giving the original pointer back on
/// failure.
pub fn downcast<T: Injectable>(
    instance: InstanceAnyPtr,
) -> Result<InstancePtr<T>, InstanceAnyPtr> {
    instance.downcast::<T>()
}

/// A single resolved dependency value.
#[derive(Clone, Debug)]
pub enum ResolvedValue {
    Instance(InstanceAnyPtr),
    List(Vec<InstanceAnyPtr>),
    /// Decoded property, or `None` for an absent optional property.
    Property(Option<InstanceAnyPtr>),
}

/// Resolved dependency values, positionally matching the dependencies of the definition being
/// instantiated.
#[derive(Clone, Debug, Default)]
pub struct ResolvedValues {
    values: Vec<ResolvedValue>,
}

impl ResolvedValues {
    pub fn new(values: Vec<ResolvedValue>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ResolvedValue> {
        self.values.get(index)
    }

    /// Returns the singular instance at given position.
    pub fn instance<T: Injectable>(
        &self,
        index: usize,
    ) -> Result<InstancePtr<T>, ResolvedValueError> {
        match self.values.get(index) {
            Some(ResolvedValue::Instance(instance)) => cast(index, instance.clone()),
            _ => Err(ResolvedValueError::IncompatibleValue {
                index,
                expected: type_name::<T>(),
            }),
        }
    }

    /// Returns all list elements at given position, each cast to `T`.
    pub fn list<T: Injectable>(
        &self,
        index: usize,
    ) -> Result<Vec<InstancePtr<T>>, ResolvedValueError> {
        match self.values.get(index) {
            Some(ResolvedValue::List(instances)) => instances
                .iter()
                .map(|instance| cast(index, instance.clone()))
                .collect(),
            _ => Err(ResolvedValueError::IncompatibleValue {
                index,
                expected: type_name::<T>(),
            }),
        }
    }

    /// Returns a required property value.
    pub fn property<T: Injectable>(
        &self,
        index: usize,
    ) -> Result<InstancePtr<T>, ResolvedValueError> {
        self.optional_property(index)?
            .ok_or(ResolvedValueError::MissingProperty(index))
    }

    /// Returns an optional property value.
    pub fn optional_property<T: Injectable>(
        &self,
        index: usize,
    ) -> Result<Option<InstancePtr<T>>, ResolvedValueError> {
        match self.values.get(index) {
            Some(ResolvedValue::Property(value)) => value
                .as_ref()
                .map(|value| cast(index, value.clone()))
                .transpose(),
            _ => Err(ResolvedValueError::IncompatibleValue {
                index,
                expected: type_name::<T>(),
            }),
        }
    }
}

fn cast<T: Injectable>(
    index: usize,
    instance: InstanceAnyPtr,
) -> Result<InstancePtr<T>, ResolvedValueError> {
    downcast::<T>(instance).map_err(|_| ResolvedValueError::IncompatibleValue {
        index,
        expected: type_name::<T>(),
    })
}
