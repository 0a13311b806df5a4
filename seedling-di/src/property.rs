//! Access to externally supplied configuration properties. The engine only ever queries a
//! [PropertySource] - to evaluate [conditions](crate::definition::Condition) and to resolve
//! [property dependencies](crate::definition::PropertyDependency).

use crate::error::PropertyError;
use crate::instance::{InstanceAnyPtr, InstancePtr};
use fxhash::FxHashMap;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<Property>),
}

impl Property {
    fn incompatible(&self, expected: &'static str) -> PropertyError {
        PropertyError::IncompatibleType {
            value: self.to_string(),
            expected,
        }
    }

    fn parse<T: FromStr>(&self, value: &str, expected: &'static str) -> Result<T, PropertyError> {
        value.trim().parse().map_err(|_| self.incompatible(expected))
    }

    /// Returns any scalar value in its textual form.
    pub fn as_string(&self) -> Result<String, PropertyError> {
        match self {
            Self::List(_) => Err(self.incompatible("string")),
            _ => Ok(self.to_string()),
        }
    }

    pub fn as_long(&self) -> Result<i64, PropertyError> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::String(value) => self.parse(value, "long"),
            _ => Err(self.incompatible("long")),
        }
    }

    pub fn as_int(&self) -> Result<i32, PropertyError> {
        self.as_long()
            .ok()
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| self.incompatible("int"))
    }

    pub fn as_double(&self) -> Result<f64, PropertyError> {
        match self {
            Self::Float(value) => Ok(*value),
            Self::Integer(value) => Ok(*value as f64),
            Self::String(value) => self.parse(value, "double"),
            _ => Err(self.incompatible("double")),
        }
    }

    pub fn as_float(&self) -> Result<f32, PropertyError> {
        self.as_double()
            .map(|value| value as f32)
            .map_err(|_| self.incompatible("float"))
    }

    pub fn as_boolean(&self) -> Result<bool, PropertyError> {
        match self {
            Self::Boolean(value) => Ok(*value),
            Self::String(value) => self.parse(value, "boolean"),
            _ => Err(self.incompatible("boolean")),
        }
    }

    pub fn as_list(&self) -> Result<&[Property], PropertyError> {
        match self {
            Self::List(values) => Ok(values),
            _ => Err(self.incompatible("list")),
        }
    }

    pub fn as_string_list(&self) -> Result<Vec<String>, PropertyError> {
        self.as_list()?.iter().map(Self::as_string).collect()
    }

    pub fn as_int_list(&self) -> Result<Vec<i32>, PropertyError> {
        self.as_list()?.iter().map(Self::as_int).collect()
    }

    pub fn as_long_list(&self) -> Result<Vec<i64>, PropertyError> {
        self.as_list()?.iter().map(Self::as_long).collect()
    }

    pub fn as_double_list(&self) -> Result<Vec<f64>, PropertyError> {
        self.as_list()?.iter().map(Self::as_double).collect()
    }

    pub fn as_float_list(&self) -> Result<Vec<f32>, PropertyError> {
        self.as_list()?.iter().map(Self::as_float).collect()
    }

    pub fn as_boolean_list(&self) -> Result<Vec<bool>, PropertyError> {
        self.as_list()?.iter().map(Self::as_boolean).collect()
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::List(values) => write!(f, "[{}]", values.iter().join(", ")),
        }
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Property>> From<Vec<T>> for Property {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Types which can be decoded from a [Property].
pub trait FromProperty: Sized + Send + Sync + 'static {
    fn from_property(property: &Property) -> Result<Self, PropertyError>;
}

macro_rules! impl_from_property {
    ($($ty:ty => $accessor:ident),* $(,)?) => {
        $(
            impl FromProperty for $ty {
                #[inline]
                fn from_property(property: &Property) -> Result<Self, PropertyError> {
                    property.$accessor()
                }
            }
        )*
    };
}

impl_from_property!(
    String => as_string,
    i32 => as_int,
    i64 => as_long,
    f64 => as_double,
    f32 => as_float,
    bool => as_boolean,
);

impl<T: FromProperty> FromProperty for Vec<T> {
    fn from_property(property: &Property) -> Result<Self, PropertyError> {
        property.as_list()?.iter().map(T::from_property).collect()
    }
}

/// Type-erased decoder turning a [Property] into a value handed to an instance provider.
pub type PropertyDecoder = fn(property: &Property) -> Result<InstanceAnyPtr, PropertyError>;

/// Decodes a property into `T`.
pub fn decode_property<T: FromProperty>(property: &Property) -> Result<InstanceAnyPtr, PropertyError> {
    T::from_property(property).map(|value| InstancePtr::new(value) as InstanceAnyPtr)
}

/// Externally supplied property store.
#[cfg_attr(test, automock)]
pub trait PropertySource {
    /// Returns the property with given key, failing if it's absent.
    fn get(&self, key: &str) -> Result<Property, PropertyError> {
        self.get_or_none(key)
            .ok_or_else(|| PropertyError::NotFound(key.to_string()))
    }

    /// Returns the property with given key, if present.
    fn get_or_none(&self, key: &str) -> Option<Property>;
}

/// In-memory [PropertySource].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapPropertySource {
    properties: FxHashMap<String, Property>,
}

impl MapPropertySource {
    pub fn with_property<K: ToString, V: Into<Property>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: ToString, V: Into<Property>>(&mut self, key: K, value: V) {
        self.properties.insert(key.to_string(), value.into());
    }
}

impl PropertySource for MapPropertySource {
    #[inline]
    fn get_or_none(&self, key: &str) -> Option<Property> {
        self.properties.get(key).cloned()
    }
}

impl<K: ToString, V: Into<Property>> FromIterator<(K, V)> for MapPropertySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect(),
        }
    }
}
