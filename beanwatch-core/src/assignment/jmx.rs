//! JMX Bean Assignment
//!
//! Declares one managed bean and the attributes to sample on it. The bean is
//! described by a domain and an ordered set of object name parameters; the
//! assignment turns them into an [`ObjectName`] on demand.
//!
//! ## Object Name Construction
//!
//! ```text
//! domain = "java.lang"
//! params = [("type", "GarbageCollector"), ("name", "PS Scavenge")]
//!
//!   => "java.lang:type=GarbageCollector,name=PS Scavenge"
//! ```
//!
//! Parameters are concatenated in insertion order and never re-sorted, since
//! the resulting string is compared against names written by hand in external
//! configuration. Values are not quoted; they must already be valid under the
//! object name grammar (use [`ObjectName::quote`] when building them).
//!
//! ## Equality
//!
//! Equality and hashing cover `domain`, `object_name_parameters` and
//! `attributes`. The parameter mapping compares as a set of pairs, so two
//! assignments can be equal while producing differently ordered name strings:
//!
//! ```rust
//! use beanwatch_core::JmxBeanAssignment;
//!
//! let ab = JmxBeanAssignment::new("d").with_parameter("a", "1").with_parameter("b", "2");
//! let ba = JmxBeanAssignment::new("d").with_parameter("b", "2").with_parameter("a", "1");
//!
//! assert_eq!(ab, ba);
//! assert_eq!(ab.object_name_string().as_deref(), Some("d:a=1,b=2"));
//! assert_eq!(ba.object_name_string().as_deref(), Some("d:b=2,a=1"));
//! ```
//!
//! ## Caching
//!
//! [`JmxBeanAssignment::object_name`] computes the name once and caches the
//! outcome, including a failed outcome. The cache is a [`OnceLock`], so many
//! sampling threads may read the same assignment. Every mutator resets it.

use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use indexmap::IndexMap;

use super::{SensorAssignment, SensorCategory};
use crate::errors::AssignmentError;
use crate::object_name::ObjectName;

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Ordered object name parameters
pub type ObjectNameParameters = IndexMap<String, String>;

/// Managed-bean assignment: one bean, many attributes
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct JmxBeanAssignment {
    /// Domain the bean belongs to
    domain: Option<String>,

    /// Key properties used to build the object name, in insertion order
    object_name_parameters: Option<ObjectNameParameters>,

    /// Attribute names to sample
    attributes: Option<BTreeSet<String>>,

    /// Memoised result of [`JmxBeanAssignment::construct_object_name`]
    #[cfg_attr(feature = "serde", serde(skip))]
    object_name: OnceLock<Option<ObjectName>>,
}

impl JmxBeanAssignment {
    /// Create an assignment for `domain` with no parameters or attributes
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            object_name_parameters: Some(ObjectNameParameters::new()),
            attributes: Some(BTreeSet::new()),
            object_name: OnceLock::new(),
        }
    }

    /// Append an object name parameter
    ///
    /// Re-inserting an existing key replaces its value but keeps its position.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.object_name_parameters
            .get_or_insert_with(ObjectNameParameters::new)
            .insert(key.into(), value.into());
        self.object_name = OnceLock::new();
        self
    }

    /// Add an attribute to sample
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeSet::new)
            .insert(attribute.into());
        self
    }

    /// Domain the bean belongs to
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Set the domain
    pub fn set_domain(&mut self, domain: impl Into<Option<String>>) {
        self.domain = domain.into();
        self.object_name = OnceLock::new();
    }

    /// Object name parameters in insertion order
    pub fn object_name_parameters(&self) -> Option<&ObjectNameParameters> {
        self.object_name_parameters.as_ref()
    }

    /// Replace the object name parameters
    pub fn set_object_name_parameters(
        &mut self,
        parameters: impl Into<Option<ObjectNameParameters>>,
    ) {
        self.object_name_parameters = parameters.into();
        self.object_name = OnceLock::new();
    }

    /// Attribute names to sample
    pub fn attributes(&self) -> Option<&BTreeSet<String>> {
        self.attributes.as_ref()
    }

    /// Replace the attribute names
    pub fn set_attributes(&mut self, attributes: impl Into<Option<BTreeSet<String>>>) {
        self.attributes = attributes.into();
    }

    /// Object name for this assignment, computed on first call
    ///
    /// Returns `None` when there are no parameters or when the concatenated
    /// name is malformed. The outcome is cached until the next mutation.
    pub fn object_name(&self) -> Option<&ObjectName> {
        self.object_name
            .get_or_init(|| self.construct_object_name())
            .as_ref()
    }

    /// Build the object name from the current fields, bypassing the cache
    ///
    /// Failures are logged and reported as `None`.
    pub fn construct_object_name(&self) -> Option<ObjectName> {
        match self.try_construct_object_name() {
            Ok(name) => Some(name),
            Err(AssignmentError::EmptyConfiguration) => {
                log_debug!(
                    "JMX bean assignment for domain {:?} has no object name parameters",
                    self.domain
                );
                None
            }
            Err(err) => {
                log_warn!("Ignoring JMX bean assignment: {}", err);
                None
            }
        }
    }

    /// Build the object name, reporting why it could not be built
    pub fn try_construct_object_name(&self) -> Result<ObjectName, AssignmentError> {
        let name = self
            .object_name_string()
            .ok_or(AssignmentError::EmptyConfiguration)?;

        ObjectName::parse(&name).map_err(|source| AssignmentError::malformed(name, source))
    }

    /// Candidate name text: `domain:k1=v1,k2=v2,...` in insertion order
    ///
    /// `None` when there are no parameters. An absent domain contributes an
    /// empty string.
    pub fn object_name_string(&self) -> Option<String> {
        let parameters = self
            .object_name_parameters
            .as_ref()
            .filter(|p| !p.is_empty())?;

        let mut name = String::from(self.domain.as_deref().unwrap_or_default());
        name.push(':');
        for (i, (key, value)) in parameters.iter().enumerate() {
            if i > 0 {
                name.push(',');
            }
            name.push_str(key);
            name.push('=');
            name.push_str(value);
        }
        Some(name)
    }
}

impl SensorAssignment for JmxBeanAssignment {
    const CATEGORY: SensorCategory = SensorCategory::JmxBean;
}

impl PartialEq for JmxBeanAssignment {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order
        self.domain == other.domain
            && self.object_name_parameters == other.object_name_parameters
            && self.attributes == other.attributes
    }
}

impl Eq for JmxBeanAssignment {}

impl Hash for JmxBeanAssignment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.hash(state);
        match &self.object_name_parameters {
            Some(parameters) => {
                state.write_u8(1);
                state.write_usize(parameters.len());
                state.write_u64(unordered_digest(parameters));
            }
            None => state.write_u8(0),
        }
        self.attributes.hash(state);
    }
}

/// Order-independent digest of the parameter pairs
fn unordered_digest(parameters: &ObjectNameParameters) -> u64 {
    parameters
        .iter()
        .map(|entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}
