//! Core configuration types for beanwatch
//!
//! Describes which managed-bean attributes a monitoring agent should sample and
//! translates that description into the object name used by the management
//! protocol.
//!
//! Key properties:
//! - Object names are built deterministically, in parameter insertion order
//! - Assignments compare structurally, so reloaded configurations de-duplicate
//! - Name construction never fails loudly; bad targets resolve to `None`
//!
//! ```no_run
//! use beanwatch_core::JmxBeanAssignment;
//!
//! let assignment = JmxBeanAssignment::new("java.lang")
//!     .with_parameter("type", "GarbageCollector")
//!     .with_parameter("name", "PS Scavenge")
//!     .with_attribute("CollectionCount");
//!
//! match assignment.object_name() {
//!     Some(name) => println!("sampling {name}"),
//!     None => {} // Nothing to sample
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assignment;
pub mod errors;
pub mod object_name;

// Public API
pub use assignment::{jmx::ObjectNameParameters, JmxBeanAssignment, SensorAssignment, SensorCategory};
pub use errors::{AssignmentError, ObjectNameError, ObjectNameResult};
pub use object_name::ObjectName;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
