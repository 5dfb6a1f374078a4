//! Sensor Assignments
//!
//! An assignment tells the agent *what* to observe and which kind of sensor
//! observes it. The set of sensor kinds is closed, so the kind is a plain enum
//! ([`SensorCategory`]) and every assignment type advertises its kind through
//! the [`SensorAssignment`] trait at the type level.
//!
//! ```rust
//! use beanwatch_core::{JmxBeanAssignment, SensorAssignment, SensorCategory};
//!
//! assert_eq!(JmxBeanAssignment::CATEGORY, SensorCategory::JmxBean);
//!
//! let assignment = JmxBeanAssignment::new("java.lang");
//! assert_eq!(assignment.sensor_category(), SensorCategory::JmxBean);
//! ```

use core::fmt;

pub mod jmx;

pub use jmx::JmxBeanAssignment;

/// Kind of sensor an assignment configures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SensorCategory {
    /// Method invocation sensors (timers, invocation sequences)
    Method,

    /// Exception tracing sensor
    Exception,

    /// Managed-bean attribute sampling
    JmxBean,
}

impl SensorCategory {
    /// All categories, in declaration order
    pub const ALL: [SensorCategory; 3] = [Self::Method, Self::Exception, Self::JmxBean];

    /// Stable name used in logs and serialized forms
    pub const fn name(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Exception => "exception",
            Self::JmxBean => "jmx-bean",
        }
    }
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability shared by every assignment type: the sensor category it targets
pub trait SensorAssignment {
    /// Category this assignment type configures
    const CATEGORY: SensorCategory;

    /// Category of this assignment
    fn sensor_category(&self) -> SensorCategory {
        Self::CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_distinct() {
        let mut names: Vec<_> = SensorCategory::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SensorCategory::ALL.len());
        assert_eq!(SensorCategory::JmxBean.to_string(), "jmx-bean");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn category_serializes_by_name() {
        for category in SensorCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
