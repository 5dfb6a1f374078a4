//! XML Binding and Validation for JMX Bean Assignments
//!
//! ## Overview
//!
//! Assignments are authored and stored as XML documents, one
//! `<jmx-bean-assignment>` per document. This crate loads those documents into
//! [`JmxBeanAssignment`] values, writes them back, and validates them with a
//! report that explains *why* an assignment will not resolve to an object name.
//!
//! ## Document Shape
//!
//! ```xml
//! <jmx-bean-assignment domain="java.lang">
//!   <object-name-parameters>
//!     <entry><key>type</key><value>GarbageCollector</value></entry>
//!     <entry><key>name</key><value>PS Scavenge</value></entry>
//!   </object-name-parameters>
//!   <attributes>
//!     <item>CollectionCount</item>
//!     <item>CollectionTime</item>
//!   </attributes>
//! </jmx-bean-assignment>
//! ```
//!
//! - `domain` is a required attribute
//! - both wrapper elements are required, but may be empty
//! - entry order is the order of the object name key properties
//! - the cached object name is derived state and never written
//!
//! ## Why a Separate Validator?
//!
//! [`JmxBeanAssignment::object_name`] deliberately answers with `None` for
//! both "no target" and "bad target", so that one broken assignment never
//! stops a configuration from loading. Operators still need to know which of
//! the two happened. [`AssignmentValidator`] produces that answer as a
//! [`ValidationReport`].
//!
//! ## Usage Example
//!
//! ```rust
//! use beanwatch_schemas::{from_xml_str, to_xml_string, AssignmentValidator};
//!
//! let xml = r#"<jmx-bean-assignment domain="java.lang">
//!   <object-name-parameters>
//!     <entry><key>type</key><value>Memory</value></entry>
//!   </object-name-parameters>
//!   <attributes><item>HeapMemoryUsage</item></attributes>
//! </jmx-bean-assignment>"#;
//!
//! let assignment = from_xml_str(xml)?;
//! assert_eq!(
//!     assignment.object_name().map(|n| n.to_string()).as_deref(),
//!     Some("java.lang:type=Memory")
//! );
//!
//! let report = AssignmentValidator::new().validate(&assignment);
//! assert!(report.is_valid());
//!
//! let written = to_xml_string(&assignment)?;
//! assert_eq!(from_xml_str(&written)?, assignment);
//! # Ok::<(), beanwatch_schemas::XmlError>(())
//! ```

pub mod errors;
pub mod validation;
pub mod xml;

pub use beanwatch_core::JmxBeanAssignment;
pub use errors::XmlError;
pub use validation::{AssignmentValidator, IssueType, Severity, ValidationIssue, ValidationReport};
pub use xml::{from_reader, from_xml_str, load_from_path, to_xml_string, write_xml};
