//! Error types for the XML binding.

use thiserror::Error;

/// Errors that can occur while reading or writing assignment documents.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed XML or a failure reported by the XML reader/writer.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute: {attribute} on {element}")]
    MissingAttribute {
        /// The missing attribute name.
        attribute: &'static str,
        /// The element that should have the attribute.
        element: String,
    },

    /// Element where only text is allowed, or an unexpected root.
    #[error("unexpected element <{element}> in {context}")]
    UnexpectedElement {
        /// The element found.
        element: String,
        /// Where it was found.
        context: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Create an unexpected element error.
    pub fn unexpected_element(element: impl Into<String>, context: &'static str) -> Self {
        Self::UnexpectedElement {
            element: element.into(),
            context,
        }
    }
}

/// Result type for XML binding operations.
pub type Result<T> = std::result::Result<T, XmlError>;
