//! Error Types for Object Name Parsing and Assignment Resolution
//!
//! ## Design Philosophy
//!
//! Beanwatch separates two kinds of failure:
//!
//! 1. **Grammar failures** ([`ObjectNameError`]): the text handed to the object
//!    name parser does not follow the management-name grammar. Each variant names
//!    the rule that was broken and carries enough context to point at the
//!    offending key or character.
//!
//! 2. **Assignment failures** ([`AssignmentError`]): an assignment could not be
//!    turned into an object name, either because it does not describe a target
//!    at all or because the target it describes is malformed.
//!
//! Assignment accessors such as
//! [`JmxBeanAssignment::object_name`](crate::assignment::JmxBeanAssignment::object_name)
//! never return these errors. They collapse both cases into `None` so that one
//! bad assignment does not fail a whole configuration load. Callers that need
//! to tell the cases apart use
//! [`JmxBeanAssignment::try_construct_object_name`](crate::assignment::JmxBeanAssignment::try_construct_object_name).
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use beanwatch_core::{AssignmentError, JmxBeanAssignment};
//!
//! let assignment = JmxBeanAssignment::new("java.lang").with_parameter("type", "Memory");
//!
//! match assignment.try_construct_object_name() {
//!     Ok(name) => assert_eq!(name.to_string(), "java.lang:type=Memory"),
//!     Err(AssignmentError::EmptyConfiguration) => {
//!         // Nothing to sample - skip the assignment
//!     }
//!     Err(AssignmentError::MalformedIdentifier { name, source }) => {
//!         // Report the bad target back to the user
//!         eprintln!("{name}: {source}");
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type for object name parsing
pub type ObjectNameResult<T> = Result<T, ObjectNameError>;

/// Violations of the object name grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectNameError {
    /// No `:` separating the domain from the key properties
    #[error("missing ':' between domain and key properties")]
    MissingDomainSeparator,

    /// Domain contains a character the grammar forbids
    #[error("invalid character {ch:?} in domain")]
    InvalidDomainCharacter {
        /// The offending character
        ch: char,
    },

    /// Nothing after the domain separator
    #[error("key property list is empty")]
    MissingKeyProperties,

    /// A key property with a zero-length key
    #[error("key property has an empty key")]
    EmptyKey,

    /// Key contains a character the grammar forbids
    #[error("invalid character {ch:?} in key {key:?}")]
    InvalidKeyCharacter {
        /// Key as written
        key: String,
        /// The offending character
        ch: char,
    },

    /// Key property without `=`
    #[error("key property {property:?} has no '='")]
    MissingEquals {
        /// Property text up to the next `,`
        property: String,
    },

    /// Unquoted value of zero length
    #[error("value for key {key:?} is empty")]
    EmptyValue {
        /// Key the value belongs to
        key: String,
    },

    /// Value contains a character the grammar forbids
    #[error("invalid character {ch:?} in value for key {key:?}")]
    InvalidValueCharacter {
        /// Key the value belongs to
        key: String,
        /// The offending character
        ch: char,
    },

    /// Quoted value without a closing quote
    #[error("unterminated quoted value for key {key:?}")]
    UnterminatedQuote {
        /// Key the value belongs to
        key: String,
    },

    /// Backslash followed by a character that cannot be escaped
    #[error("invalid escape sequence '\\{ch}' in value for key {key:?}")]
    InvalidEscape {
        /// Key the value belongs to
        key: String,
        /// Character following the backslash
        ch: char,
    },

    /// Characters between a closing quote and the next `,`
    #[error("unexpected characters after quoted value for key {key:?}")]
    TrailingCharacters {
        /// Key the value belongs to
        key: String,
    },

    /// Property list ends with `,`
    #[error("key property list ends with ','")]
    TrailingComma,

    /// More than one `*` entry in the property list
    #[error("key property list has more than one '*'")]
    RepeatedWildcard,

    /// Same key given twice
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),

    /// String passed to unquote is not a quoted value
    #[error("not a quoted value: {0:?}")]
    NotQuoted(String),
}

impl ObjectNameError {
    /// Create an invalid key character error
    pub fn invalid_key(key: impl Into<String>, ch: char) -> Self {
        Self::InvalidKeyCharacter {
            key: key.into(),
            ch,
        }
    }

    /// Create an invalid value character error
    pub fn invalid_value(key: impl Into<String>, ch: char) -> Self {
        Self::InvalidValueCharacter {
            key: key.into(),
            ch,
        }
    }
}

/// Reasons an assignment cannot produce an object name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// Parameter mapping is absent or has no entries
    #[error("assignment has no object name parameters")]
    EmptyConfiguration,

    /// Concatenated name was rejected by the object name grammar
    #[error("malformed object name {name:?}: {source}")]
    MalformedIdentifier {
        /// The concatenated candidate name
        name: String,
        /// Grammar rule that rejected it
        #[source]
        source: ObjectNameError,
    },
}

impl AssignmentError {
    /// Create a malformed identifier error
    pub fn malformed(name: impl Into<String>, source: ObjectNameError) -> Self {
        Self::MalformedIdentifier {
            name: name.into(),
            source,
        }
    }
}
