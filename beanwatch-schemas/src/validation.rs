//! Assignment Validation
//!
//! This module inspects a loaded [`JmxBeanAssignment`] and reports every
//! problem it finds instead of collapsing them into a missing object name.
//! It is the diagnostics side of
//! [`JmxBeanAssignment::object_name`], which only answers "usable or not".

use beanwatch_core::{AssignmentError, JmxBeanAssignment};

/// Validator for JMX bean assignments
#[derive(Debug, Clone, Default)]
pub struct AssignmentValidator {
    /// Promote warnings to errors
    strict: bool,
}

impl AssignmentValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat every warning as an error
    pub fn treat_warnings_as_errors(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Validate an assignment and collect all issues
    pub fn validate(&self, assignment: &JmxBeanAssignment) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_domain(assignment, &mut report);
        self.validate_object_name(assignment, &mut report);
        self.validate_attributes(assignment, &mut report);

        report
    }

    /// Domain must be present and non-empty
    fn validate_domain(&self, assignment: &JmxBeanAssignment, report: &mut ValidationReport) {
        if assignment.domain().map_or(true, str::is_empty) {
            report.add_error(ValidationIssue {
                issue_type: IssueType::MissingField,
                field: Some("domain".to_string()),
                message: "Domain is missing or empty".to_string(),
                severity: Severity::Error,
            });
        }
    }

    /// Parameters must build a well-formed, concrete object name
    fn validate_object_name(&self, assignment: &JmxBeanAssignment, report: &mut ValidationReport) {
        match assignment.try_construct_object_name() {
            Ok(name) if name.is_pattern() => {
                self.warn(
                    report,
                    ValidationIssue {
                        issue_type: IssueType::PatternName,
                        field: Some("object-name-parameters".to_string()),
                        message: format!("Object name {} is a pattern", name),
                        severity: Severity::Warning,
                    },
                );
            }
            Ok(name) => {
                report.add_info(ValidationIssue {
                    issue_type: IssueType::Resolved,
                    field: None,
                    message: format!("Resolves to {}", name),
                    severity: Severity::Info,
                });
            }
            Err(AssignmentError::EmptyConfiguration) => {
                report.add_error(ValidationIssue {
                    issue_type: IssueType::EmptyConfiguration,
                    field: Some("object-name-parameters".to_string()),
                    message: "No object name parameters given".to_string(),
                    severity: Severity::Error,
                });
            }
            Err(err @ AssignmentError::MalformedIdentifier { .. }) => {
                report.add_error(ValidationIssue {
                    issue_type: IssueType::MalformedIdentifier,
                    field: Some("object-name-parameters".to_string()),
                    message: err.to_string(),
                    severity: Severity::Error,
                });
            }
        }
    }

    /// At least one attribute, none blank
    fn validate_attributes(&self, assignment: &JmxBeanAssignment, report: &mut ValidationReport) {
        let attributes = match assignment.attributes() {
            Some(attributes) if !attributes.is_empty() => attributes,
            _ => {
                self.warn(
                    report,
                    ValidationIssue {
                        issue_type: IssueType::NoAttributes,
                        field: Some("attributes".to_string()),
                        message: "No attributes to sample".to_string(),
                        severity: Severity::Warning,
                    },
                );
                return;
            }
        };

        if attributes.iter().any(|a| a.trim().is_empty()) {
            report.add_error(ValidationIssue {
                issue_type: IssueType::BlankAttribute,
                field: Some("attributes".to_string()),
                message: "Attribute name is blank".to_string(),
                severity: Severity::Error,
            });
        }
    }

    fn warn(&self, report: &mut ValidationReport, mut issue: ValidationIssue) {
        if self.strict {
            issue.severity = Severity::Error;
            report.add_error(issue);
        } else {
            report.add_warning(issue);
        }
    }
}

/// Validation report containing all issues found
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Validation errors (must be fixed)
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (should be reviewed)
    pub warnings: Vec<ValidationIssue>,

    /// Informational messages
    pub info: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// Add a warning
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Add info
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Get total issue count
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    /// True if any error or warning has the given type
    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|i| i.issue_type == issue_type)
    }
}

/// Individual validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Type of issue
    pub issue_type: IssueType,

    /// Field that caused the issue (if applicable)
    pub field: Option<String>,

    /// Human-readable message
    pub message: String,

    /// Issue severity
    pub severity: Severity,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    /// Required field is missing
    MissingField,

    /// No object name parameters
    EmptyConfiguration,

    /// Parameters do not form a valid object name
    MalformedIdentifier,

    /// Object name contains wildcards
    PatternName,

    /// Nothing to sample
    NoAttributes,

    /// Attribute name is empty or whitespace
    BlankAttribute,

    /// Object name resolved successfully
    Resolved,
}

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational only
    Info,

    /// Should be reviewed
    Warning,

    /// Must be fixed
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_assignment() {
        let assignment = JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "Memory")
            .with_attribute("HeapMemoryUsage");

        let report = AssignmentValidator::new().validate(&assignment);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.info.len(), 1);
        assert!(report.info[0].message.contains("java.lang:type=Memory"));
    }

    #[test]
    fn detect_empty_configuration() {
        let assignment = JmxBeanAssignment::new("x").with_attribute("Count");

        let report = AssignmentValidator::new().validate(&assignment);
        assert!(!report.is_valid());
        assert!(report.has_issue(IssueType::EmptyConfiguration));
        assert!(!report.has_issue(IssueType::MalformedIdentifier));
    }

    #[test]
    fn detect_malformed_identifier() {
        let assignment = JmxBeanAssignment::new("x")
            .with_parameter("", "")
            .with_attribute("Count");

        let report = AssignmentValidator::new().validate(&assignment);
        assert!(report.has_issue(IssueType::MalformedIdentifier));
        assert!(report.errors.iter().any(|e| e.message.contains("x:=")));
    }

    #[test]
    fn detect_missing_domain_and_attributes() {
        let report = AssignmentValidator::new().validate(&JmxBeanAssignment::default());
        assert!(report.has_issue(IssueType::MissingField));
        assert!(report.has_issue(IssueType::EmptyConfiguration));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.issue_type == IssueType::NoAttributes));
    }

    #[test]
    fn pattern_names_warn() {
        let assignment = JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "GarbageCollector")
            .with_parameter("name", "*")
            .with_attribute("CollectionCount");

        let report = AssignmentValidator::new().validate(&assignment);
        assert!(report.is_valid());
        assert!(report.has_issue(IssueType::PatternName));

        let strict = AssignmentValidator::new()
            .treat_warnings_as_errors()
            .validate(&assignment);
        assert!(!strict.is_valid());
        assert_eq!(strict.errors[0].severity, Severity::Error);
    }

    #[test]
    fn detect_blank_attribute() {
        let assignment = JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "Memory")
            .with_attribute("  ");

        let report = AssignmentValidator::new().validate(&assignment);
        assert!(report.has_issue(IssueType::BlankAttribute));
        assert_eq!(report.total_issues(), 2);
    }
}
