//! Defines the error types for the validation module.

/// The specific category of a validation error.
//
// Programmatic inspection beats string matching on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorType {
    /// An input link referencing a node that is not in the loaded set.
    DanglingInputRef,
    /// A node listing itself among its inputs.
    SelfReference,
    /// The same year appearing more than once within one series.
    DuplicateYear,
    /// A metric with neither historical nor forecast points.
    EmptyMetric,
}

/// A structured defect report. Validation collects these; it never aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The id of the node where the defect was detected.
    pub node_id: String,
    pub error_type: ValidationErrorType,
    /// A human-readable message explaining the defect.
    pub message: String,
}
