//! Error types for the capability system.

use thiserror::Error;

/// Errors raised by capability declaration, binding, verification, and dispatch.
///
/// The only error reachable from a well-formed, honestly-claimed program is
/// [`CapabilityError::Violation`], and only at construction or assertion time.
/// Conditional dispatch (`if_implements`) never errors; it is the designed
/// alternative to catching `Violation`.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// A declared or asserted capability is not structurally satisfied.
    #[error("{type_name} does not implement required capability: {capability}")]
    Violation {
        /// Type name of the offending subject.
        type_name: String,
        /// Name of the capability that failed its conformance check.
        capability: String,
    },

    /// A claim list was already bound to this type; re-binding is forbidden.
    #[error("claim list already bound for type: {type_name}")]
    ClaimAlreadyBound { type_name: String },

    /// A capability declaration listed the same operation name twice.
    #[error("capability {capability} declares duplicate operation: {operation}")]
    DuplicateOperation {
        capability: String,
        operation: String,
    },

    /// A dynamic invocation named an operation the subject does not expose.
    #[error("{type_name} has no operation: {operation}")]
    UnknownOperation {
        type_name: String,
        operation: String,
    },

    /// A capability declaration file failed to parse.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// A capability declaration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
