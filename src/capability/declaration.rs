//! Capability declaration — a named set of required operation signatures.
//!
//! A declaration is the unit a type claims and a conformance check verifies.
//! Identity is the capability name; the operation set is the structural
//! contract. Declarations are immutable once built and may be loaded from
//! YAML files in addition to being constructed in code.

use serde::{Deserialize, Serialize};

use crate::errors::CapabilityError;
use crate::subject::Subject;

/// One required operation: a name and a positional parameter count.
///
/// Conformance matches on name and exact arity. Return types and behavior are
/// deliberately out of scope; the check is structural, not semantic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSig {
    /// Operation name.
    pub name: String,

    /// Number of positional arguments (not counting the receiver).
    #[serde(default)]
    pub arity: usize,
}

impl OperationSig {
    /// Create an operation signature.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

/// A capability: a named, immutable set of required operations.
///
/// Example YAML:
/// ```yaml
/// trait:
///   name: Drivable
///   operations:
///     - name: drive
///       arity: 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDecl {
    /// Capability name — the declaration's identity.
    pub name: String,

    /// Required operation signatures. Names are unique within the set.
    #[serde(default)]
    pub operations: Vec<OperationSig>,
}

/// Two declarations are the same capability iff their names match.
impl PartialEq for CapabilityDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CapabilityDecl {}

impl CapabilityDecl {
    /// Build a declaration, rejecting duplicate operation names.
    pub fn new(
        name: impl Into<String>,
        operations: Vec<OperationSig>,
    ) -> Result<Self, CapabilityError> {
        let decl = Self {
            name: name.into(),
            operations,
        };
        decl.validate()?;
        Ok(decl)
    }

    /// Parse a declaration from a YAML string (nested under a `trait:` key).
    pub fn from_yaml(yaml: &str) -> Result<Self, CapabilityError> {
        let wrapper: TraitWrapper = serde_yaml::from_str(yaml)?;
        wrapper.r#trait.validate()?;
        Ok(wrapper.r#trait)
    }

    /// Parse a declaration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, CapabilityError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Structural conformance: does the candidate expose every required
    /// operation with matching arity?
    ///
    /// Pure and infallible. A candidate with extra operations still conforms;
    /// a candidate missing any single required operation does not.
    pub fn conforms(&self, candidate: &dyn Subject) -> bool {
        let surface = candidate.operations();
        self.operations.iter().all(|required| {
            surface
                .iter()
                .any(|op| op.name == required.name && op.arity == required.arity)
        })
    }

    /// All required operation names.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name.as_str()).collect()
    }

    pub(crate) fn validate(&self) -> Result<(), CapabilityError> {
        for (i, op) in self.operations.iter().enumerate() {
            if self.operations[..i].iter().any(|prev| prev.name == op.name) {
                return Err(CapabilityError::DuplicateOperation {
                    capability: self.name.clone(),
                    operation: op.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Wrapper for YAML deserialization (declaration is nested under `trait:`).
#[derive(Debug, Deserialize)]
struct TraitWrapper {
    r#trait: CapabilityDecl,
}
