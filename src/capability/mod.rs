//! # Capability declarations and claim binding
//!
//! A capability is a named set of required operation signatures. Types claim
//! capabilities by binding an ordered claim list; the claim is pure metadata
//! until a `Verified` instance is constructed, at which point every claimed
//! capability is structurally checked against the object's operation surface.
//!
//! ## Flow
//!
//! 1. Declare capabilities (in code, or from YAML):
//!
//! ```yaml
//! trait:
//!   name: Drivable
//!   operations:
//!     - name: drive
//!       arity: 0
//! ```
//!
//! 2. `bind_implementation::<GasCar>([drivable, refuelable])` records the claim.
//! 3. `Verified::new(GasCar)` checks each claimed capability's conformance and
//!    fails construction on the first violation.
//! 4. `verified.implements(...)` / `verified.if_implements(...)` query the
//!    frozen claim list; absent capabilities dispatch to the no-op stand-in.

pub mod declaration;
pub mod registry;

pub use declaration::{CapabilityDecl, OperationSig};
pub use registry::{
    bind_implementation, claimed, declare_trait, load_declarations, lookup, TraitRegistry,
};
