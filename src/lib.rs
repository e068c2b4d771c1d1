//! # Traitor
//!
//! Runtime capability tagging with construction-time conformance verification.
//!
//! Types declare which named capabilities ("traits") they implement, the claim
//! is verified against the object's actual operation surface when a
//! [`Verified`] instance is constructed, and callers query or conditionally
//! invoke capabilities without risking a failure when one is absent: an
//! unimplemented capability dispatches to a shared no-op stand-in that
//! absorbs any operation and yields the absent result.
//!
//! ```
//! use serde_json::Value;
//! use traitor::{
//!     bind_implementation, declare_trait, CapabilityDecl, CapabilityError, OperationSig,
//!     Subject, Verified,
//! };
//!
//! let drivable = declare_trait(
//!     CapabilityDecl::new("doc:Drivable", vec![OperationSig::new("drive", 0)]).unwrap(),
//! );
//! let rechargeable = declare_trait(
//!     CapabilityDecl::new("doc:Rechargeable", vec![OperationSig::new("charge", 0)]).unwrap(),
//! );
//!
//! struct GasCar;
//!
//! impl Subject for GasCar {
//!     fn type_name(&self) -> &str {
//!         "GasCar"
//!     }
//!
//!     fn operations(&self) -> Vec<OperationSig> {
//!         vec![OperationSig::new("drive", 0)]
//!     }
//!
//!     fn invoke(&self, op: &str, _args: &[Value]) -> Result<Value, CapabilityError> {
//!         match op {
//!             "drive" => Ok(Value::String("Driving with gasoline!".into())),
//!             other => Err(CapabilityError::UnknownOperation {
//!                 type_name: "GasCar".into(),
//!                 operation: other.into(),
//!             }),
//!         }
//!     }
//! }
//!
//! bind_implementation::<GasCar>(vec![drivable.clone()]).unwrap();
//!
//! let car = Verified::new(GasCar).unwrap();
//! assert!(car.implements(&[&drivable]));
//! assert!(!car.implements(&[&rechargeable]));
//!
//! // Conditional dispatch never fails; absent capabilities yield Null.
//! let absent = car.if_implements(&rechargeable).invoke("charge", &[]).unwrap();
//! assert_eq!(absent, Value::Null);
//! ```

pub mod capability;
pub mod errors;
pub mod subject;
pub mod verified;

pub use capability::declaration::{CapabilityDecl, OperationSig};
pub use capability::registry::{
    bind_implementation, claimed, declare_trait, load_declarations, lookup, TraitRegistry,
};
pub use errors::CapabilityError;
pub use subject::{Noop, Subject, NOOP};
pub use verified::{require_capabilities, Verified};

/// Library version.
pub const VERSION: &str = "0.1.0";
