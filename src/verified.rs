//! Verified instances — claim verification at construction, conditional
//! dispatch afterwards.
//!
//! `Verified::new` is the only gate between a bare object and a live verified
//! instance. It reads the type's bound claim list, runs the structural
//! conformance check for every claimed capability, and refuses to produce an
//! instance on the first violation. A live `Verified<T>` therefore carries a
//! standing guarantee: every capability in its claim list is structurally
//! satisfied, and `implements` can answer by cheap list membership instead of
//! re-probing the surface on every call.

use std::ops::Deref;

use serde_json::Value;

use crate::capability::declaration::{CapabilityDecl, OperationSig};
use crate::capability::registry;
use crate::errors::CapabilityError;
use crate::subject::{Subject, NOOP};

/// Assert that a subject structurally satisfies every given capability.
///
/// A direct check against the object's surface, independent of any claim
/// list; usable outside the `Verified` protocol entirely. Fails with
/// [`CapabilityError::Violation`] naming the first unsatisfied capability.
pub fn require_capabilities(
    subject: &dyn Subject,
    capabilities: &[&CapabilityDecl],
) -> Result<(), CapabilityError> {
    for cap in capabilities {
        if !cap.conforms(subject) {
            return Err(CapabilityError::Violation {
                type_name: subject.type_name().to_string(),
                capability: cap.name.clone(),
            });
        }
    }
    Ok(())
}

/// A subject whose claimed capabilities were verified at construction.
///
/// Two states exist: under construction (inside `new`, verifying) and live.
/// There is no path back; a failed verification means no instance at all.
#[derive(Debug)]
pub struct Verified<T: Subject> {
    inner: T,
    claims: Vec<CapabilityDecl>,
}

impl<T: Subject + 'static> Verified<T> {
    /// Construct a verified instance.
    ///
    /// Reads the claim list bound to `T` (empty if none was bound, which
    /// passes trivially) and checks structural conformance for each claimed
    /// capability in binding order. The first violation aborts construction;
    /// no partially verified instance escapes.
    pub fn new(inner: T) -> Result<Self, CapabilityError> {
        let claims = registry::claimed::<T>();
        for cap in &claims {
            if !cap.conforms(&inner) {
                log::warn!(
                    "construction rejected: {} does not satisfy claimed capability {}",
                    inner.type_name(),
                    cap.name
                );
                return Err(CapabilityError::Violation {
                    type_name: inner.type_name().to_string(),
                    capability: cap.name.clone(),
                });
            }
        }
        log::debug!(
            "verified {} against {} claimed capabilities",
            inner.type_name(),
            claims.len()
        );
        Ok(Self { inner, claims })
    }
}

impl<T: Subject> Verified<T> {
    /// True iff every given capability appears in the bound claim list.
    ///
    /// A membership test against the declared claim, not a structural
    /// re-check; construction-time verification is trusted for the lifetime
    /// of the instance.
    pub fn implements(&self, capabilities: &[&CapabilityDecl]) -> bool {
        capabilities
            .iter()
            .all(|cap| self.claims.iter().any(|claimed| claimed.name == cap.name))
    }

    /// Conditional dispatch: the real subject if the capability is claimed,
    /// the shared no-op stand-in otherwise.
    ///
    /// `verified.if_implements(&cap).invoke("op", &[])` never fails for an
    /// absent capability; it yields `Value::Null` instead.
    pub fn if_implements(&self, capability: &CapabilityDecl) -> &dyn Subject {
        if self.implements(&[capability]) {
            &self.inner
        } else {
            &NOOP
        }
    }

    /// The claim list this instance was verified against, in binding order.
    pub fn claims(&self) -> &[CapabilityDecl] {
        &self.claims
    }

    /// Borrow the verified subject.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Unwrap the verified subject, discarding the claim list.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Subject> Deref for Verified<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

/// A verified instance is itself a subject, delegating to its inner value, so
/// it can be passed to `require_capabilities` or wrapped again.
impl<T: Subject> Subject for Verified<T> {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn operations(&self) -> Vec<OperationSig> {
        self.inner.operations()
    }

    fn invoke(&self, op: &str, args: &[Value]) -> Result<Value, CapabilityError> {
        self.inner.invoke(op, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::registry::bind_implementation;
    use std::sync::Once;

    fn decl(name: &str, ops: &[&str]) -> CapabilityDecl {
        CapabilityDecl::new(
            name,
            ops.iter().map(|op| OperationSig::new(*op, 0)).collect(),
        )
        .unwrap()
    }

    fn drivable() -> CapabilityDecl {
        decl("Drivable", &["drive"])
    }

    fn refuelable() -> CapabilityDecl {
        decl("Refuelable", &["refuel"])
    }

    fn rechargeable() -> CapabilityDecl {
        decl("Rechargeable", &["charge"])
    }

    macro_rules! vehicle {
        ($name:ident, { $($op:literal => $result:literal),+ $(,)? }) => {
            #[derive(Debug)]
            struct $name;

            impl Subject for $name {
                fn type_name(&self) -> &str {
                    stringify!($name)
                }

                fn operations(&self) -> Vec<OperationSig> {
                    vec![$(OperationSig::new($op, 0)),+]
                }

                fn invoke(&self, op: &str, _args: &[Value]) -> Result<Value, CapabilityError> {
                    match op {
                        $($op => Ok(Value::String($result.into())),)+
                        other => Err(CapabilityError::UnknownOperation {
                            type_name: self.type_name().to_string(),
                            operation: other.to_string(),
                        }),
                    }
                }
            }
        };
    }

    vehicle!(GasCar, {
        "drive" => "Driving with gasoline!",
        "refuel" => "Refueling at the gas station.",
    });

    vehicle!(Ev, {
        "drive" => "Driving silently on battery.",
        "charge" => "Charging at the station.",
    });

    vehicle!(Hybrid, {
        "drive" => "Driving with either fuel or battery.",
        "refuel" => "Refueling the hybrid tank.",
        "charge" => "Charging the hybrid battery.",
    });

    // Claims Rechargeable but exposes no charge operation.
    vehicle!(BrokenEv, {
        "drive" => "Driving, somehow.",
    });

    static BIND: Once = Once::new();

    fn bind_vehicles() {
        BIND.call_once(|| {
            let _ = env_logger::builder().is_test(true).try_init();
            bind_implementation::<GasCar>(vec![drivable(), refuelable()]).unwrap();
            bind_implementation::<Ev>(vec![drivable(), rechargeable()]).unwrap();
            bind_implementation::<Hybrid>(vec![drivable(), refuelable(), rechargeable()])
                .unwrap();
            bind_implementation::<BrokenEv>(vec![drivable(), rechargeable()]).unwrap();
        });
    }

    #[test]
    fn test_honest_claim_constructs_and_answers_membership() {
        bind_vehicles();
        let car = Verified::new(GasCar).unwrap();

        assert!(car.implements(&[&drivable()]));
        assert!(car.implements(&[&refuelable()]));
        assert!(car.implements(&[&drivable(), &refuelable()]));
        assert!(!car.implements(&[&rechargeable()]));
        assert!(!car.implements(&[&drivable(), &rechargeable()]));
        assert_eq!(car.claims(), &[drivable(), refuelable()]);
    }

    #[test]
    fn test_dishonest_claim_fails_naming_the_capability() {
        bind_vehicles();
        let err = Verified::new(BrokenEv).unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::Violation { ref type_name, ref capability }
                if type_name == "BrokenEv" && capability == "Rechargeable"
        ));
    }

    #[test]
    fn test_unbound_type_verifies_trivially() {
        struct Skateboard;

        impl Subject for Skateboard {
            fn type_name(&self) -> &str {
                "Skateboard"
            }

            fn operations(&self) -> Vec<OperationSig> {
                vec![OperationSig::new("push", 0)]
            }

            fn invoke(&self, _op: &str, _args: &[Value]) -> Result<Value, CapabilityError> {
                Ok(Value::String("Rolling.".into()))
            }
        }

        let board = Verified::new(Skateboard).unwrap();
        assert!(board.claims().is_empty());
        assert!(!board.implements(&[&drivable()]));
        // An empty capability list is vacuously implemented.
        assert!(board.implements(&[]));
        assert_eq!(
            board.if_implements(&drivable()).invoke("push", &[]).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_if_implements_dispatches_to_the_real_subject() {
        bind_vehicles();
        let car = Verified::new(GasCar).unwrap();

        let direct = car.invoke("drive", &[]).unwrap();
        let gated = car.if_implements(&drivable()).invoke("drive", &[]).unwrap();
        assert_eq!(direct, gated);
        assert_eq!(gated, Value::String("Driving with gasoline!".into()));
    }

    #[test]
    fn test_if_implements_absent_yields_the_noop_stand_in() {
        bind_vehicles();
        let car = Verified::new(GasCar).unwrap();

        let stand_in = car.if_implements(&rechargeable());
        assert_eq!(stand_in.invoke("charge", &[]).unwrap(), Value::Null);
        // The stand-in absorbs operations unrelated to the queried capability too.
        assert_eq!(stand_in.invoke("fly", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_queries_are_idempotent() {
        bind_vehicles();
        let ev = Verified::new(Ev).unwrap();

        for _ in 0..3 {
            assert!(ev.implements(&[&drivable(), &rechargeable()]));
            assert!(!ev.implements(&[&refuelable()]));
            assert_eq!(
                ev.if_implements(&rechargeable()).invoke("charge", &[]).unwrap(),
                Value::String("Charging at the station.".into())
            );
            assert_eq!(
                ev.if_implements(&refuelable()).invoke("refuel", &[]).unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn test_hybrid_implements_all_three() {
        bind_vehicles();
        let hybrid = Verified::new(Hybrid).unwrap();

        assert!(hybrid.implements(&[&drivable(), &refuelable(), &rechargeable()]));
        for (cap, op) in [
            (drivable(), "drive"),
            (refuelable(), "refuel"),
            (rechargeable(), "charge"),
        ] {
            assert!(hybrid.if_implements(&cap).invoke(op, &[]).is_ok());
        }
    }

    #[test]
    fn test_require_capabilities_checks_the_surface_directly() {
        // No claim list involved; GasCar's surface is probed as-is.
        require_capabilities(&GasCar, &[&drivable(), &refuelable()]).unwrap();

        let err = require_capabilities(&GasCar, &[&drivable(), &rechargeable()]).unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::Violation { ref type_name, ref capability }
                if type_name == "GasCar" && capability == "Rechargeable"
        ));
    }

    #[test]
    fn test_verified_delegates_as_a_subject() {
        bind_vehicles();
        let car = Verified::new(GasCar).unwrap();

        require_capabilities(&car, &[&drivable()]).unwrap();
        assert_eq!(car.type_name(), "GasCar");
        assert!(matches!(
            car.invoke("charge", &[]),
            Err(CapabilityError::UnknownOperation { .. })
        ));
    }
}
