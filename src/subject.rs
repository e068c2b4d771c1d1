//! The `Subject` trait — the structural surface a capability check runs against.
//!
//! Rust has no ambient attribute probing, so participating objects report their
//! own operation surface: a list of operation signatures plus a dynamic `invoke`
//! entry point over JSON values. Conformance checking reads `operations()`;
//! conditional dispatch goes through `invoke()`.

use serde_json::Value;

use crate::capability::declaration::OperationSig;
use crate::errors::CapabilityError;

/// An object with a queryable operation surface and dynamic dispatch.
///
/// Every type that wants to claim capabilities (or be asserted against with
/// `require_capabilities`) implements this. The contract:
///
/// - `operations()` is the complete structural surface; a capability conformance
///   check passes iff every required signature appears here with matching arity.
/// - `invoke()` dispatches by operation name. Real subjects return
///   [`CapabilityError::UnknownOperation`] for names they do not expose.
pub trait Subject: Send + Sync {
    /// Human-readable type name, used in diagnostics and error messages.
    fn type_name(&self) -> &str;

    /// The operations this object structurally exposes.
    fn operations(&self) -> Vec<OperationSig>;

    /// Invoke an operation by name with positional JSON arguments.
    fn invoke(&self, op: &str, args: &[Value]) -> Result<Value, CapabilityError>;
}

/// The universal no-op stand-in.
///
/// Returned by `if_implements` when the queried capability is absent. It exposes
/// no operations of its own, yet absorbs any invocation (any name, any arguments)
/// by producing the absent result, `Value::Null`. It never fails and holds no
/// state, so a single shared [`NOOP`] serves the whole process.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

/// Shared no-op stand-in instance.
pub static NOOP: Noop = Noop;

impl Subject for Noop {
    fn type_name(&self) -> &str {
        "Noop"
    }

    fn operations(&self) -> Vec<OperationSig> {
        Vec::new()
    }

    fn invoke(&self, _op: &str, _args: &[Value]) -> Result<Value, CapabilityError> {
        Ok(Value::Null)
    }
}
