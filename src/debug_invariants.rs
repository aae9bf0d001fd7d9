use crate::mesh_error::LatticeError;

/// Structural checks shared by unit cells and assembled volumes.
///
/// For a lattice this means: every strut references existing nodes, no two
/// struts join the same node pair, and no two nodes lie within the default
/// coincidence tolerance of each other.
pub trait DebugInvariants {
    /// Panic on the first violated lattice invariant. Compiled to a no-op
    /// unless `debug_assertions` or the `check-invariants` feature is on.
    fn debug_assert_invariants(&self);
    /// Run the same checks and report the first violation as an error.
    fn validate_invariants(&self) -> Result<(), LatticeError>;
}

/// Run a fallible lattice check and panic with `ctx` on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
