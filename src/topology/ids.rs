//! `NodeId` and `ElementId`: strong, zero-cost handles for lattice entities
//!
//! Both wrap a `NonZeroU64` so that 0 stays reserved as an invalid or
//! sentinel value. Ids in an assembled volume are dense and start at 1,
//! which makes the raw value usable as a 1-based index into the backing
//! storage.
//!
//! The two types are distinct: a node id cannot be passed
//! where an element id is expected.

use crate::mesh_error::LatticeError;
use std::{fmt, num::NonZeroU64};

macro_rules! lattice_id {
    ($(#[$meta:meta])* $name:ident, $err:expr) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates a new id from a raw `u64` value.
            ///
            /// Returns an error if `raw == 0`.
            #[inline]
            pub fn new(raw: u64) -> Result<Self, LatticeError> {
                NonZeroU64::new(raw).map($name).ok_or($err)
            }

            /// Returns the inner `u64` value.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0.get()
            }

            /// Zero-based position of this id in dense storage.
            #[inline]
            pub(crate) const fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }

            /// Id for the zero-based position `index` in dense storage.
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                $name(NonZeroU64::MIN.saturating_add(index as u64))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }

        impl TryFrom<u64> for $name {
            type Error = LatticeError;

            fn try_from(raw: u64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }
    };
}

lattice_id!(
    /// Identifier of a lattice node (a strut junction).
    NodeId,
    LatticeError::InvalidNodeId
);

lattice_id!(
    /// Identifier of a lattice element (a strut between two nodes).
    ElementId,
    LatticeError::InvalidElementId
);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(NodeId::new(0), Err(LatticeError::InvalidNodeId));
        assert_eq!(ElementId::new(0), Err(LatticeError::InvalidElementId));
    }

    #[test]
    fn new_and_get() {
        let n = NodeId::new(42).unwrap();
        assert_eq!(n.get(), 42);
        assert_eq!(n.index(), 41);
        assert_eq!(NodeId::from_index(41), n);
    }

    #[test]
    fn debug_and_display() {
        let n = NodeId::new(7).unwrap();
        assert_eq!(format!("{:?}", n), "NodeId(7)");
        assert_eq!(format!("{}", n), "7");
        let e = ElementId::new(3).unwrap();
        assert_eq!(format!("{:?}", e), "ElementId(3)");
    }

    #[test]
    fn json_roundtrip() {
        let n = NodeId::new(123).unwrap();
        let s = serde_json::to_string(&n).unwrap();
        assert_eq!(s, "123");
        let back: NodeId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, n);
        assert!(serde_json::from_str::<NodeId>("0").is_err());
    }
}
