//! Index types for mesh elements.
//!
//! This module provides type-safe index wrappers for vertices and loops
//! (face corners). Keeping the two as distinct types means a corner index
//! can never be used to address vertex storage, and vice versa.

use std::fmt::{self, Debug};

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe loop (face corner) index.
///
/// Loops are numbered globally across the mesh: the corners of polygon 0
/// come first, then the corners of polygon 1, and so on.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct LoopId(u32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(
                    index <= u32::MAX as usize,
                    "index {} too large for u32",
                    index
                );
                Self(index as u32)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(LoopId, "L");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v = VertexId::new(42);
        assert_eq!(v.index(), 42);
    }

    #[test]
    fn test_type_safety() {
        // These are different types and cannot be mixed
        let v = VertexId::new(0);
        let l = LoopId::new(0);

        // Both wrap the same raw value but are distinct types
        assert_eq!(v.index(), l.index());
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", VertexId::new(42)), "V(42)");
        assert_eq!(format!("{:?}", LoopId::new(7)), "L(7)");
    }

    #[test]
    fn test_from_usize() {
        let v: VertexId = 3.into();
        assert_eq!(v, VertexId::new(3));
    }
}
