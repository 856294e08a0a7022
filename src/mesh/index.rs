//! Index types for mesh elements.
//!
//! Vertices and edges are addressed through distinct newtype wrappers so an
//! edge index can never be passed where a vertex index is expected. Both are
//! generic over the underlying integer type: `u16` for small wire meshes,
//! `u32` (the default) for typical meshes and `u64` for very large ones.
//!
//! Ids are totally ordered. Wherever the selection pipeline needs a
//! reproducible order (traversal starts, tie-breaks), it sorts by id.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for integer types that can back a mesh index.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The largest index this type can address.
    const MAX: Self;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {
        $(
            impl MeshIndex for $ty {
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v <= <$ty>::MAX as usize,
                        "index {} too large for {}",
                        v,
                        stringify!($ty)
                    );
                    v as $ty
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

macro_rules! impl_id_type {
    ($name:ident, $prefix:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create an id from a raw position in the element array.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Position of the element in its array.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// The underlying integer.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $prefix, self.index())
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_id_type!(VertexId, "V");
impl_id_type!(EdgeId, "E");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert_eq!(v.raw(), 42u32);
    }

    #[test]
    fn test_ids_are_ordered() {
        let mut ids: Vec<VertexId> = vec![5.into(), 1.into(), 3.into()];
        ids.sort();
        assert_eq!(ids, vec![VertexId::new(1), VertexId::new(3), VertexId::new(5)]);
    }

    #[test]
    fn test_small_indices() {
        let e: EdgeId<u16> = EdgeId::new(1000);
        assert_eq!(e.index(), 1000);
    }

    #[test]
    fn test_debug_format() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(format!("{:?}", v), "V(42)");

        let e: EdgeId<u64> = EdgeId::new(7);
        assert_eq!(format!("{:?}", e), "E(7)");
    }
}
