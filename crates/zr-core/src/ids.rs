//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Unlike array-indexed stores, the
//! routing and motion layers key everything by hash, so the inner integer is
//! an opaque handle rather than a `Vec` offset.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Cast to `usize`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// A routing domain.  Discovery hands these out sequentially from 1.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Handle to a waypoint in the scene.  `INVALID` is the "absent waypoint".
    pub struct WaypointId(u32);
}

typed_id! {
    /// Stable identity of a tracked mobile entity, chosen by the caller.
    pub struct MoverId(u32);
}

typed_id! {
    /// Handle to a rendered entity owned by the scene collaborator.
    pub struct EntityId(u32);
}

impl ZoneId {
    /// The first id assigned by scene discovery.
    pub const FIRST: ZoneId = ZoneId(1);

    /// The id following `self` in discovery order.  Saturates at
    /// [`ZoneId::INVALID`].
    #[inline]
    pub fn next(self) -> ZoneId {
        ZoneId(self.0.saturating_add(1))
    }
}
