//! Strongly typed, zero-cost internal identifiers.
//!
//! Internal ids are dense per entity kind and allocated in creation order, so
//! `id.index()` addresses the owning container's `Vec` directly.  They are
//! independent of any document: the document id of an entity lives on the
//! entity itself (see [`crate::Entity`]).

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The raw integer widened to `u64`.
            #[inline(always)]
            pub fn raw(self) -> u64 {
                self.0 as u64
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

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a mode in the network's mode list.  Networks rarely carry more
    /// than a dozen modes, so `u16` is ample.
    pub struct ModeId(u16);
}

typed_id! {
    /// Index of a network node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of an undirected network link.
    pub struct LinkId(u32);
}

typed_id! {
    /// Index of a directed link segment.
    pub struct LinkSegmentId(u32);
}

typed_id! {
    /// Index of a link segment type.
    pub struct LinkSegmentTypeId(u32);
}

typed_id! {
    /// Index of an origin-destination zone.  Also the row/column of that zone
    /// in every OD matrix.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Index of a transfer (intermodal) zone.
    pub struct TransferZoneId(u32);
}

typed_id! {
    /// Index of a connectoid.
    pub struct ConnectoidId(u32);
}

typed_id! {
    /// Index of a transfer zone group.
    pub struct TransferGroupId(u32);
}

typed_id! {
    pub struct TravellerTypeId(u32);
}

typed_id! {
    pub struct UserClassId(u32);
}

typed_id! {
    pub struct TimePeriodId(u32);
}
