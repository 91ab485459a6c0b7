//! The `Entity` trait shared by every identifiable domain object.

use std::fmt;

/// Which registry an identifier belongs to.  Document ids are unique per kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Mode,
    Node,
    Link,
    LinkSegment,
    LinkSegmentType,
    Zone,
    TransferZone,
    Connectoid,
    TransferGroup,
    TravellerType,
    UserClass,
    TimePeriod,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Mode            => "mode",
            EntityKind::Node            => "node",
            EntityKind::Link            => "link",
            EntityKind::LinkSegment     => "link segment",
            EntityKind::LinkSegmentType => "link segment type",
            EntityKind::Zone            => "zone",
            EntityKind::TransferZone    => "transfer zone",
            EntityKind::Connectoid      => "connectoid",
            EntityKind::TransferGroup   => "transfer zone group",
            EntityKind::TravellerType   => "traveller type",
            EntityKind::UserClass       => "user class",
            EntityKind::TimePeriod      => "time period",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain object with an internal id, a document id and an optional
/// free-form external id.
///
/// The document id is what documents use to cross-reference entities; the
/// external id is carried through untouched and never used for resolution.
pub trait Entity {
    const KIND: EntityKind;
    type Id: Copy + Eq + fmt::Debug;

    fn id(&self) -> Self::Id;

    /// The internal id as a plain integer, unique within the entity's kind.
    fn internal_id(&self) -> u64;

    fn doc_id(&self) -> &str;

    fn set_doc_id(&mut self, doc_id: String);

    fn external_id(&self) -> Option<&str>;
}

/// Implement [`Entity`] for a struct with `id`, `doc_id` and `external_id`
/// fields.
///
/// ```
/// use tm_core::{impl_entity, Entity, EntityKind, NodeId};
///
/// struct Stop { id: NodeId, doc_id: String, external_id: Option<String> }
/// impl_entity!(Stop, NodeId, EntityKind::Node);
///
/// let s = Stop { id: NodeId(4), doc_id: "s4".into(), external_id: None };
/// assert_eq!(s.internal_id(), 4);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($ty:ty, $id:ty, $kind:expr) => {
        impl $crate::Entity for $ty {
            const KIND: $crate::EntityKind = $kind;
            type Id = $id;

            #[inline]
            fn id(&self) -> $id {
                self.id
            }

            #[inline]
            fn internal_id(&self) -> u64 {
                self.id.raw()
            }

            #[inline]
            fn doc_id(&self) -> &str {
                &self.doc_id
            }

            fn set_doc_id(&mut self, doc_id: String) {
                self.doc_id = doc_id;
            }

            fn external_id(&self) -> Option<&str> {
                self.external_id.as_deref()
            }
        }
    };
}
