//! Unit tests for tm-zoning.

#[cfg(test)]
mod helpers {
    use tm_core::{Crs, GeoPoint};
    use tm_network::{Direction, MacroscopicNetwork, NetworkBuilder};

    /// Cartesian network: n0 at the origin, n1 at (1000, 0); one two-way link.
    pub fn network() -> MacroscopicNetwork {
        let mut b = NetworkBuilder::new(Crs::Cartesian);
        let n0 = b.add_node("n0", Some(GeoPoint::new(0.0, 0.0)));
        let n1 = b.add_node("n1", Some(GeoPoint::new(1_000.0, 0.0)));
        let ty = b.add_link_segment_type("t", "road", None, None, Vec::new());
        let l = b.add_link("l", n0, n1, None).unwrap();
        b.add_link_segment("ab", l, Direction::AB, ty, 1, None).unwrap();
        b.add_link_segment("ba", l, Direction::BA, ty, 1, None).unwrap();
        b.build()
    }
}

#[cfg(test)]
mod builder {
    use tm_core::{GeoPoint, LinkSegmentId, ModeId, NodeId, TransferZoneId, ZoneId};

    use crate::{AccessZone, ConnectoidAccess, TransferZoneType, ZoningBuilder, ZoningError};

    #[test]
    fn od_connectoid_derives_length_from_centroid() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z = b.add_zone("z1", Some(GeoPoint::new(0.0, 2_000.0)));
        let c = b.add_od_connectoid("c1", NodeId(0), vec![AccessZone::new(z)]).unwrap();
        let zoning = b.build();

        let ConnectoidAccess::NodeBased { node, zones } = &zoning.connectoids[c.index()].access else {
            panic!("expected node-based connectoid");
        };
        assert_eq!(*node, NodeId(0));
        assert_eq!(zones[0].length_km, Some(2.0));
    }

    #[test]
    fn explicit_length_is_kept() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z = b.add_zone("z1", Some(GeoPoint::new(0.0, 2_000.0)));
        let mut access = AccessZone::new(z);
        access.length_km = Some(0.3);
        b.add_od_connectoid("c1", NodeId(1), vec![access]).unwrap();
        let zoning = b.build();
        let ConnectoidAccess::NodeBased { zones, .. } = &zoning.connectoids[0].access else {
            panic!("expected node-based connectoid");
        };
        assert_eq!(zones[0].length_km, Some(0.3));
    }

    #[test]
    fn no_centroid_no_length() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z = b.add_zone("z1", None);
        b.add_od_connectoid("c1", NodeId(0), vec![AccessZone::new(z)]).unwrap();
        let zoning = b.build();
        let ConnectoidAccess::NodeBased { zones, .. } = &zoning.connectoids[0].access else {
            panic!("expected node-based connectoid");
        };
        assert_eq!(zones[0].length_km, None);
    }

    #[test]
    fn transfer_connectoid_measures_to_downstream_node() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let tz = b.add_transfer_zone("stop", Some(GeoPoint::new(1_000.0, 500.0)), TransferZoneType::StopPole);
        // Segment 0 runs n0 → n1, so its downstream node is n1.
        b.add_transfer_connectoid("tc", LinkSegmentId(0), vec![AccessZone::new(tz)]).unwrap();
        let zoning = b.build();
        let ConnectoidAccess::LinkSegmentBased { zones, .. } = &zoning.connectoids[0].access else {
            panic!("expected link-segment-based connectoid");
        };
        assert_eq!(zones[0].length_km, Some(0.5));
        assert_eq!(zoning.transfer_connectoids_of(tz).count(), 1);
    }

    #[test]
    fn dangling_ids_are_rejected() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z = b.add_zone("z1", None);
        assert_eq!(
            b.add_od_connectoid("c", NodeId(7), vec![AccessZone::new(z)]).unwrap_err(),
            ZoningError::NodeNotFound(NodeId(7))
        );
        assert_eq!(
            b.add_od_connectoid("c", NodeId(0), vec![AccessZone::new(ZoneId(4))]).unwrap_err(),
            ZoningError::ZoneNotFound(ZoneId(4))
        );
        assert_eq!(
            b.add_transfer_connectoid("c", LinkSegmentId(9), Vec::new()).unwrap_err(),
            ZoningError::LinkSegmentNotFound(LinkSegmentId(9))
        );
        assert_eq!(
            b.add_transfer_group("g", vec![TransferZoneId(0)]).unwrap_err(),
            ZoningError::TransferZoneNotFound(TransferZoneId(0))
        );
        let mut restricted = AccessZone::new(z);
        restricted.allowed_modes = Some(vec![ModeId(5)]);
        assert_eq!(
            b.add_od_connectoid("c", NodeId(0), vec![restricted]).unwrap_err(),
            ZoningError::ModeNotFound(ModeId(5))
        );
    }

    #[test]
    fn connectoid_needs_a_zone() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        assert_eq!(
            b.add_od_connectoid("c", NodeId(0), Vec::new()).unwrap_err(),
            ZoningError::NoAccessZones("c".into())
        );
    }

    #[test]
    fn many_to_many_zone_access() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z1 = b.add_zone("z1", None);
        let z2 = b.add_zone("z2", None);
        b.add_od_connectoid("c1", NodeId(0), vec![AccessZone::new(z1), AccessZone::new(z2)]).unwrap();
        b.add_od_connectoid("c2", NodeId(1), vec![AccessZone::new(z1)]).unwrap();
        let zoning = b.build();
        assert_eq!(zoning.connectoids_of(z1).count(), 2);
        assert_eq!(zoning.connectoids_of(z2).count(), 1);
    }
}

#[cfg(test)]
mod access {
    use tm_core::{ModeId, ZoneId};

    use crate::AccessZone;

    #[test]
    fn absent_mode_list_allows_all() {
        let a = AccessZone::new(ZoneId(0));
        assert!(a.allows(ModeId(0)));
        assert!(a.allows(ModeId(9)));
    }

    #[test]
    fn explicit_mode_list_restricts() {
        let mut a = AccessZone::new(ZoneId(0));
        a.allowed_modes = Some(vec![ModeId(1)]);
        assert!(a.allows(ModeId(1)));
        assert!(!a.allows(ModeId(0)));
    }
}

#[cfg(test)]
mod sync {
    use tm_core::{NodeId, SyncDocIds};

    use crate::{AccessZone, ZoningBuilder};

    #[test]
    fn zoning_ids_follow_internal_ids() {
        let net = super::helpers::network();
        let mut b = ZoningBuilder::new(&net);
        let z = b.add_zone("zone-a", None);
        b.add_od_connectoid("0", NodeId(0), vec![AccessZone::new(z)]).unwrap();
        let mut zoning = b.build();
        assert_eq!(zoning.sync_doc_ids(), 1);
        assert_eq!(zoning.zones[0].doc_id, "0");
    }
}
