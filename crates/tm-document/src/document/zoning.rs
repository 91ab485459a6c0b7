use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoningDocument {
    #[serde(default)]
    pub zones: Vec<ZoneDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_zones: Vec<TransferZoneDocument>,
    #[serde(default)]
    pub connectoids: Vec<ConnectoidDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_groups: Vec<TransferGroupDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<[f64; 2]>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferZoneTypeDocument {
    #[default]
    None,
    Platform,
    StopPole,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferZoneDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<[f64; 2]>,
    #[serde(default, rename = "type")]
    pub transfer_type: TransferZoneTypeDocument,
}

/// A connectoid, tagged by what it is attached to:
///
/// ```json
/// { "kind": "node", "node_ref": "n1", "access_zones": [{ "zone_ref": "z1" }] }
/// { "kind": "link_segment", "link_segment_ref": "s4", "access_zones": [...] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectoidDocument {
    Node(NodeConnectoidDocument),
    LinkSegment(LinkSegmentConnectoidDocument),
}

impl ConnectoidDocument {
    pub fn id(&self) -> Option<&str> {
        match self {
            ConnectoidDocument::Node(c) => c.id.as_deref(),
            ConnectoidDocument::LinkSegment(c) => c.id.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConnectoidDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub node_ref: String,
    pub access_zones: Vec<AccessZoneDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSegmentConnectoidDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub link_segment_ref: String,
    pub access_zones: Vec<AccessZoneDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessZoneDocument {
    pub zone_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    /// Absent: every mode may use this access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_refs: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferGroupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub transfer_zone_refs: Vec<String>,
}
