use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traveller_types: Vec<TravellerTypeDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_classes: Vec<UserClassDocument>,
    #[serde(default)]
    pub time_periods: Vec<TimePeriodDocument>,
    #[serde(default)]
    pub od_matrices: Vec<OdMatrixDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TravellerTypeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserClassDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// May be omitted when the network has exactly one mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_ref: Option<String>,
    /// May be omitted when exactly one traveller type exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traveller_type_ref: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePeriodDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `HH:MM` or `HH:MM:SS`; absent means midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub duration: f64,
    /// `s`, `min` or `h`; absent means seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_unit: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OdMatrixDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub time_period_ref: String,
    /// May be omitted when exactly one user class exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_class_ref: Option<String>,
    pub matrix: MatrixDocument,
}

/// The three on-disk matrix shapes, tagged by `encoding`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum MatrixDocument {
    Raw {
        values: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        origin_separator: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination_separator: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimal_separator: Option<char>,
    },
    Row {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimal_separator: Option<char>,
        rows: Vec<OdRowDocument>,
    },
    CellByCell {
        cells: Vec<OdCellDocument>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OdRowDocument {
    pub origin_ref: String,
    pub values: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OdCellDocument {
    pub origin_ref: String,
    pub destination_ref: String,
    pub value: f64,
}
