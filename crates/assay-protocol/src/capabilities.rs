use assay_engine::{
    COLUMN_COUNT, LIVE_DEAD_CONTROL, NEGATIVE_CONTROL, Orientation, ROW_LABELS, Replicates,
    UNSTAINED_CONTROL,
};
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub protocol_version: String,
    pub endpoints: Vec<String>,
    pub orientations: Vec<String>,
    pub max_replicates: usize,
    pub plate_rows: Vec<String>,
    pub plate_columns: usize,
    pub negative_control: String,
    pub optional_controls: Vec<String>,
    pub export_formats: Vec<String>,
}

pub fn capabilities() -> Capabilities {
    Capabilities {
        protocol_version: PROTOCOL_VERSION.to_string(),
        endpoints: [
            "GET /api/health",
            "GET /api/capabilities",
            "POST /plate-map",
            "POST /plate-map/csv",
            "POST /dilutions",
            "POST /reagent-b",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        orientations: Orientation::ALL
            .iter()
            .map(|o| o.as_str().to_string())
            .collect(),
        max_replicates: Replicates::MAX,
        plate_rows: ROW_LABELS.iter().map(|r| r.to_string()).collect(),
        plate_columns: COLUMN_COUNT,
        negative_control: NEGATIVE_CONTROL.to_string(),
        optional_controls: vec![LIVE_DEAD_CONTROL.to_string(), UNSTAINED_CONTROL.to_string()],
        export_formats: vec!["json".to_string(), "csv".to_string(), "svg".to_string()],
    }
}
