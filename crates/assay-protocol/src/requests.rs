//! Request handling shared by the HTTP server and the command line.
//!
//! Each handler takes the raw JSON body, validates it, runs the engine and
//! returns the response contract. Nothing here keeps state between calls.

use crate::error::ProtocolError;
use crate::payload::{
    Payload, as_object, list_of_numbers, list_of_strings, optional_bool, optional_integer,
    optional_number, optional_string, positive_count, required_number,
};
use assay_engine::reagent::DEFAULT_OVERAGE_PERCENT;
use assay_engine::{
    ControlSet, DilutionItem, DilutionResult, ExperimentDesign, Orientation, Plate, ReagentBatch,
    ReagentRequirements, Replicates, calculate_dilutions, calculate_reagent_requirements,
    generate_plate_maps,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEST_ARTICLE_PREFIX: &str = "HA-00";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateMapResponse {
    pub plates: Vec<Plate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            message: "Antibody Assay Setup API is running".to_string(),
        }
    }
}

/// Body of every failed request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<&ProtocolError> for ErrorResponse {
    fn from(err: &ProtocolError) -> Self {
        Self {
            detail: err.to_string(),
        }
    }
}

fn validate_test_articles(articles: Vec<String>) -> Result<Vec<String>, ProtocolError> {
    if articles.iter().any(|a| !a.starts_with(TEST_ARTICLE_PREFIX)) {
        return Err(ProtocolError::invalid(format!(
            "Each test article must start with '{TEST_ARTICLE_PREFIX}'"
        )));
    }
    Ok(articles)
}

pub fn parse_experiment_design(payload: &Payload) -> Result<ExperimentDesign, ProtocolError> {
    let test_articles = validate_test_articles(list_of_strings(payload, "test_articles")?)?;
    let cell_lines = list_of_strings(payload, "cell_lines")?;
    let timepoints = list_of_numbers(payload, "timepoints")?;

    let orientation = match optional_string(payload, "orientation")? {
        None => Orientation::default(),
        Some(text) => Orientation::parse(text).ok_or_else(|| {
            ProtocolError::invalid(format!(
                "'orientation' must be 'horizontal' or 'vertical' (got '{text}')"
            ))
        })?,
    };
    let replicates = match optional_integer(payload, "replicates")? {
        None => Replicates::default(),
        Some(n) => Replicates::new(n)?,
    };
    let controls = ControlSet {
        live_dead: optional_bool(payload, "include_live_dead", true)?,
        unstained: optional_bool(payload, "include_unstained", true)?,
    };

    Ok(ExperimentDesign {
        test_articles,
        cell_lines,
        timepoints,
        orientation,
        replicates,
        controls,
        condense_cell_lines: optional_bool(payload, "condense_cell_lines", false)?,
    })
}

pub fn plate_map(body: &Value) -> Result<PlateMapResponse, ProtocolError> {
    let design = parse_experiment_design(as_object(body)?)?;
    let plates = generate_plate_maps(&design)?;
    Ok(PlateMapResponse { plates })
}

pub fn parse_dilution_items(payload: &Payload) -> Result<Vec<DilutionItem>, ProtocolError> {
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| ProtocolError::invalid("'items' must be a non-empty list"))?;
    items
        .iter()
        .map(|entry| {
            let entry = entry
                .as_object()
                .ok_or_else(|| ProtocolError::invalid("Each item must be an object"))?;
            let test_article = entry
                .get("test_article")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ProtocolError::invalid("Each item must include 'test_article'"))?;
            let stock = entry
                .get("stock_concentration_uM")
                .filter(|v| v.is_number())
                .and_then(Value::as_f64)
                .ok_or_else(|| {
                    ProtocolError::invalid(
                        "Each item must include numeric 'stock_concentration_uM'",
                    )
                })?;
            Ok(DilutionItem {
                test_article: test_article.to_string(),
                stock_concentration_um: stock,
            })
        })
        .collect()
}

pub fn dilutions(body: &Value) -> Result<Vec<DilutionResult>, ProtocolError> {
    let payload = as_object(body)?;
    let items = parse_dilution_items(payload)?;
    let numeric = || {
        ProtocolError::invalid("Final concentration and total volume must be numeric values")
    };
    let final_concentration =
        required_number(payload, "final_concentration_uM").map_err(|_| numeric())?;
    let total_volume = required_number(payload, "total_volume_uL").map_err(|_| numeric())?;
    Ok(calculate_dilutions(&items, final_concentration, total_volume)?)
}

pub fn parse_reagent_batch(payload: &Payload) -> Result<ReagentBatch, ProtocolError> {
    let volume = payload
        .get("volume_per_replicate_uL")
        .filter(|v| v.is_number())
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            ProtocolError::invalid("'volume_per_replicate_uL' must be a positive number")
        })?;
    Ok(ReagentBatch {
        number_of_timepoints: positive_count(payload, "number_of_timepoints")?,
        number_of_test_articles: positive_count(payload, "number_of_test_articles")?,
        number_of_cell_lines: positive_count(payload, "number_of_cell_lines")?,
        replicates_per_condition: positive_count(payload, "replicates_per_condition")?,
        volume_per_replicate_ul: volume,
        overage_percent: optional_number(payload, "overage_percent")?
            .unwrap_or(DEFAULT_OVERAGE_PERCENT),
    })
}

pub fn reagent_b(body: &Value) -> Result<ReagentRequirements, ProtocolError> {
    let batch = parse_reagent_batch(as_object(body)?)?;
    Ok(calculate_reagent_requirements(&batch)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_engine::PlateMapError;
    use serde_json::json;

    #[test]
    fn test_plate_map_defaults() {
        let response = plate_map(&json!({
            "test_articles": ["HA-001"],
            "cell_lines": ["CL1"],
            "timepoints": [24]
        }))
        .unwrap();
        assert_eq!(response.plates.len(), 1);
        assert_eq!(response.plates[0].wells.len(), 8);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["plates"][0]["cell_line"], json!("CL1"));
        assert_eq!(value["plates"][0]["replicates"], json!(2));
        assert_eq!(value["plates"][0]["wells"][2]["test_article"], json!("HA-001"));
    }

    #[test]
    fn test_plate_map_options() {
        let body = json!({
            "test_articles": ["HA-001", "HA-002"],
            "cell_lines": ["CL1", "CL2"],
            "timepoints": ["24"],
            "orientation": "Vertical",
            "replicates": 3,
            "include_live_dead": false,
            "condense_cell_lines": true
        });
        let design = parse_experiment_design(body.as_object().unwrap()).unwrap();
        assert_eq!(design.orientation, Orientation::Vertical);
        assert_eq!(design.replicates.get(), 3);
        assert_eq!(design.controls.count(), 1);
        assert!(design.condense_cell_lines);
        let response = plate_map(&body).unwrap();
        assert_eq!(response.plates.len(), 1);
        assert_eq!(response.plates[0].cell_line_names(), vec!["CL1", "CL2"]);
    }

    #[test]
    fn test_plate_map_rejects_bad_input() {
        let err = plate_map(&json!({
            "test_articles": ["XY-001"],
            "cell_lines": ["CL1"],
            "timepoints": [24]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Each test article must start with 'HA-00'");

        let err = plate_map(&json!({
            "test_articles": ["HA-001"],
            "cell_lines": ["CL1"],
            "timepoints": [24],
            "replicates": 0
        }))
        .unwrap_err();
        assert_eq!(err, ProtocolError::PlateMap(PlateMapError::InvalidReplicateCount(0)));

        let err = plate_map(&json!({
            "test_articles": ["HA-001"],
            "cell_lines": ["CL1"],
            "timepoints": [24],
            "orientation": "diagonal"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("'orientation'"));

        assert!(plate_map(&json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_plate_map_capacity_message() {
        let articles = (1..=50).map(|i| format!("HA-00{i}")).collect::<Vec<_>>();
        let err = plate_map(&json!({
            "test_articles": articles,
            "cell_lines": ["CL1"],
            "timepoints": [24]
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The selected number of test articles exceeds the capacity of a 96-well plate."
        );
    }

    #[test]
    fn test_dilutions_roundtrip() {
        let results = dilutions(&json!({
            "items": [{"test_article": " HA-001 ", "stock_concentration_uM": 100}],
            "final_concentration_uM": 10,
            "total_volume_uL": 200
        }))
        .unwrap();
        assert_eq!(results[0].test_article, "HA-001");
        assert_eq!(results[0].source_volume_ul, 20.0);

        let err = dilutions(&json!({
            "items": [{"test_article": "HA-001", "stock_concentration_uM": 10}],
            "final_concentration_uM": 20,
            "total_volume_uL": 100
        }))
        .unwrap_err();
        assert!(matches!(err, ProtocolError::Calculation(_)));

        let err = dilutions(&json!({
            "items": [{"test_article": "HA-001", "stock_concentration_uM": 10}],
            "final_concentration_uM": "lots",
            "total_volume_uL": 100
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Final concentration and total volume must be numeric values"
        );
    }

    #[test]
    fn test_reagent_b() {
        let result = reagent_b(&json!({
            "number_of_timepoints": 2,
            "number_of_test_articles": 3,
            "number_of_cell_lines": 1,
            "replicates_per_condition": 4,
            "volume_per_replicate_uL": 50
        }))
        .unwrap();
        assert_eq!(result.total_volume_ul, 1320.0);
        assert_eq!(result.reagent_b_volume_ul, 33.0);
        assert_eq!(result.diluent_volume_ul, 1287.0);

        let err = reagent_b(&json!({
            "number_of_timepoints": 2,
            "number_of_test_articles": 3,
            "number_of_cell_lines": 1,
            "volume_per_replicate_uL": 50
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'replicates_per_condition' must be a positive number"
        );
    }

    #[test]
    fn test_reagent_overage_default_and_override() {
        let mut body = json!({
            "number_of_timepoints": 1,
            "number_of_test_articles": 1,
            "number_of_cell_lines": 1,
            "replicates_per_condition": 4,
            "volume_per_replicate_uL": 100
        });
        let batch = parse_reagent_batch(body.as_object().unwrap()).unwrap();
        assert_eq!(batch.overage_percent, DEFAULT_OVERAGE_PERCENT);

        body["overage_percent"] = json!(0);
        let result = reagent_b(&body).unwrap();
        assert_eq!(result.total_volume_ul, 400.0);
        assert_eq!(result.reagent_b_volume_ul, 10.0);
    }

    #[test]
    fn test_error_response_body() {
        let err = ProtocolError::invalid("'items' must be a non-empty list");
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(body, json!({"detail": "'items' must be a non-empty list"}));
    }
}
