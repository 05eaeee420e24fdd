use crate::error::CalculationError;
use crate::round_volume;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DilutionItem {
    pub test_article: String,
    #[serde(rename = "stock_concentration_uM")]
    pub stock_concentration_um: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DilutionResult {
    pub test_article: String,
    #[serde(rename = "stock_concentration_uM")]
    pub stock_concentration_um: f64,
    #[serde(rename = "final_concentration_uM")]
    pub final_concentration_um: f64,
    #[serde(rename = "total_volume_uL")]
    pub total_volume_ul: f64,
    #[serde(rename = "source_volume_uL")]
    pub source_volume_ul: f64,
    #[serde(rename = "diluent_volume_uL")]
    pub diluent_volume_ul: f64,
}

/// Volumes of stock and diluent that bring each item to
/// `final_concentration_um` in `total_volume_ul`.
///
/// Fails on the first item whose stock is weaker than the target.
pub fn calculate_dilutions(
    items: &[DilutionItem],
    final_concentration_um: f64,
    total_volume_ul: f64,
) -> Result<Vec<DilutionResult>, CalculationError> {
    if final_concentration_um <= 0.0 || total_volume_ul <= 0.0 {
        return Err(CalculationError::NonPositiveDilutionTarget);
    }
    items
        .iter()
        .map(|item| {
            let stock = item.stock_concentration_um;
            if stock <= 0.0 {
                return Err(CalculationError::NonPositiveStock {
                    test_article: item.test_article.clone(),
                });
            }
            if final_concentration_um > stock {
                return Err(CalculationError::FinalExceedsStock {
                    test_article: item.test_article.clone(),
                    final_um: final_concentration_um,
                    stock_um: stock,
                });
            }
            let source = final_concentration_um / stock * total_volume_ul;
            Ok(DilutionResult {
                test_article: item.test_article.clone(),
                stock_concentration_um: stock,
                final_concentration_um,
                total_volume_ul,
                source_volume_ul: round_volume(source),
                diluent_volume_ul: round_volume(total_volume_ul - source),
            })
        })
        .collect()
}
