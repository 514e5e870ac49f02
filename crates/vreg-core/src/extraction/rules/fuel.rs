//! Fuel type from a fixed vocabulary.

use crate::extraction::patterns::FUEL_VOCABULARY;
use crate::extraction::Result;
use crate::models::fields::FieldName;
use crate::models::result::FieldCandidate;

use super::FieldDetector;

/// First vocabulary word contained in the line.
pub struct FuelDetector;

impl FieldDetector for FuelDetector {
    fn name(&self) -> &'static str {
        "fuel_type"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        Ok(FUEL_VOCABULARY
            .iter()
            .find(|fuel| line.contains(*fuel))
            .map(|fuel| FieldCandidate::new(FieldName::FuelType, *fuel, index))
            .into_iter()
            .collect())
    }
}
