//! Numeric measures: displacement, gross weight and mileage.

use crate::error::ExtractionError;
use crate::extraction::normalize::parse_grouped_int;
use crate::extraction::patterns::{DISPLACEMENT, GROSS_WEIGHT, MILEAGE};
use crate::extraction::Result;
use crate::models::fields::FieldName;
use crate::models::result::FieldCandidate;

use super::FieldDetector;

fn parse_int(field: FieldName, raw: &str) -> Result<i64> {
    parse_grouped_int(raw).ok_or_else(|| ExtractionError::Parse {
        field,
        value: raw.to_string(),
    })
}

/// Engine displacement, e.g. `1998cc` or `1,998cc`.
pub struct DisplacementDetector;

impl FieldDetector for DisplacementDetector {
    fn name(&self) -> &'static str {
        "engine_displacement"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        let Some(caps) = DISPLACEMENT.captures(line) else {
            return Ok(Vec::new());
        };
        let cc = parse_int(FieldName::EngineDisplacement, &caps[1])?;
        Ok(vec![FieldCandidate::new(FieldName::EngineDisplacement, cc, index)])
    }
}

/// 총중량 in kilograms, commas allowed.
pub struct GrossWeightDetector;

impl FieldDetector for GrossWeightDetector {
    fn name(&self) -> &'static str {
        "gross_weight"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        let Some(caps) = GROSS_WEIGHT.captures(line) else {
            return Ok(Vec::new());
        };
        let kg = parse_int(FieldName::GrossWeight, &caps[1])?;
        Ok(vec![FieldCandidate::new(FieldName::GrossWeight, kg, index)])
    }
}

/// Every `<n> km` mention; the resolver keeps the largest.
pub struct MileageDetector;

impl FieldDetector for MileageDetector {
    fn name(&self) -> &'static str {
        "mileage_km"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        let mut found = Vec::new();
        for caps in MILEAGE.captures_iter(line) {
            let km = parse_int(FieldName::MileageKm, &caps[1])?;
            if km > 0 {
                found.push(FieldCandidate::new(FieldName::MileageKm, km, index));
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldValue;

    #[test]
    fn test_displacement() {
        let found = DisplacementDetector.detect("배기량 1998 CC", 0).unwrap();
        assert_eq!(found[0].value, FieldValue::Integer(1998));
        assert!(DisplacementDetector.detect("배기량 8cc", 0).unwrap().is_empty());
    }

    #[test]
    fn test_gross_weight_with_commas() {
        let found = GrossWeightDetector.detect("총중량: 1,850 kg", 0).unwrap();
        assert_eq!(found[0].value, FieldValue::Integer(1850));
        let found = GrossWeightDetector.detect("총중량 2100kg", 0).unwrap();
        assert_eq!(found[0].value, FieldValue::Integer(2100));
        assert!(GrossWeightDetector.detect("공차중량 1,500kg", 0).unwrap().is_empty());
    }

    #[test]
    fn test_displacement_with_thousands_separator() {
        let found = DisplacementDetector.detect("배기량 1,998cc", 0).unwrap();
        assert_eq!(found[0].value, FieldValue::Integer(1998));
    }

    #[test]
    fn test_mileage_collects_every_mention() {
        let found = MileageDetector.detect("주행 1,200km / 점검 900 km", 2).unwrap();
        let kms: Vec<_> = found.iter().filter_map(|c| c.value.as_integer()).collect();
        assert_eq!(kms, vec![1200, 900]);
        assert!(found.iter().all(|c| c.source_line_index == 2));
    }

    #[test]
    fn test_zero_mileage_dropped() {
        assert!(MileageDetector.detect("0km", 0).unwrap().is_empty());
    }

    #[test]
    fn test_overflowing_number_is_an_error() {
        let err = MileageDetector.detect("99999999999999999999999 km", 0).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { field: FieldName::MileageKm, .. }));
    }
}
