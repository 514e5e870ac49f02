//! License plate and VIN detection.

use crate::extraction::patterns::{LICENSE_PLATE, VIN};
use crate::extraction::Result;
use crate::models::fields::FieldName;
use crate::models::result::FieldCandidate;

use super::FieldDetector;

/// Korean license plate, e.g. `12가3456`.
pub struct PlateDetector;

impl FieldDetector for PlateDetector {
    fn name(&self) -> &'static str {
        "license_plate"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        Ok(LICENSE_PLATE
            .captures(line)
            .map(|caps| FieldCandidate::new(FieldName::LicensePlate, &caps[1], index))
            .into_iter()
            .collect())
    }
}

/// 17-character vehicle identification number.
pub struct VinDetector;

impl FieldDetector for VinDetector {
    fn name(&self) -> &'static str {
        "chassis_number"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        Ok(VIN
            .captures(line)
            .map(|caps| FieldCandidate::new(FieldName::ChassisNumber, &caps[1], index))
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldValue;

    #[test]
    fn test_plate_whole_match() {
        let found = PlateDetector.detect("12가3456", 0).unwrap();
        assert_eq!(found, vec![FieldCandidate::new(FieldName::LicensePlate, "12가3456", 0)]);
    }

    #[test]
    fn test_plate_inside_label() {
        let found = PlateDetector.detect("자동차등록번호: 123로4567", 3).unwrap();
        assert_eq!(found[0].value, FieldValue::from("123로4567"));
        assert_eq!(found[0].source_line_index, 3);
    }

    #[test]
    fn test_plate_ignores_other_numbers() {
        assert!(PlateDetector.detect("2020년 03월 05일", 0).unwrap().is_empty());
    }

    #[test]
    fn test_vin() {
        let found = VinDetector.detect("차대번호 KMHD341CBKU123456", 1).unwrap();
        assert_eq!(found[0].value, FieldValue::from("KMHD341CBKU123456"));
        assert!(VinDetector.detect("kmhd341cbku123456", 1).unwrap().is_empty());
    }
}
