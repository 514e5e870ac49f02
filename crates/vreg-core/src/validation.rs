//! Sanity checks over extracted registration fields.

use serde::Serialize;

use crate::extraction::patterns::{LICENSE_PLATE_STRICT, VIN_STRICT};
use crate::models::fields::FieldName;
use crate::models::result::StructuredFields;

/// Problems found in an extraction. Errors mark a record that cannot be used
/// as-is; warnings mark values worth a manual look.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validate resolved fields. Never changes the fields themselves.
pub fn validate(fields: &StructuredFields) -> ValidationReport {
    let mut report = ValidationReport::default();
    let text = |f: FieldName| fields.get(&f).and_then(|v| v.as_text());

    match text(FieldName::LicensePlate) {
        None => report.errors.push("Vehicle plate number is required".to_string()),
        Some(plate) if !LICENSE_PLATE_STRICT.is_match(plate) => {
            report.warnings.push(format!("License plate format may be invalid: {}", plate))
        }
        Some(_) => {}
    }

    if text(FieldName::OwnerName).is_none() {
        report.errors.push("Owner name is required".to_string());
    }

    match text(FieldName::ChassisNumber) {
        None => report.warnings.push("Vehicle VIN is missing".to_string()),
        Some(vin) if !VIN_STRICT.is_match(&vin.to_uppercase()) => report
            .warnings
            .push("VIN format may be invalid (17 characters, no I/O/Q)".to_string()),
        Some(_) => {}
    }

    for field in [FieldName::MileageKm, FieldName::GrossWeight, FieldName::EngineDisplacement] {
        if let Some(n) = fields.get(&field).and_then(|v| v.as_integer()) {
            if n < 0 {
                report.warnings.push(format!("{} cannot be negative", field));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldValue;

    fn fields(entries: &[(FieldName, FieldValue)]) -> StructuredFields {
        entries.iter().cloned().collect()
    }

    #[test]
    fn test_complete_record_is_clean() {
        let report = validate(&fields(&[
            (FieldName::LicensePlate, FieldValue::from("12가3456")),
            (FieldName::OwnerName, FieldValue::from("홍길동")),
            (FieldName::ChassisNumber, FieldValue::from("KMHE341CBLA123456")),
        ]));
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_required_fields() {
        let report = validate(&StructuredFields::new());
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.warnings, vec!["Vehicle VIN is missing".to_string()]);
    }

    #[test]
    fn test_format_warnings() {
        let report = validate(&fields(&[
            (FieldName::LicensePlate, FieldValue::from("12가34567")),
            (FieldName::OwnerName, FieldValue::from("홍길동")),
            (FieldName::ChassisNumber, FieldValue::from("KMHE341CBLA12345")),
            (FieldName::MileageKm, FieldValue::Integer(-5)),
        ]));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 3);
    }
}
