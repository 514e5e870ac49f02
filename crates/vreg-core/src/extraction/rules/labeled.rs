//! Keyword-labeled text fields: model, owner, address, engine and color.

use crate::extraction::normalize::{contains_any, has_colon, value_after_colon};
use crate::extraction::patterns::{
    all_keywords, ADDRESS_KEYWORDS, CITY_MARKER, COLOR_KEYWORDS, DISTRICT_MARKER,
    ENGINE_KEYWORDS, FUEL_VOCABULARY, KOREAN_NAME, MODEL_KEYWORDS, OWNER_KEYWORDS,
};
use crate::extraction::Result;
use crate::models::fields::FieldName;
use crate::models::result::FieldCandidate;

use super::FieldDetector;

/// `<keyword> : <value>` lines. Without a colon the line yields nothing.
pub struct LabeledTextDetector {
    name: &'static str,
    field: FieldName,
    keywords: &'static [&'static str],
}

impl LabeledTextDetector {
    pub fn new(name: &'static str, field: FieldName, keywords: &'static [&'static str]) -> Self {
        Self {
            name,
            field,
            keywords,
        }
    }

    /// 차명 / 차종.
    pub fn vehicle_model() -> Self {
        Self::new("vehicle_model", FieldName::VehicleModel, MODEL_KEYWORDS)
    }

    /// 원동기형식 / 엔진번호.
    pub fn engine_number() -> Self {
        Self::new("engine_number", FieldName::EngineNumber, ENGINE_KEYWORDS)
    }

    /// 색상 / 차량색.
    pub fn vehicle_color() -> Self {
        Self::new("vehicle_color", FieldName::VehicleColor, COLOR_KEYWORDS)
    }
}

impl FieldDetector for LabeledTextDetector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        if !contains_any(line, self.keywords) {
            return Ok(Vec::new());
        }

        Ok(value_after_colon(line)
            .map(|value| FieldCandidate::new(self.field, value, index))
            .into_iter()
            .collect())
    }
}

/// Owner name from a 성명/소유자 label, or a line that is only a short
/// Hangul name. Bare names are emitted as inferred candidates so a labelled
/// owner anywhere in the document wins over them.
pub struct OwnerNameDetector;

impl OwnerNameDetector {
    fn is_bare_name(line: &str) -> bool {
        KOREAN_NAME.is_match(line)
            && !FUEL_VOCABULARY.iter().any(|f| *f == line)
            && !all_keywords().any(|k| line.contains(k))
    }
}

impl FieldDetector for OwnerNameDetector {
    fn name(&self) -> &'static str {
        "owner_name"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        let candidate = if contains_any(line, OWNER_KEYWORDS) {
            value_after_colon(line).map(|v| FieldCandidate::new(FieldName::OwnerName, v, index))
        } else if Self::is_bare_name(line) {
            Some(FieldCandidate::inferred(FieldName::OwnerName, line, index))
        } else {
            None
        };

        Ok(candidate.into_iter().collect())
    }
}

/// Registered address from a 주소/사용본거지 label, or any line naming both a
/// city (시) and a district (구).
pub struct AddressDetector;

impl FieldDetector for AddressDetector {
    fn name(&self) -> &'static str {
        "registered_address"
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        let triggered = contains_any(line, ADDRESS_KEYWORDS)
            || (line.contains(CITY_MARKER) && line.contains(DISTRICT_MARKER));
        if !triggered {
            return Ok(Vec::new());
        }

        let value = if has_colon(line) {
            value_after_colon(line)
        } else {
            Some(line.trim()).filter(|v| !v.is_empty())
        };

        Ok(value
            .map(|v| FieldCandidate::new(FieldName::RegisteredAddress, v, index))
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldValue;

    fn values(found: Vec<FieldCandidate>) -> Vec<FieldValue> {
        found.into_iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_vehicle_model_needs_colon() {
        let detector = LabeledTextDetector::vehicle_model();
        assert_eq!(
            values(detector.detect("차명: 쏘나타 (DN8)", 0).unwrap()),
            vec![FieldValue::from("쏘나타 (DN8)")]
        );
        assert_eq!(
            values(detector.detect("차종：승용 대형", 0).unwrap()),
            vec![FieldValue::from("승용 대형")]
        );
        assert!(detector.detect("차명 쏘나타", 0).unwrap().is_empty());
    }

    #[test]
    fn test_engine_and_color() {
        assert_eq!(
            values(LabeledTextDetector::engine_number().detect("원동기형식: G4KJ", 0).unwrap()),
            vec![FieldValue::from("G4KJ")]
        );
        assert_eq!(
            values(LabeledTextDetector::vehicle_color().detect("차량색: 흰색", 0).unwrap()),
            vec![FieldValue::from("흰색")]
        );
        assert!(LabeledTextDetector::vehicle_color().detect("색상 흰색", 0).unwrap().is_empty());
    }

    #[test]
    fn test_owner_from_label() {
        assert_eq!(
            values(OwnerNameDetector.detect("소유자: 홍길동", 0).unwrap()),
            vec![FieldValue::from("홍길동")]
        );
        // keyword without colon is not a bare name
        assert!(OwnerNameDetector.detect("성명", 0).unwrap().is_empty());
    }

    #[test]
    fn test_owner_label_is_not_inferred() {
        let found = OwnerNameDetector.detect("성명：홍길동", 4).unwrap();
        assert_eq!(found, vec![FieldCandidate::new(FieldName::OwnerName, "홍길동", 4)]);
    }

    #[test]
    fn test_owner_bare_name() {
        let found = OwnerNameDetector.detect("김철수", 1).unwrap();
        assert_eq!(found, vec![FieldCandidate::inferred(FieldName::OwnerName, "김철수", 1)]);
        assert!(found[0].inferred);
        assert!(OwnerNameDetector.detect("휘발유", 0).unwrap().is_empty());
        assert!(OwnerNameDetector.detect("홍길동님안녕하세요", 0).unwrap().is_empty());
        assert!(OwnerNameDetector.detect("김", 0).unwrap().is_empty());
    }

    #[test]
    fn test_address_city_district_without_colon() {
        assert_eq!(
            values(AddressDetector.detect("서울시 강남구 테헤란로 123", 0).unwrap()),
            vec![FieldValue::from("서울시 강남구 테헤란로 123")]
        );
    }

    #[test]
    fn test_address_label() {
        assert_eq!(
            values(AddressDetector.detect("사용본거지: 부산광역시 해운대구 우동", 0).unwrap()),
            vec![FieldValue::from("부산광역시 해운대구 우동")]
        );
        assert!(AddressDetector.detect("주소:", 0).unwrap().is_empty());
        assert!(AddressDetector.detect("차명: 쏘나타", 0).unwrap().is_empty());
    }
}
