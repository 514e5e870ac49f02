//! Reduces field candidates to one value per field.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::fields::{ConflictPolicy, FieldCatalog, FieldName};
use crate::models::result::{FieldCandidate, StructuredFields};

use super::Result;

/// Applies each field's catalog policy to its candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldResolver;

impl FieldResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve candidates in emission order. Fields without candidates are
    /// left out of the result. Inferred candidates only compete when a field
    /// has no labelled one.
    pub fn resolve(&self, candidates: &[FieldCandidate]) -> Result<StructuredFields> {
        let mut grouped: BTreeMap<FieldName, Vec<&FieldCandidate>> = BTreeMap::new();

        for candidate in candidates {
            let expected = FieldCatalog::value_type(candidate.field);
            let found = candidate.value.value_type();
            if expected != found {
                return Err(ExtractionError::TypeMismatch {
                    field: candidate.field,
                    expected,
                    found,
                });
            }
            grouped.entry(candidate.field).or_default().push(candidate);
        }

        let mut fields = StructuredFields::new();
        for (field, mut group) in grouped {
            if group.iter().any(|c| !c.inferred) {
                group.retain(|c| !c.inferred);
            }
            let policy = FieldCatalog::policy(field);
            if let Some(winner) = Self::pick(policy, &group) {
                debug!(
                    "{} = {} ({:?} of {} candidates)",
                    field,
                    winner.value,
                    policy,
                    group.len()
                );
                fields.insert(field, winner.value.clone());
            }
        }

        Ok(fields)
    }

    fn pick<'a>(policy: ConflictPolicy, group: &[&'a FieldCandidate]) -> Option<&'a FieldCandidate> {
        let candidates = group.iter().copied();
        match policy {
            // min_by_key keeps the first of equal keys, max_by_key the last
            ConflictPolicy::First => candidates.min_by_key(|c| c.source_line_index),
            ConflictPolicy::Last => candidates.max_by_key(|c| c.source_line_index),
            ConflictPolicy::Max => candidates.max_by_key(|c| c.value.as_integer()),
            ConflictPolicy::Longest => {
                candidates.min_by_key(|c| Reverse(c.value.to_string().chars().count()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::{FieldValue, ValueType};
    use pretty_assertions::assert_eq;

    fn candidate(field: FieldName, value: impl Into<FieldValue>, line: usize) -> FieldCandidate {
        FieldCandidate::new(field, value, line)
    }

    #[test]
    fn test_first_policy() {
        let fields = FieldResolver::new()
            .resolve(&[
                candidate(FieldName::OwnerName, "김철수", 2),
                candidate(FieldName::OwnerName, "홍길동", 5),
            ])
            .unwrap();
        assert_eq!(fields[&FieldName::OwnerName], FieldValue::from("김철수"));
    }

    #[test]
    fn test_labelled_candidate_beats_earlier_inferred() {
        let fields = FieldResolver::new()
            .resolve(&[
                FieldCandidate::inferred(FieldName::OwnerName, "승용", 1),
                FieldCandidate::inferred(FieldName::OwnerName, "흰색", 2),
                candidate(FieldName::OwnerName, "홍길동", 3),
            ])
            .unwrap();
        assert_eq!(fields[&FieldName::OwnerName], FieldValue::from("홍길동"));
    }

    #[test]
    fn test_inferred_candidates_used_without_label() {
        let fields = FieldResolver::new()
            .resolve(&[
                FieldCandidate::inferred(FieldName::OwnerName, "김철수", 4),
                FieldCandidate::inferred(FieldName::OwnerName, "홍길동", 6),
            ])
            .unwrap();
        assert_eq!(fields[&FieldName::OwnerName], FieldValue::from("김철수"));
    }

    #[test]
    fn test_last_policy() {
        let fields = FieldResolver::new()
            .resolve(&[
                candidate(FieldName::VehicleModel, "쏘나", 1),
                candidate(FieldName::VehicleModel, "쏘나타", 3),
            ])
            .unwrap();
        assert_eq!(fields[&FieldName::VehicleModel], FieldValue::from("쏘나타"));
    }

    #[test]
    fn test_max_policy() {
        let fields = FieldResolver::new()
            .resolve(&[
                candidate(FieldName::MileageKm, 1200i64, 0),
                candidate(FieldName::MileageKm, 15000i64, 1),
                candidate(FieldName::MileageKm, 300i64, 2),
            ])
            .unwrap();
        assert_eq!(fields[&FieldName::MileageKm], FieldValue::Integer(15000));
    }

    #[test]
    fn test_longest_policy_prefers_earliest_on_tie() {
        let fields = FieldResolver::new()
            .resolve(&[
                candidate(FieldName::RegisteredAddress, "서울시 강남구", 0),
                candidate(FieldName::RegisteredAddress, "서울시 강남구 테헤란로 123", 4),
                candidate(FieldName::RegisteredAddress, "부산시 해운대구 우동 1", 6),
                candidate(FieldName::RegisteredAddress, "서울시 서초구 서초대로 456", 7),
            ])
            .unwrap();
        assert_eq!(
            fields[&FieldName::RegisteredAddress],
            FieldValue::from("서울시 강남구 테헤란로 123")
        );
    }

    #[test]
    fn test_absent_fields_omitted() {
        let fields = FieldResolver::new()
            .resolve(&[candidate(FieldName::FuelType, "경유", 0)])
            .unwrap();
        assert_eq!(fields.len(), 1);
        assert!(!fields.contains_key(&FieldName::LicensePlate));
        assert!(FieldResolver::new().resolve(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let err = FieldResolver::new()
            .resolve(&[candidate(FieldName::MileageKm, "lots", 0)])
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::TypeMismatch {
                field: FieldName::MileageKm,
                expected: ValueType::Integer,
                found: ValueType::Text,
            }
        ));
    }
}
