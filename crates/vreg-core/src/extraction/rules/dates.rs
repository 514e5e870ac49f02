//! Keyword-qualified `YYYY년 MM월 DD일` dates.

use chrono::NaiveDate;

use crate::error::ExtractionError;
use crate::extraction::normalize::contains_any;
use crate::extraction::patterns::{
    BIRTH_DATE_KEYWORDS, KOREAN_DATE, MANUFACTURING_DATE_KEYWORDS, REGISTRATION_DATE_KEYWORDS,
};
use crate::extraction::Result;
use crate::models::fields::FieldName;
use crate::models::result::FieldCandidate;

use super::FieldDetector;

/// Date field selected by the keyword on the same line, so a registration
/// date and a manufacturing date never compete for one field.
pub struct DateDetector {
    name: &'static str,
    field: FieldName,
    keywords: &'static [&'static str],
}

impl DateDetector {
    /// 생년월일.
    pub fn birth() -> Self {
        Self {
            name: "birth_date",
            field: FieldName::BirthDate,
            keywords: BIRTH_DATE_KEYWORDS,
        }
    }

    /// 최초등록(일).
    pub fn initial_registration() -> Self {
        Self {
            name: "initial_registration_date",
            field: FieldName::InitialRegistrationDate,
            keywords: REGISTRATION_DATE_KEYWORDS,
        }
    }

    /// 제조 / 제작.
    pub fn manufacturing() -> Self {
        Self {
            name: "manufacturing_date",
            field: FieldName::ManufacturingDate,
            keywords: MANUFACTURING_DATE_KEYWORDS,
        }
    }
}

impl FieldDetector for DateDetector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>> {
        if !contains_any(line, self.keywords) {
            return Ok(Vec::new());
        }
        let Some(caps) = KOREAN_DATE.captures(line) else {
            return Ok(Vec::new());
        };

        let parse_error = || ExtractionError::Parse {
            field: self.field,
            value: caps[0].to_string(),
        };

        let year: i32 = caps[1].parse().map_err(|_| parse_error())?;
        let month: u32 = caps[2].parse().map_err(|_| parse_error())?;
        let day: u32 = caps[3].parse().map_err(|_| parse_error())?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(parse_error)?;

        Ok(vec![FieldCandidate::new(self.field, date, index)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldValue;

    fn ymd(y: i32, m: u32, d: u32) -> FieldValue {
        FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_registration_date() {
        let found = DateDetector::initial_registration()
            .detect("최초등록일 2020년 03월 05일", 0)
            .unwrap();
        assert_eq!(found[0].field, FieldName::InitialRegistrationDate);
        assert_eq!(found[0].value, ymd(2020, 3, 5));
    }

    #[test]
    fn test_single_digit_parts_are_padded() {
        let found = DateDetector::birth().detect("생년월일: 1985년 7월 9일", 0).unwrap();
        assert_eq!(found[0].value.to_string(), "1985-07-09");
    }

    #[test]
    fn test_keyword_selects_field() {
        let line = "제조일자 2019년 11월 20일";
        assert!(DateDetector::initial_registration().detect(line, 0).unwrap().is_empty());
        let found = DateDetector::manufacturing().detect(line, 0).unwrap();
        assert_eq!(found[0].value, ymd(2019, 11, 20));
    }

    #[test]
    fn test_misread_manufacturing_keyword() {
        let found = DateDetector::manufacturing().detect("제장연월 2018년 1월 2일", 0).unwrap();
        assert_eq!(found[0].value, ymd(2018, 1, 2));
    }

    #[test]
    fn test_keyword_without_date() {
        assert!(DateDetector::birth().detect("생년월일", 0).unwrap().is_empty());
    }

    #[test]
    fn test_impossible_date_is_an_error() {
        let err = DateDetector::birth().detect("생년월일 1990년 13월 40일", 0).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { field: FieldName::BirthDate, .. }));
    }
}
