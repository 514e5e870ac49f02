//! Precompiled patterns and keyword tables for registration certificates.

use lazy_static::lazy_static;
use regex::Regex;

/// Hangul syllables that appear as the use/class mark on Korean plates.
pub const PLATE_SYLLABLES: &str =
    "가나다라마거너더러머버서어저고노도로모보소오조구누두루무부수우주바사아자배하허호육해공국합";

lazy_static! {
    // 12가3456, 123나4567; the surrounding non-digits keep longer runs out
    pub static ref LICENSE_PLATE: Regex = Regex::new(&format!(
        r"(?:^|\D)(\d{{2,3}}[{}]\d{{4}})(?:\D|$)",
        PLATE_SYLLABLES
    )).unwrap();

    pub static ref LICENSE_PLATE_STRICT: Regex = Regex::new(&format!(
        r"^\d{{2,3}}[{}]\d{{4}}$",
        PLATE_SYLLABLES
    )).unwrap();

    // VIN: 17 characters, I/O/Q never used
    pub static ref VIN: Regex = Regex::new(
        r"(?:^|[^A-Za-z0-9])([A-HJ-NPR-Z0-9]{17})(?:[^A-Za-z0-9]|$)"
    ).unwrap();

    pub static ref VIN_STRICT: Regex = Regex::new(
        r"^[A-HJ-NPR-Z0-9]{17}$"
    ).unwrap();

    // 2020년 03월 05일
    pub static ref KOREAN_DATE: Regex = Regex::new(
        r"(\d{4})\s*년\s*(\d{1,2})\s*월\s*(\d{1,2})\s*일"
    ).unwrap();

    // 1998cc or 1,998cc; a number glued to a preceding comma is not a start
    pub static ref DISPLACEMENT: Regex = Regex::new(
        r"(?i)(?:^|[^\d,])(\d{1,2},\d{3}|\d{2,5})\s*cc"
    ).unwrap();

    pub static ref GROSS_WEIGHT: Regex = Regex::new(
        r"(?i)총중량\s*[:：]?\s*(\d[\d,]*)\s*kg"
    ).unwrap();

    pub static ref MILEAGE: Regex = Regex::new(
        r"(?i)(\d[\d,]*)\s*km"
    ).unwrap();

    // Bare personal name: 2-5 Hangul syllables and nothing else
    pub static ref KOREAN_NAME: Regex = Regex::new(
        r"^[가-힣]{2,5}$"
    ).unwrap();
}

pub const MODEL_KEYWORDS: &[&str] = &["차명", "차종"];
pub const OWNER_KEYWORDS: &[&str] = &["성명", "소유자"];
pub const ADDRESS_KEYWORDS: &[&str] = &["주소", "사용본거지"];
pub const CITY_MARKER: &str = "시";
pub const DISTRICT_MARKER: &str = "구";
pub const BIRTH_DATE_KEYWORDS: &[&str] = &["생년월일"];
pub const REGISTRATION_DATE_KEYWORDS: &[&str] = &["최초등록", "등록일"];
// 제장 is a frequent misread of 제작
pub const MANUFACTURING_DATE_KEYWORDS: &[&str] = &["제조", "제작", "제장"];
pub const ENGINE_KEYWORDS: &[&str] = &["원동기형식", "엔진번호"];
pub const COLOR_KEYWORDS: &[&str] = &["색상", "차량색"];
pub const WEIGHT_KEYWORDS: &[&str] = &["총중량"];
pub const MILEAGE_KEYWORDS: &[&str] = &["주행거리"];

/// Fuel words, checked in this order.
pub const FUEL_VOCABULARY: &[&str] = &[
    "휘발유",
    "경유",
    "전기",
    "LPG",
    "하이브리드",
    "CNG",
    "수소",
    "가솔린",
    "디젤",
];

/// Every label keyword; a line containing one of these is never a bare name.
pub fn all_keywords() -> impl Iterator<Item = &'static str> {
    [
        MODEL_KEYWORDS,
        OWNER_KEYWORDS,
        ADDRESS_KEYWORDS,
        BIRTH_DATE_KEYWORDS,
        REGISTRATION_DATE_KEYWORDS,
        MANUFACTURING_DATE_KEYWORDS,
        ENGINE_KEYWORDS,
        COLOR_KEYWORDS,
        WEIGHT_KEYWORDS,
        MILEAGE_KEYWORDS,
    ]
    .into_iter()
    .flatten()
    .copied()
}
