//! Owner/vehicle view over the flat field record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::FieldName;
use super::result::StructuredFields;

/// Normalized fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Lpg,
    Hybrid,
    Cng,
    Hydrogen,
}

impl FuelType {
    /// Parse a fuel word as printed on a certificate or in English.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "휘발유" | "가솔린" | "gasoline" => Some(FuelType::Gasoline),
            "경유" | "디젤" | "diesel" => Some(FuelType::Diesel),
            "전기" | "electric" => Some(FuelType::Electric),
            "lpg" => Some(FuelType::Lpg),
            "하이브리드" | "hybrid" => Some(FuelType::Hybrid),
            "cng" => Some(FuelType::Cng),
            "수소" | "hydrogen" => Some(FuelType::Hydrogen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Lpg => "lpg",
            FuelType::Hybrid => "hybrid",
            FuelType::Cng => "cng",
            FuelType::Hydrogen => "hydrogen",
        }
    }

    /// Label as printed on Korean documents.
    pub fn korean_label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "휘발유",
            FuelType::Diesel => "경유",
            FuelType::Electric => "전기",
            FuelType::Lpg => "LPG",
            FuelType::Hybrid => "하이브리드",
            FuelType::Cng => "CNG",
            FuelType::Hydrogen => "수소",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

/// Registered vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelType>,
    /// Initial registration date, or the manufacturing date when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_registered_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_km: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displacement_cc: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Extracted fields grouped by owner and vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub owner: OwnerInfo,
    pub vehicle: VehicleInfo,
}

impl RegistrationSummary {
    pub fn from_fields(fields: &StructuredFields) -> Self {
        let text = |f: FieldName| fields.get(&f).and_then(|v| v.as_text()).map(str::to_string);
        let int = |f: FieldName| fields.get(&f).and_then(|v| v.as_integer());
        let date = |f: FieldName| fields.get(&f).and_then(|v| v.as_date());

        let manufacturing_date = date(FieldName::ManufacturingDate);

        Self {
            owner: OwnerInfo {
                name: text(FieldName::OwnerName),
                address: text(FieldName::RegisteredAddress),
                birth_date: date(FieldName::BirthDate),
            },
            vehicle: VehicleInfo {
                plate: text(FieldName::LicensePlate),
                vin: text(FieldName::ChassisNumber),
                model: text(FieldName::VehicleModel),
                fuel: text(FieldName::FuelType).and_then(|f| FuelType::from_str(&f)),
                first_registered_at: date(FieldName::InitialRegistrationDate)
                    .or(manufacturing_date),
                manufacturing_date,
                mileage_km: int(FieldName::MileageKm),
                weight_kg: int(FieldName::GrossWeight),
                displacement_cc: int(FieldName::EngineDisplacement),
                engine_number: text(FieldName::EngineNumber),
                color: text(FieldName::VehicleColor),
            },
        }
    }
}
