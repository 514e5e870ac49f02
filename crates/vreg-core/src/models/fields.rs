//! Field names, value types and the static field catalog.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every field the line classifier can produce.
///
/// The declaration order is also the key order of the serialized
/// `structured_fields` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    LicensePlate,
    ChassisNumber,
    VehicleModel,
    OwnerName,
    RegisteredAddress,
    BirthDate,
    InitialRegistrationDate,
    ManufacturingDate,
    EngineDisplacement,
    GrossWeight,
    FuelType,
    MileageKm,
    EngineNumber,
    VehicleColor,
}

impl FieldName {
    /// All fields, in catalog order.
    pub const ALL: [FieldName; 14] = [
        FieldName::LicensePlate,
        FieldName::ChassisNumber,
        FieldName::VehicleModel,
        FieldName::OwnerName,
        FieldName::RegisteredAddress,
        FieldName::BirthDate,
        FieldName::InitialRegistrationDate,
        FieldName::ManufacturingDate,
        FieldName::EngineDisplacement,
        FieldName::GrossWeight,
        FieldName::FuelType,
        FieldName::MileageKm,
        FieldName::EngineNumber,
        FieldName::VehicleColor,
    ];

    /// Snake-case key used in the output record.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::LicensePlate => "license_plate",
            FieldName::ChassisNumber => "chassis_number",
            FieldName::VehicleModel => "vehicle_model",
            FieldName::OwnerName => "owner_name",
            FieldName::RegisteredAddress => "registered_address",
            FieldName::BirthDate => "birth_date",
            FieldName::InitialRegistrationDate => "initial_registration_date",
            FieldName::ManufacturingDate => "manufacturing_date",
            FieldName::EngineDisplacement => "engine_displacement",
            FieldName::GrossWeight => "gross_weight",
            FieldName::FuelType => "fuel_type",
            FieldName::MileageKm => "mileage_km",
            FieldName::EngineNumber => "engine_number",
            FieldName::VehicleColor => "vehicle_color",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Integer,
    Date,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Text => write!(f, "text"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Date => write!(f, "date"),
        }
    }
}

/// Rule for picking one value when several candidates exist for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Candidate from the earliest line.
    First,
    /// Candidate from the latest line.
    Last,
    /// Numerically largest candidate.
    Max,
    /// Candidate with the most characters; earliest on ties.
    Longest,
}

/// A resolved or candidate field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    /// Serialized as `YYYY-MM-DD`.
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Integer(_) => ValueType::Integer,
            FieldValue::Date(_) => ValueType::Date,
            FieldValue::Text(_) => ValueType::Text,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// Catalog entry for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub value_type: ValueType,
    pub policy: ConflictPolicy,
}

/// Static mapping from field to value type and conflict policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCatalog;

impl FieldCatalog {
    /// Look up the declaration for a field.
    pub fn spec(field: FieldName) -> FieldSpec {
        use ConflictPolicy::*;
        use ValueType::*;

        let (value_type, policy) = match field {
            FieldName::LicensePlate => (Text, First),
            FieldName::ChassisNumber => (Text, First),
            FieldName::VehicleModel => (Text, Last),
            FieldName::OwnerName => (Text, First),
            FieldName::RegisteredAddress => (Text, Longest),
            FieldName::BirthDate => (Date, Last),
            FieldName::InitialRegistrationDate => (Date, Last),
            FieldName::ManufacturingDate => (Date, Last),
            FieldName::EngineDisplacement => (Integer, Last),
            FieldName::GrossWeight => (Integer, Last),
            FieldName::FuelType => (Text, First),
            FieldName::MileageKm => (Integer, Max),
            FieldName::EngineNumber => (Text, Last),
            FieldName::VehicleColor => (Text, Last),
        };

        FieldSpec { value_type, policy }
    }

    pub fn policy(field: FieldName) -> ConflictPolicy {
        Self::spec(field).policy
    }

    pub fn value_type(field: FieldName) -> ValueType {
        Self::spec(field).value_type
    }
}
