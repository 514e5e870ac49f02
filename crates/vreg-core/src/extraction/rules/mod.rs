//! Rule-based field detectors for Korean vehicle registration certificates.

pub mod dates;
pub mod fuel;
pub mod identifiers;
pub mod labeled;
pub mod measures;

pub use dates::DateDetector;
pub use fuel::FuelDetector;
pub use identifiers::{PlateDetector, VinDetector};
pub use labeled::{AddressDetector, LabeledTextDetector, OwnerNameDetector};
pub use measures::{DisplacementDetector, GrossWeightDetector, MileageDetector};

use crate::models::result::FieldCandidate;

use super::Result;

/// A single independent matcher run against every line.
pub trait FieldDetector: Send + Sync {
    /// Short name used in logs and warnings.
    fn name(&self) -> &'static str;

    /// Produce zero or more candidates from one cleaned line.
    fn detect(&self, line: &str, index: usize) -> Result<Vec<FieldCandidate>>;
}

/// The full detector battery, in evaluation order.
pub fn default_detectors() -> Vec<Box<dyn FieldDetector>> {
    vec![
        Box::new(PlateDetector),
        Box::new(VinDetector),
        Box::new(LabeledTextDetector::vehicle_model()),
        Box::new(OwnerNameDetector),
        Box::new(AddressDetector),
        Box::new(DateDetector::birth()),
        Box::new(DateDetector::initial_registration()),
        Box::new(DateDetector::manufacturing()),
        Box::new(DisplacementDetector),
        Box::new(GrossWeightDetector),
        Box::new(FuelDetector),
        Box::new(MileageDetector),
        Box::new(LabeledTextDetector::engine_number()),
        Box::new(LabeledTextDetector::vehicle_color()),
    ]
}
