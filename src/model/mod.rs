mod check;
mod checklist;
mod validation;
mod vehicle;

pub use check::{Check, CheckReceipt, normalize_note};
pub use checklist::{CheckItem, CheckItemKey, CheckStatus, Checklist};
pub use validation::{
    LocalValidationError, ODOMETER_FIELD, VEHICLE_FIELD, ValidationErrorDetail,
    parse_odometer_lenient, validate_odometer, validate_vehicle_id,
};
pub use vehicle::{Vehicle, VehicleDirectory};
