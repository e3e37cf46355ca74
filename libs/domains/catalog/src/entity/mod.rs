//! SeaORM entities and the conversions between persisted rows and domain
//! models. Conversions are pure; no field is computed or defaulted here.

pub mod category;
pub mod product;
