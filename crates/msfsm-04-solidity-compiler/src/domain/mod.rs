//! Domain layer: compiler input/output model.

pub mod entities;
pub mod standard_json;
pub mod version;
