//! CLI command implementations

pub mod estimate;
pub mod metals;
pub mod model;
pub mod thermo;
