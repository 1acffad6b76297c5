// Domain layer: records, read-only views and ports. No dependencies beyond chrono.

pub mod model;
pub mod ports;
