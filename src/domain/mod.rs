// Domain layer: contract data models and the transport port.

pub mod model;
pub mod ports;
