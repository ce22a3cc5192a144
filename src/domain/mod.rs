// Domain layer: request/response models and the product API port.

pub mod model;
pub mod ports;
