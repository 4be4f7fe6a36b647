// Domain layer: response shapes and ports (interfaces). No HTTP here.

pub mod model;
pub mod ports;
