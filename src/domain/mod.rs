// Domain layer: core models and ports (interfaces). No I/O beyond serde derives.

pub mod model;
pub mod ports;
