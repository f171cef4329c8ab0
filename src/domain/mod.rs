// Domain layer: core models and ports (interfaces). Only std/serde/chrono types appear here.

pub mod model;
pub mod ports;
