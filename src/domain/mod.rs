// Domain layer: the data source descriptor and the ports the engine talks through.

pub mod model;
pub mod ports;
