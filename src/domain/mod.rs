// Domain layer: listing records and the ports the harvest pipeline is wired through.

pub mod model;
pub mod ports;
