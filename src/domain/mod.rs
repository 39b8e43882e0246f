// Domain layer: passenger model and the repository port. No storage or transport code here.

pub mod model;
pub mod ports;
