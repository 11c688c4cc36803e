pub mod aircraft;
pub mod flight;
pub mod geography;
