// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::{PendulumParameters, SimulationParameters};
pub use scenario::Scenario;
