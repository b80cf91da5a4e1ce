// src/simulation/mod.rs

pub mod csv;
pub mod ensemble;
pub mod error;
pub mod framework;
pub mod load_parameters;
pub mod time_base;

pub use ensemble::{Ensemble, PendulumFrame};
pub use error::SimulationError;
pub use time_base::TimeBase;
