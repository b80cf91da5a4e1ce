// src/models/mod.rs

pub mod history;
pub mod pendulum;
pub mod trajectory;

pub use history::HistoryBuffer;
pub use pendulum::{InitialConditions, Pendulum, PhysicalParams};
pub use trajectory::Trajectory;
