// src/math/mod.rs

pub mod derivative;
pub mod energy;
pub mod error;
pub mod integrator;

pub use derivative::derivatives;
pub use energy::total_energy;
pub use error::MathError;
pub use integrator::{integrate, SolverKind, SolverSettings};

/// 二重振り子の状態ベクトル [θ1, ω1, θ2, ω2]（ラジアン, rad/s）
pub type StateVector = [f64; 4];
