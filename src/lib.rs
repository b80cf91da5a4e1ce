// src/lib.rs

//! 初期角度をわずかにずらした二重振り子の集合をシミュレーションし、
//! 描画・出力側が使う関節位置の時系列を事前に計算する。

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{PendulumParameters, Scenario, SimulationParameters};
pub use models::{HistoryBuffer, Pendulum, PhysicalParams};
pub use simulation::{Ensemble, PendulumFrame, SimulationError, TimeBase};
