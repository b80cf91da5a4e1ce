// src/config/parameters.rs

use serde::Deserialize;

use crate::math::SolverSettings;
use crate::models::history::MAX_HISTORY_LEN;
use crate::models::pendulum::{InitialConditions, PhysicalParams};
use crate::simulation::error::{
    require_count, require_finite, require_non_negative, require_positive, SimulationError,
};

/// 振り子1本分の物理パラメータと、アンサンブル共通の初期条件
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PendulumParameters {
    pub m1: f64,     // 第1質点の質量 (kg)
    pub m2: f64,     // 第2質点の質量 (kg)
    pub l1: f64,     // 第1リンク長 (m)
    pub l2: f64,     // 第2リンク長 (m)
    pub theta2: f64, // 第2リンクの初期角度 (度)
    pub omega1: f64, // 第1リンクの初期角速度 (度/s)
    pub omega2: f64, // 第2リンクの初期角速度 (度/s)
}

impl Default for PendulumParameters {
    fn default() -> Self {
        Self {
            m1: 1.0,
            m2: 1.0,
            l1: 2.0,
            l2: 2.0,
            theta2: -10.0,
            omega1: 0.0,
            omega2: 0.0,
        }
    }
}

impl PendulumParameters {
    pub fn physical(&self) -> PhysicalParams {
        PhysicalParams {
            m1: self.m1,
            m2: self.m2,
            l1: self.l1,
            l2: self.l2,
        }
    }

    /// 第1リンクの角度だけを与えて初期条件を組み立てる
    pub fn initial_conditions(&self, theta1: f64) -> InitialConditions {
        InitialConditions {
            theta1,
            omega1: self.omega1,
            theta2: self.theta2,
            omega2: self.omega2,
        }
    }
}

/// 時間軸・積分器・描画用履歴の設定
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationParameters {
    pub gravity: f64,       // 重力加速度 (m/s²)
    pub dt: f64,            // 出力時刻の間隔 (s)
    pub duration: f64,      // シミュレーション時間 (s)
    pub history_len: usize, // 軌跡として保持する点数
    pub parallel: bool,     // 振り子ごとの積分を並列に行うか
    pub solver: SolverSettings,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            dt: 0.01,
            duration: 30.0,
            history_len: 200,
            parallel: true,
            solver: SolverSettings::default(),
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_finite("gravity", self.gravity)?;
        require_positive("dt", self.dt)?;
        require_positive("duration", self.duration)?;
        require_count("history_len", self.history_len, MAX_HISTORY_LEN)?;
        require_positive("solver.tol_abs", self.solver.tol_abs)?;
        require_non_negative("solver.tol_rel", self.solver.tol_rel)?;
        require_positive("solver.max_steps", self.solver.max_steps as f64)?;
        Ok(())
    }
}
