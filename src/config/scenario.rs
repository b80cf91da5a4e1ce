// src/config/scenario.rs

use serde::Deserialize;

use crate::simulation::error::{require_finite, SimulationError};

/// アンサンブルの構成（振り子 i の θ1 = base_angle - i * delta）
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub count: usize,    // 振り子の本数
    pub base_angle: f64, // 基準となる第1リンクの初期角度 (度)
    pub delta: f64,      // 振り子ごとの初期角度のずれ (度)
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            count: 5,
            base_angle: 120.0,
            delta: 0.005,
        }
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.count == 0 {
            return Err(SimulationError::InvalidParameter { name: "count", value: 0.0 });
        }
        require_finite("base_angle", self.base_angle)?;
        require_finite("delta", self.delta)?;
        Ok(())
    }

    /// 振り子 `index` の第1リンク初期角度（度）
    pub fn theta1(&self, index: usize) -> f64 {
        self.base_angle - index as f64 * self.delta
    }
}
