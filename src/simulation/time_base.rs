// src/simulation/time_base.rs

use crate::simulation::error::{require_positive, SimulationError};

/// 時刻列の要素数の上限
pub const MAX_SAMPLES: usize = 10_000_000;

/// アンサンブル全体で共有する等間隔の時刻列 [0, duration)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBase {
    dt: f64,
    samples: Vec<f64>,
}

impl TimeBase {
    /// 0 から `duration` 未満まで `dt` 刻みの時刻列を作る
    ///
    /// # 引数
    /// - `duration`: シミュレーション時間（秒）
    /// - `dt`: 時刻の間隔（秒）
    ///
    /// # 戻り値
    /// - ceil(duration / dt) 個の時刻 t_i = i * dt。
    ///   個数が `MAX_SAMPLES` を超える場合は `duration` の不正として拒否する
    pub fn new(duration: f64, dt: f64) -> Result<Self, SimulationError> {
        require_positive("duration", duration)?;
        require_positive("dt", dt)?;

        let ratio = (duration / dt).ceil();
        if !ratio.is_finite() || ratio > MAX_SAMPLES as f64 {
            return Err(SimulationError::InvalidParameter { name: "duration", value: duration });
        }
        let count = ratio as usize;
        let samples = (0..count).map(|i| i as f64 * dt).collect();
        Ok(Self { dt, samples })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// フレーム番号に対応する時刻
    pub fn time(&self, frame: usize) -> Option<f64> {
        self.samples.get(frame).copied()
    }
}
