// src/simulation/ensemble.rs

use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::config::{PendulumParameters, Scenario, SimulationParameters};
use crate::models::Pendulum;
use crate::simulation::error::SimulationError;
use crate::simulation::time_base::TimeBase;

/// 1フレーム分の描画データ
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumFrame {
    pub polyline: [[f64; 2]; 3], // [原点, 第1関節, 第2関節]
    pub history: Vec<[f64; 2]>,  // 第2関節の軌跡（先頭が最新）
}

/// 初期角度だけが異なる振り子の集合
///
/// 構築が成功した時点で全振り子の軌道は計算済み。フレームは外部から
/// 0 から M-1 まで順に進める。
#[derive(Debug, Clone)]
pub struct Ensemble {
    time_base: TimeBase,
    pendulums: Vec<Pendulum>,
}

impl Ensemble {
    /// 共通の時刻列と N 本の振り子を構築する
    ///
    /// # 引数
    /// - `pendulum`: 物理パラメータと θ1 以外の初期条件
    /// - `simulation`: 時間軸・積分器の設定
    /// - `scenario`: 本数と θ1 の基準値・ずれ
    ///
    /// # 戻り値
    /// - 全振り子の軌道計算が成功した場合のアンサンブル。
    ///   失敗した場合は番号が最も小さい振り子のエラー（部分的な結果は返さない）
    pub fn new(
        pendulum: &PendulumParameters,
        simulation: &SimulationParameters,
        scenario: &Scenario,
    ) -> Result<Self, SimulationError> {
        simulation.validate()?;
        scenario.validate()?;
        let params = pendulum.physical();
        params.validate()?;

        let started = Instant::now();
        let time_base = TimeBase::new(simulation.duration, simulation.dt)?;

        let build = |index: usize| {
            let initial = pendulum.initial_conditions(scenario.theta1(index));
            Pendulum::new(params, initial, &time_base, simulation).map_err(|source| {
                SimulationError::Pendulum {
                    index,
                    source: Box::new(source),
                }
            })
        };

        // 並列でも結果は番号順に集めるので、逐次の場合と同一になる
        let results: Vec<Result<Pendulum, SimulationError>> = if simulation.parallel {
            (0..scenario.count).into_par_iter().map(&build).collect()
        } else {
            (0..scenario.count).map(&build).collect()
        };
        let pendulums = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        info!(
            "アンサンブルを構築しました: 振り子 {} 本, フレーム数 {}, 所要時間 {:?}",
            pendulums.len(),
            time_base.len(),
            started.elapsed()
        );

        Ok(Self { time_base, pendulums })
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    pub fn pendulums(&self) -> &[Pendulum] {
        &self.pendulums
    }

    pub fn len(&self) -> usize {
        self.pendulums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pendulums.is_empty()
    }

    /// 共通のフレーム数 M
    pub fn frame_count(&self) -> usize {
        self.time_base.len()
    }

    /// 描画範囲の決定に使う振り子の長さ（全振り子で共通）
    pub fn combined_length(&self) -> f64 {
        self.pendulums
            .iter()
            .map(Pendulum::combined_length)
            .fold(0.0, f64::max)
    }

    /// 全振り子を番号順に1フレーム進める
    ///
    /// 範囲外のフレームではどの振り子の履歴も変更しない。
    pub fn advance_all(&mut self, frame: usize) -> Result<Vec<PendulumFrame>, SimulationError> {
        let frame_count = self.frame_count();
        if frame >= frame_count {
            return Err(SimulationError::FrameOutOfRange { frame, frame_count });
        }

        self.pendulums
            .iter_mut()
            .map(|pendulum| -> Result<PendulumFrame, SimulationError> {
                let polyline = pendulum.advance(frame)?;
                Ok(PendulumFrame {
                    polyline,
                    history: pendulum.history().to_vec(),
                })
            })
            .collect()
    }

    /// 指定フレームにおける、振り子0の第2関節から最も離れた第2関節までの距離
    pub fn max_spread(&self, frame: usize) -> Result<f64, SimulationError> {
        let frame_count = self.frame_count();
        if frame >= frame_count {
            return Err(SimulationError::FrameOutOfRange { frame, frame_count });
        }

        let reference = match self.pendulums.first() {
            Some(pendulum) => pendulum.trajectory().joint2()[frame],
            None => return Ok(0.0),
        };
        let spread = self
            .pendulums
            .iter()
            .map(|pendulum| {
                let p = pendulum.trajectory().joint2()[frame];
                (p[0] - reference[0]).hypot(p[1] - reference[1])
            })
            .fold(0.0, f64::max);
        Ok(spread)
    }
}
