// src/models/pendulum.rs

use log::debug;

use crate::config::parameters::SimulationParameters;
use crate::math::{derivatives, integrate, total_energy, StateVector};
use crate::models::history::{HistoryBuffer, MAX_HISTORY_LEN};
use crate::models::trajectory::Trajectory;
use crate::simulation::error::{require_count, require_finite, require_positive, SimulationError};
use crate::simulation::time_base::TimeBase;

/// 振り子の物理パラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParams {
    pub m1: f64, // 第1質点の質量 (kg)
    pub m2: f64, // 第2質点の質量 (kg)
    pub l1: f64, // 第1リンク長 (m)
    pub l2: f64, // 第2リンク長 (m)
}

impl PhysicalParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("m1", self.m1)?;
        require_positive("m2", self.m2)?;
        require_positive("l1", self.l1)?;
        require_positive("l2", self.l2)?;
        Ok(())
    }
}

/// 初期条件（度, 度/s）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub theta1: f64,
    pub omega1: f64,
    pub theta2: f64,
    pub omega2: f64,
}

impl InitialConditions {
    /// ラジアン単位の状態ベクトルへ変換する
    pub fn to_state(&self) -> StateVector {
        [
            self.theta1.to_radians(),
            self.omega1.to_radians(),
            self.theta2.to_radians(),
            self.omega2.to_radians(),
        ]
    }

    fn validate(&self) -> Result<(), SimulationError> {
        require_finite("theta1", self.theta1)?;
        require_finite("omega1", self.omega1)?;
        require_finite("theta2", self.theta2)?;
        require_finite("omega2", self.omega2)?;
        Ok(())
    }
}

/// 二重振り子1本分のエンティティ
///
/// 構築時に全時刻の軌道を計算し、以降は描画用の履歴だけが変化する。
#[derive(Debug, Clone)]
pub struct Pendulum {
    params: PhysicalParams,
    initial: StateVector,
    gravity: f64,
    trajectory: Trajectory,
    history: HistoryBuffer,
}

impl Pendulum {
    /// パラメータを検証し、時刻列に沿って軌道を積分して振り子を構築する
    ///
    /// # 引数
    /// - `params`: 質量とリンク長
    /// - `initial`: 初期角度・初期角速度（度単位）
    /// - `time_base`: 出力時刻の列
    /// - `settings`: 重力加速度・積分器・履歴長
    ///
    /// # 戻り値
    /// - 軌道計算済みの振り子
    pub fn new(
        params: PhysicalParams,
        initial: InitialConditions,
        time_base: &TimeBase,
        settings: &SimulationParameters,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        initial.validate()?;
        require_finite("gravity", settings.gravity)?;
        require_count("history_len", settings.history_len, MAX_HISTORY_LEN)?;

        let gravity = settings.gravity;
        let state = initial.to_state();
        let states = integrate(
            state,
            time_base.samples(),
            |y| derivatives(y, &params, gravity),
            &settings.solver,
        )?;
        debug!(
            "振り子の軌道を計算しました: theta1 = {} deg, サンプル数 = {}",
            initial.theta1,
            states.len()
        );

        Ok(Self {
            params,
            initial: state,
            gravity,
            trajectory: Trajectory::from_states(states, &params),
            history: HistoryBuffer::new(settings.history_len),
        })
    }

    /// 初期状態（ラジアン）
    pub fn initial_state(&self) -> &StateVector {
        &self.initial
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn frame_count(&self) -> usize {
        self.trajectory.len()
    }

    /// 振り子全体の長さ L1 + L2（描画範囲の決定に使う）
    pub fn combined_length(&self) -> f64 {
        self.params.l1 + self.params.l2
    }

    /// フレームを1つ進め、描画用の折れ線 [原点, 第1関節, 第2関節] を返す
    ///
    /// フレーム0では履歴を消去してから追加する。巻き戻しやシークは想定しない。
    pub fn advance(&mut self, frame: usize) -> Result<[[f64; 2]; 3], SimulationError> {
        let frame_count = self.frame_count();
        if frame >= frame_count {
            return Err(SimulationError::FrameOutOfRange { frame, frame_count });
        }

        if frame == 0 {
            self.history.clear();
        }

        let joint1 = self.trajectory.joint1()[frame];
        let joint2 = self.trajectory.joint2()[frame];
        self.history.push_front(joint2);

        Ok([[0.0, 0.0], joint1, joint2])
    }

    /// 指定フレームにおける力学的エネルギー
    pub fn energy(&self, frame: usize) -> Result<f64, SimulationError> {
        let frame_count = self.frame_count();
        self.trajectory
            .states()
            .get(frame)
            .map(|state| total_energy(state, &self.params, self.gravity))
            .ok_or(SimulationError::FrameOutOfRange { frame, frame_count })
    }
}
