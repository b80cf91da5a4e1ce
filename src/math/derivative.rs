// src/math/derivative.rs

use crate::math::StateVector;
use crate::models::pendulum::PhysicalParams;

/// 二重振り子の運動方程式による状態の時間微分を計算する純粋関数
///
/// # 引数
/// - `state`: 状態ベクトル [θ1, ω1, θ2, ω2]（ラジアン, rad/s）
/// - `params`: 質量とリンク長
/// - `gravity`: 重力加速度（m/s²）
///
/// # 戻り値
/// - [dθ1/dt, dω1/dt, dθ2/dt, dω2/dt]
///
/// den1 がゼロになる特異姿勢は扱わない（物理的に妥当なパラメータでは測度ゼロ）。
pub fn derivatives(state: &StateVector, params: &PhysicalParams, gravity: f64) -> StateVector {
    let [theta1, omega1, theta2, omega2] = *state;
    let PhysicalParams { m1, m2, l1, l2 } = *params;
    let total_mass = m1 + m2;

    let delta = theta2 - theta1;
    let (sin_d, cos_d) = delta.sin_cos();

    let den1 = total_mass * l1 - m2 * l1 * cos_d * cos_d;
    let domega1 = (m2 * l1 * omega1 * omega1 * sin_d * cos_d
        + m2 * gravity * theta2.sin() * cos_d
        + m2 * l2 * omega2 * omega2 * sin_d
        - total_mass * gravity * theta1.sin())
        / den1;

    let den2 = (l2 / l1) * den1;
    let domega2 = (-m2 * l2 * omega2 * omega2 * sin_d * cos_d
        + total_mass * gravity * theta1.sin() * cos_d
        - total_mass * l1 * omega1 * omega1 * sin_d
        - total_mass * gravity * theta2.sin())
        / den2;

    [omega1, domega1, omega2, domega2]
}
