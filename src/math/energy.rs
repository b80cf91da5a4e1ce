// src/math/energy.rs

use crate::math::StateVector;
use crate::models::pendulum::PhysicalParams;

/// 力学的エネルギー（運動エネルギー + 位置エネルギー）を計算する純粋関数
///
/// 位置エネルギーの基準は支点の高さ。
pub fn total_energy(state: &StateVector, params: &PhysicalParams, gravity: f64) -> f64 {
    let [theta1, omega1, theta2, omega2] = *state;
    let PhysicalParams { m1, m2, l1, l2 } = *params;

    let kinetic = 0.5 * (m1 + m2) * l1 * l1 * omega1 * omega1
        + 0.5 * m2 * l2 * l2 * omega2 * omega2
        + m2 * l1 * l2 * omega1 * omega2 * (theta1 - theta2).cos();
    let potential = -(m1 + m2) * gravity * l1 * theta1.cos() - m2 * gravity * l2 * theta2.cos();

    kinetic + potential
}
