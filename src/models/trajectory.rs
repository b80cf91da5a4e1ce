// src/models/trajectory.rs

use crate::math::StateVector;
use crate::models::pendulum::PhysicalParams;

/// 状態の時系列と、そこから導出した関節のデカルト座標
///
/// 構築後は不変。
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    states: Vec<StateVector>,
    joint1: Vec<[f64; 2]>,
    joint2: Vec<[f64; 2]>,
}

impl Trajectory {
    /// 状態列から関節位置を導出する
    ///
    /// - joint1 = (L1 sinθ1, -L1 cosθ1)
    /// - joint2 = joint1 + (L2 sinθ2, -L2 cosθ2)
    pub fn from_states(states: Vec<StateVector>, params: &PhysicalParams) -> Self {
        let (joint1, joint2) = states
            .iter()
            .map(|state| joint_positions(state, params))
            .unzip();

        Self { states, joint1, joint2 }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn joint1(&self) -> &[[f64; 2]] {
        &self.joint1
    }

    pub fn joint2(&self) -> &[[f64; 2]] {
        &self.joint2
    }
}

/// 1時刻分の関節位置
pub fn joint_positions(state: &StateVector, params: &PhysicalParams) -> ([f64; 2], [f64; 2]) {
    let (sin1, cos1) = state[0].sin_cos();
    let (sin2, cos2) = state[2].sin_cos();
    let joint1 = [params.l1 * sin1, -params.l1 * cos1];
    let joint2 = [joint1[0] + params.l2 * sin2, joint1[1] - params.l2 * cos2];
    (joint1, joint2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    /// 垂れ下がりと水平の姿勢で関節座標を確認する
    #[test]
    fn test_joint_positions_hanging_and_horizontal() {
        let params = PhysicalParams { m1: 1.0, m2: 1.0, l1: 2.0, l2: 1.5 };
        let trajectory = Trajectory::from_states(
            vec![[0.0, 0.0, 0.0, 0.0], [FRAC_PI_2, 0.0, -FRAC_PI_2, 0.0]],
            &params,
        );

        assert_eq!(trajectory.len(), 2);
        assert_abs_diff_eq!(trajectory.joint1()[0][1], -2.0);
        assert_abs_diff_eq!(trajectory.joint2()[0][1], -3.5);

        assert_abs_diff_eq!(trajectory.joint1()[1][0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.joint1()[1][1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.joint2()[1][0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.joint2()[1][1], 0.0, epsilon = 1e-12);
    }
}
