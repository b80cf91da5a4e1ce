// src/math/integrator.rs

use serde::Deserialize;

use crate::math::error::MathError;

/// 積分法の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Dormand-Prince 5(4) 埋め込み型ルンゲ・クッタ法（誤差制御付き）
    Dopri5,
    /// 古典的4次ルンゲ・クッタ法（出力間隔ごとに1ステップの固定幅）
    Rk4,
}

/// 積分器の設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub kind: SolverKind,
    pub tol_abs: f64,     // 絶対許容誤差
    pub tol_rel: f64,     // 相対許容誤差
    pub max_steps: usize, // 出力間隔あたりの最大ステップ数
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            kind: SolverKind::Dopri5,
            tol_abs: 1e-9,
            tol_rel: 1e-9,
            max_steps: 10_000,
        }
    }
}

// ステップ幅制御の係数
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

// Dormand-Prince 5(4) の Butcher 表
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 5次解と4次解の差（局所打ち切り誤差の推定）
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// 自律系 dy/dt = f(y) を出力時刻の列に沿って積分する
///
/// # 引数
/// - `initial`: `times[0]` における状態
/// - `times`: 単調増加する出力時刻の列
/// - `rhs`: 右辺関数 f(y)
/// - `settings`: 積分法と許容誤差
///
/// # 戻り値
/// - `times` と1対1に対応する状態の列（先頭は `initial` そのもの）
///
/// 同じ入力に対しては常にビット単位で同じ結果を返す。
pub fn integrate<const N: usize, F>(
    initial: [f64; N],
    times: &[f64],
    rhs: F,
    settings: &SolverSettings,
) -> Result<Vec<[f64; N]>, MathError>
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    validate_time_grid(times)?;
    ensure_finite(&initial, times[0])?;

    match settings.kind {
        SolverKind::Dopri5 => integrate_dopri5(initial, times, &rhs, settings),
        SolverKind::Rk4 => integrate_rk4(initial, times, &rhs),
    }
}

fn validate_time_grid(times: &[f64]) -> Result<(), MathError> {
    if times.is_empty() {
        return Err(MathError::InvalidTimeGrid("時刻が1つもありません"));
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(MathError::InvalidTimeGrid("有限値でない時刻を含みます"));
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::InvalidTimeGrid("時刻が狭義単調増加になっていません"));
    }
    Ok(())
}

fn ensure_finite<const N: usize>(y: &[f64; N], time: f64) -> Result<(), MathError> {
    if y.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MathError::NonFinite { time })
    }
}

/// y + h * Σ c_j k_j
fn combine<const N: usize>(y: &[f64; N], h: f64, terms: &[(f64, &[f64; N])]) -> [f64; N] {
    let mut out = *y;
    for (i, value) in out.iter_mut().enumerate() {
        let slope: f64 = terms.iter().map(|(c, k)| c * k[i]).sum();
        *value += h * slope;
    }
    out
}

fn integrate_rk4<const N: usize, F>(
    initial: [f64; N],
    times: &[f64],
    rhs: &F,
) -> Result<Vec<[f64; N]>, MathError>
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    let mut states = Vec::with_capacity(times.len());
    let mut y = initial;
    states.push(y);

    for w in times.windows(2) {
        let h = w[1] - w[0];
        let k1 = rhs(&y);
        let k2 = rhs(&combine(&y, h, &[(0.5, &k1)]));
        let k3 = rhs(&combine(&y, h, &[(0.5, &k2)]));
        let k4 = rhs(&combine(&y, h, &[(1.0, &k3)]));
        y = combine(
            &y,
            h,
            &[(1.0 / 6.0, &k1), (1.0 / 3.0, &k2), (1.0 / 3.0, &k3), (1.0 / 6.0, &k4)],
        );
        ensure_finite(&y, w[1])?;
        states.push(y);
    }

    Ok(states)
}

/// Dormand-Prince 1ステップ分の結果
struct Dopri5Step<const N: usize> {
    y: [f64; N],
    k7: [f64; N], // FSAL: 次ステップの k1
    error: [f64; N],
}

fn dopri5_step<const N: usize, F>(y: &[f64; N], k1: &[f64; N], h: f64, rhs: &F) -> Dopri5Step<N>
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    let k2 = rhs(&combine(y, h, &[(A21, k1)]));
    let k3 = rhs(&combine(y, h, &[(A31, k1), (A32, &k2)]));
    let k4 = rhs(&combine(y, h, &[(A41, k1), (A42, &k2), (A43, &k3)]));
    let k5 = rhs(&combine(y, h, &[(A51, k1), (A52, &k2), (A53, &k3), (A54, &k4)]));
    let k6 = rhs(&combine(
        y,
        h,
        &[(A61, k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
    ));
    let y_next = combine(y, h, &[(B1, k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)]);
    let k7 = rhs(&y_next);
    let error = combine(
        &[0.0; N],
        h,
        &[(E1, k1), (E3, &k3), (E4, &k4), (E5, &k5), (E6, &k6), (E7, &k7)],
    );

    Dopri5Step { y: y_next, k7, error }
}

/// 許容誤差でスケールした誤差の最大ノルム（1以下なら受理）
fn error_norm<const N: usize>(
    y: &[f64; N],
    y_next: &[f64; N],
    error: &[f64; N],
    settings: &SolverSettings,
) -> f64 {
    let norm = (0..N)
        .map(|i| {
            let scale = settings.tol_abs + settings.tol_rel * y[i].abs().max(y_next[i].abs());
            (error[i] / scale).abs()
        })
        .fold(0.0, f64::max);
    norm.max(1e-16)
}

fn integrate_dopri5<const N: usize, F>(
    initial: [f64; N],
    times: &[f64],
    rhs: &F,
    settings: &SolverSettings,
) -> Result<Vec<[f64; N]>, MathError>
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    let mut states = Vec::with_capacity(times.len());
    let mut y = initial;
    states.push(y);

    let mut k1 = rhs(&y);
    let mut h = match times {
        [first, second, ..] => second - first,
        _ => return Ok(states),
    };

    for w in times.windows(2) {
        let target = w[1];
        let mut t = w[0];
        let mut steps = 0;

        while t < target {
            if steps >= settings.max_steps {
                return Err(MathError::TooManySteps { time: t, max_steps: settings.max_steps });
            }
            steps += 1;

            let min_step = 16.0 * f64::EPSILON * t.abs().max(1.0);
            if h < min_step {
                return Err(MathError::StepSizeUnderflow { time: t, step: h });
            }

            // 出力時刻をちょうど踏むようにステップを切り詰める
            let remaining = target - t;
            let clipped = h >= remaining;
            let step = if clipped { remaining } else { h };

            let trial = dopri5_step(&y, &k1, step, rhs);
            ensure_finite(&trial.y, t + step)?;

            let norm = error_norm(&y, &trial.y, &trial.error, settings);
            let accepted = norm <= 1.0;
            let proposed = step * (SAFETY * norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR);

            if accepted {
                t = if clipped { target } else { t + step };
                y = trial.y;
                k1 = trial.k7;
            }

            h = if accepted && clipped { h.max(proposed) } else { proposed };
        }

        states.push(y);
    }

    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn oscillator(y: &[f64; 2]) -> [f64; 2] {
        [y[1], -y[0]]
    }

    fn grid(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dt).collect()
    }

    /// 単振動 x' = v, v' = -x を Dormand-Prince で解くと (cos t, -sin t) に一致する
    #[test]
    fn test_dopri5_harmonic_oscillator() {
        let times = grid(700, 0.01);
        let states = integrate([1.0, 0.0], &times, oscillator, &SolverSettings::default()).unwrap();

        assert_eq!(states.len(), times.len());
        assert_eq!(states[0], [1.0, 0.0]);
        for (t, s) in times.iter().zip(&states) {
            assert_abs_diff_eq!(s[0], t.cos(), epsilon = 1e-7);
            assert_abs_diff_eq!(s[1], -t.sin(), epsilon = 1e-7);
        }
    }

    /// 固定刻み RK4 でも 7 秒後の単振動の誤差は 1e-6 以内
    #[test]
    fn test_rk4_harmonic_oscillator() {
        let settings = SolverSettings { kind: SolverKind::Rk4, ..SolverSettings::default() };
        let times = grid(700, 0.01);
        let states = integrate([1.0, 0.0], &times, oscillator, &settings).unwrap();

        assert_eq!(states.len(), times.len());
        let last = states[states.len() - 1];
        let t_end = times[times.len() - 1];
        assert_abs_diff_eq!(last[0], t_end.cos(), epsilon = 1e-6);
        assert_abs_diff_eq!(last[1], -t_end.sin(), epsilon = 1e-6);
    }

    /// 粗い出力時刻でも指数減衰 2e^-t に 1e-8 以内で一致する
    #[test]
    fn test_dopri5_exponential_decay_on_coarse_grid() {
        // 出力間隔が大きくても内部ステップで精度を保つ
        let times = [0.0, 0.5, 1.0, 3.0, 10.0];
        let states = integrate([2.0], &times, |y: &[f64; 1]| [-y[0]], &SolverSettings::default()).unwrap();
        for (t, s) in times.iter().zip(&states) {
            assert_abs_diff_eq!(s[0], 2.0 * (-t).exp(), epsilon = 1e-8);
        }
    }

    /// 同じ入力からはビット単位で同じ結果が得られる
    #[test]
    fn test_integrate_is_deterministic() {
        let times = grid(300, 0.01);
        let a = integrate([0.3, 0.1], &times, oscillator, &SolverSettings::default()).unwrap();
        let b = integrate([0.3, 0.1], &times, oscillator, &SolverSettings::default()).unwrap();
        assert_eq!(a, b);
    }

    /// 時刻が1つだけなら初期状態をそのまま返す
    #[test]
    fn test_single_sample_grid_returns_initial_state() {
        let states = integrate([4.0, 5.0], &[0.0], oscillator, &SolverSettings::default()).unwrap();
        assert_eq!(states, vec![[4.0, 5.0]]);
    }

    /// 空・非単調・NaN を含む時刻列は拒否される
    #[test]
    fn test_invalid_time_grid() {
        let settings = SolverSettings::default();
        assert!(matches!(
            integrate([1.0, 0.0], &[], oscillator, &settings),
            Err(MathError::InvalidTimeGrid(_))
        ));
        assert!(matches!(
            integrate([1.0, 0.0], &[0.0, 0.1, 0.1], oscillator, &settings),
            Err(MathError::InvalidTimeGrid(_))
        ));
        assert!(matches!(
            integrate([1.0, 0.0], &[0.0, f64::NAN], oscillator, &settings),
            Err(MathError::InvalidTimeGrid(_))
        ));
    }

    /// NaN や無限大になった状態は NonFinite として報告される
    #[test]
    fn test_non_finite_state_is_reported() {
        let times = grid(10, 0.1);
        let blow_up = |_: &[f64; 1]| [f64::NAN];
        for kind in [SolverKind::Dopri5, SolverKind::Rk4] {
            let settings = SolverSettings { kind, ..SolverSettings::default() };
            let result = integrate([1.0], &times, blow_up, &settings);
            assert!(matches!(result, Err(MathError::NonFinite { .. })), "{:?}", kind);
        }

        let result = integrate([f64::INFINITY], &times, |y: &[f64; 1]| *y, &SolverSettings::default());
        assert_eq!(result, Err(MathError::NonFinite { time: 0.0 }));
    }

    /// 1区間あたりのステップ数の上限を超えると TooManySteps
    #[test]
    fn test_step_budget_is_enforced() {
        let settings = SolverSettings { max_steps: 1, ..SolverSettings::default() };
        let result = integrate([1.0, 0.0], &[0.0, 100.0], oscillator, &settings);
        assert!(matches!(result, Err(MathError::TooManySteps { max_steps: 1, .. })));
    }
}
