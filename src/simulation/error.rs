// src/simulation/error.rs

use thiserror::Error;

use crate::math::MathError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("パラメータ `{name}` の値 {value} が不正です（正の有限値が必要）。")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("軌道の積分に失敗しました: {0}")]
    Integration(#[from] MathError),
    #[error("振り子 #{index} の構築に失敗しました: {source}")]
    Pendulum {
        index: usize,
        #[source]
        source: Box<SimulationError>,
    },
    #[error("フレーム番号 {frame} が範囲外です（フレーム数 {frame_count}）。")]
    FrameOutOfRange { frame: usize, frame_count: usize },
}

/// 正の有限値であることを確認する
pub fn require_positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

/// 有限値であることを確認する（符号は問わない）
pub fn require_finite(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

/// 0 以上の有限値であることを確認する
pub fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

/// 1 以上 `max` 以下の個数であることを確認する
pub fn require_count(name: &'static str, value: usize, max: usize) -> Result<(), SimulationError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value: value as f64 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 以下・無限大・NaN は拒否される
    #[test]
    fn test_require_positive() {
        assert!(require_positive("m1", 1.0).is_ok());
        assert_eq!(
            require_positive("m1", 0.0),
            Err(SimulationError::InvalidParameter { name: "m1", value: 0.0 })
        );
        assert!(require_positive("l2", -2.0).is_err());
        assert!(require_positive("dt", f64::INFINITY).is_err());
        assert!(require_positive("dt", f64::NAN).is_err());
    }

    /// 個数は 1 以上かつ上限以下のみ受け付ける
    #[test]
    fn test_require_count() {
        assert!(require_count("history_len", 1, 10).is_ok());
        assert!(require_count("history_len", 10, 10).is_ok());
        assert_eq!(
            require_count("history_len", 0, 10),
            Err(SimulationError::InvalidParameter { name: "history_len", value: 0.0 })
        );
        assert!(require_count("history_len", usize::MAX, 10).is_err());
    }

    /// 振り子番号と原因のエラーがメッセージに含まれる
    #[test]
    fn test_pendulum_error_keeps_context() {
        let err = SimulationError::Pendulum {
            index: 3,
            source: Box::new(SimulationError::Integration(MathError::NonFinite { time: 1.5 })),
        };
        let message = err.to_string();
        assert!(message.contains("#3"));
        assert!(message.contains("1.5"));
    }
}
