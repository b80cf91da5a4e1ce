// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("t = {time} で状態量が有限値ではなくなりました。")]
    NonFinite { time: f64 },
    #[error("t = {time} でステップ幅 {step} が下限を下回りました。")]
    StepSizeUnderflow { time: f64, step: f64 },
    #[error("t = {time} から次の出力時刻までのステップ数が上限 {max_steps} を超えました。")]
    TooManySteps { time: f64, max_steps: usize },
    #[error("出力時刻の列が不正です: {0}")]
    InvalidTimeGrid(&'static str),
}
