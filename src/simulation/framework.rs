// src/simulation/framework.rs

use std::error::Error;
use std::io::Write;

use log::info;

use crate::simulation::csv::create_csv_row;
use crate::simulation::ensemble::Ensemble;
use crate::simulation::error::SimulationError;

/// フレーム送りの結果の要約
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub final_spread: f64, // 最終フレームにおける第2関節の最大距離 (m)
    pub peak_spread: f64,  // 全フレームを通じた最大値 (m)
}

/// フレーム 0 から M-1 までを順に進め、各フレームをCSV行として書き出す
///
/// # 引数
/// - `ensemble`: 構築済みのアンサンブル
/// - `writer`: ヘッダー書き込み済みの出力先
///
/// # 戻り値
/// - フレーム数と振り子間の広がり
pub fn execute_frames<W: Write>(
    ensemble: &mut Ensemble,
    writer: &mut W,
) -> Result<RunSummary, Box<dyn Error>> {
    let mut peak_spread: f64 = 0.0;
    let mut final_spread = 0.0;

    let frame_count = ensemble.frame_count();
    for frame in 0..frame_count {
        let time = ensemble
            .time_base()
            .time(frame)
            .ok_or(SimulationError::FrameOutOfRange { frame, frame_count })?;
        let frames = ensemble.advance_all(frame)?;
        writer.write_all(create_csv_row(time, &frames).as_bytes())?;

        final_spread = ensemble.max_spread(frame)?;
        peak_spread = peak_spread.max(final_spread);
    }

    info!(
        "{} フレームを出力しました（最終の広がり {:.3} m, 最大 {:.3} m）",
        ensemble.frame_count(),
        final_spread,
        peak_spread
    );

    Ok(RunSummary {
        frames: ensemble.frame_count(),
        final_spread,
        peak_spread,
    })
}
