// src/simulation/csv.rs

use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use log::warn;

use crate::config::Scenario;
use crate::simulation::ensemble::{Ensemble, PendulumFrame};

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output(
    path: impl AsRef<Path>,
    ensemble: &Ensemble,
) -> Result<Box<dyn Write>, Box<dyn Error>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            warn!("出力ディレクトリ {} が存在しないため作成します", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv_header(&mut writer, ensemble)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(writer: &mut W, ensemble: &Ensemble) -> Result<(), std::io::Error> {
    let mut header = String::from("time(s)");
    for index in 0..ensemble.len() {
        header.push_str(&format!(
            ",p{0}_x1(m),p{0}_y1(m),p{0}_x2(m),p{0}_y2(m)",
            index
        ));
    }
    header.push('\n');
    writer.write_all(header.as_bytes())
}

/// CSV行の作成（第1関節・第2関節の座標）
pub fn create_csv_row(time: f64, frames: &[PendulumFrame]) -> String {
    let mut row = format!("{}", time);
    for frame in frames {
        let [_, joint1, joint2] = frame.polyline;
        row.push_str(&format!(
            ",{},{},{},{}",
            joint1[0], joint1[1], joint2[0], joint2[1]
        ));
    }
    row.push('\n');
    row
}

/// 出力ファイル名の既定値: `YYYYmmddHHMMSS_n{本数}_d{ずれ}_t{時間}.csv`
pub fn default_output_path<Tz: TimeZone>(
    scenario: &Scenario,
    duration: f64,
    now: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    PathBuf::from(format!(
        "{}_n{}_d{}_t{}.csv",
        now.format("%Y%m%d%H%M%S"),
        scenario.count,
        scenario.delta,
        duration
    ))
}
