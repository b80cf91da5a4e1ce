// src/cli.rs

use std::path::PathBuf;

use clap::Parser;

use dpsim::{Scenario, SimulationParameters};

/// 二重振り子シミュレータ
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 設定ファイル（YAML）を置いたディレクトリ
    #[arg(short, long, value_name = "DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// 振り子の本数（scenario.yaml を上書き）
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// 振り子ごとの初期角度のずれ [度]（scenario.yaml を上書き）
    #[arg(short, long, value_name = "DEGREES", allow_negative_numbers = true)]
    pub delta: Option<f64>,

    /// シミュレーション時間 [秒]（simulation_parameters.yaml を上書き）
    #[arg(short, long, value_name = "SECONDS")]
    pub time: Option<f64>,

    /// 出力CSVのパス（省略時は日時と条件から生成）
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// コマンドライン引数で設定を上書きする
    pub fn apply(&self, simulation: &mut SimulationParameters, scenario: &mut Scenario) {
        if let Some(count) = self.count {
            scenario.count = count;
        }
        if let Some(delta) = self.delta {
            scenario.delta = delta;
        }
        if let Some(time) = self.time {
            simulation.duration = time;
        }
    }
}
