// src/main.rs

use std::error::Error;
use std::io::Write;

use clap::Parser;
use log::info;

use dpsim::simulation::csv::*;
use dpsim::simulation::framework::execute_frames;
use dpsim::simulation::load_parameters::*;
use dpsim::Ensemble;

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = cli::Args::parse();

    // 設定とシナリオの読み込み
    let pendulum_params = load_pendulum_parameters(args.config_dir.join("pendulum_parameters.yaml"))?;
    let mut simulation_params =
        load_simulation_parameters(args.config_dir.join("simulation_parameters.yaml"))?;
    let mut scenario = load_scenario(args.config_dir.join("scenario.yaml"))?;
    args.apply(&mut simulation_params, &mut scenario);

    // 全振り子の軌道を事前計算
    let mut ensemble = Ensemble::new(&pendulum_params, &simulation_params, &scenario)?;
    info!(
        "振り子の長さ {} m, 時間 {} s, dt {} s",
        ensemble.combined_length(),
        simulation_params.duration,
        simulation_params.dt
    );

    // CSV出力の設定
    let path = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path(&scenario, simulation_params.duration, &chrono::Local::now()),
    };
    let mut writer: Box<dyn Write> = setup_csv_output(&path, &ensemble)?;

    // フレーム送りのメインループ
    let summary = execute_frames(&mut ensemble, &mut writer)?;
    writer.flush()?;

    info!("{} に {} フレームを書き出しました", path.display(), summary.frames);
    Ok(())
}
