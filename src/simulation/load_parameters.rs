// src/simulation/load_parameters.rs

use std::error::Error;
use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::from_reader;

use crate::config::{PendulumParameters, Scenario, SimulationParameters};

/// YAMLファイルを読み込んで任意の設定構造体に変換する
fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("設定ファイル {} を開けません: {}", path.display(), e))?;
    let value: T = from_reader(file)?;
    Ok(value)
}

/// 振り子パラメータの読み込み
pub fn load_pendulum_parameters(path: impl AsRef<Path>) -> Result<PendulumParameters, Box<dyn Error>> {
    load_yaml(path.as_ref())
}

/// シミュレーションパラメータの読み込み
pub fn load_simulation_parameters(path: impl AsRef<Path>) -> Result<SimulationParameters, Box<dyn Error>> {
    load_yaml(path.as_ref())
}

/// シナリオの読み込み
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, Box<dyn Error>> {
    load_yaml(path.as_ref())
}
