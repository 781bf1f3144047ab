//! Optional TOML overrides for the game and terrain tuning.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use track_builder_system_generation::TerrainTuning;
use track_builder_world::GameConfig;

/// Largest board edge a config file may request.
const MAX_BOARD_SIDE: u32 = 256;

/// Everything the adapter needs to build a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Settings {
    pub(crate) game: GameConfig,
    pub(crate) terrain: TerrainTuning,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    board_side: Option<u32>,
    build_time_secs: Option<u64>,
    queue_length: Option<usize>,
    run_step_base_ms: Option<u64>,
    run_step_per_level_ms: Option<u64>,
    run_step_floor_ms: Option<u64>,
    terrain: TerrainFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TerrainFile {
    obstacle_base: Option<f64>,
    obstacle_per_level: Option<f64>,
    bonus_chance: Option<f64>,
}

/// Loads settings from the TOML file at `path`, layering it over the defaults.
pub(crate) fn load(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(contents: &str) -> Result<Settings> {
    let file: ConfigFile = toml::from_str(contents).context("failed to parse config toml")?;
    let mut settings = Settings::default();
    let game = &mut settings.game;

    if let Some(side) = file.board_side {
        if side > MAX_BOARD_SIDE {
            bail!("board_side must be at most {MAX_BOARD_SIDE}, got {side}");
        }
        game.board_side = side;
    }
    if let Some(secs) = file.build_time_secs {
        if secs == 0 {
            bail!("build_time_secs must be positive");
        }
        game.build_time = Duration::from_secs(secs);
    }
    if let Some(length) = file.queue_length {
        game.queue_length = length;
    }
    if let Some(ms) = file.run_step_base_ms {
        game.run_step_base = Duration::from_millis(ms);
    }
    if let Some(ms) = file.run_step_per_level_ms {
        game.run_step_per_level = Duration::from_millis(ms);
    }
    if let Some(ms) = file.run_step_floor_ms {
        if ms == 0 {
            bail!("run_step_floor_ms must be positive");
        }
        game.run_step_floor = Duration::from_millis(ms);
    }

    let terrain = &mut settings.terrain;
    for (name, value, slot) in [
        ("obstacle_base", file.terrain.obstacle_base, &mut terrain.obstacle_base),
        (
            "obstacle_per_level",
            file.terrain.obstacle_per_level,
            &mut terrain.obstacle_per_level,
        ),
        ("bonus_chance", file.terrain.bonus_chance, &mut terrain.bonus_chance),
    ] {
        if let Some(value) = value {
            if !(0.0..=1.0).contains(&value) {
                bail!("terrain.{name} must lie between 0 and 1, got {value}");
            }
            *slot = value;
        }
    }

    Ok(settings)
}
