mod config;

use std::{path::PathBuf, process::ExitCode};

use config::{ReadoutConfig, DEFAULT_CONFIG};
use quake::prelude::*;

fn readout(config: &ReadoutConfig) -> Result<(), AssetError> {
    let mut pak = PAKArchive::open(&config.pak)?;

    let palette = match pak.load_palette() {
        Ok(palette) => palette,
        Err(err) if err.is_not_found() => {
            log::warn!("{err}, using a grey palette");
            Palette::default()
        }
        Err(err) => return Err(err),
    };

    let map = pak
        .load_map::<MipTexDirectory>(&config.map, &palette)
        .in_file(&config.pak)?;

    log::info!("{:?}", map.header());
    log::info!("models: {}", map.models().len());
    log::info!("planes: {}", map.planes().len());
    log::info!("vertices: {}", map.vertices().len());
    log::info!("edges: {}", map.edges().len());
    log::info!("edge list: {}", map.edge_list().len());
    log::info!("faces: {}", map.faces().len());
    log::info!("texture info: {}", map.tex_infos().len());
    log::info!("light map: {} bytes", map.light_map().len());

    for texture in map.atlas().textures().iter().flatten() {
        log::info!("texture {} {}x{}", texture.name.as_str(), texture.width, texture.height);
    }

    for entity in map.entities() {
        log::info!(
            "entity {} at {} angle {}",
            entity.class_name.as_str(),
            entity.origin,
            entity.angle
        );
    }

    match map.find_entity_by_name("info_player_start") {
        Ok(start) => log::info!("player starts at {}", start.origin),
        Err(err) => log::warn!("{err}"),
    }

    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = match ReadoutConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match readout(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Failed to read map {}: {err}", config.map);
            ExitCode::FAILURE
        }
    }
}
