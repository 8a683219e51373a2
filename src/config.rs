use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::geometry::Size;
use crate::scene::SceneKind;

const DEFAULT_CONFIG_PATH: &str = concat!(crate::prog_name!(), ".config");

mod params;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    width: Option<u32>,
    height: Option<u32>,
    fullscreen: Option<bool>,
    title: Option<String>,
    scene: Option<SceneKind>,
}

fn config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix(crate::prog_name!())
        .map_err(|e| log::warn!("failed to get xdg dirs: {}", e))
        .ok()?
        .find_config_file(DEFAULT_CONFIG_PATH)
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        match path.or_else(config_path) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        log::debug!("using config {}", path.display());
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn param<T>(&self) -> T
    where
        T: for<'a> From<&'a Self>,
    {
        self.into()
    }

    pub fn override_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = Some(fullscreen);
    }

    pub fn override_size(&mut self, size: Size) {
        self.width = Some(size.width);
        self.height = Some(size.height);
    }

    pub fn override_scene(&mut self, scene: SceneKind) {
        self.scene = Some(scene);
    }
}
