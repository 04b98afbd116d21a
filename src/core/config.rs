// ============================================
// World Config - Data-Driven конфигурация из JSON
// ============================================
// Все поля с дефолтами: пустой или отсутствующий файл
// даёт рабочую конфигурацию.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::map::constants::{LC_HEIGHT, LC_WIDTH};

/// Конфигурация мира
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Каталоги карт в порядке приоритета
    #[serde(default = "default_maps")]
    pub maps: Vec<PathBuf>,

    /// Корень для записи чанков
    #[serde(default = "default_chunks_root")]
    pub chunks_root: PathBuf,

    /// Размеры прямоугольника загрузки (в чанках)
    #[serde(default = "default_load_width")]
    pub load_width: i32,
    #[serde(default = "default_load_height")]
    pub load_height: i32,

    /// Скорость камеры при следовании за целью, 1/сек
    #[serde(default = "default_camera_smoothing")]
    pub camera_smoothing: f32,
}

fn default_maps() -> Vec<PathBuf> {
    vec![PathBuf::from("maps")]
}

fn default_chunks_root() -> PathBuf {
    PathBuf::from("chunks")
}

fn default_load_width() -> i32 {
    LC_WIDTH
}

fn default_load_height() -> i32 {
    LC_HEIGHT
}

fn default_camera_smoothing() -> f32 {
    8.0
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            maps: default_maps(),
            chunks_root: default_chunks_root(),
            load_width: default_load_width(),
            load_height: default_load_height(),
            camera_smoothing: default_camera_smoothing(),
        }
    }
}

impl WorldConfig {
    /// Разобрать конфигурацию из JSON строки
    pub fn load_from_json(json: &str) -> Result<WorldConfig, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse config JSON: {}", e))
    }

    /// Загрузить конфигурацию из файла
    pub fn load_from_file(path: &Path) -> Result<WorldConfig, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::load_from_json(&content)
    }

    /// Конфигурация из файла или дефолтная, если файла нет/он сломан
    pub fn load_or_default(path: &Path) -> WorldConfig {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default world config: {}", e);
                WorldConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = WorldConfig::load_from_json("{}").unwrap();
        assert_eq!(config.maps, vec![PathBuf::from("maps")]);
        assert_eq!(config.chunks_root, PathBuf::from("chunks"));
        assert_eq!(config.load_width, LC_WIDTH);
        assert_eq!(config.load_height, LC_HEIGHT);
    }

    #[test]
    fn test_fields_override_defaults() {
        let config = WorldConfig::load_from_json(
            r#"{ "maps": ["packs/base", "packs/dlc"], "load_width": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.maps.len(), 2);
        assert_eq!(config.load_width, 7);
        assert_eq!(config.load_height, LC_HEIGHT);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(WorldConfig::load_from_json("{ maps: nope").is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = WorldConfig::load_or_default(Path::new("/nonexistent/world.json"));
        assert_eq!(config.chunks_root, PathBuf::from("chunks"));
    }
}
