// ============================================
// Map Registry - Реестр карт
// ============================================
// Явный объект вместо глобального состояния: создаётся один раз
// при старте и передаётся стору по ссылке/владению.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::coord::ChunkCoord;

/// Одна зарегистрированная карта: корневой каталог + известные файлы чанков
#[derive(Debug, Clone)]
pub struct MapSource {
    pub base_path: PathBuf,
    pub chunk_files: HashSet<String>,
}

impl MapSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            chunk_files: HashSet::new(),
        }
    }

    /// Просканировать каталог и собрать корректно названные файлы чанков
    pub fn scan(base_path: impl Into<PathBuf>) -> io::Result<MapSource> {
        let mut map = MapSource::new(base_path);

        for entry in fs::read_dir(&map.base_path)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if ChunkCoord::from_file_name(&name).is_some() {
                map.chunk_files.insert(name);
            }
        }

        Ok(map)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.chunk_files.contains(file_name)
    }
}

/// Упорядоченный список карт; порядок регистрации задаёт приоритет
#[derive(Debug, Default)]
pub struct MapRegistry {
    maps: Vec<MapSource>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self { maps: Vec::new() }
    }

    /// Добавить карту в конец списка
    pub fn register(&mut self, map: MapSource) {
        self.maps.push(map);
    }

    /// Просканировать каталог и зарегистрировать его как карту
    ///
    /// Возвращает число найденных файлов чанков.
    pub fn register_dir(&mut self, base_path: impl Into<PathBuf>) -> io::Result<usize> {
        let map = MapSource::scan(base_path)?;
        let count = map.chunk_files.len();
        self.register(map);
        Ok(count)
    }

    /// Путь файла для координаты чанка
    ///
    /// Карты опрашиваются в порядке регистрации, побеждает первая.
    /// Совпадение имени в более поздней карте затеняется.
    pub fn resolve(&self, coord: ChunkCoord) -> Option<PathBuf> {
        let file_name = coord.file_name();
        let mut found: Option<&MapSource> = None;

        for map in &self.maps {
            if !map.contains(&file_name) {
                continue;
            }
            match found {
                None => found = Some(map),
                Some(winner) => log::debug!(
                    "Chunk file '{}' in '{}' is shadowed by '{}'",
                    file_name,
                    map.base_path.display(),
                    winner.base_path.display()
                ),
            }
        }

        found.map(|map| map.base_path.join(&file_name))
    }

    pub fn maps(&self) -> &[MapSource] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with_files(base: &str, files: &[&str]) -> MapSource {
        let mut map = MapSource::new(base);
        for f in files {
            map.chunk_files.insert((*f).to_string());
        }
        map
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut registry = MapRegistry::new();
        registry.register(map_with_files("maps/overrides", &["0,0.chunk"]));
        registry.register(map_with_files("maps/base", &["0,0.chunk", "1,0.chunk"]));

        assert_eq!(
            registry.resolve(ChunkCoord::new(0, 0)),
            Some(PathBuf::from("maps/overrides").join("0,0.chunk"))
        );
        assert_eq!(
            registry.resolve(ChunkCoord::new(1, 0)),
            Some(PathBuf::from("maps/base").join("1,0.chunk"))
        );
    }

    #[test]
    fn test_resolve_unknown_coord() {
        let mut registry = MapRegistry::new();
        registry.register(map_with_files("maps/base", &["0,0.chunk"]));
        assert_eq!(registry.resolve(ChunkCoord::new(5, 5)), None);
        assert_eq!(MapRegistry::new().resolve(ChunkCoord::new(0, 0)), None);
    }

    #[test]
    fn test_scan_picks_only_chunk_files() {
        let dir = std::env::temp_dir().join("overworld_registry_scan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("0,0.chunk"), "a\n").unwrap();
        std::fs::write(dir.join("1,-1.chunk"), "a\n").unwrap();
        std::fs::write(dir.join("readme.txt"), "not a chunk\n").unwrap();
        std::fs::write(dir.join("bad.chunk"), "a\n").unwrap();

        let map = MapSource::scan(&dir).unwrap();
        assert_eq!(map.chunk_files.len(), 2);
        assert!(map.contains("0,0.chunk"));
        assert!(map.contains("1,-1.chunk"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_register_dir_counts_files() {
        let dir = std::env::temp_dir().join("overworld_registry_dir");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("3,4.chunk"), "a\n").unwrap();

        let mut registry = MapRegistry::new();
        assert_eq!(registry.register_dir(&dir).unwrap(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve(ChunkCoord::new(3, 4)),
            Some(dir.join("3,4.chunk"))
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_register_dir_missing_directory_fails() {
        let mut registry = MapRegistry::new();
        let result = registry.register_dir("/nonexistent/overworld/maps");
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
