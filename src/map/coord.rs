// ============================================
// Chunk Coord - Идентификатор чанка
// ============================================

use std::fmt;

use super::constants::{CHUNK_PX_HEIGHT, CHUNK_PX_WIDTH};

/// Координата чанка в бесконечной сетке чанков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Каноническое имя файла чанка: "{x},{y}.chunk"
    pub fn file_name(&self) -> String {
        format!("{},{}.chunk", self.x, self.y)
    }

    /// Разобрать имя файла чанка обратно в координату
    pub fn from_file_name(name: &str) -> Option<ChunkCoord> {
        let stem = name.strip_suffix(".chunk")?;
        let (x, y) = stem.split_once(',')?;
        Some(ChunkCoord::new(x.parse().ok()?, y.parse().ok()?))
    }

    /// Левый верхний угол чанка в мировых пикселях
    pub fn origin_px(&self) -> (i32, i32) {
        (self.x * CHUNK_PX_WIDTH, self.y * CHUNK_PX_HEIGHT)
    }

    /// Чанк, содержащий мировую пиксельную координату
    pub fn from_world_px(px: i32, py: i32) -> ChunkCoord {
        ChunkCoord::new(px.div_euclid(CHUNK_PX_WIDTH), py.div_euclid(CHUNK_PX_HEIGHT))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_format() {
        assert_eq!(ChunkCoord::new(0, 0).file_name(), "0,0.chunk");
        assert_eq!(ChunkCoord::new(5, -7).file_name(), "5,-7.chunk");
    }

    #[test]
    fn test_file_name_roundtrip() {
        for coord in [
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 12),
            ChunkCoord::new(100, -100),
        ] {
            assert_eq!(ChunkCoord::from_file_name(&coord.file_name()), Some(coord));
        }
    }

    #[test]
    fn test_bad_file_names_rejected() {
        assert_eq!(ChunkCoord::from_file_name("junk.txt"), None);
        assert_eq!(ChunkCoord::from_file_name("abc.chunk"), None);
        assert_eq!(ChunkCoord::from_file_name("1;2.chunk"), None);
        assert_eq!(ChunkCoord::from_file_name("1,2,3.chunk"), None);
        assert_eq!(ChunkCoord::from_file_name("1,2.chnk"), None);
    }

    #[test]
    fn test_from_world_px_floor_division() {
        assert_eq!(ChunkCoord::from_world_px(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world_px(1023, 1023), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world_px(1024, 0), ChunkCoord::new(1, 0));
        assert_eq!(ChunkCoord::from_world_px(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world_px(-1024, 0), ChunkCoord::new(-1, 0));
        assert_eq!(ChunkCoord::from_world_px(-1025, 0), ChunkCoord::new(-2, 0));
    }
}
