// ============================================
// Map Constants - Размеры чанков и тайлов
// ============================================

/// Размер чанка в тайлах (32x32)
pub const CHUNK_WIDTH: usize = 32;
pub const CHUNK_HEIGHT: usize = 32;

/// Размер тайла в пикселях (при zoom = 1.0)
pub const TILE_SIZE: usize = 32;

/// Размер поверхности чанка в пикселях
pub const CHUNK_PX_WIDTH: i32 = (CHUNK_WIDTH * TILE_SIZE) as i32;
pub const CHUNK_PX_HEIGHT: i32 = (CHUNK_HEIGHT * TILE_SIZE) as i32;

/// Прямоугольник загруженных чанков вокруг фокуса (по осям, нечётный)
pub const LC_WIDTH: i32 = 5;
pub const LC_HEIGHT: i32 = 5;
