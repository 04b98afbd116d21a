// ============================================
// Map Module - Чанковая карта
// ============================================

pub mod chunk;
pub mod constants;
pub mod coord;
pub mod loader;
pub mod registry;
pub mod store;
pub mod tiles;

// Re-exports
pub use chunk::Chunk;
pub use constants::{CHUNK_HEIGHT, CHUNK_PX_HEIGHT, CHUNK_PX_WIDTH, CHUNK_WIDTH, LC_HEIGHT, LC_WIDTH, TILE_SIZE};
pub use coord::ChunkCoord;
pub use loader::{ChunkLoader, LoadRequest};
pub use registry::{MapRegistry, MapSource};
pub use store::ChunkStore;
pub use tiles::{encode_hex_color, parse_hex_color, TileDefs};
