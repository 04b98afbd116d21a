// ============================================
// App - Headless-демо ядра карты
// ============================================
// Оконный презентер вне ядра; демо гоняет полный цикл
// стриминг -> выкачка -> кадр на движущейся цели и
// печатает итоговую статистику.

use std::path::Path;

use ultraviolet::Vec2;

use crate::core::config::WorldConfig;
use crate::map::registry::MapRegistry;
use crate::map::store::ChunkStore;
use crate::render::camera::Camera;
use crate::render::surface::{Rgba, Surface};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;
const TICKS: u32 = 600;

/// Запуск демо
pub fn run() {
    env_logger::init();

    println!("=== overworld demo ===");
    println!("Streams chunks around a moving target for {} ticks", TICKS);
    println!("Config: world.json (optional), maps under ./maps");
    println!("======================");

    let config = WorldConfig::load_or_default(Path::new("world.json"));

    let mut registry = MapRegistry::new();
    for dir in &config.maps {
        match registry.register_dir(dir) {
            Ok(count) => {
                log::info!("Registered map '{}' with {} chunk files", dir.display(), count)
            }
            Err(e) => log::warn!("Skipping map directory '{}': {}", dir.display(), e),
        }
    }

    let mut store = ChunkStore::with_extents(registry, config.load_width, config.load_height);
    let mut camera = Camera::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    camera.set_smoothing(config.camera_smoothing);
    let mut frame = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    // Цель идёт по диагонали; камера следует, стор стримит
    let mut target = Vec2::new(0.0, 0.0);
    camera.jump_to(target);
    store.stream_around(camera.focus_chunk());
    store.flush_pending();

    let delta = 1.0 / 60.0;
    for tick in 0..TICKS {
        target += Vec2::new(40.0, 16.0) * delta;

        camera.update(target, delta);
        store.stream_around(camera.focus_chunk());
        store.pump();

        frame.clear(Rgba::TRANSPARENT);
        camera.blit_view(&store, &mut frame);

        if tick % 120 == 0 {
            log::info!(
                "tick {}: focus {}, {} loaded, {} pending",
                tick,
                camera.focus_chunk(),
                store.loaded_count(),
                store.pending_count()
            );
        }
    }

    store.flush_pending();
    println!(
        "Done: {} chunk loads, {} evictions, {} chunks resident",
        store.loads_requested(),
        store.evictions(),
        store.loaded_count()
    );
}
