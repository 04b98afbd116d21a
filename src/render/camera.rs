// ============================================
// Camera - 2D камера, следящая за целью
// ============================================
// Камера держит смещение мир -> экран и каждый тик подтягивает
// центр вида к позиции захваченной цели (игрока). Видимые чанки
// выводятся из позиции, размера экрана и размеров чанка.

use ultraviolet::Vec2;

use crate::map::chunk::Chunk;
use crate::map::constants::{CHUNK_PX_HEIGHT, CHUNK_PX_WIDTH};
use crate::map::coord::ChunkCoord;
use crate::map::store::ChunkStore;
use crate::render::surface::Surface;

/// Дистанция (в пикселях), ближе которой камера прилипает к цели
const SNAP_DISTANCE: f32 = 0.5;

/// Камера не знает про цель ничего, кроме её позиции
pub struct Camera {
    /// Левый верхний угол вида в мировых пикселях
    pos: Vec2,
    screen_width: u32,
    screen_height: u32,
    /// Скорость приближения к цели, 1/сек
    smoothing: f32,
}

impl Camera {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            pos: Vec2::new(0.0, 0.0),
            screen_width,
            screen_height,
            smoothing: 8.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.max(0.0);
    }

    fn desired_pos(&self, target: Vec2) -> Vec2 {
        target
            - Vec2::new(
                self.screen_width as f32 / 2.0,
                self.screen_height as f32 / 2.0,
            )
    }

    /// Мгновенно отцентрировать вид на цели
    pub fn jump_to(&mut self, target: Vec2) {
        self.pos = self.desired_pos(target);
    }

    /// Подтянуть вид к цели за прошедший кадр
    pub fn update(&mut self, target: Vec2, delta: f32) {
        let desired = self.desired_pos(target);
        let diff = desired - self.pos;
        if diff.mag() < SNAP_DISTANCE {
            self.pos = desired;
            return;
        }
        let t = (self.smoothing * delta).min(1.0);
        self.pos += diff * t;
    }

    /// Мировая точка в экранных координатах
    pub fn world_to_screen(&self, world: Vec2) -> (i32, i32) {
        (
            (world.x - self.pos.x).floor() as i32,
            (world.y - self.pos.y).floor() as i32,
        )
    }

    /// Чанк под центром вида, он же фокус для стриминга
    pub fn focus_chunk(&self) -> ChunkCoord {
        let cx = self.pos.x + self.screen_width as f32 / 2.0;
        let cy = self.pos.y + self.screen_height as f32 / 2.0;
        ChunkCoord::from_world_px(cx.floor() as i32, cy.floor() as i32)
    }

    /// Координаты чанков, пересекающих видимую область (включительно)
    pub fn visible_chunks(&self) -> Vec<ChunkCoord> {
        let left = self.pos.x.floor() as i32;
        let top = self.pos.y.floor() as i32;
        let right = (self.pos.x + self.screen_width as f32).ceil() as i32 - 1;
        let bottom = (self.pos.y + self.screen_height as f32).ceil() as i32 - 1;

        let x0 = left.div_euclid(CHUNK_PX_WIDTH);
        let y0 = top.div_euclid(CHUNK_PX_HEIGHT);
        let x1 = right.div_euclid(CHUNK_PX_WIDTH);
        let y1 = bottom.div_euclid(CHUNK_PX_HEIGHT);

        let mut coords = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
        for y in y0..=y1 {
            for x in x0..=x1 {
                coords.push(ChunkCoord::new(x, y));
            }
        }
        coords
    }

    /// Наложить видимые чанки на кадр; незагруженные остаются пустыми
    pub fn blit_view(&self, store: &ChunkStore, frame: &mut Surface) {
        for coord in self.visible_chunks() {
            if let Some(chunk) = store.lookup_loaded(coord) {
                self.blit_chunk(chunk, frame);
            }
        }
    }

    fn blit_chunk(&self, chunk: &Chunk, frame: &mut Surface) {
        let (ox, oy) = chunk.coord().origin_px();
        let pos = self.world_to_screen(Vec2::new(ox as f32, oy as f32));
        chunk.blit(frame, pos);
    }
}
