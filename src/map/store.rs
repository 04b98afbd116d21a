// ============================================
// Chunk Store - Стриминг чанков вокруг фокуса
// ============================================
// Держит прямоугольник загруженных чанков вокруг точки фокуса.
// loaded и pending мутируются только на тике обновления; загрузка
// идёт в фоновом потоке (см. loader.rs).

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use super::chunk::Chunk;
use super::constants::{LC_HEIGHT, LC_WIDTH};
use super::coord::ChunkCoord;
use super::loader::{ChunkLoader, LoadRequest};
use super::registry::MapRegistry;

/// Стор загруженных чанков с фоновой подгрузкой
pub struct ChunkStore {
    registry: MapRegistry,
    loaded: HashMap<ChunkCoord, Chunk>,
    /// Координаты, отданные загрузчику и всё ещё нужные
    pending: HashSet<ChunkCoord>,
    loader: ChunkLoader,
    load_width: i32,
    load_height: i32,
    loads_requested: u64,
    evictions: u64,
}

impl ChunkStore {
    pub fn new(registry: MapRegistry) -> Self {
        Self::with_extents(registry, LC_WIDTH, LC_HEIGHT)
    }

    /// Стор с явными размерами прямоугольника загрузки (в чанках)
    pub fn with_extents(registry: MapRegistry, load_width: i32, load_height: i32) -> Self {
        Self {
            registry,
            loaded: HashMap::new(),
            pending: HashSet::new(),
            loader: ChunkLoader::new(),
            load_width: load_width.max(1),
            load_height: load_height.max(1),
            loads_requested: 0,
            evictions: 0,
        }
    }

    /// Привести набор чанков к прямоугольнику вокруг фокуса
    ///
    /// Повторный вызов с тем же фокусом не делает ничего.
    pub fn stream_around(&mut self, focus: ChunkCoord) {
        let x0 = focus.x - self.load_width / 2;
        let y0 = focus.y - self.load_height / 2;
        let (w, h) = (self.load_width, self.load_height);
        let inside =
            move |c: ChunkCoord| c.x >= x0 && c.x < x0 + w && c.y >= y0 && c.y < y0 + h;

        // 1. Выселяем загруженные чанки вне прямоугольника
        let outside: Vec<ChunkCoord> = self
            .loaded
            .keys()
            .filter(|c| !inside(**c))
            .copied()
            .collect();
        for coord in outside {
            if let Some(chunk) = self.loaded.remove(&coord) {
                if chunk.is_modified() {
                    log::warn!("Evicting modified chunk {} without saving", coord);
                }
                self.evictions += 1;
            }
        }

        // 2. Отменяем ожидающие загрузки, вышедшие из прямоугольника;
        //    их результаты будут отброшены при выкачке
        self.pending.retain(|c| inside(*c));

        // 3. Запрашиваем недостающие координаты
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let coord = ChunkCoord::new(x, y);
                if self.loaded.contains_key(&coord) || self.pending.contains(&coord) {
                    continue;
                }
                let path = self.registry.resolve(coord);
                if self.loader.request(LoadRequest { coord, path }) {
                    self.pending.insert(coord);
                    self.loads_requested += 1;
                }
            }
        }
    }

    fn accept(&mut self, chunk: Chunk) {
        let coord = chunk.coord();
        if self.pending.remove(&coord) {
            self.loaded.insert(coord, chunk);
        }
        // Иначе координата вышла из зоны до завершения, результат отброшен
    }

    /// Выкачать готовые чанки из загрузчика (раз в тик)
    pub fn pump(&mut self) {
        while let Some(chunk) = self.loader.try_recv() {
            self.accept(chunk);
        }
    }

    /// Дождаться завершения всех ожидающих загрузок
    pub fn flush_pending(&mut self) {
        while !self.pending.is_empty() {
            match self.loader.recv_blocking() {
                Some(chunk) => self.accept(chunk),
                None => break,
            }
        }
    }

    /// Живой чанк, если загружен; никогда не грузит сам
    pub fn lookup_loaded(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.loaded.get(&coord)
    }

    pub fn lookup_loaded_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.loaded.get_mut(&coord)
    }

    /// Сохранить все изменённые чанки под указанный корень
    ///
    /// Выселение само ничего не сохраняет; это явная точка записи.
    pub fn save_all(&mut self, chunks_root: &Path) -> io::Result<usize> {
        let mut saved = 0;
        for chunk in self.loaded.values_mut() {
            if chunk.is_modified() {
                chunk.to_file(chunks_root)?;
                saved += 1;
            }
        }
        Ok(saved)
    }

    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        self.loaded.keys().copied().collect()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn loads_requested(&self) -> u64 {
        self.loads_requested
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }
}
