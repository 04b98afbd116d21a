// ============================================
// Chunk - Чанк тайловой карты
// ============================================
// Чанк владеет сеткой 32x32 ключей тайлов, таблицей определений
// и кэш-поверхностью, в которую сетка растеризована.
// Текстовый формат файла:
//
//   define <key> as #RRGGBB
//   <row0col0> <row0col1> ...
//   <row1col0> ...
//
// Поверхность всегда согласована с grid + defs: мутаторы
// перерисовывают её сразу, blit никогда не видит устаревший кэш.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::render::surface::{Rgba, Surface};

use super::constants::{CHUNK_HEIGHT, CHUNK_PX_HEIGHT, CHUNK_PX_WIDTH, CHUNK_WIDTH, TILE_SIZE};
use super::coord::ChunkCoord;
use super::tiles::{encode_hex_color, parse_hex_color, TileDefs};

/// Чанк: сетка ключей тайлов + определения + кэш-поверхность
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    defs: TileDefs,
    /// Ключи тайлов, row-major; пустая строка = незаполненная клетка
    grid: Vec<String>,
    surface: Surface,
    path: Option<PathBuf>,
    modified: bool,
}

impl Chunk {
    /// Пустой чанк: пустая сетка, нет определений, прозрачная поверхность
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            defs: TileDefs::new(),
            grid: vec![String::new(); CHUNK_WIDTH * CHUNK_HEIGHT],
            surface: Surface::new(CHUNK_PX_WIDTH as u32, CHUNK_PX_HEIGHT as u32),
            path: None,
            modified: false,
        }
    }

    /// Чанк из файла; отсутствие файла не ошибка, чанк остаётся пустым
    pub fn from_file(coord: ChunkCoord, path: Option<PathBuf>) -> Self {
        let mut chunk = Chunk::new(coord);
        if let Some(path) = path {
            if let Err(e) = chunk.load(&path) {
                log::warn!("Could not load chunk {} from '{}': {}", coord, path.display(), e);
            }
            chunk.path = Some(path);
        }
        chunk.render();
        chunk
    }

    fn load(&mut self, path: &Path) -> io::Result<()> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file));
        Ok(())
    }

    /// Построчный разбор формата чанка
    ///
    /// Пустые строки пропускаются. Строка-определение: >= 4 токенов
    /// и первый буквально "define". Всё остальное считается строкой данных;
    /// курсор строк сетки двигается только на этой ветке.
    fn parse<R: BufRead>(&mut self, reader: R) {
        let mut row = 0usize;

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Stopped reading chunk {}: {}", self.coord, e);
                    break;
                }
            };

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            if tokens.len() >= 4 && tokens[0] == "define" {
                // define <key> as #RRGGBB
                match parse_hex_color(tokens[3]) {
                    Ok(color) => self.defs.insert(tokens[1], color),
                    Err(e) => {
                        log::warn!("Chunk {}: skipping malformed definition: {}", self.coord, e)
                    }
                }
            } else {
                if row >= CHUNK_HEIGHT {
                    log::debug!("Chunk {}: dropping data row {} beyond grid", self.coord, row);
                    row += 1;
                    continue;
                }

                for (col, key) in tokens.iter().enumerate() {
                    if col >= CHUNK_WIDTH {
                        log::debug!(
                            "Chunk {}: dropping {} extra tile keys on row {}",
                            self.coord,
                            tokens.len() - CHUNK_WIDTH,
                            row
                        );
                        break;
                    }
                    self.grid[row * CHUNK_WIDTH + col] = (*key).to_string();
                }

                row += 1;
            }
        }
    }

    /// Перерисовать кэш-поверхность из grid + defs
    ///
    /// Красятся только клетки с определённым ключом; остальные
    /// пиксели не трогаются (поверхность прозрачна с создания).
    pub fn render(&mut self) {
        for row in 0..CHUNK_HEIGHT {
            for col in 0..CHUNK_WIDTH {
                let key = &self.grid[row * CHUNK_WIDTH + col];
                if let Some(color) = self.defs.get(key) {
                    self.surface.fill_rect(
                        (col * TILE_SIZE) as i32,
                        (row * TILE_SIZE) as i32,
                        TILE_SIZE as u32,
                        TILE_SIZE as u32,
                        color,
                    );
                }
            }
        }
    }

    /// Записать клетку и сразу перерисовать её прямоугольник
    pub fn set_tile(&mut self, row: usize, col: usize, key: &str) {
        if row >= CHUNK_HEIGHT || col >= CHUNK_WIDTH {
            log::debug!("Chunk {}: set_tile({}, {}) out of range", self.coord, row, col);
            return;
        }

        self.grid[row * CHUNK_WIDTH + col] = key.to_string();
        self.modified = true;

        let x = (col * TILE_SIZE) as i32;
        let y = (row * TILE_SIZE) as i32;
        let fill = self.defs.get(key).unwrap_or(Rgba::TRANSPARENT);
        self.surface.fill_rect(x, y, TILE_SIZE as u32, TILE_SIZE as u32, fill);
    }

    /// Добавить/заменить определение и полностью перерисовать поверхность
    pub fn define_tile(&mut self, key: &str, color: Rgba) {
        self.defs.insert(key, color);
        self.modified = true;
        self.surface.clear(Rgba::TRANSPARENT);
        self.render();
    }

    /// Ключ тайла в клетке; None для незаполненных и внешних клеток
    pub fn tile(&self, row: usize, col: usize) -> Option<&str> {
        if row >= CHUNK_HEIGHT || col >= CHUNK_WIDTH {
            return None;
        }
        let key = self.grid[row * CHUNK_WIDTH + col].as_str();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Чистое наложение кэш-поверхности; позиция уже экранная
    pub fn blit(&self, dest: &mut Surface, pos: (i32, i32)) {
        dest.blit(&self.surface, pos);
    }

    /// Записать чанк в "{x},{y}.chunk" под указанным корнем
    ///
    /// Определения пишутся первыми, отсортированные по ключу,
    /// альфа не сохраняется. Затем сетка row-major, токен + пробел.
    pub fn to_file(&mut self, chunks_root: &Path) -> io::Result<PathBuf> {
        let path = chunks_root.join(self.coord.file_name());
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        for (key, color) in self.defs.sorted() {
            writeln!(writer, "define {} as {}", key, encode_hex_color(color))?;
        }

        for row in 0..CHUNK_HEIGHT {
            for col in 0..CHUNK_WIDTH {
                write!(writer, "{} ", self.grid[row * CHUNK_WIDTH + col])?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        self.modified = false;
        Ok(path)
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn defs(&self) -> &TileDefs {
        &self.defs
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Путь файла, из которого чанк был загружен (если был)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Менялся ли чанк с момента загрузки/сохранения
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
