// ============================================
// Chunk Loader - Фоновая загрузка чанков
// ============================================
// Рабочий поток читает и растеризует чанки вне кадрового тика.
// Запросы и готовые чанки ходят через mpsc-каналы; стор забирает
// результаты неблокирующим try_recv на тике обновления.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use super::chunk::Chunk;
use super::coord::ChunkCoord;

/// Запрос на загрузку: координата + уже разрешённый путь (если есть)
#[derive(Debug)]
pub struct LoadRequest {
    pub coord: ChunkCoord,
    pub path: Option<PathBuf>,
}

/// Фоновый загрузчик чанков
pub struct ChunkLoader {
    request_tx: Sender<LoadRequest>,
    result_rx: Receiver<Chunk>,
    _worker: JoinHandle<()>,
}

impl ChunkLoader {
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<Chunk>();

        let worker = thread::spawn(move || loop {
            match request_rx.recv() {
                Ok(request) => {
                    let chunk = Chunk::from_file(request.coord, request.path);
                    if result_tx.send(chunk).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        Self {
            request_tx,
            result_rx,
            _worker: worker,
        }
    }

    /// Отправить запрос; false если рабочий поток уже умер
    pub fn request(&self, request: LoadRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Забрать готовый чанк без блокировки
    pub fn try_recv(&self) -> Option<Chunk> {
        match self.result_rx.try_recv() {
            Ok(chunk) => Some(chunk),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Дождаться следующего готового чанка
    pub fn recv_blocking(&self) -> Option<Chunk> {
        self.result_rx.recv().ok()
    }
}

impl Default for ChunkLoader {
    fn default() -> Self {
        Self::new()
    }
}
