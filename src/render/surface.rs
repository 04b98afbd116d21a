// ============================================
// Surface - CPU-буфер пикселей RGBA
// ============================================
// Кэш-поверхности чанков и кадр собираются здесь,
// внешний презентер забирает байты через as_bytes()

use bytemuck::{Pod, Zeroable};

/// Пиксель RGBA (0-255)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Полностью непрозрачный цвет
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Прямоугольный буфер пикселей
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Создать прозрачную поверхность заданного размера
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Залить всю поверхность одним цветом
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Залить прямоугольник, обрезая по краям поверхности
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width as i32);
        let y1 = (y + h as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for row in y0..y1 {
            let start = (row as usize) * (self.width as usize) + (x0 as usize);
            let end = (row as usize) * (self.width as usize) + (x1 as usize);
            self.pixels[start..end].fill(color);
        }
    }

    /// Наложить другую поверхность в позиции pos
    ///
    /// Полностью прозрачные пиксели источника пропускаются,
    /// остальные перезаписывают назначение.
    pub fn blit(&mut self, src: &Surface, pos: (i32, i32)) {
        let (dx, dy) = pos;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + src.width as i32).min(self.width as i32);
        let y1 = (dy + src.height as i32).min(self.height as i32);

        for y in y0..y1 {
            let sy = (y - dy) as usize;
            for x in x0..x1 {
                let sx = (x - dx) as usize;
                let pixel = src.pixels[sy * (src.width as usize) + sx];
                if pixel.a == 0 {
                    continue;
                }
                self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = pixel;
            }
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Сырые байты поверхности (RGBA, row-major) для презентера
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
