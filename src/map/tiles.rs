// ============================================
// Tile Defs - Таблица определений тайлов
// ============================================
// Каждый чанк несёт собственную таблицу: ключ -> цвет.
// Ключи локальны для файла чанка и не уникальны глобально.

use std::collections::HashMap;

use crate::render::surface::Rgba;

/// Разобрать цвет вида "#RRGGBB"
///
/// Потребляются ровно первые 6 hex-цифр после маркера,
/// хвост (например альфа в "#RRGGBBAA") игнорируется.
/// Альфа всегда 255.
pub fn parse_hex_color(s: &str) -> Result<Rgba, String> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| format!("color '{}' is missing the '#' marker", s))?;

    let bytes = hex.as_bytes();
    if bytes.len() < 6 || !bytes[..6].iter().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("color '{}' is not of the form #RRGGBB", s));
    }

    // Первые 6 цифр уже проверены, парсинг ниже не падает
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    Ok(Rgba::opaque(r, g, b))
}

/// Цвет обратно в "#rrggbb" (альфа не сохраняется)
pub fn encode_hex_color(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Таблица определений тайлов одного чанка
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileDefs {
    table: HashMap<String, Rgba>,
}

impl TileDefs {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Добавить определение; альфа принудительно 255
    pub fn insert(&mut self, key: &str, color: Rgba) {
        self.table
            .insert(key.to_string(), Rgba::opaque(color.r, color.g, color.b));
    }

    pub fn get(&self, key: &str) -> Option<Rgba> {
        self.table.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba)> + '_ {
        self.table.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Определения, отсортированные по ключу (для воспроизводимой записи)
    pub fn sorted(&self) -> Vec<(&str, Rgba)> {
        let mut defs: Vec<(&str, Rgba)> = self.iter().collect();
        defs.sort_by(|a, b| a.0.cmp(b.0));
        defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_exact() {
        assert_eq!(parse_hex_color("#FF0000"), Ok(Rgba::new(255, 0, 0, 255)));
        assert_eq!(parse_hex_color("#00ff00"), Ok(Rgba::new(0, 255, 0, 255)));
        assert_eq!(parse_hex_color("#1e90fF"), Ok(Rgba::new(30, 144, 255, 255)));
    }

    #[test]
    fn test_parse_hex_color_consumes_first_six_digits() {
        // Четвёртый RGBA-компонент в данных игнорируется
        assert_eq!(parse_hex_color("#FF000080"), Ok(Rgba::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_parse_hex_color_malformed() {
        assert!(parse_hex_color("FF0000").is_err());
        assert!(parse_hex_color("#FF00").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("#").is_err());
        assert!(parse_hex_color("#ффгг00").is_err());
    }

    #[test]
    fn test_encode_hex_color_roundtrip() {
        let color = Rgba::opaque(0x0a, 0xbc, 0xde);
        assert_eq!(encode_hex_color(color), "#0abcde");
        assert_eq!(parse_hex_color(&encode_hex_color(color)), Ok(color));
    }

    #[test]
    fn test_insert_forces_opaque_alpha() {
        let mut defs = TileDefs::new();
        defs.insert("w", Rgba::new(10, 20, 30, 7));
        assert_eq!(defs.get("w"), Some(Rgba::new(10, 20, 30, 255)));
    }

    #[test]
    fn test_sorted_orders_by_key() {
        let mut defs = TileDefs::new();
        defs.insert("c", Rgba::opaque(3, 3, 3));
        defs.insert("a", Rgba::opaque(1, 1, 1));
        defs.insert("b", Rgba::opaque(2, 2, 2));

        let keys: Vec<&str> = defs.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
