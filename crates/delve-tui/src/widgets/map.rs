//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use delve_core::render::{DrawTarget, Level, TileSet, Tint};

/// Visual handle for one tile classification: a glyph plus a bold flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGlyph {
    pub symbol: char,
    pub bold: bool,
}

/// The glyphs the demo binds to the three classifications
pub fn default_tileset() -> TileSet<TileGlyph> {
    TileSet {
        empty: TileGlyph {
            symbol: ' ',
            bold: false,
        },
        wall: TileGlyph {
            symbol: '#',
            bold: true,
        },
        floor: TileGlyph {
            symbol: '.',
            bold: false,
        },
    }
}

/// Draw target over a ratatui buffer region.
///
/// Tile size is a cell multiplier: size n paints each tile as an n x n
/// block of terminal cells.
struct BufferTarget<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl DrawTarget<TileGlyph> for BufferTarget<'_> {
    fn draw(&mut self, handle: &TileGlyph, x: usize, y: usize, tile_size: u32, tint: Tint) {
        let size = tile_size.max(1) as usize;
        let color = Color::Rgb(
            (tint.r * 255.0) as u8,
            (tint.g * 255.0) as u8,
            (tint.b * 255.0) as u8,
        );
        let mut style = Style::default().fg(color);
        if handle.bold {
            style = style.bold();
        }

        for dy in 0..size {
            for dx in 0..size {
                let cx = x * size + dx;
                let cy = y * size + dy;
                if cx >= self.area.width as usize || cy >= self.area.height as usize {
                    continue;
                }
                let position =
                    Position::new(self.area.x + cx as u16, self.area.y + cy as u16);
                if let Some(cell) = self.buf.cell_mut(position) {
                    cell.set_char(handle.symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

/// Widget for rendering a generated level
pub struct MapWidget<'a> {
    level: &'a Level<TileGlyph>,
    tile_size: u32,
}

impl<'a> MapWidget<'a> {
    pub fn new(level: &'a Level<TileGlyph>) -> Self {
        Self {
            level,
            tile_size: 1,
        }
    }

    /// Paint each tile as an n x n block of cells
    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title("delve");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut target = BufferTarget { buf, area: inner };
        self.level.render(&mut target, self.tile_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::MapRng;
    use delve_core::dungeon::TileState;

    #[test]
    fn test_widget_paints_generated_tiles() {
        let mut rng = MapRng::new(42);
        let level = Level::generate(30, 14, default_tileset(), &mut rng)
            .expect("30x14 fits every shape");

        let area = Rect::new(0, 0, 32, 16);
        let mut buf = Buffer::empty(area);
        MapWidget::new(&level).render(area, &mut buf);

        // Inside the border, every grid cell is painted with its glyph.
        let mut floors = 0;
        for (x, y, state) in level.grid().cells() {
            let position = Position::new(1 + x as u16, 1 + y as u16);
            let cell = buf.cell(position).expect("cell inside the buffer");
            let expected = default_tileset().handle(state).symbol;
            assert_eq!(cell.symbol(), expected.to_string());
            if state == TileState::Floor {
                floors += 1;
            }
        }
        assert!(floors > 0, "a generated level should contain floor");
    }

    #[test]
    fn test_tile_size_scales_blocks() {
        let mut rng = MapRng::new(7);
        let level =
            Level::generate(14, 14, default_tileset(), &mut rng).expect("14x14 fits every shape");

        let area = Rect::new(0, 0, 30, 30);
        let mut buf = Buffer::empty(area);
        MapWidget::new(&level).tile_size(2).render(area, &mut buf);

        // Each tile covers a 2x2 cell block inside the border.
        for (x, y, state) in level.grid().cells() {
            let expected = default_tileset().handle(state).symbol.to_string();
            for (dx, dy) in [(0u16, 0u16), (1, 0), (0, 1), (1, 1)] {
                let position = Position::new(1 + x as u16 * 2 + dx, 1 + y as u16 * 2 + dy);
                if let Some(cell) = buf.cell(position) {
                    assert_eq!(cell.symbol(), expected);
                }
            }
        }
    }
}
