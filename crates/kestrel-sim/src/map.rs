//! Tile map: one grid of [`Ground`] per layer.
//!
//! Text grids use one character per 8x8 tile:
//!
//! | char | ground         |
//! |------|----------------|
//! | ` `  | empty          |
//! | `.`  | traversable    |
//! | `#`  | wall           |
//! | `-`  | shallow water  |
//! | `~`  | deep water     |
//! | `O`  | hole           |
//! | `*`  | ice            |
//! | `L`  | lava           |
//! | `^`  | prickles       |
//! | `H`  | ladder         |
//! | `"`  | grass          |

use kestrel_core::constants::TILE_SIZE;
use kestrel_core::enums::{Ground, Layer};
use kestrel_core::types::{Point, Rect};

use crate::error::MapError;

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    width: usize,
    height: usize,
    layers: [Vec<Ground>; Layer::COUNT],
}

impl Map {
    /// A map of `width` x `height` tiles. The low layer is filled with
    /// `ground`, the upper layers are empty.
    pub fn filled(width: usize, height: usize, ground: Ground) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            layers: [
                vec![ground; cells],
                vec![Ground::Empty; cells],
                vec![Ground::Empty; cells],
            ],
        }
    }

    /// Parse the low layer from a text grid.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let grid = parse_grid(text)?;
        let height = grid.len();
        let width = grid[0].len();
        let mut map = Map::filled(width, height, Ground::Empty);
        map.layers[Layer::Low.index()] = grid.into_iter().flatten().collect();
        Ok(map)
    }

    /// Replace an upper layer with a text grid of the same size.
    pub fn with_layer(mut self, layer: Layer, text: &str) -> Result<Self, MapError> {
        let grid = parse_grid(text)?;
        if grid.len() != self.height || grid[0].len() != self.width {
            return Err(MapError::SizeMismatch {
                width: self.width,
                height: self.height,
                found_width: grid[0].len(),
                found_height: grid.len(),
            });
        }
        self.layers[layer.index()] = grid.into_iter().flatten().collect();
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        (
            self.width as i32 * TILE_SIZE,
            self.height as i32 * TILE_SIZE,
        )
    }

    pub fn set_tile(&mut self, layer: Layer, tx: usize, ty: usize, ground: Ground) {
        if tx < self.width && ty < self.height {
            self.layers[layer.index()][ty * self.width + tx] = ground;
        }
    }

    /// Fill every tile overlapped by a pixel rectangle.
    pub fn fill_rect(&mut self, layer: Layer, rect: &Rect, ground: Ground) {
        for (tx, ty) in tiles_overlapping(*rect) {
            self.set_tile(layer, tx as usize, ty as usize, ground);
        }
    }

    /// Ground of the tile containing a pixel. Outside the map is a wall.
    pub fn ground_at(&self, layer: Layer, point: Point) -> Ground {
        if point.x < 0 || point.y < 0 {
            return Ground::Wall;
        }
        let tx = (point.x / TILE_SIZE) as usize;
        let ty = (point.y / TILE_SIZE) as usize;
        if tx >= self.width || ty >= self.height {
            return Ground::Wall;
        }
        self.layers[layer.index()][ty * self.width + tx]
    }

    /// Ground seen at a pixel, looking through empty tiles to lower layers.
    pub fn ground_below(&self, layer: Layer, point: Point) -> Ground {
        let mut current = layer;
        loop {
            let ground = self.ground_at(current, point);
            match (ground, current.below()) {
                (Ground::Empty, Some(lower)) => current = lower,
                (Ground::Empty, None) => return Ground::Traversable,
                _ => return ground,
            }
        }
    }

    /// Whether a rectangle overlaps a wall on `layer` or leaves the map.
    pub fn collides_with_walls(&self, layer: Layer, rect: &Rect) -> bool {
        let (map_width, map_height) = self.pixel_size();
        if rect.x < 0 || rect.y < 0 || rect.right() > map_width || rect.bottom() > map_height {
            return true;
        }
        tiles_overlapping(*rect).any(|(tx, ty)| {
            self.ground_at(layer, Point::new(tx * TILE_SIZE, ty * TILE_SIZE))
                .is_wall()
        })
    }

    /// Whether every tile under the rectangle is empty on `layer`.
    pub fn is_empty_under(&self, layer: Layer, rect: &Rect) -> bool {
        tiles_overlapping(*rect).all(|(tx, ty)| {
            self.ground_at(layer, Point::new(tx * TILE_SIZE, ty * TILE_SIZE)) == Ground::Empty
        })
    }
}

/// Tile coordinates overlapped by a pixel rectangle.
fn tiles_overlapping(rect: Rect) -> impl Iterator<Item = (i32, i32)> {
    let x0 = rect.x.div_euclid(TILE_SIZE);
    let y0 = rect.y.div_euclid(TILE_SIZE);
    let x1 = (rect.right() - 1).div_euclid(TILE_SIZE);
    let y1 = (rect.bottom() - 1).div_euclid(TILE_SIZE);
    (y0..=y1).flat_map(move |ty| (x0..=x1).map(move |tx| (tx, ty)))
}

fn parse_grid(text: &str) -> Result<Vec<Vec<Ground>>, MapError> {
    let rows: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if rows.is_empty() {
        return Err(MapError::Empty);
    }

    let expected = rows[0].chars().count();
    let mut grid = Vec::with_capacity(rows.len());
    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != expected {
            return Err(MapError::RaggedRow {
                row: y,
                found,
                expected,
            });
        }
        let cells = row
            .chars()
            .enumerate()
            .map(|(x, symbol)| ground_from_symbol(symbol).ok_or(MapError::UnknownSymbol { symbol, x, y }))
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(cells);
    }
    Ok(grid)
}

fn ground_from_symbol(symbol: char) -> Option<Ground> {
    let ground = match symbol {
        ' ' => Ground::Empty,
        '.' => Ground::Traversable,
        '#' => Ground::Wall,
        '-' => Ground::ShallowWater,
        '~' => Ground::DeepWater,
        'O' => Ground::Hole,
        '*' => Ground::Ice,
        'L' => Ground::Lava,
        '^' => Ground::Prickle,
        'H' => Ground::Ladder,
        '"' => Ground::Grass,
        _ => return None,
    };
    Some(ground)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let map = Map::parse("####\n#.~#\n#O.#\n####\n").unwrap();
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 4);
        assert_eq!(map.ground_at(Layer::Low, Point::new(9, 9)), Ground::Traversable);
        assert_eq!(map.ground_at(Layer::Low, Point::new(16, 8)), Ground::DeepWater);
        assert_eq!(map.ground_at(Layer::Low, Point::new(8, 16)), Ground::Hole);
        assert_eq!(map.ground_at(Layer::Low, Point::new(-1, 5)), Ground::Wall);
        assert_eq!(map.ground_at(Layer::Low, Point::new(40, 5)), Ground::Wall);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Map::parse("\n\n"), Err(MapError::Empty));
        assert_eq!(
            Map::parse("...\n..\n"),
            Err(MapError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            })
        );
        assert_eq!(
            Map::parse("..?\n"),
            Err(MapError::UnknownSymbol {
                symbol: '?',
                x: 2,
                y: 0
            })
        );
    }

    #[test]
    fn test_ground_below_looks_through_empty_layers() {
        let map = Map::parse("~.\n")
            .unwrap()
            .with_layer(Layer::Intermediate, " #\n")
            .unwrap();
        assert_eq!(map.ground_below(Layer::Intermediate, Point::new(2, 2)), Ground::DeepWater);
        assert_eq!(map.ground_below(Layer::Intermediate, Point::new(10, 2)), Ground::Wall);
        assert!(map.with_layer(Layer::High, "...\n").is_err());
    }

    #[test]
    fn test_wall_collision() {
        let map = Map::parse("....\n..#.\n....\n").unwrap();
        assert!(!map.collides_with_walls(Layer::Low, &Rect::new(0, 0, 16, 8)));
        assert!(map.collides_with_walls(Layer::Low, &Rect::new(9, 1, 8, 8)));
        // Leaving the map counts as a wall.
        assert!(map.collides_with_walls(Layer::Low, &Rect::new(-1, 0, 8, 8)));
        assert!(map.collides_with_walls(Layer::Low, &Rect::new(28, 0, 8, 8)));
    }

    #[test]
    fn test_fill_rect() {
        let mut map = Map::filled(4, 4, Ground::Traversable);
        map.fill_rect(Layer::Low, &Rect::new(8, 8, 16, 8), Ground::Hole);
        assert_eq!(map.ground_at(Layer::Low, Point::new(8, 8)), Ground::Hole);
        assert_eq!(map.ground_at(Layer::Low, Point::new(23, 15)), Ground::Hole);
        assert_eq!(map.ground_at(Layer::Low, Point::new(24, 8)), Ground::Traversable);
        assert!(map.is_empty_under(Layer::High, &Rect::new(0, 0, 16, 16)));
    }
}
