//! Brick grid
//!
//! Column-major `cells[column][row]`. Durability 0 means the cell is empty
//! (never placed, or destroyed); such cells are skipped by both rendering and
//! collision. Collision scans columns left to right, rows top to bottom, and
//! the first brick that contains the ball wins.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::platform::{Color, Display, Rect};
use crate::tuning::{Difficulty, LevelDescriptor, PatternRule};

/// One grid cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brick {
    /// Remaining hits; 0 = absent
    pub durability: u8,
    /// Top-left corner, cached on first draw
    pub pos: Option<Vec2>,
}

impl Brick {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.durability > 0
    }

    pub fn color(&self) -> Color {
        match self.durability {
            1 => Color::BLUE,
            2 => Color::AMBER,
            _ => Color::RED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    /// Brick size for this layout
    pub brick_size: Vec2,
    cells: Vec<Vec<Brick>>,
}

impl BrickGrid {
    pub fn empty() -> Self {
        Self {
            columns: 0,
            rows: 0,
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            cells: Vec::new(),
        }
    }

    /// Lay out a level: the pattern picks which cells hold a brick, the
    /// difficulty caps how tough each one rolls
    pub fn create<R: Rng + ?Sized>(
        desc: &LevelDescriptor,
        pattern: PatternRule,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        let max_durability = difficulty.max_durability();
        let cells = (0..desc.columns)
            .map(|col| {
                (0..desc.rows)
                    .map(|row| {
                        let durability = if pattern.contains(row, col) {
                            rng.random_range(1..=max_durability)
                        } else {
                            0
                        };
                        Brick {
                            durability,
                            pos: None,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            columns: desc.columns,
            rows: desc.rows,
            brick_size: Vec2::new(brick_width_for(desc.columns), BRICK_HEIGHT),
            cells,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Where a cell sits on the canvas
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        cell_rect(self.brick_size, col, row)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        self.cells.get(col).and_then(|c| c.get(row))
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Brick> {
        self.cells.get_mut(col).and_then(|c| c.get_mut(row))
    }

    /// Total cells, live or not
    pub fn cell_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Bricks still standing
    pub fn remaining(&self) -> usize {
        self.cells.iter().flatten().filter(|b| b.is_live()).count()
    }

    pub fn all_cleared(&self) -> bool {
        self.cells.iter().flatten().all(|b| !b.is_live())
    }

    /// Render live bricks and cache their positions for collision
    pub fn draw(&mut self, display: &mut impl Display) {
        let size = self.brick_size;
        for (col, column) in self.cells.iter_mut().enumerate() {
            for (row, brick) in column.iter_mut().enumerate() {
                if !brick.is_live() {
                    continue;
                }
                let rect = cell_rect(size, col, row);
                brick.pos = Some(rect.pos);
                display.fill_rect(rect, brick.color());
                let label = Vec2::new(rect.pos.x + rect.size.x / 2.0 - 5.0, rect.center().y + 5.0);
                display.fill_text(&brick.durability.to_string(), label, Color::WHITE);
            }
        }
    }

    /// First live, already-drawn brick whose bounds strictly contain `point`
    pub fn hit_test(&self, point: Vec2) -> Option<(usize, usize)> {
        for (col, column) in self.cells.iter().enumerate() {
            for (row, brick) in column.iter().enumerate() {
                if !brick.is_live() {
                    continue;
                }
                let Some(pos) = brick.pos else { continue };
                let bounds = Rect {
                    pos,
                    size: self.brick_size,
                };
                if bounds.contains_strict(point) {
                    return Some((col, row));
                }
            }
        }
        None
    }

    /// Knock one point of durability off a brick; returns its centre
    pub fn strike(&mut self, col: usize, row: usize) -> Option<Vec2> {
        let rect = self.cell_rect(col, row);
        let brick = self.get_mut(col, row)?;
        if !brick.is_live() {
            return None;
        }
        brick.durability -= 1;
        Some(rect.center())
    }
}

fn cell_rect(size: Vec2, col: usize, row: usize) -> Rect {
    let x = col as f32 * (size.x + BRICK_PADDING) + BRICK_OFFSET;
    let y = row as f32 * (size.y + BRICK_PADDING) + BRICK_OFFSET;
    Rect::new(x, y, size.x, size.y)
}

/// Bricks keep their nominal width unless the row would run off the canvas,
/// in which case they narrow so the last column still fits
pub fn brick_width_for(columns: usize) -> f32 {
    if columns == 0 {
        return BRICK_WIDTH;
    }
    let gaps = (columns - 1) as f32 * BRICK_PADDING;
    let available = CANVAS_WIDTH - 2.0 * BRICK_OFFSET - gaps;
    BRICK_WIDTH.min(available / columns as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn easy_full() -> BrickGrid {
        let mut rng = Pcg32::seed_from_u64(1);
        BrickGrid::create(
            &LevelDescriptor::new(3, 5, 2, -2),
            PatternRule::Full,
            Difficulty::Easy,
            &mut rng,
        )
    }

    #[test]
    fn test_easy_grid_all_single_hit() {
        let grid = easy_full();
        assert_eq!(grid.cell_count(), 15);
        assert_eq!(grid.remaining(), 15);
        assert!((0..5).all(|c| (0..3).all(|r| grid.get(c, r).unwrap().durability == 1)));
    }

    #[test]
    fn test_pattern_leaves_gaps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let grid = BrickGrid::create(
            &LevelDescriptor::new(4, 6, 2, -2),
            PatternRule::Checkerboard,
            Difficulty::Easy,
            &mut rng,
        );
        assert_eq!(grid.cell_count(), 24);
        assert_eq!(grid.remaining(), 12);
        assert_eq!(grid.get(1, 0).unwrap().durability, 0);
        assert_eq!(grid.get(1, 1).unwrap().durability, 1);
    }

    #[test]
    fn test_layout_matches_cell_formula() {
        let grid = easy_full();
        assert_eq!(grid.cell_rect(0, 0), Rect::new(30.0, 30.0, 100.0, 30.0));
        assert_eq!(grid.cell_rect(2, 1), Rect::new(250.0, 70.0, 100.0, 30.0));
    }

    #[test]
    fn test_wide_levels_fit_canvas() {
        for cols in [8, 9] {
            let right = BRICK_OFFSET
                + (cols - 1) as f32 * (brick_width_for(cols) + BRICK_PADDING)
                + brick_width_for(cols);
            assert!(right <= CANVAS_WIDTH - BRICK_OFFSET + 0.01);
        }
        assert_eq!(brick_width_for(7), BRICK_WIDTH);
    }

    #[test]
    fn test_widest_level_draws_every_cell() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut grid = BrickGrid::create(
            &LevelDescriptor::new(7, 9, 4, -4),
            PatternRule::Full,
            Difficulty::Hard,
            &mut rng,
        );
        assert_eq!((grid.columns(), grid.rows()), (9, 7));
        let mut display = HeadlessPlatform::new();
        grid.draw(&mut display);
        assert_eq!(display.rects_drawn, 63);
        let last = grid.cell_rect(8, 6);
        assert_eq!(grid.get(8, 6).unwrap().pos, Some(last.pos));
        assert!(last.right() <= CANVAS_WIDTH);
    }

    #[test]
    fn test_undrawn_bricks_do_not_collide() {
        let grid = easy_full();
        assert_eq!(grid.hit_test(Vec2::new(80.0, 45.0)), None);
    }

    #[test]
    fn test_draw_caches_positions_and_skips_dead() {
        let mut grid = easy_full();
        grid.get_mut(0, 0).unwrap().durability = 0;
        let mut display = HeadlessPlatform::new();
        grid.draw(&mut display);
        assert_eq!(display.rects_drawn, 14);
        assert_eq!(display.texts_drawn.len(), 14);
        assert_eq!(grid.get(0, 0).unwrap().pos, None);
        assert_eq!(grid.get(1, 0).unwrap().pos, Some(Vec2::new(140.0, 30.0)));
        // Dead brick is ignored even at its centre
        assert_eq!(grid.hit_test(Vec2::new(80.0, 45.0)), None);
        assert_eq!(grid.hit_test(Vec2::new(190.0, 45.0)), Some((1, 0)));
    }

    #[test]
    fn test_strike_until_cleared() {
        let mut grid = easy_full();
        let mut display = HeadlessPlatform::new();
        grid.draw(&mut display);
        for col in 0..5 {
            for row in 0..3 {
                assert!(!grid.all_cleared());
                assert!(grid.strike(col, row).is_some());
            }
        }
        assert!(grid.all_cleared());
        assert_eq!(grid.strike(0, 0), None);
        grid.draw(&mut display);
        assert_eq!(grid.hit_test(Vec2::new(80.0, 45.0)), None);
    }

    proptest! {
        #[test]
        fn grid_shape_and_durability_bounds(
            seed in any::<u64>(),
            d in 0usize..3,
            level in 0usize..3,
        ) {
            let tuning = Tuning::default();
            let difficulty = Difficulty::ALL[d];
            let desc = tuning.level(difficulty, level).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = BrickGrid::create(&desc, PatternRule::Checkerboard, difficulty, &mut rng);
            prop_assert_eq!(grid.cell_count(), desc.rows * desc.columns);
            for col in 0..desc.columns {
                for row in 0..desc.rows {
                    let dur = grid.get(col, row).unwrap().durability;
                    if PatternRule::Checkerboard.contains(row, col) {
                        prop_assert!(dur >= 1 && dur <= difficulty.max_durability());
                    } else {
                        prop_assert_eq!(dur, 0);
                    }
                }
            }
        }
    }
}
