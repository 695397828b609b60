//! Text renderer
//!
//! One character per cell, framed by the walls: `=`/`|` for lethal walls,
//! `.`/`:` for walls that wrap.

use super::{Frame, Renderer};
use crate::sim::{Wall, WallTier};

#[derive(Debug, Default)]
pub struct AsciiRenderer {
    output: String,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frame drawn
    pub fn output(&self) -> &str {
        &self.output
    }
}

fn bonus_glyph(color: &str) -> char {
    color
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('B')
}

impl Renderer for AsciiRenderer {
    fn draw(&mut self, frame: &Frame) {
        let cell = frame.cell_size.max(1);
        let cols = (frame.board_width / cell).max(0) as usize;
        let rows = (frame.board_height / cell).max(0) as usize;
        let mut cells = vec![vec![' '; cols]; rows];

        let mut put = |x: i32, y: i32, glyph: char| {
            let (col, row) = (x.div_euclid(cell), y.div_euclid(cell));
            if col >= 0 && row >= 0 && (col as usize) < cols && (row as usize) < rows {
                cells[row as usize][col as usize] = glyph;
            }
        };

        for ob in &frame.obstacles {
            put(ob.x, ob.y, 'X');
        }
        put(frame.food.x, frame.food.y, '*');
        if let Some(bonus) = &frame.bonus {
            put(bonus.pos.x, bonus.pos.y, bonus_glyph(bonus.color));
        }
        for (i, seg) in frame.snake.iter().enumerate().rev() {
            put(seg.x, seg.y, if i == 0 { '#' } else { 'o' });
        }

        let tier = WallTier(frame.wall_tier);
        let edge = |wall: Wall, lethal: char, safe: char| {
            if tier.is_lethal(wall) { lethal } else { safe }
        };
        let top = edge(Wall::Top, '=', '.');
        let bottom = edge(Wall::Bottom, '=', '.');
        let left = edge(Wall::Left, '|', ':');
        let right = edge(Wall::Right, '|', ':');

        let mut out = String::with_capacity((cols + 3) * (rows + 3));
        out.push_str(&format!(
            "{}  score {}  level {}  lives {}\n",
            frame.player_name, frame.score, frame.level, frame.lives
        ));
        out.push('+');
        out.extend(std::iter::repeat_n(top, cols));
        out.push_str("+\n");
        for row in &cells {
            out.push(left);
            out.extend(row.iter());
            out.push(right);
            out.push('\n');
        }
        out.push('+');
        out.extend(std::iter::repeat_n(bottom, cols));
        out.push('+');
        if let Some(bonus) = &frame.bonus {
            out.push_str(&format!("\nbonus {} {}s", bonus.color, bonus.remaining_secs));
        }

        self.output = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use glam::IVec2;

    fn frame(wall_tier: u8) -> Frame {
        Frame {
            board_width: 60,
            board_height: 40,
            cell_size: 20,
            snake: vec![IVec2::new(20, 0), IVec2::new(0, 0)],
            food: IVec2::new(40, 20),
            obstacles: vec![IVec2::new(0, 20)],
            bonus: None,
            wall_tier,
            score: 3,
            level: 2,
            lives: 4,
            phase: GamePhase::Playing,
            player_name: "Asp".to_string(),
        }
    }

    #[test]
    fn test_draws_board() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw(&frame(0));
        let expected = "Asp  score 3  level 2  lives 4\n\
                        +...+\n\
                        :o# :\n\
                        :X *:\n\
                        +...+";
        assert_eq!(renderer.output(), expected);
    }

    #[test]
    fn test_lethal_walls_marked() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw(&frame(3));
        let lines: Vec<_> = renderer.output().lines().collect();
        assert_eq!(lines[1], "+===+");
        assert_eq!(lines[2], "|o# :");
        assert_eq!(lines[4], "+===+");
    }
}
