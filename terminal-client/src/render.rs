use std::io::{Write, stdout};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};
use engine::{EndReason, GameSnapshot, GameStatus, Point};

const HEAD: char = 'O';
const BODY: char = 'o';
const FOOD: char = '*';
const WALL: char = '#';

/// Redraws the whole board from a snapshot. The board sits inside a
/// one-cell border; the status line goes underneath.
pub fn draw(snapshot: &GameSnapshot) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let width = snapshot.field_width as usize;
    let border: String = WALL.to_string().repeat(width + 2);
    execute!(out, MoveTo(0, 0), Print(&border))?;

    for y in 0..snapshot.field_height {
        let mut row = String::with_capacity(width + 2);
        row.push(WALL);
        for x in 0..snapshot.field_width {
            let pos = Point::new(x, y);
            let cell = if pos == snapshot.head {
                HEAD
            } else if snapshot.body.contains(&pos) {
                BODY
            } else if pos == snapshot.food {
                FOOD
            } else {
                ' '
            };
            row.push(cell);
        }
        row.push(WALL);
        execute!(out, MoveTo(0, (y + 1) as u16), Print(&row))?;
    }

    let bottom = snapshot.field_height as u16 + 1;
    execute!(out, MoveTo(0, bottom), Print(&border))?;

    let status = match snapshot.status {
        GameStatus::Running => {
            format!("Score: {}  Tick: {}", snapshot.score, snapshot.tick)
        }
        GameStatus::Over => {
            let reason = match snapshot.end_reason {
                Some(EndReason::WallHit) => "wall hit",
                Some(EndReason::SelfCollision) => "self collision",
                Some(EndReason::BoardFull) => "board full",
                None => "over",
            };
            format!(
                "Game over ({}). Score: {}  [r] restart  [q] quit",
                reason, snapshot.score
            )
        }
    };
    execute!(out, MoveTo(0, bottom + 1), Print(status))?;
    execute!(
        out,
        MoveTo(0, bottom + 2),
        Print("Arrow keys or WASD to steer, q to quit")
    )?;
    out.flush()
}
