/// ----- VIEW MODULE -----
/// Terminal drawing. Maps the scene's logical pixel space onto a character
/// grid and redraws it in place every frame.

use std::io::{Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use crossterm::style::Print;
use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand, Result};

use crate::entity::Position;
use crate::scene::{Scene, SCREEN_HEIGHT, SCREEN_WIDTH, WAITING_X};

const CELL_W: f64 = 10.0;
const CELL_H: f64 = 20.0;
const COLS: usize = 80; // SCREEN_WIDTH / CELL_W
const ROWS: usize = 40; // SCREEN_HEIGHT / CELL_H

/// Building wall: passengers beyond it have left the visible scene.
const WALL_X: f64 = 700.0;

pub fn enter(stdout: &mut Stdout) -> Result<()> {
    terminal::enable_raw_mode()?;
    stdout.execute(terminal::EnterAlternateScreen)?;
    stdout.execute(cursor::Hide)?;
    Ok(())
}

pub fn leave(stdout: &mut Stdout) -> Result<()> {
    stdout.execute(cursor::Show)?;
    stdout.execute(terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Wait up to `timeout` for input; this doubles as the frame pacing.
pub fn quit_requested(timeout: Duration) -> Result<bool> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
        }
    }
    Ok(false)
}

fn col(x: f64) -> Option<usize> {
    if !(0.0..=SCREEN_WIDTH).contains(&x) {
        return None;
    }
    Some(((x / CELL_W) as usize).min(COLS - 1))
}

fn row(y: f64) -> Option<usize> {
    if !(0.0..=SCREEN_HEIGHT).contains(&y) {
        return None;
    }
    Some(((y / CELL_H) as usize).min(ROWS - 1))
}

fn place(grid: &mut [Vec<char>], position: Position, glyph: char) {
    if let (Some(row), Some(col)) = (row(position.y), col(position.x)) {
        grid[row][col] = glyph;
    }
}

pub fn draw(stdout: &mut Stdout, scene: &Scene) -> Result<()> {
    let mut grid = vec![vec![' '; COLS]; ROWS];

    let wall_col = (WALL_X / CELL_W) as usize;

    // floor lines with labels
    for floor in 0..scene.num_floors() {
        if let Some(line_row) = row(scene.floor_to_y(floor as f64)) {
            for cell in grid[line_row][..wall_col].iter_mut() {
                *cell = '-';
            }
            for (offset, digit) in floor.to_string().chars().enumerate() {
                grid[line_row][offset] = digit;
            }
        }
    }

    // shaft rails between the bottom and top floor
    let top = scene.floor_to_y(scene.num_floors().saturating_sub(1) as f64);
    let bottom = scene.floor_to_y(0.0);
    for &id in scene.elevators().keys() {
        if let Some(shaft_col) = col(Scene::shaft_x(id)) {
            for y in (top as usize..=bottom as usize).step_by(CELL_H as usize) {
                if let Some(rail_row) = row(y as f64) {
                    grid[rail_row][shaft_col] = ':';
                }
            }
        }
    }

    // waiting line marker
    if let Some(waiting_col) = col(WAITING_X) {
        for line in grid.iter_mut() {
            if line[waiting_col] == ' ' {
                line[waiting_col] = '.';
            }
        }
    }

    // passengers, then elevator cars on top of the rails
    for person in scene.passengers().values() {
        let anchor = person.anchor();
        if anchor.x < WALL_X {
            place(&mut grid, anchor, 'o');
        }
    }
    for (&id, elevator) in scene.elevators() {
        let anchor = elevator.anchor();
        if let (Some(car_row), Some(car_col)) = (row(anchor.y), col(anchor.x)) {
            grid[car_row][car_col] = char::from_digit(id as u32 % 10, 10).unwrap_or('#');
            if car_col > 0 {
                grid[car_row][car_col - 1] = '[';
            }
            if car_col + 1 < COLS {
                grid[car_row][car_col + 1] = ']';
            }
        }
    }

    // outer wall drawn last
    for line in grid.iter_mut() {
        line[wall_col] = '|';
    }

    for (line_row, line) in grid.iter().enumerate() {
        stdout.queue(cursor::MoveTo(0, line_row as u16))?;
        stdout.queue(Print(line.iter().collect::<String>()))?;
    }
    stdout.queue(cursor::MoveTo(0, ROWS as u16))?;
    stdout.queue(Print(format!(
        "floors: {}  elevators: {}  passengers: {}  [q] quit",
        scene.num_floors(),
        scene.elevators().len(),
        scene.passengers().len()
    )))?;
    stdout.flush()?;
    Ok(())
}
