use anyhow::{bail, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, Stylize},
    terminal::{self, ClearType},
};
use rlife_lib::{Grid, Life, World};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Paused,
    Finished,
}

impl Status {
    fn message(self) -> &'static str {
        match self {
            Status::Running => "Running... Press [space] to pause, [q] to quit.",
            Status::Paused => "Paused. Press [space] to resume, [n] to step, [q] to quit.",
            Status::Finished => "Finished. Press [q] to quit.",
        }
    }
}

/// What the user asked for.
enum Action {
    Quit,
    Toggle,
    Step,
}

fn read_key(timeout: Duration) -> Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let action = match event::read()? {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
            KeyCode::Char('n') | KeyCode::Right => Some(Action::Step),
            _ => None,
        },
        _ => None,
    };
    Ok(action)
}

/// The terminal row of the status line, below the report line,
/// the two borders and the board.
///
/// `None` if the board is too tall for terminal coordinates.
fn status_row(grid: &Grid) -> Option<u16> {
    u16::try_from(grid.height()).ok()?.checked_add(3)
}

/// Draws the report line, the framed board and the status line.
fn draw<W: Write>(out: &mut W, world: &World<Life>, status: Status) -> io::Result<()> {
    let grid = world.grid();
    let status_row = status_row(grid).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "the board is too tall to draw")
    })?;
    let border = format!("+{}+", "-".repeat(grid.width() as usize));

    queue!(
        out,
        cursor::MoveTo(0, 0),
        Print(world.report()),
        terminal::Clear(ClearType::UntilNewLine),
        cursor::MoveTo(0, 1),
        Print(&border)
    )?;
    for (row, y) in (0..grid.height()).zip(2..status_row) {
        queue!(out, cursor::MoveTo(0, y), Print('|'))?;
        for col in 0..grid.width() {
            if grid.is_alive((row, col)) {
                queue!(out, Print('#'.red()))?;
            } else {
                queue!(out, Print(' '))?;
            }
        }
        queue!(out, Print('|'))?;
    }
    queue!(
        out,
        cursor::MoveTo(0, status_row - 1),
        Print(&border),
        cursor::MoveTo(0, status_row),
        Print(status.message().reverse()),
        terminal::Clear(ClearType::UntilNewLine)
    )?;
    out.flush()
}

fn main_loop<W: Write>(out: &mut W, world: &mut World<Life>, delay: Duration) -> Result<()> {
    let mut status = if world.is_finished() {
        Status::Finished
    } else {
        Status::Running
    };
    let mut next_step = Instant::now() + delay;
    draw(out, world, status)?;

    loop {
        let timeout = match status {
            Status::Running => next_step.saturating_duration_since(Instant::now()),
            _ => Duration::from_secs(60),
        };
        match read_key(timeout)? {
            Some(Action::Quit) => break,
            Some(Action::Toggle) => {
                status = match status {
                    Status::Running => Status::Paused,
                    Status::Paused => {
                        next_step = Instant::now() + delay;
                        Status::Running
                    }
                    Status::Finished => Status::Finished,
                };
            }
            Some(Action::Step) if status == Status::Paused => {
                if !world.step() {
                    status = Status::Finished;
                }
            }
            Some(Action::Step) => (),
            None if status == Status::Running && Instant::now() >= next_step => {
                if !world.step() || world.is_finished() {
                    status = Status::Finished;
                }
                next_step += delay;
            }
            None => continue,
        }
        draw(out, world, status)?;
    }
    Ok(())
}

/// Runs the world in the terminal, redrawing it in place after each
/// generation, until the user quits.
///
/// The last displayed generation is printed after leaving the TUI.
pub(crate) fn run_with_tui(world: &mut World<Life>, delay: Duration) -> Result<()> {
    if status_row(world.grid()).is_none() {
        bail!(
            "a board of {} rows is too tall for the TUI, try --no-tui",
            world.grid().height()
        );
    }
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide
    )?;

    let result = main_loop(&mut stdout, world, delay);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    info!("left the TUI at generation {}", world.gen());

    result?;
    println!("{}", world.report());
    print!("{}", crate::frame(world.grid()));
    Ok(())
}
