mod args;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use args::Args;
use rlife_lib::{Grid, Life, World};
use std::{io, thread, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The board in a `+---+` frame, with living cells drawn as `#`.
pub(crate) fn frame(grid: &Grid) -> String {
    let border = format!("+{}+\n", "-".repeat(grid.width() as usize));
    let mut str = border.clone();
    for row in 0..grid.height() {
        str.push('|');
        for col in 0..grid.width() {
            str.push(if grid.is_alive((row, col)) { '#' } else { ' ' });
        }
        str.push_str("|\n");
    }
    str.push_str(&border);
    str
}

/// Prints every generation to stdout, one after another.
fn run_plain(world: &mut World<Life>, delay: Duration) {
    loop {
        println!("{}", world.report());
        print!("{}", frame(world.grid()));
        if !world.step() {
            break;
        }
        thread::sleep(delay);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse()?;
    let mut world = args
        .config
        .world()
        .context("cannot create the world")?;
    info!(
        "{}x{} world, rule {}",
        world.grid().width(),
        world.grid().height(),
        world.rule()
    );

    if args.dump {
        let max_gen = world.max_gen().unwrap_or(0);
        world.run(max_gen);
        print!("{}", world.rle());
        return Ok(());
    }

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return tui::run_with_tui(&mut world, args.delay);
    }

    run_plain(&mut world, args.delay);
    Ok(())
}
