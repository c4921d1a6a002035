//! Procedural dungeon map demo
//!
//! Generates a map and shows it in the terminal. Press `r` for a fresh
//! map, `q` or Escape to quit.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use delve_core::render::Level;
use delve_core::{GenError, MapRng};
use delve_tui::{MapWidget, default_tileset};

/// Procedural dungeon map generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(version, about = "Generate a dungeon map and render it", long_about = None)]
struct Args {
    /// Grid width in tiles
    #[arg(short = 'W', long, default_value_t = 80)]
    width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = 24)]
    height: usize,

    /// RNG seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Terminal cells per tile
    #[arg(short, long, default_value_t = 1)]
    tile_size: u32,

    /// Print the map as plain text and exit
    #[arg(long)]
    ascii: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => MapRng::new(seed),
        None => MapRng::from_entropy(),
    };
    // Stays in scrollback after the alternate screen closes, so the run
    // can be repeated with --seed.
    eprintln!("seed: {}", rng.seed());

    let level = match generate(&args, &mut rng) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("map generation failed: {err}");
            std::process::exit(1);
        }
    };

    if args.ascii {
        print!("{}", level.grid().dump());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &args, &mut rng, level);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn generate(
    args: &Args,
    rng: &mut MapRng,
) -> Result<Level<delve_tui::TileGlyph>, GenError> {
    Level::generate(args.width, args.height, default_tileset(), rng)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    args: &Args,
    rng: &mut MapRng,
    mut level: Level<delve_tui::TileGlyph>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            frame.render_widget(
                MapWidget::new(&level).tile_size(args.tile_size),
                frame.area(),
            );
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => match generate(args, rng) {
                        Ok(fresh) => level = fresh,
                        Err(err) => eprintln!("regeneration failed: {err}"),
                    },
                    _ => {}
                }
            }
        }
    }
    Ok(())
}
