//! Detective Quest
//!
//! Explore the mansion, collect the clues and accuse the culprit.

use std::io::{self, stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use detective_quest::game::{Game, GameOptions, LeafPolicy, Scenario};
use detective_quest::tui::App;
use detective_quest::{console, Result};

/// Detective Quest - a mansion mystery in the terminal
#[derive(Parser, Debug)]
#[command(name = "detective-quest")]
#[command(author, version, about = "Explore the mansion, collect clues, name the culprit", long_about = None)]
struct Args {
    /// Scenario file (JSON); the built-in mansion is used when absent
    #[arg(short = 's', long = "scenario")]
    scenario: Option<PathBuf>,

    /// Plain line-based play on stdin/stdout instead of the full-screen UI
    #[arg(short = 'p', long = "plain")]
    plain: bool,

    /// End exploration as soon as a room without exits is entered
    #[arg(long = "end-at-dead-end")]
    end_at_dead_end: bool,

    /// Bucket count of the suspect table (overrides the scenario)
    #[arg(long = "buckets")]
    buckets: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr and stay silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::mansion(),
    };

    let options = GameOptions {
        leaf_policy: if args.end_at_dead_end {
            LeafPolicy::EndAtDeadEnd
        } else {
            LeafPolicy::QuitOnly
        },
        buckets: args.buckets,
    };

    if args.plain {
        let mut game = Game::new(&scenario, options)?;
        let stdin = io::stdin();
        let mut input = console::LineInput::new(stdin.lock());
        console::run(&mut game, &mut input, &mut stdout())?;
        return Ok(());
    }

    run_tui(scenario, options)
}

fn run_tui(scenario: Scenario, options: GameOptions) -> Result<()> {
    // Build the game before touching the terminal so errors print normally
    let mut app = App::new(scenario, options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let outcome = (|| -> io::Result<()> {
        while app.running {
            terminal.draw(|frame| app.render(frame))?;
            if !app.handle_input()? {
                break;
            }
        }
        Ok(())
    })();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    println!("\n╔════════════════════════════════════════════╗");
    println!("║  Thanks for playing Detective Quest!       ║");
    println!("║                                            ║");
    println!("║  The mansion will keep its other secrets.  ║");
    println!("╚════════════════════════════════════════════╝\n");

    Ok(())
}
