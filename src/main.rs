// heapsmash: Heap Overflow Sandbox with Memory Visualization

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use heapsmash::config::{
    HeapConfig, GUARD_CAPACITY, GUARD_SENTINEL, PRIMARY_CAPACITY, PRIMARY_VALUE,
};
use heapsmash::console::run_console;
use heapsmash::memory::HeapModel;
use heapsmash::report::run_batch;
use heapsmash::session::{Phase, Session};
use heapsmash::ui::App;

#[derive(Parser, Debug)]
#[command(name = "heapsmash")]
#[command(version)]
#[command(about = "Overflow one heap buffer and watch it corrupt its neighbour")]
struct Args {
    /// Capacity of Buffer1 in bytes
    #[arg(long, default_value_t = PRIMARY_CAPACITY)]
    primary_capacity: usize,

    /// Initial value of Buffer1
    #[arg(long, default_value = PRIMARY_VALUE)]
    primary_value: String,

    /// Capacity of Buffer2 in bytes
    #[arg(long, default_value_t = GUARD_CAPACITY)]
    guard_capacity: usize,

    /// Sentinel stored in Buffer2
    #[arg(long, default_value = GUARD_SENTINEL)]
    guard_value: String,

    /// Use the line-oriented menu instead of the TUI
    #[arg(long, conflicts_with = "json")]
    plain: bool,

    /// Apply every --write, print a JSON report and exit
    #[arg(long)]
    json: bool,

    /// Value to write into Buffer1 (with --json, repeatable)
    #[arg(short, long = "write", requires = "json")]
    writes: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn heap_config(&self) -> HeapConfig {
        HeapConfig {
            primary_capacity: self.primary_capacity,
            primary_value: self.primary_value.clone(),
            guard_capacity: self.guard_capacity,
            guard_sentinel: self.guard_value.clone(),
        }
    }

    fn is_tui(&self) -> bool {
        !self.plain && !self.json
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = FmtSubscriber::builder().with_env_filter(filter);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        // Logging to stderr would draw over the alternate screen
        None if args.is_tui() => {}
        None => {
            let subscriber = builder.with_writer(io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run_tui(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if app.session.phase() == Phase::Exploited {
        println!("You Win!");
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let heap = match HeapModel::new(&args.heap_config()) {
        Ok(heap) => heap,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        primary = args.primary_capacity,
        guard = args.guard_capacity,
        "heap ready"
    );

    let mut session = Session::new(heap);

    if args.json {
        let report = run_batch(&mut session, &args.writes);
        println!("{}", report.to_json()?);
    } else if args.plain {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        run_console(&mut session, stdin.lock(), &mut stdout)?;
    } else {
        run_tui(session)?;
    }

    Ok(())
}
