//! Fact Reframer TUI.
//!
//! Fetch a recent scientific fact, then reframe it through lenses such as
//! Art or Music. The facts live on a pannable, zoomable canvas that is saved
//! between runs.
//!
//! ```bash
//! cargo run -p reframe -- --layout stacked --log-file reframe.log
//! ```

mod app;
mod events;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use reframe_core::{
    FactCanvas, FactService, JsonFileStore, LayoutMode, RandomSampler, ReframeSession, Size,
    ViewportStore,
};

use app::App;
use events::{handle_event, EventResult};
use ui::layout::AppLayout;
use ui::render::render;

#[derive(Debug, Parser)]
#[command(name = "reframe", about = "Reframe scientific facts through new lenses")]
struct Args {
    /// Directory holding the saved canvas.
    #[arg(long, env = "REFRAME_DATA_DIR", default_value = ".reframe")]
    data_dir: PathBuf,

    /// Initial layout: radial or stacked.
    #[arg(long, default_value_t = LayoutMode::Radial)]
    layout: LayoutMode,

    /// Write logs to this file (the terminal is taken by the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the upstream connectivity check at startup.
    #[arg(long)]
    no_api_check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let client = match gemini::Gemini::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Set {} in a .env file or with: export {}=your_key_here",
                gemini::API_KEY_VAR,
                gemini::API_KEY_VAR
            );
            std::process::exit(1);
        }
    };
    tracing::info!(model = client.model(), "starting reframe");

    let service = Arc::new(FactService::new(Arc::new(client)));
    let sampler = Box::new(RandomSampler::new(StdRng::from_entropy()));
    let store = JsonFileStore::in_dir(&args.data_dir);
    let canvas = FactCanvas::open(store, Size::new(1200.0, 800.0), args.layout);
    let session = ReframeSession::new(service, sampler, canvas);
    let app = App::new(session).with_api_check(!args.no_api_check);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend, S: ViewportStore>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        let layout = AppLayout::calculate(
            ratatui::layout::Rect::new(0, 0, size.width, size.height),
            app.session.is_collapsed(),
        );
        app.set_canvas_area(layout.canvas);

        terminal.draw(|f| render(f, &app))?;

        if app.pending_api_check {
            app.pending_api_check = false;
            app.session.check_api().await;
            continue;
        }

        // Loading status is on screen; now do the work.
        if app.session.is_busy() {
            app.session.run_pending().await;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }
    }
}
