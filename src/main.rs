use std::{
    error::Error,
    io::{self, stdin, Stdout},
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use minitype::{
    app::{App, TICK_INTERVAL},
    config::FileStore,
    engine::{Clock, Engine, SystemClock},
    language::{ContentProvider, SupportedLanguage, WordListProvider},
    logging::{LogFormat, LoggingConfig},
    runtime::{AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    session::{Mode, SessionState},
    sound::TerminalBell,
};

/// Redraw at least this often so the live readouts keep moving.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// minimal typing test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing test: timed, word-count, quote, number, code, zen and custom modes with live feedback and a results chart."
)]
pub struct Cli {
    /// test mode (defaults to custom when --text is given, time otherwise)
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// seconds for time mode, word count for words and numbers mode
    #[clap(short = 'c', long)]
    config: Option<u32>,

    /// language to pull words from
    #[clap(short = 'l', long, value_enum, default_value_t = SupportedLanguage::English)]
    language: SupportedLanguage,

    /// text to type in custom mode
    #[clap(short = 't', long)]
    text: Option<String>,

    /// log level, overridden by MINITYPE_LOG
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// log line format
    #[clap(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    /// Session parameters the first test starts with.
    fn seed(&self) -> SessionState {
        let mode = self.mode.unwrap_or(if self.text.is_some() {
            Mode::Custom
        } else {
            Mode::Time
        });
        let config = self.config.unwrap_or(mode.defaults().config);
        SessionState {
            mode,
            config,
            time_remaining: config,
            language: self.language,
            custom_text: self.text.clone().unwrap_or_default(),
            ..SessionState::default()
        }
    }

    fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            ..LoggingConfig::default()
        }
    }
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> minitype::Result<Tui> {
    let terminal_error = |e: io::Error| minitype::Error::Terminal(e.to_string());
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)
}

fn restore_terminal(terminal: &mut Tui) -> minitype::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let logging = cli.logging();
    if let Err(e) = logging.init() {
        eprintln!("minitype: logging disabled ({e})");
    }
    info!(?cli, log = %logging.path.display(), "starting");

    let engine = Engine::with_state(cli.seed(), WordListProvider::new()?, SystemClock);

    let mut terminal = setup_terminal()?;
    // The reader thread must start after raw mode is on.
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(FRAME_INTERVAL),
    );
    let mut app = App::new(
        engine,
        Box::new(FileStore::new()),
        Box::new(TerminalBell::stdout()),
    )
    .with_ticks(runner.sender(), TICK_INTERVAL);

    let result = run(&mut terminal, &runner, &mut app);
    if let Err(e) = &result {
        error!(error = %e, "exiting on error");
    }

    // Stop the tick thread before handing the terminal back.
    drop(app);
    restore_terminal(&mut terminal)?;
    info!("bye");
    result
}

fn run<B, E, T, P, C>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    app: &mut App<P, C>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: AppEventSource,
    T: Ticker,
    P: ContentProvider,
    C: Clock,
{
    while !app.should_quit() {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        app.handle(runner.step());
    }
    Ok(())
}
