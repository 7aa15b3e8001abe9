use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use fingerwise::{
    app::{App, Flow},
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    language::{HttpWordFetcher, PracticeMode, WordFetcher, WordList},
    runtime::{AppEvent, Command, CrosstermEventSource, Runner},
    trace_init::init_tracing,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// typing drills with a finger-by-finger keyboard guide
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing drills with live wpm and accuracy, a keyboard diagram showing which finger strikes the next key, and left-hand or right-hand only word sets."
)]
pub struct Cli {
    /// number of words to use in test
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// which keys the words may use
    #[clap(short = 'm', long, value_enum)]
    mode: Option<PracticeMode>,

    /// remote word list to download
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<WordList>,

    /// base url the word lists are downloaded from
    #[clap(long)]
    base_url: Option<String>,

    /// never download, use the bundled word lists only
    #[clap(long)]
    offline: bool,

    /// read settings from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over whatever the config file says.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(n) = self.number_of_words {
            config.number_of_words = n;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(list) = self.word_list {
            config.word_list = list;
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if self.offline {
            config.offline = true;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // flushes buffered log lines when main returns
    let _trace = init_tracing(&AppDirs::log_dir());

    let store = cli.config_store();
    let config = match store.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "ignoring config file");
            Config::default()
        }
    };
    let config = cli.apply(config);
    tracing::info!(?config, "starting");

    let fetcher = HttpWordFetcher::new(config.base_url.clone());
    let mut app = App::new(config, fetcher, SystemClock);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, F: WordFetcher>(
    terminal: &mut Terminal<B>,
    app: &mut App<F>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                app.on_tick();
                // live stats move with the clock, not just with keystrokes
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            AppEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            AppEvent::Key(key) => {
                if let Some(command) = Command::from_key(key) {
                    if app.handle(command) == Flow::Quit {
                        break;
                    }
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
