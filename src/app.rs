use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    error::FetchError,
    language::{PracticeMode, WordFetcher},
    runtime::Command,
    session::{DisplayStats, KeyInput, TypingSession},
    word_store::{WordSource, WordStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the terminal front end drives: the active mode, the word
/// cache and the session being typed.
///
/// Choosing a mode and restarting both throw the session away and draw a new
/// one from whatever words are available right now. Words that arrive later
/// are only picked up by the next session.
pub struct App<F: WordFetcher, C: Clock = SystemClock> {
    config: Config,
    mode: PracticeMode,
    store: WordStore<F>,
    clock: C,
    session: TypingSession,
    source: WordSource,
}

impl<F: WordFetcher, C: Clock> App<F, C> {
    pub fn new(config: Config, fetcher: F, clock: C) -> Self {
        let mut store = WordStore::new(fetcher, config.word_list);
        let mode = config.mode;
        if !config.offline {
            store.request();
        }

        let mut app = Self {
            config,
            mode,
            store,
            clock,
            session: TypingSession::default(),
            source: WordSource::Fallback,
        };
        app.restart();
        app
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Input(input) => self.on_character(input),
            Command::SwitchMode => self.switch_mode(self.mode.next()),
            Command::Restart => self.restart(),
            Command::RetryFetch => self.retry_fetch(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn on_character(&mut self, input: KeyInput) {
        let now = self.clock.now();
        let session = std::mem::take(&mut self.session);
        self.session = session.on_character(input, now);
    }

    /// Pick up finished downloads. Returns true if anything changed.
    pub fn on_tick(&mut self) -> bool {
        self.store.poll()
    }

    pub fn switch_mode(&mut self, mode: PracticeMode) {
        tracing::debug!(from = %self.mode, to = %mode, "switching mode");
        self.mode = mode;
        self.restart();
    }

    /// Start over with freshly drawn words.
    pub fn restart(&mut self) {
        let pool = self.store.pool(self.mode);
        self.session =
            TypingSession::initialize(&pool.words, self.config.number_of_words, &mut rand::thread_rng());
        self.source = pool.source;
    }

    pub fn retry_fetch(&mut self) {
        if !self.config.offline {
            self.store.retry();
        }
    }

    pub fn stats(&self) -> DisplayStats {
        self.session.display_stats(self.clock.now())
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where the current session's words came from.
    pub fn word_source(&self) -> WordSource {
        self.source
    }

    /// The download failed; bundled words are in use.
    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn is_fetching(&self) -> bool {
        self.store.is_pending()
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.store.last_error()
    }

    pub fn store_mut(&mut self) -> &mut WordStore<F> {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
