//! Cache of the downloaded word list, filtered once per practice mode.
//!
//! The download runs on its own thread and reports back over a channel, so the
//! typing loop only ever reads whatever is already here. One download serves
//! every mode. Every request gets a ticket; a reply whose ticket no longer
//! matches the current request was cancelled and is dropped.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::FetchError;
use crate::language::{prepare_words, Language, PracticeMode, WordFetcher, WordList};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WordSource {
    Remote,
    Fallback,
}

/// Words a new session can draw from.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPool {
    pub words: Vec<String>,
    pub source: WordSource,
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    InFlight { ticket: u64 },
    Ready(HashMap<PracticeMode, Vec<String>>),
    Failed(FetchError),
}

struct Reply {
    ticket: u64,
    result: Result<Vec<String>, FetchError>,
}

pub struct WordStore<F: WordFetcher> {
    fetcher: Arc<F>,
    list: WordList,
    entry: Option<Entry>,
    next_ticket: u64,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl<F: WordFetcher> WordStore<F> {
    pub fn new(fetcher: F, list: WordList) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher: Arc::new(fetcher),
            list,
            entry: None,
            next_ticket: 0,
            tx,
            rx,
        }
    }

    pub fn list(&self) -> WordList {
        self.list
    }

    /// Start downloading the list unless a download is running or already done.
    /// A failed download stays failed until [`WordStore::retry`].
    pub fn request(&mut self) {
        if self.entry.is_some() {
            return;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.entry = Some(Entry::InFlight { ticket });

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let list = self.list;
        tracing::debug!(ticket, list = list.key(), "word list requested");

        thread::spawn(move || {
            let result = fetcher.fetch(list);
            // the store may be gone already
            let _ = tx.send(Reply { ticket, result });
        });
    }

    /// Forget a running download; its result will be dropped.
    pub fn cancel(&mut self) {
        if let Some(Entry::InFlight { ticket }) = self.entry {
            tracing::debug!(ticket, "word list request cancelled");
            self.entry = None;
        }
    }

    /// Try a failed download again.
    pub fn retry(&mut self) {
        if let Some(Entry::Failed(_)) = self.entry {
            self.entry = None;
        }
        self.request();
    }

    /// Drop the cached list and orphan a running download.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Apply a finished download without blocking. Returns true if the cache
    /// changed.
    pub fn poll(&mut self) -> bool {
        let replies = self.rx.try_iter().collect::<Vec<Reply>>();
        replies
            .into_iter()
            .fold(false, |changed, reply| self.accept(reply) || changed)
    }

    /// Wait up to `timeout` for a download to finish, then drain the rest.
    pub fn poll_timeout(&mut self, timeout: Duration) -> bool {
        let changed = match self.rx.recv_timeout(timeout) {
            Ok(reply) => self.accept(reply),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        };
        self.poll() || changed
    }

    fn accept(&mut self, reply: Reply) -> bool {
        let Reply { ticket, result } = reply;

        match self.entry {
            Some(Entry::InFlight { ticket: current }) if current == ticket => {}
            _ => {
                tracing::debug!(ticket, "stale word list discarded");
                return false;
            }
        }

        let entry = match result {
            Ok(words) => {
                let prepared = PracticeMode::ALL
                    .into_iter()
                    .map(|mode| (mode, prepare_words(&words, mode)))
                    .collect::<HashMap<PracticeMode, Vec<String>>>();
                tracing::debug!(
                    fetched = words.len(),
                    all = prepared[&PracticeMode::All].len(),
                    left = prepared[&PracticeMode::LeftHand].len(),
                    right = prepared[&PracticeMode::RightHand].len(),
                    "word list ready"
                );
                Entry::Ready(prepared)
            }
            Err(err) => {
                tracing::warn!(%err, "word list unavailable, using bundled words");
                Entry::Failed(err)
            }
        };
        self.entry = Some(entry);
        true
    }

    /// Downloaded words for `mode`, or the bundled list when there are none.
    pub fn pool(&self, mode: PracticeMode) -> WordPool {
        match &self.entry {
            Some(Entry::Ready(prepared)) if prepared.get(&mode).is_some_and(|w| !w.is_empty()) => {
                WordPool {
                    words: prepared[&mode].clone(),
                    source: WordSource::Remote,
                }
            }
            _ => WordPool {
                words: Language::fallback(mode).words.clone(),
                source: WordSource::Fallback,
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.entry, Some(Entry::InFlight { .. }))
    }

    /// The last download failed.
    pub fn is_degraded(&self) -> bool {
        matches!(self.entry, Some(Entry::Failed(_)))
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        match &self.entry {
            Some(Entry::Failed(err)) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const WAIT: Duration = Duration::from_secs(5);

    struct StubFetcher {
        result: Result<Vec<String>, FetchError>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn ok(words: &[&str]) -> Self {
            Self {
                result: Ok(words.iter().map(|w| w.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: FetchError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl WordFetcher for StubFetcher {
        fn fetch(&self, _list: WordList) -> Result<Vec<String>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Blocks every fetch until the test lets it go.
    struct GatedFetcher {
        gate: Mutex<Receiver<()>>,
    }

    impl WordFetcher for GatedFetcher {
        fn fetch(&self, _list: WordList) -> Result<Vec<String>, FetchError> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(vec!["lion".to_string(), "stare".to_string()])
        }
    }

    #[test]
    fn test_pool_falls_back_before_fetch() {
        let store = WordStore::new(StubFetcher::ok(&["alpha"]), WordList::English);
        let pool = store.pool(PracticeMode::All);

        assert_eq!(pool.source, WordSource::Fallback);
        assert_eq!(pool.words, Language::fallback(PracticeMode::All).words);
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_fetched_words_replace_fallback() {
        let mut store = WordStore::new(StubFetcher::ok(&["Alpha", "beta", "x-ray"]), WordList::English);
        store.request();
        assert!(store.is_pending());

        assert!(store.poll_timeout(WAIT));

        let pool = store.pool(PracticeMode::All);
        assert_eq!(pool.source, WordSource::Remote);
        assert_eq!(pool.words, vec!["alpha", "beta"]);
        assert!(!store.is_pending());
    }

    #[test]
    fn test_one_download_serves_every_mode() {
        let mut store = WordStore::new(StubFetcher::ok(&["stare", "lion", "pint"]), WordList::English);
        store.request();
        store.poll_timeout(WAIT);

        assert_eq!(store.pool(PracticeMode::All).words, vec!["stare", "lion", "pint"]);
        assert_eq!(store.pool(PracticeMode::LeftHand).words, vec!["stare"]);
        assert_eq!(store.pool(PracticeMode::RightHand).words, vec!["lion"]);

        // asking again for any mode never hits the network twice
        store.request();
        store.request();
        assert!(!store.poll());
        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_filtered_list_uses_fallback() {
        let mut store = WordStore::new(StubFetcher::ok(&["pint"]), WordList::English);
        store.request();
        store.poll_timeout(WAIT);

        let pool = store.pool(PracticeMode::RightHand);
        assert_eq!(pool.source, WordSource::Fallback);
        assert_eq!(pool.words, Language::fallback(PracticeMode::RightHand).words);
        assert!(!store.is_degraded());
        assert_eq!(store.pool(PracticeMode::All).source, WordSource::Remote);
    }

    #[test]
    fn test_failure_marks_degraded() {
        let mut store = WordStore::new(StubFetcher::failing(FetchError::Status(503)), WordList::English);
        store.request();
        store.poll_timeout(WAIT);

        assert!(store.is_degraded());
        assert_eq!(store.last_error(), Some(&FetchError::Status(503)));
        for mode in PracticeMode::ALL {
            assert_eq!(store.pool(mode).source, WordSource::Fallback);
        }

        // a plain request does not hammer a failing endpoint
        store.request();
        assert!(store.is_degraded());
        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut store = WordStore::new(
            StubFetcher::failing(FetchError::Network("down".into())),
            WordList::English,
        );
        store.request();
        store.poll_timeout(WAIT);
        assert!(store.is_degraded());

        store.retry();
        assert!(store.is_pending());
        assert!(!store.is_degraded());

        store.poll_timeout(WAIT);
        assert!(store.is_degraded());
        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retry_keeps_a_good_list() {
        let mut store = WordStore::new(StubFetcher::ok(&["alpha"]), WordList::English);
        store.request();
        store.poll_timeout(WAIT);

        store.retry();
        assert!(!store.is_pending());
        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancelled_fetch_is_discarded() {
        let (release, gate) = mpsc::channel();
        let mut store = WordStore::new(
            GatedFetcher {
                gate: Mutex::new(gate),
            },
            WordList::English,
        );

        store.request();
        store.cancel();
        assert!(!store.is_pending());

        // a fresh request gets a new ticket; only its reply is applied
        store.request();
        release.send(()).unwrap();
        release.send(()).unwrap();

        let mut changed = 0;
        for _ in 0..2 {
            if store.poll_timeout(WAIT) {
                changed += 1;
            }
            if !store.is_pending() {
                break;
            }
        }

        assert_eq!(changed, 1);
        assert_eq!(store.pool(PracticeMode::RightHand).words, vec!["lion"]);
        assert_eq!(store.pool(PracticeMode::LeftHand).words, vec!["stare"]);
    }

    #[test]
    fn test_invalidate_orphans_in_flight() {
        let (release, gate) = mpsc::channel();
        let mut store = WordStore::new(
            GatedFetcher {
                gate: Mutex::new(gate),
            },
            WordList::English,
        );

        store.request();
        store.invalidate();
        assert!(!store.is_pending());

        release.send(()).unwrap();
        assert!(!store.poll_timeout(WAIT));
        assert_eq!(store.pool(PracticeMode::All).source, WordSource::Fallback);
    }
}
