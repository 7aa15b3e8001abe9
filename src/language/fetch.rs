use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/monkeytypegame/monkeytype/master/frontend/static/languages";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote word lists, keyed by size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordList {
    #[default]
    English,
    #[serde(rename = "english_1k")]
    #[value(name = "english_1k")]
    English1k,
    #[serde(rename = "english_5k")]
    #[value(name = "english_5k")]
    English5k,
    #[serde(rename = "english_10k")]
    #[value(name = "english_10k")]
    English10k,
}

impl WordList {
    pub fn key(self) -> &'static str {
        match self {
            WordList::English => "english",
            WordList::English1k => "english_1k",
            WordList::English5k => "english_5k",
            WordList::English10k => "english_10k",
        }
    }

    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}.json", base_url.trim_end_matches('/'), self.key())
    }
}

/// Source of remote word lists. Implementations block; callers run them off
/// the input thread.
pub trait WordFetcher: Send + Sync + 'static {
    fn fetch(&self, list: WordList) -> Result<Vec<String>, FetchError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordListBody {
    Bare(Vec<String>),
    Wrapped { words: Vec<String> },
}

/// Decode a word list body: either a JSON array of strings or an object
/// carrying one under `words`.
pub fn decode_word_list(body: &str) -> Result<Vec<String>, FetchError> {
    match serde_json::from_str::<WordListBody>(body) {
        Ok(WordListBody::Bare(words)) | Ok(WordListBody::Wrapped { words }) => Ok(words),
        Err(err) => Err(FetchError::Parse(err.to_string())),
    }
}

/// Plain HTTP GET against `{base_url}/{key}.json`.
pub struct HttpWordFetcher {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpWordFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .proxy(None)
            .build();

        Self {
            agent: config.into(),
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpWordFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl WordFetcher for HttpWordFetcher {
    fn fetch(&self, list: WordList) -> Result<Vec<String>, FetchError> {
        let url = list.url(&self.base_url);
        tracing::debug!(%url, "fetching word list");

        let body = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(classify)?
            .into_body()
            .read_to_string()
            .map_err(classify)?;

        decode_word_list(&body)
    }
}

fn classify(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(code) => FetchError::Status(code),
        other => FetchError::Network(other.to_string()),
    }
}
