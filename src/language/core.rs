use std::sync::OnceLock;

use include_dir::{include_dir, Dir};
use serde::Deserialize;

use super::selector::PracticeMode;

static LANG_DIR: Dir = include_dir!("src/lang");

static FALLBACK: OnceLock<[Language; 3]> = OnceLock::new();

/// A word table bundled with the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load a bundled table by file stem, e.g. `"english"`.
    pub fn bundled(name: &str) -> Option<Self> {
        let file = LANG_DIR.get_file(format!("{name}.json"))?;
        let contents = file.contents_utf8()?;

        match serde_json::from_str(contents) {
            Ok(lang) => Some(lang),
            Err(err) => {
                tracing::error!(%err, name, "bundled word table is malformed");
                None
            }
        }
    }

    /// The offline list used for `mode` when no fetched words are available.
    /// The tables are parsed on first use and kept for the life of the process.
    ///
    /// # Panics
    ///
    /// If the bundled tables were left out of the build.
    pub fn fallback(mode: PracticeMode) -> &'static Self {
        let [all, left, right] = FALLBACK.get_or_init(|| {
            ["english", "left_hand", "right_hand"]
                .map(|name| Self::bundled(name).expect("bundled word table missing"))
        });
        match mode {
            PracticeMode::All => all,
            PracticeMode::LeftHand => left,
            PracticeMode::RightHand => right,
        }
    }
}
