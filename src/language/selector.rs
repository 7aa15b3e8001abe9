use clap::ValueEnum;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::classify::filter_by_hand;
use crate::keyboard::Hand;

/// Which words a session draws from.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
    #[default]
    #[strum(serialize = "all keys")]
    All,
    #[strum(serialize = "left hand")]
    LeftHand,
    #[strum(serialize = "right hand")]
    RightHand,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 3] = [
        PracticeMode::All,
        PracticeMode::LeftHand,
        PracticeMode::RightHand,
    ];

    /// The hand a single-hand drill is restricted to.
    pub fn hand(self) -> Option<Hand> {
        match self {
            PracticeMode::All => None,
            PracticeMode::LeftHand => Some(Hand::Left),
            PracticeMode::RightHand => Some(Hand::Right),
        }
    }

    pub fn next(self) -> Self {
        match self {
            PracticeMode::All => PracticeMode::LeftHand,
            PracticeMode::LeftHand => PracticeMode::RightHand,
            PracticeMode::RightHand => PracticeMode::All,
        }
    }
}

/// Up to `count` distinct entries of `words` in random order.
pub fn get_random_words<R: Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    words.choose_multiple(rng, count).cloned().collect()
}

/// Clean up a downloaded list for `mode`: lower-case, plain ASCII letters
/// only, no repeats, and restricted to one hand where the mode asks for it.
pub fn prepare_words<S: AsRef<str>>(words: &[S], mode: PracticeMode) -> Vec<String> {
    let plain = words
        .iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        .unique()
        .collect::<Vec<String>>();

    match mode.hand() {
        None => plain,
        Some(hand) => filter_by_hand(&plain, hand),
    }
}
