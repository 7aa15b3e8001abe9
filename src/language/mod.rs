pub mod classify;
pub mod core;
pub mod fetch;
pub mod selector;

// Re-export the main types for convenience
pub use classify::{filter_by_hand, is_single_hand_word};
pub use core::Language;
pub use fetch::{decode_word_list, HttpWordFetcher, WordFetcher, WordList, DEFAULT_BASE_URL};
pub use selector::{get_random_words, prepare_words, PracticeMode};
