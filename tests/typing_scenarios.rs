// End-to-end behaviour of a typing session through the public API only.

use std::time::{Duration, SystemTime};

use fingerwise::{
    keyboard::{Finger, Hand},
    metrics::{calculate_accuracy, calculate_wpm},
    session::{KeyInput, TypingSession},
};

fn at(ms: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_000) + Duration::from_millis(ms)
}

fn type_str(mut session: TypingSession, s: &str, start_ms: u64, step_ms: u64) -> TypingSession {
    for (i, c) in s.chars().enumerate() {
        session = session.on_character(KeyInput::Char(c), at(start_ms + i as u64 * step_ms));
    }
    session
}

#[test]
fn perfect_run_over_two_words() {
    // "the cat" is 7 characters; 12 seconds from first to last keystroke
    let session = TypingSession::from_words(["the", "cat"]);
    let session = type_str(session, "the cat", 0, 2_000);

    assert!(session.is_complete());
    assert_eq!(session.cursor(), 7);
    let progress = session.progress();
    assert_eq!((progress.words_completed, progress.total_words), (2, 2));

    let stats = session.display_stats(at(60_000));
    assert_eq!(stats.elapsed_ms, 12_000);
    assert_eq!(stats.accuracy, 100);
    assert_eq!(stats.gross_wpm, calculate_wpm(7, 12_000.0).unwrap());
    assert_eq!(stats.gross_wpm, 7);
}

#[test]
fn mistakes_lower_net_speed_and_accuracy() {
    let session = TypingSession::from_words(["ab", "cd"]);
    let session = type_str(session, "ab xd", 0, 1_000);

    assert!(session.is_complete());
    assert_eq!(session.log().get(3), Some(false));
    assert_eq!(session.timing().error_count(), 1);

    let stats = session.display_stats(at(4_000));
    assert_eq!(stats.accuracy, calculate_accuracy(5, 1).unwrap());
    assert_eq!(stats.accuracy, 80);
    assert!(stats.net_wpm < stats.gross_wpm);
}

#[test]
fn wrong_space_still_advances() {
    let session = TypingSession::from_words(["ab", "cd"]);
    let session = type_str(session, "abx", 0, 100);

    assert_eq!(session.cursor(), 3);
    assert_eq!(session.log().get(2), Some(false));
    assert_eq!(session.progress().words_completed, 1);
    assert_eq!(session.expected_char(), Some('c'));
}

#[test]
fn backspace_across_a_word_boundary() {
    let session = TypingSession::from_words(["ab", "cd"]);
    let session = type_str(session, "ab c", 0, 100);
    assert_eq!(session.progress().words_completed, 2);

    let session = session
        .on_character(KeyInput::Backspace, at(500))
        .on_character(KeyInput::Backspace, at(600));
    assert_eq!(session.cursor(), 2);
    assert_eq!(session.log().len(), 2);
    assert_eq!(session.progress().words_completed, 1);
    // counters only ever grow
    assert_eq!(session.timing().character_count(), 4);
}

#[test]
fn input_after_completion_changes_nothing() {
    let done = type_str(TypingSession::from_words(["go"]), "go", 0, 100);
    assert!(done.is_complete());

    let after = done
        .clone()
        .on_character(KeyInput::Char('x'), at(5_000))
        .on_character(KeyInput::Backspace, at(6_000));
    assert_eq!(after, done);
}

#[test]
fn raw_input_is_classified() {
    assert_eq!(KeyInput::parse("a"), KeyInput::Char('a'));
    assert_eq!(KeyInput::parse(" "), KeyInput::Char(' '));
    assert_eq!(KeyInput::parse("Backspace"), KeyInput::Backspace);
    assert_eq!(KeyInput::parse("Shift"), KeyInput::Ignored);
    assert_eq!(KeyInput::parse(""), KeyInput::Ignored);

    let session = TypingSession::from_words(["hi"]).on_character(KeyInput::parse("Enter"), at(0));
    assert_eq!(session.cursor(), 0);
    assert!(session.timing().start_time().is_none());
}

#[test]
fn next_key_follows_the_cursor() {
    let session = TypingSession::from_words(["fj"]);
    let next = session.next_key().unwrap();
    assert_eq!(next.key, 'f');
    let placement = next.placement.unwrap();
    assert_eq!((placement.hand, placement.finger), (Some(Hand::Left), Finger::Index));

    let session = session.on_character(KeyInput::Char('f'), at(0));
    let placement = session.next_key().unwrap().placement.unwrap();
    assert_eq!(placement.hand, Some(Hand::Right));

    let session = session.on_character(KeyInput::Char('j'), at(100));
    assert_eq!(session.next_key(), None);
}
