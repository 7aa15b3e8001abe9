use crate::keyboard::{hand_for_key, Hand};

/// The hand that can type every letter of `word` alone, if there is one.
///
/// Empty words and words with a key outside the table belong to no hand.
pub fn is_single_hand_word(word: &str) -> Option<Hand> {
    let mut hands = word.chars().map(hand_for_key);
    let first = hands.next()??;

    hands.all(|h| h == Some(first)).then_some(first)
}

pub fn filter_by_hand<S: AsRef<str>>(words: &[S], hand: Hand) -> Vec<String> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| is_single_hand_word(w) == Some(hand))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_hand_words() {
        for word in ["stare", "Stare", "west", "cafe", "zebra"] {
            assert_eq!(is_single_hand_word(word), Some(Hand::Left), "{word}");
        }
    }

    // "pink" is all right-hand keys on QWERTY; "pint" is the mixed example below
    #[test]
    fn test_right_hand_words() {
        for word in ["lion", "pink", "jumpy", "monopoly"] {
            assert_eq!(is_single_hand_word(word), Some(Hand::Right), "{word}");
        }
    }

    #[test]
    fn test_mixed_words() {
        for word in ["pint", "hello", "typing", "mixed"] {
            assert_eq!(is_single_hand_word(word), None, "{word}");
        }
    }

    #[test]
    fn test_degenerate_words() {
        assert_eq!(is_single_hand_word(""), None);
        assert_eq!(is_single_hand_word("café"), None);
        assert_eq!(is_single_hand_word("we are"), None);
    }

    #[test]
    fn test_filter_by_hand() {
        let words = ["stare", "pint", "lion", "tax", "hello"];

        assert_eq!(filter_by_hand(&words, Hand::Left), vec!["stare", "tax"]);
        assert_eq!(filter_by_hand(&words, Hand::Right), vec!["lion"]);
        assert!(filter_by_hand::<&str>(&[], Hand::Left).is_empty());
    }
}
