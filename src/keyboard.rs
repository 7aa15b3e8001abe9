//! Static QWERTY touch-typing table: which hand and finger strike each key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

/// Where a key lives under the hands. `hand` is `None` for the space bar,
/// which either thumb may strike.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyPlacement {
    pub hand: Option<Hand>,
    pub finger: Finger,
}

/// Unshifted rows of the main block, top to bottom.
pub const KEY_ROWS: [&str; 4] = ["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];

/// The unshifted key that produces `c`, e.g. `'A'` -> `'a'`, `'?'` -> `'/'`.
pub fn base_key(c: char) -> char {
    match c {
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        other => other.to_ascii_lowercase(),
    }
}

pub fn placement_for_key(c: char) -> Option<KeyPlacement> {
    use Finger::*;
    use Hand::*;

    let (hand, finger) = match base_key(c) {
        ' ' => {
            return Some(KeyPlacement {
                hand: None,
                finger: Thumb,
            })
        }
        '`' | '1' | 'q' | 'a' | 'z' => (Left, Pinky),
        '2' | 'w' | 's' | 'x' => (Left, Ring),
        '3' | 'e' | 'd' | 'c' => (Left, Middle),
        '4' | '5' | 'r' | 't' | 'f' | 'g' | 'v' | 'b' => (Left, Index),
        '6' | '7' | 'y' | 'u' | 'h' | 'j' | 'n' | 'm' => (Right, Index),
        '8' | 'i' | 'k' | ',' => (Right, Middle),
        '9' | 'o' | 'l' | '.' => (Right, Ring),
        '0' | '-' | '=' | 'p' | '[' | ']' | '\\' | ';' | '\'' | '/' => (Right, Pinky),
        _ => return None,
    };

    Some(KeyPlacement {
        hand: Some(hand),
        finger,
    })
}

pub fn hand_for_key(c: char) -> Option<Hand> {
    placement_for_key(c).and_then(|p| p.hand)
}

pub fn finger_for_key(c: char) -> Option<Finger> {
    placement_for_key(c).map(|p| p.finger)
}
