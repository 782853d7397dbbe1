//! Cipher selection and dispatch
//!
//! Maps a named cipher and a polymorphic [`Key`] onto the transform functions
//! in [`crate::crypto::classical`]. Each cipher accepts exactly one key shape;
//! any other shape is rejected with [`CipherError::KeyShapeMismatch`].

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::crypto::classical::{alphabet, hill, playfair, running_key, transposition};
use crate::crypto::HillKey;
use crate::error::CipherError;

/// Classical ciphers offered by the lab, numbered as in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CipherKind {
    Caesar = 1,
    Additive = 2,
    Shift = 3,
    Multiplicative = 4,
    Affine = 5,
    Autokey = 6,
    Vigenere = 7,
    RailFence = 8,
    Columnar = 9,
    Hill = 10,
    Playfair = 11,
}

impl CipherKind {
    /// All ciphers in menu order
    pub const ALL: [CipherKind; 11] = [
        CipherKind::Caesar,
        CipherKind::Additive,
        CipherKind::Shift,
        CipherKind::Multiplicative,
        CipherKind::Affine,
        CipherKind::Autokey,
        CipherKind::Vigenere,
        CipherKind::RailFence,
        CipherKind::Columnar,
        CipherKind::Hill,
        CipherKind::Playfair,
    ];

    /// Convert a menu number to a cipher
    pub fn from_menu(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.menu_number() == value)
    }

    /// Get the menu number
    pub fn menu_number(self) -> u8 {
        self as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::Caesar => "Caesar",
            CipherKind::Additive => "Additive",
            CipherKind::Shift => "Shift",
            CipherKind::Multiplicative => "Multiplicative",
            CipherKind::Affine => "Affine",
            CipherKind::Autokey => "Autokey",
            CipherKind::Vigenere => "Vigenère",
            CipherKind::RailFence => "Rail Fence",
            CipherKind::Columnar => "Keyed Transposition",
            CipherKind::Hill => "Hill",
            CipherKind::Playfair => "Playfair",
        }
    }

    /// Key shape this cipher expects
    pub fn key_shape(self) -> KeyShape {
        match self {
            CipherKind::Caesar
            | CipherKind::Additive
            | CipherKind::Shift
            | CipherKind::Multiplicative => KeyShape::Integer,
            CipherKind::Affine => KeyShape::Pair,
            CipherKind::Autokey
            | CipherKind::Vigenere
            | CipherKind::Columnar
            | CipherKind::Playfair => KeyShape::Keyword,
            CipherKind::RailFence => KeyShape::Depth,
            CipherKind::Hill => KeyShape::Matrix,
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherKind {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Ok(number) = normalized.parse::<u8>() {
            return Self::from_menu(number)
                .ok_or_else(|| CipherError::DegenerateInput(format!("no cipher number {number}")));
        }

        let kind = match normalized.as_str() {
            "caesar" => CipherKind::Caesar,
            "additive" => CipherKind::Additive,
            "shift" => CipherKind::Shift,
            "multiplicative" => CipherKind::Multiplicative,
            "affine" => CipherKind::Affine,
            "autokey" => CipherKind::Autokey,
            "vigenere" => CipherKind::Vigenere,
            "railfence" => CipherKind::RailFence,
            "columnar" | "keyedtransposition" => CipherKind::Columnar,
            "hill" => CipherKind::Hill,
            "playfair" => CipherKind::Playfair,
            _ => {
                return Err(CipherError::DegenerateInput(format!(
                    "unknown cipher {s:?}"
                )))
            }
        };
        Ok(kind)
    }
}

/// The shapes a key can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    Integer,
    Pair,
    Keyword,
    Depth,
    Matrix,
}

impl KeyShape {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyShape::Integer => "single integer",
            KeyShape::Pair => "integer pair",
            KeyShape::Keyword => "keyword",
            KeyShape::Depth => "rail depth",
            KeyShape::Matrix => "2x2 matrix",
        }
    }
}

/// Key material for one cipher invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Integer(i64),
    Pair(i64, i64),
    Keyword(String),
    Depth(usize),
    Matrix(HillKey),
}

impl Key {
    pub fn shape(&self) -> KeyShape {
        match self {
            Key::Integer(_) => KeyShape::Integer,
            Key::Pair(..) => KeyShape::Pair,
            Key::Keyword(_) => KeyShape::Keyword,
            Key::Depth(_) => KeyShape::Depth,
            Key::Matrix(_) => KeyShape::Matrix,
        }
    }
}

/// Encrypt or decrypt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Encrypt,
    Decrypt,
}

/// Apply a cipher to `text`
pub fn apply(
    kind: CipherKind,
    key: &Key,
    text: &str,
    direction: Direction,
) -> Result<String, CipherError> {
    use Direction::{Decrypt, Encrypt};

    debug!(cipher = %kind, ?direction, len = text.len(), "Applying cipher");

    let result = match (kind.key_shape(), key, direction) {
        (KeyShape::Integer, Key::Integer(k), Encrypt) if kind != CipherKind::Multiplicative => {
            Ok(alphabet::shift(text, *k))
        }
        (KeyShape::Integer, Key::Integer(k), Decrypt) if kind != CipherKind::Multiplicative => {
            Ok(alphabet::unshift(text, *k))
        }
        (KeyShape::Integer, Key::Integer(k), Encrypt) => alphabet::multiplicative(text, *k),
        (KeyShape::Integer, Key::Integer(k), Decrypt) => alphabet::multiplicative_decrypt(text, *k),
        (KeyShape::Pair, Key::Pair(a, b), Encrypt) => alphabet::affine(text, *a, *b),
        (KeyShape::Pair, Key::Pair(a, b), Decrypt) => alphabet::affine_decrypt(text, *a, *b),
        (KeyShape::Depth, Key::Depth(depth), Encrypt) => transposition::rail_fence(text, *depth),
        (KeyShape::Depth, Key::Depth(depth), Decrypt) => {
            transposition::rail_fence_decrypt(text, *depth)
        }
        (KeyShape::Matrix, Key::Matrix(matrix), Encrypt) => hill::hill(text, matrix),
        (KeyShape::Matrix, Key::Matrix(matrix), Decrypt) => hill::hill_decrypt(text, matrix),
        (KeyShape::Keyword, Key::Keyword(word), _) => apply_keyword(kind, word, text, direction),
        (expected, _, _) => Err(CipherError::KeyShapeMismatch {
            cipher: kind.name(),
            expected: expected.as_str(),
        }),
    };

    if let Err(e) = &result {
        warn!(cipher = %kind, error = %e, "Cipher rejected input");
    }
    result
}

fn apply_keyword(
    kind: CipherKind,
    word: &str,
    text: &str,
    direction: Direction,
) -> Result<String, CipherError> {
    match (kind, direction) {
        (CipherKind::Autokey, Direction::Encrypt) => running_key::autokey(text, word),
        (CipherKind::Autokey, Direction::Decrypt) => running_key::autokey_decrypt(text, word),
        (CipherKind::Vigenere, Direction::Encrypt) => running_key::vigenere(text, word),
        (CipherKind::Vigenere, Direction::Decrypt) => running_key::vigenere_decrypt(text, word),
        (CipherKind::Columnar, Direction::Encrypt) => {
            transposition::columnar_transposition(text, word)
        }
        (CipherKind::Columnar, Direction::Decrypt) => transposition::columnar_decrypt(text, word),
        (CipherKind::Playfair, Direction::Encrypt) => playfair::playfair(text, word),
        (CipherKind::Playfair, Direction::Decrypt) => playfair::playfair_decrypt(text, word),
        _ => Err(CipherError::KeyShapeMismatch {
            cipher: kind.name(),
            expected: kind.key_shape().as_str(),
        }),
    }
}
