//! Playfair digraph cipher
//!
//! A 5x5 key square holds the alphabet with I and J merged. The keyword's
//! distinct letters come first, then the rest of the alphabet in order. Text
//! is split into digraphs and each pair is substituted by the row, column or
//! rectangle rule.

use std::fmt;

use tracing::trace;

use crate::error::CipherError;

use super::{letter_value, PAD};

const SIZE: usize = 5;

/// Alphabet without J
const SQUARE_ALPHABET: &[u8; 25] = b"ABCDEFGHIKLMNOPQRSTUVWXYZ";

/// 5x5 Playfair key square
#[derive(Clone, PartialEq, Eq)]
pub struct KeySquare {
    grid: [[u8; SIZE]; SIZE],
    /// (row, col) for every letter; J shares I's slot
    positions: [(u8, u8); 26],
}

impl KeySquare {
    /// Build the square from a keyword. Non-letters in the keyword are ignored.
    pub fn new(keyword: &str) -> Self {
        let mut order: Vec<u8> = Vec::with_capacity(25);
        let mut seen = [false; 26];

        let keyword_letters = keyword
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| merge_j(b.to_ascii_uppercase()));

        for b in keyword_letters.chain(SQUARE_ALPHABET.iter().copied()) {
            let index = (b - b'A') as usize;
            if !seen[index] {
                seen[index] = true;
                order.push(b);
            }
        }

        let mut grid = [[0u8; SIZE]; SIZE];
        let mut positions = [(0u8, 0u8); 26];
        for (i, &b) in order.iter().enumerate() {
            let (row, col) = (i / SIZE, i % SIZE);
            grid[row][col] = b;
            positions[(b - b'A') as usize] = (row as u8, col as u8);
        }
        positions[(b'J' - b'A') as usize] = positions[(b'I' - b'A') as usize];

        Self { grid, positions }
    }

    /// Row and column of a letter (J resolves to I)
    pub fn position(&self, c: char) -> Option<(usize, usize)> {
        letter_value(c).ok().map(|v| {
            let (row, col) = self.positions[v as usize];
            (row as usize, col as usize)
        })
    }

    /// Letter at the given row and column
    pub fn letter_at(&self, row: usize, col: usize) -> char {
        self.grid[row % SIZE][col % SIZE] as char
    }

    /// The square as five strings, top to bottom
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|&b| b as char).collect())
            .collect()
    }

    fn locate(&self, b: u8) -> (usize, usize) {
        let (row, col) = self.positions[(b - b'A') as usize];
        (row as usize, col as usize)
    }

    /// Substitute one digraph; `step` is 1 to encrypt and `SIZE - 1` to decrypt
    fn substitute(&self, a: u8, b: u8, step: usize) -> [u8; 2] {
        let (r1, c1) = self.locate(a);
        let (r2, c2) = self.locate(b);
        if r1 == r2 {
            [
                self.grid[r1][(c1 + step) % SIZE],
                self.grid[r2][(c2 + step) % SIZE],
            ]
        } else if c1 == c2 {
            [
                self.grid[(r1 + step) % SIZE][c1],
                self.grid[(r2 + step) % SIZE][c2],
            ]
        } else {
            [self.grid[r1][c2], self.grid[r2][c1]]
        }
    }
}

impl fmt::Debug for KeySquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

fn merge_j(b: u8) -> u8 {
    if b == b'J' {
        b'I'
    } else {
        b
    }
}

/// Uppercase, strip spaces and merge J into I
fn prepare_letters(text: &str) -> Result<Vec<u8>, CipherError> {
    text.chars()
        .filter(|&c| c != ' ')
        .map(|c| letter_value(c).map(|v| merge_j(b'A' + v)))
        .collect()
}

/// Split text into Playfair digraphs.
///
/// A pair of equal letters becomes `(letter, X)` and the repeated letter
/// starts the next pair; a trailing single letter is paired with `X`.
pub fn digraphs(text: &str) -> Result<Vec<[u8; 2]>, CipherError> {
    let letters = prepare_letters(text)?;
    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);

    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        let b = letters.get(i + 1).copied().unwrap_or(PAD);
        if a == b {
            pairs.push([a, PAD]);
            i += 1;
        } else {
            pairs.push([a, b]);
            i += 2;
        }
    }
    Ok(pairs)
}

/// Encrypt with the Playfair cipher
pub fn playfair(text: &str, keyword: &str) -> Result<String, CipherError> {
    let square = KeySquare::new(keyword);
    let pairs = digraphs(text)?;
    trace!(square = ?square, pairs = pairs.len(), "Playfair encrypt");

    let mut out = String::with_capacity(pairs.len() * 2);
    for [a, b] in pairs {
        for c in square.substitute(a, b, 1) {
            out.push(c as char);
        }
    }
    Ok(out)
}

/// Undo [`playfair`]. The result keeps the filler `X`s inserted while the
/// digraphs were prepared.
pub fn playfair_decrypt(text: &str, keyword: &str) -> Result<String, CipherError> {
    let square = KeySquare::new(keyword);
    let letters = prepare_letters(text)?;
    if letters.len() % 2 != 0 {
        return Err(CipherError::DegenerateInput(format!(
            "Playfair ciphertext must have an even number of letters, got {}",
            letters.len()
        )));
    }

    let mut out = String::with_capacity(letters.len());
    for pair in letters.chunks_exact(2) {
        for c in square.substitute(pair[0], pair[1], SIZE - 1) {
            out.push(c as char);
        }
    }
    Ok(out)
}
