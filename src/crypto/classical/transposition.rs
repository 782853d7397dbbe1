//! Transposition ciphers
//!
//! Rail Fence and keyed columnar transposition. Neither substitutes letters;
//! they only reorder the space-stripped text, preserving case.

use tracing::trace;

use crate::error::CipherError;

use super::{strip_spaces, PAD};

/// Row visited by each position of the zig-zag walk over `depth` rails
fn zigzag_rows(len: usize, depth: usize) -> Vec<usize> {
    let mut rows = Vec::with_capacity(len);
    let mut row = 0usize;
    let mut down = false;
    for _ in 0..len {
        if row == 0 || row == depth - 1 {
            down = !down;
        }
        rows.push(row);
        if down {
            row += 1;
        } else {
            row -= 1;
        }
    }
    rows
}

/// Position order in which the rails are read: by row, then left to right
fn rail_order(len: usize, depth: usize) -> Vec<usize> {
    let rows = zigzag_rows(len, depth);
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by_key(|&i| rows[i]);
    order
}

fn check_depth(len: usize, depth: usize) -> Result<(), CipherError> {
    if depth < 2 {
        return Err(CipherError::DegenerateInput(format!(
            "rail fence depth must be at least 2, got {depth}"
        )));
    }
    if len > 0 && depth > len {
        return Err(CipherError::DegenerateInput(format!(
            "rail fence depth {depth} exceeds text length {len}"
        )));
    }
    Ok(())
}

/// Rail Fence cipher: write the text in a zig-zag over `depth` rails and read
/// the rails top to bottom
pub fn rail_fence(text: &str, depth: usize) -> Result<String, CipherError> {
    let chars: Vec<char> = strip_spaces(text).chars().collect();
    check_depth(chars.len(), depth)?;

    Ok(rail_order(chars.len(), depth)
        .into_iter()
        .map(|i| chars[i])
        .collect())
}

/// Undo [`rail_fence`]
pub fn rail_fence_decrypt(text: &str, depth: usize) -> Result<String, CipherError> {
    let chars: Vec<char> = strip_spaces(text).chars().collect();
    check_depth(chars.len(), depth)?;

    let mut plain = vec![' '; chars.len()];
    for (&position, &c) in rail_order(chars.len(), depth).iter().zip(chars.iter()) {
        plain[position] = c;
    }
    Ok(plain.into_iter().collect())
}

/// Column read order: indices sorted by `(key character, original index)`
fn column_order(key: &[char]) -> Vec<usize> {
    let mut pairs: Vec<(char, usize)> = key.iter().copied().zip(0..).collect();
    pairs.sort();
    pairs.into_iter().map(|(_, index)| index).collect()
}

fn key_chars(key: &str) -> Result<Vec<char>, CipherError> {
    let key: Vec<char> = key.chars().collect();
    if key.is_empty() {
        return Err(CipherError::DegenerateInput(
            "columnar transposition needs a non-empty keyword".to_string(),
        ));
    }
    Ok(key)
}

/// Keyed columnar transposition.
///
/// The text is padded with `X` to fill the last row, written row-major into
/// `len(key)` columns, and the columns are read in the order of the sorted
/// key letters (ties keep their original order).
pub fn columnar_transposition(text: &str, key: &str) -> Result<String, CipherError> {
    let key = key_chars(key)?;
    let cols = key.len();

    let mut chars: Vec<char> = strip_spaces(text).chars().collect();
    let rows = chars.len().div_ceil(cols);
    chars.resize(rows * cols, PAD as char);

    let order = column_order(&key);
    trace!(?order, rows, cols, "Columnar read order");

    let mut out = String::with_capacity(chars.len());
    for col in order {
        for row in 0..rows {
            out.push(chars[row * cols + col]);
        }
    }
    Ok(out)
}

/// Undo [`columnar_transposition`]. The padding `X`s stay in the output.
pub fn columnar_decrypt(text: &str, key: &str) -> Result<String, CipherError> {
    let key = key_chars(key)?;
    let cols = key.len();

    let chars: Vec<char> = strip_spaces(text).chars().collect();
    if chars.len() % cols != 0 {
        return Err(CipherError::DegenerateInput(format!(
            "ciphertext length {} is not a multiple of the key length {cols}",
            chars.len()
        )));
    }
    let rows = chars.len() / cols;

    let mut grid = vec![' '; chars.len()];
    let mut column_data = chars.chunks(rows.max(1));
    for col in column_order(&key) {
        let Some(column) = column_data.next() else {
            break;
        };
        for (row, &c) in column.iter().enumerate() {
            grid[row * cols + col] = c;
        }
    }
    Ok(grid.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rail_fence_known_vector() {
        assert_eq!(
            rail_fence("WE ARE DISCOVERED FLEE AT ONCE", 3).unwrap(),
            "WECRLTEERDSOEEFEAOCAIVDEN"
        );
    }

    #[test]
    fn test_rail_fence_preserves_case() {
        assert_eq!(rail_fence("Hello", 2).unwrap(), "Hloel");
    }

    #[test]
    fn test_rail_fence_round_trip() {
        let text = "WEAREDISCOVEREDFLEEATONCE";
        for depth in 2..=text.len() {
            let encrypted = rail_fence(text, depth).unwrap();
            assert_eq!(rail_fence_decrypt(&encrypted, depth).unwrap(), text);
        }
    }

    #[test]
    fn test_rail_fence_depth_guards() {
        assert!(matches!(
            rail_fence("HELLO", 1),
            Err(CipherError::DegenerateInput(_))
        ));
        assert!(matches!(
            rail_fence("HELLO", 0),
            Err(CipherError::DegenerateInput(_))
        ));
        assert!(matches!(
            rail_fence("HELLO", 6),
            Err(CipherError::DegenerateInput(_))
        ));
        // depth equal to the length reads the text straight back
        assert_eq!(rail_fence("HELLO", 5).unwrap(), "HELLO");
        assert_eq!(rail_fence("", 3).unwrap(), "");
    }

    #[test]
    fn test_column_order_ties() {
        let key: Vec<char> = "HACK".chars().collect();
        assert_eq!(column_order(&key), vec![1, 2, 0, 3]);

        let key: Vec<char> = "BAB".chars().collect();
        assert_eq!(column_order(&key), vec![1, 0, 2]);
    }

    #[test]
    fn test_columnar_known_vector() {
        // ATTA
        // CKAT
        // DAWN
        assert_eq!(
            columnar_transposition("ATTACKATDAWN", "HACK").unwrap(),
            "TKATAWACDATN"
        );
    }

    #[test]
    fn test_columnar_padding() {
        // HEL / LOX -> columns 0,1,2 in key order "ABC"
        assert_eq!(columnar_transposition("HEL LO", "ABC").unwrap(), "HLEOLX");
    }

    #[test]
    fn test_columnar_round_trip() {
        let encrypted = columnar_transposition("WE ARE DISCOVERED", "ZEBRAS").unwrap();
        assert_eq!(encrypted.len(), 18);
        assert_eq!(
            columnar_decrypt(&encrypted, "ZEBRAS").unwrap(),
            "WEAREDISCOVEREDXXX"
        );
    }

    #[test]
    fn test_columnar_guards() {
        assert!(matches!(
            columnar_transposition("HELLO", ""),
            Err(CipherError::DegenerateInput(_))
        ));
        assert!(matches!(
            columnar_decrypt("HELLO", "ABC"),
            Err(CipherError::DegenerateInput(_))
        ));
        assert_eq!(columnar_transposition("", "KEY").unwrap(), "");
    }
}
