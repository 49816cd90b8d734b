use super::ALPHABET_SIZE;

/// Letter printed on the compound tile. A `Q` cell always stands for "QU".
pub const QU_TILE: char = 'Q';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns all the king-move neighbours of this position that lie inside a
    /// `rows` x `cols` grid. The position itself is never included.
    pub fn neighbours(&self, rows: usize, cols: usize) -> Neighbours {
        Neighbours {
            center: *self,
            rows,
            cols,
            offset: 0,
        }
    }
}

/// Iterator over the up to 8 grid cells touching a position
pub struct Neighbours {
    center: Position,
    rows: usize,
    cols: usize,
    offset: usize,
}

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Iterator for Neighbours {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < OFFSETS.len() {
            let (dr, dc) = OFFSETS[self.offset];
            self.offset += 1;

            let row = self.center.row.checked_add_signed(dr);
            let col = self.center.col.checked_add_signed(dc);
            match (row, col) {
                (Some(row), Some(col)) if row < self.rows && col < self.cols => {
                    return Some(Position { row, col })
                }
                _ => continue,
            }
        }
        None
    }
}

/// Maps an uppercase letter to its child slot. Anything outside A-Z has no slot.
pub fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some(letter as usize - 'A' as usize)
    } else {
        None
    }
}

pub fn index_letter(index: usize) -> char {
    debug_assert!(index < ALPHABET_SIZE);
    (b'A' + index as u8) as char
}

/// Appends the text a board letter contributes to a word
pub fn push_tile(word: &mut String, letter: char) {
    word.push(letter);
    if letter == QU_TILE {
        word.push('U');
    }
}
