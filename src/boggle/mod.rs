pub mod board;
pub mod error;
pub mod solver;
pub mod trie;
pub mod util;

/// Trie fan-out: one child slot per uppercase letter A-Z
pub const ALPHABET_SIZE: usize = 26;

/// Words shorter than this never score and are never stored
pub const MIN_WORD_LENGTH: usize = 3;

pub use self::board::Board;
pub use self::error::BoggleResult;
pub use self::solver::{BoardSolver, Solution};
