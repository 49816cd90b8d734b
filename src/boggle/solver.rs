use std::collections::HashSet;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use super::board::LetterGrid;
use super::trie::{PrefixDictionary, TrieNode};
use super::util::{push_tile, Position, QU_TILE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredWord {
    pub word: String,
    pub score: u8,
}

/// Everything found on one board, sorted alphabetically
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub board: Vec<Vec<String>>,
    pub words: Vec<ScoredWord>,
    pub total: u32,
}

/// Finds every dictionary word that can be traced on a board. The dictionary is
/// built once and reused for any number of boards.
#[derive(Debug)]
pub struct BoardSolver {
    dictionary: PrefixDictionary,
}

impl BoardSolver {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_dictionary(PrefixDictionary::new(words))
    }

    pub fn with_dictionary(dictionary: PrefixDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &PrefixDictionary {
        &self.dictionary
    }

    /// Returns the set of all words that trace a path of touching cells, each
    /// cell used at most once per word
    pub fn all_valid_words<G: LetterGrid + ?Sized>(&self, board: &G) -> HashSet<String> {
        let mut found = HashSet::new();
        let root = match self.dictionary.root() {
            Some(root) => root,
            None => return found,
        };

        let mut search = Search {
            dict: &self.dictionary,
            board,
            visited: Array2::from_elem((board.rows(), board.cols()), false),
            word: String::new(),
            found: &mut found,
        };
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let letter = board.letter(row, col);
                if let Some(node) = advance(&self.dictionary, root, letter) {
                    push_tile(&mut search.word, letter);
                    search.explore(Position::new(row, col), node);
                    search.word.clear();
                }
            }
        }

        debug!(
            rows = board.rows(),
            cols = board.cols(),
            words = found.len(),
            "solved board"
        );
        found
    }

    /// Score of the word if it is in the dictionary, 0 otherwise
    pub fn score_of(&self, word: &str) -> u8 {
        self.dictionary.score_of(word)
    }

    pub fn total_score<I, S>(&self, words: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|w| self.score_of(w.as_ref()) as u32)
            .sum()
    }

    /// Solves the board and scores every word found
    pub fn solve<G: LetterGrid + ?Sized>(&self, board: &G) -> Solution {
        let mut words = self
            .all_valid_words(board)
            .into_iter()
            .map(|word| ScoredWord {
                score: self.score_of(&word),
                word,
            })
            .collect::<Vec<_>>();
        words.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        let total = self.total_score(words.iter().map(|w| &w.word));

        Solution {
            board: board.to_rows(),
            words,
            total,
        }
    }
}

/// Steps the trie through one board cell. The Q tile walks both Q and U.
fn advance<'a>(
    dict: &PrefixDictionary,
    node: &'a TrieNode,
    letter: char,
) -> Option<&'a TrieNode> {
    let next = dict.child_after(node, letter)?;
    if letter == QU_TILE {
        dict.child_after(next, 'U')
    } else {
        Some(next)
    }
}

/// State for one top-level solve. `visited` only marks the current path.
struct Search<'a, G: ?Sized> {
    dict: &'a PrefixDictionary,
    board: &'a G,
    visited: Array2<bool>,
    word: String,
    found: &'a mut HashSet<String>,
}

impl<'a, G: LetterGrid + ?Sized> Search<'a, G> {
    /// `word` already spells the path ending at `pos`, and `node` is where it leads in the trie
    fn explore(&mut self, pos: Position, node: &TrieNode) {
        if self.visited[[pos.row, pos.col]] {
            return;
        }
        if node.is_terminal() && !self.found.contains(&self.word) {
            self.found.insert(self.word.clone());
        }

        self.visited[[pos.row, pos.col]] = true;
        for next in pos.neighbours(self.board.rows(), self.board.cols()) {
            let letter = self.board.letter(next.row, next.col);
            if let Some(child) = advance(self.dict, node, letter) {
                let len = self.word.len();
                push_tile(&mut self.word, letter);
                self.explore(next, child);
                self.word.truncate(len);
            }
        }
        self.visited[[pos.row, pos.col]] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boggle::board::Board;

    fn shells_solver() -> BoardSolver {
        BoardSolver::new([
            "SET", "SHE", "SHELLS", "SHORE", "SHORES", "SELLS", "SEA", "SEASHORE", "SEASETS",
        ])
    }

    fn parse_board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn sorted(words: HashSet<String>) -> Vec<String> {
        let mut words = words.into_iter().collect::<Vec<_>>();
        words.sort();
        words
    }

    #[test]
    fn test_shells_board() {
        let solver = shells_solver();
        let board = parse_board(
            "4 4
             S H E L
             X X X L
             X X X S
             X X X X",
        );
        let words = solver.all_valid_words(&board);
        assert_eq!(sorted(words), vec!["SHE", "SHELLS"]);
        assert_eq!(solver.score_of("SHELLS"), 3);
    }

    #[test]
    fn test_words_found_by_many_paths_collapse() {
        let solver = BoardSolver::new(["SEA"]);
        let board = parse_board(
            "2 3
             S E A
             S E A",
        );
        assert_eq!(sorted(solver.all_valid_words(&board)), vec!["SEA"]);
    }

    #[test]
    fn test_cells_not_reused() {
        let solver = BoardSolver::new(["SAS", "ASA"]);
        let board = parse_board("2 2\nS A\nX X");
        assert!(solver.all_valid_words(&board).is_empty());

        let board = parse_board("1 3\nS A S");
        assert_eq!(sorted(solver.all_valid_words(&board)), vec!["SAS"]);
    }

    #[test]
    fn test_diagonal_adjacency() {
        let solver = BoardSolver::new(["CAT", "ACT"]);
        let board = parse_board(
            "3 3
             C X X
             X A X
             X X T",
        );
        assert_eq!(sorted(solver.all_valid_words(&board)), vec!["CAT"]);
    }

    #[test]
    fn test_q_tile_is_qu() {
        let solver = BoardSolver::new(["QUIT", "QIT", "QUA", "SQUID"]);
        let board = parse_board(
            "2 3
             Q I T
             S X X",
        );
        let words = solver.all_valid_words(&board);
        assert_eq!(sorted(words), vec!["QUIT"]);
        assert_eq!(solver.score_of("QUIT"), 1);
    }

    #[test]
    fn test_q_tile_without_u_in_dictionary() {
        let solver = BoardSolver::new(["QAT", "QIS"]);
        let board = parse_board("2 2\nQ A\nT I");
        assert!(solver.all_valid_words(&board).is_empty());
    }

    #[test]
    fn test_q_tile_counts_two_letters() {
        // SQUID is five letters but only uses four cells
        let solver = BoardSolver::new(["SQUID"]);
        let board = parse_board("2 2\nS Qu\nD I");
        let words = solver.all_valid_words(&board);
        assert_eq!(sorted(words), vec!["SQUID"]);
        assert_eq!(solver.score_of("SQUID"), 2);
        assert_eq!(solver.solve(&board).board, vec![vec!["S", "Qu"], vec!["D", "I"]]);
    }

    #[test]
    fn test_empty_dictionary() {
        let solver = BoardSolver::new(Vec::<String>::new());
        let board = parse_board("2 2\nA B\nC D");
        assert!(solver.all_valid_words(&board).is_empty());
        assert_eq!(solver.solve(&board).total, 0);
    }

    #[test]
    fn test_two_letter_dictionary() {
        let solver = BoardSolver::new(["AB", "BA", "CD", "AD"]);
        let board = parse_board("2 2\nA B\nC D");
        assert!(solver.all_valid_words(&board).is_empty());
        assert_eq!(solver.score_of("AB"), 0);
        assert_eq!(solver.score_of("BA"), 0);
    }

    #[test]
    fn test_idempotent() {
        let solver = shells_solver();
        let board = parse_board(
            "4 4
             S E A S
             H E T E
             O R S T
             E S L L",
        );
        let first = solver.all_valid_words(&board);
        let second = solver.all_valid_words(&board);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_found_words_are_scoreable() {
        let solver = shells_solver();
        let board = parse_board(
            "4 4
             S E A S
             H E T E
             O R S T
             E S L L",
        );
        for word in solver.all_valid_words(&board) {
            assert!(solver.score_of(&word) > 0, "{}", word);
        }
    }

    #[test]
    fn test_solve_scores() {
        let solver = shells_solver();
        let board = parse_board(
            "4 4
             S H E L
             X X X L
             X X X S
             X X X X",
        );
        let solution = solver.solve(&board);
        assert_eq!(
            solution.words,
            vec![
                ScoredWord {
                    word: "SHE".into(),
                    score: 1
                },
                ScoredWord {
                    word: "SHELLS".into(),
                    score: 3
                },
            ]
        );
        assert_eq!(solution.total, 4);
        assert_eq!(solver.total_score(["SHE", "SHELLS", "NOPE"]), 4);
        assert_eq!(solution.board[0], vec!["S", "H", "E", "L"]);
    }

    /// Custom grid type, not backed by `Board`
    struct Row(&'static str);

    impl LetterGrid for Row {
        fn rows(&self) -> usize {
            1
        }
        fn cols(&self) -> usize {
            self.0.len()
        }
        fn letter(&self, _row: usize, col: usize) -> char {
            self.0.as_bytes()[col] as char
        }
    }

    #[test]
    fn test_any_letter_grid() {
        let solver = BoardSolver::new(["TEA", "EAT", "ATE"]);
        assert_eq!(sorted(solver.all_valid_words(&Row("TEAT"))), vec!["EAT", "TEA"]);
        // Out of alphabet letters just end the path
        assert!(solver.all_valid_words(&Row("T-EA")).is_empty());
    }
}
