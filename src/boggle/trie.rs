use tracing::debug;

use super::util::{index_letter, letter_index};
use super::{ALPHABET_SIZE, MIN_WORD_LENGTH};

/// Points awarded for a word of the given length. Zero means the word can never score.
pub fn score_for_length(len: usize) -> u8 {
    match len {
        0..=2 => 0,
        3 | 4 => 1,
        5 => 2,
        6 => 3,
        7 => 5,
        _ => 11,
    }
}

/// Prefix tree node
#[derive(Debug, Default)]
pub struct TrieNode {
    next: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    /// 0 if no word ends here, otherwise the word's score (always >= 1)
    score: u8,
}

impl TrieNode {
    /// Child reached by following `letter`, if any word continues that way
    pub fn next_node(&self, letter: char) -> Option<&TrieNode> {
        letter_index(letter).and_then(|i| self.next[i].as_deref())
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.score > 0
    }

    fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.next
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_deref().map(|n| (index_letter(i), n)))
    }
}

/// Dictionary of scoreable words stored as a 26-ary trie. Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct PrefixDictionary {
    root: Option<Box<TrieNode>>,
    n_words: usize,
}

impl PrefixDictionary {
    /// Builds the dictionary, dropping words shorter than three letters.
    ///
    /// Words must be uppercase A-Z. Anything else is a broken contract and panics.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        let mut n_skipped = 0;
        for word in words {
            let word = word.as_ref();
            let score = score_for_length(word.len());
            if score == 0 {
                n_skipped += 1;
                continue;
            }
            dict.insert(word, score);
        }
        debug!(
            words = dict.n_words,
            skipped = n_skipped,
            "built prefix dictionary"
        );
        dict
    }

    /// Last write wins for duplicate keys
    fn insert(&mut self, word: &str, score: u8) {
        debug_assert!(word.len() >= MIN_WORD_LENGTH && score > 0);
        let mut node = self.root.get_or_insert_with(Box::default);
        for c in word.chars() {
            let i = match letter_index(c) {
                Some(i) => i,
                None => panic!(
                    "dictionary word {:?} contains {:?}, only uppercase A-Z is supported",
                    word, c
                ),
            };
            node = node.next[i].get_or_insert_with(Box::default);
        }
        if node.score == 0 {
            self.n_words += 1;
        }
        node.score = score;
    }

    /// Root of the trie, `None` when no word made it into the dictionary
    pub fn root(&self) -> Option<&TrieNode> {
        self.root.as_deref()
    }

    /// Single letter step used by the board search
    pub fn child_after<'a>(&self, node: &'a TrieNode, letter: char) -> Option<&'a TrieNode> {
        node.next_node(letter)
    }

    /// Node reached by spelling out `key` from the root
    pub fn find(&self, key: &str) -> Option<&TrieNode> {
        key.chars()
            .try_fold(self.root()?, |node, c| node.next_node(c))
    }

    /// Score of the word, or 0 if it isn't in the dictionary
    pub fn score_of(&self, word: &str) -> u8 {
        self.find(word).map_or(0, TrieNode::score)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.score_of(word) > 0
    }

    /// Number of distinct words stored
    pub fn len(&self) -> usize {
        self.n_words
    }

    pub fn is_empty(&self) -> bool {
        self.n_words == 0
    }

    /// All the keys in the dictionary
    pub fn keys(&self) -> Vec<String> {
        self.keys_with_prefix("")
    }

    /// All the keys having `prefix` as a prefix, in alphabetical order
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.find(prefix) {
            Some(node) => self.collect_keys(node, prefix),
            None => Vec::new(),
        }
    }

    /// Pre-order walk below `node`, where `prefix` spells the path that reached it
    pub fn collect_keys(&self, node: &TrieNode, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        let mut word = String::from(prefix);
        Self::collect(node, &mut word, &mut keys);
        keys
    }

    fn collect(node: &TrieNode, word: &mut String, keys: &mut Vec<String>) {
        if node.is_terminal() {
            keys.push(word.clone());
        }
        for (c, child) in node.children() {
            word.push(c);
            Self::collect(child, word, keys);
            word.pop();
        }
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for PrefixDictionary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
