use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::boggle::BoggleResult;

/// Reads a dictionary file. Words are whitespace separated and uppercased.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> BoggleResult<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let words = parse_word_list(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), words = words.len(), "read word list");
    Ok(words)
}

/// Entries with anything other than the letters A-Z are skipped
pub fn parse_word_list<R: BufRead>(reader: R) -> BoggleResult<Vec<String>> {
    let mut words = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        for word in line.split_whitespace() {
            let word = word.to_ascii_uppercase();
            if !word.chars().all(|c| c.is_ascii_uppercase()) {
                warn!(line = n + 1, word = %word, "skipping word outside A-Z");
                continue;
            }
            words.push(word);
        }
    }
    Ok(words)
}
