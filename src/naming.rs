use rand::Rng;
use rand::distributions::Alphanumeric;
use std::path::MAIN_SEPARATOR;

/// Longest name (in chars) taken from the first line of a note.
pub const MAX_NAME_CHARS: usize = 64;

/// Length of the disambiguating suffix appended on collision.
pub const SUFFIX_LEN: usize = 5;

/// Outcome of deriving a file name from note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedName {
    Name(String),
    Skip,
}

/// Derive the base file name (without extension) from a note's content.
///
/// Takes the first line, clamps it to [`MAX_NAME_CHARS`] characters and then
/// strips path separators and carriage returns. The result can therefore be
/// shorter than the limit. Empty results mean the note has no usable name.
pub fn derive(content: &str) -> DerivedName {
    let first_line = content.split('\n').next().unwrap_or_default();
    let name: String = first_line
        .chars()
        .take(MAX_NAME_CHARS)
        .filter(|&c| c != MAIN_SEPARATOR && c != '\r')
        .collect();

    if name.is_empty() {
        DerivedName::Skip
    } else {
        DerivedName::Name(name)
    }
}

/// Source of the random suffixes used to disambiguate colliding names.
pub trait SuffixSource {
    fn suffix(&mut self, len: usize) -> String;
}

/// Alphanumeric suffixes from the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn suffix(&mut self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
    }
}

/// Hands out a fixed list of suffixes in order, then repeats the last one.
/// Lets tests predict the exact names produced on collision.
#[derive(Debug, Clone)]
pub struct FixedSuffixes {
    queue: Vec<String>,
    next: usize,
}

impl FixedSuffixes {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: suffixes.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl SuffixSource for FixedSuffixes {
    fn suffix(&mut self, len: usize) -> String {
        let picked = self
            .queue
            .get(self.next)
            .or_else(|| self.queue.last())
            .cloned()
            .unwrap_or_default();
        self.next += 1;
        picked.chars().take(len).collect()
    }
}
