//! Suspect table: resolves a clue to the suspect it incriminates
//!
//! A fixed number of buckets, each holding a singly linked chain of
//! entries. The table never grows, so chains lengthen as content is added;
//! game scenarios carry a few dozen clues at most, which keeps scans short.

use crate::GameError;

/// Bucket count used when the scenario does not ask for another one
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Seed of the djb2 rolling hash
const HASH_SEED: u64 = 5381;

/// Bucket index for `key` in a table of `bucket_count` buckets.
///
/// djb2: start at 5381, then `acc = acc * 33 + byte` for every byte of the
/// key, wrapping at 64 bits. Distinct keys may land in the same bucket.
pub fn hash(key: &str, bucket_count: usize) -> usize {
    (raw_hash(key) % bucket_count as u64) as usize
}

fn raw_hash(key: &str) -> u64 {
    key.bytes().fold(HASH_SEED, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

#[derive(Debug)]
struct HashEntry {
    clue: String,
    suspect: String,
    next: Option<Box<HashEntry>>,
}

/// Clue → suspect associations with separate chaining
#[derive(Debug)]
pub struct SuspectTable {
    buckets: Vec<Option<Box<HashEntry>>>,
    len: usize,
}

impl SuspectTable {
    /// Table with [`DEFAULT_BUCKET_COUNT`] buckets
    pub fn new() -> Self {
        Self {
            buckets: (0..DEFAULT_BUCKET_COUNT).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Table with a custom, non-zero bucket count
    pub fn with_buckets(bucket_count: usize) -> Result<Self, GameError> {
        if bucket_count == 0 {
            return Err(GameError::InvalidConfig(
                "suspect table needs at least one bucket".to_string(),
            ));
        }
        Ok(Self {
            buckets: (0..bucket_count).map(|_| None).collect(),
            len: 0,
        })
    }

    /// Associate `clue` with `suspect`.
    ///
    /// The entry is pushed on the front of its chain, so a second insert of
    /// the same clue shadows the first one on lookup. Nothing is replaced.
    pub fn insert(&mut self, clue: &str, suspect: &str) {
        let index = hash(clue, self.buckets.len());
        let head = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(HashEntry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next: head,
        }));
        self.len += 1;
    }

    /// Suspect for `clue`, or `None` if the clue incriminates nobody
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let index = hash(clue, self.buckets.len());
        let mut cursor = self.buckets[index].as_deref();
        while let Some(entry) = cursor {
            if entry.clue == clue {
                return Some(entry.suspect.as_str());
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Distinct suspect names, in bucket order
    pub fn suspects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for head in &self.buckets {
            let mut cursor = head.as_deref();
            while let Some(entry) = cursor {
                if !names.contains(&entry.suspect.as_str()) {
                    names.push(entry.suspect.as_str());
                }
                cursor = entry.next.as_deref();
            }
        }
        names
    }

    /// Number of stored entries, shadowed ones included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Average chain length
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.buckets.len() as f32
    }
}

impl Default for SuspectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SuspectTable {
    fn drop(&mut self) {
        // Unlink chains one entry at a time instead of recursing
        for head in &mut self.buckets {
            let mut cursor = head.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
            }
        }
    }
}
