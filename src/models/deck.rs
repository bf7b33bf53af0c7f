//! Deck is an ordered set of card entries used for one session
use super::CardEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    entries: Vec<CardEntry>,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            name: "My Deck".to_string(),
            entries: Vec::new(),
        }
    }
}

impl Deck {
    pub fn new(name: impl Into<String>, entries: Vec<CardEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[CardEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CardEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a new deck holding a uniformly random permutation of the entries.
    /// The original deck is left untouched.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut entries = self.entries.clone();
        entries.as_mut_slice().shuffle(rng);
        Deck {
            name: self.name.clone(),
            entries,
        }
    }
}
