//! The spellbook: gesture sequences mapped to spells.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

use super::error::SpellBookIssue;
use crate::gesture::{GesturePair, GestureSequence};

/// Opaque spell identifier. The host decides what a spell actually does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpellId(String);

impl SpellId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpellId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One recipe in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellEntry {
    pub sequence: GestureSequence,
    pub spell: SpellId,
}

impl SpellEntry {
    pub fn new(sequence: impl Into<GestureSequence>, spell: impl Into<SpellId>) -> Self {
        Self {
            sequence: sequence.into(),
            spell: spell.into(),
        }
    }
}

/// Lookup dictionary from gesture sequences to spells.
///
/// Lookups use structural sequence equality. If two entries share a
/// sequence the first one inserted wins.
#[derive(Debug, Clone, Default)]
pub struct SpellBook {
    name: String,
    entries: Vec<SpellEntry>,
    index: HashMap<GestureSequence, usize>,
}

impl SpellBook {
    /// Build a book from its entries, logging any configuration issues.
    pub fn new(name: impl Into<String>, entries: Vec<SpellEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.sequence.clone()).or_insert(i);
        }

        let book = Self {
            name: name.into(),
            entries,
            index,
        };

        for issue in book.validate() {
            match issue {
                SpellBookIssue::DuplicateSequence { .. } => {
                    error!("SpellBook '{}': {}", book.name, issue)
                }
                _ => warn!("SpellBook '{}': {}", book.name, issue),
            }
        }

        book
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the spell whose sequence equals `buffer` exactly.
    ///
    /// An empty buffer never matches.
    pub fn try_match(&self, buffer: &[GesturePair]) -> Option<&SpellId> {
        if buffer.is_empty() {
            return None;
        }
        self.index.get(buffer).map(|&i| &self.entries[i].spell)
    }

    /// Report every configuration problem in entry order.
    pub fn validate(&self) -> Vec<SpellBookIssue> {
        let mut issues = Vec::new();
        let mut seen: HashMap<&GestureSequence, usize> = HashMap::new();

        for (i, entry) in self.entries.iter().enumerate() {
            if entry.sequence.is_empty() {
                issues.push(SpellBookIssue::EmptySequence { index: i });
            } else if !entry.sequence.is_castable() {
                issues.push(SpellBookIssue::UnreachableStep {
                    index: i,
                    sequence: entry.sequence.clone(),
                });
            }

            if let Some(&first) = seen.get(&entry.sequence) {
                issues.push(SpellBookIssue::DuplicateSequence {
                    first,
                    duplicate: i,
                    sequence: entry.sequence.clone(),
                });
            } else {
                seen.insert(&entry.sequence, i);
            }
        }

        issues
    }

    pub fn entries(&self) -> &[SpellEntry] {
        &self.entries
    }

    /// All spells in entry order.
    pub fn spells(&self) -> impl Iterator<Item = &SpellId> {
        self.entries.iter().map(|e| &e.spell)
    }

    /// First entry casting the named spell.
    pub fn entry_by_spell(&self, name: &str) -> Option<&SpellEntry> {
        self.entries.iter().find(|e| e.spell.as_str() == name)
    }

    /// Pick a uniformly random entry.
    pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&SpellEntry> {
        self.entries.choose(rng)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureLabel::{self, *};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair(left: GestureLabel, right: GestureLabel) -> GesturePair {
        GesturePair::new(left, right)
    }

    fn book() -> SpellBook {
        SpellBook::new(
            "test",
            vec![
                SpellEntry::new(vec![pair(OpenPalm, ClosedFist), pair(Victory, ThumbsUp)], "Fireball"),
                SpellEntry::new(vec![pair(PointingUp, ILoveYou)], "Ice Blast"),
            ],
        )
    }

    #[test]
    fn matching_sequence_returns_spell() {
        let book = book();
        let buffer = vec![pair(OpenPalm, ClosedFist), pair(Victory, ThumbsUp)];
        assert_eq!(book.try_match(&buffer), Some(&SpellId::new("Fireball")));
        assert_eq!(book.try_match(&[pair(PointingUp, ILoveYou)]), Some(&SpellId::new("Ice Blast")));
    }

    #[test]
    fn prefix_or_reordered_buffer_does_not_match() {
        let book = book();
        assert_eq!(book.try_match(&[pair(OpenPalm, ClosedFist)]), Option::None);
        assert_eq!(
            book.try_match(&[pair(Victory, ThumbsUp), pair(OpenPalm, ClosedFist)]),
            Option::None
        );
        assert_eq!(book.try_match(&[pair(ClosedFist, OpenPalm), pair(Victory, ThumbsUp)]), Option::None);
    }

    #[test]
    fn empty_buffer_never_matches() {
        assert_eq!(book().try_match(&[]), Option::None);

        let with_empty_entry = SpellBook::new("odd", vec![SpellEntry::new(Vec::<GesturePair>::new(), "Nothing")]);
        assert_eq!(with_empty_entry.try_match(&[]), Option::None);
    }

    #[test]
    fn duplicate_sequences_are_reported_and_first_wins() {
        let seq = vec![pair(OpenPalm, ClosedFist)];
        let book = SpellBook::new(
            "dupes",
            vec![
                SpellEntry::new(seq.clone(), "Fireball"),
                SpellEntry::new(vec![pair(Victory, Victory)], "Heal"),
                SpellEntry::new(seq.clone(), "Shield"),
            ],
        );

        assert_eq!(
            book.validate(),
            vec![SpellBookIssue::DuplicateSequence {
                first: 0,
                duplicate: 2,
                sequence: GestureSequence::new(seq.clone()),
            }]
        );
        assert_eq!(book.try_match(&seq), Some(&SpellId::new("Fireball")));
    }

    #[test]
    fn unreachable_entries_are_reported() {
        let book = SpellBook::new(
            "broken",
            vec![
                SpellEntry::new(Vec::<GesturePair>::new(), "Empty"),
                SpellEntry::new(vec![pair(OpenPalm, None)], "OneHanded"),
            ],
        );
        let issues = book.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], SpellBookIssue::EmptySequence { index: 0 });
        assert!(matches!(issues[1], SpellBookIssue::UnreachableStep { index: 1, .. }));
    }

    #[test]
    fn clean_book_has_no_issues() {
        assert!(book().validate().is_empty());
    }

    #[test]
    fn entry_queries() {
        let book = book();
        assert_eq!(book.len(), 2);
        assert_eq!(
            book.spells().map(SpellId::as_str).collect::<Vec<_>>(),
            vec!["Fireball", "Ice Blast"]
        );
        let entry = book.entry_by_spell("Ice Blast").unwrap();
        assert_eq!(entry.sequence.steps(), &[pair(PointingUp, ILoveYou)]);
        assert!(book.entry_by_spell("Meteor").is_none());
    }

    #[test]
    fn random_entry_comes_from_the_book() {
        let book = book();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let entry = book.random_entry(&mut rng).unwrap();
            assert!(book.entries().contains(entry));
        }
        assert!(SpellBook::default().random_entry(&mut rng).is_none());
    }
}
