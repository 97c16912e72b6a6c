//! Spellbook module - the dictionary of castable gesture sequences.

mod book;
mod data;
mod error;

pub use book::{SpellBook, SpellEntry, SpellId};
pub use data::{load_spellbook, parse_spellbook, SpellBookFile, SpellEntryDef};
pub use error::{SpellBookError, SpellBookIssue};
