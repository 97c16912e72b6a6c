//! Spellbook data files (RON) and loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::book::{SpellBook, SpellEntry};
use super::error::SpellBookError;
use crate::gesture::GestureSequence;

/// One entry as written in a spellbook file.
#[derive(Debug, Clone, Deserialize)]
pub struct SpellEntryDef {
    pub spell: String,
    pub sequence: GestureSequence,
}

/// External spellbook file structure.
///
/// ```ron
/// (
///     name: "player",
///     entries: [
///         (spell: "Fireball", sequence: [(OpenPalm, ClosedFist), (Victory, ThumbsUp)]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SpellBookFile {
    #[serde(default)]
    pub name: Option<String>,
    pub entries: Vec<SpellEntryDef>,
}

impl SpellBookFile {
    /// Convert into a usable book. `fallback_name` is used when the file has
    /// no name of its own.
    pub fn into_spellbook(self, fallback_name: &str) -> SpellBook {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        let entries = self
            .entries
            .into_iter()
            .map(|def| SpellEntry::new(def.sequence, def.spell.as_str()))
            .collect();
        SpellBook::new(name, entries)
    }
}

/// Parse a spellbook from RON text. `origin` names the source in errors.
pub fn parse_spellbook(contents: &str, origin: &str) -> Result<SpellBook, SpellBookError> {
    let file = ron::from_str::<SpellBookFile>(contents).map_err(|e| SpellBookError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })?;

    let fallback = Path::new(origin)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(origin);
    let fallback = fallback.strip_suffix(".spellbook").unwrap_or(fallback);

    Ok(file.into_spellbook(fallback))
}

/// Load a spellbook from a RON file on disk.
pub fn load_spellbook(path: impl AsRef<Path>) -> Result<SpellBook, SpellBookError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(SpellBookError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| SpellBookError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    let book = parse_spellbook(&contents, &display)?;
    info!("Loaded spellbook '{}' with {} entries", book.name(), book.len());
    Ok(book)
}
