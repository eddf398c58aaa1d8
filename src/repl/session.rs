//! Per-session REPL state

use std::path::PathBuf;

use crate::error::Result;
use crate::pokedex::Pokedex;

/// Paging position and the user's Pokedex.
#[derive(Debug, Default)]
pub struct Session {
    /// URL the next `map` fetches; `None` once the last page was shown
    pub next: Option<String>,
    /// URL `mapb` fetches; `None` on the first page
    pub previous: Option<String>,
    /// Whether any page has been shown yet
    pub started: bool,
    pub pokedex: Pokedex,
    /// Where the Pokedex is saved; `None` keeps it in memory only
    pub pokedex_file: Option<PathBuf>,
}

impl Session {
    /// In-memory session with an empty Pokedex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session backed by a Pokedex file, loading any earlier catches.
    pub fn with_pokedex_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let pokedex = Pokedex::load(&path)?;
        Ok(Self {
            pokedex,
            pokedex_file: Some(path),
            ..Self::default()
        })
    }

    /// Records the links of a page that was just shown.
    pub fn set_page(&mut self, next: Option<String>, previous: Option<String>) {
        self.started = true;
        self.next = next;
        self.previous = previous;
    }

    /// Writes the Pokedex to its file, if it has one.
    pub fn save(&self) -> Result<()> {
        match &self.pokedex_file {
            Some(path) => self.pokedex.save(path),
            None => Ok(()),
        }
    }
}
