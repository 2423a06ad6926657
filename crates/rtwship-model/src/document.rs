//! The open document: a ship and its edit history.

use rtwship_core::CommandStack;
use rtwship_settings::Parameters;
use std::path::{Path, PathBuf};

use crate::commands::ShipCommand;
use crate::error::Result;
use crate::ship_data::ShipData;

/// A loaded ship with its own undo history.
#[derive(Debug)]
pub struct Document {
    ship: ShipData,
    commands: CommandStack<ShipCommand>,
}

impl Document {
    /// Wrap a loaded ship with an empty history.
    pub fn new(ship: ShipData) -> Self {
        Self {
            ship,
            commands: CommandStack::new(),
        }
    }

    /// Load the ship file at `path`.
    pub fn open(path: impl AsRef<Path>, params: &Parameters) -> Result<Self> {
        ShipData::load(path, params).map(Self::new)
    }

    /// The edited ship.
    pub fn ship(&self) -> &ShipData {
        &self.ship
    }

    /// Undo and redo history.
    pub fn commands(&self) -> &CommandStack<ShipCommand> {
        &self.commands
    }

    /// Where the document was loaded from or last saved to.
    pub fn path(&self) -> &Path {
        self.ship.path()
    }

    /// Run an edit and record it.
    pub fn execute(&mut self, command: ShipCommand) {
        self.commands.do_command(command, &mut self.ship);
    }

    /// Undo the last edit. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        self.commands.undo(&mut self.ship)
    }

    /// Redo the last undone edit. Returns false if there was none.
    pub fn redo(&mut self) -> bool {
        self.commands.redo(&mut self.ship)
    }

    /// Write back to the file the ship was loaded from.
    pub fn save(&self) -> Result<()> {
        self.ship.save(self.ship.path())
    }

    /// Write to `path`, which becomes the document's file on success.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.ship.save(&path)?;
        self.ship.set_path(path);
        Ok(())
    }
}

/// Holds at most one open document.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
}

impl Session {
    /// A session with no document open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The open document, for editing.
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Open `path` in place of the current document. On failure the current
    /// document stays open, untouched.
    pub fn load(&mut self, path: impl AsRef<Path>, params: &Parameters) -> Result<&mut Document> {
        let document = Document::open(path, params)?;
        tracing::info!("Opened {}", document.path().display());
        Ok(self.document.insert(document))
    }

    /// Close the open document and hand it back.
    pub fn close(&mut self) -> Option<Document> {
        self.document.take()
    }
}
