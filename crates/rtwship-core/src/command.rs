//! Reversible commands and the linear undo/redo stack.

/// A reversible edit applied to a target document.
///
/// `undo` must restore every observable field of the target to its value
/// before `execute`, firing the same kind of notifications the forward edit
/// fired. `execute` is called again on redo.
pub trait Command {
    /// The document the command edits.
    type Target: ?Sized;

    /// Applies the command.
    fn execute(&mut self, target: &mut Self::Target);

    /// Reverts the command.
    fn undo(&mut self, target: &mut Self::Target);

    /// Returns the name of the command for display.
    fn name(&self) -> &str;
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Target = C::Target;

    fn execute(&mut self, target: &mut Self::Target) {
        (**self).execute(target)
    }

    fn undo(&mut self, target: &mut Self::Target) {
        (**self).undo(target)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Undo and redo histories.
///
/// Doing a new command discards the redo history. A command lives in exactly
/// one of the two histories.
#[derive(Debug)]
pub struct CommandStack<C> {
    undo_stack: Vec<C>,
    redo_stack: Vec<C>,
}

impl<C: Command> CommandStack<C> {
    /// Create an empty command stack
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Purge the redo history, record `command` and execute it.
    pub fn do_command(&mut self, command: C, target: &mut C::Target) {
        self.redo_stack.clear();
        tracing::debug!("Executing command: {}", command.name());
        self.undo_stack.push(command);
        if let Some(command) = self.undo_stack.last_mut() {
            command.execute(target);
        }
    }

    /// Undo the most recent command and move it to the redo history.
    ///
    /// Returns false, doing nothing, when there is nothing to undo.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        match self.undo_stack.pop() {
            Some(mut command) => {
                tracing::debug!("Undoing command: {}", command.name());
                command.undo(target);
                self.redo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Re-execute the most recently undone command.
    ///
    /// Returns false, doing nothing, when there is nothing to redo.
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        match self.redo_stack.pop() {
            Some(mut command) => {
                tracing::debug!("Redoing command: {}", command.name());
                command.execute(target);
                self.undo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of commands that can be undone
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of commands that can be redone
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Commands that can be undone, oldest first.
    pub fn undo_history(&self) -> &[C] {
        &self.undo_stack
    }

    /// Commands that can be redone, the next one to redo last.
    pub fn redo_history(&self) -> &[C] {
        &self.redo_stack
    }

    /// Name of the command the next `undo` would revert.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Name of the command the next `redo` would apply.
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    /// Forget both histories without touching the target.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<C: Command> Default for CommandStack<C> {
    fn default() -> Self {
        Self::new()
    }
}
