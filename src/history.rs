use egui::Pos2;
use log::{debug, info};

use crate::drawable::{Drawable, Style};

/// Undo/redo store of drawables.
///
/// The in-progress action, if any, is always the newest entry of `committed`;
/// `in_progress` only marks that it may still be extended.
#[derive(Debug, Default, Clone)]
pub struct HistoryStack {
    /// Drawables on the canvas, oldest first
    committed: Vec<Drawable>,
    /// Undone drawables, most recently undone last
    redo: Vec<Drawable>,
    in_progress: bool,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new action. Any redo history is discarded.
    pub fn begin_action(&mut self, origin: Pos2, style: Style) -> &mut Drawable {
        self.end_action();
        if !self.redo.is_empty() {
            debug!("Discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }

        self.committed.push(Drawable::create(origin, style));
        self.in_progress = true;
        let index = self.committed.len() - 1;
        &mut self.committed[index]
    }

    /// Route a pointer sample to the in-progress drawable
    pub fn extend_action(&mut self, point: Pos2) -> bool {
        match self.in_progress_mut() {
            Some(drawable) => {
                drawable.extend(point);
                true
            }
            None => false,
        }
    }

    /// Commit the in-progress drawable. Idempotent.
    pub fn end_action(&mut self) -> bool {
        if !self.in_progress {
            return false;
        }
        self.in_progress = false;
        if let Some(drawable) = self.committed.last() {
            info!("Committed {} {}", drawable.type_name(), drawable.id());
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        self.end_action();
        match self.committed.pop() {
            Some(drawable) => {
                self.redo.push(drawable);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.end_action();
        match self.redo.pop() {
            Some(drawable) => {
                self.committed.push(drawable);
                true
            }
            None => false,
        }
    }

    /// Drop everything, including an unfinished action
    pub fn clear(&mut self) -> bool {
        let changed = !self.committed.is_empty() || !self.redo.is_empty();
        self.committed.clear();
        self.redo.clear();
        self.in_progress = false;
        changed
    }

    pub fn committed(&self) -> &[Drawable] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Drawable] {
        &self.redo
    }

    pub fn in_progress(&self) -> Option<&Drawable> {
        if self.in_progress {
            self.committed.last()
        } else {
            None
        }
    }

    fn in_progress_mut(&mut self) -> Option<&mut Drawable> {
        if self.in_progress {
            self.committed.last_mut()
        } else {
            None
        }
    }

    /// Committed drawables excluding the one still being drawn
    pub fn finished(&self) -> &[Drawable] {
        if self.in_progress {
            &self.committed[..self.committed.len() - 1]
        } else {
            &self.committed
        }
    }

    pub fn is_action_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
