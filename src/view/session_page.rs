//! The session page: note entry, keyboard navigation, inline edit and delete.
//!
//! Focus moves between three places:
//!
//! | Focus     | Enter / Tab        | Up / Down        | `e`          | Backspace / Delete | Escape |
//! |-----------|--------------------|------------------|--------------|--------------------|--------|
//! | `Input`   | add draft as note  | start navigating | typed        | erase draft char   | –      |
//! | `Notes`   | –                  | move selection   | edit note    | delete note        | –      |
//! | `Editing` | save edit          | –                | typed        | erase edit char    | cancel |
//!
//! Ctrl+Enter asks for optimization from any focus when the session has notes.

use anyhow::Result;
use rusqlite::Connection;

use super::Key;
use crate::store::types::{Note, Session};
use crate::store::{notes, sessions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Input,
    Notes,
    Editing,
}

/// What a key press did, for the caller to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    None,
    NoteAdded(Note),
    NoteUpdated(Note),
    NoteDeleted(String),
    SelectionChanged(Option<String>),
    EditStarted(String),
    EditCancelled,
    /// The caller should run optimization.
    Optimize,
}

#[derive(Debug)]
pub struct SessionPage {
    session: Session,
    notes: Vec<Note>,
    draft: String,
    selected: Option<String>,
    editing: Option<String>,
    edit_buffer: String,
    focus: Focus,
}

impl SessionPage {
    /// Load the session and its notes, oldest first. `None` if the session is missing.
    pub fn load(conn: &Connection, session_id: &str) -> Result<Option<Self>> {
        let Some(session) = sessions::get_session(conn, session_id)? else {
            tracing::debug!(session_id = %session_id, "session not found");
            return Ok(None);
        };
        let notes = notes::get_notes(conn, session_id)?;

        Ok(Some(Self {
            session,
            notes,
            draft: String::new(),
            selected: None,
            editing: None,
            edit_buffer: String::new(),
            focus: Focus::Input,
        }))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn heading(&self) -> &str {
        self.session.heading()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Replace the draft text (typing into the input).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.focus_input();
        self.draft = text.into();
    }

    /// Replace the edit buffer while editing. Ignored otherwise.
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if self.editing.is_some() {
            self.edit_buffer = text.into();
        }
    }

    /// Dispatch one key press according to the current focus.
    ///
    /// Storage failures are logged and reported as [`PageAction::None`];
    /// the page state is left as it was.
    pub fn handle_key(&mut self, conn: &Connection, key: Key) -> PageAction {
        if key == Key::CtrlEnter {
            return if self.notes.is_empty() {
                PageAction::None
            } else {
                PageAction::Optimize
            };
        }

        match self.focus {
            Focus::Input => match key {
                Key::Enter | Key::Tab => self.submit_draft(conn),
                Key::Up => self.select_previous(),
                Key::Down => self.select_next(),
                Key::Char(c) => {
                    self.draft.push(c);
                    PageAction::None
                }
                Key::Backspace => {
                    self.draft.pop();
                    PageAction::None
                }
                _ => PageAction::None,
            },
            Focus::Notes => match key {
                Key::Up => self.select_previous(),
                Key::Down => self.select_next(),
                Key::Char('e') => self.begin_edit(),
                Key::Backspace | Key::Delete => self.delete_selected(conn),
                Key::Char(c) => {
                    self.focus_input();
                    self.draft.push(c);
                    PageAction::None
                }
                _ => PageAction::None,
            },
            Focus::Editing => match key {
                Key::Enter | Key::Tab => self.commit_edit(conn),
                Key::Escape => self.cancel_edit(),
                Key::Char(c) => {
                    self.edit_buffer.push(c);
                    PageAction::None
                }
                Key::Backspace => {
                    self.edit_buffer.pop();
                    PageAction::None
                }
                _ => PageAction::None,
            },
        }
    }

    /// Store the trimmed draft as a new note. A blank draft does nothing.
    pub fn submit_draft(&mut self, conn: &Connection) -> PageAction {
        if self.draft.trim().is_empty() {
            return PageAction::None;
        }
        match notes::record_note(conn, &self.session.id, &self.draft) {
            Ok(note) => {
                self.notes.push(note.clone());
                self.draft.clear();
                PageAction::NoteAdded(note)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to add note");
                PageAction::None
            }
        }
    }

    /// Move the selection toward older notes. Starts at the newest note.
    pub fn select_previous(&mut self) -> PageAction {
        self.step_selection(-1)
    }

    /// Move the selection toward newer notes. Starts at the newest note.
    pub fn select_next(&mut self) -> PageAction {
        self.step_selection(1)
    }

    fn step_selection(&mut self, delta: isize) -> PageAction {
        if self.notes.is_empty() {
            return PageAction::None;
        }
        self.focus = Focus::Notes;

        let next = match self.selected_index() {
            None => self.notes.len() - 1,
            Some(i) => {
                let target = i as isize + delta;
                if target < 0 || target >= self.notes.len() as isize {
                    return PageAction::None;
                }
                target as usize
            }
        };

        let id = self.notes[next].id.clone();
        self.selected = Some(id.clone());
        PageAction::SelectionChanged(Some(id))
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.notes.iter().position(|n| n.id == id)
    }

    /// Focusing the input drops the selection, so navigation restarts at the newest note.
    fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.selected = None;
    }

    /// Start editing the selected note.
    pub fn begin_edit(&mut self) -> PageAction {
        if self.editing.is_some() {
            return PageAction::None;
        }
        let Some(index) = self.selected_index() else {
            return PageAction::None;
        };
        let note = &self.notes[index];
        self.edit_buffer = note.text.clone();
        self.editing = Some(note.id.clone());
        self.focus = Focus::Editing;
        PageAction::EditStarted(note.id.clone())
    }

    /// Save the trimmed edit buffer. Blank text keeps the old note.
    /// Editing ends and focus returns to the input either way.
    pub fn commit_edit(&mut self, conn: &Connection) -> PageAction {
        let Some(editing_id) = self.editing.take() else {
            return PageAction::None;
        };
        self.focus_input();
        let text = std::mem::take(&mut self.edit_buffer);
        let text = text.trim();
        if text.is_empty() {
            return PageAction::None;
        }

        let Some(index) = self.notes.iter().position(|n| n.id == editing_id) else {
            return PageAction::None;
        };
        let updated = Note {
            text: text.to_string(),
            ..self.notes[index].clone()
        };
        match notes::update_note(conn, &updated) {
            Ok(()) => {
                self.notes[index] = updated.clone();
                PageAction::NoteUpdated(updated)
            }
            Err(e) => {
                tracing::error!(error = %e, note_id = %editing_id, "failed to update note");
                PageAction::None
            }
        }
    }

    pub fn cancel_edit(&mut self) -> PageAction {
        if self.editing.take().is_none() {
            return PageAction::None;
        }
        self.edit_buffer.clear();
        self.focus_input();
        PageAction::EditCancelled
    }

    /// Delete the selected note (not while editing). Clears the selection.
    pub fn delete_selected(&mut self, conn: &Connection) -> PageAction {
        if self.editing.is_some() {
            return PageAction::None;
        }
        let Some(id) = self.selected.clone() else {
            return PageAction::None;
        };
        match notes::delete_note(conn, &id) {
            Ok(_) => {
                self.notes.retain(|n| n.id != id);
                self.focus_input();
                PageAction::NoteDeleted(id)
            }
            Err(e) => {
                tracing::error!(error = %e, note_id = %id, "failed to delete note");
                PageAction::None
            }
        }
    }
}
