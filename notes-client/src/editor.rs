//! Note form state: the draft and which note, if any, it edits.
//!
//! # Invariants
//! - At most one note is being edited.
//! - Entering edit mode copies the note's content into the draft.
//! - While editing, the draft name is locked to the edited note.

use notes_client_types::Note;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub content: String,
}

/// What submitting the current draft should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create { name: String, content: String },
    Update { name: String, content: String },
}

#[derive(Debug, Default)]
pub struct Editor {
    state: EditState,
    draft: Draft,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing(name) => Some(name),
            EditState::Idle => None,
        }
    }

    /// Select `note` for editing. Re-selecting while already editing
    /// re-initialises the draft.
    pub fn begin(&mut self, note: &Note) {
        self.state = EditState::Editing(note.name.clone());
        self.draft = Draft {
            name: note.name.clone(),
            content: note.content.clone(),
        };
    }

    /// Drop the draft and return to idle without touching any note.
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
        self.draft = Draft::default();
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), String> {
        if let EditState::Editing(current) = &self.state {
            return Err(format!("cannot rename note '{}' while editing it", current));
        }
        self.draft.name = name.to_string();
        Ok(())
    }

    pub fn set_content(&mut self, content: &str) {
        self.draft.content = content.to_string();
    }

    /// Validate the draft and describe the remote call it maps to.
    pub fn submission(&self) -> Result<Submission, String> {
        if self.draft.content.trim().is_empty() {
            return Err("note content is required".to_string());
        }
        match &self.state {
            EditState::Editing(name) => Ok(Submission::Update {
                name: name.clone(),
                content: self.draft.content.clone(),
            }),
            EditState::Idle => {
                if self.draft.name.trim().is_empty() {
                    return Err("note name is required".to_string());
                }
                Ok(Submission::Create {
                    name: self.draft.name.clone(),
                    content: self.draft.content.clone(),
                })
            }
        }
    }

    /// Called once the submission was accepted by the server.
    pub fn complete(&mut self) {
        self.cancel();
    }
}
