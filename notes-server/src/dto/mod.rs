use crate::models::Note;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteResponse {
    /// Note ID
    pub id: String,
    /// Note title
    pub title: String,
    /// Note content, empty when none was stored
    pub content: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteResponse {
    /// ID assigned to the new note
    pub id: String,
}

/// Outcome of a delete. A missing note is reported here, not as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteNoteResponse {
    pub success: bool,
    pub message: String,
}
