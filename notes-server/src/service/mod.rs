use crate::{
    dto::{CreateNoteRequest, CreateNoteResponse, DeleteNoteResponse, NoteResponse},
    repository::{Repository, StoreError},
};

pub const DELETED_MESSAGE: &str = "Deleted successfully";
pub const NOT_FOUND_MESSAGE: &str = "Note ID not found";

/// Stateless orchestration over the note store. Every call goes to the store.
pub struct NoteService {
    repo: Repository,
}

impl NoteService {
    pub const fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<CreateNoteResponse, StoreError> {
        let note = self
            .repo
            .create_note(request.title, request.content)
            .await?;

        tracing::info!("Note created with ID: {}", note.id);

        Ok(CreateNoteResponse { id: note.id })
    }

    pub async fn get_note(&self, id: String) -> Result<Option<NoteResponse>, StoreError> {
        self.repo
            .get_note(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn list_notes(&self) -> Result<Vec<NoteResponse>, StoreError> {
        self.repo
            .list_notes()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    /// Never fails: a missing id or a store failure comes back as
    /// `success: false` with a message for the caller to show.
    pub async fn delete_note(&self, id: String) -> DeleteNoteResponse {
        match self.repo.delete_note(id.clone()).await {
            Ok(true) => {
                tracing::info!("Note deleted with ID: {id}");
                DeleteNoteResponse {
                    success: true,
                    message: DELETED_MESSAGE.to_string(),
                }
            }
            Ok(false) => DeleteNoteResponse {
                success: false,
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            Err(e) => {
                tracing::error!("Failed to delete note {id}: {e}");
                DeleteNoteResponse {
                    success: false,
                    message: format!("Database error: {e}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repository::tests::temp_repo;

    fn request(title: &str, content: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn meeting_scenario() {
        let (_dir, repo) = temp_repo().await;
        let service = NoteService::new(repo);

        let id = service
            .create_note(request("Meeting", "10 AM with Team"))
            .await
            .unwrap()
            .id;

        let expected = NoteResponse {
            id: id.clone(),
            title: "Meeting".to_string(),
            content: "10 AM with Team".to_string(),
        };

        assert_eq!(service.get_note(id.clone()).await.unwrap(), Some(expected.clone()));
        assert_eq!(service.list_notes().await.unwrap(), vec![expected]);

        let deleted = service.delete_note(id.clone()).await;
        assert!(deleted.success);
        assert_eq!(deleted.message, DELETED_MESSAGE);

        assert_eq!(service.get_note(id).await.unwrap(), None);
        assert!(service.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_title_and_content_are_accepted() {
        let (_dir, repo) = temp_repo().await;
        let service = NoteService::new(repo);

        let id = service.create_note(request("", "")).await.unwrap().id;
        let note = service.get_note(id).await.unwrap().unwrap();

        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
    }

    #[tokio::test]
    async fn delete_unknown_is_a_flag_not_an_error() {
        let (_dir, repo) = temp_repo().await;
        let service = NoteService::new(repo);

        let outcome = service.delete_note("non-existent-uuid".to_string()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("Note ID not found"));
    }

    #[tokio::test]
    async fn list_after_creates_and_deletes() {
        let (_dir, repo) = temp_repo().await;
        let service = NoteService::new(repo);

        let mut ids = Vec::new();
        for i in 0..5 {
            let id = service
                .create_note(request(&format!("Note {i}"), &format!("body {i}")))
                .await
                .unwrap()
                .id;
            ids.push(id);
        }

        for id in &ids[..2] {
            assert!(service.delete_note(id.clone()).await.success);
        }

        let notes = service.list_notes().await.unwrap();
        assert_eq!(notes.len(), 3);
        for (i, note) in notes.iter().enumerate() {
            assert_eq!(note.id, ids[i + 2]);
            assert_eq!(note.title, format!("Note {}", i + 2));
            assert_eq!(note.content, format!("body {}", i + 2));
        }
    }

    #[tokio::test]
    async fn reads_are_repeatable() {
        let (_dir, repo) = temp_repo().await;
        let service = NoteService::new(repo);

        let id = service.create_note(request("Same", "twice")).await.unwrap().id;
        service.create_note(request("Other", "")).await.unwrap();

        assert_eq!(
            service.get_note(id.clone()).await.unwrap(),
            service.get_note(id).await.unwrap()
        );
        assert_eq!(
            service.list_notes().await.unwrap(),
            service.list_notes().await.unwrap()
        );
    }

    #[tokio::test]
    async fn store_failures_surface() {
        let (_dir, repo) = temp_repo().await;
        repo.connection()
            .unwrap()
            .execute_batch("DROP TABLE notes")
            .unwrap();
        let service = NoteService::new(repo);

        assert!(service.create_note(request("x", "y")).await.is_err());
        assert!(service.get_note("x".to_string()).await.is_err());
        assert!(service.list_notes().await.is_err());

        let outcome = service.delete_note("x".to_string()).await;
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Database error: "));
        assert!(outcome.message.contains("no such table"));
    }
}
