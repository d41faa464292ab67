use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::{dto, repository::StoreError, service::NoteService};

// Include the generated proto code
pub mod notes {
    tonic::include_proto!("notes");
}

use notes::{
    CreateNoteRequest, CreateNoteResponse, DeleteNoteRequest, DeleteNoteResponse,
    GetNoteRequest, GetNoteResponse, ListNotesRequest, ListNotesResponse, Note,
    note_service_server::{NoteService as NoteServiceTrait, NoteServiceServer},
};

impl From<dto::NoteResponse> for Note {
    fn from(note: dto::NoteResponse) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
        }
    }
}

fn internal(action: &str, e: &StoreError) -> Status {
    tracing::error!("Failed to {action}: {e}");
    Status::internal(format!("Database error: {e}"))
}

// gRPC service implementation
pub struct GrpcNoteService {
    service: Arc<NoteService>,
}

impl GrpcNoteService {
    pub const fn new(service: Arc<NoteService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl NoteServiceTrait for GrpcNoteService {
    async fn create_note(
        &self,
        request: Request<CreateNoteRequest>,
    ) -> Result<Response<CreateNoteResponse>, Status> {
        let req = request.into_inner();
        let dto_req = dto::CreateNoteRequest {
            title: req.title,
            content: req.content,
        };

        match self.service.create_note(dto_req).await {
            Ok(created) => Ok(Response::new(CreateNoteResponse { id: created.id })),
            Err(e) => Err(internal("create note", &e)),
        }
    }

    async fn get_note(
        &self,
        request: Request<GetNoteRequest>,
    ) -> Result<Response<GetNoteResponse>, Status> {
        let req = request.into_inner();

        match self.service.get_note(req.id).await {
            Ok(Some(note)) => Ok(Response::new(GetNoteResponse {
                note: Some(note.into()),
            })),
            Ok(None) => Err(Status::not_found("Note not found")),
            Err(e) => Err(internal("get note", &e)),
        }
    }

    async fn list_notes(
        &self,
        _request: Request<ListNotesRequest>,
    ) -> Result<Response<ListNotesResponse>, Status> {
        match self.service.list_notes().await {
            Ok(notes) => Ok(Response::new(ListNotesResponse {
                notes: notes.into_iter().map(Note::from).collect(),
            })),
            Err(e) => Err(internal("list notes", &e)),
        }
    }

    async fn delete_note(
        &self,
        request: Request<DeleteNoteRequest>,
    ) -> Result<Response<DeleteNoteResponse>, Status> {
        let req = request.into_inner();

        let outcome = self.service.delete_note(req.id).await;

        Ok(Response::new(DeleteNoteResponse {
            success: outcome.success,
            message: outcome.message,
        }))
    }
}

pub fn create_grpc_server(service: Arc<NoteService>) -> NoteServiceServer<GrpcNoteService> {
    NoteServiceServer::new(GrpcNoteService::new(service))
}
