use tonic::{Code, Request};

// Include the generated proto code
pub mod notes {
    tonic::include_proto!("notes");
}

use notes::{
    CreateNoteRequest, DeleteNoteRequest, GetNoteRequest, ListNotesRequest,
    note_service_client::NoteServiceClient,
};

use serde_json::to_string_pretty;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Connect to the gRPC server
    let addr =
        std::env::var("GRPC_SERVER_ADDR").unwrap_or_else(|_| "http://127.0.0.1:50051".to_string());

    let mut client = NoteServiceClient::connect(addr.clone()).await?;
    println!("Connected to gRPC server at address {addr}\n");

    // Create note
    println!("1. Creating a note...");
    let create_request = CreateNoteRequest {
        title: "Meeting".to_string(),
        content: "10 AM with Team".to_string(),
    };
    let create_response = client.create_note(Request::new(create_request)).await?;
    let note_id = create_response.into_inner().id;
    println!("Created note ID: {note_id}\n");

    // Get one note
    println!("2. Getting note by ID...");
    let get_request = GetNoteRequest {
        id: note_id.clone(),
    };
    let get_response = client.get_note(Request::new(get_request)).await?;
    println!("Note: {}\n", to_string_pretty(&get_response.into_inner())?);

    // List notes
    println!("3. Listing notes...");
    let list_response = client.list_notes(Request::new(ListNotesRequest {})).await?;
    println!("Notes: {}\n", to_string_pretty(&list_response.into_inner())?);

    // Delete note
    println!("4. Deleting the note...");
    let delete_request = DeleteNoteRequest {
        id: note_id.clone(),
    };
    let delete_response = client.delete_note(Request::new(delete_request)).await?;
    let delete_result = delete_response.into_inner();
    println!(
        "Delete status: {}, message: {}\n",
        delete_result.success, delete_result.message
    );

    // Get the deleted note
    println!("5. Getting the deleted note...");
    match client.get_note(Request::new(GetNoteRequest { id: note_id })).await {
        Ok(response) => println!("Note: {}\n", to_string_pretty(&response.into_inner())?),
        Err(status) if status.code() == Code::NotFound => {
            println!("Not found: {}\n", status.message());
        }
        Err(status) => return Err(status.into()),
    }

    // List notes after delete
    println!("6. Listing notes after delete...");
    let notes = client
        .list_notes(Request::new(ListNotesRequest {}))
        .await?
        .into_inner()
        .notes;
    if notes.is_empty() {
        println!("No notes found.");
    }
    for note in notes {
        println!("- [{}] {}: {}", note.id, note.title, note.content);
    }

    Ok(())
}
