pub mod memory;
pub mod notes_api;
pub mod openreview_client;

pub use memory::InMemoryNotesApi;
pub use notes_api::{NotesApi, NotesQuery};
pub use openreview_client::OpenReviewClient;
