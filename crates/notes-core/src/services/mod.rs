//! Store-facing services: the shared database service, live queries,
//! and the thin repository consumed by the controller.

mod database;
mod live;
mod repository;

pub use database::DatabaseService;
pub use live::{NoteListQuery, NoteQuery};
pub use repository::NoteRepository;
