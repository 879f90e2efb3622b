//! Completion events shared between the store, the mediator and the shell.

use mongodb::bson::Document;
use uuid::Uuid;

/// Events published on the shared notification channel.
///
/// The shell's event loop drains the channel receiver, updates its status
/// surface, and forwards each event to `DocumentMediator::handle_event` so
/// the edit-save tail can run.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    DocumentsLoaded {
        database: String,
        collection: String,
        documents: Vec<Document>,
        total: u64,
    },
    DocumentInserted,
    DocumentInsertFailed {
        error: String,
    },
    DocumentSaved {
        operation: Uuid,
    },
    DocumentSaveFailed {
        operation: Uuid,
        error: String,
    },
    DocumentDeleted,
    DocumentDeleteFailed {
        error: String,
    },
}
