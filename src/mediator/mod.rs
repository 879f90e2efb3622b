//! Document command mediation: menu policy and per-command protocols.

mod capabilities;
mod menu;

pub use capabilities::*;
pub use menu::*;

use mongodb::bson::doc;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::bson::{document_to_editable_string, id_display_text};
use crate::events::StoreEvent;
use crate::query::QueryContext;
use crate::settings::FormattingSettings;
use crate::store::RemoteStore;

/// Template shown by the Insert editor, cursor placed inside the braces.
const INSERT_TEMPLATE: &str = "{\n    \n}";
const INSERT_CURSOR: CursorPosition = CursorPosition { line: 1, column: 4 };

const MISSING_ID_WARNING: &str = "Selected document doesn't have _id field. \n\
    Maybe this is a system document that should be managed in a special way?";

/// What a command invocation did. Precondition misses and user aborts are
/// ordinary values, never propagated faults; the shell is free to ignore
/// everything but `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran to completion.
    Done,
    /// Edit accepted; the save was issued and the refresh will run when the
    /// completion notification arrives.
    AwaitingSave,
    NoSelection,
    ReadOnly,
    NotScalar,
    MissingId,
    Declined,
    Cancelled,
    AlreadyPending,
    Failed(String),
}

/// The one outstanding edit-save completion being awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSave {
    operation: Uuid,
}

/// Sequences document commands through confirmation, remote execution and
/// result refresh.
///
/// One mediator exists per executed query, alongside its [`QueryContext`].
/// All commands run on the single-threaded UI loop; only the edit-save tail
/// is asynchronous, completed by [`DocumentMediator::handle_event`] when the
/// shell pumps the event channel.
pub struct DocumentMediator {
    context: QueryContext,
    settings: FormattingSettings,
    selection: Box<dyn SelectionProvider>,
    store: Box<dyn RemoteStore>,
    confirm: Box<dyn ConfirmationUi>,
    editor: Box<dyn DocumentEditor>,
    clipboard: Box<dyn Clipboard>,
    events: UnboundedSender<StoreEvent>,
    pending_save: Option<PendingSave>,
}

impl DocumentMediator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: QueryContext,
        settings: FormattingSettings,
        selection: Box<dyn SelectionProvider>,
        store: Box<dyn RemoteStore>,
        confirm: Box<dyn ConfirmationUi>,
        editor: Box<dyn DocumentEditor>,
        clipboard: Box<dyn Clipboard>,
        events: UnboundedSender<StoreEvent>,
    ) -> Self {
        Self {
            context,
            settings,
            selection,
            store,
            confirm,
            editor,
            clipboard,
            events,
            pending_save: None,
        }
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    /// Whether an edit-save completion is still being awaited.
    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Entries for the document context menu, given the current selection.
    pub fn menu(&self) -> Vec<MenuEntry> {
        let node = self.selection.selected_node();
        build_menu(MenuState::for_selection(node.as_ref(), &self.context))
    }

    /// Run one command's protocol.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::EditDocument => self.edit_document(),
            Command::ViewDocument => self.view_document(),
            Command::InsertDocument => self.insert_document(),
            Command::CopyValue => self.copy_value(),
            Command::DeleteDocument => self.delete_document(),
        }
    }

    /// React to a completion notification pumped in by the shell.
    ///
    /// The edit-save refresh runs here, not in the command's own call chain.
    pub fn handle_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::DocumentSaved { operation } => {
                if self.take_pending(*operation) {
                    self.refresh();
                }
            }
            StoreEvent::DocumentSaveFailed { operation, .. } => {
                self.take_pending(*operation);
            }
            _ => {}
        }
    }

    fn delete_document(&mut self) -> CommandOutcome {
        if !self.context.is_bound() {
            return CommandOutcome::ReadOnly;
        }
        let Some(node) = self.selection.selected_node() else {
            return CommandOutcome::NoSelection;
        };

        let Some(id) = node.root().get("_id") else {
            // Deleting by anything other than the identifier risks removing
            // unintended documents.
            self.confirm.warn("Cannot delete", MISSING_ID_WARNING);
            return CommandOutcome::MissingId;
        };

        let id_text = id_display_text(id, &self.settings);
        let message = format!("Delete Document with id: {id_text}?");
        if self.confirm.confirm("Delete", &message) == Confirmation::Declined {
            return CommandOutcome::Declined;
        }

        let filter = doc! { "_id": id.clone() };
        if let Err(e) =
            self.store.remove(filter, self.context.database(), self.context.collection())
        {
            log::error!("Failed to delete document: {}", e);
            let _ = self.events.send(StoreEvent::DocumentDeleteFailed { error: e.to_string() });
            return CommandOutcome::Failed(e.to_string());
        }

        let _ = self.events.send(StoreEvent::DocumentDeleted);
        self.refresh();
        CommandOutcome::Done
    }

    fn edit_document(&mut self) -> CommandOutcome {
        if !self.context.is_bound() {
            return CommandOutcome::ReadOnly;
        }
        let Some(node) = self.selection.selected_node() else {
            return CommandOutcome::NoSelection;
        };
        if self.pending_save.is_some() {
            // A previous save's completion is still outstanding.
            return CommandOutcome::AlreadyPending;
        }

        let outcome = self.editor.open(EditorRequest {
            server: self.context.server_address().to_string(),
            database: self.context.database().to_string(),
            collection: self.context.collection().to_string(),
            initial_text: document_to_editable_string(node.root(), &self.settings),
            read_only: false,
            cursor: None,
        });

        let EditorOutcome::Accepted(document) = outcome else {
            return CommandOutcome::Cancelled;
        };

        let operation = Uuid::new_v4();
        self.pending_save = Some(PendingSave { operation });

        match self.store.save(document, self.context.database(), self.context.collection()) {
            Ok(()) => {
                let _ = self.events.send(StoreEvent::DocumentSaved { operation });
                CommandOutcome::AwaitingSave
            }
            Err(e) => {
                self.pending_save = None;
                log::error!("Failed to save document: {}", e);
                let _ = self.events.send(StoreEvent::DocumentSaveFailed {
                    operation,
                    error: e.to_string(),
                });
                CommandOutcome::Failed(e.to_string())
            }
        }
    }

    fn view_document(&mut self) -> CommandOutcome {
        let Some(node) = self.selection.selected_node() else {
            return CommandOutcome::NoSelection;
        };

        let (server, database, collection) = self.context.display_labels();
        // Display-only and non-modal; the outcome carries nothing.
        self.editor.open(EditorRequest {
            server: server.to_string(),
            database: database.to_string(),
            collection: collection.to_string(),
            initial_text: document_to_editable_string(node.root(), &self.settings),
            read_only: true,
            cursor: None,
        });
        CommandOutcome::Done
    }

    fn insert_document(&mut self) -> CommandOutcome {
        if !self.context.is_bound() {
            return CommandOutcome::ReadOnly;
        }

        let outcome = self.editor.open(EditorRequest {
            server: self.context.server_address().to_string(),
            database: self.context.database().to_string(),
            collection: self.context.collection().to_string(),
            initial_text: INSERT_TEMPLATE.to_string(),
            read_only: false,
            cursor: Some(INSERT_CURSOR),
        });

        let EditorOutcome::Accepted(document) = outcome else {
            return CommandOutcome::Cancelled;
        };

        if let Err(e) =
            self.store.insert(document, self.context.database(), self.context.collection())
        {
            log::error!("Failed to insert document: {}", e);
            let _ = self.events.send(StoreEvent::DocumentInsertFailed { error: e.to_string() });
            return CommandOutcome::Failed(e.to_string());
        }

        let _ = self.events.send(StoreEvent::DocumentInserted);
        self.refresh();
        CommandOutcome::Done
    }

    fn copy_value(&mut self) -> CommandOutcome {
        let Some(node) = self.selection.selected_node() else {
            return CommandOutcome::NoSelection;
        };
        let Some(text) = node.text_value(&self.settings) else {
            return CommandOutcome::NotScalar;
        };

        if let Err(e) = self.clipboard.set_text(&text) {
            log::warn!("Failed to copy value to clipboard: {}", e);
            return CommandOutcome::Failed(e.to_string());
        }
        CommandOutcome::Done
    }

    /// Re-issue the original query so the visible result set refreshes.
    ///
    /// Fire-and-forget: issued after the mutating call returned, not after
    /// the remote effect is confirmed persisted.
    fn refresh(&self) {
        if let Err(e) = self.store.rerun_query(0, &self.context) {
            log::warn!("Failed to refresh query results: {}", e);
        }
    }

    /// Consume the pending slot if `operation` is the awaited one.
    fn take_pending(&mut self, operation: Uuid) -> bool {
        match self.pending_save {
            Some(pending) if pending.operation == operation => {
                self.pending_save = None;
                true
            }
            _ => false,
        }
    }
}
