//! Narrow contracts the mediator consumes from its UI collaborators.

use mongodb::bson::{Bson, Document};

use crate::bson::{is_simple_value, scalar_text};
use crate::error::{Error, Result};
use crate::settings::FormattingSettings;

/// A selected element of the rendered result tree.
///
/// An owned snapshot: the mediator reads it during a single command
/// invocation and never keeps a reference into the widget's model.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    root: Document,
    value: Bson,
}

impl DocumentNode {
    pub fn new(root: Document, value: Bson) -> Self {
        Self { root, value }
    }

    /// The root document this node belongs to.
    pub fn root(&self) -> &Document {
        &self.root
    }

    /// The node's own value.
    pub fn value(&self) -> &Bson {
        &self.value
    }

    /// Whether the value is a simple scalar (UUID-typed binary included).
    pub fn is_simple(&self) -> bool {
        is_simple_value(&self.value)
    }

    /// Textual rendering of a scalar value, `None` for documents and arrays.
    pub fn text_value(&self, settings: &FormattingSettings) -> Option<String> {
        scalar_text(&self.value, settings)
    }
}

/// Supplies the currently selected node, if any.
pub trait SelectionProvider {
    fn selected_node(&self) -> Option<DocumentNode>;
}

/// Outcome of a modal confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

/// Modal confirmation and warning dialogs.
pub trait ConfirmationUi {
    /// Ask a yes/no question; blocks until the user answers.
    fn confirm(&self, title: &str, message: &str) -> Confirmation;

    /// Show a non-fatal warning.
    fn warn(&self, title: &str, message: &str);
}

/// Initial cursor placement inside the editor, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

/// What the editor dialog is opened with.
#[derive(Debug, Clone)]
pub struct EditorRequest {
    pub server: String,
    pub database: String,
    pub collection: String,
    pub initial_text: String,
    pub read_only: bool,
    pub cursor: Option<CursorPosition>,
}

/// Result of an editor session. Accepted text arrives already parsed; the
/// editor validates syntax before allowing accept.
#[derive(Debug, Clone)]
pub enum EditorOutcome {
    Cancelled,
    Accepted(Document),
}

/// The document text-editor dialog.
pub trait DocumentEditor {
    fn open(&self, request: EditorRequest) -> EditorOutcome;
}

/// Process-wide clipboard.
pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// `arboard`-backed system clipboard.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}
