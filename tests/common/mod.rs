//! Shared fakes for mediator integration tests.
//!
//! Every capability the mediator consumes is replaced by a recording or
//! scripted implementation, so each test can assert exactly which remote
//! calls and dialogs a command produced.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use mongodb::bson::{Bson, Document};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use documango::error::{Error, Result};
use documango::mediator::{
    Clipboard, Confirmation, ConfirmationUi, DocumentEditor, DocumentMediator, DocumentNode,
    EditorOutcome, EditorRequest, SelectionProvider,
};
use documango::store::RemoteStore;
use documango::{FormattingSettings, QueryContext, StoreEvent};

/// Route mediator log output through the test harness.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Remove { filter: Document, database: String, collection: String },
    Save { document: Document, database: String, collection: String },
    Insert { document: Document, database: String, collection: String },
    RerunQuery { skip: u64 },
}

struct RecordingStore {
    calls: Rc<RefCell<Vec<StoreCall>>>,
    fail_mutations: bool,
}

impl RecordingStore {
    fn result(&self) -> Result<()> {
        if self.fail_mutations {
            Err(Error::Parse("simulated store failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for RecordingStore {
    fn remove(&self, filter: Document, database: &str, collection: &str) -> Result<()> {
        self.calls.borrow_mut().push(StoreCall::Remove {
            filter,
            database: database.to_string(),
            collection: collection.to_string(),
        });
        self.result()
    }

    fn save(&self, document: Document, database: &str, collection: &str) -> Result<()> {
        self.calls.borrow_mut().push(StoreCall::Save {
            document,
            database: database.to_string(),
            collection: collection.to_string(),
        });
        self.result()
    }

    fn insert(&self, document: Document, database: &str, collection: &str) -> Result<()> {
        self.calls.borrow_mut().push(StoreCall::Insert {
            document,
            database: database.to_string(),
            collection: collection.to_string(),
        });
        self.result()
    }

    fn rerun_query(&self, skip: u64, _context: &QueryContext) -> Result<()> {
        self.calls.borrow_mut().push(StoreCall::RerunQuery { skip });
        Ok(())
    }
}

struct StaticSelection {
    node: Option<DocumentNode>,
}

impl SelectionProvider for StaticSelection {
    fn selected_node(&self) -> Option<DocumentNode> {
        self.node.clone()
    }
}

struct ScriptedConfirm {
    answer: Confirmation,
    questions: Rc<RefCell<Vec<String>>>,
    warnings: Rc<RefCell<Vec<String>>>,
}

impl ConfirmationUi for ScriptedConfirm {
    fn confirm(&self, _title: &str, message: &str) -> Confirmation {
        self.questions.borrow_mut().push(message.to_string());
        self.answer
    }

    fn warn(&self, _title: &str, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

struct ScriptedEditor {
    outcome: EditorOutcome,
    requests: Rc<RefCell<Vec<EditorRequest>>>,
}

impl DocumentEditor for ScriptedEditor {
    fn open(&self, request: EditorRequest) -> EditorOutcome {
        self.requests.borrow_mut().push(request);
        self.outcome.clone()
    }
}

struct MemoryClipboard {
    text: Rc<RefCell<Option<String>>>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        *self.text.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// A mediator wired to fakes, with handles into everything they recorded.
pub struct Harness {
    pub mediator: DocumentMediator,
    pub store_calls: Rc<RefCell<Vec<StoreCall>>>,
    pub editor_requests: Rc<RefCell<Vec<EditorRequest>>>,
    pub questions: Rc<RefCell<Vec<String>>>,
    pub warnings: Rc<RefCell<Vec<String>>>,
    pub clipboard_text: Rc<RefCell<Option<String>>>,
    pub events: UnboundedReceiver<StoreEvent>,
}

impl Harness {
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub struct HarnessBuilder {
    context: QueryContext,
    settings: FormattingSettings,
    node: Option<DocumentNode>,
    answer: Confirmation,
    editor_outcome: EditorOutcome,
    fail_mutations: bool,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            context: QueryContext::bound("localhost:27017", "test_db", "test_collection"),
            settings: FormattingSettings::default(),
            node: None,
            answer: Confirmation::Accepted,
            editor_outcome: EditorOutcome::Cancelled,
            fail_mutations: false,
        }
    }

    pub fn context(mut self, context: QueryContext) -> Self {
        self.context = context;
        self
    }

    pub fn unbound(self) -> Self {
        self.context(QueryContext::unbound("localhost:27017"))
    }

    pub fn settings(mut self, settings: FormattingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn selection(mut self, node: DocumentNode) -> Self {
        self.node = Some(node);
        self
    }

    pub fn decline_confirmations(mut self) -> Self {
        self.answer = Confirmation::Declined;
        self
    }

    pub fn editor_accepts(mut self, document: Document) -> Self {
        self.editor_outcome = EditorOutcome::Accepted(document);
        self
    }

    pub fn failing_store(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn build(self) -> Harness {
        let store_calls = Rc::new(RefCell::new(Vec::new()));
        let editor_requests = Rc::new(RefCell::new(Vec::new()));
        let questions = Rc::new(RefCell::new(Vec::new()));
        let warnings = Rc::new(RefCell::new(Vec::new()));
        let clipboard_text = Rc::new(RefCell::new(None));
        let (sender, events) = unbounded_channel();

        let mediator = DocumentMediator::new(
            self.context,
            self.settings,
            Box::new(StaticSelection { node: self.node }),
            Box::new(RecordingStore {
                calls: store_calls.clone(),
                fail_mutations: self.fail_mutations,
            }),
            Box::new(ScriptedConfirm {
                answer: self.answer,
                questions: questions.clone(),
                warnings: warnings.clone(),
            }),
            Box::new(ScriptedEditor {
                outcome: self.editor_outcome,
                requests: editor_requests.clone(),
            }),
            Box::new(MemoryClipboard { text: clipboard_text.clone() }),
            sender,
        );

        Harness {
            mediator,
            store_calls,
            editor_requests,
            questions,
            warnings,
            clipboard_text,
            events,
        }
    }
}

/// A node whose value is its own root document.
pub fn document_node(root: Document) -> DocumentNode {
    let value = Bson::Document(root.clone());
    DocumentNode::new(root, value)
}

/// A node selecting one scalar value inside `root`.
pub fn scalar_node(root: Document, value: Bson) -> DocumentNode {
    DocumentNode::new(root, value)
}
