//! Context-menu policy for document commands.

use crate::mediator::DocumentNode;
use crate::query::QueryContext;

/// A document-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    EditDocument,
    ViewDocument,
    InsertDocument,
    CopyValue,
    DeleteDocument,
}

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Command::EditDocument => "Edit Document",
            Command::ViewDocument => "View Document",
            Command::InsertDocument => "Insert Document",
            Command::CopyValue => "Copy Value",
            Command::DeleteDocument => "Delete Document",
        }
    }
}

/// One rendered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Action(Command),
    Separator,
}

/// Inputs the menu policy depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub on_item: bool,
    pub editable: bool,
    pub is_simple: bool,
}

impl MenuState {
    pub fn new(on_item: bool, editable: bool, is_simple: bool) -> Self {
        Self { on_item, editable, is_simple }
    }

    /// Derive the menu state from the current selection and query context.
    pub fn for_selection(node: Option<&DocumentNode>, context: &QueryContext) -> Self {
        Self {
            on_item: node.is_some(),
            editable: context.is_bound(),
            is_simple: node.map(DocumentNode::is_simple).unwrap_or(false),
        }
    }
}

/// Build the ordered entry list for the document context menu.
///
/// Pure; safe to call on every menu-open event. The order is the display
/// order.
pub fn build_menu(state: MenuState) -> Vec<MenuEntry> {
    let MenuState { on_item, editable, is_simple } = state;
    let mut entries = Vec::new();

    if on_item && editable {
        entries.push(MenuEntry::Action(Command::EditDocument));
    }
    if on_item {
        entries.push(MenuEntry::Action(Command::ViewDocument));
    }
    if editable {
        entries.push(MenuEntry::Action(Command::InsertDocument));
    }
    if on_item && is_simple {
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Action(Command::CopyValue));
    }
    if on_item && editable {
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Action(Command::DeleteDocument));
    }

    entries
}
