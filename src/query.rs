//! Scope of an executed query.

/// Describes the server/database/collection scope a result set came from.
///
/// A bound context denotes a single addressable collection and enables the
/// mutating commands; an unbound context (aggregation or cross-collection
/// results) is read-only. Created once per executed query and immutable for
/// the lifetime of the displayed result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    server_address: String,
    database: String,
    collection: String,
    bound: bool,
}

impl QueryContext {
    /// Context for a query addressing exactly one collection.
    pub fn bound(
        server_address: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            database: database.into(),
            collection: collection.into(),
            bound: true,
        }
    }

    /// Context for an ad-hoc result set not tied to one collection.
    pub fn unbound(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            database: String::new(),
            collection: String::new(),
            bound: false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Labels shown by display surfaces; empty strings when unbound.
    pub fn display_labels(&self) -> (&str, &str, &str) {
        if self.bound {
            (&self.server_address, &self.database, &self.collection)
        } else {
            ("", "", "")
        }
    }
}
