//! MongoDB-backed store running driver futures on a dedicated runtime.

use mongodb::Client;
use mongodb::bson::{Document, doc};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::query::QueryContext;
use crate::store::RemoteStore;

/// Documents fetched per refresh page.
const PAGE_SIZE: i64 = 50;

/// Executes document operations against a live MongoDB deployment.
///
/// The mediator's surface is synchronous; each call blocks on the owned
/// Tokio runtime while the driver future runs.
pub struct MongoStore {
    runtime: Runtime,
    client: Client,
    events: UnboundedSender<StoreEvent>,
}

impl MongoStore {
    /// Connect and verify the deployment answers a ping.
    pub fn connect(uri: &str, events: UnboundedSender<StoreEvent>) -> Result<Self> {
        let runtime = Runtime::new()?;
        let client = runtime.block_on(async {
            let client = Client::with_uri_str(uri).await?;
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            Ok::<Client, mongodb::error::Error>(client)
        })?;

        Ok(Self { runtime, client, events })
    }

    /// Fetch one page of documents plus the filtered total.
    pub fn find_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<(Vec<Document>, u64)> {
        use futures::TryStreamExt;

        let client = self.client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);

            let total = coll.count_documents(filter.clone()).await?;

            let mut options = mongodb::options::FindOptions::default();
            options.skip = Some(skip);
            options.limit = Some(limit);

            let cursor = coll.find(filter).with_options(options).await?;
            let documents: Vec<Document> = cursor.try_collect().await?;

            Ok((documents, total))
        })
    }
}

impl RemoteStore for MongoStore {
    fn remove(&self, filter: Document, database: &str, collection: &str) -> Result<()> {
        let client = self.client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            coll.delete_one(filter).await?;
            Ok(())
        })
    }

    fn save(&self, document: Document, database: &str, collection: &str) -> Result<()> {
        let client = self.client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            match document.get("_id") {
                Some(id) => {
                    let id = id.clone();
                    coll.replace_one(doc! { "_id": id }, document).upsert(true).await?;
                }
                None => {
                    coll.insert_one(document).await?;
                }
            }
            Ok(())
        })
    }

    fn insert(&self, document: Document, database: &str, collection: &str) -> Result<()> {
        let client = self.client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            coll.insert_one(document).await?;
            Ok(())
        })
    }

    fn rerun_query(&self, skip: u64, context: &QueryContext) -> Result<()> {
        if !context.is_bound() {
            return Ok(());
        }

        let (documents, total) = self.find_documents(
            context.database(),
            context.collection(),
            Document::new(),
            skip,
            PAGE_SIZE,
        )?;

        let _ = self.events.send(StoreEvent::DocumentsLoaded {
            database: context.database().to_string(),
            collection: context.collection().to_string(),
            documents,
            total,
        });
        Ok(())
    }
}
