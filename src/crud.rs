// src/crud.rs
use std::time::Duration;

use bson::oid::ObjectId;
use bson::{doc, Document};
use log::debug;
use mongodb::options::{
    CreateIndexOptions, DeleteOptions, FindOneOptions, FindOptions, IndexOptions,
};
use mongodb::results::DeleteResult;
use mongodb::{Collection, Cursor, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StorageError};

/// Server-side cap on index creation.
const INDEX_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed CRUD facade over a single collection.
///
/// Documents are identified by an `_id` of type [`ObjectId`]; model it as
/// `Option<ObjectId>` with `skip_serializing_if = "Option::is_none"` so the
/// server assigns ids on insert.
pub struct Crud<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
}

impl<T> Crud<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub(crate) fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Name of the collection this facade is bound to.
    pub fn name(&self) -> &str {
        self.collection.name()
    }

    /// Raw driver handle, for operations the facade does not wrap.
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Fetches the document with `_id == id`.
    pub async fn get(&self, id: ObjectId) -> Result<T> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| StorageError::NotFound {
                collection: self.collection.name().to_owned(),
                id,
            })
    }

    /// Inserts `item` when `id` is `None`, otherwise `$set`s its fields on
    /// the document with that id. On insert the stored document is read back
    /// into `item`, so the caller ends up holding the assigned id.
    ///
    /// An update that matches no document still returns `Ok`.
    pub async fn save(&self, id: Option<ObjectId>, item: &mut T) -> Result<()> {
        match id {
            None => {
                let inserted = self.collection.insert_one(&*item).await?;
                let id = inserted
                    .inserted_id
                    .as_object_id()
                    .ok_or_else(|| StorageError::InvalidId(inserted.inserted_id.to_string()))?;
                *item = self.get(id).await?;
            }
            Some(id) => {
                let update = doc! { "$set": bson::to_document(item)? };
                self.collection
                    .update_one(doc! { "_id": id }, update)
                    .await?;
            }
        }
        Ok(())
    }

    /// Inserts every item and returns the assigned ids in input order.
    pub async fn insert_many(&self, items: impl IntoIterator<Item = T>) -> Result<Vec<ObjectId>> {
        let inserted = self.collection.insert_many(items).await?;
        let mut ids = Vec::with_capacity(inserted.inserted_ids.len());
        for index in 0..inserted.inserted_ids.len() {
            let id = inserted
                .inserted_ids
                .get(&index)
                .and_then(|id| id.as_object_id())
                .ok_or_else(|| {
                    StorageError::InvalidId(format!("missing ObjectId at input index {index}"))
                })?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Runs a query and returns the driver cursor over matching documents.
    pub async fn find(
        &self,
        filter: Document,
        options: impl Into<Option<FindOptions>>,
    ) -> Result<Cursor<T>> {
        Ok(self.collection.find(filter).with_options(options).await?)
    }

    /// Returns the first document matching `filter`, if any.
    pub async fn find_one(
        &self,
        filter: Document,
        options: impl Into<Option<FindOneOptions>>,
    ) -> Result<Option<T>> {
        Ok(self
            .collection
            .find_one(filter)
            .with_options(options)
            .await?)
    }

    /// Deletes the first document matching `filter`.
    pub async fn delete_one(
        &self,
        filter: Document,
        options: impl Into<Option<DeleteOptions>>,
    ) -> Result<DeleteResult> {
        Ok(self
            .collection
            .delete_one(filter)
            .with_options(options)
            .await?)
    }

    /// Number of documents matching `filter`.
    pub async fn count(&self, filter: Document) -> Result<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Creates a unique ascending index on `field` and returns its name.
    pub async fn ensure_index(&self, field: &str) -> Result<String> {
        self.ensure_index_raw(index_model(field)).await
    }

    /// Creates a caller-supplied index, capped at a fixed server-side
    /// timeout, and returns its name.
    pub async fn ensure_index_raw(&self, index: IndexModel) -> Result<String> {
        let options = CreateIndexOptions::builder()
            .max_time(INDEX_TIMEOUT)
            .build();
        let created = self
            .collection
            .create_index(index)
            .with_options(options)
            .await?;
        debug!(
            "created index {} on {}",
            created.index_name,
            self.collection.name()
        );
        Ok(created.index_name)
    }
}

fn index_model(field: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build()
}
