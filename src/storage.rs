// src/storage.rs
use bson::doc;
use log::debug;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::crud::Crud;
use crate::error::{Result, StorageError};

/// Owns the MongoDB client and the name of the selected database.
///
/// Connection pooling and thread safety come from the driver; a
/// `MongoStorage` can be shared freely across tasks.
#[derive(Debug)]
pub struct MongoStorage {
    client: Client,
    database: String,
}

impl MongoStorage {
    /// Connects to `uri` and verifies the deployment answers a `ping`.
    pub async fn connect(uri: &str) -> Result<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| StorageError::Connection { source })?;
        let client = Client::with_options(options)
            .map_err(|source| StorageError::Connection { source })?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| StorageError::Connection { source })?;
        debug!("connected to MongoDB deployment");

        Ok(Self {
            client,
            database: String::new(),
        })
    }

    /// Selects the database used by [`collection`](Self::collection) and
    /// [`database`](Self::database).
    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database = name.into();
        self
    }

    /// Raw handle to the selected database.
    ///
    /// # Panics
    ///
    /// Panics if no database has been selected. A missing database name is a
    /// configuration bug, not a runtime condition.
    pub fn database(&self) -> Database {
        if self.database.is_empty() {
            panic!("database name is not defined");
        }
        self.client.database(&self.database)
    }

    /// Raw handle to the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns a CRUD facade bound to collection `name` in the selected
    /// database.
    ///
    /// # Panics
    ///
    /// Panics if no database has been selected, see [`database`](Self::database).
    pub fn collection<T>(&self, name: &str) -> Crud<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        Crud::new(self.database().collection::<T>(name))
    }

    /// Shuts the client down, draining the connection pool. Consuming `self`
    /// makes close-after-close unrepresentable.
    pub async fn close(self) {
        debug!("closing MongoDB connection");
        self.client.shutdown().await;
    }
}
