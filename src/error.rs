// src/error.rs
use bson::oid::ObjectId;
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Connecting or pinging the deployment failed at open.
    #[error("unable to connect to MongoDB: {source}")]
    Connection {
        #[source]
        source: mongodb::error::Error,
    },

    /// A by-id lookup matched no document.
    #[error("no document with id {id} in collection {collection}")]
    NotFound { collection: String, id: ObjectId },

    /// The driver reported an inserted id that is not an ObjectId.
    #[error("inserted id is not an ObjectId: {0}")]
    InvalidId(String),

    #[error("BSON serialization failed: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// Any other driver error, propagated unchanged.
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}
