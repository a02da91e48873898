// src/lib.rs
//! A thin async connection wrapper and CRUD layer over the MongoDB Rust
//! driver.
//!
//! [`MongoStorage`] opens a client from a connection string, verifies the
//! deployment answers a ping, and hands out [`Crud`] facades bound to one
//! collection each. Every facade operation is a single delegated round trip
//! to the driver; filters, options and results pass through untouched.
//!
//! ```no_run
//! use bson::oid::ObjectId;
//! use mongo_storage::MongoStorage;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
//!     id: Option<ObjectId>,
//!     name: String,
//! }
//!
//! # async fn run() -> mongo_storage::Result<()> {
//! let storage = MongoStorage::connect("mongodb://localhost:27017")
//!     .await?
//!     .with_database("app");
//! let users = storage.collection::<User>("users");
//!
//! let mut user = User { id: None, name: "ada".into() };
//! users.save(None, &mut user).await?;
//! let stored = users.get(user.id.unwrap()).await?;
//! # Ok(())
//! # }
//! ```

mod crud;
mod error;
mod storage;

pub use crud::Crud;
pub use error::{Result, StorageError};
pub use storage::MongoStorage;
