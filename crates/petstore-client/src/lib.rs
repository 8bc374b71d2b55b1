//! petstore-client: typed client and test data for the pet-store HTTP API
//!
//! The client wraps the pet endpoints (create, read, update, delete,
//! find-by-status, form update) of a swagger-petstore-shaped service. Every
//! call returns an [`ApiResponse`] with the observed status code, elapsed
//! time, and raw body; assertions live in the test suite, not the client.
//!
//! ```ignore
//! use petstore_client::{PetStoreClient, PUBLIC_BASE_URL, data};
//!
//! # async fn demo() -> petstore_client::Result<()> {
//! let client = PetStoreClient::new(PUBLIC_BASE_URL)?;
//! let pet = data::valid_pet(data::CRUD_PET_ID);
//! let created = client.create_pet(&pet).await?;
//! assert_eq!(created.status, 200);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod data;
pub mod error;
pub mod model;

pub use client::{ApiResponse, PUBLIC_BASE_URL, PetStoreClient};
pub use error::{Error, Result};
pub use model::{Category, Pet, Status, Tag, validate_pet_structure};
