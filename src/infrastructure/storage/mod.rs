pub mod error;
pub mod gateway;
#[cfg(test)]
pub mod memory;
pub mod s3;
pub mod store;

pub use error::StorageError;
pub use gateway::{BucketRole, StorageGateway};
