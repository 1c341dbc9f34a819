pub mod collections;
pub mod connection;
pub mod posts;
pub mod users;

pub use collections::CollectionName;
pub use connection::{connect_with_retry, MongoDb};
