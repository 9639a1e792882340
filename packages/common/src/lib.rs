pub mod storage;

pub use storage::{BlobGateway, GatewayError, ObjectEntry};
