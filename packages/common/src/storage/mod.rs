mod error;
mod traits;

pub mod key;
pub mod memory;

#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::{GatewayError, GatewayResult};
pub use traits::{BlobGateway, ObjectEntry};
