pub mod data_url;
pub mod gallery;
pub mod session;
