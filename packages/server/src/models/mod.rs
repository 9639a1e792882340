pub mod coach;
pub mod object;
pub mod shared;
pub mod upload;
pub mod video;
