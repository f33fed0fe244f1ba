pub mod crypto;
pub mod filename;
pub mod time;
