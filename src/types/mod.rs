pub mod book;
pub mod cover;
pub mod key;
pub mod result_set;
