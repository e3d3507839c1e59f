pub mod error;
pub mod reader;
pub mod writer;

pub use error::{FileError, Result};
pub use reader::{load_matrix, parse_matrix};
pub use writer::{format_matrix, write_matrix, write_to};
