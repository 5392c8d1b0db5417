pub mod clipboard;
pub mod result_writer;
pub mod validation;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
pub use result_writer::ResultWriter;
pub use validation::{validate_file, validate_file_with_limit};
