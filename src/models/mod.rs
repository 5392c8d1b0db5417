pub mod analysis;
pub mod document;
pub mod task;

pub use analysis::{AnalysisRequest, AnalysisResult, HealthResponse, ProcessResponse, UploadResponse};
pub use document::{format_file_size, DocumentFile};
pub use task::{Language, Task};
