pub mod project;
pub mod types;

pub use project::{parse_project_content, parse_project_file, ProjectFormat};
pub use types::{Project, RecordedTest, Step};
