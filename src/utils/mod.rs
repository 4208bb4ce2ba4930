pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{default_projects_dir, get_claude_dir};
pub use paths::{ProjectPathDecoder, encode_project_dir_name};
pub use terminal::sanitize_for_terminal;
