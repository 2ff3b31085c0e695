use std::path::PathBuf;

/// Global configuration shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(api_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            session_file,
        }
    }
}
