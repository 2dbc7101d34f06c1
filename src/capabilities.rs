use std::io::IsTerminal;
use std::path::PathBuf;

/// Environment facts detected once at startup and threaded into the
/// formatter and the cache instead of being probed ad hoc.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Whether stdout is an interactive terminal. Piped or redirected output
    /// gets no escape codes.
    pub color: bool,
    /// Platform cache directory for the current user, when one is known.
    pub cache_dir: Option<PathBuf>,
}

impl Capabilities {
    pub fn detect() -> Self {
        Capabilities {
            color: std::io::stdout().is_terminal(),
            cache_dir: dirs::cache_dir(),
        }
    }
}
