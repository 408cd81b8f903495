use std::path::{Path, PathBuf};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Loads `.env` from the working directory or its parents into the process
/// environment. Must run before the subscriber reads `LOG_LEVEL`.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Like [`load_dotenv`] for an explicit file. Variables already set win.
pub fn load_dotenv_from<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    dotenvy::from_path(path).ok().map(|_| path.to_path_buf())
}

/// Settings read once at startup from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chrome/Chromium executable, auto-detected when unset.
    pub chrome_location: Option<PathBuf>,
    pub headless: bool,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            chrome_location: non_empty("CHROME_LOCATION").map(PathBuf::from),
            headless: non_empty("BROWSER_HEADLESS")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
            user_agent: non_empty("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}
