//! `.env` discovery.
//!
//! Variables already present in the process environment always win: dotenvy never
//! overwrites an existing variable. Only the first `.env` file found is loaded.

use crate::config::constants::config_files;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Candidate `.env` locations in precedence order: the working directory, then home.
pub fn dotenv_candidates(current_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![current_dir.join(config_files::DOTENV_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(config_files::DOTENV_FILE_NAME));
    }
    candidates
}

/// Load the first `.env` file found among [`dotenv_candidates`].
///
/// Returns the path that was loaded. A file that exists but cannot be parsed is
/// reported and skipped, it never aborts startup.
pub fn load_dotenv(current_dir: &Path) -> Option<PathBuf> {
    for candidate in dotenv_candidates(current_dir) {
        if !candidate.is_file() {
            continue;
        }
        match dotenvy::from_path(&candidate) {
            Ok(()) => {
                debug!(path = %candidate.display(), "loaded environment file");
                return Some(candidate);
            }
            Err(err) => {
                warn!(path = %candidate.display(), error = %err, "failed to load environment file");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_directory_comes_first() {
        let cwd = Path::new("/tmp/project");
        let candidates = dotenv_candidates(cwd);
        assert_eq!(candidates[0], cwd.join(".env"));
    }
}
