use std::path::PathBuf;
use which::which;

/// Resolves the ping program on PATH (or as given, if it is a path).
/// Missing is not fatal: every probe will then classify as unreachable.
pub fn locate(program: &str) -> Option<PathBuf> {
    match which(program) {
        Ok(path) => {
            tracing::debug!("Found {}: {:?}", program, path);
            Some(path)
        }
        Err(e) => {
            tracing::debug!("Could not locate {}: {}", program, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        assert!(locate("hostping-no-such-ping-binary").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_shell() {
        assert!(locate("sh").is_some());
    }
}
