use std::path::PathBuf;

use crate::error::{Error, Result};

/// Exports the variables of the nearest `.env` file.
///
/// Variables already set in the environment win. A missing file is not an error.
pub fn load() -> Result<()> { accept_missing(dotenvy::dotenv()) }

fn accept_missing(result: dotenvy::Result<PathBuf>) -> Result<()> {
    match result {
        Ok(_path) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(source) => Err(Error::LoadEnvFile { source }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn load_from(path: &Path) -> Result<()> {
        accept_missing(dotenvy::from_path(path).map(|()| path.to_path_buf()))
    }

    fn write_env_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("visitor-beacon-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_ignored() {
        assert!(load_from(Path::new("/nonexistent/visitor-beacon/.env")).is_ok());
    }

    #[test]
    fn test_variables_are_exported() {
        let path = write_env_file("valid.env", "VISITOR_BEACON_ENV_FILE_TEST=loaded\n");

        load_from(&path).unwrap();
        assert_eq!(std::env::var("VISITOR_BEACON_ENV_FILE_TEST").unwrap(), "loaded");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = write_env_file("malformed.env", "not a valid line\n");

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, Error::LoadEnvFile { .. }));

        std::fs::remove_file(path).unwrap();
    }
}
