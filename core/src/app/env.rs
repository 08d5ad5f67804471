use std::path::PathBuf;

/// Loads variables from a `.env` file in the working directory or its ancestors into the process environment.
/// Variables that are already set are kept.
///
/// Returns the path of the loaded file, or `None` if there is no `.env` file.
pub fn load_dotenv_into_env() -> Result<Option<PathBuf>, dotenvy::Error> {
  not_found_as_none(dotenvy::dotenv())
}

fn not_found_as_none(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, dotenvy::Error> {
  match result {
    Ok(path) => Ok(Some(path)),
    Err(cause) if cause.not_found() => Ok(None),
    Err(cause) => Err(cause),
  }
}

/// Gets environment variable `key`, or `None` if it is unset or empty.
pub fn var_opt(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
  use std::io;
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn missing_dotenv_is_none() {
    let missing = Err(dotenvy::Error::Io(io::Error::from(io::ErrorKind::NotFound)));
    assert!(matches!(not_found_as_none(missing), Ok(None)));
  }

  #[test]
  fn loaded_dotenv_is_some() {
    let loaded = not_found_as_none(Ok(PathBuf::from(".env"))).unwrap();
    assert_eq!(loaded, Some(PathBuf::from(".env")));
  }

  #[test]
  fn other_dotenv_errors_are_kept() {
    let denied = Err(dotenvy::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied)));
    assert!(matches!(not_found_as_none(denied), Err(dotenvy::Error::Io(_))));
    let malformed = Err(dotenvy::Error::LineParse("KEY VALUE".to_string(), 4));
    assert!(matches!(not_found_as_none(malformed), Err(dotenvy::Error::LineParse(..))));
  }

  #[test]
  fn var_opt_treats_empty_as_unset() {
    std::env::set_var("OPT_CORE_TEST_VAR_OPT_EMPTY", "");
    std::env::set_var("OPT_CORE_TEST_VAR_OPT_SET", "log.txt");
    assert_eq!(var_opt("OPT_CORE_TEST_VAR_OPT_EMPTY"), None);
    assert_eq!(var_opt("OPT_CORE_TEST_VAR_OPT_SET"), Some("log.txt".to_string()));
    assert_eq!(var_opt("OPT_CORE_TEST_VAR_OPT_UNSET"), None);
  }
}
