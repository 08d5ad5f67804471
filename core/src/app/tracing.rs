use std::fs::{create_dir_all, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the console log filter.
pub const CONSOLE_LOG_ENV: &str = "CONSOLE_LOG";
/// Environment variable holding the file log filter.
pub const FILE_LOG_ENV: &str = "FILE_LOG";

#[derive(Default)]
pub struct AppTracingBuilder {
  log_file_path: Option<PathBuf>,
}
impl AppTracingBuilder {
  pub fn with_log_file_path_opt(mut self, log_file_path: Option<impl Into<PathBuf>>) -> Self {
    self.log_file_path = log_file_path.map(Into::into);
    self
  }

  /// Installs the global subscriber. Must be called at most once per process.
  pub fn build(self) -> AppTracing {
    let console_filter = env_filter(CONSOLE_LOG_ENV);
    let file = self.log_file_path.map(|path| (path, env_filter(FILE_LOG_ENV)));
    AppTracing::new(console_filter, file)
  }
}

fn env_filter(env: &str) -> EnvFilter {
  EnvFilter::try_from_env(env).unwrap_or_default()
}

/// Keeps the file writer alive; drop it last to flush buffered log lines.
pub struct AppTracing {
  _file_tracing: FileTracing,
}
#[cfg(feature = "app_tracing_file")]
#[derive(Default)]
struct FileTracing {
  _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}
#[cfg(not(feature = "app_tracing_file"))]
#[derive(Default)]
struct FileTracing;

impl AppTracing {
  fn new(console_filter: EnvFilter, file: Option<(PathBuf, EnvFilter)>) -> Self {
    let layered = tracing_subscriber::registry()
      .with(
        tracing_subscriber::fmt::layer()
          .with_writer(io::stderr)
          .with_filter(console_filter)
      );

    let Some((file_path, file_filter)) = file else {
      layered.init();
      return Self { _file_tracing: FileTracing::default() };
    };

    #[cfg(feature = "app_tracing_file")] {
      match create_log_file(&file_path) {
        Err(cause) => {
          layered.init();
          tracing::warn!(%cause, "cannot log to file '{}'; continuing with console logging only", file_path.display());
          Self { _file_tracing: FileTracing::default() }
        }
        Ok(log_file) => {
          let (non_blocking, guard) = tracing_appender::non_blocking(io::BufWriter::new(log_file));
          layered
            .with(
              tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter)
            )
            .init();
          Self { _file_tracing: FileTracing { _guard: Some(guard) } }
        }
      }
    }
    #[cfg(not(feature = "app_tracing_file"))] {
      let _ = file_filter;
      layered.init();
      tracing::warn!("cannot log to file '{}'; file logging is not enabled in this build", file_path.display());
      Self { _file_tracing: FileTracing::default() }
    }
  }
}

#[cfg_attr(not(feature = "app_tracing_file"), allow(dead_code))]
fn create_log_file(file_path: &Path) -> Result<File, io::Error> {
  if let Some(parent) = file_path.parent() {
    create_dir_all(parent)?;
  }
  File::create(file_path)
}


#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::create_log_file;

  #[test]
  fn create_log_file_creates_parent_directories() {
    let directory = tempfile::tempdir().unwrap();
    let file_path = directory.path().join("logs").join("nested").join("log.txt");

    let mut file = create_log_file(&file_path).unwrap();
    file.write_all(b"line").unwrap();

    assert!(file_path.parent().unwrap().is_dir());
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "line");
  }

  #[test]
  fn create_log_file_truncates_existing_file() {
    let directory = tempfile::tempdir().unwrap();
    let file_path = directory.path().join("log.txt");
    std::fs::write(&file_path, "previous run").unwrap();

    create_log_file(&file_path).unwrap();

    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "");
  }
}
