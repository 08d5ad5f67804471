use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{debug, trace, warn};

use opt_core::app::env;
use opt_core::app::tracing::AppTracingBuilder;
use opt_core::{Optional, OptionalError};

/// Environment variable holding the path of the log file. No file is written if unset.
const LOG_FILE_ENV: &str = "OPT_CLI_LOG_FILE";
/// Prefix marking an argument that must parse as an integer.
const REQUIRED_PREFIX: char = '+';

fn main() -> Result<(), Box<dyn Error>> {
  let dotenv = env::load_dotenv_into_env();
  let _tracing = AppTracingBuilder::default()
    .with_log_file_path_opt(env::var_opt(LOG_FILE_ENV))
    .build();
  match dotenv {
    Ok(Some(path)) => debug!("loaded environment from '{}'", path.display()),
    Ok(None) => {}
    Err(cause) => warn!(%cause, "failed to load `.env` file"),
  }

  let args: Vec<String> = std::env::args().skip(1).collect();
  if args.is_empty() {
    println!("{}", Optional::<i64>::empty());
    return Ok(());
  }
  for arg in &args {
    let report = Report::from_arg(arg)?;
    println!("{}", report);
  }
  Ok(())
}


#[derive(Debug, thiserror::Error)]
#[error("Argument '{arg}' is required to be an integer")]
struct RequiredArgError {
  arg: String,
  #[source]
  source: OptionalError,
}

/// The results of running one argument through a pipeline of combinators.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Report<'a> {
  arg: &'a str,
  parsed: Optional<i64>,
  doubled: Optional<i64>,
  halved: Optional<i64>,
  value_or_zero: i64,
}
impl<'a> Report<'a> {
  /// Creates a report for `arg`. Arguments starting with [`REQUIRED_PREFIX`] must parse; others may be absent.
  fn from_arg(arg: &'a str) -> Result<Self, RequiredArgError> {
    if let Some(required) = arg.strip_prefix(REQUIRED_PREFIX) {
      let parsed = Optional::try_of(parse(required))
        .map_err(|source| RequiredArgError { arg: arg.to_string(), source })?;
      Ok(Self::new(arg, parsed))
    } else {
      Ok(Self::new(arg, Optional::of_nullable(parse(arg))))
    }
  }

  fn new(arg: &'a str, parsed: Optional<i64>) -> Self {
    parsed.if_present(|value| trace!(arg, value, "parsed argument"));
    Self {
      arg,
      parsed,
      doubled: parsed.map(|value| value.saturating_mul(2)),
      halved: parsed.flat_map(halve),
      value_or_zero: parsed.or_else(0),
    }
  }
}
impl Display for Report<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}: parsed={} doubled={} halved={} value_or_zero={}",
      self.arg, self.parsed, self.doubled, self.halved, self.value_or_zero
    )
  }
}

fn parse(arg: &str) -> Option<i64> {
  arg.trim().parse().ok()
}

/// Halves even numbers; odd numbers have no integer half.
fn halve(value: i64) -> Optional<i64> {
  Optional::of(value).filter(|value| value % 2 == 0).map(|value| value / 2)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn even_argument() {
    let report = Report::from_arg("42").unwrap();
    assert_eq!(report.parsed, Optional::of(42));
    assert_eq!(report.doubled, Optional::of(84));
    assert_eq!(report.halved, Optional::of(21));
    assert_eq!(report.value_or_zero, 42);
    assert_eq!(report.to_string(), "42: parsed=Optional[42] doubled=Optional[84] halved=Optional[21] value_or_zero=42");
  }

  #[test]
  fn odd_argument_has_no_half() {
    let report = Report::from_arg("7").unwrap();
    assert_eq!(report.halved, Optional::empty());
    assert_eq!(report.to_string(), "7: parsed=Optional[7] doubled=Optional[14] halved=Optional.Empty value_or_zero=7");
  }

  #[test]
  fn zero_argument_is_present() {
    let report = Report::from_arg("0").unwrap();
    assert_eq!(report.parsed, Optional::of(0));
    assert_eq!(report.halved, Optional::of(0));
  }

  #[test]
  fn non_integer_argument_is_absent() {
    let report = Report::from_arg("Hello").unwrap();
    assert!(report.parsed.is_absent());
    assert!(report.doubled.is_absent());
    assert!(report.halved.is_absent());
    assert_eq!(report.value_or_zero, 0);
    assert_eq!(report.to_string(), "Hello: parsed=Optional.Empty doubled=Optional.Empty halved=Optional.Empty value_or_zero=0");
  }

  #[test]
  fn required_argument() {
    let report = Report::from_arg("+8").unwrap();
    assert_eq!(report.parsed, Optional::of(8));

    let error = Report::from_arg("+eight").unwrap_err();
    assert_eq!(error.arg, "+eight");
    assert_eq!(error.source, OptionalError::InvalidArgument);
    assert_eq!(error.to_string(), "Argument '+eight' is required to be an integer");
  }

  #[test]
  fn doubling_saturates() {
    assert_eq!(Report::from_arg(&i64::MAX.to_string()).unwrap().doubled, Optional::of(i64::MAX));
  }
}
