use thiserror::Error;

/// Misuse of an [`Optional`](crate::optional::Optional).
///
/// Both variants signal a logic error in the caller, not a transient condition, so retrying the same call yields
/// the same error.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Error)]
pub enum OptionalError {
  /// A null value was passed where a value is required.
  #[error("Value cannot be null")]
  InvalidArgument,
  /// A value was requested from an absent optional.
  #[error("No value present")]
  IllegalState,
}
