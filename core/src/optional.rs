use std::any::type_name;
use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::error::OptionalError;

/// A value that is either present or absent.
///
/// Presence is decided by the variant alone, never by comparing the held value against some default: an
/// `Optional::of(0)` is present. Callers that do want a default to stand in for absence must ask for it explicitly
/// through [of_non_default](Self::of_non_default).
///
/// An optional is immutable: no method changes an existing optional, each combinator returns a new one. Absent orders
/// before present.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Optional<T> {
  Absent,
  Present(T),
}


impl<T> Optional<T> {
  /// Creates a present optional holding `value`.
  #[inline]
  pub const fn of(value: T) -> Self { Self::Present(value) }

  /// Creates a present optional from a nullable `value`.
  ///
  /// Returns [`OptionalError::InvalidArgument`] if `value` is `None`. Use this when absence would be a programming
  /// error on the caller's side; use [of_nullable](Self::of_nullable) when absence is expected.
  pub fn try_of(value: Option<T>) -> Result<Self, OptionalError> {
    match value {
      Some(value) => Ok(Self::Present(value)),
      None => {
        debug!(type_name = type_name::<T>(), "rejected null value for present optional");
        Err(OptionalError::InvalidArgument)
      }
    }
  }

  /// Creates an optional that is present if `value` is `Some`, and absent otherwise.
  #[inline]
  pub fn of_nullable(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::Present(value),
      None => Self::Absent,
    }
  }

  /// Creates an absent optional.
  #[inline]
  pub const fn empty() -> Self { Self::Absent }
}

impl<T: Default + PartialEq> Optional<T> {
  /// Creates an optional that is absent if `value` equals `T::default()`, and present otherwise.
  ///
  /// This treats the default as a sentinel, so a caller that means a real `0` or `""` gets an absent optional.
  #[inline]
  pub fn of_non_default(value: T) -> Self {
    if value == T::default() { Self::Absent } else { Self::Present(value) }
  }
}

impl<T> Default for Optional<T> {
  #[inline]
  fn default() -> Self { Self::Absent }
}


impl<T> Optional<T> {
  #[inline]
  pub const fn is_present(&self) -> bool { matches!(self, Self::Present(_)) }
  #[inline]
  pub const fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  /// Returns the held value, or [`OptionalError::IllegalState`] if absent.
  pub fn get(self) -> Result<T, OptionalError> {
    match self {
      Self::Present(value) => Ok(value),
      Self::Absent => Err(Self::absent_error()),
    }
  }

  /// Returns a reference to the held value, or [`OptionalError::IllegalState`] if absent.
  pub fn get_ref(&self) -> Result<&T, OptionalError> {
    match self {
      Self::Present(value) => Ok(value),
      Self::Absent => Err(Self::absent_error()),
    }
  }

  fn absent_error() -> OptionalError {
    debug!(type_name = type_name::<T>(), "requested value of absent optional");
    OptionalError::IllegalState
  }

  /// Returns the held value, or `fallback` if absent. `fallback` is evaluated by the caller regardless of presence;
  /// use [or_else_get](Self::or_else_get) to only produce it when needed. Note that this is the eager form, unlike
  /// [`Option::or_else`] which takes a closure; `Option::unwrap_or` is the counterpart of this method.
  #[inline]
  pub fn or_else(self, fallback: T) -> T {
    match self {
      Self::Present(value) => value,
      Self::Absent => fallback,
    }
  }

  /// Returns the held value, or the result of calling `fallback` if absent. `fallback` is not called when present.
  #[inline]
  pub fn or_else_get(self, fallback: impl FnOnce() -> T) -> T {
    match self {
      Self::Present(value) => value,
      Self::Absent => fallback(),
    }
  }

  /// Calls `action` with the held value if present; does nothing if absent.
  #[inline]
  pub fn if_present(&self, action: impl FnOnce(&T)) {
    if let Self::Present(value) = self {
      action(value);
    }
  }

  #[inline]
  pub fn ok_or_else<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
    match self {
      Self::Present(value) => Ok(value),
      Self::Absent => Err(error()),
    }
  }
}


impl<T> Optional<T> {
  /// Maps the held value with `mapper` into a present optional, or returns an absent optional without calling
  /// `mapper`.
  #[inline]
  pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> Optional<U> {
    match self {
      Self::Present(value) => Optional::Present(mapper(value)),
      Self::Absent => Optional::Absent,
    }
  }

  /// Like [map](Self::map), but the result is absent when `mapper` returns `U::default()`. See
  /// [of_non_default](Self::of_non_default).
  #[inline]
  pub fn map_non_default<U: Default + PartialEq>(self, mapper: impl FnOnce(T) -> U) -> Optional<U> {
    match self {
      Self::Present(value) => Optional::of_non_default(mapper(value)),
      Self::Absent => Optional::Absent,
    }
  }

  /// Returns the optional produced by `mapper` for the held value, or an absent optional without calling `mapper`.
  ///
  /// Unlike [map](Self::map), the result of `mapper` is returned as-is instead of being wrapped again, so chains of
  /// fallible steps stop at the first absent one.
  #[inline]
  pub fn flat_map<U>(self, mapper: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
    match self {
      Self::Present(value) => mapper(value),
      Self::Absent => Optional::Absent,
    }
  }

  /// Returns `self` if present and `predicate` holds for the held value, and an absent optional otherwise.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self {
      Self::Present(value) => if predicate(&value) { Self::Present(value) } else { Self::Absent },
      Self::Absent => Self::Absent,
    }
  }

  /// Returns `self` if present, and `other` otherwise.
  #[inline]
  pub fn or(self, other: Self) -> Self {
    match self {
      Self::Present(_) => self,
      Self::Absent => other,
    }
  }

  /// Returns `self` if present, and the result of calling `other` otherwise.
  #[inline]
  pub fn or_get(self, other: impl FnOnce() -> Self) -> Self {
    match self {
      Self::Present(_) => self,
      Self::Absent => other(),
    }
  }
}


impl<T> Optional<T> {
  #[inline]
  pub const fn as_ref(&self) -> Optional<&T> {
    match self {
      Self::Present(value) => Optional::Present(value),
      Self::Absent => Optional::Absent,
    }
  }

  #[inline]
  pub fn into_option(self) -> Option<T> { self.into() }
}

impl<T> From<Option<T>> for Optional<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::of_nullable(value) }
}

impl<T> From<Optional<T>> for Option<T> {
  #[inline]
  fn from(optional: Optional<T>) -> Self {
    match optional {
      Optional::Present(value) => Some(value),
      Optional::Absent => None,
    }
  }
}

impl<T> IntoIterator for Optional<T> {
  type Item = T;
  type IntoIter = std::option::IntoIter<T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.into_option().into_iter() }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
  type Item = &'a T;
  type IntoIter = std::option::IntoIter<&'a T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.as_ref().into_option().into_iter() }
}

impl<T: Display> Display for Optional<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::Present(value) => write!(f, "Optional[{}]", value),
      Self::Absent => f.write_str("Optional.Empty"),
    }
  }
}
