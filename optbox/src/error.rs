//! The container's sole error type.

/// Checked access was requested on an empty [`crate::OptionalBox`].
///
/// Returned by [`crate::OptionalBox::value`] and
/// [`crate::OptionalBox::value_mut`]. Failures of the contained type's own
/// constructors or destructors are never translated into this error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, thiserror::Error)]
#[error("bad optional access")]
pub struct BadOptionalAccess;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(BadOptionalAccess.to_string(), "bad optional access");
	}

	#[test]
	fn test_is_core_error() {
		fn takes_error(_: &dyn core::error::Error) {}
		takes_error(&BadOptionalAccess);
	}
}
