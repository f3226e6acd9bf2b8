//! Lifecycle tracing.
//!
//! Every state transition of an [`crate::OptionalBox`] is reported as a
//! single `trace`-level record on the `optbox` log target, formatted as
//! `"{transition}: {type_name}"`.
//!
//! Tracing is only compiled in when the `log` feature is enabled (it is
//! by default). Without it, `trace_transition!` expands to nothing
//! beyond naming the transition.

use core::fmt;

/// The log target used for all lifecycle records.
#[cfg(feature = "log")]
pub(crate) const TARGET: &str = "optbox";

/// A lifecycle transition of an [`crate::OptionalBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
	/// A value was constructed into empty storage.
	Construct,
	/// A value was constructed as a clone of another box's value.
	Clone,
	/// A value was constructed by moving out of another box's value,
	/// leaving the donor holding a moved-from value.
	MoveConstruct,
	/// A held value was assigned over (no destruction of the storage).
	Assign,
	/// A held value was assigned by moving out of another box's value.
	MoveAssign,
	/// A held value was destroyed and the box emptied.
	Reset,
	/// A value was constructed in place, after destroying any previous one.
	Emplace,
	/// A held value was moved out to the caller without being destroyed.
	Take,
	/// The box was dropped while holding a value.
	Drop,
}

impl Transition {
	/// Returns the stable, lowercase name of the transition.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Construct => "construct",
			Self::Clone => "clone",
			Self::MoveConstruct => "move-construct",
			Self::Assign => "assign",
			Self::MoveAssign => "move-assign",
			Self::Reset => "reset",
			Self::Emplace => "emplace",
			Self::Take => "take",
			Self::Drop => "drop",
		}
	}
}

impl fmt::Display for Transition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Emits a lifecycle record for the given transition and contained type.
///
/// Usage: `trace_transition!(Transition::Reset, T)`.
#[cfg(feature = "log")]
macro_rules! trace_transition {
	($transition:expr, $T:ty) => {{
		::log::trace!(
			target: $crate::trace::TARGET,
			"{}: {}",
			$transition,
			::core::any::type_name::<$T>()
		);
	}};
}

/// Emits a lifecycle record for the given transition and contained type.
///
/// No-op; the `log` feature is disabled.
#[cfg(not(feature = "log"))]
macro_rules! trace_transition {
	($transition:expr, $T:ty) => {{
		let _: $crate::Transition = $transition;
	}};
}
