//! Compile-time layout assertions.
//!
//! Typical usage is to reference one of the one-off functions in a `const`
//! context (or via `() = ...;` at the top of a generic function) so that
//! monomorphization fails for any type for which the assertion does not hold.
//!
//! Must not depend on any other module of this crate.

/// Asserts that two types have the same size.
///
/// # Safety
/// The assertion **does not trigger** unless the `ASSERT` associated
/// constant is referenced. There's, unfortunately, no great way
/// to enforce this at the type level.
unsafe trait AssertSizeEq<U: Sized>: Sized {
	/// Performs the assertion that two types have the same size.
	///
	/// This must be referenced somewhere in the code at each usage site,
	/// like so:
	///
	/// ```rust
	/// () = <T as AssertSizeEq<U>>::ASSERT;
	/// ```
	const ASSERT: () = assert!(
		size_of::<Self>() == size_of::<U>(),
		"types do not have the same size"
	);
}

// SAFETY: The assertion is referenced by every public entry point below.
unsafe impl<T: Sized, U: Sized> AssertSizeEq<U> for T {}

/// Asserts that two types have the same alignment requirement.
///
/// # Safety
/// The assertion **does not trigger** unless the `ASSERT` associated
/// constant is referenced.
unsafe trait AssertAlignEq<U: Sized>: Sized {
	/// Performs the assertion that two types have the same alignment.
	///
	/// ```rust
	/// () = <T as AssertAlignEq<U>>::ASSERT;
	/// ```
	const ASSERT: () = assert!(
		align_of::<Self>() == align_of::<U>(),
		"types do not have the same alignment"
	);
}

// SAFETY: The assertion is referenced by every public entry point below.
unsafe impl<T: Sized, U: Sized> AssertAlignEq<U> for T {}

/// One-off assertion that two types have the same size.
pub const fn size_eq<T: Sized, U: Sized>() {
	() = <T as AssertSizeEq<U>>::ASSERT;
}

/// One-off assertion that two types have the same alignment.
pub const fn align_eq<T: Sized, U: Sized>() {
	// This is a sanity check; it should always be true.
	// If it's not, a language-level guarantee has been violated.
	() = assert!(
		align_of::<T>().is_power_of_two(),
		"(sanity check) type has non-power-of-two alignment!"
	);
	() = <T as AssertAlignEq<U>>::ASSERT;
}

/// One-off assertion that `Storage` can hold exactly one `T` in place:
/// same size and same alignment.
pub const fn layout_eq<Storage: Sized, T: Sized>() {
	size_eq::<Storage, T>();
	align_eq::<Storage, T>();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layout_eq_accepts_identical_layouts() {
		const { layout_eq::<u64, i64>() };
		const { layout_eq::<[u32; 4], [f32; 4]>() };
		const { layout_eq::<core::mem::MaybeUninit<(u8, u128)>, (u8, u128)>() };
	}
}
