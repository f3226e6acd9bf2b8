//! Raw inline storage for a single value.
//!
//! See the [`Slot`] type for more information.

use core::mem::MaybeUninit;

use crate::assert;

/// Uninitialized, inline storage sized and aligned for exactly one `T`.
///
/// A `Slot` never knows whether it holds a live value; that bookkeeping
/// belongs to whoever owns the slot (see [`crate::OptionalBox`]). The slot
/// only provides the in-place construction and destruction primitives.
///
/// Dropping a `Slot` never drops its contents.
#[repr(transparent)]
pub struct Slot<T> {
	/// The storage. Only ever interpreted as a `T` through the
	/// `assume_init_*` methods, after a [`Slot::write`].
	storage: MaybeUninit<T>,
}

impl<T> Slot<T> {
	/// Creates a new slot with no live value in it.
	#[inline(always)]
	#[must_use]
	pub const fn uninit() -> Self {
		const { assert::layout_eq::<Slot<T>, T>() };

		Self {
			storage: MaybeUninit::uninit(),
		}
	}

	/// Constructs `value` in place and returns a reference to it.
	///
	/// Any value previously living in the slot is overwritten **without**
	/// being dropped. Callers that track liveness must destroy the previous
	/// value first (see [`Slot::assume_init_drop`]).
	#[inline(always)]
	pub fn write(&mut self, value: T) -> &mut T {
		self.storage.write(value)
	}

	/// Returns a raw pointer to the storage.
	///
	/// The pointer is always aligned and non-null. Reading through it is
	/// only valid while the slot holds a live value.
	#[inline(always)]
	#[must_use]
	pub const fn as_ptr(&self) -> *const T {
		self.storage.as_ptr()
	}

	/// Returns a mutable raw pointer to the storage.
	///
	/// The pointer is always aligned and non-null. Reading through it is
	/// only valid while the slot holds a live value.
	#[inline(always)]
	#[must_use]
	pub const fn as_mut_ptr(&mut self) -> *mut T {
		self.storage.as_mut_ptr()
	}

	/// Returns a reference to the live value.
	///
	/// # Safety
	/// The slot must hold a live value.
	#[inline(always)]
	#[must_use]
	pub const unsafe fn assume_init_ref(&self) -> &T {
		// SAFETY: The caller guarantees the slot holds a live value.
		unsafe { self.storage.assume_init_ref() }
	}

	/// Returns a mutable reference to the live value.
	///
	/// # Safety
	/// The slot must hold a live value.
	#[inline(always)]
	#[must_use]
	pub const unsafe fn assume_init_mut(&mut self) -> &mut T {
		// SAFETY: The caller guarantees the slot holds a live value.
		unsafe { self.storage.assume_init_mut() }
	}

	/// Moves the live value out of the slot.
	///
	/// # Safety
	/// The slot must hold a live value. After this call the slot must be
	/// treated as empty; the bytes still look like a `T` but ownership has
	/// moved to the caller, so neither reading nor dropping it again is
	/// permitted.
	#[inline(always)]
	#[must_use]
	pub const unsafe fn assume_init_read(&self) -> T {
		// SAFETY: The caller guarantees the slot holds a live value and
		// SAFETY: that it won't be used again until re-written.
		unsafe { self.storage.assume_init_read() }
	}

	/// Runs the destructor of the live value in place.
	///
	/// # Safety
	/// The slot must hold a live value. After this call the slot must be
	/// treated as empty.
	#[inline(always)]
	pub unsafe fn assume_init_drop(&mut self) {
		// SAFETY: The caller guarantees the slot holds a live value and
		// SAFETY: that it won't be used again until re-written.
		unsafe {
			self.storage.assume_init_drop();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::Cell, rc::Rc};

	use super::*;

	struct Counted(Rc<Cell<usize>>);

	impl Drop for Counted {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	#[test]
	fn test_layout_matches_contained_type() {
		assert_eq!(size_of::<Slot<u8>>(), size_of::<u8>());
		assert_eq!(size_of::<Slot<[u64; 3]>>(), size_of::<[u64; 3]>());
		assert_eq!(align_of::<Slot<u128>>(), align_of::<u128>());
		assert_eq!(size_of::<Slot<String>>(), size_of::<String>());
	}

	#[test]
	fn test_storage_pointer_is_aligned() {
		let slot = Slot::<u64>::uninit();
		assert!(slot.as_ptr().is_aligned());
	}

	#[test]
	fn test_write_then_read_back() {
		let mut slot = Slot::uninit();
		*slot.write(String::from("oro")) += "!";
		// SAFETY: Written just above.
		let value = unsafe { slot.assume_init_read() };
		assert_eq!(value, "oro!");
	}

	#[test]
	fn test_dropping_slot_does_not_drop_contents() {
		let drops = Rc::new(Cell::new(0));
		let mut slot = Slot::uninit();
		slot.write(Counted(drops.clone()));
		// SAFETY: Written just above.
		let counted = unsafe { slot.assume_init_read() };
		drop(slot);
		assert_eq!(drops.get(), 0);
		drop(counted);
		assert_eq!(drops.get(), 1);
	}

	#[test]
	fn test_assume_init_drop_runs_destructor_once() {
		let drops = Rc::new(Cell::new(0));
		let mut slot = Slot::uninit();
		slot.write(Counted(drops.clone()));
		// SAFETY: Written just above, and not used afterwards.
		unsafe {
			slot.assume_init_drop();
		}
		assert_eq!(drops.get(), 1);
	}
}
