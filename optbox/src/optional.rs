//! The optional value container.
//!
//! See the [`OptionalBox`] type for more information.

use core::{
	fmt,
	hash::{Hash, Hasher},
	mem, ptr,
};

use crate::{BadOptionalAccess, Slot, Transition};

/// A box that either holds exactly one `T` or holds nothing, with the
/// value stored inline (no heap allocation).
///
/// The box's footprint is that of `T` plus a presence flag. Values are
/// constructed directly into the box's storage and destroyed in place;
/// each transition from empty to holding runs exactly one construction,
/// and each transition from holding to empty runs exactly one destruction.
///
/// # Access
/// Two access paths are provided:
///
/// - [`OptionalBox::value`] / [`OptionalBox::value_mut`] check for presence
///   and report absence as [`BadOptionalAccess`].
/// - [`OptionalBox::get_unchecked`] / [`OptionalBox::get_unchecked_mut`]
///   perform no check at all. They are for call sites that have already
///   proven the box is holding a value; calling them on an empty box is
///   undefined behavior.
///
/// # Moves
/// A Rust move of the box itself (`let b = a;`) is destructive and always
/// available. In addition, [`OptionalBox::move_from`] and
/// [`OptionalBox::move_assign`] move the *value* out of another box while
/// leaving that box holding a moved-from value (`T::default()`) rather than
/// emptying it.
///
/// # Failure
/// Failures of `T`'s own operations are propagated untouched. A constructor
/// that fails (or panics) never leaves a half-constructed value behind. The
/// one documented exception to "state is preserved on failure" is
/// [`OptionalBox::try_emplace_with`] (and a panicking
/// [`OptionalBox::emplace_with`]): the previous value has already been
/// destroyed, so the box is left empty.
pub struct OptionalBox<T> {
	/// Inline storage for the value.
	slot:    Slot<T>,
	/// `true` iff `slot` holds a live, fully constructed `T`.
	present: bool,
}

impl<T> OptionalBox<T> {
	/// Creates an empty box. The storage is not touched.
	#[inline]
	#[must_use]
	pub const fn new() -> Self {
		Self {
			slot:    Slot::uninit(),
			present: false,
		}
	}

	/// Creates a box holding `value`.
	#[must_use]
	pub fn from_value(value: T) -> Self {
		let mut this = Self::new();
		this.construct(value, Transition::Construct);
		this
	}

	/// Creates a box holding the value produced by `f`.
	///
	/// If `f` panics, no box is created and nothing is leaked.
	#[must_use]
	pub fn new_with<F>(f: F) -> Self
	where
		F: FnOnce() -> T,
	{
		Self::from_value(f())
	}

	/// Creates a box holding the value produced by a fallible constructor.
	///
	/// The constructor's error is returned unchanged.
	pub fn try_new_with<F, E>(f: F) -> Result<Self, E>
	where
		F: FnOnce() -> Result<T, E>,
	{
		f().map(Self::from_value)
	}

	/// Creates a box by moving the value out of `source`.
	///
	/// If `source` is holding a value, the new box holds that value and
	/// `source` **remains holding** a moved-from value, `T::default()`.
	/// If `source` is empty, the new box is empty too.
	#[must_use]
	pub fn move_from(source: &mut Self) -> Self
	where
		T: Default,
	{
		let mut this = Self::new();
		if let Some(donor) = source.as_mut() {
			this.construct(mem::take(donor), Transition::MoveConstruct);
		}
		this
	}

	/// Returns `true` if the box holds a value.
	#[inline]
	#[must_use]
	pub const fn has_value(&self) -> bool {
		self.present
	}

	/// Returns a reference to the held value, or [`BadOptionalAccess`] if
	/// the box is empty.
	#[inline]
	pub const fn value(&self) -> Result<&T, BadOptionalAccess> {
		if self.present {
			// SAFETY: `present` is only set while the slot holds a live value.
			Ok(unsafe { self.slot.assume_init_ref() })
		} else {
			Err(BadOptionalAccess)
		}
	}

	/// Returns a mutable reference to the held value, or
	/// [`BadOptionalAccess`] if the box is empty.
	#[inline]
	pub const fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
		if self.present {
			// SAFETY: `present` is only set while the slot holds a live value.
			Ok(unsafe { self.slot.assume_init_mut() })
		} else {
			Err(BadOptionalAccess)
		}
	}

	/// Returns a reference to the held value without checking for presence.
	///
	/// # Safety
	/// The box must be holding a value. Calling this on an empty box is
	/// undefined behavior; debug builds will panic instead.
	#[inline(always)]
	#[must_use]
	pub unsafe fn get_unchecked(&self) -> &T {
		debug_assert!(self.present, "get_unchecked() called on an empty OptionalBox");
		// SAFETY: The caller guarantees the box holds a value.
		unsafe { self.slot.assume_init_ref() }
	}

	/// Returns a mutable reference to the held value without checking for
	/// presence.
	///
	/// # Safety
	/// The box must be holding a value. Calling this on an empty box is
	/// undefined behavior; debug builds will panic instead.
	#[inline(always)]
	#[must_use]
	pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
		debug_assert!(
			self.present,
			"get_unchecked_mut() called on an empty OptionalBox"
		);
		// SAFETY: The caller guarantees the box holds a value.
		unsafe { self.slot.assume_init_mut() }
	}

	/// Returns a raw pointer to the box's storage, whether or not it holds
	/// a value.
	///
	/// Dereferencing the pointer is only valid while the box holds a value
	/// and is neither moved, reset, re-emplaced, reassigned empty nor
	/// dropped.
	#[inline(always)]
	#[must_use]
	pub const fn as_ptr(&self) -> *const T {
		self.slot.as_ptr()
	}

	/// Returns a mutable raw pointer to the box's storage, whether or not it
	/// holds a value.
	///
	/// See [`OptionalBox::as_ptr`] for validity rules.
	#[inline(always)]
	#[must_use]
	pub const fn as_mut_ptr(&mut self) -> *mut T {
		self.slot.as_mut_ptr()
	}

	/// Returns the held value as an `Option<&T>`.
	#[inline]
	#[must_use]
	pub const fn as_ref(&self) -> Option<&T> {
		match self.value() {
			Ok(value) => Some(value),
			Err(BadOptionalAccess) => None,
		}
	}

	/// Returns the held value as an `Option<&mut T>`.
	#[inline]
	#[must_use]
	pub const fn as_mut(&mut self) -> Option<&mut T> {
		match self.value_mut() {
			Ok(value) => Some(value),
			Err(BadOptionalAccess) => None,
		}
	}

	/// Assigns `value` to the box.
	///
	/// If the box is holding a value, that value is assigned over (Rust
	/// assignment: the old value is dropped and replaced in the same
	/// storage). Otherwise `value` is constructed into the storage.
	pub fn assign(&mut self, value: T) -> &mut T {
		if let Some(held) = self.as_mut() {
			trace_transition!(Transition::Assign, T);
			*held = value;
		} else {
			self.construct(value, Transition::Construct);
		}

		// SAFETY: Both branches above leave the box holding a value.
		unsafe { self.get_unchecked_mut() }
	}

	/// Assigns a copy of `value` to the box.
	///
	/// If the box is holding a value, it is updated through
	/// [`Clone::clone_from`], reusing its resources where `T` supports it.
	/// Otherwise a clone of `value` is constructed into the storage.
	pub fn assign_clone(&mut self, value: &T) -> &mut T
	where
		T: Clone,
	{
		if let Some(held) = self.as_mut() {
			trace_transition!(Transition::Assign, T);
			held.clone_from(value);
		} else {
			self.construct(value.clone(), Transition::Clone);
		}

		// SAFETY: Both branches above leave the box holding a value.
		unsafe { self.get_unchecked_mut() }
	}

	/// Move-assigns from `source`, mirroring its presence.
	///
	/// - `source` empty: this box is reset.
	/// - both holding: this box's value is assigned the value taken from
	///   `source`.
	/// - only `source` holding: the value taken from `source` is
	///   constructed into this box.
	///
	/// In every holding case `source` **remains holding** a moved-from
	/// value, `T::default()`. Assigning a box to itself is a no-op.
	pub fn move_assign(&mut self, source: &mut Self)
	where
		T: Default,
	{
		if ptr::eq(self, source) {
			return;
		}

		let Some(donor) = source.as_mut() else {
			self.reset();
			return;
		};

		let value = mem::take(donor);
		if let Some(held) = self.as_mut() {
			trace_transition!(Transition::MoveAssign, T);
			*held = value;
		} else {
			self.construct(value, Transition::MoveConstruct);
		}
	}

	/// Destroys the held value, if any, leaving the box empty.
	///
	/// Calling this on an empty box does nothing.
	pub fn reset(&mut self) {
		if self.present {
			trace_transition!(Transition::Reset, T);
			// SAFETY: The value is live; the flag is cleared first so that
			// SAFETY: a panicking destructor can't cause a second drop.
			unsafe {
				self.destroy();
			}
		}
	}

	/// Destroys the held value, if any, then constructs `value` in its place.
	pub fn emplace(&mut self, value: T) -> &mut T {
		self.discard();
		self.construct(value, Transition::Emplace)
	}

	/// Destroys the held value, if any, then constructs the value produced
	/// by `f` in its place.
	///
	/// The old value is destroyed **before** `f` runs. If `f` panics, the
	/// box is left empty.
	pub fn emplace_with<F>(&mut self, f: F) -> &mut T
	where
		F: FnOnce() -> T,
	{
		self.discard();
		self.construct(f(), Transition::Emplace)
	}

	/// Destroys the held value, if any, then constructs the value produced
	/// by a fallible constructor in its place.
	///
	/// The old value is destroyed **before** `f` runs. If `f` fails, its
	/// error is returned unchanged and the box is left empty; the previous
	/// value is not restored.
	pub fn try_emplace_with<F, E>(&mut self, f: F) -> Result<&mut T, E>
	where
		F: FnOnce() -> Result<T, E>,
	{
		self.discard();
		let value = f()?;
		Ok(self.construct(value, Transition::Emplace))
	}

	/// Moves the held value out, leaving the box empty.
	///
	/// No destructor runs; ownership of the value passes to the caller.
	pub fn take(&mut self) -> Option<T> {
		if !self.present {
			return None;
		}

		trace_transition!(Transition::Take, T);
		self.present = false;
		// SAFETY: The value was live and the flag has been cleared, so the
		// SAFETY: storage won't be read or dropped again until re-written.
		Some(unsafe { self.slot.assume_init_read() })
	}

	/// Stores `value`, returning the previously held value, if any.
	pub fn replace(&mut self, value: T) -> Option<T> {
		let previous = self.take();
		self.construct(value, Transition::Construct);
		previous
	}

	/// Converts the box into an `Option<T>`.
	#[must_use]
	pub fn into_option(mut self) -> Option<T> {
		self.take()
	}

	/// Constructs `value` into the (empty) storage and marks the box as
	/// holding it.
	///
	/// The flag is only set once the value is in place.
	fn construct(&mut self, value: T, transition: Transition) -> &mut T {
		debug_assert!(!self.present, "construct() would overwrite a live value");
		trace_transition!(transition, T);
		let value = self.slot.write(value);
		self.present = true;
		value
	}

	/// Destroys the held value, if any, without reporting a transition.
	///
	/// Used where the destruction is part of a larger transition (emplace).
	fn discard(&mut self) {
		if self.present {
			// SAFETY: The value is live.
			unsafe {
				self.destroy();
			}
		}
	}

	/// Clears the presence flag, then runs the held value's destructor.
	///
	/// # Safety
	/// The box must be holding a value.
	unsafe fn destroy(&mut self) {
		debug_assert!(self.present, "destroy() called on an empty OptionalBox");
		self.present = false;
		// SAFETY: The caller guarantees the value is live. The flag is
		// SAFETY: already cleared, so it will never be dropped again.
		unsafe {
			self.slot.assume_init_drop();
		}
	}
}

impl<T> Drop for OptionalBox<T> {
	fn drop(&mut self) {
		if self.present {
			trace_transition!(Transition::Drop, T);
			// SAFETY: The value is live.
			unsafe {
				self.destroy();
			}
		}
	}
}

impl<T> Default for OptionalBox<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for OptionalBox<T> {
	fn clone(&self) -> Self {
		let mut this = Self::new();
		if let Some(value) = self.as_ref() {
			this.construct(value.clone(), Transition::Clone);
		}
		this
	}

	/// Copy-assigns from `source`, mirroring its presence.
	///
	/// - `source` empty: this box is reset.
	/// - both holding: this box's value is updated via
	///   [`Clone::clone_from`].
	/// - only `source` holding: a clone of its value is constructed into
	///   this box.
	///
	/// Assigning a box to itself is a no-op.
	fn clone_from(&mut self, source: &Self) {
		if ptr::eq(self, source) {
			return;
		}

		match source.as_ref() {
			None => self.reset(),
			Some(value) => {
				self.assign_clone(value);
			}
		}
	}
}

impl<T> From<T> for OptionalBox<T> {
	#[inline]
	fn from(value: T) -> Self {
		Self::from_value(value)
	}
}

impl<T> From<Option<T>> for OptionalBox<T> {
	fn from(value: Option<T>) -> Self {
		value.map_or_else(Self::new, Self::from_value)
	}
}

impl<T> From<OptionalBox<T>> for Option<T> {
	#[inline]
	fn from(value: OptionalBox<T>) -> Self {
		value.into_option()
	}
}

impl<T: fmt::Debug> fmt::Debug for OptionalBox<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.as_ref() {
			Some(value) => f.debug_tuple("Some").field(value).finish(),
			None => f.write_str("None"),
		}
	}
}

impl<T: PartialEq> PartialEq for OptionalBox<T> {
	fn eq(&self, other: &Self) -> bool {
		self.as_ref() == other.as_ref()
	}
}

impl<T: Eq> Eq for OptionalBox<T> {}

impl<T: Hash> Hash for OptionalBox<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_ref().hash(state);
	}
}
