//! Reference counted text buffer.

use core::fmt;
use core::ops::Deref;
use core::ptr;
use core::slice;

use crate::errors::ClaimError;
use crate::header::{self, SystemAlloc, FLAG_REF_COUNTED};
use crate::shared::SharedArray;
use crate::text::TextSlice;
use crate::textarray::TextArray;
use crate::utf::{CodeUnit, Fragment};

/// A [`SharedArray`] of code units that preserves the terminating zero
/// unit of the [`TextArray`] it was built from.
///
/// Like its element-generic counterpart, the shape is fixed, cloning is an
/// owner count bump, equality is pointer identity, and the type is
/// `!Send`/`!Sync` because the count is not atomic.
pub struct SharedText<C: CodeUnit> {
    inner: SharedArray<C>,
}

pub type SharedUtf8 = SharedText<u8>;
pub type SharedUtf16 = SharedText<u16>;
pub type SharedUtf32 = SharedText<u32>;

impl<C: CodeUnit> SharedText<C> {
    pub const fn new() -> Self {
        SharedText {
            inner: SharedArray::new(),
        }
    }

    /// Builds a counted text buffer by transcoding `src`.
    pub fn from_units<S: CodeUnit>(src: &[S]) -> Self {
        TextArray::<C, 0>::from_units(src).into()
    }

    /// Builds a counted text buffer from a view of any width.
    pub fn from_text<S: CodeUnit>(src: TextSlice<'_, S>) -> Self {
        Self::from_units(src.as_slice())
    }

    /// Builds a counted text buffer by concatenating fragments.
    pub fn concat(frags: &[Fragment<'_>]) -> Self {
        TextArray::<C, 0>::concat(frags).into()
    }

    /// Builds a counted text buffer from `core::fmt` arguments.
    pub fn format(args: fmt::Arguments<'_>) -> Self {
        TextArray::<C, 0>::format(args).into()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn as_units(&self) -> &[C] {
        self.inner.as_slice()
    }

    /// The contents including the terminating zero unit. Empty for an
    /// empty buffer, which references no storage and so carries no
    /// terminator.
    pub fn c_units(&self) -> &[C] {
        if self.inner.is_empty() {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.inner.raw_ptr(), self.inner.len() + 1) }
    }

    /// A text view of the contents.
    pub fn view(&self) -> TextSlice<'_, C> {
        TextSlice::from_units(self.as_units())
    }

    pub fn use_count(&self) -> usize {
        self.inner.use_count()
    }

    pub fn is_unique(&self) -> bool {
        self.inner.is_unique()
    }

    /// Releases this reference; see [`SharedArray::clear`].
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Converts a uniquely referenced buffer back into an exclusively
    /// owned [`TextArray`] without copying; see [`SharedArray::claim`].
    pub fn claim(&mut self) -> Result<TextArray<C, 0>, ClaimError> {
        self.inner.claim().map(TextArray::from_claimed)
    }
}

impl<C: CodeUnit, const N: usize> From<TextArray<C, N>> for SharedText<C> {
    /// A spilled source hands over its allocation, terminator included.
    /// Inline contents are copied into a fresh counted allocation with the
    /// terminator re-written after them.
    fn from(src: TextArray<C, N>) -> Self {
        if src.is_empty() {
            // a reserved-but-unwritten source may not carry a terminator;
            // an empty shared text references no storage at all
            return SharedText::new();
        }
        match src.into_array().into_raw_spilled() {
            Ok((ptr, len)) => unsafe {
                header::header_of(ptr).set_flags(FLAG_REF_COUNTED);
                SharedText {
                    inner: SharedArray::from_raw(ptr, len),
                }
            },
            Err(arr) => {
                if arr.is_empty() {
                    return SharedText::new();
                }
                let len = arr.len();
                let ptr = header::alloc_array::<C, SystemAlloc>(len + 1, FLAG_REF_COUNTED);
                unsafe {
                    ptr::copy_nonoverlapping(arr.data_ptr(), ptr, len);
                    ptr.add(len).write(C::ZERO);
                    SharedText {
                        inner: SharedArray::from_raw(ptr, len),
                    }
                }
            }
        }
    }
}

impl<C: CodeUnit> From<&str> for SharedText<C> {
    fn from(s: &str) -> Self {
        Self::from_units(s.as_bytes())
    }
}

impl<C: CodeUnit> Clone for SharedText<C> {
    fn clone(&self) -> Self {
        SharedText {
            inner: self.inner.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.inner.clone_from(&source.inner);
    }
}

impl<C: CodeUnit> Default for SharedText<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CodeUnit> Deref for SharedText<C> {
    type Target = [C];
    #[inline]
    fn deref(&self) -> &[C] {
        self.as_units()
    }
}

/// Pointer identity, like [`SharedArray`].
impl<C: CodeUnit> PartialEq for SharedText<C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl<C: CodeUnit> Eq for SharedText<C> {}

impl<C: CodeUnit> fmt::Display for SharedText<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl<C: CodeUnit> fmt::Debug for SharedText<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}
