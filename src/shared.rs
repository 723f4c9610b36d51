//! Reference counted, structurally immutable buffer.

use core::fmt;
use core::ops::Deref;
use core::ptr;
use core::slice;

use crate::array::{Array, Concat};
use crate::errors::{ClaimError, SliceError};
use crate::header::{self, SystemAlloc, FLAG_REF_COUNTED};
use crate::slice::Slice;

/// A cheaply copyable reference to a fixed-length heap buffer.
///
/// The element count is set at construction and no operation changes it in
/// place — push, pop, insert and remove simply do not exist on this type,
/// so no owner can observe another owner's structural edits. What each
/// holder owns is its reference: cloning bumps the owner count in the
/// allocation's header, dropping decrements it, and the storage is
/// destroyed when the count reaches zero.
///
/// The owner count is a plain non-atomic field. `SharedArray` is therefore
/// neither `Send` nor `Sync`; moving clones across threads would be a data
/// race by construction.
///
/// Equality is pointer identity: two `SharedArray`s are equal when they
/// reference the same allocation. For elementwise comparison go through
/// [`view`](SharedArray::view) and [`Slice::eq`].
pub struct SharedArray<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> SharedArray<T> {
    /// An empty shared buffer referencing nothing.
    pub const fn new() -> Self {
        SharedArray {
            ptr: ptr::null_mut(),
            len: 0,
        }
    }

    /// Builds a counted buffer holding clones of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Array::<T, 0>::from_slice(items).into()
    }

    /// Builds a counted buffer of `count` default-constructed elements.
    pub fn filled(count: usize) -> Self
    where
        T: Default,
    {
        Array::<T, 0>::filled(count).into()
    }

    /// Builds a counted buffer by concatenating fragments.
    pub fn concat(parts: Concat<'_, T>) -> Self
    where
        T: Clone,
    {
        parts.build::<0>().into()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ptr.is_null()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.ptr.is_null() {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    /// A non-owning view of the contents.
    pub fn view(&self) -> Slice<'_, T> {
        Slice::from_slice(self.as_slice())
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&T, SliceError> {
        self.as_slice().get(index).ok_or(SliceError::OutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Count of live `SharedArray`s referencing this allocation, zero for
    /// an empty buffer.
    pub fn use_count(&self) -> usize {
        if self.ptr.is_null() {
            return 0;
        }
        unsafe { header::header_of(self.ptr).owners() }
    }

    pub fn is_unique(&self) -> bool {
        self.use_count() == 1
    }

    /// Releases this reference. Destroys the elements and frees the
    /// allocation when this was the last owner; otherwise the other
    /// owners keep the buffer untouched.
    pub fn clear(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        unsafe {
            let hdr = header::header_of(self.ptr);
            if hdr.owners() > 1 {
                hdr.dec_owners();
            } else {
                ptr::drop_in_place(slice::from_raw_parts_mut(self.ptr, self.len));
                header::release_array(self.ptr);
            }
        }
        self.ptr = ptr::null_mut();
        self.len = 0;
    }

    /// Converts a uniquely referenced buffer back into exclusive
    /// ownership without copying. Succeeds only when `use_count() == 1`;
    /// on success this instance is left empty and the returned [`Array`]
    /// owns the exact original allocation.
    pub fn claim(&mut self) -> Result<Array<T, 0>, ClaimError> {
        let owners = self.use_count();
        if owners != 1 {
            return Err(ClaimError { owners });
        }
        unsafe {
            header::header_of(self.ptr).set_flags(0);
            let arr = Array::from_raw_spilled(self.ptr, self.len);
            self.ptr = ptr::null_mut();
            self.len = 0;
            Ok(arr)
        }
    }

    /// A deep copy into a fresh exclusively owned buffer.
    pub fn to_array<const N: usize>(&self) -> Array<T, N>
    where
        T: Clone,
    {
        Array::from_slice(self.as_slice())
    }

    // Adopt a REF_COUNTED allocation with an owner count already at one.
    pub(crate) unsafe fn from_raw(ptr: *mut T, len: usize) -> Self {
        SharedArray { ptr, len }
    }

    pub(crate) fn raw_ptr(&self) -> *mut T {
        self.ptr
    }
}

impl<T, const N: usize> From<Array<T, N>> for SharedArray<T> {
    /// A heap-allocated source hands its allocation over directly — the
    /// header's owner count is already one — while inline contents move
    /// into a fresh counted allocation.
    fn from(src: Array<T, N>) -> Self {
        match src.into_raw_spilled() {
            Ok((ptr, len)) => unsafe {
                header::header_of(ptr).set_flags(FLAG_REF_COUNTED);
                SharedArray { ptr, len }
            },
            Err(mut src) => {
                if src.is_empty() {
                    return SharedArray::new();
                }
                let len = src.len();
                let ptr = header::alloc_array::<T, SystemAlloc>(len, FLAG_REF_COUNTED);
                unsafe {
                    ptr::copy_nonoverlapping(src.data_ptr(), ptr, len);
                    src.set_len(0);
                }
                SharedArray { ptr, len }
            }
        }
    }
}

impl<T> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        if self.ptr.is_null() {
            return SharedArray::new();
        }
        unsafe { header::header_of(self.ptr).inc_owners() };
        SharedArray {
            ptr: self.ptr,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // same allocation: nothing to rebind
        if self.ptr == source.ptr {
            return;
        }
        self.clear();
        *self = source.clone();
    }
}

impl<T> Drop for SharedArray<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for SharedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SharedArray<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

/// Pointer identity, not elementwise comparison.
impl<T> PartialEq for SharedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}
impl<T> Eq for SharedArray<T> {}

impl<T: fmt::Debug> fmt::Debug for SharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}
