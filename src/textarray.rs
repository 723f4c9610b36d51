//! Owning text buffer generic over the code unit width.

use core::fmt;
use core::marker::PhantomData;
use core::ops::Deref;
use core::slice;

use crate::array::Array;
use crate::slice::Slice;
use crate::text::{self, TextSlice};
use crate::urlenc;
use crate::utf::{self, CodeUnit, Fragment};

/// An [`Array`] of code units that maintains text invariants: contents
/// are kept zero-terminated, and every construction or append transcodes
/// its source from whatever width it arrives in.
///
/// The element mutators of `Array` are deliberately not exposed (`Deref`
/// targets the unit slice, not the inner array); pushing raw units would
/// silently break the terminator.
pub struct TextArray<C: CodeUnit, const N: usize = 0> {
    arr: Array<C, N>,
}

pub type Utf8Array<const N: usize> = TextArray<u8, N>;
pub type Utf16Array<const N: usize> = TextArray<u16, N>;
pub type Utf32Array<const N: usize> = TextArray<u32, N>;

impl<C: CodeUnit, const N: usize> TextArray<C, N> {
    /// Creates an empty text buffer. Does not allocate.
    pub const fn new() -> Self {
        TextArray { arr: Array::new() }
    }

    /// Creates an empty text buffer with room for `count` units plus the
    /// terminator.
    pub fn with_capacity(count: usize) -> Self {
        let mut out = Self::new();
        out.arr.reserve(count.saturating_add(1));
        out
    }

    /// Creates a text buffer by transcoding `src` from unit width `S`.
    pub fn from_units<S: CodeUnit>(src: &[S]) -> Self {
        let mut out = Self::new();
        out.append_units(src);
        out
    }

    /// Creates a text buffer from a view of any width.
    pub fn from_text<S: CodeUnit>(src: TextSlice<'_, S>) -> Self {
        Self::from_units(src.as_slice())
    }

    /// Takes ownership of another buffer of the same width. A spilled
    /// source hands over its allocation in O(1).
    pub fn from_buffer<const M: usize>(src: TextArray<C, M>) -> Self {
        let spilled_src = src.arr.is_spilled();
        let mut out = TextArray {
            arr: Array::from_array(src.arr),
        };
        if !spilled_src && !out.arr.is_empty() {
            // relocated rather than adopted; the terminator did not travel
            out.terminate();
        }
        out
    }

    /// Creates a text buffer by concatenating fragments: one measuring
    /// pass sizes the allocation, one writing pass fills it.
    pub fn concat(frags: &[Fragment<'_>]) -> Self {
        let mut out = Self::new();
        out.append(frags);
        out
    }

    /// Creates a text buffer from `core::fmt` arguments. The template is
    /// rendered twice: once into a unit counter to size the buffer, then
    /// directly into reserved storage.
    ///
    /// ```
    /// use slicekit::Utf16Array;
    /// let s = Utf16Array::<0>::format(format_args!("{}-{}", 4, "two"));
    /// assert_eq!(s, "4-two");
    /// ```
    pub fn format(args: fmt::Arguments<'_>) -> Self {
        let mut out = Self::new();
        out.format_into(args);
        out
    }

    pub(crate) fn into_array(self) -> Array<C, N> {
        self.arr
    }

    fn terminate(&mut self) {
        let len = self.arr.len();
        self.arr.reserve(len + 1);
        unsafe {
            self.arr.data_mut_ptr().add(len).write(C::ZERO);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arr.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    /// Units the buffer can hold without reallocating, terminator slot
    /// included.
    pub fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    #[inline]
    pub fn as_units(&self) -> &[C] {
        self.arr.as_slice()
    }

    /// The contents including the terminating zero unit. Allocates the
    /// terminator slot if the buffer has never held storage.
    pub fn with_terminator(&mut self) -> &[C] {
        self.terminate();
        unsafe { slice::from_raw_parts(self.arr.data_ptr(), self.arr.len() + 1) }
    }

    /// A text view of the contents.
    pub fn view(&self) -> TextSlice<'_, C> {
        TextSlice::from_units(self.arr.as_slice())
    }

    /// Destroys the contents, retaining the allocation.
    pub fn clear(&mut self) {
        self.arr.clear();
        if N > 0 || self.arr.is_spilled() {
            unsafe { self.arr.data_mut_ptr().write(C::ZERO) };
        }
    }

    /// Ensure capacity for at least `count` units plus the terminator.
    pub fn reserve(&mut self, count: usize) {
        self.arr.reserve(count.saturating_add(1));
        self.terminate();
    }

    /// Append `src`, transcoding from unit width `S`.
    pub fn append_units<S: CodeUnit>(&mut self, src: &[S]) -> &mut Self {
        if src.is_empty() {
            return self;
        }
        let extra = utf::num_code_units::<C, S>(src);
        let len = self.arr.len();
        self.arr.reserve(len + extra + 1);
        unsafe {
            let written = utf::transcode_raw(self.arr.data_mut_ptr().add(len), src);
            debug_assert_eq!(written, extra);
            self.arr.data_mut_ptr().add(len + extra).write(C::ZERO);
            self.arr.set_len(len + extra);
        }
        self
    }

    /// Append a list of fragments: measure total length in this width,
    /// reserve once, write each in order, re-terminate.
    pub fn append(&mut self, frags: &[Fragment<'_>]) -> &mut Self {
        let extra: usize = frags.iter().map(|f| f.units_in::<C>()).sum();
        if extra == 0 {
            return self;
        }
        let len = self.arr.len();
        self.arr.reserve(len + extra + 1);
        unsafe {
            let mut off = len;
            for frag in frags {
                off += frag.write_raw(self.arr.data_mut_ptr().add(off));
            }
            debug_assert_eq!(off, len + extra);
            self.arr.data_mut_ptr().add(off).write(C::ZERO);
            self.arr.set_len(off);
        }
        self
    }

    /// Append a single code point.
    pub fn push_char(&mut self, c: char) -> &mut Self {
        let mut tmp = [C::ZERO; 4];
        let n = C::encode_one(c as u32, &mut tmp);
        self.append_units(&tmp[..n])
    }

    /// Append rendered `core::fmt` arguments.
    pub fn format_into(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        let mut counter = UnitCounter::<C> {
            units: 0,
            _width: PhantomData,
        };
        let _ = fmt::write(&mut counter, args);
        self.arr.reserve(self.arr.len() + counter.units + 1);
        let _ = fmt::write(self, args);
        self
    }

    /// ASCII uppercase, applied per code unit in place.
    pub fn to_upper(&mut self) -> &mut Self {
        for unit in self.arr.as_mut_slice() {
            *unit = C::from_u32(text::to_upper(unit.to_u32()));
        }
        self
    }

    /// ASCII lowercase, applied per code unit in place.
    pub fn to_lower(&mut self) -> &mut Self {
        for unit in self.arr.as_mut_slice() {
            *unit = C::from_u32(text::to_lower(unit.to_u32()));
        }
        self
    }

    /// Replace the contents with the percent-encoded form of `src`.
    pub fn url_encode<S: CodeUnit>(&mut self, src: TextSlice<'_, S>) -> &mut Self {
        let units = urlenc::encoded_len(src.as_slice());
        self.arr.clear();
        self.arr.reserve(units + 1);
        unsafe {
            let written = urlenc::encode_raw(self.arr.data_mut_ptr(), src.as_slice());
            debug_assert_eq!(written, units);
            self.arr.data_mut_ptr().add(written).write(C::ZERO);
            self.arr.set_len(written);
        }
        self
    }

    /// Replace the contents with the percent-decoded form of `src`.
    pub fn url_decode<S: CodeUnit>(&mut self, src: TextSlice<'_, S>) -> &mut Self {
        // every decoded code point fits where its escaped spelling stood
        let bound = utf::num_code_units::<C, S>(src.as_slice());
        self.arr.clear();
        self.arr.reserve(bound + 1);
        unsafe {
            let written = urlenc::decode_raw(self.arr.data_mut_ptr(), src.as_slice());
            debug_assert!(written <= bound);
            self.arr.data_mut_ptr().add(written).write(C::ZERO);
            self.arr.set_len(written);
        }
        self
    }
}

impl<C: CodeUnit> TextArray<C, 0> {
    // Adopt an allocation claimed back from a shared text buffer; the
    // terminator is already in place there.
    pub(crate) fn from_claimed(arr: Array<C, 0>) -> Self {
        TextArray { arr }
    }
}

struct UnitCounter<C: CodeUnit> {
    units: usize,
    _width: PhantomData<C>,
}

impl<C: CodeUnit> fmt::Write for UnitCounter<C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.units += utf::num_code_units::<C, u8>(s.as_bytes());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.units += C::encoded_len(c as u32);
        Ok(())
    }
}

impl<C: CodeUnit, const N: usize> fmt::Write for TextArray<C, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_units(s.as_bytes());
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push_char(c);
        Ok(())
    }
}

impl<C: CodeUnit, const N: usize> Deref for TextArray<C, N> {
    type Target = [C];
    #[inline]
    fn deref(&self) -> &[C] {
        self.arr.as_slice()
    }
}

impl<C: CodeUnit, const N: usize> Default for TextArray<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CodeUnit, const N: usize> Clone for TextArray<C, N> {
    fn clone(&self) -> Self {
        Self::from_units(self.as_units())
    }
}

impl<C: CodeUnit, const N: usize> From<&str> for TextArray<C, N> {
    fn from(s: &str) -> Self {
        Self::from_units(s.as_bytes())
    }
}

impl<'a, S: CodeUnit, C: CodeUnit, const N: usize> From<TextSlice<'a, S>> for TextArray<C, N> {
    fn from(src: TextSlice<'a, S>) -> Self {
        Self::from_text(src)
    }
}

impl<'a, C: CodeUnit, const N: usize> From<&'a TextArray<C, N>> for TextSlice<'a, C> {
    fn from(src: &'a TextArray<C, N>) -> Self {
        src.view()
    }
}

impl<'a, C: CodeUnit, const N: usize> From<&'a TextArray<C, N>> for Slice<'a, C> {
    fn from(src: &'a TextArray<C, N>) -> Self {
        src.view().view()
    }
}

impl<C: CodeUnit, const N: usize> FromIterator<char> for TextArray<C, N> {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut out = Self::new();
        for c in iter {
            out.push_char(c);
        }
        out
    }
}

impl<C: CodeUnit, const N: usize, const M: usize> PartialEq<TextArray<C, M>> for TextArray<C, N> {
    fn eq(&self, other: &TextArray<C, M>) -> bool {
        self.as_units() == other.as_units()
    }
}
impl<C: CodeUnit, const N: usize> Eq for TextArray<C, N> {}

impl<C: CodeUnit, const N: usize> PartialEq<&str> for TextArray<C, N> {
    fn eq(&self, other: &&str) -> bool {
        self.view() == *other
    }
}

impl<C: CodeUnit, const N: usize> PartialEq<TextSlice<'_, C>> for TextArray<C, N> {
    fn eq(&self, other: &TextSlice<'_, C>) -> bool {
        self.as_units() == other.as_slice()
    }
}

impl<C: CodeUnit, const N: usize> fmt::Display for TextArray<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl<C: CodeUnit, const N: usize> fmt::Debug for TextArray<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}
