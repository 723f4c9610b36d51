//! Text-aware view over code units of any supported width.

use core::cmp::Ordering;
use core::fmt;
use core::fmt::Write as _;
use core::mem::size_of;
use core::ops::{Deref, DerefMut};

use crate::slice::{EmptyTokens, Slice};
use crate::utf::{Chars, CodeUnit};

#[inline]
pub(crate) fn is_whitespace(c: u32) -> bool {
    c == b' ' as u32 || c == b'\t' as u32 || c == b'\n' as u32 || c == b'\r' as u32
}

#[inline]
pub(crate) fn is_hex(c: u32) -> bool {
    (c >= b'0' as u32 && c <= b'9' as u32)
        || (c >= b'a' as u32 && c <= b'f' as u32)
        || (c >= b'A' as u32 && c <= b'F' as u32)
}

#[inline]
pub(crate) fn is_digit(c: u32) -> bool {
    c >= b'0' as u32 && c <= b'9' as u32
}

#[inline]
pub(crate) fn to_lower(c: u32) -> u32 {
    if (b'A' as u32..=b'Z' as u32).contains(&c) {
        c | 0x20
    } else {
        c
    }
}

#[inline]
pub(crate) fn to_upper(c: u32) -> u32 {
    if (b'a' as u32..=b'z' as u32).contains(&c) {
        c & !0x20
    } else {
        c
    }
}

/// A [`Slice`] of code units that knows its encoding.
///
/// Adds decoded-code-point operations, ASCII case-insensitive search and
/// comparison, trimming, numeric parsing and FNV hashing on top of the
/// generic view. All `Slice` operations remain available through deref.
pub struct TextSlice<'a, C: CodeUnit> {
    inner: Slice<'a, C>,
}

pub type Utf8Slice<'a> = TextSlice<'a, u8>;
pub type Utf16Slice<'a> = TextSlice<'a, u16>;
pub type Utf32Slice<'a> = TextSlice<'a, u32>;

impl<'a, C: CodeUnit> Clone for TextSlice<'a, C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, C: CodeUnit> Copy for TextSlice<'a, C> {}

impl<'a, C: CodeUnit> TextSlice<'a, C> {
    pub const fn new() -> Self {
        TextSlice {
            inner: Slice::new(),
        }
    }

    pub const fn from_units(units: &'a [C]) -> Self {
        TextSlice {
            inner: Slice::from_slice(units),
        }
    }

    pub fn from_view(inner: Slice<'a, C>) -> Self {
        TextSlice { inner }
    }

    /// The underlying width-agnostic view.
    pub fn view(&self) -> Slice<'a, C> {
        self.inner
    }

    /// Count of decoded code points, not code units.
    pub fn num_chars(&self) -> usize {
        if C::MAX_SEQ == 1 {
            return self.inner.len();
        }
        self.chars().count()
    }

    /// Iterator over decoded code points.
    pub fn chars(&self) -> Chars<'a, C> {
        Chars::new(self.inner.as_slice())
    }

    /// Decode the first code point.
    ///
    /// # Panics
    /// Panics if the view is empty.
    pub fn front_char(&self) -> char {
        assert!(!self.inner.is_empty());
        let (c, _) = C::decode_one(self.inner.as_slice());
        char::from_u32(c).unwrap_or('\u{FFFD}')
    }

    /// Decode the last code point.
    ///
    /// # Panics
    /// Panics if the view is empty.
    pub fn back_char(&self) -> char {
        assert!(!self.inner.is_empty());
        let (c, _) = C::decode_last(self.inner.as_slice());
        char::from_u32(c).unwrap_or('\u{FFFD}')
    }

    /// Decode and consume the first code point.
    ///
    /// # Panics
    /// Panics if the view is empty.
    pub fn pop_front_char(&mut self) -> char {
        assert!(!self.inner.is_empty());
        let (c, n) = C::decode_one(self.inner.as_slice());
        self.inner = self.inner.drop_front(n);
        char::from_u32(c).unwrap_or('\u{FFFD}')
    }

    /// Decode and consume the last code point.
    ///
    /// # Panics
    /// Panics if the view is empty.
    pub fn pop_back_char(&mut self) -> char {
        assert!(!self.inner.is_empty());
        let (c, n) = C::decode_last(self.inner.as_slice());
        self.inner = self.inner.drop_back(n);
        char::from_u32(c).unwrap_or('\u{FFFD}')
    }

    /// ASCII case-insensitive elementwise equality.
    pub fn eq_ic(&self, other: TextSlice<'_, C>) -> bool {
        self.inner.len() == other.inner.len()
            && self
                .inner
                .iter()
                .zip(other.inner.iter())
                .all(|(a, b)| to_lower(a.to_u32()) == to_lower(b.to_u32()))
    }

    /// ASCII case-insensitive lexicographic comparison.
    pub fn cmp_ic(&self, other: TextSlice<'_, C>) -> Ordering {
        for (a, b) in self.inner.iter().zip(other.inner.iter()) {
            let a = to_lower(a.to_u32());
            let b = to_lower(b.to_u32());
            if a != b {
                return a.cmp(&b);
            }
        }
        self.inner.len().cmp(&other.inner.len())
    }

    pub fn begins_with_ic(&self, other: TextSlice<'_, C>) -> bool {
        self.inner.len() >= other.inner.len()
            && TextSlice::from_units(&self.inner.as_slice()[..other.inner.len()]).eq_ic(other)
    }

    pub fn ends_with_ic(&self, other: TextSlice<'_, C>) -> bool {
        self.inner.len() >= other.inner.len()
            && TextSlice::from_units(
                &self.inner.as_slice()[self.inner.len() - other.inner.len()..],
            )
            .eq_ic(other)
    }

    /// Case-insensitive [`Slice::find_first`].
    pub fn find_first_ic(&self, c: C) -> usize {
        let c = to_lower(c.to_u32());
        let mut offset = 0;
        while offset < self.inner.len() && to_lower(self.inner[offset].to_u32()) != c {
            offset += 1;
        }
        offset
    }

    /// Case-insensitive [`Slice::find_last`].
    pub fn find_last_ic(&self, c: C) -> usize {
        let c = to_lower(c.to_u32());
        let mut i = self.inner.len();
        while i > 0 {
            i -= 1;
            if to_lower(self.inner[i].to_u32()) == c {
                return i;
            }
        }
        self.inner.len()
    }

    /// Case-insensitive [`Slice::find_first_seq`].
    pub fn find_first_seq_ic(&self, s: TextSlice<'_, C>) -> usize {
        if s.is_empty() {
            return 0;
        }
        if s.len() > self.inner.len() {
            return self.inner.len();
        }
        let last_start = self.inner.len() - s.len();
        for i in 0..=last_start {
            if TextSlice::from_units(&self.inner.as_slice()[i..i + s.len()]).eq_ic(s) {
                return i;
            }
        }
        self.inner.len()
    }

    /// Case-insensitive [`Slice::find_last_seq`].
    pub fn find_last_seq_ic(&self, s: TextSlice<'_, C>) -> usize {
        if s.is_empty() || s.len() > self.inner.len() {
            return self.inner.len();
        }
        let mut i = self.inner.len() - s.len() + 1;
        while i > 0 {
            i -= 1;
            if TextSlice::from_units(&self.inner.as_slice()[i..i + s.len()]).eq_ic(s) {
                return i;
            }
        }
        self.inner.len()
    }

    // Case-insensitive directional splits; the not-found policy matches
    // the case-sensitive forms: empty left, full right.

    pub fn get_left_at_first_ic(&self, c: C, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_first_ic(c);
        if offset != self.inner.len() && inclusive {
            offset += 1;
        }
        TextSlice::from_view(self.inner.slice(0, offset))
    }

    pub fn get_left_at_last_ic(&self, c: C, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_last_ic(c);
        if offset != self.inner.len() && inclusive {
            offset += 1;
        }
        TextSlice::from_view(self.inner.slice(0, offset))
    }

    pub fn get_right_at_first_ic(&self, c: C, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_first_ic(c);
        if offset != self.inner.len() && !inclusive {
            offset += 1;
        }
        TextSlice::from_view(self.inner.slice(offset, self.inner.len()))
    }

    pub fn get_right_at_last_ic(&self, c: C, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_last_ic(c);
        if offset != self.inner.len() && !inclusive {
            offset += 1;
        }
        TextSlice::from_view(self.inner.slice(offset, self.inner.len()))
    }

    pub fn get_left_at_first_seq_ic(&self, s: TextSlice<'_, C>, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_first_seq_ic(s);
        if offset != self.inner.len() && inclusive {
            offset += s.len();
        }
        TextSlice::from_view(self.inner.slice(0, offset))
    }

    pub fn get_left_at_last_seq_ic(&self, s: TextSlice<'_, C>, inclusive: bool) -> TextSlice<'a, C> {
        let mut offset = self.find_last_seq_ic(s);
        if offset != self.inner.len() && inclusive {
            offset += s.len();
        }
        TextSlice::from_view(self.inner.slice(0, offset))
    }

    pub fn get_right_at_first_seq_ic(
        &self,
        s: TextSlice<'_, C>,
        inclusive: bool,
    ) -> TextSlice<'a, C> {
        let mut offset = self.find_first_seq_ic(s);
        if offset != self.inner.len() && !inclusive {
            offset += s.len();
        }
        TextSlice::from_view(self.inner.slice(offset, self.inner.len()))
    }

    pub fn get_right_at_last_seq_ic(
        &self,
        s: TextSlice<'_, C>,
        inclusive: bool,
    ) -> TextSlice<'a, C> {
        let mut offset = self.find_last_seq_ic(s);
        if offset != self.inner.len() && !inclusive {
            offset += s.len();
        }
        TextSlice::from_view(self.inner.slice(offset, self.inner.len()))
    }

    /// Strip leading and trailing whitespace.
    pub fn trim(&self) -> TextSlice<'a, C> {
        self.trim_front().trim_back()
    }

    /// Strip leading whitespace only.
    pub fn trim_front(&self) -> TextSlice<'a, C> {
        let mut first = 0;
        while first < self.inner.len() && is_whitespace(self.inner[first].to_u32()) {
            first += 1;
        }
        TextSlice::from_view(self.inner.slice(first, self.inner.len()))
    }

    /// Strip trailing whitespace only.
    pub fn trim_back(&self) -> TextSlice<'a, C> {
        let mut last = self.inner.len();
        while last > 0 && is_whitespace(self.inner[last - 1].to_u32()) {
            last -= 1;
        }
        TextSlice::from_view(self.inner.slice(0, last))
    }

    /// Text-typed [`Slice::pop_token`].
    pub fn pop_token(
        &mut self,
        delimiters: TextSlice<'_, C>,
        empties: EmptyTokens,
    ) -> TextSlice<'a, C> {
        TextSlice::from_view(self.inner.pop_token(delimiters.inner, empties))
    }

    /// Consume and return the next whitespace-separated word, skipping
    /// leading whitespace. Returns an empty view once exhausted.
    pub fn pop_word(&mut self) -> TextSlice<'a, C> {
        let mut offset = 0;
        while offset < self.inner.len() && is_whitespace(self.inner[offset].to_u32()) {
            offset += 1;
        }
        let mut end = offset;
        while end < self.inner.len() && !is_whitespace(self.inner[end].to_u32()) {
            end += 1;
        }
        let token = self.inner.slice(offset, end);
        if end < self.inner.len() {
            end += 1;
        }
        self.inner = self.inner.drop_front(end);
        TextSlice::from_view(token)
    }

    /// Parse an integer. Bases 2 to 9 accumulate plain digits, base 10
    /// additionally accepts a leading sign, base 16 accepts hex digits of
    /// either case. With `detect_base`, a leading `$` or `0x`/`0X` selects
    /// base 16 and a leading `b`/`B` selects base 2 before falling through
    /// to `base`. Parsing stops at the first unacceptable unit; an empty
    /// or non-numeric view parses to 0.
    ///
    /// # Panics
    /// Panics if `base` is not 2..=9, 10 or 16.
    pub fn parse_int(&self, detect_base: bool, base: u32) -> i64 {
        let units = self.inner.as_slice();
        if units.is_empty() {
            return 0;
        }
        let mut base = base;
        let mut i = 0;
        if detect_base {
            let c0 = units[0].to_u32();
            if c0 == b'$' as u32 {
                base = 16;
                i = 1;
            } else if c0 == b'0' as u32 && units.len() > 1 && to_lower(units[1].to_u32()) == b'x' as u32
            {
                base = 16;
                i = 2;
            } else if to_lower(c0) == b'b' as u32 {
                base = 2;
                i = 1;
            }
        }
        match base {
            2..=9 => {
                let mut number: i64 = 0;
                while i < units.len() {
                    let c = units[i].to_u32();
                    if c < b'0' as u32 || c >= b'0' as u32 + base {
                        break;
                    }
                    number = number * base as i64 + (c - b'0' as u32) as i64;
                    i += 1;
                }
                number
            }
            10 => {
                let mut neg = false;
                if i < units.len() {
                    let c = units[i].to_u32();
                    if c == b'-' as u32 || c == b'+' as u32 {
                        neg = c == b'-' as u32;
                        i += 1;
                    }
                }
                let mut number: i64 = 0;
                while i < units.len() && is_digit(units[i].to_u32()) {
                    number = number * 10 + (units[i].to_u32() - b'0' as u32) as i64;
                    i += 1;
                }
                if neg {
                    -number
                } else {
                    number
                }
            }
            16 => {
                let mut number: i64 = 0;
                while i < units.len() && is_hex(units[i].to_u32()) {
                    let c = units[i].to_u32();
                    let digit = if is_digit(c) {
                        c - b'0' as u32
                    } else {
                        10 + (c | 0x20) - b'a' as u32
                    };
                    number = (number << 4) | digit as i64;
                    i += 1;
                }
                number
            }
            _ => panic!("unsupported base {}", base),
        }
    }

    /// Parse a floating point number: optional sign, integer part,
    /// optional `.` fraction, optional `e`/`E` exponent with its own sign.
    /// The exponent is applied by repeated squaring of 10. An empty or
    /// non-numeric view parses to 0.0.
    pub fn parse_float(&self) -> f64 {
        let units = self.inner.as_slice();
        let len = units.len();
        let mut i = 0;

        let mut neg = false;
        if i < len {
            let c = units[i].to_u32();
            if c == b'-' as u32 || c == b'+' as u32 {
                neg = c == b'-' as u32;
                i += 1;
            }
        }

        let mut n: u64 = 0;
        while i < len && is_digit(units[i].to_u32()) {
            n = n * 10 + (units[i].to_u32() - b'0' as u32) as u64;
            i += 1;
        }

        let mut r = if i < len && units[i].to_u32() == b'.' as u32 {
            i += 1;
            let mut f: u64 = 0;
            let mut frac_size = 1.0f64;
            while i < len && is_digit(units[i].to_u32()) {
                f = f * 10 + (units[i].to_u32() - b'0' as u32) as u64;
                frac_size *= 10.0;
                i += 1;
            }
            n as f64 + f as f64 / frac_size
        } else {
            n as f64
        };

        if neg {
            r = -r;
        }

        if i < len && (units[i].to_u32() | 0x20) == b'e' as u32 {
            i += 1;
            let mut neg_exp = false;
            if i < len {
                let c = units[i].to_u32();
                if c == b'-' as u32 || c == b'+' as u32 {
                    neg_exp = c == b'-' as u32;
                    i += 1;
                }
            }
            let mut exp: u32 = 0;
            while i < len && is_digit(units[i].to_u32()) {
                exp = exp * 10 + (units[i].to_u32() - b'0' as u32);
                i += 1;
            }
            // 10^exp by repeated squaring
            let mut e = 1.0f64;
            let mut base = 10.0f64;
            while exp != 0 {
                if exp & 1 != 0 {
                    e *= base;
                }
                exp >>= 1;
                base *= base;
            }
            r = if neg_exp { r / e } else { r * e };
        }

        r
    }

    /// 32-bit FNV-1a over the raw bytes of the code units, in native byte
    /// order. Not decoded code points; the same text hashes differently at
    /// different widths.
    pub fn hash32(&self) -> u32 {
        self.hash32_seeded(0x811C_9DC5)
    }

    pub fn hash32_seeded(&self, seed: u32) -> u32 {
        let mut hash = seed;
        for unit in self.inner.iter() {
            let bytes = unit.to_u32().to_ne_bytes();
            for &b in &bytes[..size_of::<C>()] {
                hash ^= b as u32;
                hash = hash.wrapping_mul(0x0100_0193);
            }
        }
        hash
    }

    /// Copy into `buffer` with a terminating zero unit, truncating to fit.
    /// Returns the count of text units copied (the terminator excluded).
    ///
    /// # Panics
    /// Panics if `buffer` is empty.
    pub fn to_c_string(&self, buffer: &mut [C]) -> usize {
        assert!(!buffer.is_empty());
        let len = self.inner.len().min(buffer.len() - 1);
        buffer[..len].copy_from_slice(&self.inner.as_slice()[..len]);
        buffer[len] = C::ZERO;
        len
    }
}

impl<'a> TextSlice<'a, u8> {
    /// View the UTF-8 units of a `str`.
    pub const fn from_str(s: &'a str) -> Self {
        TextSlice {
            inner: Slice::from_slice(s.as_bytes()),
        }
    }
}

impl<'a, C: CodeUnit> Deref for TextSlice<'a, C> {
    type Target = Slice<'a, C>;
    #[inline]
    fn deref(&self) -> &Slice<'a, C> {
        &self.inner
    }
}

impl<'a, C: CodeUnit> DerefMut for TextSlice<'a, C> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Slice<'a, C> {
        &mut self.inner
    }
}

impl<'a, C: CodeUnit> From<&'a [C]> for TextSlice<'a, C> {
    fn from(units: &'a [C]) -> Self {
        TextSlice::from_units(units)
    }
}

impl<'a> From<&'a str> for TextSlice<'a, u8> {
    fn from(s: &'a str) -> Self {
        TextSlice::from_str(s)
    }
}

impl<'a, C: CodeUnit> Default for TextSlice<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CodeUnit> fmt::Display for TextSlice<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl<C: CodeUnit> fmt::Debug for TextSlice<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.chars() {
            for esc in c.escape_debug() {
                f.write_char(esc)?;
            }
        }
        f.write_char('"')
    }
}

impl<C: CodeUnit> PartialEq for TextSlice<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl<C: CodeUnit> Eq for TextSlice<'_, C> {}

impl<C: CodeUnit> PartialEq<&str> for TextSlice<'_, C> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}
