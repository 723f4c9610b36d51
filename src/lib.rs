//! slicekit, a family of slice and array primitives designed to minimise
//! memory allocations.
//!
//! This crate provides three tiers of sequence storage, each available
//! both element-generic and as a text specialisation that understands
//! UTF-8, UTF-16 and UTF-32 code units:
//!
//! * [`Slice`] and [`TextSlice`] are non-owning views, a pointer and a
//!   length over storage owned elsewhere. They never allocate and carry
//!   all of the query, search, split and tokenise logic. Search misses
//!   report the view's length rather than a negative sentinel, so a miss
//!   can feed straight into a slicing offset.
//! * [`Array`] and [`TextArray`] own their contents exclusively. An
//!   `Array<T, N>` stores up to `N` elements inline and only touches the
//!   heap past that, after which capacity doubles geometrically. The text
//!   form keeps its contents zero-terminated and transcodes between unit
//!   widths on construction and append.
//! * [`SharedArray`] and [`SharedText`] reference-count a fixed-shape
//!   heap buffer. Cloning bumps a 21-bit owner count kept in a header
//!   directly before the element storage; the one mutation allowed is
//!   [`claim`](SharedArray::claim), which turns a uniquely referenced
//!   buffer back into an exclusively owned one without copying.
//!
//! An `Array` converts into a `SharedArray` by handing over its heap
//! allocation when it has one, so the usual pattern of building a dataset
//! exclusively and then sharing it costs no copy. The owner count is not
//! atomic; the shared types are `!Send`/`!Sync` and cross-thread use is
//! the caller's synchronisation problem, by design.
//!
//! Heap storage for every owning and shared buffer is prefixed by a
//! single small header carrying the owner count, byte capacity, flags and
//! the release callback bound at allocation through the [`BufferAlloc`]
//! hook. Allocation failure is treated as fatal.

#![no_std]

extern crate alloc;

mod array;
mod errors;
mod header;
mod shared;
mod sharedtext;
mod slice;
mod text;
mod textarray;
pub mod urlenc;
mod utf;

pub use array::{Array, Concat, Part};
pub use errors::{ClaimError, SliceError};
pub use header::{BufferAlloc, SystemAlloc};
pub use shared::SharedArray;
pub use sharedtext::{SharedText, SharedUtf16, SharedUtf32, SharedUtf8};
pub use slice::{EmptyTokens, Slice};
pub use text::{TextSlice, Utf16Slice, Utf32Slice, Utf8Slice};
pub use textarray::{TextArray, Utf16Array, Utf32Array, Utf8Array};
pub use utf::{num_code_units, transcode, Chars, CodeUnit, Fragment};
