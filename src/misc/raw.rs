// Copyright (c) 2021 Anatoly Ikorsky
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Wrappers that keep raw wire values around even when they don't parse.
//!
//! A binlog written by a newer or a broken server may carry values outside
//! of the enumerations known to this crate. Wrapped fields preserve the raw
//! value and defer interpretation to the accessor.

use num_traits::{Bounded, PrimInt};

use std::{borrow::Cow, convert::TryFrom, fmt, marker::PhantomData};

use crate::bitflags_ext::Bitflags;

/// Wrapper for a raw value of a particular type.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct RawField<T, E, V>(pub T, PhantomData<(E, V)>);

impl<T: Copy, U: Into<T>, V: TryFrom<T, Error = U>> RawField<T, U, V> {
    /// Creates a new wrapper.
    pub fn new(t: T) -> Self {
        Self(t, PhantomData)
    }

    /// Returns either parsed value of this field, or raw value in case of an error.
    pub fn get(&self) -> Result<V, U> {
        V::try_from(self.0)
    }
}

impl<T: fmt::Debug, U: fmt::Debug, V: fmt::Debug> fmt::Debug for RawField<T, U, V>
where
    T: Copy,
    U: Into<T>,
    V: TryFrom<T, Error = U>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match V::try_from(self.0) {
            Ok(u) => u.fmt(f),
            Err(t) => write!(
                f,
                "Unknown value for type {}: {:?}",
                std::any::type_name::<U>(),
                t
            ),
        }
    }
}

/// Wrapper for raw flags value.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RawFlags<T: Bitflags>(pub T::Repr);

impl<T: Bitflags> RawFlags<T> {
    /// Returns parsed flags. Unknown bits will be truncated.
    pub fn get(&self) -> T {
        T::from_bits_truncate(self.0)
    }
}

impl<T: fmt::Debug> fmt::Debug for RawFlags<T>
where
    T: Bitflags,
    T::Repr: fmt::Binary,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())?;
        let unknown_bits = self.0 & (T::Repr::max_value() ^ T::all().bits());
        if unknown_bits.count_ones() > 0 {
            write!(
                f,
                " (Unknown bits: {:0width$b})",
                unknown_bits,
                width = T::Repr::max_value().count_ones() as usize,
            )?
        }
        Ok(())
    }
}

/// Wrapper for raw text value.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RawText<T = Vec<u8>>(pub T);

impl<T: AsRef<[u8]>> RawText<T> {
    /// Returns the value as a string. The value is null-terminated if it
    /// contains a null byte, lossy-decoded otherwise.
    pub fn get(&self) -> Cow<str> {
        let slice = self.0.as_ref();
        match slice.iter().position(|c| *c == 0) {
            Some(position) => String::from_utf8_lossy(&slice[..position]),
            None => String::from_utf8_lossy(slice),
        }
    }
}

impl<T: AsRef<[u8]>> fmt::Debug for RawText<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}
