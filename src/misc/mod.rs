// Copyright (c) 2017 Anatoly Ikorsky
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use saturating::Saturating as S;

use std::{
    cmp::min,
    io::{self, Read, Write},
};

pub mod raw;

pub use raw::{RawField, RawFlags, RawText};

/// Splits server 'version' string into three numeric pieces.
///
/// It'll return `(0, 0, 0)` in case of error. A zeroed triple compares less
/// than every real release, so a corrupted version string reads as "oldest
/// possible" rather than aborting the decode.
pub fn split_version<T: AsRef<[u8]>>(version_str: T) -> (u8, u8, u8) {
    let mut bytes = version_str.as_ref();
    let mut nums = [0_u8; 3];

    for i in 0..=2 {
        let digits = bytes.iter().take_while(|x| x.is_ascii_digit()).count();
        nums[i] = match btoi::btou(&bytes[..digits]) {
            Ok(x) => x,
            Err(_) => return (0, 0, 0),
        };
        bytes = &bytes[digits..];
        if i < 2 {
            match bytes.first() {
                Some(&b'.') => bytes = &bytes[1..],
                _ => return (0, 0, 0),
            }
        }
    }

    (nums[0], nums[1], nums[2])
}

/// Packs a version triple so that ordinary numeric comparison matches
/// release ordering.
pub fn version_product((major, minor, patch): (u8, u8, u8)) -> u32 {
    (u32::from(major) * 256 + u32::from(minor)) * 256 + u32::from(patch)
}

pub(crate) struct LimitedRead<T> {
    limit: S<usize>,
    read: T,
}

impl<T> LimitedRead<T> {
    pub fn new(read: T, limit: S<usize>) -> Self {
        Self { read, limit }
    }

    pub fn get_limit(&self) -> usize {
        self.limit.0
    }
}

impl<T: Read> Read for LimitedRead<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = min(buf.len(), self.limit.0);
        let count = self.read.read(&mut buf[..limit])?;
        self.limit -= S(count);
        Ok(count)
    }
}

pub(crate) trait LimitRead: Read + Sized {
    fn limit(&mut self, limit: S<usize>) -> LimitedRead<&mut Self> {
        LimitedRead::new(self, limit)
    }
}

impl<T: Read> LimitRead for T {}

pub(crate) struct LimitedWrite<T> {
    limit: S<usize>,
    write: T,
}

impl<T> LimitedWrite<T> {
    pub fn new(write: T, limit: S<usize>) -> Self {
        Self { write, limit }
    }
}

impl<T: Write> Write for LimitedWrite<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let limit = min(buf.len(), self.limit.0);
        let count = self.write.write(&buf[..limit])?;
        self.limit -= S(count);
        Ok(count)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write.flush()
    }
}

pub(crate) trait LimitWrite: Write + Sized {
    fn limit(&mut self, limit: S<usize>) -> LimitedWrite<&mut Self> {
        LimitedWrite::new(self, limit)
    }
}

impl<T: Write> LimitWrite for T {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn should_split_version() {
        assert_eq!((1, 2, 3), split_version("1.2.3"));
        assert_eq!((10, 20, 30), split_version("10.20.30foo"));
        assert_eq!((5, 7, 30), split_version("5.7.30-log\0\0\0"));
        assert_eq!((0, 0, 0), split_version("100.200.300foo"));
        assert_eq!((0, 0, 0), split_version("100.200foo"));
        assert_eq!((0, 0, 0), split_version("1,2.3"));
        assert_eq!((0, 0, 0), split_version(""));
    }

    #[test]
    fn zero_triple_is_oldest() {
        assert_eq!(0, version_product((0, 0, 0)));
        assert!(version_product((0, 0, 0)) < version_product((3, 23, 0)));
    }

    proptest! {
        #[test]
        fn version_roundtrip(major: u8, minor: u8, patch: u8) {
            let text = format!("{}.{}.{}", major, minor, patch);
            prop_assert_eq!((major, minor, patch), split_version(&text));
        }

        #[test]
        fn version_product_matches_triple_order(a: (u8, u8, u8), b: (u8, u8, u8)) {
            prop_assert_eq!(a.cmp(&b), version_product(a).cmp(&version_product(b)));
        }
    }
}
