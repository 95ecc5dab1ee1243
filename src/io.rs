// Copyright (c) 2017 Anatoly Ikorsky
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use byteorder::ReadBytesExt;

use std::io;

/// Reader extension for fixed-layout fields of the binlog wire format.
///
/// Fixed-width integers are read little-endian via [`byteorder`]; bounded
/// variable-length runs are read against a limited reader, so a field that
/// declares more bytes than the buffer holds fails with
/// [`io::ErrorKind::UnexpectedEof`] instead of reading out of bounds.
pub trait ReadBinlogExt: ReadBytesExt {
    /// Reads a fixed-width, null-padded text field (e.g. the 50-byte server
    /// version of a format description event).
    fn read_fixed_text<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut text = [0_u8; N];
        self.read_exact(&mut text[..])?;
        Ok(text)
    }

    /// Reads exactly `len` bytes into a freshly allocated buffer.
    fn read_text(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut text = vec![0_u8; len];
        self.read_exact(&mut text)?;
        Ok(text)
    }
}

impl<T> ReadBinlogExt for T where T: ReadBytesExt {}
