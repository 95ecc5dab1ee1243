// Copyright (c) 2020 Anatoly Ikorsky
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! MySql binlog event codec primitives.
//!
//! This crate decodes (and encodes) the events of a MySql binary log, the
//! self-describing wire format that evolved across more than a decade of
//! server releases. The entry points are [`binlog::EventStreamReader`] for
//! event streams and [`binlog::BinlogFile`] for binlog files; both maintain
//! the active [`binlog::FormatDescriptionEvent`] that every other event is
//! interpreted against.
//!
//! All structures of this crate contain raw data that may not necessarily be
//! valid. Please consult the MySql documentation.

#[macro_use]
pub mod bitflags_ext;

pub mod binlog;
pub mod io;
pub mod misc;
