// Copyright (c) 2020 Anatoly Ikorsky
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Binlog-related structures and functions.
//!
//! The first event of every stream is a format description event (or a start
//! event for binlog versions 1 and 3); every other event is interpreted
//! against the active [`FormatDescriptionEvent`]: it declares the common
//! header length, the per-type post-header lengths, the checksum algorithm
//! and, for a few historical development trees, a remapping of event type
//! identifiers.
//!
//! All structures of this module contain raw data that may not necessarily be
//! valid. Please consult the MySql documentation.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use saturating::Saturating as S;

use std::{
    cmp::min,
    convert::TryFrom,
    fmt,
    io::{
        self, Error,
        ErrorKind::{InvalidData, Other, UnexpectedEof},
        Read, Write,
    },
};

use crate::{
    io::ReadBinlogExt,
    misc::{split_version, version_product, LimitRead, LimitWrite, RawField, RawFlags, RawText},
};

/// Server version reported by built format description events.
pub const SERVER_VERSION: &str = "5.7.4-log";

/// Maximum length of a log file name in the binlog (`FN_REFLEN`).
pub const FN_REFLEN: usize = 512;

/// Depending on the MySQL Version that created the binlog the format is slightly different.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BinlogVersion {
    /// MySQL 3.23 - < 4.0.0
    Version1 = 1,
    /// MySQL 4.0.0 - 4.0.1
    Version2,
    /// MySQL 4.0.2 - < 5.0.0
    Version3,
    /// MySQL 5.0.0+
    Version4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Unknown binlog version {0}")]
#[repr(transparent)]
pub struct UnknownBinlogVersion(pub u16);

impl From<UnknownBinlogVersion> for u16 {
    fn from(x: UnknownBinlogVersion) -> Self {
        x.0
    }
}

impl TryFrom<u16> for BinlogVersion {
    type Error = UnknownBinlogVersion;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Version1),
            2 => Ok(Self::Version2),
            3 => Ok(Self::Version3),
            4 => Ok(Self::Version4),
            x => Err(UnknownBinlogVersion(x)),
        }
    }
}

/// Binlog Event Type
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EventType {
    /// Ignored event.
    UNKNOWN_EVENT = 0x00,
    /// A start event is the first event of a binlog for binlog-version 1 to 3.
    ///
    /// Superseded by `FORMAT_DESCRIPTION_EVENT` since mysql v5.0.0.
    START_EVENT_V3 = 0x01,
    /// A `QUERY_EVENT` is created for each query that modifies the database,
    /// unless the query is logged row-based.
    QUERY_EVENT = 0x02,
    /// A `STOP_EVENT` has no payload or post-header.
    STOP_EVENT = 0x03,
    /// The rotate event is added to the binlog as last event
    /// to tell the reader what binlog to request next.
    ROTATE_EVENT = 0x04,
    INTVAR_EVENT = 0x05,
    LOAD_EVENT = 0x06,
    /// Ignored event.
    SLAVE_EVENT = 0x07,
    CREATE_FILE_EVENT = 0x08,
    APPEND_BLOCK_EVENT = 0x09,
    EXEC_LOAD_EVENT = 0x0a,
    DELETE_FILE_EVENT = 0x0b,
    NEW_LOAD_EVENT = 0x0c,
    RAND_EVENT = 0x0d,
    USER_VAR_EVENT = 0x0e,
    /// A format description event is the first event of a binlog for binlog-version 4.
    /// It describes how the other events are layed out.
    ///
    /// # Note
    ///
    /// Added in MySQL 5.0.0 as replacement for START_EVENT_V3
    FORMAT_DESCRIPTION_EVENT = 0x0f,
    XID_EVENT = 0x10,
    BEGIN_LOAD_QUERY_EVENT = 0x11,
    EXECUTE_LOAD_QUERY_EVENT = 0x12,
    TABLE_MAP_EVENT = 0x13,
    PRE_GA_WRITE_ROWS_EVENT = 0x14,
    PRE_GA_UPDATE_ROWS_EVENT = 0x15,
    PRE_GA_DELETE_ROWS_EVENT = 0x16,
    WRITE_ROWS_EVENT_V1 = 0x17,
    UPDATE_ROWS_EVENT_V1 = 0x18,
    DELETE_ROWS_EVENT_V1 = 0x19,
    INCIDENT_EVENT = 0x1a,
    HEARTBEAT_EVENT = 0x1b,
    IGNORABLE_EVENT = 0x1c,
    ROWS_QUERY_EVENT = 0x1d,
    WRITE_ROWS_EVENT = 0x1e,
    UPDATE_ROWS_EVENT = 0x1f,
    DELETE_ROWS_EVENT = 0x20,
    GTID_EVENT = 0x21,
    ANONYMOUS_GTID_EVENT = 0x22,
    PREVIOUS_GTIDS_EVENT = 0x23,
    TRANSACTION_CONTEXT_EVENT = 0x24,
    VIEW_CHANGE_EVENT = 0x25,
    /// Prepared XA transaction terminal event similar to Xid.
    XA_PREPARE_LOG_EVENT = 0x26,
    /// Extension of UPDATE_ROWS_EVENT, allowing partial values according
    /// to binlog_row_value_options.
    PARTIAL_UPDATE_ROWS_EVENT = 0x27,
    /// Total number of known events.
    ENUM_END_EVENT,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Unknown event type {0}")]
#[repr(transparent)]
pub struct UnknownEventType(pub u8);

impl From<UnknownEventType> for u8 {
    fn from(x: UnknownEventType) -> Self {
        x.0
    }
}

impl TryFrom<u8> for EventType {
    type Error = UnknownEventType;

    fn try_from(byte: u8) -> Result<Self, UnknownEventType> {
        match byte {
            0x00 => Ok(Self::UNKNOWN_EVENT),
            0x01 => Ok(Self::START_EVENT_V3),
            0x02 => Ok(Self::QUERY_EVENT),
            0x03 => Ok(Self::STOP_EVENT),
            0x04 => Ok(Self::ROTATE_EVENT),
            0x05 => Ok(Self::INTVAR_EVENT),
            0x06 => Ok(Self::LOAD_EVENT),
            0x07 => Ok(Self::SLAVE_EVENT),
            0x08 => Ok(Self::CREATE_FILE_EVENT),
            0x09 => Ok(Self::APPEND_BLOCK_EVENT),
            0x0a => Ok(Self::EXEC_LOAD_EVENT),
            0x0b => Ok(Self::DELETE_FILE_EVENT),
            0x0c => Ok(Self::NEW_LOAD_EVENT),
            0x0d => Ok(Self::RAND_EVENT),
            0x0e => Ok(Self::USER_VAR_EVENT),
            0x0f => Ok(Self::FORMAT_DESCRIPTION_EVENT),
            0x10 => Ok(Self::XID_EVENT),
            0x11 => Ok(Self::BEGIN_LOAD_QUERY_EVENT),
            0x12 => Ok(Self::EXECUTE_LOAD_QUERY_EVENT),
            0x13 => Ok(Self::TABLE_MAP_EVENT),
            0x14 => Ok(Self::PRE_GA_WRITE_ROWS_EVENT),
            0x15 => Ok(Self::PRE_GA_UPDATE_ROWS_EVENT),
            0x16 => Ok(Self::PRE_GA_DELETE_ROWS_EVENT),
            0x17 => Ok(Self::WRITE_ROWS_EVENT_V1),
            0x18 => Ok(Self::UPDATE_ROWS_EVENT_V1),
            0x19 => Ok(Self::DELETE_ROWS_EVENT_V1),
            0x1a => Ok(Self::INCIDENT_EVENT),
            0x1b => Ok(Self::HEARTBEAT_EVENT),
            0x1c => Ok(Self::IGNORABLE_EVENT),
            0x1d => Ok(Self::ROWS_QUERY_EVENT),
            0x1e => Ok(Self::WRITE_ROWS_EVENT),
            0x1f => Ok(Self::UPDATE_ROWS_EVENT),
            0x20 => Ok(Self::DELETE_ROWS_EVENT),
            0x21 => Ok(Self::GTID_EVENT),
            0x22 => Ok(Self::ANONYMOUS_GTID_EVENT),
            0x23 => Ok(Self::PREVIOUS_GTIDS_EVENT),
            0x24 => Ok(Self::TRANSACTION_CONTEXT_EVENT),
            0x25 => Ok(Self::VIEW_CHANGE_EVENT),
            0x26 => Ok(Self::XA_PREPARE_LOG_EVENT),
            0x27 => Ok(Self::PARTIAL_UPDATE_ROWS_EVENT),
            x => Err(UnknownEventType(x)),
        }
    }
}

my_bitflags! {
    EventFlags,
    #[error("Unknown flags in the raw value of EventFlags (raw={0:b})")]
    UnknownEventFlags,
    u16,

    /// Binlog Event Flags
    pub struct EventFlags: u16 {
        /// Gets unset in the `FORMAT_DESCRIPTION_EVENT`
        /// when the file gets closed to detect broken binlogs.
        const LOG_EVENT_BINLOG_IN_USE_F = 0x0001;

        /// Unused.
        const LOG_EVENT_FORCED_ROTATE_F = 0x0002;

        /// event is thread specific (`CREATE TEMPORARY TABLE` ...).
        const LOG_EVENT_THREAD_SPECIFIC_F = 0x0004;

        /// Event doesn't need default database to be updated (`CREATE DATABASE`, ...).
        const LOG_EVENT_SUPPRESS_USE_F = 0x0008;

        /// Unused.
        const LOG_EVENT_UPDATE_TABLE_MAP_VERSION_F = 0x0010;

        /// Event is created by the slaves SQL-thread and shouldn't update the master-log pos.
        const LOG_EVENT_ARTIFICIAL_F = 0x0020;

        /// Event is created by the slaves IO-thread when written to the relay log.
        const LOG_EVENT_RELAY_LOG_F = 0x0040;

        /// Setting this flag will mark an event as Ignorable.
        const LOG_EVENT_IGNORABLE_F = 0x0080;

        /// Events with this flag are not filtered (e.g. on the current
        /// database) and are always written to the binary log regardless of
        /// filters.
        const LOG_EVENT_NO_FILTER_F = 0x0100;

        /// MTS: group of events can be marked to force its execution in isolation from
        /// any other Workers.
        const LOG_EVENT_MTS_ISOLATE_F = 0x0200;
    }
}

/// Enumeration spcifying checksum algorithm used to encode a binary log event.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BinlogChecksumAlg {
    /// Events are without checksum though its generator is checksum-capable New Master (NM).
    BINLOG_CHECKSUM_ALG_OFF = 0,
    /// CRC32 of zlib algorithm
    BINLOG_CHECKSUM_ALG_CRC32 = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Unknown checksum algorithm {0}")]
#[repr(transparent)]
pub struct UnknownChecksumAlg(pub u8);

impl From<UnknownChecksumAlg> for u8 {
    fn from(x: UnknownChecksumAlg) -> Self {
        x.0
    }
}

impl TryFrom<u8> for BinlogChecksumAlg {
    type Error = UnknownChecksumAlg;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::BINLOG_CHECKSUM_ALG_OFF),
            1 => Ok(Self::BINLOG_CHECKSUM_ALG_CRC32),
            x => Err(UnknownChecksumAlg(x)),
        }
    }
}

/// Type of an incident event.
#[repr(u16)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum IncidentType {
    /// No incident.
    INCIDENT_NONE = 0,
    /// There are possibly lost events in the replication stream.
    INCIDENT_LOST_EVENTS = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Unknown item incident type {0}")]
#[repr(transparent)]
pub struct UnknownIncidentType(pub u16);

impl From<UnknownIncidentType> for u16 {
    fn from(x: UnknownIncidentType) -> Self {
        x.0
    }
}

impl TryFrom<u16> for IncidentType {
    type Error = UnknownIncidentType;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::INCIDENT_NONE),
            1 => Ok(Self::INCIDENT_LOST_EVENTS),
            x => Err(UnknownIncidentType(x)),
        }
    }
}

/// Binlog event.
///
/// For structs that aren't binlog events `event_size` and `fde` parameters are ignored
/// (one can use `FormatDescriptionEvent::new` constructor).
pub trait BinlogStruct {
    /// An event type, associated with this struct (if any).
    const EVENT_TYPE: Option<EventType>;

    /// Will read this struct from the given stream.
    ///
    /// *   implementation must error with `UnexpectedEof` if `event_size` is less than minimum
    ///     event size for this struct,
    /// *   implementation must error with (`Other`, `"bytes remaining on stream"`) if `event_size`
    ///     is greater than the event.
    ///
    /// Requires that if `Self::EVENT_TYPE` isn't `None`, then `event_size` and `data`
    /// are both without checksum-related suffix of length:
    ///
    /// *   `BINLOG_CHECKSUM_ALG_DESC_LEN + BINLOG_CHECKSUM_LEN` for `FormatDescriptionEvent`;
    /// *   `BINLOG_CHECKSUM_LEN` for other events.
    fn read<T: Read>(event_size: usize, fde: &FormatDescriptionEvent, input: T) -> io::Result<Self>
    where
        Self: Sized;

    /// Will write this struct to the given stream.
    ///
    /// # Notes
    ///
    /// *   implementation must error with `WriteZero` if field exceeds its maximum length.
    fn write<T: Write>(&self, version: BinlogVersion, output: T) -> io::Result<()>;

    /// Returns serialized length of this struct in bytes.
    ///
    /// *   implementation must truncate each field to its maximum length.
    fn len(&self, version: BinlogVersion) -> usize;
}

/// A binlog file starts with a Binlog File Header `[ fe 'bin' ]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct BinlogFileHeader;

impl BinlogFileHeader {
    /// Length of a binlog file header.
    pub const LEN: usize = 4;
    /// Value of a binlog file header.
    pub const VALUE: [u8; Self::LEN] = [0xfe, b'b', b'i', b'n'];
}

impl BinlogStruct for BinlogFileHeader {
    const EVENT_TYPE: Option<EventType> = None;

    /// Event size and post-header length will be ignored for this struct.
    ///
    /// # Note
    ///
    /// It'll return `InvalidData` if header != `Self::VALUE`.
    fn read<T: Read>(
        _event_size: usize,
        _fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut buf = [0_u8; Self::LEN];
        input.read_exact(&mut buf)?;

        if buf != Self::VALUE {
            return Err(Error::new(InvalidData, "invalid binlog file header"));
        }

        Ok(Self)
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_all(&Self::VALUE)
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        Self::LEN
    }
}

/// Reader for binlog events.
///
/// It'll maintain the actual fde and must be used to read binlog files and
/// binlog event streams from a server. Each stream owns its reader (and with
/// it the fde) exclusively; readers of independent streams share nothing.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct EventStreamReader {
    fde: FormatDescriptionEvent,
}

impl EventStreamReader {
    /// Creates new instance.
    pub fn new(version: BinlogVersion) -> Self {
        Self {
            fde: FormatDescriptionEvent::new(version),
        }
    }

    /// Returns the format description event the stream is currently
    /// interpreted against.
    pub fn fde(&self) -> &FormatDescriptionEvent {
        &self.fde
    }

    /// Will read next event from the given stream using actual fde.
    pub fn read<T: Read>(&mut self, input: T) -> io::Result<Event> {
        let event = Event::read(0, &self.fde, input)?;

        // a new fde replaces the active one wholesale; it is never patched in place
        if event.header.event_type.get() == Ok(EventType::FORMAT_DESCRIPTION_EVENT) {
            let mut fde = event.read_event::<FormatDescriptionEvent>()?;
            fde.footer = event.footer;
            self.fde = fde;
        }

        Ok(event)
    }
}

/// Binlog file.
///
/// It's an iterator over events in a binlog file.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BinlogFile<T> {
    reader: EventStreamReader,
    read: T,
}

impl<T: Read> BinlogFile<T> {
    /// Creates new binlog file.
    ///
    /// It'll try to read binlog file header.
    pub fn new(version: BinlogVersion, mut read: T) -> io::Result<Self> {
        let reader = EventStreamReader::new(version);
        BinlogFileHeader::read(BinlogFileHeader::LEN, &reader.fde, &mut read)?;
        Ok(Self { reader, read })
    }
}

impl<T: Read> Iterator for BinlogFile<T> {
    type Item = io::Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read(&mut self.read) {
            Ok(event) => Some(Ok(event)),
            Err(err) if err.kind() == UnexpectedEof => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Parsed event data.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum EventData {
    UnknownEvent,
    StartEventV3(StartEventV3),
    /// Ignored by this implementation
    QueryEvent(Vec<u8>),
    StopEvent,
    RotateEvent(RotateEvent),
    /// Ignored by this implementation
    IntvarEvent(Vec<u8>),
    /// Ignored by this implementation
    LoadEvent(Vec<u8>),
    SlaveEvent,
    /// Ignored by this implementation
    CreateFileEvent(Vec<u8>),
    /// Ignored by this implementation
    AppendBlockEvent(Vec<u8>),
    /// Ignored by this implementation
    ExecLoadEvent(Vec<u8>),
    /// Ignored by this implementation
    DeleteFileEvent(Vec<u8>),
    /// Ignored by this implementation
    NewLoadEvent(Vec<u8>),
    RandEvent(RandEvent),
    /// Ignored by this implementation
    UserVarEvent(Vec<u8>),
    FormatDescriptionEvent(FormatDescriptionEvent),
    XidEvent(XidEvent),
    /// Ignored by this implementation
    BeginLoadQueryEvent(Vec<u8>),
    /// Ignored by this implementation
    ExecuteLoadQueryEvent(Vec<u8>),
    /// Ignored by this implementation
    TableMapEvent(Vec<u8>),
    /// Ignored by this implementation
    PreGaWriteRowsEvent(Vec<u8>),
    /// Ignored by this implementation
    PreGaUpdateRowsEvent(Vec<u8>),
    /// Ignored by this implementation
    PreGaDeleteRowsEvent(Vec<u8>),
    /// Ignored by this implementation
    WriteRowsEventV1(Vec<u8>),
    /// Ignored by this implementation
    UpdateRowsEventV1(Vec<u8>),
    /// Ignored by this implementation
    DeleteRowsEventV1(Vec<u8>),
    IncidentEvent(IncidentEvent),
    HeartbeatEvent(HeartbeatEvent),
    /// Ignored by this implementation
    IgnorableEvent(Vec<u8>),
    /// Ignored by this implementation
    RowsQueryEvent(Vec<u8>),
    /// Ignored by this implementation
    WriteRowsEvent(Vec<u8>),
    /// Ignored by this implementation
    UpdateRowsEvent(Vec<u8>),
    /// Ignored by this implementation
    DeleteRowsEvent(Vec<u8>),
    GtidEvent(GtidEvent),
    AnonymousGtidEvent(AnonymousGtidEvent),
    PreviousGtidsEvent(PreviousGtidsEvent),
    /// Ignored by this implementation
    TransactionContextEvent(Vec<u8>),
    /// Ignored by this implementation
    ViewChangeEvent(Vec<u8>),
    /// Ignored by this implementation
    XaPrepareLogEvent(Vec<u8>),
    /// Ignored by this implementation
    PartialUpdateRowsEvent(Vec<u8>),
}

impl EventData {
    /// Calls `BinlogStruct::write` for this variant.
    pub fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        match self {
            EventData::UnknownEvent => Ok(()),
            EventData::StartEventV3(ev) => ev.write(version, output),
            EventData::QueryEvent(ev) => output.write_all(ev),
            EventData::StopEvent => Ok(()),
            EventData::RotateEvent(ev) => ev.write(version, output),
            EventData::IntvarEvent(ev) => output.write_all(ev),
            EventData::LoadEvent(ev) => output.write_all(ev),
            EventData::SlaveEvent => Ok(()),
            EventData::CreateFileEvent(ev) => output.write_all(ev),
            EventData::AppendBlockEvent(ev) => output.write_all(ev),
            EventData::ExecLoadEvent(ev) => output.write_all(ev),
            EventData::DeleteFileEvent(ev) => output.write_all(ev),
            EventData::NewLoadEvent(ev) => output.write_all(ev),
            EventData::RandEvent(ev) => ev.write(version, output),
            EventData::UserVarEvent(ev) => output.write_all(ev),
            EventData::FormatDescriptionEvent(ev) => ev.write(version, output),
            EventData::XidEvent(ev) => ev.write(version, output),
            EventData::BeginLoadQueryEvent(ev) => output.write_all(ev),
            EventData::ExecuteLoadQueryEvent(ev) => output.write_all(ev),
            EventData::TableMapEvent(ev) => output.write_all(ev),
            EventData::PreGaWriteRowsEvent(ev) => output.write_all(ev),
            EventData::PreGaUpdateRowsEvent(ev) => output.write_all(ev),
            EventData::PreGaDeleteRowsEvent(ev) => output.write_all(ev),
            EventData::WriteRowsEventV1(ev) => output.write_all(ev),
            EventData::UpdateRowsEventV1(ev) => output.write_all(ev),
            EventData::DeleteRowsEventV1(ev) => output.write_all(ev),
            EventData::IncidentEvent(ev) => ev.write(version, output),
            EventData::HeartbeatEvent(ev) => ev.write(version, output),
            EventData::IgnorableEvent(ev) => output.write_all(ev),
            EventData::RowsQueryEvent(ev) => output.write_all(ev),
            EventData::WriteRowsEvent(ev) => output.write_all(ev),
            EventData::UpdateRowsEvent(ev) => output.write_all(ev),
            EventData::DeleteRowsEvent(ev) => output.write_all(ev),
            EventData::GtidEvent(ev) => ev.write(version, output),
            EventData::AnonymousGtidEvent(ev) => ev.write(version, output),
            EventData::PreviousGtidsEvent(ev) => ev.write(version, output),
            EventData::TransactionContextEvent(ev) => output.write_all(ev),
            EventData::ViewChangeEvent(ev) => output.write_all(ev),
            EventData::XaPrepareLogEvent(ev) => output.write_all(ev),
            EventData::PartialUpdateRowsEvent(ev) => output.write_all(ev),
        }
    }
}

/// Raw binlog event.
///
/// A binlog event starts with a Binlog Event header and is followed by a Binlog Event Type
/// specific data part.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Event {
    /// Format description event.
    ///
    /// An owned copy of the event this one was framed under. Records never
    /// borrow the stream's fde.
    pub fde: FormatDescriptionEvent,
    /// Common header of an event.
    pub header: BinlogEventHeader,
    /// An event-type specific data.
    ///
    /// Checksum-related suffix is truncated:
    ///
    /// *   checksum algorithm description (for fde) will go to `footer`;
    /// *   checksum will go to `checksum`.
    pub data: Vec<u8>,
    /// Log event footer.
    pub footer: BinlogEventFooter,
    /// Event checksum.
    ///
    /// Makes sense only if checksum algorithm is defined in `footer`.
    pub checksum: [u8; BinlogEventFooter::BINLOG_CHECKSUM_LEN],
}

impl Event {
    /// Read event-type specific data as a binlog struct.
    pub fn read_event<T: BinlogStruct>(&self) -> io::Result<T> {
        BinlogStruct::read(
            // we'll use data.len() here because of truncated event footer
            usize::from(self.fde.common_header_len) + self.data.len(),
            &self.fde,
            &*self.data,
        )
    }

    /// Reads event data. Returns `None` if event type is unknown.
    pub fn read_data(&self) -> io::Result<Option<EventData>> {
        use EventType::*;

        let event_type = match self.header.event_type.get() {
            Ok(event_type) => event_type,
            _ => return Ok(None),
        };

        let event_data = match event_type {
            ENUM_END_EVENT | UNKNOWN_EVENT => EventData::UnknownEvent,
            START_EVENT_V3 => EventData::StartEventV3(self.read_event()?),
            QUERY_EVENT => EventData::QueryEvent(self.data.clone()),
            STOP_EVENT => EventData::StopEvent,
            ROTATE_EVENT => EventData::RotateEvent(self.read_event()?),
            INTVAR_EVENT => EventData::IntvarEvent(self.data.clone()),
            LOAD_EVENT => EventData::LoadEvent(self.data.clone()),
            SLAVE_EVENT => EventData::SlaveEvent,
            CREATE_FILE_EVENT => EventData::CreateFileEvent(self.data.clone()),
            APPEND_BLOCK_EVENT => EventData::AppendBlockEvent(self.data.clone()),
            EXEC_LOAD_EVENT => EventData::ExecLoadEvent(self.data.clone()),
            DELETE_FILE_EVENT => EventData::DeleteFileEvent(self.data.clone()),
            NEW_LOAD_EVENT => EventData::NewLoadEvent(self.data.clone()),
            RAND_EVENT => EventData::RandEvent(self.read_event()?),
            USER_VAR_EVENT => EventData::UserVarEvent(self.data.clone()),
            FORMAT_DESCRIPTION_EVENT => {
                let mut fde: FormatDescriptionEvent = self.read_event()?;
                fde.footer = self.footer;
                EventData::FormatDescriptionEvent(fde)
            }
            XID_EVENT => EventData::XidEvent(self.read_event()?),
            BEGIN_LOAD_QUERY_EVENT => EventData::BeginLoadQueryEvent(self.data.clone()),
            EXECUTE_LOAD_QUERY_EVENT => EventData::ExecuteLoadQueryEvent(self.data.clone()),
            TABLE_MAP_EVENT => EventData::TableMapEvent(self.data.clone()),
            PRE_GA_WRITE_ROWS_EVENT => EventData::PreGaWriteRowsEvent(self.data.clone()),
            PRE_GA_UPDATE_ROWS_EVENT => EventData::PreGaUpdateRowsEvent(self.data.clone()),
            PRE_GA_DELETE_ROWS_EVENT => EventData::PreGaDeleteRowsEvent(self.data.clone()),
            WRITE_ROWS_EVENT_V1 => EventData::WriteRowsEventV1(self.data.clone()),
            UPDATE_ROWS_EVENT_V1 => EventData::UpdateRowsEventV1(self.data.clone()),
            DELETE_ROWS_EVENT_V1 => EventData::DeleteRowsEventV1(self.data.clone()),
            INCIDENT_EVENT => EventData::IncidentEvent(self.read_event()?),
            HEARTBEAT_EVENT => EventData::HeartbeatEvent(self.read_event()?),
            IGNORABLE_EVENT => EventData::IgnorableEvent(self.data.clone()),
            ROWS_QUERY_EVENT => EventData::RowsQueryEvent(self.data.clone()),
            WRITE_ROWS_EVENT => EventData::WriteRowsEvent(self.data.clone()),
            UPDATE_ROWS_EVENT => EventData::UpdateRowsEvent(self.data.clone()),
            DELETE_ROWS_EVENT => EventData::DeleteRowsEvent(self.data.clone()),
            GTID_EVENT => EventData::GtidEvent(self.read_event()?),
            ANONYMOUS_GTID_EVENT => EventData::AnonymousGtidEvent(self.read_event()?),
            PREVIOUS_GTIDS_EVENT => EventData::PreviousGtidsEvent(self.read_event()?),
            TRANSACTION_CONTEXT_EVENT => EventData::TransactionContextEvent(self.data.clone()),
            VIEW_CHANGE_EVENT => EventData::ViewChangeEvent(self.data.clone()),
            XA_PREPARE_LOG_EVENT => EventData::XaPrepareLogEvent(self.data.clone()),
            PARTIAL_UPDATE_ROWS_EVENT => EventData::PartialUpdateRowsEvent(self.data.clone()),
        };

        Ok(Some(event_data))
    }

    /// Calculates checksum for this event.
    pub fn calc_checksum(&self, alg: BinlogChecksumAlg) -> u32 {
        let is_fde = self.header.event_type.0 == EventType::FORMAT_DESCRIPTION_EVENT as u8;

        let mut hasher = crc32fast::Hasher::new();
        let mut header = [0_u8; BinlogEventHeader::LEN];
        let mut header_struct = self.header.clone();
        if header_struct
            .flags
            .get()
            .contains(EventFlags::LOG_EVENT_BINLOG_IN_USE_F)
        {
            // In case this is a Format_description_log_event, we need to clear
            // the LOG_EVENT_BINLOG_IN_USE_F flag before computing the checksum,
            // since the flag will be cleared when the binlog is closed.
            // On verification, the flag is dropped before computing the checksum too.
            header_struct.flags.0 &= !(EventFlags::LOG_EVENT_BINLOG_IN_USE_F.bits());
        }
        header_struct
            .write(
                self.fde
                    .binlog_version
                    .get()
                    .unwrap_or(BinlogVersion::Version4),
                &mut header[..],
            )
            .expect("should not fail");
        hasher.update(&header);
        hasher.update(&self.data);
        if is_fde {
            hasher.update(&[alg as u8][..]);
        }
        hasher.finalize()
    }
}

impl BinlogStruct for Event {
    const EVENT_TYPE: Option<EventType> = None;

    /// `event_size` will be ignored.
    fn read<T: Read>(
        _event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        if !fde.is_valid() {
            return Err(Error::new(
                InvalidData,
                "format description event is invalid",
            ));
        }

        let common_header_len = usize::from(fde.common_header_len);
        let mut fde = fde.clone();

        let mut header = BinlogEventHeader::read(BinlogEventHeader::LEN, &fde, &mut input)?;

        // streams written with the legacy numbering carry legacy type codes
        header.event_type = RawField::new(fde.map_event_type(header.event_type.0));

        if (header.event_size as usize) < common_header_len {
            return Err(Error::new(
                UnexpectedEof,
                "event size is less than the common header length",
            ));
        }

        let mut data = vec![0_u8; (S(header.event_size as usize) - S(common_header_len)).0];
        input.read_exact(&mut data)?;

        let is_fde = header.event_type.0 == EventType::FORMAT_DESCRIPTION_EVENT as u8;
        let mut bytes_to_truncate = 0;
        let mut checksum = [0_u8; BinlogEventFooter::BINLOG_CHECKSUM_LEN];

        let footer = if is_fde {
            let footer = BinlogEventFooter::read(&data)?;
            if footer.checksum_alg.is_some() {
                // truncate checksum algorithm description
                bytes_to_truncate += BinlogEventFooter::BINLOG_CHECKSUM_ALG_DESC_LEN;
            }
            // We'll update dummy fde footer
            fde.footer = footer;
            footer
        } else {
            fde.footer
        };

        // fde will always contain checksum (see WL#2540)
        let contains_checksum = footer.checksum_alg.is_some()
            && (is_fde || footer.checksum_alg != Some(RawField::new(0)));

        if contains_checksum {
            bytes_to_truncate += BinlogEventFooter::BINLOG_CHECKSUM_LEN;
        }

        if data.len() < bytes_to_truncate {
            return Err(Error::new(
                UnexpectedEof,
                "event data is shorter than its checksum footer",
            ));
        }

        if contains_checksum {
            checksum.copy_from_slice(&data[data.len() - BinlogEventFooter::BINLOG_CHECKSUM_LEN..]);
        }

        data.truncate(data.len() - bytes_to_truncate);

        Ok(Self {
            header,
            fde,
            data,
            footer,
            checksum,
        })
    }

    fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        let is_fde = self.header.event_type.0 == EventType::FORMAT_DESCRIPTION_EVENT as u8;
        let mut output = output.limit(S(self.len(version)));

        self.header.write(version, &mut output)?;
        output.write_all(&self.data)?;

        if let Ok(Some(alg)) = self.footer.get_checksum_alg() {
            if is_fde {
                output.write_u8(alg as u8)?;
            }
            if alg == BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_CRC32 || is_fde {
                output.write_u32::<LittleEndian>(self.calc_checksum(alg))?;
            }
        }

        Ok(())
    }

    fn len(&self, version: BinlogVersion) -> usize {
        let is_fde = self.header.event_type.0 == EventType::FORMAT_DESCRIPTION_EVENT as u8;
        let mut len = S(0);

        len += S(BinlogEventHeader::LEN);
        len += S(self.data.len());
        if let Ok(Some(alg)) = self.footer.get_checksum_alg() {
            if is_fde {
                len += S(BinlogEventFooter::BINLOG_CHECKSUM_ALG_DESC_LEN);
            }
            if is_fde || alg != BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_OFF {
                len += S(BinlogEventFooter::BINLOG_CHECKSUM_LEN);
            }
        }

        min(len.0, u32::MAX as usize - BinlogEventHeader::LEN)
    }
}

/// The binlog event header starts each event and is 19 bytes long assuming binlog version >= 3.
///
/// Reading honors the common header length declared by the active fde: the
/// 3.23-era 13-byte layout has no `log_pos` and no `flags`, and producers
/// declaring a header wider than 19 bytes get the excess skipped.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BinlogEventHeader {
    /// Seconds since unix epoch.
    pub timestamp: u32,
    /// Raw event Type.
    pub event_type: RawField<u8, UnknownEventType, EventType>,
    /// Server-id of the originating mysql-server.
    ///
    /// Used to filter out events in circular replication.
    pub server_id: u32,
    /// Size of the event (header, post-header, body).
    pub event_size: u32,
    /// Position of the next event. Zero for the 13-byte header layout.
    pub log_pos: u32,
    /// Binlog Event Flag.
    ///
    /// This field contains raw value. Use [`RawFlags::get`] to get the actual flags.
    pub flags: RawFlags<EventFlags>,
}

impl BinlogEventHeader {
    /// Binlog event header length for version >= 3.
    pub const LEN: usize = 19;
}

impl BinlogStruct for BinlogEventHeader {
    const EVENT_TYPE: Option<EventType> = None;

    /// Event size will be ignored for this struct.
    fn read<T: Read>(
        _event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let common_header_len = usize::from(fde.common_header_len);

        let timestamp = input.read_u32::<LittleEndian>()?;
        let event_type = input.read_u8()?;
        let server_id = input.read_u32::<LittleEndian>()?;
        let event_size = input.read_u32::<LittleEndian>()?;

        let (log_pos, flags, consumed) = if common_header_len >= Self::LEN {
            (
                input.read_u32::<LittleEndian>()?,
                input.read_u16::<LittleEndian>()?,
                Self::LEN,
            )
        } else {
            (0, 0, usize::from(FormatDescriptionEvent::OLD_HEADER_LEN))
        };

        for _ in consumed..common_header_len {
            input.read_u8()?;
        }

        Ok(Self {
            timestamp,
            event_type: RawField::new(event_type),
            server_id,
            event_size,
            log_pos,
            flags: RawFlags(flags),
        })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_u32::<LittleEndian>(self.timestamp)?;
        output.write_u8(self.event_type.0)?;
        output.write_u32::<LittleEndian>(self.server_id)?;
        output.write_u32::<LittleEndian>(self.event_size)?;
        output.write_u32::<LittleEndian>(self.log_pos)?;
        output.write_u16::<LittleEndian>(self.flags.0)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        Self::LEN
    }
}

/// Binlog event footer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct BinlogEventFooter {
    /// Raw checksum algorithm description.
    ///
    /// `None` means the producer predates checksums entirely, not merely
    /// that the algorithm is unknown.
    pub checksum_alg: Option<RawField<u8, UnknownChecksumAlg, BinlogChecksumAlg>>,
}

impl BinlogEventFooter {
    /// Length of the checksum algorithm description.
    pub const BINLOG_CHECKSUM_ALG_DESC_LEN: usize = 1;
    /// Length of the checksum.
    pub const BINLOG_CHECKSUM_LEN: usize = 4;
    /// Minimum MySql version that supports checksums.
    pub const CHECKSUM_VERSION_PRODUCT: (u8, u8, u8) = (5, 6, 1);

    /// Version gate shared by every checksum decision in the codec: `true`
    /// iff a stream produced by `version` carries checksum descriptors.
    pub fn checksum_supported(version: (u8, u8, u8)) -> bool {
        version_product(version) >= version_product(Self::CHECKSUM_VERSION_PRODUCT)
    }

    /// Returns parsed checksum algorithm, or raw value if algorithm is unknown.
    pub fn get_checksum_alg(&self) -> Result<Option<BinlogChecksumAlg>, UnknownChecksumAlg> {
        self.checksum_alg.as_ref().map(RawField::get).transpose()
    }

    /// Reads binlog event footer from the given buffer.
    ///
    /// Requires that buf contains `FormatDescriptionEvent` data.
    pub fn read(buf: &[u8]) -> io::Result<Self> {
        let checksum_alg = if buf.len()
            >= FormatDescriptionEvent::SERVER_VER_OFFSET + FormatDescriptionEvent::SERVER_VER_LEN
        {
            let mut server_version = [0_u8; FormatDescriptionEvent::SERVER_VER_LEN];
            (&buf[FormatDescriptionEvent::SERVER_VER_OFFSET..]).read_exact(&mut server_version)?;
            server_version[FormatDescriptionEvent::SERVER_VER_LEN - 1] = 0;
            if Self::checksum_supported(split_version(&server_version[..])) {
                let offset = buf.len()
                    - (Self::BINLOG_CHECKSUM_ALG_DESC_LEN + Self::BINLOG_CHECKSUM_LEN);
                Some(buf[offset])
            } else {
                None
            }
        } else {
            None
        };

        Ok(Self {
            checksum_alg: checksum_alg.map(RawField::new),
        })
    }
}

impl Default for BinlogEventFooter {
    fn default() -> Self {
        BinlogEventFooter {
            checksum_alg: Some(RawField::new(
                BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_OFF as u8,
            )),
        }
    }
}

/// A wrapper for 50-bytes array.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct RawServerVersion(pub [u8; FormatDescriptionEvent::SERVER_VER_LEN]);

impl fmt::Debug for RawServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (&self.0[..]).fmt(f)
    }
}

impl AsRef<[u8]> for RawServerVersion {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

/// Number of entries in a legacy event numbering table (type ids 0..=22).
pub const EVENT_TYPE_PERMUTATION_LEN: usize = 23;

/// A historical pre-release version string shape.
///
/// Matching is positional: the major version digit at byte 0, dots at bytes 1
/// and 3, a literal suffix from byte 5 on. Bytes 2 and 4 (the minor and patch
/// digits) are free.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct LegacyVersionPattern {
    major: u8,
    suffix: &'static [u8],
}

impl LegacyVersionPattern {
    const fn new(major: u8, suffix: &'static [u8]) -> Self {
        Self { major, suffix }
    }

    fn matches(&self, version: &[u8]) -> bool {
        version.len() > 5
            && version[0] == self.major
            && version[1] == b'.'
            && version[3] == b'.'
            && version[5..].starts_with(self.suffix)
    }
}

/// Maps the event numbering of the pre-5.1.17 development trees to the
/// current one. Ids 0..=15 didn't move; the table map, the pre-GA rows
/// events, xid and the load-query family did.
const LEGACY_EVENT_NUMBERING: [u8; EVENT_TYPE_PERMUTATION_LEN] = [
    EventType::UNKNOWN_EVENT as u8,
    EventType::START_EVENT_V3 as u8,
    EventType::QUERY_EVENT as u8,
    EventType::STOP_EVENT as u8,
    EventType::ROTATE_EVENT as u8,
    EventType::INTVAR_EVENT as u8,
    EventType::LOAD_EVENT as u8,
    EventType::SLAVE_EVENT as u8,
    EventType::CREATE_FILE_EVENT as u8,
    EventType::APPEND_BLOCK_EVENT as u8,
    EventType::EXEC_LOAD_EVENT as u8,
    EventType::DELETE_FILE_EVENT as u8,
    EventType::NEW_LOAD_EVENT as u8,
    EventType::RAND_EVENT as u8,
    EventType::USER_VAR_EVENT as u8,
    EventType::FORMAT_DESCRIPTION_EVENT as u8,
    EventType::TABLE_MAP_EVENT as u8,
    EventType::PRE_GA_WRITE_ROWS_EVENT as u8,
    EventType::PRE_GA_UPDATE_ROWS_EVENT as u8,
    EventType::PRE_GA_DELETE_ROWS_EVENT as u8,
    EventType::XID_EVENT as u8,
    EventType::BEGIN_LOAD_QUERY_EVENT as u8,
    EventType::EXECUTE_LOAD_QUERY_EVENT as u8,
];

/// Development trees whose binlogs carry [`LEGACY_EVENT_NUMBERING`].
const EVENT_TYPE_PERMUTATIONS: &[(LegacyVersionPattern, &[u8; EVENT_TYPE_PERMUTATION_LEN])] = &[
    (
        LegacyVersionPattern::new(b'5', b"-a_drop5p13"),
        &LEGACY_EVENT_NUMBERING,
    ),
    (
        LegacyVersionPattern::new(b'5', b"-a_drop5p20"),
        &LEGACY_EVENT_NUMBERING,
    ),
];

/// Producer-side parameters of a built [`FormatDescriptionEvent`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FdeOptions {
    binlog_version: BinlogVersion,
    server_version_override: Option<String>,
    checksum_alg: BinlogChecksumAlg,
}

impl FdeOptions {
    /// Creates options with the compiled-in defaults for `binlog_version`.
    pub fn new(binlog_version: BinlogVersion) -> Self {
        Self {
            binlog_version,
            server_version_override: None,
            checksum_alg: BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_OFF,
        }
    }

    /// Replaces the server version embedded into the built event.
    ///
    /// This is how tests emulate streams of other releases. The override
    /// travels by value instead of through process-wide state, so decoding
    /// stays deterministic and thread-safe.
    pub fn with_server_version<T: Into<String>>(mut self, server_version: T) -> Self {
        self.server_version_override = Some(server_version.into());
        self
    }

    /// Declares the checksum algorithm of the produced stream.
    ///
    /// Ignored for server versions that predate checksums.
    pub fn with_checksum_alg(mut self, checksum_alg: BinlogChecksumAlg) -> Self {
        self.checksum_alg = checksum_alg;
        self
    }
}

/// A format description event is the first event of a binlog for binlog-version 4.
///
/// It describes how the other events are layed out. One instance exists per
/// stream; it exclusively owns its header-length table and permutation table
/// and is replaced wholesale when the stream announces a new one.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FormatDescriptionEvent {
    /// Version of this binlog format.
    pub binlog_version: RawField<u16, UnknownBinlogVersion, BinlogVersion>,

    /// Version of the MySQL Server that created the binlog (len=50).
    ///
    /// The string is evaluted to apply work-arounds in the slave.
    pub server_version: RawText<RawServerVersion>,

    /// Seconds since Unix epoch when the binlog was created.
    pub create_timestamp: u32,

    /// Length of the common event header declared by the producer of this
    /// stream: 19 since binlog version 3, 13 for the 3.23-era layout.
    pub common_header_len: u8,

    /// An array indexed by (current-numbering) Binlog Event Type - 1 to extract the length
    /// of the event specific header.
    ///
    /// Empty for an event nothing can be decoded against; check
    /// [`Self::is_valid`]. Use [`Self::get_event_type_header_length`] to get header length
    /// for particular event type.
    pub event_type_header_lengths: Vec<u8>,

    /// Maps a legacy event type id to the current numbering.
    ///
    /// Present only for streams produced by the development trees that used
    /// the old numbering; `event_type_header_lengths` is already rewritten to
    /// the current numbering when this is present.
    pub event_type_permutation: Option<[u8; EVENT_TYPE_PERMUTATION_LEN]>,

    /// This event structure also stores a footer containig checksum algorithm description.
    ///
    /// # Note
    ///
    /// Footer must be assigned manualy after `Self::read`
    pub footer: BinlogEventFooter,
}

impl FormatDescriptionEvent {
    /// Length of a server version string.
    pub const SERVER_VER_LEN: usize = 50;
    /// Offset of a server version string.
    pub const SERVER_VER_OFFSET: usize = 2;
    /// Length of the 3.23-era common header, the historical minimum.
    pub const OLD_HEADER_LEN: u8 = 13;

    /// Number of event types in the modern vocabulary.
    pub const LOG_EVENT_TYPES: usize = EventType::ENUM_END_EVENT as usize - 1;
    /// Number of event types in the vocabulary frozen when binlog version 4
    /// introduced the format description event.
    pub const LOG_EVENT_TYPES_V1_3: usize = EventType::FORMAT_DESCRIPTION_EVENT as usize - 1;

    // Other format-related constants
    /// Length of a query event post-header, where 3.23, 4.x and 5.0 agree.
    pub const QUERY_HEADER_MINIMAL_LEN: usize = 4 + 4 + 1 + 2;
    /// Length of a query event post-header, where 5.0 differs: 2 for length of N-bytes vars.
    pub const QUERY_HEADER_LEN: usize = Self::QUERY_HEADER_MINIMAL_LEN + 2;
    /// Length of a stop event post-header.
    pub const STOP_HEADER_LEN: usize = 0;
    /// Length of a start event post-header.
    pub const START_V3_HEADER_LEN: usize = 2 + Self::SERVER_VER_LEN + 4;
    /// Length of a rotate event post-header.
    pub const ROTATE_HEADER_LEN: usize = 8;
    /// Length of an intvar event post-header.
    pub const INTVAR_HEADER_LEN: usize = 0;
    /// Length of a load event post-header.
    pub const LOAD_HEADER_LEN: usize = 4 + 4 + 4 + 1 + 1 + 4;
    /// Length of a slave event post-header.
    pub const SLAVE_HEADER_LEN: usize = 0;
    /// Length of a create file event post-header.
    pub const CREATE_FILE_HEADER_LEN: usize = 4;
    /// Length of an append block event post-header.
    pub const APPEND_BLOCK_HEADER_LEN: usize = 4;
    /// Length of an exec load event post-header.
    pub const EXEC_LOAD_HEADER_LEN: usize = 4;
    /// Length of a delete file event post-header.
    pub const DELETE_FILE_HEADER_LEN: usize = 4;
    /// Length of a new load event post-header.
    pub const NEW_LOAD_HEADER_LEN: usize = Self::LOAD_HEADER_LEN;
    /// Length of a rand event post-header.
    pub const RAND_HEADER_LEN: usize = 0;
    /// Length of a user var event post-header.
    pub const USER_VAR_HEADER_LEN: usize = 0;
    /// Length of a fde event post-header.
    pub const FORMAT_DESCRIPTION_HEADER_LEN: usize =
        Self::START_V3_HEADER_LEN + 1 + Self::LOG_EVENT_TYPES;
    /// Length of a xid event post-header.
    pub const XID_HEADER_LEN: usize = 0;
    /// Length of a begin load query event post-header.
    pub const BEGIN_LOAD_QUERY_HEADER_LEN: usize = Self::APPEND_BLOCK_HEADER_LEN;
    /// Length of an execute load query event extra header.
    pub const EXECUTE_LOAD_QUERY_EXTRA_HEADER_LEN: usize = 4 + 4 + 4 + 1;
    /// Length of an execute load query event post-header.
    pub const EXECUTE_LOAD_QUERY_HEADER_LEN: usize =
        Self::QUERY_HEADER_LEN + Self::EXECUTE_LOAD_QUERY_EXTRA_HEADER_LEN;
    /// Length of a table map event post-header.
    pub const TABLE_MAP_HEADER_LEN: usize = 8;
    /// Length of a v1 rows events post-header.
    pub const ROWS_HEADER_LEN_V1: usize = 8;
    /// Length of an incident event post-header.
    pub const INCIDENT_HEADER_LEN: usize = 2;
    /// Length of a heartbeat event post-header.
    pub const HEARTBEAT_HEADER_LEN: usize = 0;
    /// Length of an ignorable event post-header.
    pub const IGNORABLE_HEADER_LEN: usize = 0;
    /// Length of a rows events post-header.
    pub const ROWS_HEADER_LEN_V2: usize = 10;
    /// Length of a gtid events post-header.
    pub const GTID_HEADER_LEN: usize = GtidEvent::POST_HEADER_LENGTH;
    /// Length of a transaction context event post-header.
    pub const TRANSACTION_CONTEXT_HEADER_LEN: usize = 18;
    /// Length of a view change event post-header.
    pub const VIEW_CHANGE_HEADER_LEN: usize = 52;
    /// Length of a xa prepare event post-header.
    pub const XA_PREPARE_HEADER_LEN: usize = 0;

    // Sentinel for a header-length entry nobody filled in.
    const UNINIT_HEADER_LEN: u8 = u8::MAX;

    /// Creates a format description event with the compiled-in defaults for
    /// `binlog_version`.
    pub fn new(binlog_version: BinlogVersion) -> Self {
        Self::with_options(FdeOptions::new(binlog_version))
    }

    /// Builds a format description event from producer-side options.
    ///
    /// Binlog versions other than 1, 3 and 4 yield an event with an absent
    /// header-length table; nothing can be decoded against such an event.
    pub fn with_options(options: FdeOptions) -> Self {
        let FdeOptions {
            binlog_version,
            server_version_override,
            checksum_alg,
        } = options;

        let (default_version, common_header_len, vocabulary) = match binlog_version {
            BinlogVersion::Version4 => (
                SERVER_VERSION,
                BinlogEventHeader::LEN as u8,
                Self::LOG_EVENT_TYPES,
            ),
            BinlogVersion::Version3 => (
                "4.0",
                BinlogEventHeader::LEN as u8,
                Self::LOG_EVENT_TYPES_V1_3,
            ),
            BinlogVersion::Version1 => ("3.23", Self::OLD_HEADER_LEN, Self::LOG_EVENT_TYPES_V1_3),
            BinlogVersion::Version2 => ("", BinlogEventHeader::LEN as u8, 0),
        };

        let mut server_version = [0_u8; Self::SERVER_VER_LEN];
        let text = server_version_override
            .as_deref()
            .unwrap_or(default_version)
            .as_bytes();
        // truncated rather than overrun; the last byte stays null
        let text_len = min(text.len(), Self::SERVER_VER_LEN - 1);
        server_version[..text_len].copy_from_slice(&text[..text_len]);

        let mut event_type_header_lengths = vec![Self::UNINIT_HEADER_LEN; vocabulary];
        match binlog_version {
            BinlogVersion::Version4 => Self::fill_header_lengths_v4(&mut event_type_header_lengths),
            BinlogVersion::Version1 | BinlogVersion::Version3 => {
                Self::fill_header_lengths_v1_3(&mut event_type_header_lengths, binlog_version)
            }
            BinlogVersion::Version2 => (),
        }
        debug_assert!(event_type_header_lengths
            .iter()
            .all(|&x| x != Self::UNINIT_HEADER_LEN));

        let footer = if BinlogEventFooter::checksum_supported(split_version(&server_version[..])) {
            BinlogEventFooter {
                checksum_alg: Some(RawField::new(checksum_alg as u8)),
            }
        } else {
            BinlogEventFooter { checksum_alg: None }
        };

        Self {
            binlog_version: RawField::new(binlog_version as u16),
            server_version: RawText(RawServerVersion(server_version)),
            create_timestamp: 0,
            common_header_len,
            event_type_header_lengths,
            event_type_permutation: None,
            footer,
        }
    }

    fn fill_header_lengths_v4(lengths: &mut [u8]) {
        use EventType::*;

        let mut set = |event_type: EventType, len: usize| {
            lengths[event_type as usize - 1] = len as u8;
        };

        set(START_EVENT_V3, Self::START_V3_HEADER_LEN);
        set(QUERY_EVENT, Self::QUERY_HEADER_LEN);
        set(STOP_EVENT, Self::STOP_HEADER_LEN);
        set(ROTATE_EVENT, Self::ROTATE_HEADER_LEN);
        set(INTVAR_EVENT, Self::INTVAR_HEADER_LEN);
        set(LOAD_EVENT, Self::LOAD_HEADER_LEN);
        set(SLAVE_EVENT, Self::SLAVE_HEADER_LEN);
        set(CREATE_FILE_EVENT, Self::CREATE_FILE_HEADER_LEN);
        set(APPEND_BLOCK_EVENT, Self::APPEND_BLOCK_HEADER_LEN);
        set(EXEC_LOAD_EVENT, Self::EXEC_LOAD_HEADER_LEN);
        set(DELETE_FILE_EVENT, Self::DELETE_FILE_HEADER_LEN);
        set(NEW_LOAD_EVENT, Self::NEW_LOAD_HEADER_LEN);
        set(RAND_EVENT, Self::RAND_HEADER_LEN);
        set(USER_VAR_EVENT, Self::USER_VAR_HEADER_LEN);
        set(FORMAT_DESCRIPTION_EVENT, Self::FORMAT_DESCRIPTION_HEADER_LEN);
        set(XID_EVENT, Self::XID_HEADER_LEN);
        set(BEGIN_LOAD_QUERY_EVENT, Self::BEGIN_LOAD_QUERY_HEADER_LEN);
        set(EXECUTE_LOAD_QUERY_EVENT, Self::EXECUTE_LOAD_QUERY_HEADER_LEN);
        set(TABLE_MAP_EVENT, Self::TABLE_MAP_HEADER_LEN);
        set(PRE_GA_WRITE_ROWS_EVENT, 0);
        set(PRE_GA_UPDATE_ROWS_EVENT, 0);
        set(PRE_GA_DELETE_ROWS_EVENT, 0);
        set(WRITE_ROWS_EVENT_V1, Self::ROWS_HEADER_LEN_V1);
        set(UPDATE_ROWS_EVENT_V1, Self::ROWS_HEADER_LEN_V1);
        set(DELETE_ROWS_EVENT_V1, Self::ROWS_HEADER_LEN_V1);
        set(INCIDENT_EVENT, Self::INCIDENT_HEADER_LEN);
        set(HEARTBEAT_EVENT, Self::HEARTBEAT_HEADER_LEN);
        set(IGNORABLE_EVENT, Self::IGNORABLE_HEADER_LEN);
        set(ROWS_QUERY_EVENT, Self::IGNORABLE_HEADER_LEN);
        set(WRITE_ROWS_EVENT, Self::ROWS_HEADER_LEN_V2);
        set(UPDATE_ROWS_EVENT, Self::ROWS_HEADER_LEN_V2);
        set(DELETE_ROWS_EVENT, Self::ROWS_HEADER_LEN_V2);
        set(GTID_EVENT, Self::GTID_HEADER_LEN);
        set(ANONYMOUS_GTID_EVENT, Self::GTID_HEADER_LEN);
        set(PREVIOUS_GTIDS_EVENT, Self::IGNORABLE_HEADER_LEN);
        set(TRANSACTION_CONTEXT_EVENT, Self::TRANSACTION_CONTEXT_HEADER_LEN);
        set(VIEW_CHANGE_EVENT, Self::VIEW_CHANGE_HEADER_LEN);
        set(XA_PREPARE_LOG_EVENT, Self::XA_PREPARE_HEADER_LEN);
        set(PARTIAL_UPDATE_ROWS_EVENT, Self::ROWS_HEADER_LEN_V2);
    }

    fn fill_header_lengths_v1_3(lengths: &mut [u8], binlog_version: BinlogVersion) {
        use EventType::*;

        let mut set = |event_type: EventType, len: usize| {
            lengths[event_type as usize - 1] = len as u8;
        };

        set(START_EVENT_V3, Self::START_V3_HEADER_LEN);
        set(QUERY_EVENT, Self::QUERY_HEADER_MINIMAL_LEN);
        set(STOP_EVENT, Self::STOP_HEADER_LEN);
        // a 3.23 rotate carries no position in its post-header
        set(
            ROTATE_EVENT,
            if binlog_version == BinlogVersion::Version1 {
                0
            } else {
                Self::ROTATE_HEADER_LEN
            },
        );
        set(INTVAR_EVENT, Self::INTVAR_HEADER_LEN);
        set(LOAD_EVENT, Self::LOAD_HEADER_LEN);
        set(SLAVE_EVENT, Self::SLAVE_HEADER_LEN);
        set(CREATE_FILE_EVENT, Self::CREATE_FILE_HEADER_LEN);
        set(APPEND_BLOCK_EVENT, Self::APPEND_BLOCK_HEADER_LEN);
        set(EXEC_LOAD_EVENT, Self::EXEC_LOAD_HEADER_LEN);
        set(DELETE_FILE_EVENT, Self::DELETE_FILE_HEADER_LEN);
        set(NEW_LOAD_EVENT, Self::NEW_LOAD_HEADER_LEN);
        set(RAND_EVENT, Self::RAND_HEADER_LEN);
        set(USER_VAR_EVENT, Self::USER_VAR_HEADER_LEN);
    }

    /// Returns a parsed MySql version.
    pub fn split_version(&self) -> (u8, u8, u8) {
        split_version(&(self.server_version.0).0[..])
    }

    /// `false` if nothing can be decoded against this event (unsupported
    /// binlog version, malformed header declaration or untrusted legacy
    /// numbering).
    pub fn is_valid(&self) -> bool {
        !self.event_type_header_lengths.is_empty()
    }

    /// Number of event types this event describes, i.e. the producer's
    /// event vocabulary size.
    pub fn number_of_event_types(&self) -> usize {
        self.event_type_header_lengths.len()
    }

    /// Maps a wire event type code to the current numbering.
    ///
    /// Identity unless the stream was produced with the legacy numbering;
    /// codes outside the legacy vocabulary are returned unchanged.
    pub fn map_event_type(&self, raw_event_type: u8) -> u8 {
        match self.event_type_permutation {
            Some(ref permutation) => permutation
                .get(usize::from(raw_event_type))
                .copied()
                .unwrap_or(raw_event_type),
            None => raw_event_type,
        }
    }

    /// Returns header length for the given (current-numbering) event type.
    ///
    /// Types beyond the producer's vocabulary have no post-header.
    pub fn get_event_type_header_length(&self, event_type: EventType) -> u8 {
        if event_type == EventType::UNKNOWN_EVENT {
            return 0;
        }

        self.event_type_header_lengths
            .get(usize::from(event_type as u8).saturating_sub(1))
            .copied()
            .unwrap_or(0)
    }

    fn apply_event_type_permutation(
        &mut self,
        permutation: &[u8; EVENT_TYPE_PERMUTATION_LEN],
    ) {
        if self.event_type_header_lengths.len() != EVENT_TYPE_PERMUTATION_LEN - 1 {
            // A table of unexpected size can't be trusted to follow the
            // legacy numbering; invalidate the whole event rather than guess.
            self.event_type_header_lengths = Vec::new();
            return;
        }

        // Rewrite the table so that index i refers to the current numbering.
        let mut permuted = [0_u8; EVENT_TYPE_PERMUTATION_LEN - 1];
        for legacy_id in 1..EVENT_TYPE_PERMUTATION_LEN {
            permuted[usize::from(permutation[legacy_id]) - 1] =
                self.event_type_header_lengths[legacy_id - 1];
        }

        self.event_type_header_lengths.copy_from_slice(&permuted);
        self.event_type_permutation = Some(*permutation);
    }
}

impl BinlogStruct for FormatDescriptionEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::FORMAT_DESCRIPTION_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let binlog_version = input.read_u16::<LittleEndian>()?;

        let mut server_version: [u8; Self::SERVER_VER_LEN] = input.read_fixed_text()?;
        // always null-terminated, whatever the producer wrote
        server_version[Self::SERVER_VER_LEN - 1] = 0;

        let create_timestamp = input.read_u32::<LittleEndian>()?;

        let common_header_len = input.read_u8()?;

        let mut event = Self {
            binlog_version: RawField::new(binlog_version),
            server_version: RawText(RawServerVersion(server_version)),
            create_timestamp,
            common_header_len,
            event_type_header_lengths: Vec::new(),
            event_type_permutation: None,
            footer: Default::default(),
        };

        match event.binlog_version.get() {
            Ok(BinlogVersion::Version1)
            | Ok(BinlogVersion::Version3)
            | Ok(BinlogVersion::Version4) => (),
            // out of the supported set; the record is constructed, but invalid
            _ => return Ok(event),
        }

        if common_header_len < Self::OLD_HEADER_LEN {
            // no release ever declared a shorter header
            return Ok(event);
        }

        let number_of_event_types = input.get_limit();
        event.event_type_header_lengths = input.read_text(number_of_event_types)?;

        if let Some((_, permutation)) = EVENT_TYPE_PERMUTATIONS
            .iter()
            .find(|(pattern, _)| pattern.matches(&server_version[..]))
        {
            event.apply_event_type_permutation(permutation);
        }

        Ok(event)
    }

    fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        let mut output = output.limit(S(self.len(version)));

        output.write_u16::<LittleEndian>(self.binlog_version.0)?;
        output.write_all(&(self.server_version.0).0)?;
        output.write_u32::<LittleEndian>(self.create_timestamp)?;
        output.write_u8(self.common_header_len)?;
        output.write_all(&self.event_type_header_lengths)?;

        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        let mut len = S(0);

        len += S(2);
        len += S(Self::SERVER_VER_LEN);
        len += S(4);
        len += S(1);
        len += S(self.event_type_header_lengths.len());

        min(len.0, u32::MAX as usize - BinlogEventHeader::LEN)
    }
}

/// A start event is the first event of a binlog for binlog-version 1 to 3.
///
/// Superseded by `FORMAT_DESCRIPTION_EVENT` since MySql 5.0.0; only seen when
/// decoding legacy streams.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StartEventV3 {
    /// Version of this binlog format.
    pub binlog_version: RawField<u16, UnknownBinlogVersion, BinlogVersion>,
    /// Version of the MySQL Server that created the binlog (len=50).
    pub server_version: RawText<RawServerVersion>,
    /// Seconds since Unix epoch when the binlog was created.
    pub create_timestamp: u32,
}

impl BinlogStruct for StartEventV3 {
    const EVENT_TYPE: Option<EventType> = Some(EventType::START_EVENT_V3);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let binlog_version = input.read_u16::<LittleEndian>()?;

        let mut server_version: [u8; FormatDescriptionEvent::SERVER_VER_LEN] =
            input.read_fixed_text()?;
        server_version[FormatDescriptionEvent::SERVER_VER_LEN - 1] = 0;

        let create_timestamp = input.read_u32::<LittleEndian>()?;

        Ok(Self {
            binlog_version: RawField::new(binlog_version),
            server_version: RawText(RawServerVersion(server_version)),
            create_timestamp,
        })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_u16::<LittleEndian>(self.binlog_version.0)?;
        output.write_all(&(self.server_version.0).0)?;
        output.write_u32::<LittleEndian>(self.create_timestamp)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        FormatDescriptionEvent::START_V3_HEADER_LEN
    }
}

/// The rotate event is added to the binlog as last event
/// to tell the reader what binlog to request next.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RotateEvent {
    // post-header
    /// Position of the first event in the next log file.
    ///
    /// Producers without a rotate post-header (binlog version 1) don't send
    /// it; it then defaults to the position right after the file magic.
    pub position: u64,

    // payload
    /// Name of the next binlog.
    pub name: RawText,
}

impl RotateEvent {
    /// The canonical position of the first event of a binlog file.
    pub const FIRST_EVENT_POSITION: u64 = BinlogFileHeader::LEN as u64;
}

impl BinlogStruct for RotateEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::ROTATE_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let post_header_len = fde.get_event_type_header_length(Self::EVENT_TYPE.unwrap());

        let position = if usize::from(post_header_len) >= 8 {
            input.read_u64::<LittleEndian>()?
        } else {
            Self::FIRST_EVENT_POSITION
        };

        let name_len = min(input.get_limit(), FN_REFLEN);
        let name = input.read_text(name_len)?;

        Ok(Self {
            position,
            name: RawText(name),
        })
    }

    fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        let mut output = output.limit(S(self.len(version)));

        output.write_u64::<LittleEndian>(self.position)?;
        output.write_all(&self.name.0)?;

        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        let mut len = S(0);

        len += S(8);
        len += S(min(self.name.0.len(), FN_REFLEN));

        min(len.0, u32::MAX as usize - BinlogEventHeader::LEN)
    }
}

/// Xid event.
///
/// Generated for a commit of a transaction that modifies one or more tables of an XA-capable
/// storage engine.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct XidEvent {
    pub xid: u64,
}

impl BinlogStruct for XidEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::XID_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let post_header_len = fde.get_event_type_header_length(Self::EVENT_TYPE.unwrap());

        // zero today, but future producers may populate it
        for _ in 0..post_header_len {
            input.read_u8()?;
        }

        let xid = input.read_u64::<LittleEndian>()?;

        if input.get_limit() > 0 {
            return Err(Error::new(Other, "bytes remaining on stream"));
        }

        Ok(Self { xid })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_u64::<LittleEndian>(self.xid)
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        8
    }
}

/// Rand event.
///
/// Logs random seeds used by the next statement. Every `RAND()` is preceded
/// by one of these.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RandEvent {
    pub seed1: u64,
    pub seed2: u64,
}

impl BinlogStruct for RandEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::RAND_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let post_header_len = fde.get_event_type_header_length(Self::EVENT_TYPE.unwrap());

        // zero today, but future producers may populate it
        for _ in 0..post_header_len {
            input.read_u8()?;
        }

        let seed1 = input.read_u64::<LittleEndian>()?;
        let seed2 = input.read_u64::<LittleEndian>()?;

        if input.get_limit() > 0 {
            return Err(Error::new(Other, "bytes remaining on stream"));
        }

        Ok(Self { seed1, seed2 })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_u64::<LittleEndian>(self.seed1)?;
        output.write_u64::<LittleEndian>(self.seed2)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        16
    }
}

/// Used to log an out of the ordinary event that occurred on the master.
///
/// It notifies the slave that something happened on the master that might cause data
/// to be in an inconsistent state.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct IncidentEvent {
    /// Raw incident code. Use [`Self::incident_type`].
    pub incident_type: RawField<u16, UnknownIncidentType, IncidentType>,
    pub message: RawText,
}

impl IncidentEvent {
    /// Returns the incident type.
    ///
    /// A code outside of the known enumeration means "no incident", not an
    /// error; the stream stays decodable.
    pub fn incident_type(&self) -> IncidentType {
        self.incident_type
            .get()
            .unwrap_or(IncidentType::INCIDENT_NONE)
    }
}

impl BinlogStruct for IncidentEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::INCIDENT_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let incident_type = input.read_u16::<LittleEndian>()?;
        let message_len = input.read_u8()? as usize;
        let message = input.read_text(message_len)?;

        if input.get_limit() > 0 {
            return Err(Error::new(Other, "bytes remaining on stream"));
        }

        Ok(Self {
            incident_type: RawField::new(incident_type),
            message: RawText(message),
        })
    }

    fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        let mut output = output.limit(S(self.len(version)));
        output.write_u16::<LittleEndian>(self.incident_type.0)?;
        output.write_u8(min(self.message.0.len(), u8::MAX as usize) as u8)?;
        output
            .limit(S(u8::MAX as usize))
            .write_all(&self.message.0)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        let mut len = S(0);

        len += S(2);
        len += S(1);
        len += S(min(self.message.0.len(), u8::MAX as usize));

        min(len.0, u32::MAX as usize - BinlogEventHeader::LEN)
    }
}

/// The heartbeat event is sent by a master to a connected slave to keep the
/// connection alive when no more events are left in the log.
///
/// It is never written to a log file.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HeartbeatEvent {
    /// Name of the log file the master is currently reading from.
    pub log_ident: RawText,
}

impl BinlogStruct for HeartbeatEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::HEARTBEAT_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let len = min(input.get_limit(), FN_REFLEN);
        let log_ident = input.read_text(len)?;

        Ok(Self {
            log_ident: RawText(log_ident),
        })
    }

    fn write<T: Write>(&self, version: BinlogVersion, mut output: T) -> io::Result<()> {
        let mut output = output.limit(S(self.len(version)));
        output.write_all(&self.log_ident.0)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        min(self.log_ident.0.len(), FN_REFLEN)
    }
}

/// Contains the GTIDs executed in all previous binlog files.
///
/// The set is exposed as an opaque byte range; its interpretation belongs to
/// the GTID layer, not to the codec.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PreviousGtidsEvent {
    gtid_sets: Vec<u8>,
}

impl PreviousGtidsEvent {
    /// Creates a new event from an encoded GTID set.
    pub fn new(gtid_sets: Vec<u8>) -> Self {
        Self { gtid_sets }
    }

    /// The encoded GTID set.
    pub fn gtid_sets(&self) -> &[u8] {
        &self.gtid_sets
    }

    /// Length of the encoded GTID set in bytes.
    pub fn gtid_sets_len(&self) -> usize {
        self.gtid_sets.len()
    }
}

impl BinlogStruct for PreviousGtidsEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::PREVIOUS_GTIDS_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let post_header_len = fde.get_event_type_header_length(Self::EVENT_TYPE.unwrap());

        for _ in 0..post_header_len {
            input.read_u8()?;
        }

        let len = input.get_limit();
        let gtid_sets = input.read_text(len)?;

        Ok(Self { gtid_sets })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_all(&self.gtid_sets)
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        min(self.gtid_sets.len(), u32::MAX as usize - BinlogEventHeader::LEN)
    }
}

/// GTID stands for Global Transaction IDentifier.
///
/// It is composed of the SID of the server that committed the transaction and
/// the transaction's group number.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct GtidEvent {
    /// `true` if the transaction was committed.
    pub commit_flag: bool,
    /// UUID representing the SID.
    pub sid: [u8; Self::ENCODED_SID_LENGTH],
    /// Group number, second component of GTID.
    pub gno: u64,
    /// The transaction's commit timestamp.
    ///
    /// Producers that predate the commit timestamp don't send it; the field
    /// is then [`Self::SEQ_UNINIT`], which is distinct from a timestamp of
    /// literally zero.
    pub commit_seq_no: i64,
}

impl GtidEvent {
    pub const ENCODED_SID_LENGTH: usize = 16;
    /// Marker of the trailing commit timestamp.
    pub const G_COMMIT_TS: u8 = 2;
    /// `commit_seq_no` of an event whose producer didn't send one.
    pub const SEQ_UNINIT: i64 = -1;
    /// Full post-header length: flag, sid, gno, timestamp marker, timestamp.
    pub const POST_HEADER_LENGTH: usize = 1 + Self::ENCODED_SID_LENGTH + 8 + 1 + 8;
}

impl BinlogStruct for GtidEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::GTID_EVENT);

    fn read<T: Read>(
        event_size: usize,
        fde: &FormatDescriptionEvent,
        mut input: T,
    ) -> io::Result<Self> {
        let mut input = input.limit(S(event_size) - S(usize::from(fde.common_header_len)));

        let commit_flag = input.read_u8()? != 0;

        let mut sid = [0_u8; Self::ENCODED_SID_LENGTH];
        input.read_exact(&mut sid)?;

        let gno = input.read_u64::<LittleEndian>()?;

        // Will be absent for producers that predate the commit timestamp, and
        // an unexpected marker means "not a timestamp" rather than an error.
        let mut commit_seq_no = Self::SEQ_UNINIT;
        if input.get_limit() > 0 {
            let ts_marker = input.read_u8()?;
            if ts_marker == Self::G_COMMIT_TS && input.get_limit() >= 8 {
                commit_seq_no = input.read_i64::<LittleEndian>()?;
            }
        }

        Ok(Self {
            commit_flag,
            sid,
            gno,
            commit_seq_no,
        })
    }

    fn write<T: Write>(&self, _version: BinlogVersion, mut output: T) -> io::Result<()> {
        output.write_u8(self.commit_flag as u8)?;
        output.write_all(&self.sid)?;
        output.write_u64::<LittleEndian>(self.gno)?;
        output.write_u8(Self::G_COMMIT_TS)?;
        output.write_i64::<LittleEndian>(self.commit_seq_no)?;
        Ok(())
    }

    fn len(&self, _version: BinlogVersion) -> usize {
        Self::POST_HEADER_LENGTH
    }
}

/// Anonymous GTID event.
#[repr(transparent)]
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AnonymousGtidEvent(pub GtidEvent);

impl BinlogStruct for AnonymousGtidEvent {
    const EVENT_TYPE: Option<EventType> = Some(EventType::ANONYMOUS_GTID_EVENT);

    fn read<T: Read>(event_size: usize, fde: &FormatDescriptionEvent, input: T) -> io::Result<Self> {
        GtidEvent::read(event_size, fde, input).map(Self)
    }

    fn write<T: Write>(&self, version: BinlogVersion, output: T) -> io::Result<()> {
        self.0.write(version, output)
    }

    fn len(&self, version: BinlogVersion) -> usize {
        self.0.len(version)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn v4_fde() -> FormatDescriptionEvent {
        FormatDescriptionEvent::new(BinlogVersion::Version4)
    }

    /// Lays out a format description event payload (no common header, no
    /// checksum suffix unless `table` carries one).
    fn fde_payload(server_version: &str, table: &[u8]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&4_u16.to_le_bytes());
        let mut version = [0_u8; FormatDescriptionEvent::SERVER_VER_LEN];
        version[..server_version.len()].copy_from_slice(server_version.as_bytes());
        payload.extend_from_slice(&version);
        payload.extend_from_slice(&0_u32.to_le_bytes());
        payload.push(BinlogEventHeader::LEN as u8);
        payload.extend_from_slice(table);
        payload
    }

    /// Frames `data` as a full event and appends it to `stream`.
    fn push_event(
        stream: &mut Vec<u8>,
        fde: &FormatDescriptionEvent,
        event_type: EventType,
        data: Vec<u8>,
    ) -> io::Result<()> {
        let is_fde = event_type == EventType::FORMAT_DESCRIPTION_EVENT;
        let event_size = BinlogEventHeader::LEN
            + data.len()
            + if is_fde {
                BinlogEventFooter::BINLOG_CHECKSUM_ALG_DESC_LEN
                    + BinlogEventFooter::BINLOG_CHECKSUM_LEN
            } else {
                0
            };

        let event = Event {
            fde: fde.clone(),
            header: BinlogEventHeader {
                timestamp: 1253783036,
                event_type: RawField::new(event_type as u8),
                server_id: 1,
                event_size: event_size as u32,
                log_pos: (stream.len() + event_size) as u32,
                flags: RawFlags(0),
            },
            data,
            footer: fde.footer,
            checksum: [0_u8; BinlogEventFooter::BINLOG_CHECKSUM_LEN],
        };

        event.write(BinlogVersion::Version4, &mut *stream)
    }

    #[test]
    fn built_fde_has_every_header_length_set() {
        for version in [
            BinlogVersion::Version1,
            BinlogVersion::Version3,
            BinlogVersion::Version4,
        ] {
            let fde = FormatDescriptionEvent::new(version);
            assert!(fde.is_valid());

            let expected = match version {
                BinlogVersion::Version4 => FormatDescriptionEvent::LOG_EVENT_TYPES,
                _ => FormatDescriptionEvent::LOG_EVENT_TYPES_V1_3,
            };
            assert_eq!(expected, fde.number_of_event_types());
            assert!(fde
                .event_type_header_lengths
                .iter()
                .all(|&x| x != u8::MAX));
        }
    }

    #[test]
    fn unsupported_binlog_version_yields_invalid_fde() -> io::Result<()> {
        let fde = FormatDescriptionEvent::new(BinlogVersion::Version2);
        assert!(!fde.is_valid());
        assert_eq!(0, fde.number_of_event_types());

        // same for a parsed event declaring a version nobody supports
        let mut payload = fde_payload("5.7.4-log", &[0_u8; 39]);
        payload[0] = 99;
        let parsed = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;
        assert!(!parsed.is_valid());
        Ok(())
    }

    #[test]
    fn fde_declaring_a_tiny_common_header_is_invalid() -> io::Result<()> {
        let mut payload = fde_payload("5.7.4-log", &[0_u8; 39]);
        payload[2 + FormatDescriptionEvent::SERVER_VER_LEN + 4] =
            FormatDescriptionEvent::OLD_HEADER_LEN - 1;

        let fde = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;

        assert!(!fde.is_valid());
        Ok(())
    }

    #[test]
    fn fde_with_no_table_bytes_is_invalid() -> io::Result<()> {
        let payload = fde_payload("5.5.0", &[]);
        let fde = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;
        assert!(!fde.is_valid());
        Ok(())
    }

    #[test]
    fn truncated_fde_fixed_fields_error() {
        let payload = [4, 0, b'5'];
        let err = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )
        .unwrap_err();
        assert_eq!(io::ErrorKind::UnexpectedEof, err.kind());
    }

    #[test]
    fn fde_roundtrip() -> io::Result<()> {
        let fde = v4_fde();

        let mut data = Vec::new();
        fde.write(BinlogVersion::Version4, &mut data)?;

        let parsed = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + data.len(),
            &v4_fde(),
            &data[..],
        )?;

        assert!(parsed.is_valid());
        assert_eq!(fde.event_type_header_lengths, parsed.event_type_header_lengths);
        assert_eq!(fde.common_header_len, parsed.common_header_len);
        assert_eq!(fde.server_version, parsed.server_version);
        Ok(())
    }

    #[test]
    fn checksum_gate_honors_version_threshold() -> io::Result<()> {
        assert!(!BinlogEventFooter::checksum_supported((5, 5, 62)));
        assert!(!BinlogEventFooter::checksum_supported((5, 6, 0)));
        assert!(BinlogEventFooter::checksum_supported((5, 6, 1)));
        assert!(BinlogEventFooter::checksum_supported((8, 0, 33)));
        // a corrupted version string reads as the oldest possible release
        assert!(!BinlogEventFooter::checksum_supported(split_version("garbage")));

        // below the threshold: no checksum descriptor at all
        let payload = fde_payload("5.5.62", &[0_u8; 27]);
        let footer = BinlogEventFooter::read(&payload)?;
        assert!(footer.checksum_alg.is_none());

        // at the threshold: the descriptor is the last byte before the checksum
        let mut table = vec![0_u8; 39];
        table.push(BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_CRC32 as u8);
        table.extend_from_slice(&[0_u8; BinlogEventFooter::BINLOG_CHECKSUM_LEN]);
        let payload = fde_payload("5.6.1", &table);
        let footer = BinlogEventFooter::read(&payload)?;
        assert_eq!(
            Ok(Some(BinlogChecksumAlg::BINLOG_CHECKSUM_ALG_CRC32)),
            footer.get_checksum_alg()
        );
        Ok(())
    }

    #[test]
    fn legacy_version_with_wrong_vocabulary_is_invalid() -> io::Result<()> {
        let payload = fde_payload("5.1.2-a_drop5p13", &[0_u8; 21]);
        let fde = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;

        assert!(!fde.is_valid());
        assert!(fde.event_type_permutation.is_none());
        Ok(())
    }

    #[test]
    fn legacy_version_permutes_header_lengths() -> io::Result<()> {
        let reference = v4_fde();

        // Lay the table out in the legacy numbering: entry i-1 belongs to
        // legacy id i.
        let mut legacy_table = [0_u8; EVENT_TYPE_PERMUTATION_LEN - 1];
        for legacy_id in 1..EVENT_TYPE_PERMUTATION_LEN {
            let current_id = LEGACY_EVENT_NUMBERING[legacy_id];
            legacy_table[legacy_id - 1] =
                reference.event_type_header_lengths[usize::from(current_id) - 1];
        }

        let payload = fde_payload("5.1.2-a_drop5p20", &legacy_table);
        let fde = FormatDescriptionEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;

        assert!(fde.is_valid());
        let permutation = fde.event_type_permutation.as_ref().unwrap();
        assert_eq!(EVENT_TYPE_PERMUTATION_LEN, permutation.len());

        // lookups by current numbering return the modern lengths
        for event_type in [
            EventType::ROTATE_EVENT,
            EventType::XID_EVENT,
            EventType::TABLE_MAP_EVENT,
            EventType::BEGIN_LOAD_QUERY_EVENT,
            EventType::EXECUTE_LOAD_QUERY_EVENT,
        ] {
            assert_eq!(
                reference.get_event_type_header_length(event_type),
                fde.get_event_type_header_length(event_type),
            );
        }

        // and wire type codes are remapped before dispatch
        assert_eq!(EventType::XID_EVENT as u8, fde.map_event_type(20));
        assert_eq!(EventType::TABLE_MAP_EVENT as u8, fde.map_event_type(16));
        assert_eq!(
            EventType::EXECUTE_LOAD_QUERY_EVENT as u8,
            fde.map_event_type(22)
        );
        Ok(())
    }

    #[test]
    fn rotate_event_parses_position_and_name() -> io::Result<()> {
        let fde = v4_fde();

        let mut payload = vec![4, 0, 0, 0, 0, 0, 0, 0];
        payload.extend_from_slice(b"log.000002");

        let rotate =
            RotateEvent::read(BinlogEventHeader::LEN + payload.len(), &fde, &payload[..])?;

        assert_eq!(4, rotate.position);
        assert_eq!("log.000002", rotate.name.get());
        Ok(())
    }

    #[test]
    fn rotate_event_without_post_header_defaults_to_stream_start() -> io::Result<()> {
        let fde = FormatDescriptionEvent::new(BinlogVersion::Version1);
        let payload = b"log.000002";

        let rotate = RotateEvent::read(
            usize::from(FormatDescriptionEvent::OLD_HEADER_LEN) + payload.len(),
            &fde,
            &payload[..],
        )?;

        assert_eq!(RotateEvent::FIRST_EVENT_POSITION, rotate.position);
        assert_eq!("log.000002", rotate.name.get());
        Ok(())
    }

    #[test]
    fn rotate_event_shorter_than_common_header_is_truncated() {
        let err = RotateEvent::read(BinlogEventHeader::LEN - 1, &v4_fde(), &b""[..]).unwrap_err();
        assert_eq!(io::ErrorKind::UnexpectedEof, err.kind());
    }

    #[test]
    fn incident_event_with_unknown_code_reads_as_none() -> io::Result<()> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&999_u16.to_le_bytes());
        payload.push(4);
        payload.extend_from_slice(b"oops");

        let incident =
            IncidentEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert_eq!(IncidentType::INCIDENT_NONE, incident.incident_type());
        assert!(incident.incident_type.get().is_err());
        assert_eq!("oops", incident.message.get());
        Ok(())
    }

    #[test]
    fn incident_event_parses_known_codes() -> io::Result<()> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1_u16.to_le_bytes());
        payload.push(0);

        let incident =
            IncidentEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert_eq!(IncidentType::INCIDENT_LOST_EVENTS, incident.incident_type());
        assert_eq!("", incident.message.get());
        Ok(())
    }

    #[test]
    fn xid_event_skips_the_post_header_gap() -> io::Result<()> {
        // zero-length gap
        let payload = 0xcafe_u64.to_le_bytes();
        let xid = XidEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;
        assert_eq!(0xcafe, xid.xid);

        // a future producer declaring a non-empty xid post-header
        let mut fde = v4_fde();
        fde.event_type_header_lengths[EventType::XID_EVENT as usize - 1] = 2;
        let mut payload = vec![0xde, 0xad];
        payload.extend_from_slice(&0xcafe_u64.to_le_bytes());
        let xid = XidEvent::read(BinlogEventHeader::LEN + payload.len(), &fde, &payload[..])?;
        assert_eq!(0xcafe, xid.xid);
        Ok(())
    }

    #[test]
    fn rand_event_reads_both_seeds() -> io::Result<()> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&151_u64.to_le_bytes());
        payload.extend_from_slice(&953_u64.to_le_bytes());

        let rand =
            RandEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert_eq!(151, rand.seed1);
        assert_eq!(953, rand.seed2);
        Ok(())
    }

    #[test]
    fn heartbeat_event_carries_the_log_name() -> io::Result<()> {
        let payload = b"log.000007";
        let heartbeat =
            HeartbeatEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;
        assert_eq!("log.000007", heartbeat.log_ident.get());
        Ok(())
    }

    #[test]
    fn previous_gtids_event_stays_opaque() -> io::Result<()> {
        let payload = [1, 0, 0, 0, 0, 0, 0, 0, 0xaa, 0xbb];
        let event = PreviousGtidsEvent::read(
            BinlogEventHeader::LEN + payload.len(),
            &v4_fde(),
            &payload[..],
        )?;
        assert_eq!(&payload[..], event.gtid_sets());
        assert_eq!(payload.len(), event.gtid_sets_len());
        Ok(())
    }

    #[test]
    fn gtid_event_without_commit_ts_marker_is_uninitialized() -> io::Result<()> {
        let mut payload = vec![1];
        payload.extend_from_slice(&[0x11; GtidEvent::ENCODED_SID_LENGTH]);
        payload.extend_from_slice(&7_u64.to_le_bytes());

        let gtid =
            GtidEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert!(gtid.commit_flag);
        assert_eq!([0x11; 16], gtid.sid);
        assert_eq!(7, gtid.gno);
        assert_eq!(GtidEvent::SEQ_UNINIT, gtid.commit_seq_no);
        assert_ne!(0, gtid.commit_seq_no);
        Ok(())
    }

    #[test]
    fn gtid_event_with_commit_ts_marker() -> io::Result<()> {
        let mut payload = vec![0];
        payload.extend_from_slice(&[0x22; GtidEvent::ENCODED_SID_LENGTH]);
        payload.extend_from_slice(&42_u64.to_le_bytes());
        payload.push(GtidEvent::G_COMMIT_TS);
        payload.extend_from_slice(&1253783036_i64.to_le_bytes());

        let gtid =
            GtidEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert!(!gtid.commit_flag);
        assert_eq!(42, gtid.gno);
        assert_eq!(1253783036, gtid.commit_seq_no);
        Ok(())
    }

    #[test]
    fn gtid_event_with_foreign_marker_is_uninitialized() -> io::Result<()> {
        let mut payload = vec![1];
        payload.extend_from_slice(&[0x33; GtidEvent::ENCODED_SID_LENGTH]);
        payload.extend_from_slice(&9_u64.to_le_bytes());
        payload.push(9); // not G_COMMIT_TS
        payload.extend_from_slice(&1253783036_i64.to_le_bytes());

        let gtid =
            GtidEvent::read(BinlogEventHeader::LEN + payload.len(), &v4_fde(), &payload[..])?;

        assert_eq!(GtidEvent::SEQ_UNINIT, gtid.commit_seq_no);
        Ok(())
    }

    #[test]
    fn start_event_v3_parses_legacy_preamble() -> io::Result<()> {
        let fde = FormatDescriptionEvent::new(BinlogVersion::Version3);

        let mut payload = Vec::new();
        payload.extend_from_slice(&3_u16.to_le_bytes());
        let mut version = [0_u8; FormatDescriptionEvent::SERVER_VER_LEN];
        version[..6].copy_from_slice(b"4.0.30");
        payload.extend_from_slice(&version);
        payload.extend_from_slice(&1253783036_u32.to_le_bytes());

        let start =
            StartEventV3::read(BinlogEventHeader::LEN + payload.len(), &fde, &payload[..])?;

        assert_eq!(Ok(BinlogVersion::Version3), start.binlog_version.get());
        assert_eq!("4.0.30", start.server_version.get());
        assert_eq!(1253783036, start.create_timestamp);
        Ok(())
    }

    #[test]
    fn events_cannot_be_read_against_an_invalid_fde() {
        let fde = FormatDescriptionEvent::new(BinlogVersion::Version2);
        let err = Event::read(0, &fde, &b""[..]).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidData, err.kind());
    }

    #[test]
    fn v1_streams_use_the_13_byte_header() -> io::Result<()> {
        let fde = FormatDescriptionEvent::new(BinlogVersion::Version1);

        let mut raw = Vec::new();
        raw.extend_from_slice(&1253783036_u32.to_le_bytes());
        raw.push(EventType::ROTATE_EVENT as u8);
        raw.extend_from_slice(&1_u32.to_le_bytes());
        raw.extend_from_slice(
            &((usize::from(FormatDescriptionEvent::OLD_HEADER_LEN) + 10) as u32).to_le_bytes(),
        );
        raw.extend_from_slice(b"log.000002");

        let event = Event::read(0, &fde, &raw[..])?;

        assert_eq!(0, event.header.log_pos);
        assert_eq!(Ok(EventType::ROTATE_EVENT), event.header.event_type.get());
        match event.read_data()? {
            Some(EventData::RotateEvent(rotate)) => {
                assert_eq!(RotateEvent::FIRST_EVENT_POSITION, rotate.position);
                assert_eq!("log.000002", rotate.name.get());
            }
            other => panic!("unexpected event data: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn binlog_file_decodes_a_synthesized_stream() -> io::Result<()> {
        let fde = v4_fde();

        let mut stream = Vec::new();
        stream.extend_from_slice(&BinlogFileHeader::VALUE);

        let mut fde_data = Vec::new();
        fde.write(BinlogVersion::Version4, &mut fde_data)?;
        push_event(
            &mut stream,
            &fde,
            EventType::FORMAT_DESCRIPTION_EVENT,
            fde_data,
        )?;

        let mut xid_data = Vec::new();
        XidEvent { xid: 0xcafe }.write(BinlogVersion::Version4, &mut xid_data)?;
        push_event(&mut stream, &fde, EventType::XID_EVENT, xid_data)?;

        let mut rotate_data = Vec::new();
        RotateEvent {
            position: 4,
            name: RawText(b"log.000002".to_vec()),
        }
        .write(BinlogVersion::Version4, &mut rotate_data)?;
        push_event(&mut stream, &fde, EventType::ROTATE_EVENT, rotate_data)?;

        let mut binlog_file = BinlogFile::new(BinlogVersion::Version4, &stream[..])?;

        let fde_event = binlog_file.next().unwrap()?;
        assert_eq!(
            Ok(EventType::FORMAT_DESCRIPTION_EVENT),
            fde_event.header.event_type.get()
        );
        match fde_event.read_data()? {
            Some(EventData::FormatDescriptionEvent(parsed)) => {
                assert!(parsed.is_valid());
                // the checksum descriptor byte is not part of the vocabulary
                assert_eq!(
                    FormatDescriptionEvent::LOG_EVENT_TYPES,
                    parsed.number_of_event_types()
                );
                assert_eq!(
                    fde.event_type_header_lengths,
                    parsed.event_type_header_lengths
                );
            }
            other => panic!("unexpected event data: {:?}", other),
        }

        // the replaced fde now frames the rest of the stream
        let xid_event = binlog_file.next().unwrap()?;
        match xid_event.read_data()? {
            Some(EventData::XidEvent(XidEvent { xid })) => assert_eq!(0xcafe, xid),
            other => panic!("unexpected event data: {:?}", other),
        }

        let rotate_event = binlog_file.next().unwrap()?;
        match rotate_event.read_data()? {
            Some(EventData::RotateEvent(rotate)) => {
                assert_eq!(4, rotate.position);
                assert_eq!("log.000002", rotate.name.get());
            }
            other => panic!("unexpected event data: {:?}", other),
        }

        assert!(binlog_file.next().is_none());
        Ok(())
    }
}
