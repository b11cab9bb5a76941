// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The scenery container directory.
//!
//! A scenery database file opens with a fixed header, followed by a
//! table of section descriptors. Each section points at a run of
//! subsection descriptors and each subsection at a chain of records.
//! Only the airport section is interpreted; decoded procedures hang off
//! the airport records.
//!
//! Damaged files never abort the scan. A broken header yields an empty
//! [`Scan`], anything smaller is skipped, logged and reported through
//! [`ScanIssue`].

use std::fmt;

use log::{debug, trace, warn};
use time::OffsetDateTime;

use crate::records::Airport;
use crate::stream::Stream;
use crate::Error;

/// Section type holding airport records.
const AIRPORT_SECTION: u32 = 0x03;

/// Largest section count accepted by the header sanity screen.
const MAX_SECTIONS: u32 = 100;

/// Nanoseconds between 1601-01-01 and the Unix epoch.
const FILETIME_UNIX_OFFSET: i128 = 11_644_473_600 * 1_000_000_000;

/// The fixed file header.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Header {
    pub magic1: u32,
    /// Declared header size. Read but not trusted; the layout is fixed.
    pub header_size: u32,
    pub low_date_time: u32,
    pub high_date_time: u32,
    pub magic2: u32,
    pub num_sections: u32,
}

impl Header {
    /// The fixed length of the file header in bytes.
    pub const SIZE: usize = 56;

    /// Reads the header from the start of a file image.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than [`Header::SIZE`] bytes are
    /// available.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < Self::SIZE {
            return Err(Error::TruncatedHeader { actual: data.len() });
        }

        let mut stream = Stream::new(data);
        Ok(Self {
            magic1: stream.read_u32()?,
            header_size: stream.read_u32()?,
            low_date_time: stream.read_u32()?,
            high_date_time: stream.read_u32()?,
            magic2: stream.read_u32()?,
            num_sections: stream.read_u32()?,
        })
    }

    /// Checks the structural sanity of the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the section count is zero or implausibly
    /// large.
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_sections == 0 || self.num_sections > MAX_SECTIONS {
            return Err(Error::SectionCount {
                count: self.num_sections,
            });
        }
        Ok(())
    }

    /// The compile timestamp of the database.
    ///
    /// The header stores a 64 bit count of 100 ns ticks since
    /// 1601-01-01. Zero means no timestamp was written.
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        let ticks = (u64::from(self.high_date_time) << 32) | u64::from(self.low_date_time);
        if ticks == 0 {
            return None;
        }
        let nanos = i128::from(ticks) * 100 - FILETIME_UNIX_OFFSET;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }
}

/// What a section's records contain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SectionKind {
    /// Airport records and their procedure sub-records.
    Airport,
    /// A section this reader does not interpret.
    Unknown(u32),
}

impl From<u32> for SectionKind {
    fn from(value: u32) -> Self {
        match value {
            AIRPORT_SECTION => Self::Airport,
            value => Self::Unknown(value),
        }
    }
}

struct SectionHeader {
    kind: SectionKind,
    num_subsections: u32,
    first_subsection_offset: u32,
}

impl SectionHeader {
    const SIZE: usize = 20;

    fn from_bytes(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut stream = Stream::new(data);
        stream.seek(offset);

        let kind = SectionKind::from(stream.read_u32()?);
        let _size_flag = stream.read_u32()?;
        let num_subsections = stream.read_u32()?;
        let first_subsection_offset = stream.read_u32()?;
        let _total_subsection_size = stream.read_u32()?;

        Ok(Self {
            kind,
            num_subsections,
            first_subsection_offset,
        })
    }
}

struct SubsectionHeader {
    num_records: i32,
    first_record_offset: i32,
}

impl SubsectionHeader {
    const SIZE: usize = 16;

    fn from_bytes(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut stream = Stream::new(data);
        stream.seek(offset);

        let _id = stream.read_u32()?;
        let num_records = stream.read_i32()?;
        let first_record_offset = stream.read_i32()?;
        let _data_size = stream.read_i32()?;

        Ok(Self {
            num_records,
            first_record_offset,
        })
    }
}

/// A condition the scan absorbed instead of failing.
#[derive(Clone, PartialEq, Debug)]
pub enum ScanIssue {
    /// The file failed the header sanity screen; nothing was decoded.
    Structural { error: Error },
    /// A section descriptor sits outside the file.
    Section { index: u32, offset: usize },
    /// A subsection descriptor sits outside the file or carries
    /// unusable values.
    Subsection { index: u32, offset: usize },
    /// A record declared a zero size, overran the file or had no
    /// readable header.
    Record { offset: usize, size: u32 },
    /// An airport record was rejected by its decoder.
    Airport { offset: usize, error: Error },
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural { error } => write!(f, "file rejected: {error}"),
            Self::Section { index, offset } => {
                write!(f, "section descriptor {index} at {offset:#x} is out of bounds")
            }
            Self::Subsection { index, offset } => {
                write!(f, "subsection descriptor {index} at {offset:#x} is unusable")
            }
            Self::Record { offset, size } => {
                write!(f, "record at {offset:#x} with size {size} breaks the chain")
            }
            Self::Airport { offset, error } => {
                write!(f, "airport record at {offset:#x} rejected: {error}")
            }
        }
    }
}

/// Everything one file image decodes to.
#[derive(Default, Debug)]
pub struct Scan {
    /// The file header, when one could be read.
    pub header: Option<Header>,
    /// Every airport that decoded cleanly, in file order.
    pub airports: Vec<Airport>,
    /// Every condition the scan absorbed along the way.
    pub issues: Vec<ScanIssue>,
}

/// Decodes every airport and its procedures from a file image.
///
/// The scan never fails: structural damage yields an empty [`Scan`]
/// with the rejection on [`Scan::issues`], local damage skips the
/// affected structure and resynchronizes on the next declared offset.
pub fn scan(data: &[u8]) -> Scan {
    let mut scan = Scan::default();

    let header = match Header::from_bytes(data) {
        Ok(header) => header,
        Err(error) => {
            warn!("scenery database rejected: {}", error);
            scan.issues.push(ScanIssue::Structural { error });
            return scan;
        }
    };
    scan.header = Some(header);

    if let Err(error) = header.validate() {
        warn!("scenery database rejected: {}", error);
        scan.issues.push(ScanIssue::Structural { error });
        return scan;
    }

    for index in 0..header.num_sections {
        let offset = Header::SIZE + index as usize * SectionHeader::SIZE;
        let section = match SectionHeader::from_bytes(data, offset) {
            Ok(section) => section,
            Err(_) => {
                debug!("section descriptor {} at {:#x} is out of bounds", index, offset);
                scan.issues.push(ScanIssue::Section { index, offset });
                // Descriptors are contiguous, the rest are out too.
                break;
            }
        };

        // The only dispatch on the section type; everything below this
        // point handles airport records.
        match section.kind {
            SectionKind::Airport => scan_section(data, &section, &mut scan),
            SectionKind::Unknown(value) => {
                trace!("skipping section {} of type {:#x}", index, value);
            }
        }
    }

    debug!(
        "scan finished: {} airport(s), {} issue(s)",
        scan.airports.len(),
        scan.issues.len()
    );
    scan
}

fn scan_section(data: &[u8], section: &SectionHeader, scan: &mut Scan) {
    for index in 0..section.num_subsections {
        let offset =
            section.first_subsection_offset as usize + index as usize * SubsectionHeader::SIZE;
        let subsection = match SubsectionHeader::from_bytes(data, offset) {
            Ok(subsection) => subsection,
            Err(_) => {
                debug!("subsection descriptor {} at {:#x} is out of bounds", index, offset);
                scan.issues.push(ScanIssue::Subsection { index, offset });
                break;
            }
        };

        let Ok(first_record) = usize::try_from(subsection.first_record_offset) else {
            debug!("subsection {} declares a negative record offset", index);
            scan.issues.push(ScanIssue::Subsection { index, offset });
            continue;
        };
        if subsection.num_records <= 0 {
            continue;
        }

        scan_airport_records(data, first_record, subsection.num_records as u32, scan);
    }
}

fn scan_airport_records(data: &[u8], first_record: usize, count: u32, scan: &mut Scan) {
    let mut pos = first_record;

    for _ in 0..count {
        // The record's own 16 bit id is not consulted; the section type
        // already decided these are airport records.
        let mut stream = Stream::new(data);
        stream.seek(pos.saturating_add(2));
        let size = match stream.read_u32() {
            Ok(size) => size,
            Err(_) => {
                debug!("record header at {:#x} is out of bounds", pos);
                scan.issues.push(ScanIssue::Record { offset: pos, size: 0 });
                break;
            }
        };

        if size == 0 {
            debug!("record at {:#x} declares size 0, abandoning the chain", pos);
            scan.issues.push(ScanIssue::Record { offset: pos, size });
            break;
        }

        let end = pos.saturating_add(size as usize);
        if end > data.len() {
            warn!(
                "record at {:#x} overruns the file by {} byte, skipping",
                pos,
                end - data.len()
            );
            scan.issues.push(ScanIssue::Record { offset: pos, size });
            // Every following record starts past the end as well.
            break;
        }

        match Airport::decode(&data[pos..end]) {
            Ok(airport) => scan.airports.push(airport),
            Err(error) => {
                debug!("airport record at {:#x} rejected: {}", pos, error);
                scan.issues.push(ScanIssue::Airport { offset: pos, error });
            }
        }

        // Resynchronize on the declared size, no matter how much the
        // decoder consumed.
        pos = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_u16(data: &mut Vec<u8>, value: u16) {
        data.extend_from_slice(&value.to_le_bytes());
    }

    fn put_u32(data: &mut Vec<u8>, value: u32) {
        data.extend_from_slice(&value.to_le_bytes());
    }

    fn encode(ident: &str) -> u32 {
        ident.bytes().fold(0, |value, b| {
            let digit = match b {
                b'0'..=b'9' => b - b'0' + 2,
                b'A'..=b'Z' => b - b'A' + 12,
                _ => panic!("identifier characters should be 0-9A-Z"),
            };
            value * 38 + u32::from(digit)
        })
    }

    /// A file header claiming `num_sections` sections.
    fn header(num_sections: u32) -> Vec<u8> {
        let mut data = Vec::new();
        put_u32(&mut data, 0x1992_0201);
        put_u32(&mut data, Header::SIZE as u32);
        put_u32(&mut data, 0);
        put_u32(&mut data, 0);
        put_u32(&mut data, 0x0801_1994);
        put_u32(&mut data, num_sections);
        data.resize(Header::SIZE, 0);
        data
    }

    fn section_descriptor(data: &mut Vec<u8>, kind: u32, subsections: u32, offset: u32) {
        put_u32(data, kind);
        put_u32(data, 1);
        put_u32(data, subsections);
        put_u32(data, offset);
        put_u32(data, 0);
    }

    fn subsection_descriptor(data: &mut Vec<u8>, records: i32, offset: i32) {
        put_u32(data, 0);
        put_u32(data, records as u32);
        put_u32(data, offset as u32);
        put_u32(data, 0);
    }

    /// A bare airport record without sub-records.
    fn airport_record(ident: &str) -> Vec<u8> {
        let mut record = Vec::new();
        put_u16(&mut record, 0x003C);
        put_u32(&mut record, 52);
        record.resize(40, 0);
        put_u32(&mut record, encode(ident) << 5);
        record.resize(52, 0);
        record
    }

    /// One airport section, one subsection, the given records.
    fn file_with_records(records: &[Vec<u8>]) -> Vec<u8> {
        let mut data = header(1);
        let subsection_offset = (Header::SIZE + SectionHeader::SIZE) as u32;
        let record_offset = subsection_offset + SubsectionHeader::SIZE as u32;

        section_descriptor(&mut data, AIRPORT_SECTION, 1, subsection_offset);
        subsection_descriptor(&mut data, records.len() as i32, record_offset as i32);
        for record in records {
            data.extend_from_slice(record);
        }
        data
    }

    #[test]
    fn short_file_yields_empty_scan() {
        let scan = scan(&[0; 10]);

        assert!(scan.airports.is_empty());
        assert_eq!(
            scan.issues,
            vec![ScanIssue::Structural {
                error: Error::TruncatedHeader { actual: 10 }
            }]
        );
    }

    #[test]
    fn zero_sections_yield_empty_scan() {
        let scan = scan(&header(0));

        assert!(scan.airports.is_empty());
        assert_eq!(
            scan.issues,
            vec![ScanIssue::Structural {
                error: Error::SectionCount { count: 0 }
            }]
        );
    }

    #[test]
    fn implausible_section_count_yields_empty_scan() {
        let scan = scan(&header(101));

        assert!(scan.airports.is_empty());
        assert_eq!(
            scan.issues,
            vec![ScanIssue::Structural {
                error: Error::SectionCount { count: 101 }
            }]
        );
    }

    #[test]
    fn unknown_sections_are_skipped() {
        let mut data = header(1);
        section_descriptor(&mut data, 0x22, 1, 0);

        let scan = scan(&data);

        assert!(scan.airports.is_empty());
        assert!(scan.issues.is_empty());
    }

    #[test]
    fn records_of_unknown_sections_stay_undecoded() {
        // A readable record chain under a foreign section type is left
        // alone.
        let mut data = header(1);
        let subsection_offset = (Header::SIZE + SectionHeader::SIZE) as u32;
        let record_offset = subsection_offset + SubsectionHeader::SIZE as u32;

        section_descriptor(&mut data, 0x22, 1, subsection_offset);
        subsection_descriptor(&mut data, 1, record_offset as i32);
        data.extend_from_slice(&airport_record("EDDH"));

        let scan = scan(&data);

        assert!(scan.airports.is_empty());
        assert!(scan.issues.is_empty());
    }

    #[test]
    fn missing_section_descriptor_is_reported() {
        // The header claims two sections but only one descriptor fits.
        let mut data = header(2);
        section_descriptor(&mut data, 0x22, 0, 0);

        let scan = scan(&data);

        assert_eq!(
            scan.issues,
            vec![ScanIssue::Section {
                index: 1,
                offset: Header::SIZE + SectionHeader::SIZE
            }]
        );
    }

    #[test]
    fn airport_records_are_decoded() {
        let data = file_with_records(&[airport_record("EDDH"), airport_record("EDDM")]);

        let scan = scan(&data);

        assert!(scan.issues.is_empty());
        let idents: Vec<&str> = scan.airports.iter().map(|a| a.ident.as_str()).collect();
        assert_eq!(idents, ["EDDH", "EDDM"]);
    }

    #[test]
    fn oversized_record_is_skipped() {
        let mut record = airport_record("EDDH");
        // Declare far more bytes than the file holds.
        record[2..6].copy_from_slice(&0xFFFF_u32.to_le_bytes());

        let scan = scan(&file_with_records(&[record]));

        assert!(scan.airports.is_empty());
        assert!(matches!(scan.issues[..], [ScanIssue::Record { size: 0xFFFF, .. }]));
    }

    #[test]
    fn zero_record_size_abandons_the_chain_only() {
        let mut bad = airport_record("EDDH");
        bad[2..6].copy_from_slice(&0u32.to_le_bytes());

        // A second subsection after the poisoned one still decodes.
        let mut data = header(1);
        let subsection_offset = (Header::SIZE + SectionHeader::SIZE) as u32;
        let records_offset = subsection_offset + 2 * SubsectionHeader::SIZE as u32;

        section_descriptor(&mut data, AIRPORT_SECTION, 2, subsection_offset);
        subsection_descriptor(&mut data, 2, records_offset as i32);
        subsection_descriptor(
            &mut data,
            1,
            (records_offset + bad.len() as u32) as i32,
        );
        data.extend_from_slice(&bad);
        data.extend_from_slice(&airport_record("EDDM"));

        let scan = scan(&data);

        let idents: Vec<&str> = scan.airports.iter().map(|a| a.ident.as_str()).collect();
        assert_eq!(idents, ["EDDM"]);
        assert!(matches!(scan.issues[..], [ScanIssue::Record { size: 0, .. }]));
    }

    #[test]
    fn negative_record_offset_skips_the_subsection() {
        let mut data = header(1);
        let subsection_offset = (Header::SIZE + SectionHeader::SIZE) as u32;
        section_descriptor(&mut data, AIRPORT_SECTION, 1, subsection_offset);
        subsection_descriptor(&mut data, 1, -20);

        let scan = scan(&data);

        assert!(scan.airports.is_empty());
        assert!(matches!(scan.issues[..], [ScanIssue::Subsection { index: 0, .. }]));
    }

    #[test]
    fn header_timestamp_converts_from_filetime() {
        // 2020-01-01T00:00:00Z in 100 ns ticks since 1601-01-01.
        let ticks: u64 = (11_644_473_600 + 1_577_836_800) * 10_000_000;
        let header = Header {
            magic1: 0,
            header_size: 56,
            low_date_time: ticks as u32,
            high_date_time: (ticks >> 32) as u32,
            magic2: 0,
            num_sections: 1,
        };

        assert_eq!(
            header.timestamp(),
            Some(OffsetDateTime::from_unix_timestamp(1_577_836_800).expect("should be in range"))
        );
    }

    #[test]
    fn zero_filetime_has_no_timestamp() {
        let header = Header::from_bytes(&header(1)).expect("should read the header");
        assert_eq!(header.timestamp(), None);
    }
}
