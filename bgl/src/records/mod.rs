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

//! Record decoders for the airport section.
//!
//! Records nest: an airport record carries SID and STAR sub-records,
//! each procedure carries leg containers and transitions. Every level
//! uses the same 6 byte id + size framing, scanned by [`SubRecords`].

use log::debug;

use crate::stream::Stream;

mod airport;
mod leg;
mod procedure;

pub use airport::Airport;
pub use leg::{
    AltitudeDescriptor, FixRef, FixType, Leg, LegRevision, LegType, TurnDirection,
};
pub use procedure::{Procedure, ProcedureKind};

/// Bytes of the id + size framing in front of every record.
pub(crate) const RECORD_HEADER_LEN: usize = 6;

/// One tagged sub-record inside an enclosing record.
pub struct SubRecord<'a> {
    pub id: u16,
    /// The sub-record's bytes, including its 6 byte header.
    pub data: &'a [u8],
}

/// Iterates the id + size framed sub-records of a record body.
///
/// The iterator advances by each sub-record's declared size only, so a
/// decoder that consumes too little or too much cannot derail the
/// records after it. A zero or overrunning size ends the iteration;
/// there is no other way to find the next boundary.
pub struct SubRecords<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SubRecords<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for SubRecords<'a> {
    type Item = SubRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut stream = Stream::new(self.data);
        stream.seek(self.pos);

        let id = stream.read_u16().ok()?;
        let size = stream.read_u32().ok()? as usize;

        if size == 0 {
            debug!("sub-record {:#06x} at {:#x} declares size 0", id, self.pos);
            return None;
        }
        let end = self.pos.saturating_add(size);
        if end > self.data.len() {
            debug!("sub-record {:#06x} at {:#x} overruns its record", id, self.pos);
            return None;
        }

        let data = &self.data[self.pos..end];
        self.pos = end;
        Some(SubRecord { id, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_record(id: u16, body: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&((body.len() + RECORD_HEADER_LEN) as u32).to_le_bytes());
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn yields_each_sub_record_with_its_header() {
        let mut data = sub_record(0x0042, &[1, 2, 3]);
        data.extend_from_slice(&sub_record(0x0048, &[]));

        let subs: Vec<(u16, usize)> = SubRecords::new(&data)
            .map(|sub| (sub.id, sub.data.len()))
            .collect();

        assert_eq!(subs, [(0x0042, 9), (0x0048, 6)]);
    }

    #[test]
    fn zero_size_ends_the_iteration() {
        let mut data = sub_record(0x0042, &[]);
        data.extend_from_slice(&0x0048u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&sub_record(0x0046, &[]));

        let ids: Vec<u16> = SubRecords::new(&data).map(|sub| sub.id).collect();

        assert_eq!(ids, [0x0042]);
    }

    #[test]
    fn overrunning_size_ends_the_iteration() {
        let mut data = sub_record(0x0042, &[]);
        data.extend_from_slice(&0x0048u16.to_le_bytes());
        data.extend_from_slice(&100u32.to_le_bytes());

        let ids: Vec<u16> = SubRecords::new(&data).map(|sub| sub.id).collect();

        assert_eq!(ids, [0x0042]);
    }

    #[test]
    fn advancement_ignores_what_a_decoder_consumed() {
        // A sub-record longer than its decoder would read still lands
        // the iterator on the next boundary.
        let mut data = sub_record(0x0042, &[0; 32]);
        data.extend_from_slice(&sub_record(0x0048, &[]));

        let ids: Vec<u16> = SubRecords::new(&data).map(|sub| sub.id).collect();

        assert_eq!(ids, [0x0042, 0x0048]);
    }
}
