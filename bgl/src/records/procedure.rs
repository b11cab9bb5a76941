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

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::decode_runway_name;
use crate::records::{SubRecords, RECORD_HEADER_LEN};
use crate::stream::Stream;
use crate::Error;

/// Airport sub-record id of a SID.
pub(crate) const SID_RECORD: u16 = 0x0042;
/// Airport sub-record id of a STAR.
pub(crate) const STAR_RECORD: u16 = 0x0048;

const RUNWAY_TRANSITION: u16 = 0x0046;
/// Legacy enroute transition tag carrying an unused 8 byte name field.
const ENROUTE_TRANSITION_LEGACY: u16 = 0x0047;
const ENROUTE_TRANSITION: u16 = 0x004A;

const COMMON_LEGS_REV1: u16 = 0x00E5;
const COMMON_LEGS_REV2: u16 = 0x00F0;
const COMMON_LEGS_REV3: u16 = 0x00F8;

use super::{Leg, LegRevision};

/// Whether a procedure leaves or joins the terminal area.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProcedureKind {
    /// Standard instrument departure.
    Sid,
    /// Standard terminal arrival route.
    Star,
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sid => f.write_str("SID"),
            Self::Star => f.write_str("STAR"),
        }
    }
}

/// A SID or STAR as stored in an airport record.
///
/// The common route is shared by every flight of the procedure. Runway
/// transitions connect it to a runway and are keyed by the formatted
/// runway name, enroute transitions connect it to the airway structure
/// and are keyed by the fix they join it at.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Procedure {
    pub kind: ProcedureKind,
    pub ident: String,
    pub common_legs: Vec<Leg>,
    pub runway_transitions: HashMap<String, Vec<Leg>>,
    pub enroute_transitions: HashMap<String, Vec<Leg>>,
}

impl Procedure {
    /// Bytes of the fixed part in front of the transition sub-records.
    const HEADER_LEN: usize = 20;

    /// Decodes a SID or STAR sub-record.
    ///
    /// Damage below the fixed header is absorbed: a broken transition
    /// or leg is logged and skipped while the remaining sub-records
    /// still decode.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot hold the fixed header.
    pub fn decode(data: &[u8], kind: ProcedureKind) -> Result<Self, Error> {
        let mut stream = Stream::new(data);
        stream.seek(RECORD_HEADER_LEN);
        stream.skip(2);

        // Transition counts are advisory; the scan below is driven by
        // the declared sub-record sizes instead.
        let _runway_transitions = stream.read_u8()?;
        let _common_legs = stream.read_u8()?;
        let _enroute_transitions = stream.read_u8()?;
        stream.skip(1);
        let ident = fixed_ident(stream.read_bytes(8)?);

        let mut procedure = Self {
            kind,
            ident,
            common_legs: Vec::new(),
            runway_transitions: HashMap::new(),
            enroute_transitions: HashMap::new(),
        };

        for sub in SubRecords::new(&data[Self::HEADER_LEN..]) {
            match sub.id {
                COMMON_LEGS_REV1 | COMMON_LEGS_REV2 | COMMON_LEGS_REV3 => {
                    let revision = LegRevision::from_container_id(sub.id);
                    let mut stream = Stream::new(sub.data);
                    stream.seek(RECORD_HEADER_LEN);
                    decode_legs(&mut stream, revision, &mut procedure.common_legs);
                }
                RUNWAY_TRANSITION => match runway_transition(sub.data) {
                    Ok((name, legs)) => {
                        // Later duplicates replace earlier ones.
                        procedure.runway_transitions.insert(name, legs);
                    }
                    Err(error) => {
                        debug!("runway transition in {} rejected: {}", procedure.ident, error);
                    }
                },
                ENROUTE_TRANSITION_LEGACY | ENROUTE_TRANSITION => {
                    match enroute_transition(sub.id, sub.data, kind) {
                        Ok(Some((name, legs))) => {
                            procedure.enroute_transitions.insert(name, legs);
                        }
                        // Without a usable leg there is no fix to key
                        // the transition by.
                        Ok(None) => {}
                        Err(error) => {
                            debug!(
                                "enroute transition in {} rejected: {}",
                                procedure.ident, error
                            );
                        }
                    }
                }
                id => trace!("skipping sub-record {:#06x} in {} {}", id, kind, procedure.ident),
            }
        }

        Ok(procedure)
    }

    /// Decoded legs across the common route and all transitions.
    pub fn leg_count(&self) -> usize {
        self.common_legs.len()
            + self.runway_transitions.values().map(Vec::len).sum::<usize>()
            + self.enroute_transitions.values().map(Vec::len).sum::<usize>()
    }
}

/// Reads a fixed 8 byte identifier, trimming NUL and space padding.
fn fixed_ident(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Reads a 16 bit leg count and that many legs.
///
/// A truncated leg ends the list; implausible legs are dropped without
/// note.
fn decode_legs(stream: &mut Stream, revision: LegRevision, legs: &mut Vec<Leg>) {
    let count = match stream.read_u16() {
        Ok(count) => count,
        Err(error) => {
            debug!("leg count unreadable: {}", error);
            return;
        }
    };

    for _ in 0..count {
        let data = match stream.read_bytes(revision.leg_len()) {
            Ok(data) => data,
            Err(error) => {
                debug!("leg truncated: {}", error);
                break;
            }
        };
        match Leg::decode(data, revision) {
            Ok(leg) if leg.is_valid() => legs.push(leg),
            // Implausible values, dropped.
            Ok(_) => {}
            Err(error) => {
                debug!("leg rejected: {}", error);
                break;
            }
        }
    }
}

fn runway_transition(data: &[u8]) -> Result<(String, Vec<Leg>), Error> {
    let mut stream = Stream::new(data);
    stream.seek(RECORD_HEADER_LEN);

    let _legs = stream.read_u8()?;
    let number = stream.read_u8()?;
    let designator = stream.read_u8()? & 0x07;
    stream.skip(3);
    let container_id = stream.read_u16()?;
    let _container_size = stream.read_u32()?;

    let name = decode_runway_name(u32::from(number), u32::from(designator));
    let mut legs = Vec::new();
    decode_legs(&mut stream, LegRevision::from_container_id(container_id), &mut legs);

    Ok((name, legs))
}

fn enroute_transition(
    id: u16,
    data: &[u8],
    kind: ProcedureKind,
) -> Result<Option<(String, Vec<Leg>)>, Error> {
    let mut stream = Stream::new(data);
    stream.seek(RECORD_HEADER_LEN);

    let _legs = stream.read_u8()?;
    stream.skip(1);
    if id == ENROUTE_TRANSITION_LEGACY {
        stream.skip(8);
    }
    let container_id = stream.read_u16()?;
    let _container_size = stream.read_u32()?;

    let mut legs = Vec::new();
    decode_legs(&mut stream, LegRevision::from_container_id(container_id), &mut legs);

    // The transition is keyed by the fix it meets the airway structure
    // at: the last leg of a departure, the first leg of an arrival.
    let keyed_by = match kind {
        ProcedureKind::Sid => legs.last(),
        ProcedureKind::Star => legs.first(),
    };
    let Some(leg) = keyed_by else {
        return Ok(None);
    };

    let name = leg.fix.ident.clone();
    Ok(Some((name, legs)))
}
