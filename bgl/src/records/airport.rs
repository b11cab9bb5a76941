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

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::{decode_identifier, decode_latitude_32, decode_longitude_32};
use crate::records::procedure::{SID_RECORD, STAR_RECORD};
use crate::records::{Procedure, ProcedureKind, SubRecords};
use crate::stream::Stream;
use crate::Error;

/// An airport record with its decoded procedures.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    /// The ICAO identifier, 3 to 5 characters.
    pub ident: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Field elevation in metres.
    pub elevation: f64,
    /// Magnetic variation in degrees, as stored.
    pub mag_var: f32,
    /// Every SID and STAR that decoded with at least one leg.
    pub procedures: Vec<Procedure>,
}

impl Airport {
    /// Bytes of the fixed part in front of the sub-records.
    const HEADER_LEN: usize = 52;

    /// Decodes an airport record.
    ///
    /// A fault inside one procedure sub-record is logged and skipped;
    /// the remaining sub-records still decode.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot hold the fixed header or
    /// neither identifier slot decodes to at least 3 characters.
    pub fn decode(record: &[u8]) -> Result<Self, Error> {
        if record.len() < Self::HEADER_LEN {
            return Err(Error::AirportRecordLength {
                actual: record.len(),
            });
        }

        let mut stream = Stream::new(record);
        stream.seek(12);
        let longitude = decode_longitude_32(stream.read_i32()?);
        let latitude = decode_latitude_32(stream.read_i32()?);
        let elevation = f64::from(stream.read_i32()?) / 1000.0;

        stream.seek(36);
        let mag_var = stream.read_f32()?;

        let mut ident = decode_identifier(u64::from(stream.read_u32()?), 5, 5);
        if ident.len() < 3 {
            // Some compilers leave the first slot empty and write the
            // identifier into the region field instead.
            ident = decode_identifier(u64::from(stream.read_u32()?), 5, 5);
        }
        if ident.len() < 3 {
            return Err(Error::AirportIdent { decoded: ident });
        }

        let mut airport = Self {
            ident,
            latitude,
            longitude,
            elevation,
            mag_var,
            procedures: Vec::new(),
        };

        for sub in SubRecords::new(&record[Self::HEADER_LEN..]) {
            let kind = match sub.id {
                SID_RECORD => ProcedureKind::Sid,
                STAR_RECORD => ProcedureKind::Star,
                _ => continue,
            };
            match Procedure::decode(sub.data, kind) {
                Ok(procedure) if procedure.leg_count() > 0 => {
                    airport.procedures.push(procedure);
                }
                Ok(procedure) => {
                    trace!(
                        "{} {} at {} has no usable legs",
                        kind,
                        procedure.ident,
                        airport.ident
                    );
                }
                Err(error) => {
                    debug!("{} sub-record at {} rejected: {}", kind, airport.ident, error);
                }
            }
        }

        Ok(airport)
    }
}
