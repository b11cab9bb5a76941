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

//! Conversion from decoded scenery records into the database model.

use geo::Point;
use log::debug;

use super::{Airport, Procedure, ProcedureDatabase};

impl ProcedureDatabase {
    /// Decodes a database from the bytes of a scenery file.
    ///
    /// Decoding never fails. A file the scanner cannot make sense of
    /// yields an empty database and the rejections are kept on
    /// [`ProcedureDatabase::issues`].
    pub fn decode(data: &[u8]) -> Self {
        let scan = bgl::scan(data);
        let timestamp = scan.header.as_ref().and_then(bgl::Header::timestamp);

        let mut builder = ProcedureDatabase::builder();

        for record in scan.airports {
            builder.add_airport(Airport::from(&record));

            let airport_ident = record.ident;
            for procedure in record.procedures {
                builder.add_procedure(Procedure::from_record(&airport_ident, procedure));
            }
        }

        if !scan.issues.is_empty() {
            debug!("database decoded with {} issue(s)", scan.issues.len());
        }

        builder
            .with_timestamp(timestamp)
            .with_issues(scan.issues)
            .build()
    }
}

impl From<&bgl::records::Airport> for Airport {
    fn from(record: &bgl::records::Airport) -> Self {
        Self {
            ident: record.ident.clone(),
            coordinate: Point::new(record.longitude, record.latitude),
            elevation: record.elevation,
            mag_var: record.mag_var,
        }
    }
}

impl Procedure {
    pub(crate) fn from_record(airport_ident: &str, record: bgl::records::Procedure) -> Self {
        Self {
            ident: record.ident,
            airport_ident: airport_ident.to_string(),
            kind: record.kind,
            common_legs: record.common_legs,
            runway_transitions: record.runway_transitions,
            enroute_transitions: record.enroute_transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airports_map_onto_the_model() {
        let record = bgl::records::Airport {
            ident: "EDDH".to_string(),
            latitude: 53.630,
            longitude: 9.988,
            elevation: 16.0,
            mag_var: 2.5,
            procedures: Vec::new(),
        };

        let airport = Airport::from(&record);

        assert_eq!(airport.ident(), "EDDH");
        assert_eq!(airport.coordinate(), Point::new(9.988, 53.630));
        assert_eq!(airport.elevation(), 16.0);
        assert_eq!(airport.mag_var(), 2.5);
    }

    #[test]
    fn an_empty_file_decodes_to_an_empty_database() {
        let db = ProcedureDatabase::decode(&[]);

        assert_eq!(db.airports().count(), 0);
        assert_eq!(db.procedure_count(), 0);
        assert!(db.timestamp().is_none());
        assert!(!db.issues().is_empty());
    }
}
