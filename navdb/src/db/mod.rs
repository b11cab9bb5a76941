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

//! The procedure database decoded from a scenery file.
//!
//! The database is an in-memory index of the airports found in one
//! file together with their departure and arrival procedures. It is
//! decoded in one pass and read-only afterwards; queries never touch
//! the file again.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bgl::records::ProcedureKind;
use bgl::ScanIssue;
use time::OffsetDateTime;

use crate::error::{Error, Result};

mod airport;
mod builder;
mod convert;
mod procedure;
mod waypoint;

pub use airport::Airport;
pub use builder::DatabaseBuilder;
pub use procedure::Procedure;
pub use waypoint::Waypoint;

/// The airports and procedures of one scenery file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ProcedureDatabase {
    airports: HashMap<String, Airport>,
    procedures: HashMap<String, Vec<Procedure>>,
    timestamp: Option<OffsetDateTime>,
    issues: Vec<ScanIssue>,
}

impl ProcedureDatabase {
    /// Returns a builder to assemble a database by hand.
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Reads and decodes the scenery file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. Content the decoder
    /// has to reject is no error; it ends up on
    /// [`ProcedureDatabase::issues`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::decode(&data))
    }

    /// The airports found in the file, in no particular order.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    /// Looks up an airport by its identifier.
    pub fn airport(&self, ident: &str) -> Option<&Airport> {
        self.airports.get(&ident.to_ascii_uppercase())
    }

    /// All procedures of the given airport.
    pub fn procedures(&self, airport_ident: &str) -> impl Iterator<Item = &Procedure> {
        self.procedures
            .get(&airport_ident.to_ascii_uppercase())
            .into_iter()
            .flatten()
    }

    /// The departure procedures of the given airport.
    pub fn sids(&self, airport_ident: &str) -> impl Iterator<Item = &Procedure> {
        self.procedures(airport_ident)
            .filter(|procedure| procedure.kind() == ProcedureKind::Sid)
    }

    /// The arrival procedures of the given airport.
    pub fn stars(&self, airport_ident: &str) -> impl Iterator<Item = &Procedure> {
        self.procedures(airport_ident)
            .filter(|procedure| procedure.kind() == ProcedureKind::Star)
    }

    /// Looks up a procedure of an airport by its identifier.
    pub fn find(&self, airport_ident: &str, ident: &str) -> Option<&Procedure> {
        self.procedures(airport_ident)
            .find(|procedure| procedure.ident().eq_ignore_ascii_case(ident))
    }

    /// Number of procedures across all airports.
    pub fn procedure_count(&self) -> usize {
        self.procedures.values().map(Vec::len).sum()
    }

    /// When the scenery compiler wrote the file, if it said so.
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        self.timestamp
    }

    /// The parts of the file the decoder had to reject.
    ///
    /// An empty slice means the whole file decoded cleanly.
    pub fn issues(&self) -> &[ScanIssue] {
        &self.issues
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn airport(ident: &str) -> Airport {
        Airport {
            ident: ident.to_string(),
            coordinate: Point::new(9.988, 53.630),
            elevation: 16.0,
            mag_var: 2.5,
        }
    }

    fn procedure(airport_ident: &str, ident: &str, kind: ProcedureKind) -> Procedure {
        Procedure {
            ident: ident.to_string(),
            airport_ident: airport_ident.to_string(),
            kind,
            common_legs: Vec::new(),
            runway_transitions: HashMap::new(),
            enroute_transitions: HashMap::new(),
        }
    }

    fn database() -> ProcedureDatabase {
        let mut builder = ProcedureDatabase::builder();
        builder.add_airport(airport("EDDH"));
        builder.add_airport(airport("EDDW"));
        builder.add_procedure(procedure("EDDH", "AMLU1A", ProcedureKind::Sid));
        builder.add_procedure(procedure("EDDH", "IDEK1A", ProcedureKind::Sid));
        builder.add_procedure(procedure("EDDH", "NOLG1B", ProcedureKind::Star));
        builder.add_procedure(procedure("EDDW", "LIRS2C", ProcedureKind::Star));
        builder.build()
    }

    #[test]
    fn queries_filter_by_airport_and_kind() {
        let db = database();

        assert_eq!(db.airports().count(), 2);
        assert_eq!(db.procedures("EDDH").count(), 3);
        assert_eq!(db.sids("EDDH").count(), 2);
        assert_eq!(db.stars("EDDH").count(), 1);
        assert_eq!(db.sids("EDDW").count(), 0);
        assert_eq!(db.procedure_count(), 4);
    }

    #[test]
    fn lookups_ignore_case() {
        let db = database();

        assert!(db.airport("eddh").is_some());
        assert!(db.find("eddh", "amlu1a").is_some());
        assert_eq!(db.procedures("eddw").count(), 1);
    }

    #[test]
    fn unknown_airports_yield_nothing() {
        let db = database();

        assert!(db.airport("KJFK").is_none());
        assert_eq!(db.procedures("KJFK").count(), 0);
        assert!(db.find("EDDH", "ZZZZ9Z").is_none());
    }
}
