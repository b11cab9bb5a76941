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

use bgl::ScanIssue;
use time::OffsetDateTime;

use super::{Airport, Procedure, ProcedureDatabase};

/// Collects airports and procedures into a [`ProcedureDatabase`].
#[derive(Default)]
pub struct DatabaseBuilder {
    airports: HashMap<String, Airport>,
    procedures: HashMap<String, Vec<Procedure>>,
    timestamp: Option<OffsetDateTime>,
    issues: Vec<ScanIssue>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an airport, replacing a previously added one with the same
    /// identifier.
    pub fn add_airport(&mut self, airport: Airport) {
        self.airports.insert(airport.ident.clone(), airport);
    }

    /// Adds a procedure under its airport identifier.
    pub fn add_procedure(&mut self, procedure: Procedure) {
        self.procedures
            .entry(procedure.airport_ident.clone())
            .or_default()
            .push(procedure);
    }

    /// Sets the compile timestamp of the decoded file.
    pub fn with_timestamp(mut self, timestamp: Option<OffsetDateTime>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attaches the parts of the file the decoder had to reject.
    pub fn with_issues(mut self, issues: Vec<ScanIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn build(self) -> ProcedureDatabase {
        ProcedureDatabase {
            airports: self.airports,
            procedures: self.procedures,
            timestamp: self.timestamp,
            issues: self.issues,
        }
    }
}
