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

use bgl::records::{Leg, ProcedureKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Waypoint;

/// A departure or arrival procedure of one airport.
///
/// The legs come in up to three pieces: transitions keyed by the runway
/// they serve, a common part every variant flies and transitions keyed
/// by the enroute fix they join. [`Procedure::waypoints`] stitches the
/// pieces into flying order.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Procedure {
    pub(crate) ident: String,
    pub(crate) airport_ident: String,
    pub(crate) kind: ProcedureKind,
    pub(crate) common_legs: Vec<Leg>,
    pub(crate) runway_transitions: HashMap<String, Vec<Leg>>,
    pub(crate) enroute_transitions: HashMap<String, Vec<Leg>>,
}

impl Procedure {
    /// The procedure identifier, e.g. `AMLU1A`.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The identifier of the airport this procedure belongs to.
    pub fn airport_ident(&self) -> &str {
        &self.airport_ident
    }

    /// Whether this is a departure or an arrival.
    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    /// The legs every variant of the procedure flies.
    pub fn common_legs(&self) -> &[Leg] {
        &self.common_legs
    }

    /// The runway designators this procedure has transitions for.
    pub fn runway_transitions(&self) -> impl Iterator<Item = &str> {
        self.runway_transitions.keys().map(String::as_str)
    }

    /// The enroute fixes this procedure has transitions for.
    pub fn enroute_transitions(&self) -> impl Iterator<Item = &str> {
        self.enroute_transitions.keys().map(String::as_str)
    }

    /// Assembles the legs into a numbered waypoint sequence.
    ///
    /// Departures run runway transition, common part, enroute
    /// transition; arrivals the other way around. The `transition`
    /// name selects on both sides without regard to case. A side
    /// without a transition of that name falls back to its sole
    /// transition if it has exactly one and stays out of the sequence
    /// otherwise. With no name only the common part is returned.
    pub fn waypoints(&self, transition: Option<&str>) -> Vec<Waypoint> {
        let runway = select(&self.runway_transitions, transition);
        let enroute = select(&self.enroute_transitions, transition);

        let (first, last) = match self.kind {
            ProcedureKind::Sid => (runway, enroute),
            ProcedureKind::Star => (enroute, runway),
        };

        first
            .iter()
            .chain(self.common_legs.iter())
            .chain(last.iter())
            .enumerate()
            .map(|(index, leg)| Waypoint::from_leg(index as u32 + 1, leg))
            .collect()
    }
}

fn select<'a>(transitions: &'a HashMap<String, Vec<Leg>>, name: Option<&str>) -> &'a [Leg] {
    let Some(name) = name else {
        return &[];
    };

    if let Some(legs) = transitions
        .iter()
        .find_map(|(key, legs)| key.eq_ignore_ascii_case(name).then_some(legs))
    {
        return legs;
    }

    // No transition here carries the name; a single one leaves nothing
    // to choose between.
    if transitions.len() == 1 {
        if let Some(legs) = transitions.values().next() {
            return legs;
        }
    }

    &[]
}
