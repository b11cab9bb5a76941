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

use bgl::records::{AltitudeDescriptor, Leg, LegType, TurnDirection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step along an assembled procedure.
///
/// A waypoint is a leg made presentable: numbered within the assembled
/// sequence and reduced to the fields a flight plan or a map label
/// cares about. [`Procedure::waypoints`] produces them in flying order.
///
/// [`Procedure::waypoints`]: super::Procedure::waypoints
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    /// Position within the assembled sequence, starting at 1.
    pub sequence: u32,

    /// Identifier of the fix this leg terminates at.
    pub ident: String,

    /// ICAO region code of the fix.
    pub region: String,

    /// The path termination that leads to this waypoint.
    pub leg_type: LegType,

    /// How to read [`altitude1`] and [`altitude2`].
    ///
    /// [`altitude1`]: Self::altitude1
    /// [`altitude2`]: Self::altitude2
    pub altitude_descriptor: AltitudeDescriptor,

    /// First altitude constraint in meter.
    pub altitude1: f32,

    /// Second altitude constraint in meter.
    pub altitude2: f32,

    /// Speed limit in knots, 0.0 when unrestricted.
    pub speed_limit: f32,

    /// Course in degrees.
    pub course: f32,

    /// Leg length in nautical miles, or duration in minutes when
    /// [`is_time`] is set.
    ///
    /// [`is_time`]: Self::is_time
    pub distance_or_time: f32,

    /// Whether [`distance_or_time`] holds a duration.
    ///
    /// [`distance_or_time`]: Self::distance_or_time
    pub is_time: bool,

    /// Whether the fix must be overflown before turning.
    pub fly_over: bool,

    /// Mandatory turn direction, if any.
    pub turn_direction: TurnDirection,
}

impl Waypoint {
    pub(crate) fn from_leg(sequence: u32, leg: &Leg) -> Self {
        Self {
            sequence,
            ident: leg.fix.ident.clone(),
            region: leg.fix.region.clone(),
            leg_type: leg.leg_type,
            altitude_descriptor: leg.altitude_descriptor,
            altitude1: leg.altitude1,
            altitude2: leg.altitude2,
            speed_limit: leg.speed_limit,
            course: leg.course,
            distance_or_time: leg.distance_or_time,
            is_time: leg.is_time,
            fly_over: leg.fly_over,
            turn_direction: leg.turn_direction,
        }
    }
}
