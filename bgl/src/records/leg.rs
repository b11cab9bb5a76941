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

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::decode_identifier;
use crate::stream::Stream;
use crate::Error;

/// The path termination of a leg, following the ARINC 424 coding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LegType {
    /// Arc to a fix.
    Af,
    /// Course to an altitude.
    Ca,
    /// Course to a DME distance.
    Cd,
    /// Course to a fix.
    Cf,
    /// Course to an intercept.
    Ci,
    /// Course to a radial.
    Cr,
    /// Direct to a fix.
    Df,
    /// Fix to an altitude.
    Fa,
    /// Track from a fix for a distance.
    Fc,
    /// Track from a fix to a DME distance.
    Fd,
    /// From a fix to a manual termination.
    Fm,
    /// Initial fix.
    If,
    /// Procedure turn.
    Pi,
    /// Constant radius arc.
    Rf,
    /// Track to a fix.
    Tf,
    /// Heading to an altitude.
    Va,
    /// Heading to a DME distance.
    Vd,
    /// Heading to an intercept.
    Vi,
    /// Heading to a manual termination.
    Vm,
    /// Heading to a radial.
    Vr,
    /// Hold to an altitude.
    Ha,
    /// Hold, terminating at the fix.
    Hf,
    /// Hold to a manual termination.
    Hm,
    /// A code outside the documented range.
    Unknown(u8),
}

impl LegType {
    fn from_byte(code: u8) -> Self {
        match code {
            1 => Self::Af,
            2 => Self::Ca,
            3 => Self::Cd,
            4 => Self::Cf,
            5 => Self::Ci,
            6 => Self::Cr,
            7 => Self::Df,
            8 => Self::Fa,
            9 => Self::Fc,
            10 => Self::Fd,
            11 => Self::Fm,
            12 => Self::If,
            13 => Self::Pi,
            14 => Self::Rf,
            15 => Self::Tf,
            16 => Self::Va,
            17 => Self::Vd,
            18 => Self::Vi,
            19 => Self::Vm,
            20 => Self::Vr,
            21 => Self::Ha,
            22 => Self::Hf,
            23 => Self::Hm,
            code => Self::Unknown(code),
        }
    }
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Af => "AF",
            Self::Ca => "CA",
            Self::Cd => "CD",
            Self::Cf => "CF",
            Self::Ci => "CI",
            Self::Cr => "CR",
            Self::Df => "DF",
            Self::Fa => "FA",
            Self::Fc => "FC",
            Self::Fd => "FD",
            Self::Fm => "FM",
            Self::If => "IF",
            Self::Pi => "PI",
            Self::Rf => "RF",
            Self::Tf => "TF",
            Self::Va => "VA",
            Self::Vd => "VD",
            Self::Vi => "VI",
            Self::Vm => "VM",
            Self::Vr => "VR",
            Self::Ha => "HA",
            Self::Hf => "HF",
            Self::Hm => "HM",
            Self::Unknown(_) => "??",
        };
        f.write_str(code)
    }
}

/// How the two altitude values constrain a leg.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AltitudeDescriptor {
    /// No altitude constraint.
    Empty,
    /// Cross at the first altitude.
    At,
    /// Cross at or above the first altitude.
    AtOrAbove,
    /// Cross at or below the first altitude.
    AtOrBelow,
    /// Cross between the two altitudes.
    Between,
    /// A code outside the documented range.
    Unknown(u8),
}

impl AltitudeDescriptor {
    fn from_byte(code: u8) -> Self {
        match code {
            0 => Self::Empty,
            1 => Self::At,
            2 => Self::AtOrAbove,
            3 => Self::AtOrBelow,
            4 => Self::Between,
            code => Self::Unknown(code),
        }
    }
}

/// Which way the aircraft turns onto the leg.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurnDirection {
    None,
    Left,
    Right,
    Either,
}

/// What kind of fix a leg references.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixType {
    Vor,
    Ndb,
    TerminalNdb,
    Waypoint,
    TerminalWaypoint,
    Runway,
    Airport,
    /// A code outside the documented range.
    Unknown(u8),
}

impl FixType {
    fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Vor,
            2 => Self::Ndb,
            3 => Self::TerminalNdb,
            4 => Self::Waypoint,
            5 => Self::TerminalWaypoint,
            6 => Self::Runway,
            7 => Self::Airport,
            code => Self::Unknown(code),
        }
    }
}

/// A fix reference as packed into a leg.
///
/// Two 32 bit words: the first holds the fix type in its low nibble and
/// the base-38 identifier above bit 5, the second the 11 bit region
/// code and the containing airport above it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixRef {
    pub fix_type: FixType,
    pub ident: String,
    pub region: String,
    pub airport: String,
}

impl FixRef {
    fn decode(descriptor: u32, region_airport: u32) -> Self {
        Self {
            fix_type: FixType::from_code((descriptor & 0x0F) as u8),
            ident: decode_identifier(u64::from(descriptor >> 5), 5, 0),
            region: decode_identifier(u64::from(region_airport & 0x7FF), 5, 0),
            airport: decode_identifier(u64::from(region_airport >> 11), 5, 0),
        }
    }
}

/// The revision tier of a leg container.
///
/// Later scenery compilers append tail fields to each leg; the
/// container id says which tail to expect. Ids at `0xE0` and above
/// carry at least the first revision's tail.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum LegRevision {
    Base,
    Rev1,
    Rev2,
    Rev3,
}

impl LegRevision {
    /// Classifies a leg container id.
    pub fn from_container_id(id: u16) -> Self {
        match id {
            0x00E1 | 0x00E5 => Self::Rev1,
            0x00EC | 0x00F0 => Self::Rev2,
            0x00F4 | 0x00F8 => Self::Rev3,
            id if id >= 0x00E0 => Self::Rev1,
            _ => Self::Base,
        }
    }

    /// Bytes occupied by one leg at this revision.
    pub fn leg_len(self) -> usize {
        Leg::CORE_LEN
            + match self {
                Self::Base => 0,
                Self::Rev1 => 12,
                Self::Rev2 => 20,
                Self::Rev3 => 24,
            }
    }
}

/// One procedure leg.
///
/// All revisions decode into the same struct; fields a revision does
/// not carry keep their zero defaults.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    pub leg_type: LegType,
    pub altitude_descriptor: AltitudeDescriptor,
    pub turn_direction: TurnDirection,
    /// Course values are true instead of magnetic.
    pub true_course: bool,
    /// [`Leg::distance_or_time`] holds minutes instead of NM.
    pub is_time: bool,
    pub fly_over: bool,
    /// Reserved; this decoder never marks legs as missed approach.
    pub missed: bool,
    pub fix: FixRef,
    pub recommended_fix: FixRef,
    /// Center fix of a constant radius arc, on RF legs only.
    pub arc_center: Option<FixRef>,
    pub theta: f32,
    pub rho: f32,
    pub course: f32,
    pub distance_or_time: f32,
    pub altitude1: f32,
    pub altitude2: f32,
    pub speed_limit: f32,
    pub vertical_angle: f32,
}

impl Leg {
    /// Bytes shared by every leg revision.
    pub const CORE_LEN: usize = 44;

    /// Decodes one leg at the given revision.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is shorter than
    /// [`LegRevision::leg_len`].
    pub fn decode(data: &[u8], revision: LegRevision) -> Result<Self, Error> {
        let mut stream = Stream::new(data);

        let leg_type = LegType::from_byte(stream.read_u8()?);
        let altitude_descriptor = AltitudeDescriptor::from_byte(stream.read_u8()?);
        let flags = stream.read_u16()?;

        let descriptor = stream.read_u32()?;
        let region_airport = stream.read_u32()?;
        let fix = FixRef::decode(descriptor, region_airport);

        let descriptor = stream.read_u32()?;
        let region_airport = stream.read_u32()?;
        let recommended_fix = FixRef::decode(descriptor, region_airport);

        let mut leg = Self {
            leg_type,
            altitude_descriptor,
            turn_direction: match flags & 0x03 {
                1 => TurnDirection::Left,
                2 => TurnDirection::Right,
                3 => TurnDirection::Either,
                _ => TurnDirection::None,
            },
            true_course: flags & 0x0100 != 0,
            is_time: flags & 0x0200 != 0,
            fly_over: flags & 0x0400 != 0,
            missed: false,
            fix,
            recommended_fix,
            arc_center: None,
            theta: stream.read_f32()?,
            rho: stream.read_f32()?,
            course: stream.read_f32()?,
            distance_or_time: stream.read_f32()?,
            altitude1: stream.read_f32()?,
            altitude2: stream.read_f32()?,
            speed_limit: 0.0,
            vertical_angle: 0.0,
        };

        if revision >= LegRevision::Rev1 {
            leg.speed_limit = stream.read_f32()?;
            leg.vertical_angle = stream.read_f32()?;
            stream.skip(4);
        }
        if revision >= LegRevision::Rev2 {
            // The arc center pair is present for every leg type; only
            // RF legs give it a meaning.
            let descriptor = stream.read_u32()?;
            let region_airport = stream.read_u32()?;
            if leg.leg_type == LegType::Rf {
                leg.arc_center = Some(FixRef::decode(descriptor, region_airport));
            }
        }

        Ok(leg)
    }

    /// Whether the decoded values are plausible.
    ///
    /// Bearings must lie in 0..=360, the DME distance must not be
    /// negative and both altitudes must stay within 0..=60000.
    pub fn is_valid(&self) -> bool {
        (0.0..=360.0).contains(&self.theta)
            && (0.0..=360.0).contains(&self.course)
            && self.rho >= 0.0
            && (0.0..=60_000.0).contains(&self.altitude1)
            && (0.0..=60_000.0).contains(&self.altitude2)
    }
}
