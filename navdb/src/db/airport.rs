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

use geo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An airport that anchors the procedures decoded from a scenery file.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    pub(crate) ident: String,
    pub(crate) coordinate: Point<f64>,
    pub(crate) elevation: f64,
    pub(crate) mag_var: f32,
}

impl Airport {
    /// The airport identifier, e.g. `EDDH`.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The airport reference point with `x` as longitude and `y` as
    /// latitude, both in degrees.
    pub fn coordinate(&self) -> Point<f64> {
        self.coordinate
    }

    /// Field elevation in meter.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Magnetic variation in degrees as written by the scenery compiler.
    pub fn mag_var(&self) -> f32 {
        self.mag_var
    }
}
