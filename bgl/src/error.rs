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

use std::error;
use std::fmt;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Error {
    /// The file is smaller than the fixed 56 byte header.
    TruncatedHeader {
        actual: usize,
    },
    /// The header's section count is outside the plausible range.
    SectionCount {
        count: u32,
    },
    /// A read ran past the end of the available bytes.
    UnexpectedEnd {
        offset: usize,
        needed: usize,
    },
    /// An airport record is too short to hold its fixed header.
    AirportRecordLength {
        actual: usize,
    },
    /// Neither identifier field of an airport record decodes to a
    /// usable identifier.
    AirportIdent {
        decoded: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { actual } => {
                write!(f, "header should be 56 byte long but only {actual} available")
            }
            Self::SectionCount { count } => {
                write!(f, "section count {count} is outside 1..=100")
            }
            Self::UnexpectedEnd { offset, needed } => {
                write!(f, "needed {needed} byte at offset {offset} but hit the end")
            }
            Self::AirportRecordLength { actual } => {
                write!(f, "airport record should be at least 52 byte long but is {actual}")
            }
            Self::AirportIdent { decoded } => {
                write!(f, "airport identifier \"{decoded}\" is shorter than 3 characters")
            }
        }
    }
}

impl error::Error for Error {}
