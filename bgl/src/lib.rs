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

//! Flight simulator scenery database (BGL) procedure parser.
//!
//! Scenery databases pack airports, navaids and terminal procedures
//! into a binary container of sections, subsections and records. This
//! crate walks the airport section and decodes every SID and STAR with
//! its legs and transitions. It works on in-memory bytes; reading files
//! and caching decoded results is left to the caller.
//!
//! The decoder is built for third party content: damage is expected and
//! never aborts a read. A file failing the header screen decodes to an
//! empty [`Scan`], a damaged record or leg is skipped and the scan
//! resynchronizes on the next declared boundary. Everything skipped is
//! logged through [`log`] and reported on [`Scan::issues`].
//!
//! # Examples
//!
//! Decode a scenery file and list its procedures:
//!
//! ```no_run
//! let data = std::fs::read("NVX15110.bgl").expect("file should be readable");
//!
//! for airport in &bgl::scan(&data).airports {
//!     for procedure in &airport.procedures {
//!         println!("{} {} {}", airport.ident, procedure.kind, procedure.ident);
//!     }
//! }
//! ```
//!
//! The value codecs are usable on their own, for instance to undo the
//! base-38 identifier packing:
//!
//! ```
//! use bgl::codec::decode_identifier;
//!
//! // "EDDH" packed on top of a 5 bit flag field
//! assert_eq!(decode_identifier(900_201 << 5, 5, 5), "EDDH");
//! ```

pub mod codec;
mod container;
mod error;
pub mod records;
mod stream;

pub use container::{scan, Header, Scan, ScanIssue, SectionKind};
pub use error::Error;
