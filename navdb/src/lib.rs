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

//! Navigation database for flight simulator scenery files.
//!
//! This crate turns the SID and STAR procedures buried in a scenery
//! file into a queryable in-memory database. The [`bgl`] crate does
//! the byte-level decoding; this crate holds the decoded model, the
//! queries and a per-file [`DatabaseCache`].
//!
//! ```no_run
//! use navdb::DatabaseCache;
//!
//! # fn main() -> navdb::Result<()> {
//! let cache = DatabaseCache::new();
//! let db = cache.get_or_load("NVX15110.bgl".as_ref())?;
//!
//! for sid in db.sids("EDDH") {
//!     for waypoint in sid.waypoints(Some("AMLUH")) {
//!         println!("{:>2} {:5} {}", waypoint.sequence, waypoint.ident, waypoint.leg_type);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Damaged files do not fail the load. Whatever decodes is served and
//! the rejected parts are reported:
//!
//! ```
//! use navdb::ProcedureDatabase;
//!
//! let db = ProcedureDatabase::decode(b"not a scenery file");
//!
//! assert_eq!(db.procedure_count(), 0);
//! assert!(!db.issues().is_empty());
//! ```

mod cache;
mod db;
mod error;

pub use cache::DatabaseCache;
pub use db::{Airport, DatabaseBuilder, Procedure, ProcedureDatabase, Waypoint};
pub use error::{Error, Result};

// The leg vocabulary is shared with the decoder.
pub use bgl::records::{
    AltitudeDescriptor, FixRef, FixType, Leg, LegType, ProcedureKind, TurnDirection,
};
