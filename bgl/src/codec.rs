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

//! Pure value codecs for the packed scenery formats.
//!
//! Identifiers (airport ICAO codes, fix names, regions) are stored as
//! base-38 numbers, runways as a number/designator byte pair and
//! coordinates as fixed-point integers. All decoders here are stateless
//! and infallible; damaged input decodes to an empty or out-of-range
//! value which the record layer rejects.

/// Decodes a base-38 packed identifier.
///
/// Each digit encodes one character: `0` and `1` terminate the
/// identifier, `2..=11` map to `'0'..='9'` and `12..=37` map to
/// `'A'..='Z'`. Digits come out least-significant-first, so the string
/// builds up in reverse. At most 8 digits are collected and the result
/// is cut down to `max_chars`.
///
/// Some fields carry flag bits below the identifier; `bit_shift` drops
/// them before decoding. A packed value of zero is an absent identifier
/// and decodes to an empty string.
pub fn decode_identifier(packed: u64, max_chars: usize, bit_shift: u32) -> String {
    let mut value = packed.checked_shr(bit_shift).unwrap_or(0);
    if value == 0 {
        return String::new();
    }

    let mut digits = [0u8; 8];
    let mut len = 0;

    while value > 37 {
        let digit = (value % 38) as u8;
        if len < digits.len() {
            digits[len] = digit;
            len += 1;
        }
        value = (value - u64::from(digit)) / 38;
    }
    if len < digits.len() {
        digits[len] = value as u8;
        len += 1;
    }

    let mut chars = Vec::with_capacity(len);
    for &digit in &digits[..len] {
        match digit {
            0 | 1 => break,
            2..=11 => chars.push(char::from(b'0' + digit - 2)),
            _ => chars.push(char::from(b'A' + digit - 12)),
        }
    }
    chars.reverse();

    let mut ident: String = chars.into_iter().collect();
    ident.truncate(max_chars);
    ident
}

/// Formats a runway number/designator pair as a display name.
///
/// Numbers up to 36 print zero-padded ("07", "25"). Numbers above 36
/// name the compass directions used by grass strips and sea lanes; a
/// number outside that table prints as-is. The designator appends
/// left/right/center and the rarer water/A/B suffixes.
pub fn decode_runway_name(number: u32, designator: u32) -> String {
    let name = match number {
        37 => "N".to_string(),
        38 => "NE".to_string(),
        39 => "E".to_string(),
        40 => "SE".to_string(),
        41 => "S".to_string(),
        42 => "SW".to_string(),
        43 => "W".to_string(),
        44 => "NW".to_string(),
        n if n > 36 => n.to_string(),
        n => format!("{n:02}"),
    };

    let designator = match designator {
        1 => "L",
        2 => "R",
        3 => "C",
        4 => "W",
        5 => "A",
        6 => "B",
        _ => "",
    };

    name + designator
}

/// Converts a fixed-point latitude to degrees.
///
/// The container stores latitude as metres of northing from the
/// equator; 10 001 750 m is one quarter meridian.
pub fn decode_latitude_32(raw: i32) -> f64 {
    f64::from(raw) * 90.0 / 10_001_750.0
}

/// Converts a fixed-point longitude to degrees.
///
/// Longitude spreads the full signed 32 bit range over 360 degrees.
pub fn decode_longitude_32(raw: i32) -> f64 {
    f64::from(raw) * 360.0 / 4_294_967_296.0
}
