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

use crate::Error;

/// A little-endian cursor over an in-memory byte slice.
///
/// All scenery container values are little-endian. Every read is bounds
/// checked and fails with [`Error::UnexpectedEnd`] instead of panicking,
/// which lets the scan skip damaged structures and carry on.
pub struct Stream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Stream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The current read position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Jumps to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read fails.
    #[inline]
    pub fn seek(&mut self, pos: usize) -> &mut Self {
        self.pos = pos;
        self
    }

    /// Skips `n` bytes, advancing the position without reading.
    #[inline]
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.pos = self.pos.saturating_add(n);
        self
    }

    /// Reads the next `n` bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than `n` bytes remain.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let start = self.pos;
        let end = start.saturating_add(n);
        if end > self.bytes.len() {
            return Err(Error::UnexpectedEnd {
                offset: start,
                needed: n,
            });
        }
        self.pos = end;
        Ok(&self.bytes[start..end])
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values() {
        let bytes = [0x42, 0x00, 0x78, 0x56, 0x34, 0x12];
        let mut stream = Stream::new(&bytes);

        assert_eq!(stream.read_u16().expect("should read a u16"), 0x0042);
        assert_eq!(stream.read_u32().expect("should read a u32"), 0x12345678);
        assert_eq!(stream.pos(), 6);
    }

    #[test]
    fn read_past_end_fails_without_advancing() {
        let bytes = [0x01, 0x02];
        let mut stream = Stream::new(&bytes);

        assert_eq!(
            stream.read_u32(),
            Err(Error::UnexpectedEnd {
                offset: 0,
                needed: 4
            })
        );
        assert_eq!(stream.pos(), 0);
        assert_eq!(stream.read_u16().expect("should still read a u16"), 0x0201);
    }

    #[test]
    fn seek_past_end_is_allowed_but_reads_fail() {
        let bytes = [0u8; 4];
        let mut stream = Stream::new(&bytes);
        stream.seek(100);

        assert_eq!(
            stream.read_u8(),
            Err(Error::UnexpectedEnd {
                offset: 100,
                needed: 1
            })
        );
    }

    #[test]
    fn signed_and_float_reads() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-10001750i32).to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());

        let mut stream = Stream::new(&bytes);
        assert_eq!(stream.read_i32().expect("should read an i32"), -10001750);
        assert_eq!(stream.read_f32().expect("should read an f32"), 1.5);
    }
}
