//! Bounds-checked cursor over the memory a guest shares with the host.
//!
//! Guest-supplied offsets and lengths are untrusted. Every access validates
//! the full span against the buffer length before touching a byte; sequential
//! reads and writes advance the position by the exact width of the type, with
//! no implicit padding. All multi-byte values are little-endian.

use crate::error::HostError;

pub struct MemCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> MemCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Reposition the cursor. An offset equal to the buffer length is legal
    /// (any subsequent non-empty access will fail its own span check).
    pub fn move_to(&mut self, offset: usize) -> Result<(), HostError> {
        if offset > self.buf.len() {
            return Err(HostError::OutOfBounds {
                offset,
                len: 0,
                buf_len: self.buf.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<(), HostError> {
        let span = self.span(n)?;
        self.pos = span.end;
        Ok(())
    }

    /// Validate `[pos, pos + len)` against the buffer, without advancing.
    fn span(&self, len: usize) -> Result<std::ops::Range<usize>, HostError> {
        let end = self.pos.checked_add(len).ok_or(HostError::OutOfBounds {
            offset: self.pos,
            len,
            buf_len: self.buf.len(),
        })?;
        if end > self.buf.len() {
            return Err(HostError::OutOfBounds {
                offset: self.pos,
                len,
                buf_len: self.buf.len(),
            });
        }
        Ok(self.pos..end)
    }

    pub fn read_u32(&mut self) -> Result<u32, HostError> {
        let span = self.span(4)?;
        let v = u32::from_le_bytes(self.buf[span.clone()].try_into().unwrap());
        self.pos = span.end;
        Ok(v)
    }

    pub fn read_f32(&mut self) -> Result<f32, HostError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N], HostError> {
        // validate the whole array before consuming any element
        self.span(N * 4)?;
        let mut out = [0.0f32; N];
        for slot in out.iter_mut() {
            *slot = self.read_f32()?;
        }
        Ok(out)
    }

    pub fn read_u32_vec(&mut self, n: usize) -> Result<Vec<u32>, HostError> {
        self.span(n.checked_mul(4).ok_or_else(|| overflow_len(self.pos))?)?;
        (0..n).map(|_| self.read_u32()).collect()
    }

    pub fn read_f32_vec(&mut self, n: usize) -> Result<Vec<f32>, HostError> {
        self.span(n.checked_mul(4).ok_or_else(|| overflow_len(self.pos))?)?;
        (0..n).map(|_| self.read_f32()).collect()
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, HostError> {
        let span = self.span(n)?;
        let out = self.buf[span.clone()].to_vec();
        self.pos = span.end;
        Ok(out)
    }

    pub fn write_u32(&mut self, v: u32) -> Result<(), HostError> {
        let span = self.span(4)?;
        self.buf[span.clone()].copy_from_slice(&v.to_le_bytes());
        self.pos = span.end;
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<(), HostError> {
        self.write_u32(v.to_bits())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), HostError> {
        let span = self.span(bytes.len())?;
        self.buf[span.clone()].copy_from_slice(bytes);
        self.pos = span.end;
        Ok(())
    }

    pub fn write_u32_slice(&mut self, values: &[u32]) -> Result<(), HostError> {
        self.span(values.len().checked_mul(4).ok_or_else(|| overflow_len(self.pos))?)?;
        for v in values {
            self.write_u32(*v)?;
        }
        Ok(())
    }

    pub fn write_f32_slice(&mut self, values: &[f32]) -> Result<(), HostError> {
        self.span(values.len().checked_mul(4).ok_or_else(|| overflow_len(self.pos))?)?;
        for v in values {
            self.write_f32(*v)?;
        }
        Ok(())
    }

    /// Decode a guest string passed as an absolute `(offset, len)` pair.
    /// Strict UTF-8; malformed input is a decode error. Does not move the
    /// cursor.
    pub fn read_utf8(&self, offset: usize, len: usize) -> Result<String, HostError> {
        let end = offset.checked_add(len).ok_or(HostError::OutOfBounds {
            offset,
            len,
            buf_len: self.buf.len(),
        })?;
        if end > self.buf.len() {
            return Err(HostError::OutOfBounds {
                offset,
                len,
                buf_len: self.buf.len(),
            });
        }
        match encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(
            &self.buf[offset..end],
        ) {
            Some(s) => Ok(s.into_owned()),
            None => Err(HostError::decode(format!(
                "string at offset {offset} is not valid UTF-8"
            ))),
        }
    }
}

fn overflow_len(offset: usize) -> HostError {
    HostError::OutOfBounds {
        offset,
        len: usize::MAX,
        buf_len: 0,
    }
}
