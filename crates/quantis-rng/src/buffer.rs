//! Scoped raw-byte buffers for device reads.
//!
//! A [`RawBuffer`] is allocated immediately before one read, owned by the
//! draw that requested it, and wiped when dropped. Dropping happens on every
//! exit path, including early returns through `?`.

use zeroize::Zeroize;

use crate::error::{RngError, Result};

/// Hard ceiling on a single raw read (16 MiB).
pub const MAX_READ_SIZE: usize = 16 * 1024 * 1024;

/// Width of one native scaled integer.
pub const I32_WIDTH: usize = std::mem::size_of::<i32>();

/// Width of one raw value used for scaled doubles.
pub const U64_WIDTH: usize = std::mem::size_of::<u64>();

/// Compute `count * width` and check it against [`MAX_READ_SIZE`].
///
/// Overflowing products are reported as too large, never wrapped.
pub fn request_size(count: usize, width: usize) -> Result<usize> {
    let requested = count.checked_mul(width).ok_or(RngError::TooLargeRequest {
        requested: usize::MAX,
        limit: MAX_READ_SIZE,
    })?;
    check_request(requested)?;
    Ok(requested)
}

/// Reject byte counts above [`MAX_READ_SIZE`].
pub fn check_request(byte_count: usize) -> Result<()> {
    if byte_count > MAX_READ_SIZE {
        return Err(RngError::TooLargeRequest {
            requested: byte_count,
            limit: MAX_READ_SIZE,
        });
    }
    Ok(())
}

/// Zero-initialised byte buffer owned by a single draw.
pub struct RawBuffer {
    bytes: Vec<u8>,
}

impl RawBuffer {
    /// Allocate `len` zeroed bytes.
    ///
    /// # Errors
    ///
    /// Returns `RngError::TooLargeRequest` when `len` exceeds [`MAX_READ_SIZE`].
    pub fn allocate(len: usize) -> Result<Self> {
        check_request(len)?;
        #[cfg(test)]
        live::acquire();
        Ok(Self {
            bytes: vec![0u8; len],
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Decode the little-endian `i32` at byte `offset`.
    pub fn read_i32_le(&self, offset: usize) -> Option<i32> {
        let end = offset.checked_add(I32_WIDTH)?;
        let chunk: [u8; I32_WIDTH] = self.bytes.get(offset..end)?.try_into().ok()?;
        Some(i32::from_le_bytes(chunk))
    }

    /// Decode the little-endian `u64` at byte `offset`.
    pub fn read_u64_le(&self, offset: usize) -> Option<u64> {
        let end = offset.checked_add(U64_WIDTH)?;
        let chunk: [u8; U64_WIDTH] = self.bytes.get(offset..end)?.try_into().ok()?;
        Some(u64::from_le_bytes(chunk))
    }

    /// All complete little-endian `i32` values, in order.
    pub fn i32_values(&self) -> impl Iterator<Item = i32> + '_ {
        self.bytes.chunks_exact(I32_WIDTH).map(|chunk| {
            let mut raw = [0u8; I32_WIDTH];
            raw.copy_from_slice(chunk);
            i32::from_le_bytes(raw)
        })
    }

    /// Contiguous slices of `length` bytes. A zero `length` yields nothing.
    pub fn slices(&self, length: usize) -> impl Iterator<Item = &[u8]> + '_ {
        let step = length.max(1);
        self.bytes
            .chunks_exact(step)
            .take(if length == 0 { 0 } else { usize::MAX })
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
        #[cfg(test)]
        live::release();
    }
}

impl std::fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawBuffer")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
