use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use fixedstr::zstr;
use glam::{vec3, Vec3};

use crate::error::{AssetError, Result};

// A hostile count should not make us reserve gigabytes up front.
const MAX_PREALLOC: usize = 1 << 16;

/// A fixed-size little-endian record, decoded field by field.
pub trait BinaryData
where
    Self: Sized,
{
    /// Bytes taken by one record on disk.
    const SIZE: usize;

    fn read<R: Read>(buffer: &mut R) -> io::Result<Self>;
}

impl BinaryData for u8 {
    const SIZE: usize = 1;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        buffer.read_u8()
    }
}

impl BinaryData for u16 {
    const SIZE: usize = 2;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        buffer.read_u16::<LittleEndian>()
    }
}

impl BinaryData for i32 {
    const SIZE: usize = 4;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        buffer.read_i32::<LittleEndian>()
    }
}

impl BinaryData for u32 {
    const SIZE: usize = 4;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        buffer.read_u32::<LittleEndian>()
    }
}

impl BinaryData for f32 {
    const SIZE: usize = 4;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        buffer.read_f32::<LittleEndian>()
    }
}

impl BinaryData for Vec3 {
    const SIZE: usize = 12;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        let x = f32::read(buffer)?;
        let y = f32::read(buffer)?;
        let z = f32::read(buffer)?;
        Ok(vec3(x, y, z))
    }
}

impl<T: BinaryData + Copy + Default, const N: usize> BinaryData for [T; N] {
    const SIZE: usize = T::SIZE * N;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        let mut out = [T::default(); N];
        for item in out.iter_mut() {
            *item = T::read(buffer)?;
        }
        Ok(out)
    }
}

pub fn seek_to<R: Seek>(buffer: &mut R, offset: u64) -> Result<()> {
    buffer.seek(SeekFrom::Start(offset))?;
    Ok(())
}

/// Read exactly `count` records. Running out of input is a [AssetError::Truncated].
pub fn read_array<T: BinaryData, R: Read>(buffer: &mut R, count: usize) -> Result<Box<[T]>> {
    let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        items.push(T::read(buffer)?);
    }
    Ok(items.into_boxed_slice())
}

/// Read exactly `size` raw bytes.
pub fn read_bytes<R: Read>(buffer: &mut R, size: usize) -> Result<Box<[u8]>> {
    let mut bytes = Vec::with_capacity(size.min(MAX_PREALLOC));
    buffer.by_ref().take(size as u64).read_to_end(&mut bytes)?;
    if bytes.len() != size {
        return Err(AssetError::Truncated(format!(
            "unexpected EOF: wanted {size} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes.into_boxed_slice())
}

/// Read an `N` byte, NUL padded name field.
pub fn read_name<const N: usize, R: Read>(buffer: &mut R) -> io::Result<zstr<N>> {
    let mut raw = [0u8; N];
    buffer.read_exact(&mut raw)?;
    let len = raw.iter().position(|&b| b == 0).unwrap_or(N);
    Ok(bounded_str(&raw[..len]))
}

/// Copy bytes into a `zstr<N>`, cutting at the first NUL and keeping at most `N - 1`
/// bytes. Truncation never splits a character.
pub fn bounded_str<const N: usize>(bytes: &[u8]) -> zstr<N> {
    let bytes = match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    };
    let text = String::from_utf8_lossy(bytes);
    let mut end = text.len().min(N.saturating_sub(1));
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    zstr::make(&text[..end])
}
