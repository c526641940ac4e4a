use std::io::{self, Read, Seek};

use crate::{
    binaries::{read_array, read_bytes, seek_to, BinaryData},
    error::{AssetError, Result},
};

use super::consts::LumpType;

pub trait Lump
where
    Self: Sized,
{
    /// Engine limit on the number of records. Going over it is suspicious, not fatal.
    fn max() -> usize;
    fn lump_type() -> LumpType;
}

// http://www.gamers.org/dEngine/quake/spec/quake-spec34/qkspec_4.htm
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPLump {
    pub offset: u32, // offset from the start of the BSP data
    pub size: u32,   // length of lump in bytes
}

impl BinaryData for BSPLump {
    const SIZE: usize = 8;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            offset: u32::read(buffer)?,
            size: u32::read(buffer)?,
        })
    }
}

impl BSPLump {
    /// Absolute position of the lump in a file whose BSP data starts at `base`.
    pub fn file_offset(&self, base: u64) -> u64 {
        base + self.offset as u64
    }

    /// Decode the lump as an array of `T`. The lump size has to be a whole number of
    /// records; a remainder means a corrupt or foreign-version file.
    pub fn decode<T: BinaryData, R: Read + Seek>(
        &self,
        buffer: &mut R,
        base: u64,
    ) -> Result<Box<[T]>> {
        let size = self.size as usize;
        if size % T::SIZE != 0 {
            return Err(AssetError::Format(format!(
                "lump size {size} is not a multiple of the {} byte record",
                T::SIZE
            )));
        }

        let len = size / T::SIZE;

        seek_to(buffer, self.file_offset(base))?;
        read_array(buffer, len)
    }

    pub fn read_bytes<R: Read + Seek>(&self, buffer: &mut R, base: u64) -> Result<Box<[u8]>> {
        seek_to(buffer, self.file_offset(base))?;
        read_bytes(buffer, self.size as usize)
    }
}

#[cfg(test)]
mod lump_tests {
    use std::io::Cursor;

    use super::BSPLump;

    fn words(base_pad: usize, words: &[u32]) -> Cursor<Vec<u8>> {
        let mut bytes = vec![0xAA; base_pad];
        for w in words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        Cursor::new(bytes)
    }

    #[test]
    fn count_is_size_over_record() {
        let mut buffer = words(0, &[1, 2, 3, 4]);
        let lump = BSPLump { offset: 4, size: 12 };
        let items = lump.decode::<u32, _>(&mut buffer, 0).unwrap();
        assert_eq!(&items[..], &[2, 3, 4]);
    }

    #[test]
    fn offsets_are_relative_to_base() {
        let mut buffer = words(7, &[10, 20]);
        let lump = BSPLump { offset: 4, size: 4 };
        let items = lump.decode::<u32, _>(&mut buffer, 7).unwrap();
        assert_eq!(&items[..], &[20]);
    }

    #[test]
    fn ragged_size_is_rejected() {
        let mut buffer = words(0, &[1, 2, 3]);
        let lump = BSPLump { offset: 0, size: 10 };
        let err = lump.decode::<u32, _>(&mut buffer, 0).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn oversized_lump_is_truncated() {
        let mut buffer = words(0, &[1, 2]);
        let lump = BSPLump { offset: 0, size: 16 };
        assert!(lump.decode::<u32, _>(&mut buffer, 0).unwrap_err().is_truncated());
        assert!(lump.read_bytes(&mut buffer, 0).unwrap_err().is_truncated());
    }

    #[test]
    fn empty_lump() {
        let mut buffer = words(0, &[]);
        let lump = BSPLump::default();
        assert!(lump.decode::<u32, _>(&mut buffer, 0).unwrap().is_empty());
        assert!(lump.read_bytes(&mut buffer, 0).unwrap().is_empty());
    }
}
