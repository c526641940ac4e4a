use std::{
    fmt,
    io::{Read, Seek},
};

use num_traits::FromPrimitive;

use crate::{
    binaries::{seek_to, BinaryData},
    bsp::consts::{LumpType, BSP_VERSION, HEADER_LUMPS},
    error::{AssetError, Result},
};

use super::lump::{BSPLump, Lump};

#[derive(Copy, Clone, Default)]
pub struct BSPHeader {
    pub version: i32,                   // BSP file version
    pub lumps: [BSPLump; HEADER_LUMPS], // lump directory array
    base: u64,                          // where the BSP data starts in the file
}

impl fmt::Debug for BSPHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BSPHeader");
        s.field("version", &self.version).field("base", &self.base);
        for (i, lump) in self.lumps.iter().enumerate() {
            if let Some(lump_type) = LumpType::from_usize(i) {
                s.field(&format!("{lump_type:?}"), lump);
            }
        }
        s.finish()
    }
}

impl BSPHeader {
    pub const SIZE: usize = 4 + HEADER_LUMPS * BSPLump::SIZE;

    /// Read the header of BSP data that starts `base` bytes into `buffer`.
    ///
    /// Only version 29 files are accepted; there is no attempt at reading older or newer
    /// revisions of the format.
    pub fn read_at<R: Read + Seek>(buffer: &mut R, base: u64) -> Result<Self> {
        seek_to(buffer, base)?;

        let version = i32::read(buffer)?;
        if version != BSP_VERSION {
            return Err(AssetError::Version {
                found: version,
                expected: BSP_VERSION,
            });
        }

        let lumps = <[BSPLump; HEADER_LUMPS]>::read(buffer)?;

        Ok(Self {
            version,
            lumps,
            base,
        })
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn get_lump_header(&self, lump: LumpType) -> &BSPLump {
        &self.lumps[lump as usize]
    }

    pub fn get_lump<T: Lump + BinaryData, R: Read + Seek>(&self, buffer: &mut R) -> Result<Box<[T]>> {
        let lump_type = T::lump_type();
        let lump = self.get_lump_header(lump_type).decode::<T, R>(buffer, self.base)?;

        log::debug!("Loaded {} {lump_type:?} records", lump.len());
        if lump.len() > T::max() {
            log::warn!(
                "{lump_type:?} lump holds {} records, the engine limit is {}",
                lump.len(),
                T::max()
            );
        }
        Ok(lump)
    }

    pub fn get_lump_bytes<R: Read + Seek>(&self, buffer: &mut R, lump: LumpType) -> Result<Box<[u8]>> {
        let bytes = self.get_lump_header(lump).read_bytes(buffer, self.base)?;
        log::debug!("Loaded {} bytes of {lump:?}", bytes.len());
        Ok(bytes)
    }
}
