use std::io::{self, Read, Seek};

use fixedstr::zstr;
use glam::Vec3;

use crate::{
    binaries::{read_array, read_name, seek_to, BinaryData},
    error::{AssetError, Result},
    palette::Palette,
};

use super::{
    consts::{LumpType, MAX_MAP_MIPTEX, MAX_MAP_TEXINFO, MIP_LEVELS, TEXTURE_NAME_LENGTH},
    vert::fix_coords,
    Lump,
};

// Texinfo
//
// The two vectors s and t map the left-to-right and down-to-up directions of the texture
// onto the world. The texel coordinates of a point on a face are
//
// u = s . p + s_offset
// v = t . p + t_offset
//
// Both vectors are stored in file coordinates and moved into renderer coordinates as soon
// as the lump is loaded, see [BSPTexInfo::fix_coords].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPTexInfo {
    pub s: Vec3,
    pub s_offset: f32,
    pub t: Vec3,
    pub t_offset: f32,
    pub miptex: u32, // index into the mip texture directory
    pub flags: u32,  // 1 for sky and liquids, which are not light mapped
}

impl BinaryData for BSPTexInfo {
    const SIZE: usize = 40;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            s: Vec3::read(buffer)?,
            s_offset: f32::read(buffer)?,
            t: Vec3::read(buffer)?,
            t_offset: f32::read(buffer)?,
            miptex: u32::read(buffer)?,
            flags: u32::read(buffer)?,
        })
    }
}

impl Lump for BSPTexInfo {
    fn max() -> usize {
        MAX_MAP_TEXINFO
    }
    fn lump_type() -> LumpType {
        LumpType::TexInfo
    }
}

impl BSPTexInfo {
    pub const SPECIAL: u32 = 1;

    pub fn is_special(&self) -> bool {
        self.flags & Self::SPECIAL != 0
    }

    pub fn fix_coords(&mut self) {
        self.s = fix_coords(self.s);
        self.t = fix_coords(self.t);
    }
}

/// Whatever turns the mip texture region of a map into something a renderer can use.
///
/// Built once per map, right after the header, from the absolute `offset` and the `size`
/// of the mip texture lump. A map without textures has a lump of size 0.
pub trait TextureAtlas
where
    Self: Sized,
{
    fn build<R: Read + Seek>(
        buffer: &mut R,
        offset: u64,
        size: usize,
        palette: &Palette,
    ) -> Result<Self>;
}

/// For callers that do not care about textures.
impl TextureAtlas for () {
    fn build<R: Read + Seek>(
        _buffer: &mut R,
        _offset: u64,
        _size: usize,
        _palette: &Palette,
    ) -> Result<Self> {
        Ok(())
    }
}

/// Header of one mip texture. The pixels (palette indices) follow at the four offsets,
/// which are relative to the start of this header.
#[derive(Copy, Clone, Debug)]
pub struct MipTex {
    pub name: zstr<TEXTURE_NAME_LENGTH>,
    pub width: u32,
    pub height: u32,
    pub offsets: [u32; MIP_LEVELS],
}

impl BinaryData for MipTex {
    const SIZE: usize = TEXTURE_NAME_LENGTH + 8 + 4 * MIP_LEVELS;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            name: read_name(buffer)?,
            width: u32::read(buffer)?,
            height: u32::read(buffer)?,
            offsets: <[u32; MIP_LEVELS]>::read(buffer)?,
        })
    }
}

/// The texture directory of a map: names and sizes, no pixel data.
#[derive(Debug, Default)]
pub struct MipTexDirectory {
    pub palette: Palette,
    textures: Vec<Option<MipTex>>,
}

impl MipTexDirectory {
    /// Slot `i` is the texture referenced by `BSPTexInfo::miptex == i`. Slots can be empty
    /// when the compiler could not find a texture.
    pub fn textures(&self) -> &[Option<MipTex>] {
        &self.textures
    }

    pub fn get(&self, miptex: u32) -> Option<&MipTex> {
        self.textures.get(miptex as usize)?.as_ref()
    }
}

impl TextureAtlas for MipTexDirectory {
    fn build<R: Read + Seek>(
        buffer: &mut R,
        offset: u64,
        size: usize,
        palette: &Palette,
    ) -> Result<Self> {
        if size == 0 {
            log::debug!("Map has no mip textures");
            return Ok(Self {
                palette: palette.clone(),
                textures: Vec::new(),
            });
        }
        if size < i32::SIZE {
            return Err(AssetError::Format(format!(
                "mip texture lump is {size} bytes, too small for its count"
            )));
        }
        if size > MAX_MAP_MIPTEX {
            log::warn!("Mip texture lump is {size} bytes, the engine limit is {MAX_MAP_MIPTEX}");
        }

        seek_to(buffer, offset)?;
        let claimed = i32::read(buffer)?.max(0) as usize;
        // the offsets have to fit in the lump after the count
        let room = (size - i32::SIZE) / i32::SIZE;
        let count = if claimed > room {
            log::warn!("Mip texture directory claims {claimed} textures, the lump holds {room}");
            room
        } else {
            claimed
        };
        let offsets = read_array::<i32, _>(buffer, count)?;

        let mut textures = Vec::with_capacity(offsets.len());
        for &tex_offset in offsets.iter() {
            if tex_offset < 0 {
                textures.push(None);
                continue;
            }
            seek_to(buffer, offset + tex_offset as u64)?;
            textures.push(Some(MipTex::read(buffer)?));
        }

        log::debug!("Read {} mip texture headers", textures.len());
        Ok(Self {
            palette: palette.clone(),
            textures,
        })
    }
}

#[cfg(test)]
mod textures_tests {
    use std::io::Cursor;

    use bytemuck::Zeroable;

    use crate::{
        palette::Palette,
        test_data::{name_field, put_i32s, put_u32s},
    };

    use super::*;

    fn directory(lump: Vec<u8>) -> Result<MipTexDirectory> {
        let size = lump.len();
        // something after the lump, so a bad count would read garbage instead of EOF
        let mut bytes = lump;
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        MipTexDirectory::build(&mut Cursor::new(bytes), 0, size, &Palette::default())
    }

    #[test]
    fn empty_lump_is_no_textures() {
        let atlas = directory(Vec::new()).unwrap();
        assert!(atlas.textures().is_empty());
        assert!(atlas.get(0).is_none());
    }

    #[test]
    fn lookup_by_tex_info_index() {
        let mut lump = Vec::new();
        put_i32s(&mut lump, &[2, -1, 12]);
        lump.extend(name_field("*water0", 16));
        put_u32s(&mut lump, &[64, 32, 40, 2088, 2600, 2728]);

        let atlas = directory(lump).unwrap();
        assert!(atlas.get(0).is_none());
        let water = atlas.get(1).unwrap();
        assert_eq!(water.name.as_str(), "*water0");
        assert_eq!((water.width, water.height), (64, 32));
        assert_eq!(water.offsets[3], 2728);
        assert!(atlas.get(2).is_none());
    }

    #[test]
    fn count_is_bounded_by_the_lump() {
        let mut lump = Vec::new();
        put_i32s(&mut lump, &[1000, -1]);
        let atlas = directory(lump).unwrap();
        assert_eq!(atlas.textures().len(), 1);
    }

    #[test]
    fn lump_too_small_for_count() {
        assert!(directory(vec![0, 0]).unwrap_err().is_format());
    }

    #[test]
    fn special_surfaces() {
        let mut tex_info = BSPTexInfo::zeroed();
        assert!(!tex_info.is_special());
        tex_info.flags = BSPTexInfo::SPECIAL;
        assert!(tex_info.is_special());
    }
}
