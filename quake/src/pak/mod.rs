// Quake packfile.
//
// http://www.gamers.org/dEngine/quake/spec/quake-spec34/qkspec_3.htm
//
// A PAK is a 12 byte header, the packed files, and a directory of fixed 64 byte entries
// (usually at the end). There is no compression and no hashing, lookups are a linear scan.

use std::{
    fs::File,
    io::{self, BufReader, Read, Seek},
    path::Path,
};

use fixedstr::zstr;

use crate::{
    binaries::{bounded_str, read_array, read_bytes, seek_to, BinaryData},
    bsp::{map::BSPMap, textures::TextureAtlas},
    error::{AssetError, ErrorContext, Result},
    palette::{Palette, PALETTE_PATH},
};

pub const PAK_MAGIC: &[u8; 4] = b"PACK";
pub const PAK_NAME_LENGTH: usize = 56;

#[derive(Copy, Clone, Debug)]
struct PAKHeader {
    magic: [u8; 4],
    dir_offset: u32, // position of the directory in the file
    dir_size: u32,   // size of the directory in bytes
}

impl BinaryData for PAKHeader {
    const SIZE: usize = 12;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            magic: <[u8; 4]>::read(buffer)?,
            dir_offset: u32::read(buffer)?,
            dir_size: u32::read(buffer)?,
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct PAKEntry {
    // the field need not hold a NUL, so one extra byte for the terminator
    pub name: zstr<{ PAK_NAME_LENGTH + 1 }>,
    pub offset: u32,
    pub size: u32,
}

impl BinaryData for PAKEntry {
    const SIZE: usize = 64;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            name: bounded_str(&<[u8; PAK_NAME_LENGTH]>::read(buffer)?),
            offset: u32::read(buffer)?,
            size: u32::read(buffer)?,
        })
    }
}

/// Where an entry lives in the archive file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: u32,
    pub size: u32,
}

impl From<&PAKEntry> for ByteRange {
    fn from(entry: &PAKEntry) -> Self {
        Self {
            offset: entry.offset,
            size: entry.size,
        }
    }
}

/// An open packfile. Keeps the reader for as long as it lives; entries are read on demand.
#[derive(Debug)]
pub struct PAKArchive<R = BufReader<File>> {
    buffer: R,
    entries: Vec<PAKEntry>,
}

impl PAKArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let open = || -> Result<Self> {
            let file = File::open(path)?;
            Self::from_reader(BufReader::new(file))
        };
        open().in_file(path)
    }
}

impl<R: Read + Seek> PAKArchive<R> {
    pub fn from_reader(mut buffer: R) -> Result<Self> {
        seek_to(&mut buffer, 0)?;
        let header = PAKHeader::read(&mut buffer)?;
        if &header.magic != PAK_MAGIC {
            return Err(AssetError::Format("not an archive".to_owned()));
        }

        let dir_size = header.dir_size as usize;
        if dir_size % PAKEntry::SIZE != 0 {
            log::warn!(
                "PAK directory is {dir_size} bytes, not a whole number of entries; ignoring the remainder"
            );
        }
        let count = dir_size / PAKEntry::SIZE;

        seek_to(&mut buffer, header.dir_offset as u64)?;
        let entries = read_array::<PAKEntry, _>(&mut buffer, count)
            .map_err(|err| match err {
                AssetError::Truncated(_) => AssetError::Truncated(format!(
                    "unexpected EOF while reading {count} PAK entries"
                )),
                err => err,
            })?
            .into_vec();

        log::info!("PAK contains {} entries", entries.len());
        Ok(Self { buffer, entries })
    }

    pub fn entries(&self) -> &[PAKEntry] {
        &self.entries
    }

    /// First entry called exactly `path`.
    pub fn entry(&self, path: &str) -> Result<ByteRange> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_str() == path)
            .map(ByteRange::from)
            .ok_or_else(|| AssetError::NotFound(format!("could not find {path}")))
    }

    /// Locate the map `name`, stored as `maps/<name>.bsp`.
    pub fn find(&self, name: &str) -> Result<ByteRange> {
        let path = format!("maps/{name}.bsp");
        self.entry(&path)
            .map_err(|_| AssetError::NotFound(format!("could not find map {path}")))
    }

    /// Copy an entry out of the archive.
    pub fn read_entry(&mut self, path: &str) -> Result<Box<[u8]>> {
        let range = self.entry(path)?;
        seek_to(&mut self.buffer, range.offset as u64)?;
        read_bytes(&mut self.buffer, range.size as usize)
    }

    pub fn load_palette(&mut self) -> Result<Palette> {
        let data = self.read_entry(PALETTE_PATH)?;
        Palette::from_bytes(&data)
    }

    /// Load the map `name` straight out of the archive.
    pub fn load_map<A: TextureAtlas>(&mut self, name: &str, palette: &Palette) -> Result<BSPMap<A>> {
        let range = self.find(name)?;
        log::info!("Loading map {name} ({} bytes at {})", range.size, range.offset);
        BSPMap::load(&mut self.buffer, range.offset as u64, palette)
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.buffer
    }

    pub fn into_inner(self) -> R {
        self.buffer
    }
}
