pub mod consts;
pub mod edges;
pub mod entities;
pub mod face;
pub mod header;
pub mod lightmap;
pub mod lump;
pub mod map;
pub mod model;
pub mod plane;
pub mod textures;
pub mod vert;

pub use consts::LumpType;
pub use lump::Lump;

// http://www.gamers.org/dEngine/quake/spec/quake-spec34/qkspec_4.htm
//
// A version 29 BSP starts with a directory of 15 lumps. Most lumps are a flat array of one
// record type. The entities are a block of text, the light map is raw bytes and the mip
// textures carry their own small directory.
//
// When the map is inside a PAK, every lump offset is relative to the start of the map
// entry, not the archive.
//
// All numbers are little-endian. Vectors are stored with Z up and are turned into the
// renderer's convention on load.
