use num_derive::FromPrimitive;

pub const BSP_VERSION: i32 = 29;
pub const HEADER_LUMPS: usize = 15;

// upper design bounds, as enforced by the engine
pub const MAX_MAP_MODELS: usize = 256;
pub const MAX_MAP_ENTSTRING: usize = 65536;
pub const MAX_MAP_PLANES: usize = 8192;
pub const MAX_MAP_VERTS: usize = 65535;
pub const MAX_MAP_FACES: usize = 65535;
pub const MAX_MAP_TEXINFO: usize = 4096;
pub const MAX_MAP_EDGES: usize = 256000;
pub const MAX_MAP_SURFEDGES: usize = 512000;
pub const MAX_MAP_MIPTEX: usize = 0x200000;
pub const MAX_MAP_LIGHTING: usize = 0x100000;

pub const MIP_LEVELS: usize = 4;
pub const TEXTURE_NAME_LENGTH: usize = 16;
// Longest class name an entity keeps; the rest of the value is dropped.
pub const CLASS_NAME_LENGTH: usize = 256;

#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
pub enum LumpType {
    Entities = 0,
    Planes = 1,
    MipTex = 2,
    Vertices = 3,
    Visibility = 4,
    Nodes = 5,
    TexInfo = 6,
    Faces = 7,
    Lighting = 8,
    ClipNodes = 9,
    Leaves = 10,
    FaceList = 11,
    Edges = 12,
    EdgeList = 13,
    Models = 14,
}
