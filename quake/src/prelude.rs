pub use crate::bsp::{
    consts::LumpType,
    edges::{BSPEdge, BSPSurfEdge},
    entities::Entity,
    face::BSPFace,
    header::BSPHeader,
    lightmap::LightMap,
    map::BSPMap,
    model::BSPModel,
    plane::BSPPlane,
    textures::{BSPTexInfo, MipTex, MipTexDirectory, TextureAtlas},
    vert::fix_coords,
};
pub use crate::error::{AssetError, ErrorContext};
pub use crate::pak::{ByteRange, PAKArchive, PAKEntry};
pub use crate::palette::Palette;
