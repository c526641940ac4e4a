use glam::{vec3, Vec3};

use super::{
    consts::{LumpType, MAX_MAP_VERTS},
    Lump,
};

impl Lump for Vec3 {
    fn max() -> usize {
        MAX_MAP_VERTS
    }

    fn lump_type() -> LumpType {
        LumpType::Vertices
    }
}

/// Move a vector from BSP coordinates (Z up) into renderer coordinates (Y up, Y pointing
/// down the screen): `(x, y, z) -> (x, -z, -y)`.
///
/// The mapping is its own inverse.
///
/// http://www.gamers.org/dEngine/quake/spec/quake-spec34/qkspec_2.htm#2.1.1
pub fn fix_coords(v: Vec3) -> Vec3 {
    vec3(v.x, -v.z, -v.y)
}
