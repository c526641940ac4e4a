use std::io::{self, Read};

use glam::Vec3;

use crate::binaries::BinaryData;

use super::{
    consts::{LumpType, MAX_MAP_PLANES},
    Lump,
};

///Plane
///
/// The plane is represented by the element normal, a unit vector perpendicular to the
/// plane's surface, and dist, the distance from the map origin to the nearest point on
/// the plane: `Ax + By + Cz = D`.
///
/// The axis member tells which axis the plane is facing. 0, 1 and 2 are planes along X, Y
/// and Z; 3, 4 and 5 are non-axial planes closest to X, Y and Z.
///
/// Planes are kept in file coordinates, they feed the BSP tree and not the renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPPlane {
    pub normal: Vec3, // normal vector
    pub dist: f32,    // distance from origin
    pub axis: i32,    // plane axis identifier
}

impl BinaryData for BSPPlane {
    const SIZE: usize = 20;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            normal: Vec3::read(buffer)?,
            dist: f32::read(buffer)?,
            axis: i32::read(buffer)?,
        })
    }
}

impl Lump for BSPPlane {
    fn max() -> usize {
        MAX_MAP_PLANES
    }

    fn lump_type() -> LumpType {
        LumpType::Planes
    }
}
