use std::io::{self, Read};

use glam::Vec3;

use crate::binaries::BinaryData;

use super::{
    consts::{LumpType, MAX_MAP_MODELS},
    Lump,
};

/// A brush model. Model 0 is the world itself, the rest are doors, lifts and other moving
/// brushes, referenced from entities as `*1`, `*2`...
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPModel {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub origin: Vec3,
    pub head_nodes: [i32; 4], // bsp node and three clip hulls
    pub num_leaves: i32,      // not counting the solid leaf 0
    pub first_face: i32,
    pub num_faces: i32,
}

impl BinaryData for BSPModel {
    const SIZE: usize = 64;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            mins: Vec3::read(buffer)?,
            maxs: Vec3::read(buffer)?,
            origin: Vec3::read(buffer)?,
            head_nodes: <[i32; 4]>::read(buffer)?,
            num_leaves: i32::read(buffer)?,
            first_face: i32::read(buffer)?,
            num_faces: i32::read(buffer)?,
        })
    }
}

impl Lump for BSPModel {
    fn max() -> usize {
        MAX_MAP_MODELS
    }

    fn lump_type() -> LumpType {
        LumpType::Models
    }
}
