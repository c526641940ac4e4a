use std::io::{self, Read};

use crate::binaries::BinaryData;

use super::{
    consts::{LumpType, MAX_MAP_FACES},
    edges::{BSPEdge, BSPSurfEdge},
    Lump,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPFace {
    /// the plane number
    pub plane: u16,
    /// non-zero if the face points the other way from its plane
    pub side: u16,
    /// First entry in the edge list; this and the following `num_edges` entries walk the
    /// outline of the face.
    pub first_edge: i32,
    /// number of edge list entries
    pub num_edges: u16,
    pub tex_info: u16,
    /// 0xFF means no light map, 0 the normal one, 1 fast pulse, 2 slow pulse...
    pub light_type: u8,
    /// 0xFF is dark, 0 bright
    pub base_light: u8,
    pub light: [u8; 2], // extra light styles
    /// offset into lightmap lump, -1 for none
    pub light_ofs: i32,
}

impl BinaryData for BSPFace {
    const SIZE: usize = 20;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            plane: u16::read(buffer)?,
            side: u16::read(buffer)?,
            first_edge: i32::read(buffer)?,
            num_edges: u16::read(buffer)?,
            tex_info: u16::read(buffer)?,
            light_type: u8::read(buffer)?,
            base_light: u8::read(buffer)?,
            light: <[u8; 2]>::read(buffer)?,
            light_ofs: i32::read(buffer)?,
        })
    }
}

impl BSPFace {
    /// The vertex ring of the face, following reversed edges the right way round.
    /// `None` if the face points outside the edge list or edge array.
    pub fn vertex_indices(&self, edges: &[BSPEdge], edge_list: &[BSPSurfEdge]) -> Option<Vec<u16>> {
        let first = usize::try_from(self.first_edge).ok()?;
        let ring = edge_list.get(first..first + self.num_edges as usize)?;
        ring.iter()
            .map(|surf_edge| surf_edge.get_edge(edges).map(|(start, _)| start))
            .collect()
    }
}

impl Lump for BSPFace {
    fn max() -> usize {
        MAX_MAP_FACES
    }
    fn lump_type() -> LumpType {
        LumpType::Faces
    }
}
