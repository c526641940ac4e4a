use std::io::{self, Read};

use crate::binaries::BinaryData;

use super::{
    consts::{LumpType, MAX_MAP_EDGES, MAX_MAP_SURFEDGES},
    Lump,
};

///Edge
///
///Each edge is simply a pair of vertex indices (which index into the vertex lump array). The
/// edge is defined as the straight line between the two vertices. Usually, the edge array
/// is referenced through the edge list (see below).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPEdge {
    pub v: [u16; 2], // vertex indices
}

impl BinaryData for BSPEdge {
    const SIZE: usize = 4;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self {
            v: <[u16; 2]>::read(buffer)?,
        })
    }
}

impl Lump for BSPEdge {
    fn max() -> usize {
        MAX_MAP_EDGES
    }
    fn lump_type() -> LumpType {
        LumpType::Edges
    }
}

///Edge list
///
///The absolute value of an entry is an index into the edge array: if positive, the edge is
/// walked from the first to the second vertex; if negative, from the second to the first.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPSurfEdge(pub i32);

impl BinaryData for BSPSurfEdge {
    const SIZE: usize = 4;
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        Ok(Self(i32::read(buffer)?))
    }
}

impl Lump for BSPSurfEdge {
    fn max() -> usize {
        MAX_MAP_SURFEDGES
    }
    fn lump_type() -> LumpType {
        LumpType::EdgeList
    }
}

impl BSPSurfEdge {
    pub fn is_reversed(&self) -> bool {
        self.0 < 0
    }

    /// Vertex indices of the referenced edge, in walking order.
    pub fn get_edge(&self, edges: &[BSPEdge]) -> Option<(u16, u16)> {
        let edge = edges.get(self.0.unsigned_abs() as usize)?;
        Some(if self.is_reversed() {
            (edge.v[1], edge.v[0])
        } else {
            (edge.v[0], edge.v[1])
        })
    }
}

#[cfg(test)]
mod edges_tests {
    use super::{BSPEdge, BSPSurfEdge};

    #[test]
    fn reversed_edges_swap_vertices() {
        let edges = [BSPEdge { v: [0, 0] }, BSPEdge { v: [3, 7] }];

        assert_eq!(BSPSurfEdge(1).get_edge(&edges), Some((3, 7)));
        assert_eq!(BSPSurfEdge(-1).get_edge(&edges), Some((7, 3)));
        assert_eq!(BSPSurfEdge(-5).get_edge(&edges), None);
    }
}
