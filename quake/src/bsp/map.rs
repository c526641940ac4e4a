use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use glam::Vec3;

use crate::{
    error::{ErrorContext, Result},
    palette::Palette,
};

use super::{
    consts::{LumpType, MAX_MAP_ENTSTRING, MAX_MAP_LIGHTING},
    edges::{BSPEdge, BSPSurfEdge},
    entities::{find_entity_by_name, parse_entities, Entity},
    face::BSPFace,
    header::BSPHeader,
    lightmap::LightMap,
    model::BSPModel,
    plane::BSPPlane,
    textures::{BSPTexInfo, MipTexDirectory, TextureAtlas},
    vert::fix_coords,
};

/// Everything a renderer needs from one level, copied out of the file.
///
/// Vertices, texture vectors and entity origins are in renderer coordinates. Nothing
/// refers back to the file, which can be closed as soon as [BSPMap::load] returns.
#[derive(Debug)]
pub struct BSPMap<A = MipTexDirectory> {
    header: BSPHeader,
    atlas: A,
    models: Box<[BSPModel]>,
    entities: Vec<Entity>,
    vertices: Box<[Vec3]>,
    edge_list: Box<[BSPSurfEdge]>,
    edges: Box<[BSPEdge]>,
    faces: Box<[BSPFace]>,
    light_map: LightMap,
    planes: Box<[BSPPlane]>,
    tex_infos: Box<[BSPTexInfo]>,
}

impl<A: TextureAtlas> BSPMap<A> {
    /// Load a loose `.bsp` file.
    pub fn open(path: &Path, palette: &Palette) -> Result<Self> {
        let load = || -> Result<Self> {
            let mut buffer = BufReader::new(File::open(path)?);
            Self::load(&mut buffer, 0, palette)
        };
        load().in_file(path)
    }

    /// Load the BSP data starting `base` bytes into `buffer`. `base` is non-zero when the
    /// map sits inside a PAK archive.
    ///
    /// The steps run in a fixed order and the first failure aborts the load; the error
    /// says which step it came from.
    pub fn load<R: Read + Seek>(buffer: &mut R, base: u64, palette: &Palette) -> Result<Self> {
        let header = BSPHeader::read_at(buffer, base).stage("header")?;

        let miptex = header.get_lump_header(LumpType::MipTex);
        let atlas = A::build(buffer, miptex.file_offset(base), miptex.size as usize, palette)
            .stage("textures")?;

        let models = header.get_lump::<BSPModel, _>(buffer).stage("models")?;
        let entities = load_entities(&header, buffer).stage("entities")?;

        let mut vertices = header.get_lump::<Vec3, _>(buffer).stage("vertices")?;
        for v in vertices.iter_mut() {
            *v = fix_coords(*v);
        }

        let edge_list = header.get_lump::<BSPSurfEdge, _>(buffer).stage("edge list")?;
        let edges = header.get_lump::<BSPEdge, _>(buffer).stage("edges")?;
        let faces = header.get_lump::<BSPFace, _>(buffer).stage("faces")?;
        let light_map = load_light_map(&header, buffer).stage("light map")?;
        let planes = header.get_lump::<BSPPlane, _>(buffer).stage("planes")?;

        let mut tex_infos = header.get_lump::<BSPTexInfo, _>(buffer).stage("texture info")?;
        for tex_info in tex_infos.iter_mut() {
            tex_info.fix_coords();
        }

        log::info!(
            "Loaded map: {} models, {} entities, {} faces, {} vertices",
            models.len(),
            entities.len(),
            faces.len(),
            vertices.len()
        );

        Ok(Self {
            header,
            atlas,
            models,
            entities,
            vertices,
            edge_list,
            edges,
            faces,
            light_map,
            planes,
            tex_infos,
        })
    }
}

fn load_entities<R: Read + Seek>(header: &BSPHeader, buffer: &mut R) -> Result<Vec<Entity>> {
    let text = header.get_lump_bytes(buffer, LumpType::Entities)?;
    if text.len() > MAX_MAP_ENTSTRING {
        log::warn!("Entity lump is {} bytes, the engine limit is {MAX_MAP_ENTSTRING}", text.len());
    }
    Ok(parse_entities(&text))
}

fn load_light_map<R: Read + Seek>(header: &BSPHeader, buffer: &mut R) -> Result<LightMap> {
    let samples = header.get_lump_bytes(buffer, LumpType::Lighting)?;
    if samples.len() > MAX_MAP_LIGHTING {
        log::warn!("Light map is {} bytes, the engine limit is {MAX_MAP_LIGHTING}", samples.len());
    }
    Ok(samples.into())
}

impl<A> BSPMap<A> {
    pub fn header(&self) -> &BSPHeader {
        &self.header
    }

    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    pub fn models(&self) -> &[BSPModel] {
        &self.models
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edge_list(&self) -> &[BSPSurfEdge] {
        &self.edge_list
    }

    pub fn edges(&self) -> &[BSPEdge] {
        &self.edges
    }

    pub fn faces(&self) -> &[BSPFace] {
        &self.faces
    }

    pub fn light_map(&self) -> &LightMap {
        &self.light_map
    }

    pub fn planes(&self) -> &[BSPPlane] {
        &self.planes
    }

    pub fn tex_infos(&self) -> &[BSPTexInfo] {
        &self.tex_infos
    }

    pub fn find_entity_by_name(&self, name: &str) -> Result<&Entity> {
        find_entity_by_name(&self.entities, name)
    }

    /// Vertex indices of a face, see [BSPFace::vertex_indices].
    pub fn face_vertices(&self, face: &BSPFace) -> Option<Vec<u16>> {
        face.vertex_indices(&self.edges, &self.edge_list)
    }
}
