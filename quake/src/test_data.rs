//! In-memory PAK and BSP files for tests.

use crate::bsp::consts::{LumpType, BSP_VERSION, HEADER_LUMPS};

pub fn put_i32s(out: &mut Vec<u8>, values: &[i32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

pub fn put_u32s(out: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

pub fn put_u16s(out: &mut Vec<u8>, values: &[u16]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

pub fn put_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

pub fn name_field(name: &str, width: usize) -> Vec<u8> {
    let mut field = name.as_bytes().to_vec();
    field.resize(width, 0);
    field
}

pub struct BSPBuilder {
    pub version: i32,
    pub lumps: [Vec<u8>; HEADER_LUMPS],
}

impl BSPBuilder {
    pub fn new() -> Self {
        Self {
            version: BSP_VERSION,
            lumps: Default::default(),
        }
    }

    pub fn lump(mut self, lump: LumpType, data: Vec<u8>) -> Self {
        self.lumps[lump as usize] = data;
        self
    }

    /// Header first, then every lump back to back in directory order.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_i32s(&mut out, &[self.version]);

        let mut offset = 4 + HEADER_LUMPS as u32 * 8;
        for lump in &self.lumps {
            put_u32s(&mut out, &[offset, lump.len() as u32]);
            offset += lump.len() as u32;
        }
        for lump in &self.lumps {
            out.extend_from_slice(lump);
        }
        out
    }

    /// A small but complete map: one triangle, one texture, two entities.
    pub fn sample() -> Self {
        let entities = br#"{
"classname" "worldspawn"
"wad" "gfx/base.wad"
}
{
"classname" "info_player_start"
"origin" "10 20 30"
"angle" "90"
}
"#
        .to_vec();

        let mut planes = Vec::new();
        put_f32s(&mut planes, &[0.0, 0.0, 1.0, 64.0]);
        put_i32s(&mut planes, &[2]);

        let mut miptex = Vec::new();
        put_i32s(&mut miptex, &[2, 12, -1]);
        miptex.extend(name_field("wall", 16));
        put_u32s(&mut miptex, &[16, 16, 40, 296, 360, 376]);

        let mut vertices = Vec::new();
        put_f32s(&mut vertices, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);

        let mut tex_info = Vec::new();
        put_f32s(&mut tex_info, &[1.0, 0.0, 0.0, 8.0, 0.0, 1.0, 0.0, -8.0]);
        put_u32s(&mut tex_info, &[0, 0]);

        let mut faces = Vec::new();
        put_u16s(&mut faces, &[0, 0]);
        put_i32s(&mut faces, &[0]);
        put_u16s(&mut faces, &[3, 0]);
        faces.extend_from_slice(&[0, 0, 255, 255]);
        put_i32s(&mut faces, &[0]);

        let lighting = vec![10, 20, 30, 40];

        let mut edges = Vec::new();
        put_u16s(&mut edges, &[0, 0, 0, 1, 1, 2, 0, 2]);

        let mut edge_list = Vec::new();
        put_i32s(&mut edge_list, &[1, 2, -3]);

        let mut models = Vec::new();
        put_f32s(&mut models, &[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        put_i32s(&mut models, &[0, -1, -1, -1, 1, 0, 1]);

        Self::new()
            .lump(LumpType::Entities, entities)
            .lump(LumpType::Planes, planes)
            .lump(LumpType::MipTex, miptex)
            .lump(LumpType::Vertices, vertices)
            .lump(LumpType::TexInfo, tex_info)
            .lump(LumpType::Faces, faces)
            .lump(LumpType::Lighting, lighting)
            .lump(LumpType::Edges, edges)
            .lump(LumpType::EdgeList, edge_list)
            .lump(LumpType::Models, models)
    }
}

#[derive(Default)]
pub struct PAKBuilder {
    pub entries: Vec<(String, Vec<u8>)>,
}

impl PAKBuilder {
    pub fn entry(mut self, name: &str, data: Vec<u8>) -> Self {
        self.entries.push((name.to_owned(), data));
        self
    }

    /// Header, file contents, then the directory at the end like the id tools write it.
    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        let mut directory = Vec::new();
        for (name, data) in &self.entries {
            directory.extend(name_field(name, 56));
            put_u32s(&mut directory, &[12 + body.len() as u32, data.len() as u32]);
            body.extend_from_slice(data);
        }

        let mut out = b"PACK".to_vec();
        put_u32s(&mut out, &[12 + body.len() as u32, directory.len() as u32]);
        out.extend(body);
        out.extend(directory);
        out
    }
}
