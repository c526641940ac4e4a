use std::ops::Deref;

/// Raw light map samples, one byte of intensity each. Faces point into it with
/// `BSPFace::light_ofs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LightMap {
    samples: Box<[u8]>,
}

impl LightMap {
    pub fn sample(&self, index: usize) -> Option<u8> {
        self.samples.get(index).copied()
    }
}

impl From<Box<[u8]>> for LightMap {
    fn from(samples: Box<[u8]>) -> Self {
        Self { samples }
    }
}

impl Deref for LightMap {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}
