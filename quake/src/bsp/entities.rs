use fixedstr::zstr;
use glam::{vec3, Vec3};

use crate::{
    binaries::bounded_str,
    error::{AssetError, Result},
};

use super::consts::CLASS_NAME_LENGTH;

// The entity lump is a flat run of blocks like
//
// {
// "classname" "info_player_start"
// "origin" "480 -352 88"
// "angle" "90"
// }
//
// Only the keys a renderer needs are kept; every other key is skipped.

#[derive(Copy, Clone, Debug)]
pub struct Entity {
    pub class_name: zstr<CLASS_NAME_LENGTH>,
    /// Already in renderer coordinates.
    pub origin: Vec3,
    pub angle: i32,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            class_name: zstr::make(""),
            origin: Vec3::ZERO,
            angle: 0,
        }
    }
}

/// What the next closed string means. Keys and values alternate, so every string is
/// first taken as the value of the previous key and then checked for being a key itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PendingKey {
    ClassName,
    Origin,
    Angle,
    Unknown,
}

impl PendingKey {
    fn classify(token: &[u8]) -> Self {
        match token {
            b"classname" => Self::ClassName,
            b"origin" => Self::Origin,
            b"angle" => Self::Angle,
            _ => Self::Unknown,
        }
    }

    fn apply(self, token: &[u8], entity: &mut Entity) {
        match self {
            Self::ClassName => entity.class_name = bounded_str(token),
            Self::Origin => entity.origin = parse_origin(token),
            Self::Angle => entity.angle = parse_int_lenient(token),
            Self::Unknown => {}
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScanState {
    OutsideEntity,
    InsideEntity,
    InsideQuotedString,
}

/// Decode an entity lump. The buffer length is the lump size; there is no terminator.
///
/// Entities come out in file order. A block is only kept once its closing brace is seen,
/// so an unterminated last block is dropped. Bad numbers read as zero.
pub fn parse_entities(buffer: &[u8]) -> Vec<Entity> {
    let mut entities = Vec::new();

    let mut state = ScanState::OutsideEntity;
    // not reset between blocks
    let mut key = PendingKey::Unknown;
    let mut entity = Entity::default();
    let mut token = Vec::new();

    for &c in buffer {
        state = match (state, c) {
            (ScanState::OutsideEntity, b'{') => {
                entity = Entity::default();
                ScanState::InsideEntity
            }
            (ScanState::InsideEntity, b'"') => {
                token.clear();
                ScanState::InsideQuotedString
            }
            (ScanState::InsideEntity, b'}') => {
                entities.push(entity);
                ScanState::OutsideEntity
            }
            (ScanState::InsideQuotedString, b'"') => {
                key.apply(&token, &mut entity);
                key = PendingKey::classify(&token);
                ScanState::InsideEntity
            }
            (ScanState::InsideQuotedString, c) => {
                token.push(c);
                ScanState::InsideQuotedString
            }
            (state, _) => state,
        };
    }

    if state != ScanState::OutsideEntity {
        log::debug!("Entity lump ends inside an unterminated block");
    }

    entities
}

/// First entity whose class name is exactly `name`.
pub fn find_entity_by_name<'a>(entities: &'a [Entity], name: &str) -> Result<&'a Entity> {
    entities
        .iter()
        .find(|entity| entity.class_name.as_str() == name)
        .ok_or_else(|| AssetError::NotFound(format!("could not find entity {name}")))
}

/// `"X Y Z"` in file order, stored as `(X, -Z, -Y)`.
fn parse_origin(token: &[u8]) -> Vec3 {
    let mut parts = token.split(|&b| b == b' ').map(parse_int_lenient);
    let x = parts.next().unwrap_or(0);
    let y = parts.next().unwrap_or(0);
    let z = parts.next().unwrap_or(0);
    vec3(x as f32, -(z as f32), -(y as f32))
}

fn parse_int_lenient(token: &[u8]) -> i32 {
    match parse_int(token) {
        Some(value) => value,
        None => {
            log::debug!(
                "Reading malformed entity number {:?} as 0",
                String::from_utf8_lossy(token)
            );
            0
        }
    }
}

/// C `atoi`: leading whitespace, an optional sign, then as many digits as there are.
/// `None` if there are no digits at all. Out of range values saturate.
fn parse_int(token: &[u8]) -> Option<i32> {
    let mut rest = token;
    while let [b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c', tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].iter().fold(0i64, |acc, &d| {
        (acc * 10 + (d - b'0') as i64).min(i32::MAX as i64 + 1)
    });
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}
