//! Loading and saving track-design container files.
//!
//! Binary format (little endian):
//! - u8: ride type
//! - u32: track element count
//!   - repeat per element: u8 piece code, u8 rotation
//! - u32: entrance element count
//!   - repeat per element: i16 x, i16 y, i8 z, u8 direction, u8 is-exit flag
//!
//! The generator only ever reads a design to reuse its ride metadata; both
//! element lists are cleared and replaced with the generated sequence.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::pieces::{PieceId, TrackElement};

/// Station entrance or exit placement, kept verbatim from the template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntranceElement {
    pub x: i16,
    pub y: i16,
    pub z: i8,
    pub direction: u8,
    pub is_exit: bool,
}

/// A mutable track design: ride metadata plus the element lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackDesign {
    pub ride_type: u8,
    pub track_elements: Vec<TrackElement>,
    pub entrance_elements: Vec<EntranceElement>,
}

/// Saves a design to `path`.
pub fn save(design: &TrackDesign, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;

    file.write_all(&[design.ride_type])?;

    file.write_all(&(design.track_elements.len() as u32).to_le_bytes())?;
    for element in &design.track_elements {
        file.write_all(&[element.id.code(), element.rotation])?;
    }

    file.write_all(&(design.entrance_elements.len() as u32).to_le_bytes())?;
    for entrance in &design.entrance_elements {
        file.write_all(&entrance.x.to_le_bytes())?;
        file.write_all(&entrance.y.to_le_bytes())?;
        file.write_all(&[entrance.z as u8, entrance.direction, entrance.is_exit as u8])?;
    }

    Ok(())
}

/// Loads a design from `path`.
pub fn load(path: &Path) -> io::Result<TrackDesign> {
    let mut file = File::open(path)?;

    let mut byte = [0u8; 1];
    file.read_exact(&mut byte)?;
    let ride_type = byte[0];

    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer)?;
    let track_count = u32::from_le_bytes(u32_buffer) as usize;

    let mut track_elements = Vec::with_capacity(track_count);
    for _ in 0..track_count {
        let mut record = [0u8; 2];
        file.read_exact(&mut record)?;
        let id = PieceId::from_code(record[0]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown track element code {}", record[0]),
            )
        })?;
        track_elements.push(TrackElement {
            id,
            rotation: record[1],
        });
    }

    file.read_exact(&mut u32_buffer)?;
    let entrance_count = u32::from_le_bytes(u32_buffer) as usize;

    let mut entrance_elements = Vec::with_capacity(entrance_count);
    for _ in 0..entrance_count {
        let mut x_buffer = [0u8; 2];
        file.read_exact(&mut x_buffer)?;
        let mut y_buffer = [0u8; 2];
        file.read_exact(&mut y_buffer)?;
        let mut rest = [0u8; 3];
        file.read_exact(&mut rest)?;
        entrance_elements.push(EntranceElement {
            x: i16::from_le_bytes(x_buffer),
            y: i16::from_le_bytes(y_buffer),
            z: rest[0] as i8,
            direction: rest[1],
            is_exit: rest[2] != 0,
        });
    }

    Ok(TrackDesign {
        ride_type,
        track_elements,
        entrance_elements,
    })
}
