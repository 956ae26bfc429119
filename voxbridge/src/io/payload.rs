//! Payload decoders, one per tag with a structured layout.
//!
//! Each decoder sees only the payload slice of its chunk. A payload shorter than
//! its layout is reported as [`VoxError::MalformedChunk`]; trailing bytes past
//! the layout are ignored.

use log::debug;

use crate::core::{GridSize, Material, PALETTE_LEN, Palette, Rgba, Voxel};
use crate::error::{VoxError, VoxResult};
use crate::io::consts::{MATL_PREFIX_LEN, RGBA_CONTENT_LEN, SIZE_CONTENT_LEN};
use crate::io::{ByteCursor, ChunkTag};

/// The typed result of decoding one chunk's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Size(GridSize),
    Voxels(Vec<Voxel>),
    Palette(Box<Palette>),
    Material(Material),
    /// Tag recognized by name only; payload left opaque.
    Marker(ChunkTag),
    /// Unrecognized tag; payload skipped.
    Skipped(ChunkTag),
}

/// Maps a payload-level end-of-data into a malformed chunk of `tag`.
fn truncated(tag: ChunkTag, err: VoxError) -> VoxError {
    match err {
        VoxError::UnexpectedEndOfData {
            offset,
            needed,
            available,
        } => VoxError::malformed(
            tag,
            format!(
                "payload truncated at byte {offset}: needed {needed} more, {available} left"
            ),
        ),
        other => other,
    }
}

pub fn decode_size(payload: &[u8]) -> VoxResult<GridSize> {
    if payload.len() < SIZE_CONTENT_LEN {
        return Err(VoxError::malformed(
            ChunkTag::Size,
            format!(
                "expected {SIZE_CONTENT_LEN} bytes, payload is {}",
                payload.len()
            ),
        ));
    }

    let mut cursor = ByteCursor::new(payload);
    let x = cursor.read_u32()?;
    let y = cursor.read_u32()?;
    let z = cursor.read_u32()?;

    Ok(GridSize::new(x, y, z))
}

pub fn decode_voxels(payload: &[u8]) -> VoxResult<Vec<Voxel>> {
    let mut cursor = ByteCursor::new(payload);
    let count = cursor
        .read_len()
        .map_err(|err| truncated(ChunkTag::Xyzi, err))?;

    let needed = count
        .checked_mul(Voxel::ENCODED_SIZE)
        .filter(|needed| *needed <= cursor.remaining())
        .ok_or_else(|| {
            VoxError::malformed(
                ChunkTag::Xyzi,
                format!(
                    "{count} voxels declared, payload holds {}",
                    cursor.remaining() / Voxel::ENCODED_SIZE
                ),
            )
        })?;

    let data = cursor.read_bytes(needed)?;
    let voxels: Vec<Voxel> = data
        .chunks_exact(Voxel::ENCODED_SIZE)
        .map(|bytes| Voxel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
        .collect();

    debug!("XYZI: {} voxels", voxels.len());

    Ok(voxels)
}

pub fn decode_palette(payload: &[u8]) -> VoxResult<Palette> {
    if payload.len() < RGBA_CONTENT_LEN {
        return Err(VoxError::malformed(
            ChunkTag::Rgba,
            format!(
                "expected {RGBA_CONTENT_LEN} bytes, payload is {}",
                payload.len()
            ),
        ));
    }

    let mut cursor = ByteCursor::new(payload);
    let mut entries = [Rgba::TRANSPARENT; PALETTE_LEN];
    for entry in entries.iter_mut() {
        *entry = Rgba::from_packed(cursor.read_u32()?);
    }

    Ok(Palette::new(entries))
}

pub fn decode_material(payload: &[u8]) -> VoxResult<Material> {
    if payload.len() < MATL_PREFIX_LEN {
        return Err(VoxError::malformed(
            ChunkTag::Matl,
            format!(
                "expected at least {MATL_PREFIX_LEN} bytes, payload is {}",
                payload.len()
            ),
        ));
    }

    let mut cursor = ByteCursor::new(payload);
    let id = cursor.read_i32()?;
    let _reserved = cursor.read_u32()?;

    let mut material = Material::new(id);

    while !cursor.is_exhausted() {
        let (key, value) =
            read_property(&mut cursor).map_err(|err| truncated(ChunkTag::Matl, err))?;
        material.insert(key, value);
    }

    debug!(
        "MATL: id {} with {} properties",
        material.id,
        material.properties.len()
    );

    Ok(material)
}

fn read_property(cursor: &mut ByteCursor<'_>) -> VoxResult<(String, String)> {
    let key_len = cursor.read_len()?;
    let key = cursor.read_string(key_len)?;
    let value_len = cursor.read_len()?;
    let value = cursor.read_string(value_len)?;

    Ok((key, value))
}

/// Decodes `payload` according to `tag`.
pub fn decode_payload(tag: ChunkTag, payload: &[u8]) -> VoxResult<Record> {
    let record = match tag {
        ChunkTag::Size => Record::Size(decode_size(payload)?),
        ChunkTag::Xyzi => Record::Voxels(decode_voxels(payload)?),
        ChunkTag::Rgba => Record::Palette(Box::new(decode_palette(payload)?)),
        ChunkTag::Matl => Record::Material(decode_material(payload)?),
        ChunkTag::Unknown(_) => {
            debug!("Skipping unknown chunk {tag} ({} bytes)", payload.len());
            Record::Skipped(tag)
        }
        _ => {
            debug!("{tag} ({} bytes)", payload.len());
            Record::Marker(tag)
        }
    };

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material_payload(id: i32, pairs: &[(&str, &str)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        for (key, value) in pairs {
            data.extend_from_slice(&(key.len() as u32).to_le_bytes());
            data.extend_from_slice(key.as_bytes());
            data.extend_from_slice(&(value.len() as u32).to_le_bytes());
            data.extend_from_slice(value.as_bytes());
        }
        data
    }

    #[test]
    fn test_decode_size() {
        let mut payload = Vec::new();
        for v in [20u32, 40, 60] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(decode_size(&payload).unwrap(), GridSize::new(20, 40, 60));
    }

    #[test]
    fn test_decode_size_short() {
        let err = decode_size(&[0; 11]).unwrap_err();
        assert!(matches!(
            err,
            VoxError::MalformedChunk {
                tag: ChunkTag::Size,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_voxels_in_file_order() {
        let mut payload = 3u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&[0, 0, 0, 1, 255, 255, 255, 255, 1, 2, 3, 0]);

        let voxels = decode_voxels(&payload).unwrap();
        assert_eq!(
            voxels,
            vec![
                Voxel::new(0, 0, 0, 1),
                Voxel::new(255, 255, 255, 255),
                Voxel::new(1, 2, 3, 0),
            ]
        );
    }

    #[test]
    fn test_decode_voxels_empty() {
        let payload = 0u32.to_le_bytes();
        assert!(decode_voxels(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_decode_voxels_trailing_bytes_ignored() {
        let mut payload = 1u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&[4, 5, 6, 7, 0xde, 0xad]);
        assert_eq!(decode_voxels(&payload).unwrap(), vec![Voxel::new(4, 5, 6, 7)]);
    }

    #[test]
    fn test_decode_voxels_count_exceeds_payload() {
        let mut payload = 2u32.to_le_bytes().to_vec();
        payload.extend_from_slice(&[1, 1, 1, 1, 2, 2]);
        let err = decode_voxels(&payload).unwrap_err();
        assert!(matches!(
            err,
            VoxError::MalformedChunk {
                tag: ChunkTag::Xyzi,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_voxels_huge_count() {
        let payload = u32::MAX.to_le_bytes();
        assert!(matches!(
            decode_voxels(&payload),
            Err(VoxError::MalformedChunk { .. })
        ));
    }

    #[test]
    fn test_decode_voxels_missing_count() {
        assert!(matches!(
            decode_voxels(&[1, 2]),
            Err(VoxError::MalformedChunk {
                tag: ChunkTag::Xyzi,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_palette() {
        let mut payload = Vec::with_capacity(RGBA_CONTENT_LEN);
        for i in 0..256u32 {
            payload.extend_from_slice(&(i | 0xff00_0000).to_le_bytes());
        }

        let palette = decode_palette(&payload).unwrap();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette[0], Rgba::new(0, 0, 0, 255));
        assert_eq!(palette[200], Rgba::new(200, 0, 0, 255));
    }

    #[test]
    fn test_decode_palette_longer_payload() {
        let mut payload = vec![0x11; RGBA_CONTENT_LEN];
        payload.extend_from_slice(&[0x22; 16]);

        let palette = decode_palette(&payload).unwrap();
        assert!(palette.iter().all(|c| c.packed() == 0x1111_1111));
    }

    #[test]
    fn test_decode_palette_short() {
        let err = decode_palette(&[0; RGBA_CONTENT_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            VoxError::MalformedChunk {
                tag: ChunkTag::Rgba,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_material_raw_strings() {
        let payload = material_payload(5, &[("_type", "_metal"), ("_rough", "0.4")]);
        let material = decode_material(&payload).unwrap();

        assert_eq!(material.id, 5);
        assert_eq!(material.get("_rough"), Some("0.4"));
        assert_eq!(material.get("_type"), Some("_metal"));
        assert_eq!(material.len(), 2);
    }

    #[test]
    fn test_decode_material_negative_id_no_properties() {
        let payload = material_payload(-1, &[]);
        let material = decode_material(&payload).unwrap();
        assert_eq!(material.id, -1);
        assert!(material.is_empty());
    }

    #[test]
    fn test_decode_material_value_overruns() {
        let mut payload = material_payload(1, &[("_ior", "1.3")]);
        payload.truncate(payload.len() - 1);
        let err = decode_material(&payload).unwrap_err();
        assert!(matches!(
            err,
            VoxError::MalformedChunk {
                tag: ChunkTag::Matl,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_material_dangling_key_length() {
        let mut payload = material_payload(1, &[]);
        payload.extend_from_slice(&[3, 0]);
        assert!(matches!(
            decode_material(&payload),
            Err(VoxError::MalformedChunk { .. })
        ));
    }

    #[test]
    fn test_decode_material_short_prefix() {
        assert!(matches!(
            decode_material(&[0; 7]),
            Err(VoxError::MalformedChunk {
                tag: ChunkTag::Matl,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_payload_dispatch() {
        assert_eq!(
            decode_payload(ChunkTag::Note, &[1, 2, 3]).unwrap(),
            Record::Marker(ChunkTag::Note)
        );
        assert_eq!(
            decode_payload(ChunkTag::Unknown(*b"ABCD"), &[]).unwrap(),
            Record::Skipped(ChunkTag::Unknown(*b"ABCD"))
        );
        assert_eq!(
            decode_payload(ChunkTag::Main, &[]).unwrap(),
            Record::Marker(ChunkTag::Main)
        );
    }
}
