use std::{io::Write, path::Path};

use byteorder::{LittleEndian, WriteBytesExt};
use log::info;

use crate::core::{GridSize, Material, Palette, Voxel};
use crate::error::{VoxError, VoxResult};
use crate::io::ChunkTag;
use crate::io::consts::VOX_MAGIC;
use crate::model::VoxModel;

fn len_u32(tag: ChunkTag, len: usize) -> VoxResult<u32> {
    u32::try_from(len)
        .map_err(|_| VoxError::malformed(tag, format!("{len} bytes do not fit a u32")))
}

fn write_chunk<W: Write>(
    writer: &mut W,
    tag: ChunkTag,
    content: &[u8],
    children: &[u8],
) -> VoxResult<()> {
    writer.write_all(&tag.to_bytes())?;
    writer.write_u32::<LittleEndian>(len_u32(tag, content.len())?)?;
    writer.write_u32::<LittleEndian>(len_u32(tag, children.len())?)?;
    writer.write_all(content)?;
    writer.write_all(children)?;
    Ok(())
}

pub fn encode_size(size: GridSize) -> VoxResult<Vec<u8>> {
    let mut content = Vec::with_capacity(12);
    content.write_u32::<LittleEndian>(size.x)?;
    content.write_u32::<LittleEndian>(size.y)?;
    content.write_u32::<LittleEndian>(size.z)?;
    Ok(content)
}

/// Encodes an `XYZI` payload: count followed by `[x, y, z, index]` records.
pub fn encode_voxels(voxels: &[Voxel]) -> VoxResult<Vec<u8>> {
    let mut content = Vec::with_capacity(4 + voxels.len() * Voxel::ENCODED_SIZE);
    content.write_u32::<LittleEndian>(len_u32(ChunkTag::Xyzi, voxels.len())?)?;
    for voxel in voxels {
        content.write_all(&voxel.to_bytes())?;
    }
    Ok(content)
}

pub fn encode_palette(palette: &Palette) -> VoxResult<Vec<u8>> {
    let mut content = Vec::with_capacity(palette.len() * 4);
    for color in palette {
        content.write_u32::<LittleEndian>(color.packed())?;
    }
    Ok(content)
}

pub fn encode_material(material: &Material) -> VoxResult<Vec<u8>> {
    let mut content = Vec::new();
    content.write_i32::<LittleEndian>(material.id)?;
    content.write_u32::<LittleEndian>(0)?;
    for (key, value) in &material.properties {
        content.write_u32::<LittleEndian>(len_u32(ChunkTag::Matl, key.len())?)?;
        content.write_all(key.as_bytes())?;
        content.write_u32::<LittleEndian>(len_u32(ChunkTag::Matl, value.len())?)?;
        content.write_all(value.as_bytes())?;
    }
    Ok(content)
}

/// Grid size to write when the model carries none: just large enough for its
/// voxels.
fn fallback_size(model: &VoxModel) -> GridSize {
    match model.extent.max() {
        Some(max) => GridSize::new(max.x + 1, max.y + 1, max.z + 1),
        None => GridSize::new(1, 1, 1),
    }
}

/// Writes `model` as a single-model `.vox` file.
///
/// The `MAIN` chunk holds `SIZE`, `XYZI`, `RGBA` (only for an explicit
/// palette) and one `MATL` per material. Census-only chunks are not written.
pub fn write_model<W: Write>(writer: &mut W, model: &VoxModel) -> VoxResult<()> {
    let size = model.size.unwrap_or_else(|| fallback_size(model));

    let mut children = Vec::new();
    write_chunk(&mut children, ChunkTag::Size, &encode_size(size)?, &[])?;
    write_chunk(
        &mut children,
        ChunkTag::Xyzi,
        &encode_voxels(&model.voxels)?,
        &[],
    )?;
    if model.explicit_palette {
        write_chunk(
            &mut children,
            ChunkTag::Rgba,
            &encode_palette(&model.palette)?,
            &[],
        )?;
    }
    for material in &model.materials {
        write_chunk(
            &mut children,
            ChunkTag::Matl,
            &encode_material(material)?,
            &[],
        )?;
    }

    writer.write_all(&VOX_MAGIC)?;
    writer.write_u32::<LittleEndian>(model.version)?;
    write_chunk(writer, ChunkTag::Main, &[], &children)?;

    Ok(())
}

pub fn encode_model(model: &VoxModel) -> VoxResult<Vec<u8>> {
    let mut data = Vec::new();
    write_model(&mut data, model)?;
    Ok(data)
}

pub fn export_model_to_vox<P: AsRef<Path>>(path: &P, model: &VoxModel) -> VoxResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);

    write_model(&mut writer, model)?;
    writer.flush()?;

    info!(
        "Exported {} voxels to {}",
        model.voxel_count(),
        path.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba;
    use crate::io::payload::{decode_material, decode_palette, decode_size, decode_voxels};

    #[test]
    fn test_voxels_reencode_identically() {
        let voxels = vec![
            Voxel::new(0, 0, 0, 1),
            Voxel::new(255, 128, 3, 254),
            Voxel::new(7, 7, 7, 0),
        ];
        let payload = encode_voxels(&voxels).unwrap();
        let decoded = decode_voxels(&payload).unwrap();
        assert_eq!(decoded, voxels);
        assert_eq!(encode_voxels(&decoded).unwrap(), payload);
    }

    #[test]
    fn test_size_layout() {
        let payload = encode_size(GridSize::new(1, 2, 258)).unwrap();
        assert_eq!(payload, vec![1, 0, 0, 0, 2, 0, 0, 0, 2, 1, 0, 0]);
        assert_eq!(decode_size(&payload).unwrap(), GridSize::new(1, 2, 258));
    }

    #[test]
    fn test_palette_layout() {
        let mut palette = Palette::default();
        palette.set(3, Rgba::new(1, 2, 3, 4));
        let payload = encode_palette(&palette).unwrap();

        assert_eq!(payload.len(), 1024);
        assert_eq!(&payload[12..16], &[1, 2, 3, 4]);
        assert_eq!(decode_palette(&payload).unwrap(), palette);
    }

    #[test]
    fn test_material_layout() {
        let mut material = Material::new(-4);
        material.insert("_rough", "0.4");
        let payload = encode_material(&material).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&(-4i32).to_le_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&[6, 0, 0, 0]);
        expected.extend_from_slice(b"_rough");
        expected.extend_from_slice(&[3, 0, 0, 0]);
        expected.extend_from_slice(b"0.4");
        assert_eq!(payload, expected);
        assert_eq!(decode_material(&payload).unwrap(), material);
    }

    #[test]
    fn test_write_chunk_header() {
        let mut data = Vec::new();
        write_chunk(&mut data, ChunkTag::Note, &[1, 2], &[3]).unwrap();
        assert_eq!(data, b"NOTE\x02\x00\x00\x00\x01\x00\x00\x00\x01\x02\x03".to_vec());
    }
}
