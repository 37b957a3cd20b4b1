//! # MCSTACK1 原始超堆栈容器
//!
//! ## 格式
//! ```text
//! magic      8 bytes   "MCSTACK1"
//! width      u32 LE
//! height     u32 LE
//! channels   u32 LE
//! slices     u32 LE
//! pixel size f64 LE   (µm)
//! samples    f32 LE × width·height·channels·slices, XYCZ 顺序
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs`, `commands/inspect.rs` 用于导入
//! - 被 `commands/synth.rs` 用于写出

use super::ImageImporter;
use crate::error::{QuantError, Result};
use crate::models::MultiChannelImage;

use std::fs;
use std::path::Path;

/// 文件魔数
pub const MAGIC: &[u8; 8] = b"MCSTACK1";

const HEADER_LEN: usize = 8 + 4 * 4 + 8;

/// MCSTACK1 导入器
pub struct RawStackImporter;

impl ImageImporter for RawStackImporter {
    fn open(&self, path: &Path) -> Result<MultiChannelImage> {
        let bytes = fs::read(path).map_err(|e| QuantError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        decode(&bytes, &name).map_err(|reason| QuantError::ImportError {
            path: path.display().to_string(),
            reason,
        })
    }
}

/// 解码字节流
pub fn decode(bytes: &[u8], name: &str) -> std::result::Result<MultiChannelImage, String> {
    if bytes.len() < HEADER_LEN {
        return Err(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        ));
    }
    if &bytes[..8] != MAGIC {
        return Err("missing MCSTACK1 magic".to_string());
    }

    let read_u32 = |offset: usize| -> usize {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&bytes[offset..offset + 4]);
        u32::from_le_bytes(buf) as usize
    };
    let width = read_u32(8);
    let height = read_u32(12);
    let channels = read_u32(16);
    let slices = read_u32(20);

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[24..32]);
    let pixel_size = f64::from_le_bytes(buf);

    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(slices))
        .ok_or_else(|| "dimensions overflow".to_string())?;
    let expected_bytes = count
        .checked_mul(4)
        .ok_or_else(|| "dimensions overflow".to_string())?;

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != expected_bytes {
        return Err(format!(
            "expected {} samples ({} bytes), found {} bytes",
            count,
            expected_bytes,
            payload.len()
        ));
    }

    let data = payload
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    MultiChannelImage::new(name, width, height, channels, slices, pixel_size, data)
        .map_err(|e| e.to_string())
}

/// 编码为字节流；任一维度超出 u32 时报错
pub fn encode(image: &MultiChannelImage) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + image.samples().len() * 4);
    out.extend_from_slice(MAGIC);
    for (axis, dim) in [
        ("width", image.width()),
        ("height", image.height()),
        ("channels", image.channel_count()),
        ("slices", image.slice_count()),
    ] {
        let dim = u32::try_from(dim).map_err(|_| {
            QuantError::InvalidFormat(format!(
                "{} {} does not fit the MCSTACK1 header",
                axis, dim
            ))
        })?;
        out.extend_from_slice(&dim.to_le_bytes());
    }
    out.extend_from_slice(&image.pixel_size().to_le_bytes());
    for v in image.samples() {
        out.extend_from_slice(&v.to_le_bytes());
    }
    Ok(out)
}

/// 写出 MCSTACK1 文件
pub fn write_stack(path: &Path, image: &MultiChannelImage) -> Result<()> {
    let bytes = encode(image)?;
    fs::write(path, bytes).map_err(|e| QuantError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.mcs");
        let data: Vec<f32> = (0..24).map(|v| v as f32).collect();
        let image = MultiChannelImage::new("cells.mcs", 3, 2, 2, 2, 0.25, data).unwrap();
        write_stack(&path, &image).unwrap();

        let opened = RawStackImporter.open(&path).unwrap();
        assert_eq!(opened.name(), "cells.mcs");
        assert_eq!(opened.channel_count(), 2);
        assert_eq!(opened.slice_count(), 2);
        assert_eq!(opened.pixel_size(), 0.25);
        assert_eq!(opened.plane_pixels(1, 1), image.plane_pixels(1, 1));
    }

    #[test]
    fn test_truncated_file_is_import_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mcs");
        let image = MultiChannelImage::new("b", 2, 2, 1, 1, 1.0, vec![1.0; 4]).unwrap();
        let mut bytes = encode(&image).unwrap();
        bytes.truncate(bytes.len() - 3);
        fs::write(&path, bytes).unwrap();

        let err = RawStackImporter.open(&path).unwrap_err();
        assert!(matches!(err, QuantError::ImportError { .. }));
    }

    #[test]
    fn test_bad_magic() {
        let bytes = vec![0u8; HEADER_LEN];
        assert!(decode(&bytes, "x").unwrap_err().contains("magic"));
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        // 65536 x 65536 x 65536 x 16384 个样本，字节数超出 usize
        let mut bytes = MAGIC.to_vec();
        for dim in [65536u32, 65536, 65536, 16384] {
            bytes.extend_from_slice(&dim.to_le_bytes());
        }
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 16]);

        let err = decode(&bytes, "huge.mcs").unwrap_err();
        assert!(err.contains("overflow"));
    }

    #[test]
    fn test_import_of_oversized_header_is_import_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.mcs");
        let mut bytes = MAGIC.to_vec();
        for dim in [u32::MAX, u32::MAX, u32::MAX, u32::MAX] {
            bytes.extend_from_slice(&dim.to_le_bytes());
        }
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        fs::write(&path, bytes).unwrap();

        let err = RawStackImporter.open(&path).unwrap_err();
        assert!(matches!(err, QuantError::ImportError { .. }));
    }
}
