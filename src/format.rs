//! # 输出格式选择模块
//!
//! 隐写结果只会以无损格式保存：
//!
//! * `.png` 或无扩展名：PNG，保留 RGB/RGBA 通道布局，使用最快压缩、不做滤波。
//! * `.bmp`：BMP，不支持 alpha，RGBA 会先降为 RGB。
//! * 其他任何扩展名：替换为 `.png` 后按 PNG 保存，绝不写出有损格式。

use crate::error::StegoError;
use crate::pixels::{ChannelMode, PixelGrid};
use image::codecs::bmp::BmpEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::fs;
use std::path::{Path, PathBuf};

/// 受支持的无损输出容器。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Bmp,
}

impl OutputFormat {
    /// 按容器能力规范化通道布局。
    pub fn normalize(self, grid: PixelGrid) -> PixelGrid {
        match self {
            Self::Png => grid,
            Self::Bmp => grid.into_rgb(),
        }
    }

    /// 在内存中编码图像。
    ///
    /// # Errors
    ///
    /// 编码器失败时返回 [`StegoError::Format`]。
    pub fn encode(self, grid: &PixelGrid) -> Result<Vec<u8>, StegoError> {
        let color = match grid.mode() {
            ChannelMode::Rgb => ExtendedColorType::Rgb8,
            ChannelMode::Rgba => ExtendedColorType::Rgba8,
        };

        let mut buffer = Vec::new();
        match self {
            Self::Png => PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Fast,
                FilterType::NoFilter,
            )
            .write_image(grid.samples(), grid.width(), grid.height(), color)?,
            Self::Bmp => BmpEncoder::new(&mut buffer).write_image(
                grid.samples(),
                grid.width(),
                grid.height(),
                color,
            )?,
        }

        Ok(buffer)
    }
}

/// 根据请求的输出路径确定实际路径与输出格式。扩展名不区分大小写。
pub fn resolve(requested: &Path) -> (PathBuf, OutputFormat) {
    let extension = requested
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => (requested.to_path_buf(), OutputFormat::Png),
        Some("bmp") => (requested.to_path_buf(), OutputFormat::Bmp),
        _ => (requested.with_extension("png"), OutputFormat::Png),
    }
}

/// 编码并写入文件。编码完整成功之后才会创建目标文件。
///
/// # Errors
///
/// 编码失败或文件写入失败时返回错误。
pub fn persist(grid: &PixelGrid, path: &Path, format: OutputFormat) -> Result<(), StegoError> {
    let encoded = format.encode(grid)?;
    fs::write(path, encoded)?;
    Ok(())
}
