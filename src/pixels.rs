//! # 像素网格模块
//!
//! [`PixelGrid`] 是隐写核心操作的抽象像素网格：8 bits/通道，行优先排列，
//! 每个像素 3 (RGB) 或 4 (RGBA) 个通道。
//! 与 `image` crate 之间的转换也集中在这里。

use crate::error::StegoError;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::path::Path;

/// 每个像素的通道布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Rgb,
    Rgba,
}

impl ChannelMode {
    /// 每个像素的通道数。
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb => f.write_str("RGB"),
            Self::Rgba => f.write_str("RGBA"),
        }
    }
}

/// 载体图像的像素数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    mode: ChannelMode,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// 由原始通道数据构建像素网格。
    ///
    /// # Errors
    ///
    /// `samples` 长度不等于 `width * height * channels` 时返回 [`StegoError::PixelLayout`]。
    pub fn new(
        width: u32,
        height: u32,
        mode: ChannelMode,
        samples: Vec<u8>,
    ) -> Result<Self, StegoError> {
        let expected = width as usize * height as usize * mode.channels();
        if samples.len() != expected {
            return Err(StegoError::PixelLayout {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            mode,
            samples,
        })
    }

    /// 解码图像文件。带 alpha 的彩色图像规范化为 RGBA8，其余任何模式都规范化为 RGB8。
    ///
    /// # Errors
    ///
    /// 文件无法打开或无法解码时返回 [`StegoError::Format`]。
    pub fn open(path: &Path) -> Result<Self, StegoError> {
        Ok(Self::from(image::open(path)?))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 替换通道数据，宽、高与通道模式保持不变。
    pub(crate) fn with_samples(&self, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            samples,
            ..*self
        }
    }

    /// 去掉 alpha 通道。已是 RGB 时原样返回。
    pub fn into_rgb(self) -> Self {
        match self.mode {
            ChannelMode::Rgb => self,
            ChannelMode::Rgba => Self {
                samples: self
                    .samples
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect(),
                mode: ChannelMode::Rgb,
                ..self
            },
        }
    }

    /// 转换为 `image` crate 的图像。
    ///
    /// # Errors
    ///
    /// 缓冲区长度与尺寸不一致时返回 [`StegoError::PixelLayout`]。
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, StegoError> {
        let samples = self.samples.clone();
        let image = match self.mode {
            ChannelMode::Rgb => RgbImage::from_raw(self.width, self.height, samples)
                .map(DynamicImage::ImageRgb8),
            ChannelMode::Rgba => RgbaImage::from_raw(self.width, self.height, samples)
                .map(DynamicImage::ImageRgba8),
        };

        image.ok_or(StegoError::PixelLayout {
            expected: self.pixel_count() * self.mode.channels(),
            actual: self.samples.len(),
        })
    }
}

impl From<DynamicImage> for PixelGrid {
    /// 任何带 alpha 的彩色图像 (RGBA8/16/32F) 都转换为 RGBA8，其余转换为 RGB8。
    fn from(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let color = image.color();
        if color.has_color() && color.has_alpha() {
            Self {
                width,
                height,
                mode: ChannelMode::Rgba,
                samples: image.into_rgba8().into_raw(),
            }
        } else {
            Self {
                width,
                height,
                mode: ChannelMode::Rgb,
                samples: image.into_rgb8().into_raw(),
            }
        }
    }
}
