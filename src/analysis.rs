//! # 图像分析模块
//!
//! 为 `inspect` 子命令汇总图像信息：尺寸、通道、容器格式、LSB 容量，
//! 以及一个粗略的 LSB 分布抽样和隐藏数据探测 (无密码，或常见密码)。
//! 这里的判断只是启发式提示，不是隐写分析。

use crate::constants::{
    BITS_PER_BYTE, COMMON_PASSWORDS, DELIMITER, LSB_SAMPLE_PIXELS, LSB_SAMPLE_STRIDE,
};
use crate::engine;
use crate::error::StegoError;
use crate::payload::Payload;
use crate::pixels::{ChannelMode, PixelGrid};
use crate::steganography;
use image::{ImageFormat, ImageReader};
use std::fs;
use std::path::Path;

/// 容器格式对 LSB 隐写的适用程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suitability {
    /// PNG、BMP 等无损格式。
    Lossless,
    /// JPEG：有损压缩会破坏 LSB。
    Lossy,
    /// GIF：调色板格式，LSB 改动不可靠。
    Palette,
    /// 未知或其他格式。
    Unknown,
}

impl From<Option<ImageFormat>> for Suitability {
    fn from(format: Option<ImageFormat>) -> Self {
        match format {
            Some(ImageFormat::Png | ImageFormat::Bmp) => Self::Lossless,
            Some(ImageFormat::Jpeg) => Self::Lossy,
            Some(ImageFormat::Gif) => Self::Palette,
            _ => Self::Unknown,
        }
    }
}

/// 抽样得到的 LSB 中 1 与 0 的数量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbSample {
    pub ones: usize,
    pub zeros: usize,
}

impl LsbSample {
    /// 取前 `min(1000, 像素数)` 个像素，每隔 10 个像素统计一次 R、G、B 的 LSB。
    pub fn collect(grid: &PixelGrid) -> Self {
        let channels = grid.mode().channels();
        let sampled = grid.pixel_count().min(LSB_SAMPLE_PIXELS);

        let ones = grid
            .samples()
            .chunks_exact(channels)
            .take(sampled)
            .step_by(LSB_SAMPLE_STRIDE)
            .flat_map(|px| &px[..3])
            .filter(|&&byte| byte & 1 == 1)
            .count();
        let total = sampled.div_ceil(LSB_SAMPLE_STRIDE) * 3;

        Self {
            ones,
            zeros: total - ones,
        }
    }

    /// 1 所占比例；样本为空时为 0。
    pub fn ratio(&self) -> f64 {
        let total = self.ones + self.zeros;
        if total == 0 {
            return 0.0;
        }
        self.ones as f64 / total as f64
    }

    /// 比例落在 `[0.4, 0.6]` 时视为正常分布。
    pub fn looks_natural(&self) -> bool {
        (0.4..=0.6).contains(&self.ratio())
    }
}

/// `inspect` 子命令的分析结果。
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    pub width: u32,
    pub height: u32,
    pub mode: ChannelMode,
    pub format: Option<ImageFormat>,
    pub file_size: u64,
    pub capacity_bits: usize,
    pub lsb_sample: LsbSample,
    /// 无需密码即可提取出非空载荷。
    pub unprotected_data: bool,
    /// 能解开隐藏数据的常见密码。
    pub guessed_password: Option<&'static str>,
}

/// 提取成功且载荷非空。结束标记位于开头时得到的空文本不算隐藏数据。
fn holds_payload(grid: &PixelGrid, password: &str) -> bool {
    match engine::extract_grid(grid, password) {
        Ok(Payload::Text(text)) => !text.is_empty(),
        Ok(Payload::File { .. }) => true,
        Err(_) => false,
    }
}

/// 探测隐藏数据，返回 (无密码可提取, 命中的常见密码)。
///
/// 先尝试常见密码：受保护的数据在无密码提取时会连同摘要一起被当成文本读出，
/// 因此命中密码时不再报告无密码数据。
fn detect_hidden_data(grid: &PixelGrid) -> (bool, Option<&'static str>) {
    let guessed = COMMON_PASSWORDS
        .into_iter()
        .find(|password| holds_payload(grid, password));
    match guessed {
        Some(password) => (false, Some(password)),
        None => (holds_payload(grid, ""), None),
    }
}

impl ImageReport {
    /// 分析图像文件。
    ///
    /// # Errors
    ///
    /// 图像无法读取或解码时返回错误。
    pub fn inspect(path: &Path) -> Result<Self, StegoError> {
        let format = ImageReader::open(path)?.with_guessed_format()?.format();
        let file_size = fs::metadata(path)?.len();
        let grid = PixelGrid::open(path)?;
        let (unprotected_data, guessed_password) = detect_hidden_data(&grid);

        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            mode: grid.mode(),
            format,
            file_size,
            capacity_bits: steganography::capacity_bits(&grid),
            lsb_sample: LsbSample::collect(&grid),
            unprotected_data,
            guessed_password,
        })
    }

    /// 可容纳的载荷字节数上限 (扣除结束标记)。
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bits.saturating_sub(DELIMITER.len()) / BITS_PER_BYTE
    }

    pub fn suitability(&self) -> Suitability {
        Suitability::from(self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_counts_every_tenth_pixel() {
        // 25 个像素 -> 抽取第 0、10、20 个，共 9 个通道
        let samples = (0..25u8).flat_map(|i| [i, i, i]).collect();
        let grid = PixelGrid::new(5, 5, ChannelMode::Rgb, samples).unwrap();
        let sample = LsbSample::collect(&grid);
        assert_eq!(sample, LsbSample { ones: 0, zeros: 9 });
        assert!(!sample.looks_natural());
    }

    #[test]
    fn alpha_is_not_sampled() {
        let samples = [0u8, 1, 0, 1].repeat(4);
        let grid = PixelGrid::new(2, 2, ChannelMode::Rgba, samples).unwrap();
        let sample = LsbSample::collect(&grid);
        assert_eq!(sample.ones + sample.zeros, 3);
        assert_eq!(sample.ones, 1);
    }

    fn grid_with_lsbs(lsbs: &[bool]) -> PixelGrid {
        let mut samples = vec![0x40u8; 8 * 8 * 3];
        for (byte, &bit) in samples.iter_mut().zip(lsbs) {
            *byte |= u8::from(bit);
        }
        PixelGrid::new(8, 8, ChannelMode::Rgb, samples).unwrap()
    }

    #[test]
    fn delimiter_at_start_is_not_hidden_data() {
        // 15 个 1 后全为 0：结束标记位于第 0 位，提取结果为空文本
        let grid = grid_with_lsbs(&[true; 15]);
        assert_eq!(
            engine::extract_grid(&grid, "").unwrap(),
            Payload::Text(String::new())
        );
        assert_eq!(detect_hidden_data(&grid), (false, None));
    }

    #[test]
    fn unprotected_text_is_detected() {
        let cover = grid_with_lsbs(&[]);
        let stego = engine::embed_grid(&cover, &Payload::Text("hi".into()), "").unwrap();
        assert_eq!(detect_hidden_data(&stego), (true, None));
    }

    #[test]
    fn common_password_is_guessed() {
        let cover = PixelGrid::new(32, 32, ChannelMode::Rgb, vec![0x40; 32 * 32 * 3]).unwrap();
        let stego = engine::embed_grid(&cover, &Payload::Text("loot".into()), "secret").unwrap();
        assert_eq!(detect_hidden_data(&stego), (false, Some("secret")));

        let stego = engine::embed_grid(&cover, &Payload::Text("loot".into()), "Xq9!long").unwrap();
        let (_, guessed) = detect_hidden_data(&stego);
        assert_eq!(guessed, None);
    }

    #[test]
    fn suitability_by_format() {
        assert_eq!(Suitability::from(Some(ImageFormat::Png)), Suitability::Lossless);
        assert_eq!(Suitability::from(Some(ImageFormat::Jpeg)), Suitability::Lossy);
        assert_eq!(Suitability::from(Some(ImageFormat::Gif)), Suitability::Palette);
        assert_eq!(Suitability::from(None), Suitability::Unknown);
    }
}
