//! # LSB 通道编解码模块
//!
//! 按行优先、从左到右、从上到下的顺序遍历像素，每个像素内按 R、G、B (以及 A) 的顺序，
//! 每个通道字节的最低有效位存放一个比特。

use crate::constants::DELIMITER;
use crate::error::StegoError;
use crate::pixels::PixelGrid;
use log::debug;

/// 图像可容纳的比特数：像素数 × 通道数。
pub fn capacity_bits(grid: &PixelGrid) -> usize {
    grid.pixel_count() * grid.mode().channels()
}

/// 将比特流连同结束标记写入像素网格的 LSB，返回新的像素网格。
///
/// 容量检查先于任何修改；失败时原网格保持不变，也不会产生新网格。
/// 比特流写完后，其余通道字节逐字节保持原样。
///
/// # Errors
///
/// `bits.len() + 16` 超过 [`capacity_bits`] 时返回 [`StegoError::Capacity`]。
pub fn embed(cover: &PixelGrid, bits: &[bool]) -> Result<PixelGrid, StegoError> {
    let required = bits.len() + DELIMITER.len();
    let available = capacity_bits(cover);
    debug!("embedding {required} bits into {available} LSB slots");

    if required > available {
        return Err(StegoError::Capacity);
    }

    let mut samples = cover.samples().to_vec();
    for (byte, &bit) in samples.iter_mut().zip(bits.iter().chain(DELIMITER.iter())) {
        *byte = (*byte & 0xFE) | u8::from(bit);
    }

    Ok(cover.with_samples(samples))
}

/// 读取整幅图像所有通道的 LSB。
///
/// 结束标记的位置事先未知，因此总是扫描完整图像。
pub fn scan(grid: &PixelGrid) -> Vec<bool> {
    grid.samples().iter().map(|&byte| byte & 1 == 1).collect()
}

/// 查找结束标记第一次出现的位置，返回其之前的比特数。
pub fn locate_delimiter(bits: &[bool]) -> Option<usize> {
    bits.windows(DELIMITER.len())
        .position(|window| window == DELIMITER)
}
