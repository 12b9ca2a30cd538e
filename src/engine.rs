//! # 嵌入/提取编排模块
//!
//! 面向调用方的两个操作：
//!
//! * 嵌入：载荷 → 比特流 → 密码摘要前缀 → 结束标记 → LSB 写入 → 无损格式保存。
//! * 提取：LSB 扫描 → 定位结束标记 → 校验密码 → 解析文件帧或文本。
//!
//! 所有函数都无状态、可重入，不同图像上的调用可以在各自的线程中并发执行。

use crate::error::StegoError;
use crate::format;
use crate::password;
use crate::payload::Payload;
use crate::pixels::PixelGrid;
use crate::steganography;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 将载荷嵌入像素网格，返回新的网格。原网格不会被修改。
///
/// # Errors
///
/// * 容量不足：[`StegoError::Capacity`]。
/// * 文件过大、帧头无法表示：[`StegoError::Frame`]。
pub fn embed_grid(
    cover: &PixelGrid,
    payload: &Payload,
    password: &str,
) -> Result<PixelGrid, StegoError> {
    let bits = password::prepare(payload.to_bits()?, password);
    steganography::embed(cover, &bits)
}

/// 从像素网格中提取载荷。
///
/// # Errors
///
/// * 找不到结束标记：[`StegoError::NotFound`]。
/// * 密码不匹配：[`StegoError::AuthFailure`]。
/// * 文件帧不完整：[`StegoError::Frame`]。
pub fn extract_grid(grid: &PixelGrid, password: &str) -> Result<Payload, StegoError> {
    let scanned = steganography::scan(grid);
    let end = steganography::locate_delimiter(&scanned).ok_or(StegoError::NotFound)?;
    let payload_bits = password::verify(&scanned[..end], password)?;
    Ok(Payload::from_bits(payload_bits)?)
}

/// 读取载体图像、嵌入载荷并保存为无损格式，返回实际写入的路径。
///
/// 输出格式在写入比特之前确定，通道布局会先按容器规范化 (BMP 不保留 alpha)，
/// 因此写入的每个比特都能从保存后的文件中原样读回。
/// 任何失败都不会创建输出文件，载体文件本身始终不被改动。
///
/// # Errors
///
/// 图像无法解码、容量不足、编码或写入失败时返回错误。
pub fn embed(
    cover_path: &Path,
    payload: &Payload,
    output_path: &Path,
    password: &str,
) -> Result<PathBuf, StegoError> {
    let (output, output_format) = format::resolve(output_path);
    let cover = output_format.normalize(PixelGrid::open(cover_path)?);
    debug!(
        "cover {}x{} {} -> {:?} at {}",
        cover.width(),
        cover.height(),
        cover.mode(),
        output_format,
        output.display()
    );

    let stego = embed_grid(&cover, payload, password)?;
    format::persist(&stego, &output, output_format)?;
    info!("payload embedded into {}", output.display());

    Ok(output)
}

/// 读取图像并提取隐藏的载荷。
///
/// # Errors
///
/// 图像无法解码，或 [`extract_grid`] 失败时返回错误。
pub fn extract(image_path: &Path, password: &str) -> Result<Payload, StegoError> {
    let grid = PixelGrid::open(image_path)?;
    extract_grid(&grid, password)
}
