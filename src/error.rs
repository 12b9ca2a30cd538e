//! # 错误类型模块
//!
//! [`StegoError`] 覆盖嵌入与提取过程中的全部失败情形。
//! 所有错误都可恢复：调用方可以换一张图片、换一个密码后重试。

use thiserror::Error;

/// 解析文件帧时可能出现的错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// 可用比特数不足以容纳 8 字节的帧头。
    #[error("frame header needs 64 bits, only {available} available")]
    TruncatedHeader { available: usize },

    /// 文件名长度不合理，多半是随机数据碰巧被当成了帧头。
    #[error("implausible filename length {0}")]
    ImplausibleFilename(u32),

    /// 帧头声明的长度超过了剩余的比特数。
    #[error("frame declares {declared} bits of body, only {available} available")]
    TruncatedBody { declared: u64, available: usize },

    /// 文件名或内容长度超出帧头 `u32` 字段的表示范围。
    #[error("{field} length {len} does not fit in a u32 frame header field")]
    Oversized { field: &'static str, len: usize },
}

/// 隐写嵌入/提取过程中的错误。
///
/// `NotFound` 与 `AuthFailure` 的显示文本完全相同，
/// 终端用户无法据此判断图像中是否存在受密码保护的数据。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载荷加上附加开销超出了图像的 LSB 容量。原图未被修改。
    #[error("the payload does not fit in this image; the cover image was left unmodified")]
    Capacity,

    /// 图像无法解码或编码。
    #[error("unsupported or undecodable image: {0}")]
    Format(#[from] image::ImageError),

    /// 像素缓冲区长度与宽、高、通道数不一致。
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    PixelLayout { expected: usize, actual: usize },

    /// 未找到结束标记。
    #[error("no hidden data found")]
    NotFound,

    /// 密码摘要不匹配，或数据短到放不下摘要。
    #[error("no hidden data found")]
    AuthFailure,

    /// 数据带有可信的文件帧头，但内容不完整。
    #[error("malformed file frame: {0}")]
    Frame(#[from] FrameError),

    /// 文件读写失败。
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
