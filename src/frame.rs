//! # 文件帧模块
//!
//! 隐藏整个文件时使用的二进制帧：
//!
//! ```text
//! | u32 LE 文件名长度 | u32 LE 内容长度 | 文件名字节 | 内容字节 |
//! ```
//!
//! 文件名按字符逐个编码为单字节 (见 [`crate::bits::text_to_bits`])。
//! 文本载荷不经过本模块。

use crate::bits::{self, BitStream};
use crate::constants::{BITS_PER_BYTE, FRAME_HEADER_BITS, FRAME_HEADER_BYTES, MAX_FILENAME_LEN};
use crate::error::FrameError;

/// 文件帧的 8 字节头部。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub filename_len: u32,
    pub content_len: u32,
}

impl FrameHeader {
    /// 从比特流开头读取帧头，不检查其后是否有足够的数据。
    ///
    /// # Errors
    ///
    /// 可用比特数少于 64 时返回 [`FrameError::TruncatedHeader`]。
    pub fn peek(bits: &[bool]) -> Result<Self, FrameError> {
        if bits.len() < FRAME_HEADER_BITS {
            return Err(FrameError::TruncatedHeader {
                available: bits.len(),
            });
        }

        let header = bits::bits_to_bytes(&bits[..FRAME_HEADER_BITS]);
        let (name, content) = header.split_at(4);

        Ok(Self {
            filename_len: u32::from_le_bytes([name[0], name[1], name[2], name[3]]),
            content_len: u32::from_le_bytes([content[0], content[1], content[2], content[3]]),
        })
    }

    /// 头部看起来像真正的文件帧：文件名非空且长度合理，内容非空。
    pub fn is_plausible(&self) -> bool {
        self.filename_len > 0 && self.filename_len < MAX_FILENAME_LEN && self.content_len > 0
    }

    fn to_bytes(self) -> [u8; FRAME_HEADER_BYTES] {
        let mut buffer = [0u8; FRAME_HEADER_BYTES];
        buffer[..4].copy_from_slice(&self.filename_len.to_le_bytes());
        buffer[4..].copy_from_slice(&self.content_len.to_le_bytes());
        buffer
    }
}

/// 帧头长度字段的取值，超出 `u32` 范围时报错而不是截断。
fn header_field(field: &'static str, len: usize) -> Result<u32, FrameError> {
    u32::try_from(len).map_err(|_| FrameError::Oversized { field, len })
}

/// 将文件名与内容序列化为帧比特流。
///
/// # Errors
///
/// 文件名字符数或内容字节数超过 `u32::MAX` 时返回 [`FrameError::Oversized`]。
pub fn build_file_frame(filename: &str, content: &[u8]) -> Result<BitStream, FrameError> {
    let header = FrameHeader {
        filename_len: header_field("filename", filename.chars().count())?,
        content_len: header_field("content", content.len())?,
    };

    let mut frame = bits::bytes_to_bits(&header.to_bytes());
    frame.extend(bits::text_to_bits(filename));
    frame.extend(bits::bytes_to_bits(content));
    Ok(frame)
}

/// 从帧比特流中解析出文件名与内容。
///
/// 帧体之后多余的比特会被忽略。
///
/// # Errors
///
/// * 比特数不足以容纳帧头。
/// * 文件名长度达到或超过合理上限。
/// * 帧头声明的长度超过剩余比特数。
pub fn parse_file_frame(bits: &[bool]) -> Result<(String, Vec<u8>), FrameError> {
    let header = FrameHeader::peek(bits)?;
    if header.filename_len >= MAX_FILENAME_LEN {
        return Err(FrameError::ImplausibleFilename(header.filename_len));
    }

    let body = &bits[FRAME_HEADER_BITS..];
    let declared =
        (u64::from(header.filename_len) + u64::from(header.content_len)) * BITS_PER_BYTE as u64;
    if declared > body.len() as u64 {
        return Err(FrameError::TruncatedBody {
            declared,
            available: body.len(),
        });
    }

    let (name_bits, rest) = body.split_at(header.filename_len as usize * BITS_PER_BYTE);
    let content_bits = &rest[..header.content_len as usize * BITS_PER_BYTE];

    Ok((
        bits::bits_to_text(name_bits),
        bits::bits_to_bytes(content_bits),
    ))
}
