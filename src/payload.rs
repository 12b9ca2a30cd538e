//! # 载荷模块
//!
//! 被隐藏的数据：一段文本，或一个带文件名的完整文件。

use crate::bits::{self, BitStream};
use crate::error::FrameError;
use crate::frame::{self, FrameHeader};
use log::debug;

/// 嵌入前或提取后的载荷。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// 纯文本，每个字符按一个字节编码，不加帧头。
    Text(String),

    /// 文件名与文件内容，按文件帧格式编码。
    File { name: String, content: Vec<u8> },
}

impl Payload {
    /// 编码为待嵌入的比特流 (不含密码摘要与结束标记)。
    ///
    /// # Errors
    ///
    /// 文件过大、无法写入帧头时返回 [`FrameError::Oversized`]。
    pub fn to_bits(&self) -> Result<BitStream, FrameError> {
        match self {
            Self::Text(text) => Ok(bits::text_to_bits(text)),
            Self::File { name, content } => frame::build_file_frame(name, content),
        }
    }

    /// 根据恢复出的比特流判断载荷类型并解码。
    ///
    /// 至少 64 bits 且帧头可信 (见 [`FrameHeader::is_plausible`]) 时按文件帧解析，
    /// 否则按文本解码。
    ///
    /// # Errors
    ///
    /// 帧头可信但声明的长度超出剩余数据时返回 [`FrameError`]。
    pub fn from_bits(bits: &[bool]) -> Result<Self, FrameError> {
        match FrameHeader::peek(bits) {
            Ok(header) if header.is_plausible() => {
                debug!(
                    "file frame header: {} name bytes, {} content bytes",
                    header.filename_len, header.content_len
                );
                let (name, content) = frame::parse_file_frame(bits)?;
                Ok(Self::File { name, content })
            }
            _ => Ok(Self::Text(bits::bits_to_text(bits))),
        }
    }
}
