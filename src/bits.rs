//! # 比特流编解码模块
//!
//! 在文本/字节与按顺序排列的比特序列之间转换。每个字节按高位在前 (MSB-first) 展开为 8 个比特。
//!
//! 文本按“每个字符占一个字节”处理：字符的码点被截断为低 8 位。
//! 码点超过 U+00FF 的字符无法往返还原，这是已知限制，本模块不做校验。

use crate::constants::BITS_PER_BYTE;

/// 单次操作中构建的比特流。
pub type BitStream = Vec<bool>;

/// 将单个字节按 MSB-first 顺序追加到比特流。
fn push_byte(bits: &mut BitStream, byte: u8) {
    bits.extend((0..BITS_PER_BYTE).rev().map(|shift| (byte >> shift) & 1 == 1));
}

/// 将 8 个比特 (MSB-first) 组装为一个字节。
fn pack_byte(chunk: &[bool]) -> u8 {
    chunk
        .iter()
        .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
}

/// 将原始字节序列转换为比特流。
pub fn bytes_to_bits(bytes: &[u8]) -> BitStream {
    let mut bits = Vec::with_capacity(bytes.len() * BITS_PER_BYTE);
    for &byte in bytes {
        push_byte(&mut bits, byte);
    }
    bits
}

/// 将比特流还原为字节序列。不足 8 位的尾部分组会被丢弃。
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_BYTE).map(pack_byte).collect()
}

/// 将文本转换为比特流，每个字符占 8 bits。
///
/// 码点大于 255 的字符只保留低 8 位。
pub fn text_to_bits(text: &str) -> BitStream {
    let mut bits = Vec::with_capacity(text.len() * BITS_PER_BYTE);
    for ch in text.chars() {
        push_byte(&mut bits, u32::from(ch) as u8);
    }
    bits
}

/// 将比特流还原为文本，每 8 bits 映射为码点相同的字符。
pub fn bits_to_text(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|chunk| char::from(pack_byte(chunk)))
        .collect()
}
