//! # 密码校验模块
//!
//! 提供非空密码时，将密码 SHA-256 摘要的十六进制文本编码为 512 bits 并置于比特流开头；
//! 提取时比对并剥离该前缀。空密码不添加也不剥离任何内容。

use crate::bits::{self, BitStream};
use crate::constants::DIGEST_BITS;
use crate::error::StegoError;
use sha2::{Digest, Sha256};

/// 计算密码的 SHA-256 摘要，返回 64 个小写十六进制字符。
pub fn digest_hex(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// 若密码非空，在比特流前追加密码摘要。
pub fn prepare(payload: BitStream, password: &str) -> BitStream {
    if password.is_empty() {
        return payload;
    }

    let mut bits = bits::text_to_bits(&digest_hex(password));
    bits.extend(payload);
    bits
}

/// 校验并剥离密码摘要，返回剩余的载荷比特。
///
/// # Errors
///
/// 密码非空且比特数不足 512，或摘要不一致时返回 [`StegoError::AuthFailure`]。
pub fn verify<'a>(bits: &'a [bool], password: &str) -> Result<&'a [bool], StegoError> {
    if password.is_empty() {
        return Ok(bits);
    }
    if bits.len() < DIGEST_BITS {
        return Err(StegoError::AuthFailure);
    }

    let (stored, payload) = bits.split_at(DIGEST_BITS);
    if bits::bits_to_text(stored) != digest_hex(password) {
        return Err(StegoError::AuthFailure);
    }

    Ok(payload)
}
