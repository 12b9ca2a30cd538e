/// 数据结束标记：15 个 1 后接一个 0。
/// 嵌入时追加在整个比特流末尾，提取时以其第一次出现的位置作为数据终点。
pub const DELIMITER: [bool; 16] = [
    true, true, true, true, true, true, true, true, true, true, true, true, true, true, true,
    false,
];

/// 每个字节/字符编码后占用的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 密码摘要的十六进制字符数 (SHA-256 = 32 字节 = 64 个十六进制字符)。
pub const DIGEST_HEX_LEN: usize = 64;

/// 密码摘要编码后占用的比特数：64 个字符，每个字符 8 bits。
pub const DIGEST_BITS: usize = DIGEST_HEX_LEN * BITS_PER_BYTE;

/// 文件帧头部大小 (字节)：`u32` 文件名长度 + `u32` 内容长度，均为小端序。
pub const FRAME_HEADER_BYTES: usize = 8;

/// 文件帧头部占用的比特数。
pub const FRAME_HEADER_BITS: usize = FRAME_HEADER_BYTES * BITS_PER_BYTE;

/// 文件名长度的合理上限 (不含)。
/// 超过该值的头部被视为随机数据碰巧匹配，而不是真正的文件帧。
pub const MAX_FILENAME_LEN: u32 = 1000;

/// 未指定输出路径时，隐写结果文件名追加的后缀。
pub const EMBEDDED_SUFFIX: &str = "_embedded";

/// LSB 分布抽样最多检查的像素数。
pub const LSB_SAMPLE_PIXELS: usize = 1000;

/// LSB 分布抽样的像素步长。
pub const LSB_SAMPLE_STRIDE: usize = 10;

/// `inspect` 探测隐藏数据时尝试的常见密码。
pub const COMMON_PASSWORDS: [&str; 4] = ["password", "123456", "secret", "hidden"];
