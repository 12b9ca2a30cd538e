//! # lsb_cloak 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：比特流编解码、文件帧、密码校验、
//! LSB 通道读写、无损输出格式选择，以及命令行前端的处理函数。

// 声明库包含的所有模块。

pub mod analysis;
pub mod bits;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod handler;
pub mod password;
pub mod payload;
pub mod pixels;
pub mod steganography;

pub use engine::{embed, embed_grid, extract, extract_grid};
pub use error::{FrameError, StegoError};
pub use payload::Payload;
pub use pixels::{ChannelMode, PixelGrid};
