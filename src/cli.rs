//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本与文件，支持密码保护。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本与文件，支持密码保护。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 inspect (分析)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在图像中隐藏一段文本或一个文件。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本或文件。
    Recover(RecoverArgs),

    /// 分析图像的隐写容量与 LSB 分布。
    Inspect(InspectArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "file"])))]
pub struct HideArgs {
    /// 用于隐写的载体图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本。每个字符按一个字节编码，仅保证 Latin-1 范围内的字符可以还原。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文件路径，文件名会一同保存。
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 输出图像路径。仅支持 PNG 与 BMP，其他扩展名会改为 `.png`。
    /// 未指定时保存为载体图像同目录下的 `<名称>_embedded.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 访问密码。为空时不启用密码保护。
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// 目标文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏时使用的密码。
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// 恢复内容的保存路径。
    /// 未指定时，文本直接打印到标准输出，文件保存到图像所在目录并沿用原文件名。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 要分析的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
