//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用隐写引擎以及向用户报告结果。

use crate::analysis::{ImageReport, Suitability};
use crate::cli::{HideArgs, InspectArgs, RecoverArgs};
use crate::constants::EMBEDDED_SUFFIX;
use crate::engine;
use crate::error::StegoError;
use crate::format;
use crate::payload::Payload;
use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 恢复出的文件名无法作为路径使用时的替代名称。
const FALLBACK_RECOVERED_NAME: &str = "recovered.bin";

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取要隐藏的文本或文件、确定输出路径、调用隐写引擎完成嵌入，
/// 并报告实际写入的文件路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与密码的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取要隐藏的文件或载体图像。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间容纳载荷 (此时不会写出任何文件)。
/// * 无法写入目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let payload = read_payload(&args)?;

    let requested = args
        .dest
        .clone()
        .unwrap_or_else(|| default_embed_path(&args.image));
    let (output, _) = format::resolve(&requested);
    ensure_writable(&output, args.force)?;

    let written = engine::embed(&args.image, &payload, &requested, &args.password).map_err(
        |err| match err {
            StegoError::Capacity => anyhow!(
                "Not enough space in the image to hide the payload. \nThe cover image {} was left unmodified.",
                args.image.to_string_lossy().green().bold()
            ),
            other => anyhow::Error::new(other).context(format!(
                "Failed to hide the payload in image: {}",
                args.image.to_string_lossy().red().bold()
            )),
        },
    )?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        written.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责从图像中提取载荷：文本写入指定文件或打印到标准输出，
/// 文件写入指定路径或图像所在目录。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 图像中没有隐藏数据，或密码不正确 (两者的提示相同)。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let payload = engine::extract(&args.image, &args.password).map_err(|err| match err {
        StegoError::NotFound | StegoError::AuthFailure => anyhow!(
            "No hidden data found in '{}'. \nThe image may not contain hidden data, or the password is incorrect.",
            args.image.to_string_lossy().red().bold()
        ),
        other => anyhow::Error::new(other).context(format!(
            "Failed to recover hidden data from '{}'.",
            args.image.to_string_lossy().red().bold()
        )),
    })?;

    match payload {
        Payload::Text(text) => match &args.output {
            Some(path) => {
                write_output(path, text.as_bytes(), args.force)?;
                println!(
                    "The text has been successfully recovered and saved: {}",
                    path.to_string_lossy().green().bold()
                );
            }
            None => println!("{text}"),
        },
        Payload::File { name, content } => {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| args.image.with_file_name(safe_file_name(&name)));
            write_output(&path, &content, args.force)?;
            println!(
                "The file {} ({} bytes) has been successfully recovered and saved: {}",
                name.yellow().bold(),
                content.len().to_string().green(),
                path.to_string_lossy().green().bold()
            );
        }
    }

    Ok(())
}

/// 处理 'Inspect' 命令的执行逻辑：打印图像的隐写容量与 LSB 分布分析。
///
/// # Errors
///
/// 图像无法读取或解码时返回错误。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let report = ImageReport::inspect(&args.image).with_context(|| {
        format!(
            "Unable to analyze image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let format_name = report
        .format
        .map_or_else(|| "unknown".to_string(), |f| format!("{f:?}"));

    println!("{}", "Image analysis".bold());
    println!("  File:     {}", args.image.to_string_lossy());
    println!("  Format:   {format_name}");
    println!("  Mode:     {} ({} channels)", report.mode, report.mode.channels());
    println!("  Size:     {}x{} pixels", report.width, report.height);
    println!("  On disk:  {} bytes", report.file_size);
    println!(
        "  Capacity: {} bits (~{} bytes of payload)",
        report.capacity_bits.to_string().green().bold(),
        report.capacity_bytes().to_string().green().bold()
    );

    let verdict = match report.suitability() {
        Suitability::Lossless => "lossless container, LSB changes are preserved".green(),
        Suitability::Lossy => "lossy compression destroys LSB data, convert to PNG first".red(),
        Suitability::Palette => "palette format, LSB changes may not survive".yellow(),
        Suitability::Unknown => "compatibility unknown, PNG is recommended".yellow(),
    };
    println!("  Verdict:  {verdict}");

    let sample = report.lsb_sample;
    println!(
        "  LSB sample: {} ones, {} zeros, ratio {:.3} ({})",
        sample.ones,
        sample.zeros,
        sample.ratio(),
        if sample.looks_natural() {
            "normal distribution"
        } else {
            "unusual distribution"
        }
    );

    if let Some(password) = report.guessed_password {
        println!(
            "  {} common password: {}",
            "Hidden data detected (password protected),".green().bold(),
            password.yellow().bold()
        );
    } else if report.unprotected_data {
        println!("  {}", "Hidden data detected (no password required).".green().bold());
    } else {
        println!("  No obvious hidden data found (it may require a specific password).");
    }

    Ok(())
}

/// 根据参数构建载荷。
fn read_payload(args: &HideArgs) -> Result<Payload> {
    match (&args.message, &args.file) {
        (Some(message), _) => {
            warn_if_not_latin1(message, "message");
            Ok(Payload::Text(message.clone()))
        }
        (None, Some(path)) => {
            let content = fs::read(path).with_context(|| {
                format!(
                    "Unable to read file to hide: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .with_context(|| {
                    format!(
                        "The path {} does not name a file.",
                        path.to_string_lossy().red().bold()
                    )
                })?;
            warn_if_not_latin1(&name, "file name");
            debug!("hiding file {name} ({} bytes)", content.len());
            Ok(Payload::File { name, content })
        }
        (None, None) => bail!("Nothing to hide: pass either --message or --file."),
    }
}

/// 每个字符只保留一个字节，超出 Latin-1 的字符无法还原。
fn warn_if_not_latin1(text: &str, what: &str) {
    if text.chars().any(|ch| u32::from(ch) > 0xFF) {
        warn!("the {what} contains characters outside Latin-1; they will not be recovered intact");
    }
}

/// 载体图像同目录下的 `<名称>_embedded.png`。
fn default_embed_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "image".into(), |stem| stem.to_string_lossy());
    image.with_file_name(format!("{stem}{EMBEDDED_SUFFIX}.png"))
}

/// 只保留恢复出的文件名的最后一个路径分量，防止写到图像目录之外。
fn safe_file_name(name: &str) -> PathBuf {
    Path::new(name)
        .file_name()
        .map_or_else(|| PathBuf::from(FALLBACK_RECOVERED_NAME), PathBuf::from)
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Output file already exists: {}. \nUse --force to overwrite it.",
            path.to_string_lossy().red().bold()
        );
    }
    Ok(())
}

fn write_output(path: &Path, data: &[u8], force: bool) -> Result<()> {
    ensure_writable(path, force)?;
    fs::write(path, data).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
