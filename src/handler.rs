//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::Carrier;
use crate::cli::{HideArgs, RecoverArgs};
use crate::constants::{HIDE_OUTPUT_PREFIX, RECOVER_OUTPUT_PREFIX};
use crate::error::StegoError;
use crate::message::{format_numbers, parse_numbers};
use crate::steganography::{decode, encode, read_header};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 'Hide' 命令的默认输出路径：输入图像所在目录下的 `doctored_<文件名>.png`。
pub fn default_hide_dest(image: &Path) -> PathBuf {
    image.with_file_name(format!("{HIDE_OUTPUT_PREFIX}{}.png", file_stem(image)))
}

/// 'Recover' 命令的默认输出路径：图像所在目录下的 `recovered_<文件名>.txt`。
pub fn default_recover_dest(image: &Path) -> PathBuf {
    image.with_file_name(format!("{RECOVER_OUTPUT_PREFIX}{}.txt", file_stem(image)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 未指定 `--force` 时，拒绝覆盖已存在的输出文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和整数文件、调用隐写核心函数写入长度、位宽和各个整数，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或整数文件，或整数文件中含有非法内容。
/// * 图像文件没有足够的空间来隐藏这些整数，或整数个数超出上限。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_hide_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    let text = fs::read_to_string(&args.numbers).with_context(|| {
        format!(
            "Unable to read numbers file: {}",
            args.numbers.to_string_lossy().red().bold()
        )
    })?;

    let numbers = parse_numbers(&text).with_context(|| {
        format!(
            "Unable to parse numbers file: {}",
            args.numbers.to_string_lossy().red().bold()
        )
    })?;

    let mut picture = Carrier::open(&args.image)?;

    encode(picture.pixels_mut(), &numbers).map_err(|err| match err {
        StegoError::BufferTooSmall { required, available } => anyhow!(
            "Not enough space in the image to hide the numbers. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context(format!(
            "Failed to hide {} numbers in the image.",
            numbers.len().to_string().red().bold()
        )),
    })?;

    info!(
        "hid {} numbers in {}",
        numbers.len(),
        args.image.display()
    );

    picture.save(&dest)?;

    println!(
        "The numbers have been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数获取全部整数，
/// 最后将排版后的整数写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 隐藏的记录被截断或不完整 (图像中可能没有隐藏数据)。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .numbers
        .unwrap_or_else(|| default_recover_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    let picture = Carrier::open(&args.image)?;

    let header = read_header(picture.pixels()).with_context(|| {
        format!(
            "Failed to read the hidden record header from '{}'. \nThe image is too small to contain hidden numbers.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "{} declares {} numbers of {} bits ({} of {} bytes)",
        args.image.display(),
        header.length,
        header.width,
        header.record_bits(),
        picture.capacity_bits()
    );

    let numbers = decode(picture.pixels()).with_context(|| {
        format!(
            "Failed to recover numbers from '{}'. \nThe image may not contain hidden numbers or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, format_numbers(&numbers)).with_context(|| {
        format!(
            "Unable to write to target numbers file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} numbers have been successfully recovered and saved: {}",
        numbers.len().to_string().green().bold(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
