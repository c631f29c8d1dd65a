//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复一串非负整数。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复一串非负整数。\n每个像素通道字节隐藏 1 位：16 位个数、24 位位宽，随后是等宽的各个整数。"
)]
pub struct Cli {
    /// 输出更详细的日志 (-v 为 info，-vv 为 debug，-vvv 为 trace)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文本文件中的整数。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的整数。
    Recover(RecoverArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的整数所在的文本文件路径，整数之间以空白分隔。
    #[arg(short, long)]
    pub numbers: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 省略时在输入图像旁生成 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时直接覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏整数数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复整数后，保存文本内容的输出路径。
    /// 省略时在图像旁生成 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub numbers: Option<PathBuf>,

    /// 输出文件已存在时直接覆盖。
    #[arg(short, long)]
    pub force: bool,
}
