//! # lsb_numbers 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：把一串非负整数隐藏到图像像素字节的最低位中，
//! 以及从中恢复出来。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod message;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{decode, encode};
