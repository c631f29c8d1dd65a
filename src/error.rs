//! # 错误类型模块
//!
//! 定义隐写编解码器与消息解析过程中可能出现的所有错误。

use thiserror::Error;

/// 隐写编码、解码或消息解析失败时返回的错误。
///
/// 所有错误都是本地的、不可重试的；要么整条记录完整往返，要么调用直接失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 消息中没有任何整数，无法确定统一位宽。
    #[error("The message is empty. At least one number is required.")]
    EmptyMessage,

    /// 消息长度超出了长度字段能表示的范围。
    #[error("Max message length exceeded. Message is {length}, max allowed is {max}")]
    MessageTooLong { length: usize, max: usize },

    /// 载体缓冲区容纳不下长度字段、宽度字段和负载。
    #[error("The image is too small to hold the entire message. Required: {required} bits, Available: {available} bits")]
    BufferTooSmall { required: usize, available: usize },

    /// 记录头声明的数据量超出了缓冲区的实际长度。
    #[error("The hidden record is truncated. Required: {required} bits, Available: {available} bits")]
    TruncatedStream { required: usize, available: usize },

    /// 记录头声明的位宽无法表示为 `u64`。
    #[error("Unsupported number width in the hidden record: {width} bits")]
    UnsupportedWidth { width: u32 },

    /// 消息文本中出现了无法解析为非负整数的片段。
    #[error("Invalid number '{token}' at position {position}")]
    InvalidNumber { token: String, position: usize },
}
