//! # 消息文本模块
//!
//! 在整数序列与文本之间转换：隐藏前解析以空白分隔的非负整数，恢复后按行排版输出。

use crate::constants::NUMBERS_PER_LINE;
use crate::error::StegoError;

/// 解析以任意空白 (空格、制表符、换行) 分隔的非负整数。
///
/// 空文本得到空序列，由编码器决定是否接受。
///
/// # Errors
///
/// 任一片段无法解析为 `u64` 时返回 [`StegoError::InvalidNumber`]，
/// 其中 `position` 是该片段的序号 (从 1 开始)。
pub fn parse_numbers(text: &str) -> Result<Vec<u64>, StegoError> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token.parse::<u64>().map_err(|_| StegoError::InvalidNumber {
                token: token.to_string(),
                position: i + 1,
            })
        })
        .collect()
}

/// 把整数序列排版成文本：同一行内以空格分隔，每行 [`NUMBERS_PER_LINE`] 个，每行以换行结尾。
pub fn format_numbers(numbers: &[u64]) -> String {
    numbers
        .chunks(NUMBERS_PER_LINE)
        .map(|line| {
            let mut line = line
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            line.push('\n');
            line
        })
        .collect()
}
