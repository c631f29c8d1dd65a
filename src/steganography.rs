//! # 隐写核心模块
//!
//! 把一串非负整数编码进像素字节流的最低有效位 (LSB)，以及从中精确地恢复出来。
//!
//! 记录布局 (每个像素字节隐藏 1 位，从偏移 0 开始，高位在前)：
//!
//! | 字段     | 位数                 | 内容                     |
//! |----------|----------------------|--------------------------|
//! | 长度字段 | [`LENGTH_BITS`]      | 消息中整数的个数         |
//! | 宽度字段 | [`WIDTH_BITS`]       | 每个整数统一使用的位宽 W |
//! | 负载     | 个数 × W             | 左侧补零到 W 位的各整数  |

use crate::constants::{HEADER_BITS, LENGTH_BITS, MAX_MESSAGE_LEN, MAX_VALUE_BITS, WIDTH_BITS};
use crate::error::StegoError;
use log::{debug, trace};

/// 从记录头中读出的两个前缀字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// 消息中整数的个数。
    pub length: usize,
    /// 每个整数占用的位数。
    pub width: u32,
}

impl Header {
    /// 整条记录 (头部 + 负载) 占用的像素字节数。
    pub fn record_bits(&self) -> usize {
        required_bits(self.length, self.width)
    }
}

/// 清除 `byte` 的最低位，并在 `bit` 为真时将其置 1，其余 7 位保持不变。
#[inline]
pub fn set_lsb(byte: u8, bit: bool) -> u8 {
    (byte & 0xFE) | bit as u8
}

/// 返回 `byte` 的最低位。
#[inline]
pub fn get_lsb(byte: u8) -> bool {
    byte & 1 == 1
}

/// 表示 `value` 所需的二进制位数。`0` 按一位 ("0") 计算。
pub fn bit_width(value: u64) -> u32 {
    (MAX_VALUE_BITS - value.leading_zeros()).max(1)
}

/// 编码 `len` 个宽度为 `width` 的整数所需的像素字节数 (含记录头)。
pub fn required_bits(len: usize, width: u32) -> usize {
    len.saturating_mul(width as usize).saturating_add(HEADER_BITS)
}

/// 把 `value` 的低 `bits` 位 (高位在前) 写入 `pix[dix..dix + bits]` 的最低位。
pub fn modify(value: u64, pix: &mut [u8], dix: usize, bits: usize) -> Result<(), StegoError> {
    check_region(pix.len(), dix, bits)?;

    for (i, byte) in pix[dix..dix + bits].iter_mut().enumerate() {
        let bit = (value >> (bits - 1 - i)) & 1 == 1;
        *byte = set_lsb(*byte, bit);
    }

    Ok(())
}

/// 从 `pix[dix..dix + bits]` 的最低位中读出一个整数 (高位在前)。
pub fn recover(pix: &[u8], dix: usize, bits: usize) -> Result<u64, StegoError> {
    check_region(pix.len(), dix, bits)?;

    Ok(pix[dix..dix + bits]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 1) | get_lsb(byte) as u64))
}

fn check_region(available: usize, dix: usize, bits: usize) -> Result<(), StegoError> {
    if bits > MAX_VALUE_BITS as usize {
        return Err(StegoError::UnsupportedWidth { width: bits as u32 });
    }
    match dix.checked_add(bits) {
        Some(end) if end <= available => Ok(()),
        _ => Err(StegoError::TruncatedStream {
            required: dix.saturating_add(bits),
            available,
        }),
    }
}

/// 把 `message` 编码进 `pix` 的最低位。
///
/// 位宽 `W` 取消息中最大整数的位数，对每个整数统一使用。
/// 所有检查都在修改任何字节之前完成：调用要么完整成功，要么 `pix` 保持原样。
/// 成功时只改动前 [`required_bits`] 个字节的最低位。
///
/// # Errors
///
/// * [`StegoError::EmptyMessage`] - 消息为空。
/// * [`StegoError::MessageTooLong`] - 整数个数超过 [`MAX_MESSAGE_LEN`]。
/// * [`StegoError::BufferTooSmall`] - `pix` 容纳不下整条记录。
pub fn encode(pix: &mut [u8], message: &[u64]) -> Result<(), StegoError> {
    let max = message
        .iter()
        .copied()
        .max()
        .ok_or(StegoError::EmptyMessage)?;

    if message.len() > MAX_MESSAGE_LEN {
        return Err(StegoError::MessageTooLong {
            length: message.len(),
            max: MAX_MESSAGE_LEN,
        });
    }

    let width = bit_width(max);
    let required = required_bits(message.len(), width);
    if required > pix.len() {
        return Err(StegoError::BufferTooSmall {
            required,
            available: pix.len(),
        });
    }

    debug!(
        "encoding {} numbers at {} bits each, {} of {} bytes used",
        message.len(),
        width,
        required,
        pix.len()
    );

    modify(message.len() as u64, pix, 0, LENGTH_BITS)?;
    modify(width as u64, pix, LENGTH_BITS, WIDTH_BITS)?;

    let width = width as usize;
    for (i, &number) in message.iter().enumerate() {
        modify(number, pix, HEADER_BITS + i * width, width)?;
    }

    trace!("payload written, record ends at offset {}", required);
    Ok(())
}

/// 读出记录头中的长度字段和宽度字段，不读取负载。
///
/// # Errors
///
/// 缓冲区短于 [`HEADER_BITS`] 时返回 [`StegoError::TruncatedStream`]。
pub fn read_header(pix: &[u8]) -> Result<Header, StegoError> {
    if pix.len() < HEADER_BITS {
        return Err(StegoError::TruncatedStream {
            required: HEADER_BITS,
            available: pix.len(),
        });
    }

    let length = recover(pix, 0, LENGTH_BITS)? as usize;
    let width = recover(pix, LENGTH_BITS, WIDTH_BITS)? as u32;

    Ok(Header { length, width })
}

/// 从 `pix` 的最低位中恢复由 [`encode`] 写入的整数序列。
///
/// 记录头中的字段按字面值使用，不做其他合法性检查。
///
/// # Errors
///
/// * [`StegoError::TruncatedStream`] - 记录头声明的数据超出了 `pix` 的长度 (优先于位宽检查)。
/// * [`StegoError::UnsupportedWidth`] - 记录完整，但声明的位宽为 0 或超过 64。
pub fn decode(pix: &[u8]) -> Result<Vec<u64>, StegoError> {
    let header = read_header(pix)?;
    debug!(
        "hidden record: {} numbers, {} bits each, payload starts at offset {}",
        header.length, header.width, HEADER_BITS
    );

    if header.length == 0 {
        return Ok(Vec::new());
    }

    let required = header.record_bits();
    if required > pix.len() {
        return Err(StegoError::TruncatedStream {
            required,
            available: pix.len(),
        });
    }

    if header.width == 0 || header.width > MAX_VALUE_BITS {
        return Err(StegoError::UnsupportedWidth {
            width: header.width,
        });
    }

    let width = header.width as usize;
    (0..header.length)
        .map(|i| recover(pix, HEADER_BITS + i * width, width))
        .collect()
}
