/// 长度字段占用的位数。
/// 每个位隐藏在一个像素字节的最低有效位中，因此长度字段占用 16 个像素字节。
pub const LENGTH_BITS: usize = 16;

/// 宽度字段占用的位数，记录负载中每个整数统一使用的位宽 `W`。
pub const WIDTH_BITS: usize = 24;

/// 记录头 (长度字段 + 宽度字段) 的总位数。
pub const HEADER_BITS: usize = LENGTH_BITS + WIDTH_BITS;

/// 一条消息最多可以包含的整数个数，即 16 位长度字段能表示的最大值。
pub const MAX_MESSAGE_LEN: usize = (1 << LENGTH_BITS) - 1;

/// 单个整数的最大位宽。整数按 `u64` 处理。
pub const MAX_VALUE_BITS: u32 = u64::BITS;

/// 恢复后的整数写入文本文件时，每行的个数。
pub const NUMBERS_PER_LINE: usize = 16;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const HIDE_OUTPUT_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复结果文本的文件名前缀。
pub const RECOVER_OUTPUT_PREFIX: &str = "recovered_";
