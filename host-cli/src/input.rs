//! # Input 模块
//!
//! 将玩家输入的一行文本转换为选项索引。
//!
//! 玩家看到的编号从 1 开始，Runtime 的索引从 0 开始。

use thiserror::Error;

/// 输入错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// 空输入
    #[error("请输入数字！")]
    Empty,

    /// 不是有效编号
    #[error("请输入 1 到 {max} 之间的数字")]
    OutOfRange { max: usize },
}

/// 解析玩家输入的选项编号
///
/// 只读取开头的数字部分（`2abc` 视为 `2`），返回从 0 开始的索引。
pub fn parse_selection(line: &str, choice_count: usize) -> Result<usize, SelectionError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(SelectionError::Empty);
    }

    let out_of_range = SelectionError::OutOfRange { max: choice_count };
    let digits = line.strip_prefix('+').unwrap_or(line);
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    let number: usize = digits[..len].parse().map_err(|_| out_of_range.clone())?;

    if number == 0 || number > choice_count {
        return Err(out_of_range);
    }
    Ok(number - 1)
}
