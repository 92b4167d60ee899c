//! # Value 模块
//!
//! 脚本变量的运行时值，以及字面量解析。
//!
//! ## 字面量解析规则
//!
//! - 先按 JSON 字面量解析（`5`、`1.5`、`true`、`"text"`、`null`）
//! - 超出 f64 范围的 JSON 数字（如 `1e400`）解析为正负无穷
//! - 解析失败时回退为去除首尾空白后的原始字符串
//!
//! 解析永远不会失败，作者可以直接写 `{set name = Bob}` 这样的裸词。

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 脚本变量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// 布尔值
    Bool(bool),
    /// 数字（与 JSON 一致，统一为双精度浮点）
    Number(f64),
    /// 字符串
    Text(String),
    /// 空值（JSON `null`）
    Null,
}

impl Value {
    /// 创建字符串值
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// 解析原始字面量文本
    ///
    /// JSON 数组/对象不是合法的变量值，按原始字符串处理。
    pub fn parse_literal(raw: &str) -> Self {
        let trimmed = raw.trim();
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Null) => Self::Null,
            Ok(serde_json::Value::Bool(b)) => Self::Bool(b),
            Ok(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(n) => Self::Number(n),
                None => Self::text(trimmed),
            },
            Ok(serde_json::Value::String(s)) => Self::Text(s),
            Ok(serde_json::Value::Array(_) | serde_json::Value::Object(_)) => Self::text(trimmed),
            // serde_json 拒绝溢出的数字
            Err(_) if is_json_number(trimmed) => trimmed
                .parse::<f64>()
                .map_or_else(|_| Self::text(trimmed), Self::Number),
            Err(_) => Self::text(trimmed),
        }
    }

    /// 严格相等：类型不同的值永远不相等
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }

    /// 有序比较
    ///
    /// 两个字符串按字典序比较，其余组合都先转换为数字再比较。
    /// 无法比较（出现 NaN）时返回 `None`。
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// 数值转换：布尔为 0/1，空值为 0，字符串解析失败为 NaN
    fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Null => 0.0,
            Self::Text(s) => text_to_number(s),
        }
    }
}

fn text_to_number(s: &str) -> f64 {
    match s.trim() {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // f64::from_str 还接受 inf/nan 等拼写
        s if s
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) =>
        {
            f64::NAN
        }
        s => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// JSON 数字语法：`-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_json_number(s: &str) -> bool {
    let digits = |d: &str| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit());

    let s = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };

    digits(int)
        && (int == "0" || !int.starts_with('0'))
        && frac.is_none_or(digits)
        && exponent.is_none_or(|e| digits(e.strip_prefix(['+', '-']).unwrap_or(e)))
}

/// 按 JavaScript `Number.prototype.toString` 的规则格式化数字
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0 显示为 0
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    // 指数形式：1e21 -> 1e+21
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// 插值时使用的文本形式
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_literals() {
        assert_eq!(Value::parse_literal("5"), Value::Number(5.0));
        assert_eq!(Value::parse_literal(" 1.5 "), Value::Number(1.5));
        assert_eq!(Value::parse_literal("-3"), Value::Number(-3.0));
        assert_eq!(Value::parse_literal("true"), Value::Bool(true));
        assert_eq!(Value::parse_literal("false"), Value::Bool(false));
        assert_eq!(Value::parse_literal("null"), Value::Null);
        assert_eq!(
            Value::parse_literal("\"quoted text\""),
            Value::text("quoted text")
        );
    }

    #[test]
    fn test_parse_fallback_to_raw_string() {
        assert_eq!(Value::parse_literal("Bob"), Value::text("Bob"));
        assert_eq!(Value::parse_literal("  old key  "), Value::text("old key"));
        // 大写的 True 不是 JSON 布尔值
        assert_eq!(Value::parse_literal("True"), Value::text("True"));
        // 未闭合的引号
        assert_eq!(Value::parse_literal("\"abc"), Value::text("\"abc"));
        assert_eq!(Value::parse_literal(""), Value::text(""));
    }

    #[test]
    fn test_parse_out_of_range_number() {
        assert_eq!(Value::parse_literal("1e400"), Value::Number(f64::INFINITY));
        assert_eq!(
            Value::parse_literal("-1e400"),
            Value::Number(f64::NEG_INFINITY)
        );
        // 不是 JSON 数字
        assert_eq!(Value::parse_literal("01"), Value::text("01"));
        assert_eq!(Value::parse_literal("inf"), Value::text("inf"));
        assert_eq!(Value::parse_literal("1e"), Value::text("1e"));
    }

    #[test]
    fn test_parse_array_falls_back_to_text() {
        assert_eq!(Value::parse_literal("[1, 2]"), Value::text("[1, 2]"));
    }

    #[test]
    fn test_strict_equality() {
        assert!(Value::Bool(true).strict_eq(&Value::Bool(true)));
        assert!(Value::Number(10.0).strict_eq(&Value::from(10)));
        assert!(Value::Null.strict_eq(&Value::Null));

        // 不做类型转换
        assert!(!Value::text("true").strict_eq(&Value::Bool(true)));
        assert!(!Value::text("5").strict_eq(&Value::Number(5.0)));
        assert!(!Value::Number(0.0).strict_eq(&Value::Bool(false)));
    }

    #[test]
    fn test_compare_same_types() {
        assert_eq!(
            Value::from(12).compare(&Value::from(10)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::text("apple").compare(&Value::text("banana")),
            Some(Ordering::Less)
        );
        // 字符串按字典序，不按数值
        assert_eq!(
            Value::text("10").compare(&Value::text("9")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_compare_mixed_types() {
        assert_eq!(
            Value::Bool(true).compare(&Value::from(1)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::text("12").compare(&Value::from(10)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Null.compare(&Value::from(0)), Some(Ordering::Equal));
        assert_eq!(Value::text("abc").compare(&Value::from(1)), None);
        assert_eq!(Value::text("inf").compare(&Value::from(1)), None);
        assert_eq!(
            Value::text("1e400").compare(&Value::from(1)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(-2.0).to_string(), "-2");
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(0.000001).to_string(), "0.000001");
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-1.5e25).to_string(), "-1.5e+25");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::text("Bob").to_string(), "Bob");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_value_serialization() {
        let json = serde_json::to_string(&vec![
            Value::Number(5.0),
            Value::Bool(true),
            Value::text("Bob"),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(json, r#"[5.0,true,"Bob",null]"#);

        let values: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(values[0], Value::Number(5.0));
        assert_eq!(values[3], Value::Null);
    }
}
