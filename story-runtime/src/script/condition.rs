//! # 条件模块
//!
//! 选项可见性条件的解析与求值。
//!
//! ## 语法
//!
//! 条件只有一个二元比较：`<变量名> <运算符> <字面量>`，例如 `score >= 10`、
//! `hasKey == true`。不支持嵌套或 `and`/`or` 组合。
//!
//! ## 运算符识别
//!
//! 按 `==`、`!=`、`>=`、`<=`、`>`、`<` 的顺序检查条件中是否**包含**该运算符，
//! 取第一个命中的运算符进行切分。顺序不可调整：`>=` 必须先于 `>` 检查，
//! 否则 `a >= 1` 会被切成 `a` 和 `= 1`。
//!
//! ## 求值
//!
//! - 左操作数按变量名查找，变量可以不存在
//! - 右操作数按字面量规则解析（见 [`Value::parse_literal`]）
//! - `==`/`!=` 为严格相等，不做类型转换
//! - 有序比较在左操作数缺失时恒为 false

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConditionError;
use crate::value::Value;

/// 求值上下文
///
/// 提供变量查找能力
pub trait EvalContext {
    /// 获取变量值
    fn get_var(&self, name: &str) -> Option<&Value>;
}

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl CompareOp {
    /// 运算符的识别顺序
    pub const PRECEDENCE: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::NotEq,
        CompareOp::GtEq,
        CompareOp::LtEq,
        CompareOp::Gt,
        CompareOp::Lt,
    ];

    /// 运算符的源码形式
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    /// 找出条件文本中第一个命中的运算符
    pub fn find_in(source: &str) -> Option<CompareOp> {
        Self::PRECEDENCE
            .into_iter()
            .find(|op| source.contains(op.symbol()))
    }

    /// 对两个操作数应用运算符
    ///
    /// `left` 为 `None` 表示变量未定义。
    pub fn apply(self, left: Option<&Value>, right: &Value) -> bool {
        let equal = || left.is_some_and(|l| l.strict_eq(right));
        let ordering = || left.and_then(|l| l.compare(right));
        match self {
            Self::Eq => equal(),
            Self::NotEq => !equal(),
            Self::GtEq => ordering().is_some_and(|o| o != Ordering::Less),
            Self::LtEq => ordering().is_some_and(|o| o != Ordering::Greater),
            Self::Gt => ordering() == Some(Ordering::Greater),
            Self::Lt => ordering() == Some(Ordering::Less),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 解析后的条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// 左侧变量名
    pub variable: String,
    /// 比较运算符
    pub op: CompareOp,
    /// 右侧字面量
    pub operand: Value,
}

impl Condition {
    /// 解析条件文本
    ///
    /// 条件中出现多次运算符时，右操作数只取第一处与第二处之间的部分。
    pub fn parse(source: &str) -> Result<Self, ConditionError> {
        let op = CompareOp::find_in(source).ok_or_else(|| ConditionError::MissingOperator {
            condition: source.to_string(),
        })?;

        let mut parts = source.split(op.symbol());
        let left = parts.next().unwrap_or_default();
        let right = parts.next().unwrap_or_default();

        Ok(Self {
            variable: left.trim().to_string(),
            op,
            operand: Value::parse_literal(right),
        })
    }

    /// 在给定上下文中求值
    pub fn evaluate(&self, ctx: &impl EvalContext) -> bool {
        self.op.apply(ctx.get_var(&self.variable), &self.operand)
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 对可选条件求值
///
/// 没有条件（`None` 或空字符串）时选项始终可见。
/// 条件无效时返回错误，调用方应将其视为不可见。
pub fn evaluate_condition(
    condition: Option<&str>,
    ctx: &impl EvalContext,
) -> Result<bool, ConditionError> {
    match condition {
        None | Some("") => Ok(true),
        Some(source) => Ok(Condition::parse(source)?.evaluate(ctx)),
    }
}
