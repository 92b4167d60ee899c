//! # Error 模块
//!
//! 定义 story-runtime 中使用的错误类型。
//!
//! 所有错误都是"可恢复"的：返回错误时 Runtime 的场景图、游标与全局状态都不会被修改。

use thiserror::Error;

/// 脚本文档错误（脚本读取/解析边界）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// 文档不是合法的脚本 JSON
    #[error("脚本 '{script_id}' 解析失败: {message}")]
    InvalidDocument { script_id: String, message: String },
}

/// 条件表达式错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditionError {
    /// 条件中找不到任何比较运算符
    #[error("条件 '{condition}' 中没有可识别的运算符")]
    MissingOperator { condition: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 场景未找到
    #[error("场景 '{scene_id}' 未找到")]
    SceneNotFound { scene_id: String },

    /// 脚本缺少入口场景
    #[error("脚本缺少入口场景 '{entry}'")]
    MissingStartScene { entry: String },

    /// 无效的选择索引
    #[error("无效的选择索引 {index}，有效范围是 0..{max}")]
    InvalidChoiceIndex { index: usize, max: usize },
}
