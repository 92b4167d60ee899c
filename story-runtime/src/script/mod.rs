//! # Script 模块
//!
//! 脚本加载相关功能，包括场景图定义和选项条件。
//!
//! ## 模块结构
//!
//! - [`ast`]：场景图定义
//! - [`condition`]：选项可见性条件
//! - [`document`]：脚本文档格式

pub mod ast;
pub mod condition;
pub mod document;

pub use ast::*;
pub use condition::{CompareOp, Condition, EvalContext, evaluate_condition};
pub use document::{ChoiceDocument, SceneDocument, ScriptDocument};
