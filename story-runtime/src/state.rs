//! # State 模块
//!
//! 定义会话的全局变量状态。
//!
//! ## 设计原则
//!
//! - 状态由 [`StoryRuntime`](crate::StoryRuntime) 显式持有，不存在隐式全局状态
//! - 变量只通过场景文本中的 `{set ...}` 指令写入
//! - 每个会话拥有独立的状态，加载新脚本时重置

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::script::condition::EvalContext;
use crate::value::Value;

/// 全局变量状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// 脚本变量
    pub variables: HashMap<String, Value>,
}

impl GameState {
    /// 创建空状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置变量
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// 获取变量
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// 变量是否已定义
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// 清空所有变量
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// 变量数量
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl EvalContext for GameState {
    fn get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}
