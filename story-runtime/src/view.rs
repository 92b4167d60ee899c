//! # View 模块
//!
//! Runtime 交给 Host 的渲染快照。
//!
//! ## 设计原则
//!
//! - **声明式**：只描述"显示什么"，不描述"怎么显示"
//! - **引擎无关**：Host 可以是终端、网页或任何其他界面
//! - 可序列化，便于 Host 以 JSON 形式转发

use serde::{Deserialize, Serialize};

/// 可见选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    /// 在可见选项中的索引（从 0 开始），即 `choose` 的参数
    pub index: usize,
    /// 选项显示文本
    pub text: String,
}

/// 场景渲染快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneView {
    /// 当前场景 ID
    pub scene_id: String,
    /// 处理后的场景文本
    pub text: String,
    /// 可见选项
    pub choices: Vec<ChoiceView>,
    /// 没有可见选项时为 true
    pub finished: bool,
}

impl SceneView {
    /// 可见选项数量
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }
}
