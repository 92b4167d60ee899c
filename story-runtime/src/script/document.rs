//! # Document 模块
//!
//! 脚本文档的序列化格式。
//!
//! ```json
//! {
//!   "start": {
//!     "text": "{set score = 0}欢迎，{name}。",
//!     "choices": [
//!       { "text": "继续", "next": "hall" },
//!       { "text": "秘密通道", "next": "secret", "condition": "score >= 10" }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 脚本文档：场景 ID 到场景数据的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptDocument {
    pub scenes: BTreeMap<String, SceneDocument>,
}

/// 场景数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// 文本模板
    pub text: String,
    /// 选项列表
    #[serde(default)]
    pub choices: Vec<ChoiceDocument>,
}

/// 选项数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceDocument {
    /// 显示文本
    pub text: String,
    /// 目标场景 ID
    pub next: String,
    /// 可见性条件
    #[serde(default)]
    pub condition: Option<String>,
}
