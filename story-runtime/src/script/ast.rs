//! # AST 模块
//!
//! 定义脚本的场景图。
//!
//! ## 设计说明
//!
//! 场景图是脚本文档加载后的结构化表示：场景 ID 到场景的映射，
//! 每个场景持有有序的选项列表。选项顺序决定了玩家看到的编号。
//! 场景图加载后不可变，重新加载时整体替换。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;
use crate::script::document::ScriptDocument;

/// 选项
///
/// 场景图中的一条边。目标场景在加载时不做校验，选择时才解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// 选项显示文本（不做变量插值）
    pub text: String,
    /// 目标场景 ID
    pub next: String,
    /// 可见性条件（None 表示始终可见）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Choice {
    /// 创建无条件选项
    pub fn new(text: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
            condition: None,
        }
    }

    /// 设置可见性条件
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 场景 ID
    pub id: String,
    /// 原始文本模板（可包含 `{set ...}` 指令与 `{var}` 占位符）
    pub text: String,
    /// 有序选项列表
    pub choices: Vec<Choice>,
}

impl Scene {
    /// 创建没有选项的场景
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// 追加选项
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// 加载后的脚本
///
/// 包含场景列表和场景 ID 索引。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// 脚本标识符
    pub id: String,
    /// 场景列表
    scenes: Vec<Scene>,
    /// 场景 ID 到列表下标的映射
    scene_index: HashMap<String, usize>,
}

impl Script {
    /// 创建新脚本
    ///
    /// 场景 ID 重复时后出现的场景覆盖先出现的。
    pub fn new(id: impl Into<String>, scenes: Vec<Scene>) -> Self {
        let mut script = Self {
            id: id.into(),
            scenes: Vec::with_capacity(scenes.len()),
            scene_index: HashMap::new(),
        };
        for scene in scenes {
            script.insert_scene(scene);
        }
        script
    }

    /// 从脚本文档构建
    pub fn from_document(id: impl Into<String>, document: ScriptDocument) -> Self {
        let scenes = document
            .scenes
            .into_iter()
            .map(|(scene_id, data)| Scene {
                id: scene_id,
                text: data.text,
                choices: data
                    .choices
                    .into_iter()
                    .map(|c| Choice {
                        text: c.text,
                        next: c.next,
                        condition: c.condition,
                    })
                    .collect(),
            })
            .collect();
        Self::new(id, scenes)
    }

    /// 从 JSON 文本解析
    ///
    /// 解析失败时不会产生任何部分结果。
    pub fn from_json_str(id: impl Into<String>, text: &str) -> Result<Self, ScriptError> {
        let id = id.into();
        let document: ScriptDocument =
            serde_json::from_str(text).map_err(|e| ScriptError::InvalidDocument {
                script_id: id.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::from_document(id, document))
    }

    fn insert_scene(&mut self, scene: Scene) {
        match self.scene_index.get(&scene.id) {
            Some(&index) => self.scenes[index] = scene,
            None => {
                self.scene_index.insert(scene.id.clone(), self.scenes.len());
                self.scenes.push(scene);
            }
        }
    }

    /// 根据 ID 查找场景
    pub fn get_scene(&self, id: &str) -> Option<&Scene> {
        self.scene_index.get(id).map(|&index| &self.scenes[index])
    }

    /// 场景是否存在
    pub fn contains_scene(&self, id: &str) -> bool {
        self.scene_index.contains_key(id)
    }

    /// 所有场景（按加载顺序）
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// 场景数量
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
