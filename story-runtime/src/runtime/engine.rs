//! # Engine 模块
//!
//! 故事会话控制器。
//!
//! ## 执行模型
//!
//! ```text
//! load(script) -> activate("start")
//!        │
//!        ▼
//! scene_text() / available_choices()   ← Host 渲染
//!        │
//!        ▼
//! choose(index) -> activate(next)
//! ```
//!
//! 会话只有两项可变状态：当前场景 ID 和全局变量。
//! 任何失败的操作都不会修改这两项，并通过返回值和 `tracing` 警告报告。

use tracing::{debug, warn};

use crate::error::RuntimeError;
use crate::script::{Choice, Scene, Script, evaluate_condition};
use crate::state::GameState;
use crate::text::process_scene_text;
use crate::view::{ChoiceView, SceneView};

/// 入口场景 ID
pub const START_SCENE_ID: &str = "start";

/// 游标指向不存在的场景时返回的文本
pub const SCENE_NOT_FOUND_TEXT: &str = "场景未找到。";

/// 故事运行时
///
/// 持有场景图、全局变量和当前场景游标。
/// 多个会话互不共享状态，各自创建实例即可。
///
/// # 使用示例
///
/// ```ignore
/// let script = Script::from_json_str("demo", &text)?;
/// let mut runtime = StoryRuntime::with_script(script)?;
///
/// while !runtime.is_finished() {
///     println!("{}", runtime.scene_text());
///     // Host 采集输入...
///     runtime.choose(index)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StoryRuntime {
    /// 当前脚本
    script: Script,
    /// 全局变量
    state: GameState,
    /// 当前场景 ID
    current_scene_id: String,
    /// 当前场景处理后的文本
    scene_text: String,
}

impl Default for StoryRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryRuntime {
    /// 创建未加载脚本的 Runtime
    pub fn new() -> Self {
        Self {
            script: Script::default(),
            state: GameState::new(),
            current_scene_id: START_SCENE_ID.to_string(),
            scene_text: String::new(),
        }
    }

    /// 创建 Runtime 并加载脚本
    pub fn with_script(script: Script) -> Result<Self, RuntimeError> {
        let mut runtime = Self::new();
        runtime.load(script)?;
        Ok(runtime)
    }

    /// 加载脚本
    ///
    /// 整体替换场景图，重置全局变量，然后进入 `start` 场景。
    /// 脚本缺少 `start` 场景时拒绝加载，Runtime 保持原状。
    pub fn load(&mut self, script: Script) -> Result<(), RuntimeError> {
        if !script.contains_scene(START_SCENE_ID) {
            let err = RuntimeError::MissingStartScene {
                entry: START_SCENE_ID.to_string(),
            };
            warn!(script = %script.id, error = %err, "拒绝加载脚本");
            return Err(err);
        }

        debug!(script = %script.id, scenes = script.len(), "加载脚本");
        self.script = script;
        self.state.clear();
        self.activate(START_SCENE_ID)
    }

    /// 进入指定场景
    ///
    /// 执行场景文本中的 `set` 指令并重新计算显示文本。
    /// 场景不存在时返回错误，游标和变量保持不变。
    pub fn activate(&mut self, scene_id: &str) -> Result<(), RuntimeError> {
        let Some(scene) = self.script.get_scene(scene_id) else {
            let err = RuntimeError::SceneNotFound {
                scene_id: scene_id.to_string(),
            };
            warn!(error = %err, "无法进入场景");
            return Err(err);
        };

        debug!(scene = scene_id, "进入场景");
        self.scene_text = process_scene_text(&scene.text, &mut self.state);
        self.current_scene_id = scene_id.to_string();
        Ok(())
    }

    /// 选择当前可见选项中的第 `index` 个（从 0 开始）
    ///
    /// 索引越界或目标场景不存在时返回错误，会话停留在当前场景。
    pub fn choose(&mut self, index: usize) -> Result<(), RuntimeError> {
        let choices = self.available_choices();
        let Some(choice) = choices.get(index) else {
            let err = RuntimeError::InvalidChoiceIndex {
                index,
                max: choices.len(),
            };
            warn!(scene = %self.current_scene_id, error = %err, "忽略选择");
            return Err(err);
        };

        let next = choice.next.clone();
        self.activate(&next)
    }

    /// 当前场景的显示文本
    pub fn scene_text(&self) -> &str {
        if self.script.contains_scene(&self.current_scene_id) {
            &self.scene_text
        } else {
            SCENE_NOT_FOUND_TEXT
        }
    }

    /// 当前场景
    pub fn current_scene(&self) -> Option<&Scene> {
        self.script.get_scene(&self.current_scene_id)
    }

    /// 当前场景 ID
    pub fn current_scene_id(&self) -> &str {
        &self.current_scene_id
    }

    /// 当前可见的选项（保持原顺序）
    pub fn available_choices(&self) -> Vec<&Choice> {
        let Some(scene) = self.current_scene() else {
            return Vec::new();
        };
        scene
            .choices
            .iter()
            .filter(|choice| self.is_choice_visible(choice))
            .collect()
    }

    /// 可见选项数量
    pub fn choice_count(&self) -> usize {
        self.available_choices().len()
    }

    /// 第 `index` 个可见选项的文本
    pub fn choice_text(&self, index: usize) -> Option<&str> {
        self.available_choices()
            .get(index)
            .map(|choice| choice.text.as_str())
    }

    /// 没有可见选项即为故事结束
    pub fn is_finished(&self) -> bool {
        self.choice_count() == 0
    }

    /// 全局变量（只读）
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 当前脚本
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// 生成当前场景的渲染快照
    pub fn view(&self) -> SceneView {
        let choices: Vec<ChoiceView> = self
            .available_choices()
            .into_iter()
            .enumerate()
            .map(|(index, choice)| ChoiceView {
                index,
                text: choice.text.clone(),
            })
            .collect();
        SceneView {
            scene_id: self.current_scene_id.clone(),
            text: self.scene_text().to_string(),
            finished: choices.is_empty(),
            choices,
        }
    }

    /// 条件无效时视为不可见
    fn is_choice_visible(&self, choice: &Choice) -> bool {
        match evaluate_condition(choice.condition.as_deref(), &self.state) {
            Ok(visible) => visible,
            Err(err) => {
                warn!(scene = %self.current_scene_id, error = %err, "条件无效，隐藏选项");
                false
            }
        }
    }
}
