//! # Story Runtime
//!
//! 分支叙事脚本解释器的核心运行时库。
//!
//! ## 架构概述
//!
//! `story-runtime` 是纯逻辑核心，不依赖任何 IO 或界面。
//! Host 负责读取脚本文件和采集玩家输入，Runtime 负责场景切换与状态管理：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── load(Script) ───────────────►│ activate("start")
//!   │◄─── scene_text / choices ────────│
//!   │──── choose(index) ──────────────►│ activate(next)
//!   │                                   │
//! ```
//!
//! ## 核心类型
//!
//! - [`StoryRuntime`]：会话控制器
//! - [`Script`]：场景图
//! - [`Value`]：脚本变量值
//! - [`GameState`]：全局变量
//! - [`SceneView`]：渲染快照
//!
//! ## 使用示例
//!
//! ```ignore
//! use story_runtime::{Script, StoryRuntime};
//!
//! let script = Script::from_json_str("demo", &text)?;
//! let mut runtime = StoryRuntime::with_script(script)?;
//!
//! loop {
//!     println!("{}", runtime.scene_text());
//!     if runtime.is_finished() {
//!         break;
//!     }
//!     for (i, choice) in runtime.available_choices().iter().enumerate() {
//!         println!("{}. {}", i + 1, choice.text);
//!     }
//!     runtime.choose(read_index())?;
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`value`]：变量值与字面量解析
//! - [`state`]：全局变量状态
//! - [`text`]：场景文本处理（`set` 指令与变量插值）
//! - [`script`]：场景图与选项条件
//! - [`runtime`]：会话控制器
//! - [`view`]：渲染快照
//! - [`diagnostic`]：脚本静态检查
//! - [`error`]：错误类型定义

pub mod diagnostic;
pub mod error;
pub mod runtime;
pub mod script;
pub mod state;
pub mod text;
pub mod value;
pub mod view;

// 重导出核心类型
pub use diagnostic::{
    Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_script, get_assigned_variables,
    get_reachable_scenes,
};
pub use error::{ConditionError, RuntimeError, ScriptError};
pub use runtime::{SCENE_NOT_FOUND_TEXT, START_SCENE_ID, StoryRuntime};
pub use script::{
    Choice, CompareOp, Condition, EvalContext, Scene, Script, ScriptDocument, evaluate_condition,
};
pub use state::GameState;
pub use text::process_scene_text;
pub use value::Value;
pub use view::{ChoiceView, SceneView};
