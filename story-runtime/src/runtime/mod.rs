//! # Runtime 模块
//!
//! 故事会话控制器，负责场景切换、选项过滤与状态管理。
//!
//! ## 模块结构
//!
//! - [`engine`]：会话控制器

pub mod engine;

pub use engine::{SCENE_NOT_FOUND_TEXT, START_SCENE_ID, StoryRuntime};
