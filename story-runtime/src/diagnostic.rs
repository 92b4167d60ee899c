//! # 诊断模块
//!
//! 提供脚本静态检查和诊断 API，不依赖 IO 或 Runtime。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（无法游玩）、Warn（运行时会失败或被隐藏）、Info（信息提示）
//! - 复用 Runtime 的条件解析与指令扫描，不重复解析逻辑

use std::collections::{HashSet, VecDeque};

use crate::runtime::START_SCENE_ID;
use crate::script::{Condition, Script};
use crate::text::{Segment, placeholders, scan_directives};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 脚本 ID / 文件路径
    pub script_id: String,
    /// 所在场景（如果可定位）
    pub scene_id: Option<String>,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, script_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            script_id: script_id.into(),
            scene_id: None,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(script_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, script_id, message)
    }

    /// 创建警告诊断
    pub fn warn(script_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, script_id, message)
    }

    /// 创建信息诊断
    pub fn info(script_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, script_id, message)
    }

    /// 设置场景
    pub fn with_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.scene_id = Some(scene_id.into());
        self
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.script_id)?;
        if let Some(scene) = &self.scene_id {
            write!(f, ":{}", scene)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.count_level(DiagnosticLevel::Error)
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.count_level(DiagnosticLevel::Warn)
    }

    fn count_level(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

impl std::fmt::Display for DiagnosticResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diag)?;
        }
        Ok(())
    }
}

//=============================================================================
// 脚本分析 API
//=============================================================================

/// 分析脚本，返回诊断结果
///
/// 执行以下检查：
/// - 缺少 `start` 场景（Error）
/// - 选项指向不存在的场景（Warn）
/// - 条件中没有可识别的运算符（Warn）
/// - 条件或占位符引用的变量从未被 `set`（Info）
/// - 从 `start` 出发不可达的场景（Info）
pub fn analyze_script(script: &Script) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    if !script.contains_scene(START_SCENE_ID) {
        result.push(
            Diagnostic::error(&script.id, format!("缺少入口场景 **{}**", START_SCENE_ID))
                .with_detail("脚本加载时会进入该场景"),
        );
    }

    let assigned = get_assigned_variables(script);

    for scene in script.scenes() {
        for choice in &scene.choices {
            if !script.contains_scene(&choice.next) {
                result.push(
                    Diagnostic::warn(&script.id, format!("未定义的跳转目标: **{}**", choice.next))
                        .with_scene(&scene.id)
                        .with_detail(format!(
                            "选项 '{}' 引用了不存在的场景 '{}'",
                            choice.text, choice.next
                        )),
                );
            }

            let Some(source) = choice.condition.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            match Condition::parse(source) {
                Ok(condition) if !assigned.contains(condition.variable.as_str()) => {
                    result.push(
                        Diagnostic::info(
                            &script.id,
                            format!("条件引用的变量 '{}' 没有被任何场景设置", condition.variable),
                        )
                        .with_scene(&scene.id)
                        .with_detail(source),
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    result.push(
                        Diagnostic::warn(&script.id, format!("无效的条件: {}", err))
                            .with_scene(&scene.id)
                            .with_detail(format!("选项 '{}' 将始终被隐藏", choice.text)),
                    );
                }
            }
        }

        for name in placeholders(&scene.text) {
            if !assigned.contains(name) {
                result.push(
                    Diagnostic::info(
                        &script.id,
                        format!("占位符 {{{}}} 引用的变量没有被任何场景设置", name),
                    )
                    .with_scene(&scene.id),
                );
            }
        }
    }

    let reachable = get_reachable_scenes(script);
    for scene in script.scenes() {
        if script.contains_scene(START_SCENE_ID) && !reachable.contains(scene.id.as_str()) {
            result.push(Diagnostic::info(&script.id, "场景不可达").with_scene(&scene.id));
        }
    }

    result
}

/// 获取被 `set` 指令赋值过的变量名
pub fn get_assigned_variables(script: &Script) -> HashSet<&str> {
    script
        .scenes()
        .iter()
        .flat_map(|scene| scan_directives(&scene.text))
        .filter_map(|segment| match segment {
            Segment::Set { name, .. } => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// 从 `start` 出发、忽略条件能到达的场景
pub fn get_reachable_scenes(script: &Script) -> HashSet<&str> {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::new();

    if let Some(start) = script.get_scene(START_SCENE_ID) {
        reachable.insert(start.id.as_str());
        queue.push_back(start);
    }

    while let Some(scene) = queue.pop_front() {
        for choice in &scene.choices {
            if let Some(next) = script.get_scene(&choice.next)
                && reachable.insert(next.id.as_str())
            {
                queue.push_back(next);
            }
        }
    }

    reachable
}
