//! # Session 模块
//!
//! 终端交互循环：渲染当前场景，读取玩家输入，推进 Runtime。
//!
//! 输入输出通过泛型 `BufRead`/`Write` 注入，便于测试。

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Context;
use story_runtime::{Script, StoryRuntime};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::input::parse_selection;
use crate::render::{render_ending, render_prompt, render_scene};

/// 会话结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 故事结束且玩家不再重开
    Finished,
    /// 输入流结束
    InputClosed,
}

/// 运行一次完整的游玩会话
///
/// 故事结束后根据配置询问是否重新开始；重新开始会用同一份脚本重新加载。
///
/// JSON 模式下每行输出都是一个 JSON 对象：场景快照为 [`SceneView`]，
/// 错误提示为 `{"error": "..."}`，不输出输入提示。
///
/// [`SceneView`]: story_runtime::SceneView
pub fn run<R: BufRead, W: Write>(
    script: &Script,
    config: &CliConfig,
    input: R,
    mut output: W,
) -> anyhow::Result<SessionEnd> {
    let mut runtime = StoryRuntime::with_script(script.clone())
        .with_context(|| format!("无法开始故事 '{}'", script.id))?;
    let mut lines = input.lines();

    loop {
        let view = runtime.view();

        if view.finished {
            if config.json_output {
                writeln!(output, "{}", serde_json::to_string(&view)?)?;
            } else {
                write!(output, "{}", render_ending(&view, config))?;
            }
            info!(scene = %view.scene_id, "故事结束");

            if !config.ask_restart {
                return Ok(SessionEnd::Finished);
            }
            prompt(&mut output, config, "重新开始？(y/n)：")?;

            let Some(line) = lines.next() else {
                return Ok(SessionEnd::InputClosed);
            };
            if matches!(line?.trim(), "y" | "Y" | "yes") {
                runtime.load(script.clone())?;
                continue;
            }
            return Ok(SessionEnd::Finished);
        }

        if config.json_output {
            writeln!(output, "{}", serde_json::to_string(&view)?)?;
        } else {
            write!(output, "{}", render_scene(&view, config))?;
        }

        loop {
            prompt(&mut output, config, &render_prompt(view.choice_count()))?;

            let Some(line) = lines.next() else {
                return Ok(SessionEnd::InputClosed);
            };
            match parse_selection(&line?, view.choice_count()) {
                Ok(index) => {
                    if let Err(err) = runtime.choose(index) {
                        warn!(error = %err, "选择失败");
                        report_error(&mut output, config, "⚠️ ", &err)?;
                    }
                    if !config.json_output {
                        writeln!(output)?;
                    }
                    break;
                }
                Err(err) => report_error(&mut output, config, "", &err)?,
            }
        }
    }
}

/// 输出输入提示，JSON 模式下不输出
fn prompt<W: Write>(output: &mut W, config: &CliConfig, text: &str) -> anyhow::Result<()> {
    if !config.json_output {
        write!(output, "{}", text)?;
        output.flush()?;
    }
    Ok(())
}

/// 输出错误提示；`marker` 只在文本模式下显示
fn report_error<W: Write>(
    output: &mut W,
    config: &CliConfig,
    marker: &str,
    err: &dyn fmt::Display,
) -> anyhow::Result<()> {
    if config.json_output {
        let line = serde_json::json!({ "error": err.to_string() });
        writeln!(output, "{}", line)?;
    } else {
        writeln!(output, "{}{}", marker, err)?;
    }
    Ok(())
}
