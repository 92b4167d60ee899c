//! # Render 模块
//!
//! 把 [`SceneView`] 渲染为终端文本。

use story_runtime::SceneView;

use crate::config::CliConfig;

/// 渲染场景文本与编号选项
pub fn render_scene(view: &SceneView, config: &CliConfig) -> String {
    let mut output = header(view, config);
    output.push_str(&view.text);
    output.push_str("\n\n");
    for choice in &view.choices {
        output.push_str(&format!("{}. {}\n", choice.index + 1, choice.text));
    }
    output
}

/// 输入提示
pub fn render_prompt(choice_count: usize) -> String {
    format!("选择行动 (1-{choice_count}) 并回车：")
}

/// 渲染结局：最后一个场景的文本和结束消息
pub fn render_ending(view: &SceneView, config: &CliConfig) -> String {
    let mut output = header(view, config);
    output.push_str(&view.text);
    output.push_str("\n\n");
    output.push_str(&config.end_message);
    output.push('\n');
    output
}

fn header(view: &SceneView, config: &CliConfig) -> String {
    if config.show_scene_id {
        format!("[{}]\n", view.scene_id)
    } else {
        String::new()
    }
}
