//! # Story CLI
//!
//! 终端故事播放器：读取 JSON 脚本，驱动 story-runtime 运行。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- assets/stories/demo.json
//! cargo run -p host-cli -- assets/stories/demo.json --show-scene-id
//! cargo run -p host-cli -- assets/stories/demo.json --json
//! RUST_LOG=debug cargo run -p host-cli -- assets/stories/demo.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use story_runtime::{DiagnosticLevel, Script, analyze_script};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod input;
mod render;
mod session;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "story-cli")]
#[command(about = "分支叙事脚本播放器")]
#[command(version)]
struct Cli {
    /// 故事脚本文件（JSON）
    story: PathBuf,

    /// 配置文件（默认：story-cli.json）
    #[arg(short, long, default_value = "story-cli.json")]
    config: PathBuf,

    /// 日志级别，覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,

    /// 以 JSON 输出场景快照
    #[arg(long)]
    json: bool,

    /// 显示场景 ID
    #[arg(long)]
    show_scene_id: bool,

    /// 故事结束后直接退出，不询问重新开始
    #[arg(long)]
    no_restart: bool,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply_to(&self, config: &mut CliConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.json {
            config.json_output = true;
        }
        if self.show_scene_id {
            config.show_scene_id = true;
        }
        if self.no_restart {
            config.ask_restart = false;
        }
    }
}

fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// 脚本 ID 取文件名（不含扩展名）
fn script_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "story".to_string())
}

/// 脚本静态检查中警告及以上级别的诊断
fn script_warnings(script: &Script) -> Vec<String> {
    analyze_script(script)
        .filter_by_level(DiagnosticLevel::Warn)
        .into_iter()
        .map(|diag| diag.to_string())
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)
        .with_context(|| format!("无法加载配置 {}", cli.config.display()))?;
    cli.apply_to(&mut config);
    config.validate()?;

    init_logging(&config);

    let content = fs::read_to_string(&cli.story)
        .with_context(|| format!("无法读取脚本 {}", cli.story.display()))?;
    let script = Script::from_json_str(script_id(&cli.story), &content)?;
    info!(script = %script.id, scenes = script.len(), "脚本已加载");
    for diagnostic in script_warnings(&script) {
        warn!("{}", diagnostic);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let end = session::run(&script, &config, stdin.lock(), stdout.lock())?;
    info!(?end, "会话结束");

    Ok(())
}
