//! # xtask - 开发辅助工具
//!
//! 提供开发辅助命令。
//!
//! ## 命令
//!
//! - `script-check`: 检查故事脚本（JSON 格式、入口场景、跳转目标、条件、变量）

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use story_runtime::{DiagnosticResult, Script, analyze_script};
use walkdir::WalkDir;

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "script-check" => {
            let path = args.next();
            script_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo run -p xtask -- <command>

COMMANDS:
  script-check    检查故事脚本

SCRIPT-CHECK:
  cargo run -p xtask -- script-check [path]

  不带参数：检查 assets/stories/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 格式错误
    - 缺少入口场景 start
    - 未定义的跳转目标
    - 无法解析的条件
    - 未被 set 的变量、不可达的场景
"#
    );
}

//=============================================================================
// script-check 命令实现
//=============================================================================

/// 默认脚本目录（相对于 workspace root）
const STORIES_DIR: &str = "assets/stories";

/// 脚本检查结果
#[derive(Default)]
struct ScriptCheckResult {
    /// 检查的脚本数量
    scripts_checked: usize,
    /// 解析错误数量
    parse_errors: usize,
    /// 诊断结果
    diagnostics: DiagnosticResult,
}

/// 执行脚本检查
fn script_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_script_files(&path)?
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(STORIES_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认脚本目录不存在: {}\n请在 workspace 根目录运行，或指定脚本路径",
                    dir.display()
                );
            }
            collect_script_files(dir)?
        }
    };

    if files.is_empty() {
        eprintln!("未找到脚本文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个脚本文件...\n", files.len());

    let mut result = ScriptCheckResult::default();
    for file in &files {
        check_script_file(file, &mut result);
    }

    print_check_result(&result);

    if result.parse_errors > 0 || result.diagnostics.has_errors() {
        anyhow::bail!("脚本检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有脚本文件
fn collect_script_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// 检查单个脚本文件
fn check_script_file(file: &Path, result: &mut ScriptCheckResult) {
    let script_id = file.display().to_string();
    result.scripts_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", script_id, e);
            result.parse_errors += 1;
            return;
        }
    };

    let script = match Script::from_json_str(&script_id, &content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            result.parse_errors += 1;
            return;
        }
    };

    result.diagnostics.merge(analyze_script(&script));
}

/// 输出检查结果
fn print_check_result(result: &ScriptCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个脚本", result.scripts_checked);
    eprintln!();

    for diag in &result.diagnostics.diagnostics {
        eprintln!("{}", diag);
    }

    let error_count = result.parse_errors + result.diagnostics.error_count();
    let warn_count = result.diagnostics.warn_count();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
