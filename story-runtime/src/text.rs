//! # Text 模块
//!
//! 场景文本处理：执行 `{set ...}` 指令并插值变量。
//!
//! ## 处理流程
//!
//! 1. 从左到右扫描 `{set <变量名> = <值>}` 指令，依次写入状态
//! 2. 删除全部指令，去除首尾空白
//! 3. 将 `{变量名}` 替换为变量当前值；未定义的变量原样保留
//!
//! ## 指令语法
//!
//! - 变量名由 ASCII 字母、数字和下划线组成
//! - `set` 与变量名之间至少有一个空白
//! - 值至少包含一个字符，到同一行中的第一个 `}` 为止

use tracing::debug;

use crate::script::condition::EvalContext;
use crate::state::GameState;
use crate::value::Value;

/// 文本片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 普通文本
    Literal(&'a str),
    /// `{set name = value}` 指令，`value` 为未解析的原始文本
    Set { name: &'a str, value: &'a str },
}

/// 处理场景文本模板
///
/// 会修改 `state`：模板中的每条 `set` 指令恰好执行一次。
pub fn process_scene_text(template: &str, state: &mut GameState) -> String {
    let stripped = apply_set_directives(template, state);
    interpolate(&stripped, state)
}

/// 执行模板中的 `set` 指令，返回去除指令后的文本
pub fn apply_set_directives(template: &str, state: &mut GameState) -> String {
    let mut stripped = String::with_capacity(template.len());
    for segment in scan_directives(template) {
        match segment {
            Segment::Literal(text) => stripped.push_str(text),
            Segment::Set { name, value } => {
                let value = Value::parse_literal(value);
                debug!(variable = name, value = %value, "set 指令");
                state.set_var(name, value);
            }
        }
    }
    stripped.trim().to_string()
}

/// 将模板切分为普通文本与 `set` 指令
pub fn scan_directives(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let open = cursor + offset;
        match match_set_directive(&template[open..]) {
            Some((name, value, len)) => {
                if literal_start < open {
                    segments.push(Segment::Literal(&template[literal_start..open]));
                }
                segments.push(Segment::Set { name, value });
                cursor = open + len;
                literal_start = cursor;
            }
            None => cursor = open + 1,
        }
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// 尝试在 `s` 开头匹配一条 `set` 指令
///
/// 返回 `(变量名, 原始值, 指令总长度)`。
fn match_set_directive(s: &str) -> Option<(&str, &str, usize)> {
    let rest = s.strip_prefix("{set")?;
    let after_set = s.len() - rest.len();

    let ws = leading_whitespace(rest);
    if ws == 0 {
        return None;
    }
    let name_start = after_set + ws;
    let name_len = leading_word(&s[name_start..]);
    if name_len == 0 {
        return None;
    }
    let name_end = name_start + name_len;

    let eq = name_end + leading_whitespace(&s[name_end..]);
    if !s[eq..].starts_with('=') {
        return None;
    }
    let value_area = eq + 1;
    let ws = leading_whitespace(&s[value_area..]);

    // 值前的空白尽量多地跳过，失败时逐个退回
    let mut starts: Vec<usize> = s[value_area..value_area + ws]
        .char_indices()
        .map(|(i, _)| value_area + i)
        .collect();
    starts.push(value_area + ws);

    starts.into_iter().rev().find_map(|start| {
        let end = find_value_end(&s[start..])?;
        Some((&s[name_start..name_end], &s[start..start + end], start + end + 1))
    })
}

/// 值至少包含一个非换行字符，到下一个 `}` 结束；返回值的字节长度
fn find_value_end(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;
    if is_line_terminator(first) {
        return None;
    }
    for (i, c) in chars {
        if c == '}' {
            return Some(i);
        }
        if is_line_terminator(c) {
            return None;
        }
    }
    None
}

/// 将 `{变量名}` 替换为变量值
///
/// 未定义的变量保留原文（包括花括号）。
pub fn interpolate(text: &str, ctx: &impl EvalContext) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        output.push_str(&text[cursor..open]);

        let name_len = leading_word(&text[open + 1..]);
        let close = open + 1 + name_len;
        if name_len > 0 && text[close..].starts_with('}') {
            let name = &text[open + 1..close];
            match ctx.get_var(name) {
                Some(value) => output.push_str(&value.to_string()),
                None => output.push_str(&text[open..=close]),
            }
            cursor = close + 1;
        } else {
            output.push('{');
            cursor = open + 1;
        }
    }

    output.push_str(&text[cursor..]);
    output
}

/// 收集模板中的所有占位符变量名（不含 `set` 指令）
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for segment in scan_directives(template) {
        let Segment::Literal(text) = segment else {
            continue;
        };
        let mut cursor = 0;
        while let Some(offset) = text[cursor..].find('{') {
            let open = cursor + offset;
            let name_len = leading_word(&text[open + 1..]);
            let close = open + 1 + name_len;
            if name_len > 0 && text[close..].starts_with('}') {
                names.push(&text[open + 1..close]);
                cursor = close + 1;
            } else {
                cursor = open + 1;
            }
        }
    }
    names
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn leading_word(s: &str) -> usize {
    s.bytes().take_while(|&b| is_word_byte(b)).count()
}

fn leading_whitespace(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(s.len(), |(i, _)| i)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_interpolate_number() {
        let mut state = GameState::new();
        let text = process_scene_text("{set x = 5}Hello {x}", &mut state);

        assert_eq!(text, "Hello 5");
        assert_eq!(state.get_var("x"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_set_bare_word_falls_back_to_string() {
        let mut state = GameState::new();
        let text = process_scene_text("{set name = Bob}Hi {name}!", &mut state);

        assert_eq!(text, "Hi Bob!");
        assert_eq!(state.get_var("name"), Some(&Value::text("Bob")));
    }

    #[test]
    fn test_unknown_placeholder_kept_verbatim() {
        let mut state = GameState::new();
        let text = process_scene_text("Где {unknownVar}?", &mut state);
        assert_eq!(text, "Где {unknownVar}?");
    }

    #[test]
    fn test_directives_applied_left_to_right() {
        let mut state = GameState::new();
        let text = process_scene_text("{set a = 1}{set a = 2} a={a}", &mut state);

        assert_eq!(text, "a=2");
        assert_eq!(state.get_var("a"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_multiple_directives_and_trim() {
        let mut state = GameState::new();
        let text = process_scene_text(
            "  {set hasKey = true}\n你捡起了钥匙。{set gold = 12}\n金币：{gold} ",
            &mut state,
        );

        assert_eq!(text, "你捡起了钥匙。\n金币：12");
        assert_eq!(state.get_var("hasKey"), Some(&Value::Bool(true)));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_existing_state_is_interpolated() {
        let mut state = GameState::new();
        state.set_var("hero", "Alice");
        state.set_var("hp", 7.5);

        let text = process_scene_text("{hero} 还剩 {hp} 点生命。", &mut state);
        assert_eq!(text, "Alice 还剩 7.5 点生命。");
    }

    #[test]
    fn test_scan_directives_segments() {
        let segments = scan_directives("A{set x=1}B{not a directive}C");
        assert_eq!(
            segments,
            vec![
                Segment::Literal("A"),
                Segment::Set {
                    name: "x",
                    value: "1"
                },
                Segment::Literal("B{not a directive}C"),
            ]
        );
    }

    #[test]
    fn test_malformed_directives_are_literal() {
        let mut state = GameState::new();
        // set 后没有空白
        assert_eq!(apply_set_directives("{setx = 1}", &mut state), "{setx = 1}");
        // 缺少等号
        assert_eq!(apply_set_directives("{set x 1}", &mut state), "{set x 1}");
        // 值跨行
        assert_eq!(
            apply_set_directives("{set x = 1\n}", &mut state),
            "{set x = 1\n}"
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_empty_value_backtracks_to_whitespace() {
        let mut state = GameState::new();
        let text = apply_set_directives("{set mood = }ok", &mut state);

        assert_eq!(text, "ok");
        assert_eq!(state.get_var("mood"), Some(&Value::text("")));
    }

    #[test]
    fn test_quoted_string_value() {
        let mut state = GameState::new();
        let text = process_scene_text(r#"{set title = "Sir Bob"}{title}"#, &mut state);

        assert_eq!(text, "Sir Bob");
    }

    #[test]
    fn test_interpolate_ignores_non_identifiers() {
        let state = GameState::new();
        assert_eq!(interpolate("{ x } {} {a-b}", &state), "{ x } {} {a-b}");
    }

    #[test]
    fn test_placeholders() {
        let names = placeholders("{set x = 1}{x} и {y}, {set z = 2}{ bad }");
        assert_eq!(names, vec!["x", "y"]);
    }
}
