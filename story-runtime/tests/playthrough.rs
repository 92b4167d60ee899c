//! 使用示例故事的完整流程测试

use story_runtime::{
    RuntimeError, Script, StoryRuntime, Value, analyze_script, get_reachable_scenes,
};

const DEMO: &str = include_str!("../../assets/stories/demo.json");

fn demo_runtime() -> StoryRuntime {
    let script = Script::from_json_str("demo", DEMO).unwrap();
    StoryRuntime::with_script(script).unwrap()
}

fn choice_texts(runtime: &StoryRuntime) -> Vec<String> {
    runtime
        .available_choices()
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

#[test]
fn demo_script_is_clean() {
    let script = Script::from_json_str("demo", DEMO).unwrap();
    let result = analyze_script(&script);

    assert!(result.is_empty(), "{}", result);
    assert_eq!(get_reachable_scenes(&script).len(), script.len());
}

#[test]
fn direct_route_hides_gated_choices() {
    let mut runtime = demo_runtime();
    assert_eq!(
        runtime.scene_text(),
        "你醒来时躺在一座古塔的门口。口袋里有 0 枚金币。"
    );

    runtime.choose(0).unwrap();
    assert_eq!(runtime.current_scene_id(), "hall");
    // gold 为 0，买地图的选项被隐藏
    assert_eq!(choice_texts(&runtime), vec!["离开古塔"]);

    runtime.choose(0).unwrap();
    assert_eq!(runtime.current_scene_id(), "ending");
    assert_eq!(runtime.scene_text(), "你走向远方。{title}");
    assert_eq!(runtime.choice_count(), 0);
    assert!(runtime.is_finished());
}

#[test]
fn key_route_unlocks_vault() {
    let mut runtime = demo_runtime();

    runtime.choose(1).unwrap();
    assert_eq!(runtime.current_scene_id(), "grass");
    assert_eq!(runtime.state().get_var("hasKey"), Some(&Value::Bool(true)));
    assert_eq!(runtime.state().get_var("gold"), Some(&Value::Number(12.0)));

    runtime.choose(0).unwrap();
    assert_eq!(choice_texts(&runtime), vec!["推开大门", "用钥匙打开侧门"]);

    runtime.choose(1).unwrap();
    assert_eq!(
        runtime.scene_text(),
        "侧门后是一间宝库。你获得了称号：宝库发现者。"
    );

    runtime.choose(0).unwrap();
    assert_eq!(runtime.scene_text(), "你走向远方。宝库发现者");
    assert!(runtime.is_finished());
}

#[test]
fn gold_threshold_reveals_map() {
    let mut runtime = demo_runtime();
    runtime.choose(1).unwrap();
    runtime.choose(0).unwrap();
    runtime.choose(0).unwrap();

    assert_eq!(runtime.current_scene_id(), "hall");
    assert_eq!(choice_texts(&runtime), vec!["买下地图（10 金币）", "离开古塔"]);

    runtime.choose(0).unwrap();
    assert_eq!(runtime.scene_text(), "你买下了地图，还剩 2 枚金币。");
}

#[test]
fn invalid_choice_keeps_position() {
    let mut runtime = demo_runtime();

    assert_eq!(
        runtime.choose(2),
        Err(RuntimeError::InvalidChoiceIndex { index: 2, max: 2 })
    );
    assert_eq!(runtime.current_scene_id(), "start");
}

#[test]
fn reload_resets_state() {
    let mut runtime = demo_runtime();
    runtime.choose(1).unwrap();
    assert_eq!(runtime.state().get_var("gold"), Some(&Value::Number(12.0)));

    runtime
        .load(Script::from_json_str("demo", DEMO).unwrap())
        .unwrap();
    assert_eq!(runtime.current_scene_id(), "start");
    assert_eq!(runtime.state().get_var("gold"), Some(&Value::Number(0.0)));
    assert_eq!(runtime.state().get_var("hasKey"), Some(&Value::Bool(false)));
    assert_eq!(runtime.state().len(), 2);
}
