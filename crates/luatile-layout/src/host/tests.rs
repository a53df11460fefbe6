//! Tests for script loading, layout evaluation and command handling.

use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

const COLUMNS: &str = r#"
function layout(n, width, height)
  if n == 0 then
    return {}
  end
  local column = width // n
  local views = {}
  for i = 0, n - 1 do
    views[#views + 1] = { x = i * column, y = 0, width = column, height = height }
  end
  return views
end
"#;

fn write_script(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn host_with(source: &str) -> (TempDir, ScriptHost) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "layout.lua", source);
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    host.load(&path).unwrap();
    (dir, host)
}

#[test]
fn equal_columns_for_three_views() {
    let (_dir, host) = host_with(COLUMNS);
    let views = host.compute_layout(3, 1920, 1080).unwrap();
    assert_eq!(
        views,
        vec![
            View::new(0, 0, 640, 1080),
            View::new(640, 0, 640, 1080),
            View::new(1280, 0, 640, 1080),
        ]
    );
}

#[test]
fn returns_exactly_n_views_for_many_n() {
    let (_dir, host) = host_with(COLUMNS);
    for n in 0..=8u32 {
        let views = host.compute_layout(n, 2400, 900).unwrap();
        assert_eq!(views.len(), n as usize);
        for (i, view) in views.iter().enumerate() {
            let column = if n == 0 { 0 } else { 2400 / n as i32 };
            assert_eq!(*view, View::new(i as i32 * column, 0, column, 900));
        }
    }
}

#[test]
fn short_result_is_count_mismatch() {
    let (_dir, host) = host_with(
        r#"
        function layout(n, width, height)
          return { {x=0,y=0,width=1,height=1}, {x=1,y=0,width=1,height=1} }
        end
        "#,
    );
    let err = host.compute_layout(3, 1920, 1080).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::CountMismatch {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn missing_field_is_shape_error() {
    let (_dir, host) = host_with(
        r#"
        function layout(n, width, height)
          return { {x=0, y=0, width=width} }
        end
        "#,
    );
    let err = host.compute_layout(1, 100, 100).unwrap_err();
    assert!(matches!(err, LayoutError::Shape(ref m) if m.contains("height")));
}

#[test]
fn script_without_layout_loads_but_has_no_layout() {
    let (_dir, host) = host_with("gap = 4\n");
    assert!(host.is_loaded());
    assert!(!host.has_layout());
    assert!(matches!(
        host.compute_layout(1, 100, 100),
        Err(LayoutError::NoLayoutAvailable)
    ));
}

#[test]
fn compute_before_load_has_no_layout() {
    let host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    assert!(!host.is_loaded());
    assert!(matches!(
        host.compute_layout(1, 100, 100),
        Err(LayoutError::NoLayoutAvailable)
    ));
}

#[test]
fn runtime_error_carries_traceback() {
    let (_dir, host) = host_with(
        r#"
        function layout(n, width, height)
          error("no room for " .. n .. " views")
        end
        "#,
    );
    match host.compute_layout(2, 100, 100).unwrap_err() {
        LayoutError::EvaluationFailed(ScriptEvalError::Raised { traceback }) => {
            assert!(traceback.contains("no room for 2 views"));
            assert!(traceback.contains("stack traceback"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn traceback_is_captured_without_debug_library() {
    let (_dir, host) = host_with(
        r#"
        has_debug = debug ~= nil
        function layout(n, width, height)
          local views = nil
          return views[1]
        end
        "#,
    );
    let bindings = &host.environment.as_ref().unwrap().bindings;
    assert!(!bindings.get::<bool>("has_debug").unwrap());
    match host.compute_layout(1, 100, 100).unwrap_err() {
        LayoutError::EvaluationFailed(ScriptEvalError::Raised { traceback }) => {
            assert!(traceback.contains("attempt to index"));
            assert!(traceback.contains("stack traceback"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_string_error_values_are_described() {
    let (_dir, host) = host_with(
        r#"
        function layout(n, width, height)
          error({ reason = "bad" })
        end
        "#,
    );
    match host.compute_layout(1, 100, 100).unwrap_err() {
        LayoutError::EvaluationFailed(ScriptEvalError::Raised { traceback }) => {
            assert!(traceback.contains("reason"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn compute_layout_is_idempotent() {
    let (_dir, host) = host_with(COLUMNS);
    let first = host.compute_layout(4, 1000, 500).unwrap();
    let second = host.compute_layout(4, 1000, 500).unwrap();
    assert_eq!(first, second);
}

#[test]
fn command_changes_script_state() {
    let (_dir, mut host) = host_with(
        r#"
        gap = 0
        function layout(n, width, height)
          local views = {}
          for i = 1, n do
            views[i] = { x = gap, y = gap, width = width - 2 * gap, height = height - 2 * gap }
          end
          return views
        end
        "#,
    );
    assert_eq!(
        host.compute_layout(1, 100, 100).unwrap(),
        vec![View::new(0, 0, 100, 100)]
    );

    host.handle_command("gap = 10").unwrap();
    assert_eq!(
        host.compute_layout(1, 100, 100).unwrap(),
        vec![View::new(10, 10, 80, 80)]
    );
}

#[test]
fn command_redefining_layout_is_picked_up() {
    let (_dir, mut host) = host_with(COLUMNS);
    host.handle_command(
        "function layout(n, w, h) local v = {} for i = 1, n do v[i] = {x=0,y=0,width=w,height=h} end return v end",
    )
    .unwrap();
    assert_eq!(
        host.compute_layout(2, 300, 200).unwrap(),
        vec![View::new(0, 0, 300, 200), View::new(0, 0, 300, 200)]
    );
}

#[test]
fn command_removing_layout_yields_no_layout() {
    let (_dir, mut host) = host_with(COLUMNS);
    host.handle_command("layout = nil").unwrap();
    assert!(!host.has_layout());
    assert!(matches!(
        host.compute_layout(1, 100, 100),
        Err(LayoutError::NoLayoutAvailable)
    ));
}

#[test]
fn command_defining_layout_enables_layouts() {
    let (_dir, mut host) = host_with("-- nothing yet\n");
    assert!(!host.has_layout());
    host.handle_command(
        "function layout(n, w, h) return n == 1 and { {x=1,y=2,width=3,height=4} } or {} end",
    )
    .unwrap();
    assert_eq!(
        host.compute_layout(1, 10, 10).unwrap(),
        vec![View::new(1, 2, 3, 4)]
    );
}

#[test]
fn failing_command_still_rebinds_layout() {
    let (_dir, mut host) = host_with(COLUMNS);
    let err = host
        .handle_command("layout = nil; error('half done')")
        .unwrap_err();
    assert!(matches!(err, ScriptEvalError::Raised { ref traceback } if traceback.contains("half done")));
    assert!(!host.has_layout());
}

#[test]
fn syntax_error_in_command_keeps_environment() {
    let (_dir, mut host) = host_with(COLUMNS);
    let err = host.handle_command("gap = = 3").unwrap_err();
    assert!(matches!(err, ScriptEvalError::Raised { .. }));
    assert!(host.has_layout());
    assert_eq!(host.compute_layout(1, 50, 50).unwrap().len(), 1);
}

#[test]
fn command_without_environment_fails() {
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    assert!(matches!(
        host.handle_command("gap = 1"),
        Err(ScriptEvalError::NoEnvironment)
    ));
}

#[test]
fn missing_script_is_not_found() {
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    let err = host.load(Path::new("/tmp/luatile_no_such_script.lua")).unwrap_err();
    assert!(matches!(err, ScriptLoadError::NotFound(_)));
}

#[test]
fn broken_script_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "broken.lua", "function layout(\n");
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    let err = host.load(&path).unwrap_err();
    assert!(matches!(err, ScriptLoadError::Evaluation { .. }));
    assert!(!host.is_loaded());
}

#[test]
fn script_raising_at_top_level_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "raises.lua", "error('refusing to load')\n");
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    match host.load(&path).unwrap_err() {
        ScriptLoadError::Evaluation { traceback, .. } => {
            assert!(traceback.contains("refusing to load"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reload_picks_up_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "layout.lua", COLUMNS);
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    host.load(&path).unwrap();
    assert_eq!(host.compute_layout(2, 100, 100).unwrap()[1].x, 50);

    std::fs::write(
        &path,
        "function layout(n, w, h) local v = {} for i = 1, n do v[i] = {x=7,y=7,width=1,height=1} end return v end",
    )
    .unwrap();
    host.reload().unwrap();
    assert_eq!(host.compute_layout(2, 100, 100).unwrap()[1].x, 7);
}

#[test]
fn failed_reload_keeps_previous_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "layout.lua", COLUMNS);
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    host.load(&path).unwrap();

    std::fs::write(&path, "this is not lua").unwrap();
    assert!(host.reload().is_err());
    assert_eq!(host.compute_layout(3, 1920, 1080).unwrap().len(), 3);
}

#[test]
fn reload_without_load_fails() {
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    assert!(matches!(
        host.reload(),
        Err(ScriptLoadError::NothingToReload)
    ));
}

#[test]
fn loading_a_new_script_replaces_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_script(&dir, "first.lua", "marker = 'first'\n");
    let second = write_script(&dir, "second.lua", COLUMNS);
    let mut host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();

    host.load(&first).unwrap();
    assert!(!host.has_layout());
    host.load(&second).unwrap();
    assert!(host.has_layout());
    assert_eq!(host.script_path(), Some(second.as_path()));

    // Bindings of the first script are gone.
    host.handle_command("assert(marker == nil)").unwrap();
}

#[test]
fn scripts_see_standard_library() {
    let (_dir, host) = host_with(
        r#"
        function layout(n, width, height)
          local views = {}
          for i = 1, n do
            table.insert(views, { x = 0, y = 0, width = math.floor(width / 2), height = height })
          end
          return views
        end
        "#,
    );
    assert_eq!(
        host.compute_layout(1, 101, 10).unwrap(),
        vec![View::new(0, 0, 50, 10)]
    );
}

#[test]
fn custom_layout_function_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        &dir,
        "tile.lua",
        "function tile(n, w, h) return { {x=0,y=0,width=w,height=h} } end",
    );
    let mut host = ScriptHost::new("tile").unwrap();
    host.load(&path).unwrap();
    assert_eq!(host.layout_function(), "tile");
    assert_eq!(
        host.compute_layout(1, 10, 20).unwrap(),
        vec![View::new(0, 0, 10, 20)]
    );
}

#[test]
fn prelude_missing_capability_is_rejected() {
    let result = ScriptHost::with_prelude(
        "return { evaluate_file = function() end, protected_call = pcall }",
        DEFAULT_LAYOUT_FUNCTION,
    );
    assert!(matches!(
        result,
        Err(ScriptLoadError::MissingCapability(ref name)) if name == "evaluate_command"
    ));
}

#[test]
fn non_table_environment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "layout.lua", COLUMNS);
    let mut host = ScriptHost::with_prelude(
        r#"
        return {
          evaluate_file = function(path) return 42 end,
          evaluate_command = function(env, command) return env end,
          protected_call = function(fn, ...) return fn(...) end,
        }
        "#,
        DEFAULT_LAYOUT_FUNCTION,
    )
    .unwrap();
    assert!(matches!(
        host.load(&path),
        Err(ScriptLoadError::InvalidEnvironment(ref t)) if t == "integer"
    ));
}

#[test]
fn describe_views_renders_records() {
    let host = ScriptHost::new(DEFAULT_LAYOUT_FUNCTION).unwrap();
    let rendered = host.describe_views(&[View::new(0, 0, 640, 1080)]);
    assert_eq!(rendered, "{{height = 1080, width = 640, x = 0, y = 0}}");
}

#[test]
fn generator_trait_delegates_to_host() {
    let (_dir, host) = host_with(COLUMNS);
    let mut generator: Box<dyn LayoutGenerator> = Box::new(host);
    assert_eq!(generator.generate(2, 200, 100).unwrap().len(), 2);
    generator.command("layout = nil").unwrap();
    assert!(matches!(
        generator.generate(2, 200, 100),
        Err(LayoutError::NoLayoutAvailable)
    ));
    generator.reload().unwrap();
    assert_eq!(generator.generate(2, 200, 100).unwrap().len(), 2);
}
