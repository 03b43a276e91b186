use std::path::PathBuf;

use dvc_directives::{MarkupConfiguration, MarkupFileCompiler};
use dvc_types::TypeRegistry;

use super::driver::{CompilationResult, FileResult};
use super::reporter::{LineMap, Reporter, json_report};

fn compile_one(types: &TypeRegistry, path: &str, source: &str) -> CompilationResult {
    let config = MarkupConfiguration::default();
    let compiled = MarkupFileCompiler::new(types, &config)
        .compile_source(path, source)
        .unwrap();
    CompilationResult {
        files: vec![FileResult {
            path: PathBuf::from(path),
            source: source.to_string(),
            compiled,
        }],
    }
}

#[test]
fn line_map_positions() {
    let source = "@import A\n@viewModel é.B\n";
    let map = LineMap::build(source);
    assert_eq!(map.position(0, source), (1, 1));
    assert_eq!(map.position(10, source), (2, 1));
    // column counts characters, not bytes
    let after_accent = source.find(".B").unwrap() as u32;
    assert_eq!(map.position(after_accent, source), (2, 13));
    assert_eq!(map.line_text(2, source), Some("@viewModel é.B"));
    assert_eq!(map.line_text(0, source), None);
}

#[test]
fn renders_location_code_and_snippet() {
    let types = TypeRegistry::new();
    let result = compile_one(&types, "Views/Default.dothtml", "@viewModel invalid\n");
    let output = Reporter::new(false).render(&result);
    assert_eq!(
        output,
        "Views/Default.dothtml:1:12 - error DV3001: Could not resolve type 'invalid'.\n    1   @viewModel invalid\n                   ~~~~~~~"
    );
}

#[test]
fn file_level_diagnostics_are_rendered_last() {
    let types = TypeRegistry::new();
    let result = compile_one(&types, "Views/Default.dothtml", "@baseType Missing\n");
    let output = Reporter::new(false).render(&result);
    let lines: Vec<&str> = output.lines().filter(|line| line.starts_with("Views/")).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("DV2001"));
    assert!(lines[1].starts_with("Views/Default.dothtml:1:1 - error DV2013"));
}

#[test]
fn clean_files_render_nothing() {
    let types = TypeRegistry::new();
    let result = compile_one(&types, "Default.dothtml", "@viewModel string\n");
    assert_eq!(Reporter::new(false).render(&result), "");
}

#[test]
fn summary_lists_wrapper_and_properties() {
    let types = TypeRegistry::new();
    let result = compile_one(
        &types,
        "Menu.dotcontrol",
        "@viewModel object\n@property string Title = \"x\", MarkupOptions.Required = true\n@property int[] Items = [1, 2]\n",
    );
    let summary = Reporter::new(false).summary(&types, &result);
    assert_eq!(
        summary,
        "Menu.dotcontrol\n  wrapper type: DotvvmMarkupControl\n  view model: object\n  property DotvvmMarkupControl.Title: string = \"x\" [required]\n  property DotvvmMarkupControl.Items: int[] = [1, 2]\n1 file(s), 0 error(s)\n"
    );
}

#[test]
fn json_report_carries_positions() {
    let types = TypeRegistry::new();
    let result = compile_one(&types, "Default.dothtml", "@viewModel string\n@viewModel int\n");
    let report = json_report(&result);
    let value = serde_json::to_value(&report).unwrap();
    let diagnostic = &value[0]["diagnostics"][0];
    assert_eq!(value[0]["file"], "Default.dothtml");
    assert_eq!(diagnostic["code"], 2014);
    assert_eq!(diagnostic["category"], "Error");
    assert_eq!(diagnostic["line"], 2);
    assert_eq!(diagnostic["column"], 12);
    assert_eq!(
        diagnostic["message"],
        "The directive '@viewModel' cannot be specified more than once."
    );
}
