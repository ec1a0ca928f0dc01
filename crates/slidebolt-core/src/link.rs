//! Link payload construction for the compilation-visualization service
//!
//! Assembles the fixed two-component layout the service expects (one code
//! editor node, one compiler node, side by side in a row, wrapped in a
//! version-4 envelope), serializes it to JSON and percent-encodes the
//! result so it can sit after the `#` of the service URL.
//!
//! The editor node carries the *redacted* full source, matching what the
//! compiler sees; display source and link payload are deliberately
//! divergent views of the same block.

use serde::Serialize;

use crate::block::ParsedCodeBlock;
use crate::config::{resolve, Config, ConfigValue};
use crate::redact::redact;
use crate::report::Reporter;

/// Version tag of the layout envelope understood by the service
const LAYOUT_VERSION: u32 = 4;

// Field declaration order below matches the service's canonical key order,
// so plain serde_json serialization is already the canonical text.

#[derive(Debug, Serialize)]
struct Layout {
    version: u32,
    content: Vec<Row>,
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "type")]
    kind: &'static str,
    content: Vec<Component>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Component {
    #[serde(rename = "type")]
    kind: &'static str,
    component_name: &'static str,
    component_state: ComponentState,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ComponentState {
    Editor(EditorState),
    Compiler(CompilerState),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorState {
    id: u32,
    source: String,
    options: EditorOptions,
    font_scale: f64,
    lang: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorOptions {
    compile_on_change: bool,
    colourise_asm: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilerState {
    source: u32,
    filters: AsmFilters,
    options: String,
    compiler: String,
    font_scale: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AsmFilters {
    comment_only: bool,
    directives: bool,
    intel: bool,
    labels: bool,
    trim: bool,
}

/// Build the URL-encoded fragment describing one compile-and-view request
///
/// `source` is redacted with `remove_regex` first; the options string is
/// the space-joined, empty-filtered concatenation of the resolved primary
/// options and the config's additional options, in that order.
pub fn build_fragment(
    config: &Config,
    source: &str,
    options: &ConfigValue,
    language: &str,
    compiler: &str,
    remove_regex: Option<&str>,
    reporter: &mut dyn Reporter,
) -> String {
    let source = match remove_regex {
        Some(pattern) => redact(source, pattern, reporter),
        None => source.to_string(),
    };

    let options = [
        options.resolve(language, ""),
        resolve(config.additional_compiler_options.as_ref(), language, ""),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    let layout = Layout {
        version: LAYOUT_VERSION,
        content: vec![Row {
            kind: "row",
            content: vec![
                Component {
                    kind: "component",
                    component_name: "codeEditor",
                    component_state: ComponentState::Editor(EditorState {
                        id: 1,
                        source,
                        options: EditorOptions {
                            compile_on_change: true,
                            colourise_asm: true,
                        },
                        font_scale: config.editor_font_scale,
                        lang: language.to_string(),
                    }),
                },
                Component {
                    kind: "component",
                    component_name: "compiler",
                    component_state: ComponentState::Compiler(CompilerState {
                        source: 1,
                        filters: AsmFilters {
                            comment_only: true,
                            directives: true,
                            intel: config.intel_syntax,
                            labels: true,
                            trim: config.trim_asm_whitespace,
                        },
                        options,
                        compiler: compiler.to_string(),
                        font_scale: config.compiler_font_scale,
                    }),
                },
            ],
        }],
    };

    let json = serde_json::to_string(&layout).expect("layout serialization cannot fail");
    urlencoding::encode(&json).into_owned()
}

/// Build the fragment for an already parsed block
pub fn link_for_block(
    config: &Config,
    block: &ParsedCodeBlock,
    reporter: &mut dyn Reporter,
) -> String {
    build_fragment(
        config,
        &block.source,
        &ConfigValue::Scalar(block.options.clone()),
        &block.language,
        &block.compiler,
        block.remove_regex.as_deref(),
        reporter,
    )
}

/// Full service URL for a fragment
pub fn build_url(config: &Config, fragment: &str) -> String {
    format!("{}#{}", config.base_url, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectReporter;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn decode(fragment: &str) -> Value {
        let json = urlencoding::decode(fragment).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn fragment_for(config: &Config, source: &str, remove_regex: Option<&str>) -> Value {
        let mut reporter = CollectReporter::new();
        let fragment = build_fragment(
            config,
            source,
            &ConfigValue::from("-O1"),
            "c++",
            "g142",
            remove_regex,
            &mut reporter,
        );
        decode(&fragment)
    }

    #[test]
    fn test_envelope_shape() {
        let value = fragment_for(&Config::default(), "int main(){}", None);

        assert_eq!(value["version"], 4);
        assert_eq!(value["content"][0]["type"], "row");
        let components = value["content"][0]["content"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0]["componentName"], "codeEditor");
        assert_eq!(components[1]["componentName"], "compiler");
        assert_eq!(components[0]["type"], "component");
    }

    #[test]
    fn test_editor_node_fields() {
        let value = fragment_for(&Config::default(), "int main(){}", None);
        let editor = &value["content"][0]["content"][0]["componentState"];

        assert_eq!(editor["id"], 1);
        assert_eq!(editor["source"], "int main(){}");
        assert_eq!(editor["lang"], "c++");
        assert_eq!(editor["fontScale"], 2.5);
        assert_eq!(editor["options"]["compileOnChange"], true);
        assert_eq!(editor["options"]["colouriseAsm"], true);
    }

    #[test]
    fn test_compiler_node_fields_and_filters() {
        let value = fragment_for(&Config::default(), "int main(){}", None);
        let compiler = &value["content"][0]["content"][1]["componentState"];

        assert_eq!(compiler["source"], 1);
        assert_eq!(compiler["compiler"], "g142");
        assert_eq!(compiler["fontScale"], 3.0);
        let filters = &compiler["filters"];
        assert_eq!(filters["commentOnly"], true);
        assert_eq!(filters["directives"], true);
        assert_eq!(filters["labels"], true);
        assert_eq!(filters["intel"], true);
        assert_eq!(filters["trim"], true);
    }

    #[test]
    fn test_syntax_flags_taken_from_config() {
        let config = Config {
            intel_syntax: false,
            trim_asm_whitespace: false,
            ..Config::default()
        };
        let value = fragment_for(&config, "int main(){}", None);
        let filters = &value["content"][0]["content"][1]["componentState"]["filters"];
        assert_eq!(filters["intel"], false);
        assert_eq!(filters["trim"], false);
    }

    #[test]
    fn test_options_join_primary_then_additional() {
        let value = fragment_for(&Config::default(), "int main(){}", None);
        let compiler = &value["content"][0]["content"][1]["componentState"];
        assert_eq!(compiler["options"], "-O1 -Wall -Wextra");
    }

    #[test]
    fn test_empty_parts_filtered_from_options() {
        let config = Config {
            additional_compiler_options: None,
            ..Config::default()
        };
        let mut reporter = CollectReporter::new();
        let fragment = build_fragment(
            &config,
            "int main(){}",
            &ConfigValue::from(""),
            "c++",
            "g142",
            None,
            &mut reporter,
        );
        let value = decode(&fragment);
        assert_eq!(
            value["content"][0]["content"][1]["componentState"]["options"],
            ""
        );
    }

    #[test]
    fn test_per_language_options_resolved_at_build_time() {
        let mut map = BTreeMap::new();
        map.insert("c++".to_string(), "-O2".to_string());
        map.insert("rust".to_string(), "-O3".to_string());
        let options = ConfigValue::PerLanguage(map);

        let mut reporter = CollectReporter::new();
        let fragment = build_fragment(
            &Config::default(),
            "int main(){}",
            &options,
            "c++",
            "g142",
            None,
            &mut reporter,
        );
        let value = decode(&fragment);
        let joined = value["content"][0]["content"][1]["componentState"]["options"]
            .as_str()
            .unwrap();
        assert!(joined.contains("-O2"));
        assert!(!joined.contains("-O3"));
    }

    #[test]
    fn test_editor_source_is_redacted() {
        let value = fragment_for(&Config::default(), "ldp x8\n; comment", Some(";.*"));
        let editor = &value["content"][0]["content"][0]["componentState"];
        assert_eq!(editor["source"], "ldp x8\n");
    }

    #[test]
    fn test_invalid_redact_pattern_keeps_source_and_warns() {
        let mut reporter = CollectReporter::new();
        let fragment = build_fragment(
            &Config::default(),
            "int main(){}",
            &ConfigValue::from("-O1"),
            "c++",
            "g142",
            Some("([unclosed"),
            &mut reporter,
        );
        let value = decode(&fragment);
        assert_eq!(
            value["content"][0]["content"][0]["componentState"]["source"],
            "int main(){}"
        );
        assert_eq!(reporter.warnings.len(), 1);
    }

    #[test]
    fn test_fragment_is_percent_encoded() {
        let mut reporter = CollectReporter::new();
        let fragment = build_fragment(
            &Config::default(),
            "int main() { return 0; }",
            &ConfigValue::from("-O1"),
            "c++",
            "g142",
            None,
            &mut reporter,
        );
        // No raw JSON structure characters survive encoding
        assert!(!fragment.contains('{'));
        assert!(!fragment.contains('"'));
        assert!(!fragment.contains(' '));
        assert!(fragment.starts_with("%7B%22version%22%3A4"));
    }

    #[test]
    fn test_build_url_appends_fragment_after_hash() {
        let config = Config::default();
        let url = build_url(&config, "abc");
        assert_eq!(url, "https://slides.compiler-explorer.com#abc");
    }

    #[test]
    fn test_link_for_block_uses_resolved_fields() {
        let mut reporter = CollectReporter::new();
        let block = ParsedCodeBlock {
            language: "rust".to_string(),
            compiler: "r1890".to_string(),
            options: "-C opt-level=3".to_string(),
            source: "fn main() {}".to_string(),
            display_source: "fn main() {}".to_string(),
            remove_regex: None,
        };
        let fragment = link_for_block(&Config::default(), &block, &mut reporter);
        let value = decode(&fragment);

        let editor = &value["content"][0]["content"][0]["componentState"];
        assert_eq!(editor["lang"], "rust");
        let compiler = &value["content"][0]["content"][1]["componentState"];
        assert_eq!(compiler["compiler"], "r1890");
        assert_eq!(compiler["options"], "-C opt-level=3 -Wall -Wextra");
    }
}
