use pretty_assertions::assert_eq;
use sprig_compiler::wrappers::{
    generate_directive_index, generate_directive_wrapper, generate_pipe_index, generate_pipe_wrapper,
};
use sprig_compiler::{CompilerConfig, DirectiveRegistry, Import, PipeRegistry};
use sprig_meta::{DirectiveMetadata, PipeMetadata};

fn highlight() -> DirectiveMetadata {
    DirectiveMetadata {
        selector: "*highlight".into(),
        class_name: "HighlightDirective".into(),
    }
}

#[test]
fn register_directive() {
    let config = CompilerConfig::default();
    let mut registry = DirectiveRegistry::new();
    let entry = registry.register(&highlight(), "directives/highlight.directive.ts", &config);
    assert_eq!(entry.selector, "highlight");
    assert_eq!(entry.transform_fn, "applyHighlightDirective");
    assert_eq!(entry.import_path, "@/directives/highlight.ts");
    assert_eq!(entry.source_import, "@/src/directives/highlight.directive.ts");

    assert!(registry.has("highlight"));
    assert!(registry.has("*highlight"));
    assert!(!registry.has("tooltip"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn directive_import_line() {
    let config = CompilerConfig::default();
    let mut registry = DirectiveRegistry::new();
    let entry = registry.register(&highlight(), "directives/highlight.directive.ts", &config);
    let import = Import::named(&entry.import_path, [entry.transform_fn.clone()]);
    assert_eq!(
        import.to_string(),
        r#"import { applyHighlightDirective } from "@/directives/highlight.ts";"#
    );
}

#[test]
fn reregistering_a_selector_replaces_it() {
    let config = CompilerConfig::default();
    let mut registry = DirectiveRegistry::new();
    registry.register(&highlight(), "a.ts", &config);
    registry.register(
        &DirectiveMetadata {
            selector: "highlight".into(),
            class_name: "OtherHighlight".into(),
        },
        "b.ts",
        &config,
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("highlight").map(|e| e.class_name.as_str()), Some("OtherHighlight"));
}

#[test]
fn directive_wrapper_module() {
    let config = CompilerConfig::default();
    let mut registry = DirectiveRegistry::new();
    let entry = registry.register(&highlight(), "directives/highlight.directive.ts", &config).clone();
    let file = generate_directive_wrapper(&entry, &config);
    assert_eq!(file.path, "directives/highlight.ts");
    assert_eq!(
        file.contents,
        r#"// Generated by sprig. Do not edit.
import { HighlightDirective } from "@/src/directives/highlight.directive.ts";

const instance = new HighlightDirective();

export function applyHighlightDirective(
  props: Record<string, unknown>,
  value: unknown,
): Record<string, unknown> {
  return { ...props, ...instance.transform(value, props) };
}
"#
    );
}

#[test]
fn empty_directive_index_is_still_a_module() {
    let config = CompilerConfig::default();
    let file = generate_directive_index(&DirectiveRegistry::new(), &config);
    assert_eq!(file.path, "directives/index.ts");
    assert!(file.contents.contains("No custom directives"));
    assert!(file.contents.contains("export {};"));
}

#[test]
fn directive_index_lists_wrappers_by_selector() {
    let config = CompilerConfig::default();
    let mut registry = DirectiveRegistry::new();
    registry.register(
        &DirectiveMetadata {
            selector: "tooltip".into(),
            class_name: "TooltipDirective".into(),
        },
        "t.ts",
        &config,
    );
    registry.register(&highlight(), "h.ts", &config);
    let file = generate_directive_index(&registry, &config);
    assert_eq!(
        file.contents,
        "// Generated by sprig. Do not edit.\n\
         export { applyHighlightDirective } from \"./highlight.ts\";\n\
         export { applyTooltipDirective } from \"./tooltip.ts\";\n"
    );
}

#[test]
fn pipe_registry_and_wrappers() {
    let config = CompilerConfig::default();
    let mut registry = PipeRegistry::new();
    let pure = registry
        .register(
            &PipeMetadata {
                name: "currency".into(),
                class_name: "CurrencyPipe".into(),
                pure: true,
            },
            "pipes/currency.pipe.ts",
            &config,
        )
        .clone();
    let impure = registry
        .register(
            &PipeMetadata {
                name: "now".into(),
                class_name: "NowPipe".into(),
                pure: false,
            },
            "pipes/now.pipe.ts",
            &config,
        )
        .clone();
    assert!(registry.has("currency"));
    assert!(!registry.has("upper"));
    assert_eq!(pure.import_path, "@/pipes/currency.ts");

    let memo = generate_pipe_wrapper(&pure, &config);
    assert_eq!(memo.path, "pipes/currency.ts");
    assert!(memo.contents.contains("import { CurrencyPipe } from \"@/src/pipes/currency.pipe.ts\";"));
    assert!(memo.contents.contains("export function currency(...args: unknown[]): unknown {"));
    assert!(memo.contents.contains("Object.is(arg, args[i])"));

    let plain = generate_pipe_wrapper(&impure, &config);
    assert!(!plain.contents.contains("lastArgs"));
    assert!(plain.contents.contains("return (instance as any).transform(...args);"));

    let index = generate_pipe_index(&registry, &config);
    assert!(index.contents.contains("export { currency } from \"./currency.ts\";"));
    assert!(index.contents.contains("export { now } from \"./now.ts\";"));
    assert!(generate_pipe_index(&PipeRegistry::new(), &config).contents.contains("No custom pipes"));
}

#[test]
fn custom_output_alias_and_directories() {
    let config = CompilerConfig::from_toml(
        r#"
import_alias = "~/"
directives_dir = "generated/directives"
"#,
    )
    .unwrap();
    let mut registry = DirectiveRegistry::new();
    let entry = registry.register(&highlight(), "directives/highlight.directive.ts", &config);
    assert_eq!(entry.import_path, "~/generated/directives/highlight.ts");
}
