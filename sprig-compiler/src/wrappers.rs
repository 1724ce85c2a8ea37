//! Wrapper modules that turn `@Directive` and `@Pipe` classes into plain
//! functions, plus the index modules re-exporting them.

use crate::codegen::{BANNER, GeneratedFile};
use crate::config::CompilerConfig;
use crate::registry::{DirectiveEntry, DirectiveRegistry, PipeEntry, PipeRegistry};

pub fn generate_directive_wrapper(entry: &DirectiveEntry, config: &CompilerConfig) -> GeneratedFile {
    let contents = format!(
        r#"{BANNER}
import {{ {class} }} from "{source}";

const instance = new {class}();

export function {func}(
  props: Record<string, unknown>,
  value: unknown,
): Record<string, unknown> {{
  return {{ ...props, ...instance.transform(value, props) }};
}}
"#,
        class = entry.class_name,
        source = entry.source_import,
        func = entry.transform_fn,
    );
    GeneratedFile {
        path: format!("{}/{}.ts", config.directives_dir, entry.selector),
        contents,
    }
}

/// Always generated, so `directives/index.ts` can be imported whether or
/// not the project declares any directive.
pub fn generate_directive_index(registry: &DirectiveRegistry, config: &CompilerConfig) -> GeneratedFile {
    let mut contents = format!("{BANNER}\n");
    if registry.is_empty() {
        contents.push_str("// No custom directives in this project.\nexport {};\n");
    } else {
        for entry in registry.get_all() {
            contents.push_str(&format!(
                "export {{ {} }} from \"./{}.ts\";\n",
                entry.transform_fn, entry.selector
            ));
        }
    }
    GeneratedFile {
        path: format!("{}/index.ts", config.directives_dir),
        contents,
    }
}

/// Pure pipes return the previous result while called with the same
/// arguments; impure pipes call `transform` every time.
pub fn generate_pipe_wrapper(entry: &PipeEntry, config: &CompilerConfig) -> GeneratedFile {
    let mut contents = format!(
        r#"{BANNER}
import {{ {class} }} from "{source}";

const instance = new {class}();
"#,
        class = entry.class_name,
        source = entry.source_import,
    );
    if entry.pure {
        contents.push_str(&format!(
            r#"
let lastArgs: unknown[] | undefined;
let lastResult: unknown;

export function {name}(...args: unknown[]): unknown {{
  if (
    lastArgs !== undefined &&
    lastArgs.length === args.length &&
    lastArgs.every((arg, i) => Object.is(arg, args[i]))
  ) {{
    return lastResult;
  }}
  lastArgs = args;
  // deno-lint-ignore no-explicit-any
  lastResult = (instance as any).transform(...args);
  return lastResult;
}}
"#,
            name = entry.name
        ));
    } else {
        contents.push_str(&format!(
            r#"
export function {name}(...args: unknown[]): unknown {{
  // deno-lint-ignore no-explicit-any
  return (instance as any).transform(...args);
}}
"#,
            name = entry.name
        ));
    }
    GeneratedFile {
        path: format!("{}/{}.ts", config.pipes_dir, entry.name),
        contents,
    }
}

pub fn generate_pipe_index(registry: &PipeRegistry, config: &CompilerConfig) -> GeneratedFile {
    let mut contents = format!("{BANNER}\n");
    if registry.is_empty() {
        contents.push_str("// No custom pipes in this project.\nexport {};\n");
    } else {
        for entry in registry.get_all() {
            contents.push_str(&format!("export {{ {} }} from \"./{}.ts\";\n", entry.name, entry.name));
        }
    }
    GeneratedFile {
        path: format!("{}/index.ts", config.pipes_dir),
        contents,
    }
}
