use std::collections::HashMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;
use sprig_compiler::{CompilationBuilder, CompileError, CompileOutput, CompilerConfig, SourceModule};
use sprig_meta::ServiceScope;

const HIGHLIGHT: &str = r#"
@Directive({ selector: '*highlight' })
export class HighlightDirective {
  transform(value: string) {
    return { style: { background: value } };
  }
}
"#;

const UPPER: &str = r#"
@Pipe({ name: 'upper' })
export class UpperPipe {
  transform(value: string): string {
    return value.toUpperCase();
  }
}
"#;

const USER_CARD: &str = r#"
@Component({ template: "./user-card.html" })
export class UserCardComponent {
  @Input() name: string;
  @Input() age: number = 30;

  get label() {
    return `${this.name} (${this.age})`;
  }
}
"#;

const USER_ROUTE: &str = r#"
@Route({ template: "./user.html" })
export class UserRoute {
  @Input() id: string;
  @Input({ alias: 'displayName' }) name: string = "Guest";
}
"#;

/// In-memory project rooted at `src/`.
#[derive(Default)]
struct Project {
    modules: Vec<SourceModule>,
    files: HashMap<PathBuf, String>,
}

impl Project {
    fn module(mut self, rel: &str, source: &str) -> Self {
        self.modules.push(SourceModule {
            path: PathBuf::from("src").join(rel),
            rel_path: rel.to_string(),
            source: source.to_string(),
        });
        self
    }

    fn file(mut self, rel: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from("src").join(rel), contents.to_string());
        self
    }

    fn builder(&self, config: CompilerConfig) -> CompilationBuilder {
        let mut builder = CompilationBuilder::new(config);
        for m in &self.modules {
            builder.add_module(m, &self.files);
        }
        builder
    }

    fn compile(&self) -> CompileOutput {
        self.builder(CompilerConfig::default()).build().compile_all()
    }
}

fn user_project() -> Project {
    Project::default()
        .module("directives/highlight.directive.ts", HIGHLIGHT)
        .module("pipes/upper.pipe.ts", UPPER)
        .module("components/user-card.component.ts", USER_CARD)
        .file("components/user-card.html", r#"<div class="card">{{ label }}</div>"#)
        .module("routes/users/[id].ts", USER_ROUTE)
        .file(
            "routes/users/user.html",
            "<section>\n  <user-card [name]=\"name\"></user-card>\n  <p>{{ id | upper }}</p>\n</section>\n",
        )
}

fn file<'a>(out: &'a CompileOutput, path: &str) -> &'a str {
    out.files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.contents.as_str())
        .unwrap_or_else(|| panic!("{path} not generated"))
}

#[test]
fn discovery_fills_registries() {
    let compilation = user_project().builder(CompilerConfig::default()).build();
    assert!(compilation.directives().has("highlight"));
    assert!(compilation.pipes().has("upper"));
    assert_eq!(compilation.units().len(), 2);
    assert_eq!(compilation.components().len(), 1);
    assert_eq!(compilation.components()[0].selector, "user-card");
    assert_eq!(compilation.components()[0].import_path, "@/components/UserCard.tsx");
}

#[test]
fn generates_every_file_in_order() {
    let out = user_project().compile();
    assert!(out.failures.is_empty(), "{:?}", out.failures);
    let paths: Vec<&str> = out.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "components/UserCard.tsx",
            "dev-props/UserCard.json",
            "routes/users/[id].tsx",
            "directives/highlight.ts",
            "directives/index.ts",
            "pipes/upper.ts",
            "pipes/index.ts",
        ]
    );
}

#[test]
fn component_module() {
    let out = user_project().compile();
    assert_eq!(
        file(&out, "components/UserCard.tsx"),
        r#"// Generated by sprig. Do not edit.

export interface UserCardProps {
  name: string;
  age?: number;
}

export default function UserCard(props: UserCardProps) {
  const name = props.name;
  const age = props.age ?? 30;
  const label = `${name} (${age})`;

  return <div class="card">{label}</div>;
}
"#
    );
}

#[test]
fn route_module() {
    let out = user_project().compile();
    assert_eq!(
        file(&out, "routes/users/[id].tsx"),
        r#"// Generated by sprig. Do not edit.
import type { PageProps } from "$fresh/server.ts";
import { upper } from "@/pipes/upper.ts";
import UserCard from "@/components/UserCard.tsx";

export default function UserPage({ data }: PageProps) {
  const id = data.id;
  const name = data.displayName ?? "Guest";

  return (
    <section>
      <UserCard name={name} />
      <p>{upper(id)}</p>
    </section>
  );
}
"#
    );
}

#[test]
fn dev_props_merge_defaults_and_sidecar() {
    let project = user_project().file(
        "components/user-card.component.props.json",
        r#"{ "props": { "name": "Ada", "mood": "happy" }, "scenarios": { "old": { "age": 99 } } }"#,
    );
    let out = project.compile();
    let dev: serde_json::Value = serde_json::from_str(file(&out, "dev-props/UserCard.json")).unwrap();
    assert_eq!(
        dev,
        json!({
            "props": { "name": "Ada", "age": 30, "mood": "happy" },
            "scenarios": { "old": { "age": 99 } }
        })
    );
}

#[test]
fn dev_props_fall_back_to_placeholders() {
    let out = user_project().compile();
    let dev: serde_json::Value = serde_json::from_str(file(&out, "dev-props/UserCard.json")).unwrap();
    assert_eq!(dev, json!({ "props": { "name": "Sample name", "age": 30 } }));
}

#[test]
fn layout_wraps_route() {
    let out = Project::default()
        .module(
            "layouts/main.layout.ts",
            r#"@Layout({ template: "./main.html" }) export class MainLayout {}"#,
        )
        .file("layouts/main.html", r#"<div class="shell"><outlet /></div>"#)
        .module(
            "routes/about.ts",
            r#"@Route({ template: "./about.html", layout: 'MainLayout' }) export class AboutRoute {}"#,
        )
        .file("routes/about.html", "<h1>About</h1>")
        .compile();
    assert!(out.failures.is_empty(), "{:?}", out.failures);

    assert_eq!(
        file(&out, "layouts/MainLayout.tsx"),
        r#"// Generated by sprig. Do not edit.
import type { PageProps } from "$fresh/server.ts";
import type { ComponentChildren } from "preact";

export default function MainLayout({ Component, children }: Partial<PageProps> & { children?: ComponentChildren }) {
  return <div class="shell">{children ?? <Component />}</div>;
}
"#
    );
    assert_eq!(
        file(&out, "routes/about.tsx"),
        r#"// Generated by sprig. Do not edit.
import MainLayout from "@/layouts/MainLayout.tsx";

export default function AboutPage() {
  return (
    <MainLayout>
      <h1>About</h1>
    </MainLayout>
  );
}
"#
    );
}

#[test]
fn interactive_route_fails_alone() {
    let out = user_project()
        .module("routes/contact.ts", r#"@Route({ template: "./contact.html" }) export class ContactRoute {}"#)
        .file("routes/contact.html", r#"<button (click)="send()">Send</button>"#)
        .compile();

    assert_eq!(out.failures.len(), 1);
    let failure = &out.failures[0];
    match &failure.error {
        CompileError::InteractiveRoute { route, binding } => {
            assert_eq!(route, "/contact");
            assert_eq!(binding, "(click)");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(failure.error.to_string().contains("/contact"));
    // the other units still compile
    assert!(out.files.iter().any(|f| f.path == "routes/users/[id].tsx"));
    assert!(!out.files.iter().any(|f| f.path == "routes/contact.tsx"));
}

#[test]
fn two_way_binding_in_route_fails() {
    let out = Project::default()
        .module("routes/search.ts", r#"@Route({ template: "./search.html" }) export class SearchRoute {}"#)
        .file("routes/search.html", r#"<form><input [(value)]="query"></form>"#)
        .compile();
    assert_eq!(out.failures.len(), 1);
    let message = out.failures[0].error.to_string();
    assert!(message.contains("/search"), "{message}");
    assert!(message.contains("[(value)]"), "{message}");
}

#[test]
fn missing_template_is_reported() {
    let out = Project::default()
        .module(
            "components/ghost.component.ts",
            r#"@Component({ template: "./ghost.html" }) export class GhostComponent {}"#,
        )
        .compile();
    assert_eq!(out.failures.len(), 1);
    assert!(matches!(out.failures[0].error, CompileError::MissingTemplate { .. }));
    assert!(out.failures[0].unit.contains("GhostComponent"));
}

#[test]
fn strict_mode_rejects_broken_templates() {
    let project = Project::default()
        .module(
            "components/broken.component.ts",
            r#"@Component({ template: "./broken.html" }) export class BrokenComponent {}"#,
        )
        .file("components/broken.html", "<div><span>text</div>");

    let lenient = project.compile();
    assert!(lenient.failures.is_empty());
    assert!(lenient.files.iter().any(|f| f.path == "components/Broken.tsx"));

    let config = CompilerConfig {
        strict_templates: true,
        ..CompilerConfig::default()
    };
    let strict = project.builder(config).build().compile_all();
    assert_eq!(strict.failures.len(), 1);
    assert!(matches!(strict.failures[0].error, CompileError::TemplateSyntax { .. }));
}

#[test]
fn islands_and_services() {
    let compilation = Project::default()
        .module(
            "islands/counter.ts",
            r#"@Component({ template: "./counter.html", island: true }) export class CounterComponent {}"#,
        )
        .file("islands/counter.html", r#"<button (click)="count++">{{ count }}</button>"#)
        .module("services/db.ts", r#"@Service({ scope: 'request' }) export class Db {}"#)
        .builder(CompilerConfig::default())
        .build();

    assert_eq!(compilation.services().len(), 1);
    assert_eq!(compilation.services()[0].class_name, "Db");
    assert_eq!(compilation.services()[0].metadata.scope, ServiceScope::Request);

    let out = compilation.compile_all();
    assert!(out.failures.is_empty(), "{:?}", out.failures);
    assert!(file(&out, "islands/Counter.tsx").contains("<button onClick={() => count++}>{count}</button>"));
}

#[test]
fn compiling_twice_gives_identical_output() {
    let compilation = user_project().builder(CompilerConfig::default()).build();
    let first = compilation.compile_all();
    let second = compilation.compile_all();
    assert_eq!(first.files, second.files);
}
