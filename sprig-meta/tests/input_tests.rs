use pretty_assertions::assert_eq;
use sprig_meta::{InputMetadata, find_decorated, parse_inputs, parse_module};

fn inputs(src: &str) -> Vec<InputMetadata> {
    let classes = parse_module(src);
    let class = find_decorated(&classes, "Component").expect("component class");
    parse_inputs(class)
}

const PROFILE: &str = r#"
import { Component, Input } from "@sprig/core";

@Component({ template: "./profile.html" })
export class ProfileComponent {
  @Input() name: string;
  @Input() age: number = 25;
  @Input({ required: true }) id: string;
  @Input({ alias: 'userName' }) internalName: string;
  @Input() nickname?: string;
  @Input({ required: false }) title: string;
  @Input('tagLine') tag = "hello; world";
  @Input() tags: string[] = ['a', 'b'];

  private cache = new Map<string, number>();

  get greeting(): string {
    return `Hi ${this.name}`;
  }
}
"#;

#[test]
fn plain_input_is_required() {
    let all = inputs(PROFILE);
    assert_eq!(
        all[0],
        InputMetadata {
            name: "name".into(),
            property_name: "name".into(),
            type_text: "string".into(),
            default_value: None,
            required: true,
        }
    );
}

#[test]
fn default_value_makes_input_optional() {
    let age = &inputs(PROFILE)[1];
    assert_eq!(age.type_text, "number");
    assert_eq!(age.default_value.as_deref(), Some("25"));
    assert!(!age.required);
}

#[test]
fn explicit_required_wins() {
    let all = inputs(PROFILE);
    assert!(all[2].required);
    assert_eq!(all[2].name, "id");
    assert!(!all[5].required);
}

#[test]
fn alias_renames_template_facing_name() {
    let all = inputs(PROFILE);
    assert_eq!(all[3].name, "userName");
    assert_eq!(all[3].property_name, "internalName");
    assert_eq!(all[6].name, "tagLine");
    assert_eq!(all[6].property_name, "tag");
}

#[test]
fn optional_marker_is_stripped_from_type() {
    let nick = &inputs(PROFILE)[4];
    assert_eq!(nick.type_text, "string");
    assert!(!nick.required);
}

#[test]
fn default_is_kept_as_raw_text() {
    let all = inputs(PROFILE);
    assert_eq!(all[6].default_value.as_deref(), Some("\"hello; world\""));
    assert_eq!(all[6].type_text, "string");
    assert_eq!(all[7].type_text, "string[]");
    assert_eq!(all[7].default_value.as_deref(), Some("['a', 'b']"));
}

#[test]
fn only_decorated_properties_are_inputs() {
    assert_eq!(inputs(PROFILE).len(), 8);
}

#[test]
fn class_without_inputs_yields_empty_list() {
    let src = r#"@Component({ template: "./x.html" }) export class X { count = 0; }"#;
    assert!(inputs(src).is_empty());
}
