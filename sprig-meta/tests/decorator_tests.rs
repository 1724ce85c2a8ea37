use sprig_meta::{
    ServiceScope, UnitMetadata, parse_component, parse_directive, parse_module, parse_pipe,
    parse_route, parse_service, parse_unit,
};

#[test]
fn pipe_metadata() {
    let classes = parse_module(
        r#"
@Pipe({ name: 'currency', pure: false })
export class CurrencyPipe {
  transform(value: number, code = "USD"): string { return `${code} ${value}`; }
}

@Pipe({ name: "upper" })
export class UpperPipe {}
"#,
    );
    let currency = parse_pipe(&classes[0]).unwrap();
    assert_eq!(currency.name, "currency");
    assert_eq!(currency.class_name, "CurrencyPipe");
    assert!(!currency.pure);
    assert!(parse_pipe(&classes[1]).unwrap().pure);
}

#[test]
fn pipe_without_name_is_not_a_pipe() {
    let classes = parse_module("@Pipe({ pure: true }) export class Nameless {}");
    assert_eq!(parse_pipe(&classes[0]), None);
    let plain = parse_module("export class NotAPipe {}");
    assert_eq!(parse_pipe(&plain[0]), None);
}

#[test]
fn directive_selector_keeps_sigil() {
    let classes = parse_module(
        r#"@Directive({ selector: "*highlight" })
export class HighlightDirective {
  transform(color: string) { return { style: { background: color } }; }
}"#,
    );
    let d = parse_directive(&classes[0]).unwrap();
    assert_eq!(d.selector, "*highlight");
    assert_eq!(d.bare_selector(), "highlight");
    assert_eq!(d.class_name, "HighlightDirective");
}

#[test]
fn component_options() {
    let classes = parse_module(
        r#"@Component({
  template: './counter.html',
  island: true,
  styles: ['./counter.css'],
})
export class CounterComponent {}"#,
    );
    let c = parse_component(&classes[0]).unwrap();
    assert_eq!(c.template, "./counter.html");
    assert!(c.island);
    assert_eq!(c.styles, vec!["./counter.css".to_string()]);
}

#[test]
fn island_defaults_to_false() {
    let classes = parse_module(r#"@Component({ template: "./a.html" }) class A {}"#);
    assert!(!parse_component(&classes[0]).unwrap().island);
}

#[test]
fn route_options() {
    let classes = parse_module(
        r#"@Route({ template: "./user.html", path: "/users/:id", layout: MainLayout })
export class UserRoute {}"#,
    );
    let r = parse_route(&classes[0]).unwrap();
    assert_eq!(r.path.as_deref(), Some("/users/:id"));
    assert_eq!(r.layout.as_deref(), Some("MainLayout"));
    assert!(matches!(parse_unit(&classes[0]), Some(UnitMetadata::Route(_))));
}

#[test]
fn service_options() {
    let classes = parse_module(
        r#"@Service({ scope: 'request', onStartup: true }) export class Db {}
@Service() export class Cache {}"#,
    );
    let db = parse_service(&classes[0]).unwrap();
    assert_eq!(db.scope, ServiceScope::Request);
    assert!(db.on_startup);
    assert_eq!(parse_service(&classes[1]).unwrap().scope, ServiceScope::Singleton);
}

#[test]
fn decorator_text_in_strings_is_not_a_class() {
    let classes = parse_module(
        r#"const doc = "@Component({ template: './fake.html' }) export class Fake {}";
/* @Route({ template: './x.html' }) class Commented {} */
export class Real {}"#,
    );
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "Real");
}

#[test]
fn malformed_options_do_not_fail() {
    let classes = parse_module("@Component({ template: }) export class Broken {}");
    let c = parse_component(&classes[0]).unwrap();
    assert_eq!(c.template, "");
}
