use pretty_assertions::assert_eq;
use sprig_template::{parse_template, serialize};

#[test]
fn round_trip_keeps_tags_and_partitions_attributes() {
    let src = r#"<div (click)="go()" class="card" [title]="t" *if="ok"><img src="a.png"><span>{{name}}</span></div>"#;
    let res = parse_template(src);
    assert!(!res.has_errors());
    let out = serialize(&res.document);
    assert_eq!(
        out,
        r#"<div class="card" *if="ok" [title]="t" (click)="go()"><img src="a.png"><span>{{ name }}</span></div>"#
    );
}

#[test]
fn reparse_is_stable() {
    let src = r#"<ul><li *for="let x of xs" [class.odd]="x.odd">{{ x.label }}</li></ul>"#;
    let once = serialize(&parse_template(src).document);
    let twice = serialize(&parse_template(&once).document);
    assert_eq!(once, twice);
}
