//! Integration tests for record parsing, mutation and re-serialization.

use rpsl::{parse_str, Attribute, Object, Schemas};

const PERSON: &str = "\
person:             Xuu
contact:            xmpp:xuu@xmpp.dn42
contact:            mail:xuu@dn42.us
remarks:            test
                    foo
+
                    bar
pgp-fingerprint:    20AE2F310A74EA7CEC3AE69F8B3B0604F164E04F
nic-hdl:            XUU-DN42
mnt-by:             XUU-MNT
source:             DN42
";

const FOO_SCHEMA: &str = "\
schema:             empty
key:                empty required single
key:                foo required single primary
";

fn lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn text_or(attr: Option<Attribute>, fallback: &str) -> String {
    attr.map(|a| a.text()).unwrap_or_else(|| fallback.to_string())
}

#[test]
fn test_person_round_trip_and_accessors() {
    let object = Object::parse(PERSON);

    assert_eq!(object.to_string(), PERSON);
    assert_eq!(object.schema_name(), "person");

    let person = object.get("person").unwrap();
    assert_eq!(person.name, "person");
    assert_eq!(person.text(), "Xuu");

    assert_eq!(object.get("contact").unwrap().text(), "xmpp:xuu@xmpp.dn42");
    assert_eq!(object.get_n("contact", 1).unwrap().text(), "mail:xuu@dn42.us");
    assert!(object.get_n("contact", 2).is_none());
    assert_eq!(
        object.get_all("contact").text(),
        "xmpp:xuu@xmpp.dn42\nmail:xuu@dn42.us"
    );
    assert_eq!(
        object.get_all("contact").fields(),
        vec!["xmpp:xuu@xmpp.dn42", "mail:xuu@dn42.us"]
    );
    assert_eq!(object.get("remarks").unwrap().fields(), vec!["test", "foo", "bar"]);

    assert!(object.get("mntner").is_none());
    assert_eq!(text_or(object.get("mntner"), "default"), "default");
    assert_eq!(object.get_all("mntner").default_text("default"), "default");
}

#[test]
fn test_person_mutation() {
    let mut object = Object::parse(PERSON);

    object.set("contact", ["xmpp:Xuu@xmpp.dn42"]);
    object.set_n("contact", 1, ["mail:Xuu@dn42.us"]);
    object.add("contact", ["mail:me@sour.is"]);
    assert_eq!(object.get_n("contact", 2).unwrap().text(), "mail:me@sour.is");

    object.set_n("contact", usize::MAX, ["mail:jon@xuu.cc"]);
    assert_eq!(
        object.get_all("contact").text(),
        "xmpp:Xuu@xmpp.dn42\nmail:Xuu@dn42.us\nmail:me@sour.is\nmail:jon@xuu.cc"
    );

    object.set_n("remarks", usize::MAX, ["multi", "line", "remarks"]);
    assert_eq!(object.get_n("remarks", 1).unwrap().text(), "multi\nline\nremarks");
}

#[test]
fn test_build_object_and_apply_schema() {
    let mut object = Object::parse("");
    assert!(object.is_empty());
    assert_eq!(object.name(), "");
    assert_eq!(object.schema_name(), "");
    assert_eq!(object.primary(), "");

    object.add("empty", Vec::<&str>::new());
    assert_eq!(object.name(), "");
    assert_eq!(object.schema_name(), "empty");
    assert_eq!(object.primary(), "empty");

    object.set("empty", ["value"]);
    assert_eq!(object.name(), "value");
    assert_eq!(text_or(object.get("foo"), "baz"), "baz");
    assert_eq!(object.get_all("foo").default_text("baz"), "baz");

    object.add("foo", ["bar"]);
    object.add("other", ["one", "two # comment two", "three  #comment three "]);
    object.add("none", Vec::<&str>::new());
    object.add("something-very-long-past-19", Vec::<&str>::new());
    assert_eq!(object.get_all("foo").default_text("baz"), "bar");

    assert_eq!(
        object.to_string(),
        lines(&[
            "empty:                        value",
            "foo:                          bar",
            "other:                        one",
            "                              two # comment two",
            "                              three # comment three",
            "none:                         ",
            "something-very-long-past-19:  ",
        ])
    );

    let schema_objects = parse_str(FOO_SCHEMA);
    assert_eq!(schema_objects[0].to_string(), FOO_SCHEMA);

    let schemas = Schemas::parse(&schema_objects).unwrap();
    assert_eq!(schemas.items().len(), 1);
    assert_eq!(
        schemas.get("empty").unwrap().to_string(),
        "schema: empty\n\
         primary: foo\n\
         empty: multiline,required,single\n\
         foo: oneline,primary,required,single"
    );

    assert!(schemas.apply_one(&mut object));
    assert_eq!(object.name(), "bar");
    assert_eq!(object.schema_name(), "empty");
    assert_eq!(object.primary(), "foo");

    object.delete("something-very-long-past-19");
    assert_eq!(
        object.to_string(),
        lines(&[
            "empty:              value",
            "foo:                bar",
            "other:              one",
            "                    two # comment two",
            "                    three # comment three",
            "none:               ",
        ])
    );
}

#[test]
fn test_multiline_attribute_with_schema() {
    let mut object = Object::parse("foo:    bar # comment\n        bin\n        baz\n");
    assert_eq!(object.attrs().len(), 1);

    let foo = object.get("foo").unwrap();
    assert_eq!(foo.lines(), vec!["bar", "bin", "baz"]);
    assert_eq!(foo.text(), "bar\nbin\nbaz");
    assert_eq!(foo.comment(), "comment");
    assert_eq!(foo.raw(), "bar # comment\nbin\nbaz");
    assert!(object.get("missing").is_none());

    let schemas = Schemas::parse(&parse_str(
        "schema: foo\nkey:    foo required single primary > [one] [two]\n",
    ))
    .unwrap();
    schemas.apply_one(&mut object);

    let args = object.get("foo").unwrap().args();
    assert_eq!(args.get("one").map(ToString::to_string).as_deref(), Some("bar"));
    assert_eq!(args.get("two").map(ToString::to_string).as_deref(), Some("bin"));
    assert_eq!(args.get("...").map(ToString::to_string).as_deref(), Some("baz"));
    assert_eq!(
        serde_json::to_string(&object).unwrap(),
        r#"[["foo",{"...":"baz","one":"bar","two":"bin"}]]"#
    );
}

#[test]
fn test_break_marker_and_comments() {
    let object = Object::parse("other:   one\n+\n         two # c2\n         three # c3\n");
    let other = object.get("other").unwrap();

    assert_eq!(other.lines(), vec!["one", "", "two", "three"]);
    assert_eq!(other.comment(), "c2\nc3");
    assert_eq!(
        object.to_string(),
        lines(&[
            "other:              one",
            "+",
            "                    two # c2",
            "                    three # c3",
        ])
    );
}

#[test]
fn test_delete_only_attribute_removes_name() {
    let mut object = Object::parse("mntner: XUU-MNT\nX: gone\n");
    object.delete("X");
    assert!(object.get("X").is_none());
    assert!(object.get_all("X").is_empty());

    object.add("X", ["back"]);
    assert_eq!(object.get("X").unwrap().text(), "back");
    object.delete_all("X");
    assert!(object.get("X").is_none());
    assert_eq!(object.attrs().len(), 1);
}
