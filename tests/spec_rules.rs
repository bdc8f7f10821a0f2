//! Table tests for compiling single spec rules and applying them to input
//! tokens.

use rpsl::{Argument, Arguments, SchemaParser};
use rstest::rstest;

fn parser() -> SchemaParser {
    SchemaParser::with_known_keys(["key-cert", "aut-num", "as-set", "nic-hdl"])
}

#[rstest]
// enum
#[case("{policy:ask,closed,open,reserved}", &["FOO"], 0, "")]
#[case(
    "{ask,closed,open,reserved}",
    &["FOO"],
    0,
    "ask:false closed:false open:false reserved:false"
)]
#[case("{policy:ask,closed,open,reserved}", &["open", "FOO"], 1, r#"policy:"open""#)]
#[case(
    "{ask,closed,open,reserved}",
    &["ask", "FOO"],
    1,
    "ask:true closed:false open:false reserved:false"
)]
// label
#[case("[data:str]", &["FOO", "BAR"], 1, r#"data:"FOO""#)]
#[case("[data:str]", &[], 0, "")]
#[case("[number:int]", &["123", "BAR"], 1, "number:123")]
#[case("[number:float]", &["1.23", "BAR"], 1, "number:1.23")]
#[case("[bool:bool]", &["true", "BAR"], 1, "bool:true")]
#[case("[admin-c:email]", &["me@sour.is", "BAR"], 1, "admin-c:<me@sour.is>")]
#[case(
    "[admin-c:email]",
    &["Xuu", "(dn42)", "<me@sour.is>", "BAR"],
    3,
    r#"admin-c:"Xuu (dn42)" <me@sour.is>"#
)]
// lookup
#[case("[mntner:nic-hdl]", &["XUU-MNT", "XXX"], 1, "mntner:nic-hdl/XUU-MNT")]
#[case(
    "[member:aut-num,as-set]",
    &["AS12345", "XXX"],
    1,
    "member:aut-num/AS12345|as-set/AS12345"
)]
#[case("[member:aut-num,as-set]", &[], 0, "")]
// const
#[case("'>'", &[">", "XXX"], 1, "")]
#[case("'>'", &["XXX", ">", "XXX"], 2, "")]
#[case("'>'", &["XXX", "XXX", "XXX"], 3, "")]
// text
#[case("...", &["XXX", "XXX", "XXX"], 3, r#"...:"XXX XXX XXX""#)]
// pipe
#[case(
    "{type:ssh-ed25519,ssh-rsa}|[lookup:key-cert]",
    &["ssh-rsa", "XXX"],
    1,
    r#"type:"ssh-rsa""#
)]
#[case(
    "{type:ssh-ed25519,ssh-rsa}|[lookup:key-cert]",
    &["PGP-ASDFASDF", "XXX"],
    1,
    "lookup:key-cert/PGP-ASDFASDF"
)]
#[case("{type:a,b}|[x:person]", &["zzz", "q"], 0, "")]
fn test_spec_rule(
    #[case] token: &str,
    #[case] input: &[&str],
    #[case] consumed: usize,
    #[case] expected: &str,
) {
    let spec = parser().parse_spec(&[token]).unwrap();
    assert_eq!(spec.len(), 1);
    assert_eq!(spec.to_string(), token);

    let rule = &spec.rules()[0];
    assert_eq!(rule.to_string(), token);

    let input: Vec<String> = input.iter().map(|s| s.to_string()).collect();
    let mut args = Arguments::new();
    assert_eq!(rule.apply(&mut args, &input), consumed);
    assert_eq!(args.to_string(), expected);
}

#[rstest]
#[case("[port:int]", &["80x", "BAR"], 1, "port", "80x")]
#[case("[weight:float]", &["heavy", "BAR"], 1, "weight", "heavy")]
#[case("[secure:bool]", &["yes", "BAR"], 1, "secure", "yes")]
#[case("[owner:email]", &["Xuu", "<nohost>", "BAR"], 2, "owner", "Xuu <nohost>")]
fn test_conversion_failure_is_captured(
    #[case] token: &str,
    #[case] input: &[&str],
    #[case] consumed: usize,
    #[case] name: &str,
    #[case] original: &str,
) {
    let spec = parser().parse_spec(&[token]).unwrap();
    let input: Vec<String> = input.iter().map(|s| s.to_string()).collect();
    let mut args = Arguments::new();

    assert_eq!(spec.rules()[0].apply(&mut args, &input), consumed);
    assert_eq!(args.len(), 1);
    match args.get(name) {
        Some(Argument::Error { text, .. }) => assert_eq!(text, original),
        other => panic!("expected a conversion error under {name}, got {other:?}"),
    }
}

#[rstest]
#[case("bare")]
#[case("{")]
#[case("'two words'")]
#[case("[a,b]")]
#[case("[member:aut-num,route-set]")]
#[case("[a]||[b]")]
fn test_invalid_rule(#[case] token: &str) {
    assert!(parser().parse_rule(token).is_err(), "{token} should not compile");
}

#[rstest]
#[case(&["[name]", "{deprecate,optional,recommend,required}", "{multiple,single}", "{,primary}", "'>'", "..."])]
#[case(&["{space:ALLOCATED,ASSIGNED}", "{use:,ANYCAST}"])]
#[case(&["[lat-c]", "[long-c]", "[name]"])]
fn test_spec_display_reconstructs_tokens(#[case] tokens: &[&str]) {
    let spec = parser().parse_spec(tokens).unwrap();
    assert_eq!(spec.to_string(), tokens.join(" "));
}

#[test]
fn test_email_label_parses_display_name() {
    let spec = parser().parse_spec(&["[owner:email]"]).unwrap();
    let input: Vec<String> = ["Xuu", "(dn42)", "<me@sour.is>", "BAR"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let args = spec.apply(&input);

    let email = args.get("owner").and_then(|a| a.as_email()).unwrap();
    assert_eq!(email.name.as_deref(), Some("Xuu (dn42)"));
    assert_eq!(email.address, "me@sour.is");
    assert_eq!(args.get("...").map(ToString::to_string).as_deref(), Some("BAR"));
}
