use jsonl_scrub::markup::strip;
use proptest::prelude::*;

#[test]
fn strips_every_tag_on_the_line() {
    let line = "<div class=\"row\"><p>{\"title\": \"<em>x</em>\"}</p></div>\r\n";
    assert_eq!(strip(line).as_ref(), "{\"title\": \"x\"}");
}

#[test]
fn tag_removal_is_non_greedy() {
    assert_eq!(strip("<a>keep<b>").as_ref(), "keep");
    assert_eq!(strip("1 <x> 2 <y> 3").as_ref(), "1  2  3");
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(strip("").as_ref(), "");
    assert_eq!(strip(" \t\n").as_ref(), "");
}

proptest! {
    #[test]
    fn tags_and_whitespace_only_strip_to_empty(
        pieces in proptest::collection::vec(
            prop_oneof!["<[^>]{0,12}>", "[ \t\r\n]{0,3}"],
            0..8,
        )
    ) {
        let line = pieces.concat();
        let cleaned = strip(&line);
        prop_assert_eq!(cleaned.as_ref(), "");
    }

    #[test]
    fn lines_without_brackets_are_only_trimmed(line in "[^<>]{0,40}") {
        let cleaned = strip(&line);
        prop_assert_eq!(cleaned.as_ref(), line.trim());
    }
}
