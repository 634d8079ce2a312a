use super::*;

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn splits_on_commas_and_whitespace() {
    assert_eq!(parse_words("sea, salt  air"), owned(&["sea", "salt", "air"]));
    assert_eq!(parse_words(" ,, "), Vec::<String>::new());
}

#[test]
fn short_single_word_stays_whole() {
    assert_eq!(parse_words("Hello"), owned(&["Hello"]));
    assert_eq!(parse_words("seventy"), owned(&["seventy"]));
}

#[test]
fn long_single_word_breaks_at_ceiling_midpoint() {
    assert_eq!(parse_words("symphony"), owned(&["symp", "hony"]));
    assert_eq!(parse_words("orchestra"), owned(&["orche", "stra"]));
}

#[test]
fn several_long_words_are_not_split() {
    assert_eq!(
        parse_words("orchestra symphony"),
        owned(&["orchestra", "symphony"])
    );
}

#[test]
fn guess_prefers_prefix_then_suffix_then_substring() {
    let related = owned(&["Harmony", "melody", "symphony", "moon"]);
    assert_eq!(guess_full_word("harm", &related), Some("Harmony"));
    assert_eq!(guess_full_word("ody", &related), Some("melody"));
    assert_eq!(guess_full_word("mph", &related), Some("symphony"));
    assert_eq!(guess_full_word("ony", &related), Some("Harmony"));
    assert_eq!(guess_full_word("zzz", &related), None);
    assert_eq!(guess_full_word("", &related), None);
}

#[test]
fn split_related_trims_entries() {
    assert_eq!(
        split_related(" tide , moon,, wave "),
        owned(&["tide", "moon", "wave"])
    );
}

#[test]
fn failed_or_empty_fetch_falls_back() {
    let defaults = default_related_words();
    assert_eq!(defaults.len(), 20);
    assert_eq!(resolve_related(Err(anyhow::anyhow!("offline"))), defaults);
    assert_eq!(resolve_related(Ok(Vec::new())), defaults);
    assert_eq!(resolve_related(Ok(owned(&["a"]))), owned(&["a"]));
}

#[test]
fn static_source_ignores_query() {
    let src = StaticRelatedWords::new(owned(&["x", "y"]));
    assert_eq!(src.fetch("anything").unwrap(), owned(&["x", "y"]));
}
