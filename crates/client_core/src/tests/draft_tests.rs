use super::*;

fn draft_with_examples(count: usize) -> Draft {
    (0..count).fold(Draft::default(), |draft, _| draft.add_example_pair())
}

fn docx(name: &str) -> SourceFile {
    SourceFile::new(name, Some(DOCX_MEDIA_TYPE.to_string()), b"PK".to_vec())
}

#[test]
fn keep_keyword_is_trimmed_and_appended_in_order() {
    let draft = Draft::default()
        .add_keep_keyword("  claim ")
        .expect("add claim")
        .add_keep_keyword("worker")
        .expect("add worker");

    assert_eq!(draft.keep_keywords(), ["claim", "worker"]);
}

#[test]
fn keep_keyword_rejects_blank_input_without_change() {
    let draft = Draft::default();
    assert_eq!(
        draft.add_keep_keyword("   "),
        Err(KeepKeywordRejection::Empty)
    );
    assert!(draft.keep_keywords().is_empty());
}

#[test]
fn keep_keyword_rejects_values_equal_after_trimming() {
    let mut draft = Draft::default();
    for input in ["claim", " claim", "claim  ", "benefit", "\tbenefit\n", "claim"] {
        if let Ok(next) = draft.add_keep_keyword(input) {
            draft = next;
        }
    }

    assert_eq!(draft.keep_keywords(), ["claim", "benefit"]);
    assert_eq!(
        draft.add_keep_keyword(" benefit "),
        Err(KeepKeywordRejection::Duplicate)
    );
}

#[test]
fn remove_keep_keyword_ignores_missing_value() {
    let draft = Draft::default().add_keep_keyword("claim").expect("add");
    assert_eq!(draft.remove_keep_keyword("absent"), draft);
    assert!(draft.remove_keep_keyword("claim").keep_keywords().is_empty());
}

#[test]
fn replace_pair_checks_duplicate_before_emptiness() {
    let draft = Draft::default()
        .add_replace_pair("persons", "people")
        .expect("first pair");

    assert_eq!(
        draft.add_replace_pair(" persons ", ""),
        Err(ReplacePairRejection::DuplicateOriginal)
    );
    assert_eq!(
        draft.add_replace_pair("  ", ""),
        Err(ReplacePairRejection::EmptyOriginal)
    );
    assert_eq!(
        draft.add_replace_pair("utilize", " "),
        Err(ReplacePairRejection::EmptyReplacement)
    );
    assert_eq!(draft.replace_pairs(), [ReplacePair::new("persons", "people")]);
}

#[test]
fn replace_pair_originals_stay_distinct() {
    let mut draft = Draft::default();
    for (original, replacement) in [
        ("persons", "people"),
        ("utilize", "use"),
        ("persons", "folks"),
        (" utilize", "employ"),
        ("commence", "start"),
    ] {
        if let Ok(next) = draft.add_replace_pair(original, replacement) {
            draft = next;
        }
    }

    let originals: Vec<&str> = draft
        .replace_pairs()
        .iter()
        .map(|p| p.original.as_str())
        .collect();
    assert_eq!(originals, ["persons", "utilize", "commence"]);
}

#[test]
fn remove_replace_pair_matches_by_value() {
    let draft = Draft::default()
        .add_replace_pair("persons", "people")
        .and_then(|d| d.add_replace_pair("utilize", "use"))
        .expect("pairs");

    let next = draft.remove_replace_pair(&ReplacePair::new("persons", "people"));
    assert_eq!(next.replace_pairs(), [ReplacePair::new("utilize", "use")]);
    assert_eq!(next.remove_replace_pair(&ReplacePair::new("utilize", "other")), next);
}

#[test]
fn replace_input_flags_follow_the_failing_field() {
    let draft = Draft::default()
        .add_replace_pair("persons", "people")
        .expect("pair");
    let mut input = ReplacePairInput::default();

    input.set_original("persons");
    input.set_replacement("folks");
    assert_eq!(
        input.commit(&draft),
        Err(ReplacePairRejection::DuplicateOriginal)
    );
    assert!(input.original_error);
    assert!(!input.replacement_error);
    assert_eq!(input.original, "persons");

    input.set_original("utilize");
    assert!(!input.original_error);
    input.set_replacement("");
    assert_eq!(
        input.commit(&draft),
        Err(ReplacePairRejection::EmptyReplacement)
    );
    assert!(!input.original_error);
    assert!(input.replacement_error);

    input.set_replacement("use");
    let next = input.commit(&draft).expect("commit");
    assert_eq!(next.replace_pairs().len(), 2);
    assert_eq!(input, ReplacePairInput::default());
}

#[test]
fn example_ids_are_unique_under_rapid_calls() {
    let draft = draft_with_examples(200);
    let ids: std::collections::HashSet<_> =
        draft.example_pairs().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn update_example_pair_tracks_field_errors() {
    let draft = draft_with_examples(2);
    let id = draft.example_pairs()[1].id.clone();

    let next = draft.update_example_pair(&id, ExampleField::Original, "The landlord can apply.");
    let pair = next.example_pair(&id).expect("pair");
    assert_eq!(pair.original, "The landlord can apply.");
    assert!(!pair.original_error);

    let next = next.update_example_pair(&id, ExampleField::Simplified, "");
    assert!(next.example_pair(&id).expect("pair").simplified_error);
    assert_eq!(next.example_pairs()[0], draft.example_pairs()[0]);
}

#[test]
fn removing_the_last_example_pair_is_refused() {
    let draft = draft_with_examples(1);
    let id = draft.example_pairs()[0].id.clone();

    let next = draft.remove_example_pair(&id);
    assert_eq!(next.example_pairs().len(), 1);
    assert_eq!(next, draft);
}

#[test]
fn removing_one_of_several_example_pairs_succeeds() {
    let draft = draft_with_examples(3);
    let id = draft.example_pairs()[1].id.clone();

    let next = draft.remove_example_pair(&id);
    assert_eq!(next.example_pairs().len(), 2);
    assert!(next.example_pair(&id).is_none());
}

#[test]
fn switching_mode_keeps_both_sources() {
    let draft = Draft::default()
        .select_source_file(docx("letter.docx"))
        .set_pasted_text("The cat sat.")
        .set_mode(InputMode::PastedText);

    assert_eq!(draft.mode(), InputMode::PastedText);
    assert_eq!(draft.source_file().map(|f| f.name.as_str()), Some("letter.docx"));

    let back = draft.set_mode(InputMode::Document);
    assert_eq!(back.pasted_text(), "The cat sat.");
    assert!(back.clear_source_file().source_file().is_none());
}

#[test]
fn defaults_are_normalized_into_a_valid_draft() {
    let config = DefaultConfigResponse {
        base_prompt: "You are an editor.".into(),
        keywords_to_keep: vec!["claim".into(), " claim ".into(), "".into(), "WSIB".into()],
        keywords_to_replace: vec![
            ReplacePair::new("persons", "people"),
            ReplacePair::new("persons", "folks"),
        ],
        samples: vec![SamplePair {
            original: "Pursuant to".into(),
            simplified: "Under".into(),
        }],
    };

    let draft = Draft::from_defaults(&config);
    assert_eq!(draft.mode(), InputMode::Document);
    assert_eq!(draft.prompt(), "You are an editor.");
    assert_eq!(draft.keep_keywords(), ["claim", "WSIB"]);
    assert_eq!(draft.replace_pairs(), [ReplacePair::new("persons", "people")]);
    let pair = &draft.example_pairs()[0];
    assert_eq!(pair.original, "Pursuant to");
    assert!(!pair.original_error && !pair.simplified_error);
}

#[test]
fn default_replace_pairs_are_trimmed_like_user_input() {
    let config = DefaultConfigResponse {
        keywords_to_replace: vec![
            ReplacePair::new("persons ", " people"),
            ReplacePair::new(" ", "blank"),
            ReplacePair::new("utilize", "  "),
        ],
        ..DefaultConfigResponse::default()
    };

    let draft = Draft::from_defaults(&config);
    assert_eq!(draft.replace_pairs(), [ReplacePair::new("persons", "people")]);
    assert_eq!(
        draft.add_replace_pair("persons", "folks"),
        Err(ReplacePairRejection::DuplicateOriginal)
    );
}

#[test]
fn prompt_fields_send_only_sample_text() {
    let draft = draft_with_examples(1);
    let id = draft.example_pairs()[0].id.clone();
    let draft = draft
        .update_example_pair(&id, ExampleField::Original, "Commence")
        .update_example_pair(&id, ExampleField::Simplified, "Start");

    let json = serde_json::to_value(draft.prompt_fields().samples).expect("json");
    assert_eq!(
        json,
        serde_json::json!([{ "original": "Commence", "simplified": "Start" }])
    );
}

#[test]
fn source_file_media_type_comes_from_extension() {
    let dir = std::env::temp_dir().join(format!("simplify_draft_test_{}", Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).expect("mkdir");
    let path = dir.join("letter.docx");
    std::fs::write(&path, b"PK\x03\x04").expect("write");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let file = runtime.block_on(SourceFile::load(&path)).expect("load");
    assert_eq!(file.name, "letter.docx");
    assert!(file.is_docx());
    assert_eq!(file.bytes, b"PK\x03\x04");

    std::fs::remove_dir_all(dir).expect("cleanup");
}
