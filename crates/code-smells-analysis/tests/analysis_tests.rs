use code_smells_analysis::{extract_fragment, AnalysisDocument, AnalysisError};

/// A realistic completion: prose around the fragment, one pre-wrapped CDATA
/// fix and one raw code fix that needs the recovery pass.
const FULL_RESPONSE: &str = r#"I reviewed the diff carefully. Here are my findings:

<output>
<analysis_process>
The diff introduces a helper that forwards all of its arguments, and a
loop that rebuilds the same lookup table on every iteration.
</analysis_process>

<red_flags>
<flag>
<description>Pass-Through Method</description>
<location>src/client.rs, fetch_user()</location>
<explanation>fetch_user() only forwards its arguments to get() with the same signature.</explanation>
<suggestion>Remove the wrapper and call get() directly.</suggestion>
<example_fix>
<![CDATA[
let user = client.get(&format!("/users/{id}")).await?;
]]>
</example_fix>
</flag>
<flag>
<description>Repetition</description>
<location>src/report.rs lines 40-88</location>
<explanation>The same validation block appears three times.</explanation>
<suggestion>Extract the block into a function.</suggestion>
<example_fix>
fn validate(n: i32) -> bool { if (n < 5) { return true; } n & 1 == 0 }
</example_fix>
</flag>
</red_flags>

<overall_assessment>
Two structural issues worth fixing before merge; neither blocks the change.
</overall_assessment>
</output>

Let me know if you would like a deeper pass on any file."#;

#[test]
fn full_response_round_trip() {
    let fragment = extract_fragment(FULL_RESPONSE).unwrap();
    let doc = AnalysisDocument::parse(fragment).unwrap();

    assert!(doc.has_flags());
    assert_eq!(doc.flags().len(), 2);

    let first = &doc.flags()[0];
    assert_eq!(first.description, "Pass-Through Method");
    assert_eq!(
        first.example_fix,
        r#"let user = client.get(&format!("/users/{id}")).await?;"#
    );

    let second = &doc.flags()[1];
    assert_eq!(second.location, "src/report.rs lines 40-88");
    assert_eq!(
        second.example_fix,
        "fn validate(n: i32) -> bool { if (n < 5) { return true; } n & 1 == 0 }"
    );

    assert_eq!(
        doc.overall_assessment(),
        "Two structural issues worth fixing before merge; neither blocks the change."
    );
}

#[test]
fn clean_review_has_no_flags() {
    let response = "All good.\n<output>\n<analysis_process>Checked every hunk.</analysis_process>\n<no_red_flags>\nSmall, focused change with tests.\n</no_red_flags>\n<overall_assessment>Ship it.</overall_assessment>\n</output>";
    let fragment = extract_fragment(response).unwrap();
    let doc = AnalysisDocument::parse(fragment).unwrap();

    assert!(!doc.has_flags());
    assert_eq!(doc.overall_assessment(), "Ship it.");
}

#[test]
fn prose_only_response_fails_extraction() {
    let result = extract_fragment("I cannot analyze an empty diff.");
    assert!(matches!(result, Err(AnalysisError::NoFragment)));
}
