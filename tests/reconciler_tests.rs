// Integration tests for transcript reconciliation
//
// The recognition service revises earlier partial guesses as more context
// arrives; these tests pin down the append/replace rules that keep the final
// transcript free of duplicated or garbled text.

use asr_relay::asr::messages::RecognitionResult;
use asr_relay::asr::{Fragment, FragmentMode, TranscriptState};

fn append(sn: u32, text: &str) -> Fragment {
    Fragment {
        sn,
        text: text.to_string(),
        mode: FragmentMode::Append,
    }
}

fn replace(sn: u32, start: u32, end: u32, text: &str) -> Fragment {
    Fragment {
        sn,
        text: text.to_string(),
        mode: FragmentMode::Replace { start, end },
    }
}

#[test]
fn appends_concatenate_in_sequence_order() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "你"));
    state.apply(append(1, "好"));

    assert_eq!(state.transcript(), "你好");
}

#[test]
fn replace_drops_the_invalidated_range() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "你"));
    state.apply(append(1, "好"));

    state.apply(replace(0, 0, 1, "您好"));

    assert_eq!(state.transcript(), "您好");
    assert_eq!(state.len(), 1);
}

#[test]
fn replace_spares_entries_outside_the_range() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "今天"));
    state.apply(append(1, "天气"));
    state.apply(append(2, "不错"));

    state.apply(replace(1, 1, 1, "气温"));

    assert_eq!(state.transcript(), "今天气温不错");
}

#[test]
fn final_order_is_by_sn_not_arrival() {
    let mut state = TranscriptState::new();
    state.apply(append(2, "计划"));
    state.apply(append(0, "东京"));
    state.apply(append(1, "五天"));

    assert_eq!(state.transcript(), "东京五天计划");
}

#[test]
fn arrival_order_is_irrelevant_for_unique_sn() {
    let fragments = [append(0, "a"), append(1, "b"), append(2, "c"), append(3, "d")];

    let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
    for order in orders {
        let mut state = TranscriptState::new();
        for i in order {
            state.apply(fragments[i].clone());
        }
        assert_eq!(state.transcript(), "abcd");
    }
}

#[test]
fn append_at_an_existing_sn_overwrites() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "草稿"));
    state.apply(append(0, "定稿"));

    assert_eq!(state.transcript(), "定稿");
}

#[test]
fn inverted_range_clamps_to_a_single_point() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "a"));
    state.apply(append(1, "b"));
    state.apply(append(2, "c"));

    // end < start behaves as the single point [2, 2]
    state.apply(replace(2, 2, 0, "C"));

    assert_eq!(state.transcript(), "abC");
}

#[test]
fn range_over_unknown_sn_values_is_ignored() {
    let mut state = TranscriptState::new();
    state.apply(append(0, "a"));

    state.apply(replace(7, 5, 9, "tail"));

    assert_eq!(state.transcript(), "atail");
    assert_eq!(state.len(), 2);
}

#[test]
fn empty_state_yields_an_empty_transcript() {
    let state = TranscriptState::new();

    assert!(state.is_empty());
    assert_eq!(state.transcript(), "");
}

// ----------------------------------------------------------------------------
// Wire-format reduction
// ----------------------------------------------------------------------------

fn parse(json: &str) -> RecognitionResult {
    serde_json::from_str(json).unwrap()
}

#[test]
fn wire_append_fragment_reduces_to_append_mode() {
    let result = parse(
        r#"{"sn":3,"pgs":"apd","ws":[{"cw":[{"w":"天气"}]},{"cw":[{"w":"不错"}]}]}"#,
    );

    let fragment = Fragment::from_result(&result);

    assert_eq!(fragment.sn, 3);
    assert_eq!(fragment.text, "天气不错");
    assert_eq!(fragment.mode, FragmentMode::Append);
}

#[test]
fn wire_replace_fragment_carries_its_range() {
    let result = parse(r#"{"sn":2,"pgs":"rpl","rg":[0,1],"ws":[{"cw":[{"w":"您好"}]}]}"#);

    let fragment = Fragment::from_result(&result);

    assert_eq!(fragment.mode, FragmentMode::Replace { start: 0, end: 1 });
}

#[test]
fn missing_pgs_defaults_to_append() {
    let result = parse(r#"{"sn":0,"ws":[{"cw":[{"w":"好"}]}]}"#);

    assert_eq!(Fragment::from_result(&result).mode, FragmentMode::Append);
}

#[test]
fn malformed_range_degrades_to_append() {
    let result = parse(r#"{"sn":1,"pgs":"rpl","rg":[4],"ws":[{"cw":[{"w":"x"}]}]}"#);

    assert_eq!(Fragment::from_result(&result).mode, FragmentMode::Append);
}

#[test]
fn text_takes_the_top_candidate_of_each_segment() {
    let result = parse(
        r#"{"sn":0,"ws":[{"cw":[{"w":"你"},{"w":"妮"}]},{"cw":[{"w":"好"}]},{"cw":[]}]}"#,
    );

    assert_eq!(result.text(), "你好");
}
