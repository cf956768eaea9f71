//! Integration tests for the intentdesk-engine crate.
//!
//! These tests exercise the full build-then-match path: DSL source text in,
//! match results out.

use intentdesk_dsl::{ParseError, ResponseBody};
use intentdesk_engine::{MatchOutcome, Registry, match_input};

// ═══════════════════════════════════════════════════════════════════════
//  End-to-end matching
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn greeting_end_to_end() {
    let registry = Registry::build(
        r#"intent GREETING priority 10 {
            patterns: ["你好", "hi"];
            response: "你好，我是客服小助手";
        }"#,
    )
    .unwrap();

    let result = match_input("hi there", &registry).matched().unwrap();
    assert_eq!(result.intent_name, "GREETING");
    assert_eq!(
        result.response,
        ResponseBody::Text("你好，我是客服小助手".into())
    );
    assert_eq!(result.next_state, None);
}

#[test]
fn realistic_script_with_shadowing_and_states() {
    let registry = Registry::build(
        r#"
        // 客服脚本：优先级高的意图遮蔽低的
        intent CANCEL_ORDER priority 20 {
            patterns: ["取消订单", /cancel.*order/i];
            response: "请提供要取消的订单号";
            next_state: "AWAIT_CANCEL_ID";
        }

        intent ORDER_STATUS priority 10 {
            patterns: ["订单", "order"];
            response: "请提供订单号";
            next_state: "AWAIT_ORDER_ID";
        }

        intent FAREWELL {
            patterns: ["再见", "bye"];
            response: "感谢您的咨询，再见";
        }
        "#,
    )
    .unwrap();

    // "取消订单" contains "订单" too; the higher priority wins.
    let result = match_input("我要取消订单", &registry).matched().unwrap();
    assert_eq!(result.intent_name, "CANCEL_ORDER");
    assert_eq!(result.next_state.as_deref(), Some("AWAIT_CANCEL_ID"));

    let result = match_input("Please CANCEL my order", &registry)
        .matched()
        .unwrap();
    assert_eq!(result.intent_name, "CANCEL_ORDER");
    assert_eq!(result.matched_pattern.as_deref(), Some("/cancel.*order/i"));

    let result = match_input("订单到哪了", &registry).matched().unwrap();
    assert_eq!(result.intent_name, "ORDER_STATUS");

    assert_eq!(
        match_input("今天天气怎么样", &registry),
        MatchOutcome::NoMatch
    );
}

#[test]
fn rebuilding_from_changed_source_is_independent() {
    let v1 = Registry::build(r#"intent A { patterns: ["x"]; response: "one"; }"#).unwrap();
    let v2 = Registry::build(r#"intent A { patterns: ["x"]; response: "two"; }"#).unwrap();

    let r1 = match_input("x", &v1).matched().unwrap();
    let r2 = match_input("x", &v2).matched().unwrap();
    assert_eq!(r1.response, ResponseBody::Text("one".into()));
    assert_eq!(r2.response, ResponseBody::Text("two".into()));
}

#[test]
fn registry_is_shareable_across_threads() {
    use std::sync::Arc;

    let registry = Arc::new(
        Registry::build(r#"intent G { patterns: ["hello"]; response: "hi"; }"#).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reg = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    assert!(match_input("hello world", &reg).matched().is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Build failures
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn missing_patterns_field_fails_the_build() {
    let err = Registry::build(r#"intent X { response: "r"; }"#).unwrap_err();
    assert!(matches!(err, ParseError::MissingField { .. }));
}

#[test]
fn duplicate_intent_names_fail_the_build() {
    let err = Registry::build(
        r#"
        intent X { patterns: ["a"]; response: "r"; }
        intent X { patterns: ["b"]; response: "r"; }
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::DuplicateIntentName { .. }));
}

#[test]
fn bad_regex_never_reaches_the_matcher() {
    let err = Registry::build(r#"intent X { patterns: [/((/]; response: "r"; }"#).unwrap_err();
    assert!(matches!(err, ParseError::BadRegex { .. }));
}
