//! End-to-end tests of the handler chain (logging → auth → per-caller queue → session engine)
//! with a recording Bot and a scripted LookupService.

mod common;

use common::mock_bot::{assert_no_more_calls, calls_until, next_call, BotCall, MockBot};
use common::mock_lookup::{LookupCall, MockLookup};
use common::{callback, test_config, text};
use lookup_bot::format::{format_identity, group_thousands, MESSAGE_LIMIT};
use lookup_bot::{
    build_handler_chain, BotComponents, BotStatus, HandlerChain, IdentityResponse, LookupError,
    PersonRecord, UniversalLookup,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

const ADMIN: i64 = 111;
const STRANGER: i64 = 222;
const COMPLETED: &str = "Query Completed";

fn setup(lookup: Arc<MockLookup>) -> (HandlerChain, Arc<MockBot>, mpsc::UnboundedReceiver<BotCall>) {
    let (bot, rx) = MockBot::with_receiver();
    let config = test_config(&[ADMIN]);
    let components = BotComponents::new(&config, bot.clone(), lookup, BotStatus::new());
    (build_handler_chain(&config, &components), bot, rx)
}

fn found_identity() -> IdentityResponse {
    serde_json::from_value(json!({
        "success": true,
        "user_id": "8190291080",
        "account_info": {"first_name": "Ann", "is_bot": false, "is_active": true, "total_messages": 4321}
    }))
    .unwrap()
}

/// **Test: Scenario 1: an unauthorized /start gets the refusal carrying the caller id.**
#[tokio::test]
async fn test_unauthorized_start_is_refused_with_caller_id() {
    let lookup = MockLookup::empty();
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&text(STRANGER, "/start")).await.unwrap();

    match next_call(&mut rx).await {
        BotCall::Send { chat_id, reply, .. } => {
            assert_eq!(chat_id, STRANGER);
            assert!(reply.text.contains("ACCESS DENIED"));
            assert!(reply.text.contains("<code>222</code>"));
            assert!(reply.text.contains("@ops_desk"));
        }
        other => panic!("expected refusal, got {:?}", other),
    }
    assert_no_more_calls(&mut rx).await;
    assert!(lookup.calls().is_empty());
}

/// **Test: unauthorized callbacks, text and /admin are refused and never reach the upstream.**
#[tokio::test]
async fn test_unauthorized_events_never_reach_upstream() {
    let lookup = MockLookup::empty();
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(STRANGER, "tg_info")).await.unwrap();
    match next_call(&mut rx).await {
        BotCall::AnswerCallback {
            text, show_alert, ..
        } => {
            assert_eq!(text.as_deref(), Some("❌ Admin access required!"));
            assert!(show_alert);
        }
        other => panic!("expected callback alert, got {:?}", other),
    }

    chain.handle(&text(STRANGER, "8190291080")).await.unwrap();
    assert!(next_call(&mut rx).await.text().unwrap().contains("authorized personnel only"));

    chain.handle(&text(STRANGER, "/admin list")).await.unwrap();
    assert!(next_call(&mut rx)
        .await
        .text()
        .unwrap()
        .contains("This command is for admins only."));

    assert_no_more_calls(&mut rx).await;
    assert!(lookup.calls().is_empty());
}

/// **Test: /start for an admin shows the menu with the three lookup buttons.**
#[tokio::test]
async fn test_admin_start_shows_menu() {
    let (chain, _bot, mut rx) = setup(MockLookup::empty());

    chain.handle(&text(ADMIN, "/start")).await.unwrap();

    match next_call(&mut rx).await {
        BotCall::Send { reply, .. } => {
            assert!(reply.text.contains("Welcome Tester!"));
            assert!(reply.text.contains("<code>111</code>"));
            assert_eq!(
                reply.keyboard.unwrap().callback_data(),
                vec!["tg_info", "universal_info", "help"]
            );
        }
        other => panic!("expected menu, got {:?}", other),
    }
}

/// **Test: Scenario 2: empty universal result replies "not found" and resets the session.**
#[tokio::test]
async fn test_universal_not_found_resets_session() {
    let lookup = MockLookup::empty();
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(ADMIN, "universal_info")).await.unwrap();
    chain.handle(&text(ADMIN, "8200704994")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    assert!(matches!(&calls[0], BotCall::AnswerCallback { query_id, .. } if query_id == "cbq-universal_info"));
    assert!(matches!(&calls[1], BotCall::Edit { message_id, reply, .. }
        if message_id == "10" && reply.text.contains("Universal Information Lookup")));
    assert!(calls[2].text().unwrap().contains("Processing"));
    match &calls[3] {
        BotCall::Edit { message_id, reply, .. } => {
            assert_eq!(message_id, "100");
            assert!(reply
                .text
                .contains("No information found for: <code>8200704994</code>"));
        }
        other => panic!("expected not-found edit, got {:?}", other),
    }
    assert_eq!(calls.len(), 5);
    assert_eq!(lookup.calls(), vec![LookupCall::Universal("8200704994".to_string())]);

    // Back to Idle: the next text only gets the menu hint.
    chain.handle(&text(ADMIN, "8200704994")).await.unwrap();
    assert!(next_call(&mut rx)
        .await
        .text()
        .unwrap()
        .contains("Please use the buttons to select an option."));
    assert_eq!(lookup.calls().len(), 1);
}

/// **Test: Scenario 3: non-digit identity input gets the invalid-input template, no upstream call.**
#[tokio::test]
async fn test_invalid_identity_input_skips_upstream() {
    let lookup = MockLookup::new(Ok(found_identity()), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(ADMIN, "tg_info")).await.unwrap();
    chain.handle(&text(ADMIN, "81902abc")).await.unwrap();

    let calls = calls_until(&mut rx, "Invalid Input").await;
    let invalid = calls.last().unwrap();
    assert!(invalid.text().unwrap().contains("numeric only"));
    assert!(lookup.calls().is_empty());

    // Single attempt: the retry is treated as idle text.
    chain.handle(&text(ADMIN, "8190291080")).await.unwrap();
    assert!(next_call(&mut rx).await.text().unwrap().contains("Please use the buttons"));
    assert!(lookup.calls().is_empty());
}

/// **Test: Scenario 4: one universal record becomes a .txt report with split address lines.**
#[tokio::test]
async fn test_universal_report_is_delivered_and_cleaned_up() {
    let record = PersonRecord {
        name: Some("X".to_string()),
        mobile: Some("999".to_string()),
        address: Some("Line1!Line2".to_string()),
        ..Default::default()
    };
    let lookup = MockLookup::new(Ok(IdentityResponse::default()), UniversalLookup::Records(vec![record]));
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(ADMIN, "universal_info")).await.unwrap();
    chain.handle(&text(ADMIN, "  a@b.com ")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    assert!(calls
        .iter()
        .any(|c| matches!(c, BotCall::Delete { message_id, .. } if message_id == "100")));
    let (path, file_name, caption, content) = calls
        .iter()
        .find_map(|c| match c {
            BotCall::Document {
                path,
                file_name,
                caption,
                content,
                ..
            } => Some((path.clone(), file_name.clone(), caption.clone(), content.clone())),
            _ => None,
        })
        .expect("report document");

    assert_eq!(file_name, "universal_info_a@b.com.txt");
    assert!(caption.contains("<code>a@b.com</code>"));
    assert!(caption.contains("Results: 1"));
    assert!(caption.contains(&format!(
        "File Size: {} bytes",
        group_thousands(content.len() as i64)
    )));
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines.contains(&"[RESULT 1 of 1]"));
    assert!(lines.contains(&"   • Full Name: X"));
    assert!(lines.contains(&"   • Mobile: 999"));
    assert!(lines.contains(&"   • Line1"));
    assert!(lines.contains(&"   • Line2"));
    assert!(!path.exists(), "report file must be removed after delivery");
    assert_eq!(lookup.calls(), vec![LookupCall::Universal("a@b.com".to_string())]);
}

/// **Test: a found identity replaces the processing message with the formatted block.**
#[tokio::test]
async fn test_identity_found_edits_processing_message() {
    let lookup = MockLookup::new(Ok(found_identity()), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(ADMIN, "tg_info")).await.unwrap();
    chain.handle(&text(ADMIN, " 8190291080 ")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    let result = calls
        .iter()
        .find_map(|c| match c {
            BotCall::Edit { message_id, reply, .. } if message_id == "100" => Some(reply.text.clone()),
            _ => None,
        })
        .expect("edited processing message");
    assert!(result.contains("ID: <code>8190291080</code>"));
    assert!(result.contains("Total Messages: 4,321"));
    assert_eq!(lookup.calls(), vec![LookupCall::Identity("8190291080".to_string())]);
}

/// **Test: an identity block longer than the message limit arrives as ordered chunks.**
#[tokio::test]
async fn test_long_identity_block_is_chunked() {
    let mut identity = found_identity();
    if let Some(account) = identity.account_info.as_mut() {
        account.first_name = Some("A".repeat(MESSAGE_LIMIT + 500));
    }
    let expected = format_identity(&identity);
    let lookup = MockLookup::new(Ok(identity), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup);

    chain.handle(&callback(ADMIN, "tg_info")).await.unwrap();
    chain.handle(&text(ADMIN, "8190291080")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    // Skip: callback answer, prompt edit, processing send; drop the trailing "completed".
    let chunks: Vec<String> = calls[3..calls.len() - 1]
        .iter()
        .filter_map(|c| c.text().map(String::from))
        .collect();

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= MESSAGE_LIMIT));
    assert_eq!(chunks.concat(), expected);
}

/// **Test: an upstream failure is answered with the not-found template, then the menu.**
#[tokio::test]
async fn test_identity_upstream_failure_is_recoverable() {
    let lookup = MockLookup::new(Err(LookupError::Timeout), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup);

    chain.handle(&callback(ADMIN, "tg_info")).await.unwrap();
    chain.handle(&text(ADMIN, "42")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    assert!(calls
        .iter()
        .any(|c| c.text().is_some_and(|t| t.contains("User ID: <code>42</code>"))));
}

/// **Test: a failed upload is reported with the bounded generic error reply.**
#[tokio::test]
async fn test_document_upload_failure_reports_error() {
    let lookup = MockLookup::new(
        Ok(IdentityResponse::default()),
        UniversalLookup::Records(vec![PersonRecord {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        }]),
    );
    let (chain, bot, mut rx) = setup(lookup);
    bot.fail_documents();

    chain.handle(&callback(ADMIN, "universal_info")).await.unwrap();
    chain.handle(&text(ADMIN, "a@b.com")).await.unwrap();

    let calls = calls_until(&mut rx, COMPLETED).await;
    assert!(calls.iter().any(|c| c
        .text()
        .is_some_and(|t| t.contains("Error occurred") && t.contains("Request Entity Too Large"))));
}

/// **Test: any command discards a pending selection.**
#[tokio::test]
async fn test_command_discards_pending_mode() {
    let lookup = MockLookup::new(Ok(found_identity()), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup.clone());

    chain.handle(&callback(ADMIN, "tg_info")).await.unwrap();
    chain.handle(&text(ADMIN, "/start")).await.unwrap();
    chain.handle(&text(ADMIN, "8190291080")).await.unwrap();

    calls_until(&mut rx, "Please use the buttons").await;
    assert!(lookup.calls().is_empty());
}

/// **Test: a caller's events are processed in arrival order even when enqueued back to back.**
#[tokio::test]
async fn test_events_from_one_caller_are_serialized() {
    let lookup = MockLookup::new(Ok(found_identity()), UniversalLookup::Empty);
    let (chain, _bot, mut rx) = setup(lookup.clone());

    let select = callback(ADMIN, "tg_info");
    let query = text(ADMIN, "8190291080");
    let (a, b) = tokio::join!(chain.handle(&select), async {
        tokio::task::yield_now().await;
        chain.handle(&query).await
    });
    a.unwrap();
    b.unwrap();

    calls_until(&mut rx, COMPLETED).await;
    assert_eq!(lookup.calls(), vec![LookupCall::Identity("8190291080".to_string())]);
}

/// **Test: help and back_to_menu re-render in place; a failed edit falls back to a new message.**
#[tokio::test]
async fn test_menu_navigation_and_edit_fallback() {
    let (chain, bot, mut rx) = setup(MockLookup::empty());

    chain.handle(&callback(ADMIN, "help")).await.unwrap();
    next_call(&mut rx).await;
    match next_call(&mut rx).await {
        BotCall::Edit { message_id, reply, .. } => {
            assert_eq!(message_id, "10");
            assert_eq!(reply.keyboard.unwrap().callback_data(), vec!["back_to_menu"]);
        }
        other => panic!("expected help edit, got {:?}", other),
    }

    bot.fail_edits();
    chain.handle(&callback(ADMIN, "back_to_menu")).await.unwrap();
    next_call(&mut rx).await;
    match next_call(&mut rx).await {
        BotCall::Send { reply, .. } => assert!(reply.text.contains("Welcome Tester!")),
        other => panic!("expected menu as new message, got {:?}", other),
    }
}

/// **Test: /admin sub-commands run for allow-listed callers.**
#[tokio::test]
async fn test_admin_commands_for_admin() {
    let (chain, _bot, mut rx) = setup(MockLookup::empty());

    chain.handle(&text(ADMIN, "/admin check 111")).await.unwrap();
    assert!(next_call(&mut rx).await.text().unwrap().contains("is an admin"));

    chain.handle(&text(ADMIN, "/admin")).await.unwrap();
    let help = next_call(&mut rx).await;
    let help = help.text().unwrap();
    assert!(help.contains("1234567***efgh"));
    assert!(help.contains("Total Admins: 1"));
}
