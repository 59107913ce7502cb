//! Integration tests for wildcard documents

mod common;

use catena_core::Options;
use catena_sdk::{CatenaBuilder, SdkError};
use common::{test_stages, wildcard_engine, CallLog};
use std::sync::Arc;

#[tokio::test]
async fn test_nested_block_compiles_before_parent() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = ">> foo\n  >> bar\n    content";
    let output = engine
        .compile_to_string("doc", doc, &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "  CONTENT");
    assert_eq!(
        log.calls(),
        vec![
            ("bar".to_string(), "    content".to_string()),
            ("foo".to_string(), "  CONTENT".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_parent_resumes_after_spliced_children() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = [
        ">> foo",
        "  >> upper",
        "    a",
        "  >> bar",
        "    b",
        "end",
        "  >> upper",
        "      deep",
        "      >> bar",
        "        q",
        "    tail",
        "last",
    ]
    .join("\n");
    let output = engine
        .compile_to_string("doc", &doc, &Options::new())
        .await
        .unwrap();

    let expected = "    A\n  B\nend\n      DEEP\n      Q\n    TAIL\nlast";
    assert_eq!(output, expected);
    assert_eq!(
        log.calls(),
        vec![
            ("upper".to_string(), "    a".to_string()),
            ("bar".to_string(), "    b".to_string()),
            ("bar".to_string(), "        q".to_string()),
            (
                "upper".to_string(),
                "      deep\n      Q\n    tail".to_string()
            ),
            ("foo".to_string(), expected.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_siblings_and_outdent() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = "  >> upper\n  hello\n    world\n  >> text\n  plain\n>> upper\nx";
    let output = engine
        .compile_to_string("doc", doc, &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "  HELLO\n    WORLD\n  plain\nX");
    assert_eq!(log.stages(), vec!["upper", "upper"]);
}

#[tokio::test]
async fn test_quoted_marker() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let output = engine
        .compile_to_string("doc", "'>> upper\nabc", &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "ABC");
}

#[tokio::test]
async fn test_blank_lines_between_blocks_are_kept() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = "  >> upper\n  a\n\n>> text\nb";
    let output = engine
        .compile_to_string("doc", doc, &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "  A\n\nb");
}

#[tokio::test]
async fn test_block_output_padded_to_marker() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    // `bar` trims its input, so the result has to be re-indented
    let doc = "    >> bar\n      one";
    let output = engine
        .compile_to_string("doc", doc, &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "    ONE");
}

#[tokio::test]
async fn test_tabs_and_spaces_not_normalized() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    // The tab marker has indent 1; two spaces are deeper
    let output = engine
        .compile_to_string("doc", "\t>> upper\n  a", &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "  A");
}

#[tokio::test]
async fn test_deferred_block_rendered_with_options() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let options = Options::new().with("name", "Ann");
    let output = engine
        .compile_to_string("doc", ">> tpl\nHi {{ name }}", &options)
        .await
        .unwrap();

    assert_eq!(output, "Hi Ann");
}

#[tokio::test]
async fn test_empty_document() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let output = engine
        .compile_to_string("doc", "", &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "");
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_text_before_first_marker_is_malformed() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let err = engine
        .compile_to_string("doc", "stray\n>> upper\na", &Options::new())
        .await
        .unwrap_err();

    match err {
        SdkError::MalformedMarker { line, content } => {
            assert_eq!(line, 1);
            assert_eq!(content, "stray");
        }
        other => panic!("expected malformed marker, got {:?}", other),
    }
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_outdented_text_after_block_is_malformed() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let err = engine
        .compile_to_string("doc", "  >> upper\n  a\nb", &Options::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::MalformedMarker { line: 3, .. }));
}

#[tokio::test]
async fn test_block_failure_aborts_document() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = ">> boom\nx\n>> upper\ny";
    let err = engine
        .compile_to_string("doc", doc, &Options::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Runtime(_)));
    assert_eq!(log.stages(), vec!["boom"]);
}

#[tokio::test]
async fn test_nested_failure_skips_parent() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let doc = ">> foo\n  >> boom\n    x";
    let result = engine.compile_to_string("doc", doc, &Options::new()).await;

    assert!(result.is_err());
    assert_eq!(log.stages(), vec!["boom"]);
}

#[tokio::test]
async fn test_block_registers_extension_lazily() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;
    assert!(!engine.registry().has("upper").await);

    engine
        .compile_to_string("doc", ">> upper\nz", &Options::new())
        .await
        .unwrap();

    assert!(engine.registry().has("upper").await);
}

#[tokio::test]
async fn test_unknown_block_extension_without_fallback() {
    let log = CallLog::default();
    let engine = CatenaBuilder::new()
        .with_resolver(Arc::new(test_stages(&log)))
        .fallback_to_extension(false)
        .map("doc", "*")
        .build()
        .await
        .unwrap();

    let err = engine
        .compile_to_string("doc", ">> upper\nz", &Options::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::UnknownExtension(ref ext) if ext == "upper"));
}

#[tokio::test]
async fn test_empty_line_closes_indented_block() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let err = engine
        .compile_to_string("doc", "  >> upper\n  a\n\n  b", &Options::new())
        .await
        .unwrap_err();

    match err {
        SdkError::MalformedMarker { line, content } => {
            assert_eq!(line, 4);
            assert_eq!(content, "  b");
        }
        other => panic!("expected malformed marker, got {:?}", other),
    }
}

#[tokio::test]
async fn test_crlf_document_compiles_to_lf() {
    let log = CallLog::default();
    let engine = wildcard_engine(&log).await;

    let output = engine
        .compile_to_string("doc", ">> text\r\na\r\nb\r\n", &Options::new())
        .await
        .unwrap();

    assert_eq!(output, "a\nb\n");
}
