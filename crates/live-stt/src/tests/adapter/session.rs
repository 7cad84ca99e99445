use crate::{
    EngineNotification, ErrorKind, RecognitionSegment, StartOptions,
    tests::support::{Seen, fake_adapter, notify, record_all, results},
};

/// WHAT: Consecutive final segments are concatenated literally and trimmed as a whole
/// WHY: Embedded spacing from the engine must survive accumulation
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_two_final_notifications_when_translated_then_cumulative_results_emitted() {
    // Given: A started session with listeners on every kind
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);
    stt.start(StartOptions::default()).await.unwrap();

    // When: "hello " and "world" arrive as final in separate notifications
    notify(&engine, results(0, vec![RecognitionSegment::final_text("hello ")]));
    notify(
        &engine,
        results(
            1,
            vec![
                RecognitionSegment::final_text("hello "),
                RecognitionSegment::final_text("world"),
            ],
        ),
    );

    // Then: Results are cumulative, trimmed, and no partial result appears
    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Result("hello".to_string()),
            Seen::Result("hello world".to_string()),
        ]
    );
    assert_eq!(stt.final_transcript(), "hello world");
}

/// WHAT: Final segments keep whatever spacing the engine gave them
/// WHY: No separator is inserted between segments
#[test]
fn given_final_segments_with_inner_spaces_when_translated_then_spacing_preserved() {
    // Given: An adapter recording all events
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);

    // When: One notification carries two final segments
    notify(
        &engine,
        results(
            0,
            vec![
                RecognitionSegment::final_text(" good  "),
                RecognitionSegment::final_text(" morning "),
            ],
        ),
    );

    // Then: One result per segment, each the trimmed running total
    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Result("good".to_string()),
            Seen::Result("good   morning".to_string()),
        ]
    );
}

/// WHAT: Interim-only notifications emit one partial result and leave the transcript alone
/// WHY: Provisional text must never leak into the final transcript
#[test]
fn given_interim_only_notification_when_translated_then_single_partial_result() {
    // Given: An adapter with a final segment already accumulated
    let (stt, engine) = fake_adapter();
    notify(&engine, results(0, vec![RecognitionSegment::final_text("done.")]));
    let seen = record_all(&stt);

    // When: Two interim segments arrive together
    notify(
        &engine,
        results(
            1,
            vec![
                RecognitionSegment::final_text("done."),
                RecognitionSegment::interim(" how are"),
                RecognitionSegment::interim(" you "),
            ],
        ),
    );

    // Then: Exactly one partial result with the joined, trimmed text
    assert_eq!(
        *seen.borrow(),
        vec![Seen::PartialResult("how are you".to_string())]
    );
    assert_eq!(stt.final_transcript(), "done.");
}

/// WHAT: Mixed notifications emit results first, then one partial result
/// WHY: Each final segment is reported as it is found
#[test]
fn given_mixed_notification_when_translated_then_results_then_partial() {
    // Given: An adapter recording all events
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);

    // When: final, interim, final arrive in one notification
    notify(
        &engine,
        results(
            0,
            vec![
                RecognitionSegment::final_text("one "),
                RecognitionSegment::interim("maybe"),
                RecognitionSegment::final_text("two"),
            ],
        ),
    );

    // Then: Two results followed by a single partial result
    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Result("one".to_string()),
            Seen::Result("one two".to_string()),
            Seen::PartialResult("maybe".to_string()),
        ]
    );
}

/// WHAT: Whitespace-only interim text does not produce a partial result
/// WHY: Empty partial results are noise for subscribers
#[test]
fn given_blank_interim_segment_when_translated_then_no_partial_result() {
    // Given: An adapter recording all events
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);

    // When: The only new segment is blank interim text
    notify(&engine, results(0, vec![RecognitionSegment::interim("   ")]));

    // Then: Nothing was emitted
    assert!(seen.borrow().is_empty());
}

/// WHAT: Segments before the resume index are skipped
/// WHY: They were handled by an earlier notification
#[test]
fn given_resume_index_when_translated_then_only_new_segments_processed() {
    // Given: An adapter recording all events
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);

    // When: The batch resumes at index 2, and another resumes past its end
    notify(
        &engine,
        results(
            2,
            vec![
                RecognitionSegment::final_text("old "),
                RecognitionSegment::interim("stale"),
                RecognitionSegment::final_text("new"),
            ],
        ),
    );
    notify(&engine, results(9, vec![RecognitionSegment::final_text("x")]));

    // Then: Only the third segment counted
    assert_eq!(*seen.borrow(), vec![Seen::Result("new".to_string())]);
}

/// WHAT: Start and end notifications drive the recognizing flag
/// WHY: The flag mirrors what the engine reported, not what was requested
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_start_then_end_notifications_when_translated_then_flag_follows() {
    // Given: A freshly constructed adapter
    let (stt, engine) = fake_adapter();
    let seen = record_all(&stt);
    assert!(!stt.is_recognizing());

    // When: start() is called, but the engine has not confirmed yet
    stt.start(StartOptions::default()).await.unwrap();

    // Then: Still not recognizing
    assert!(!stt.is_recognizing());

    // When: The engine confirms start
    notify(&engine, EngineNotification::Start);

    // Then: Recognizing
    assert!(stt.is_recognizing());

    // When: The engine ends
    notify(&engine, EngineNotification::End);

    // Then: Not recognizing, with start and end emitted in order
    assert!(!stt.is_recognizing());
    assert_eq!(*seen.borrow(), vec![Seen::Start, Seen::End]);
}

/// WHAT: Engine error notifications are classified and emitted without ending the session
/// WHY: The engine delivers its own end notification afterwards
#[test]
fn given_engine_errors_when_translated_then_classified_error_events() {
    // Given: A recognizing adapter
    let (stt, engine) = fake_adapter();
    notify(&engine, EngineNotification::Start);
    let seen = record_all(&stt);

    // When: The engine reports a refusal and a network failure
    notify(&engine, EngineNotification::Error("not-allowed".to_string()));
    notify(&engine, EngineNotification::Error("network".to_string()));

    // Then: Both are classified, and recognizing is unchanged
    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Error(ErrorKind::PermissionDenied, "not-allowed".to_string()),
            Seen::Error(ErrorKind::GeneralError, "network".to_string()),
        ]
    );
    assert!(stt.is_recognizing());
}
