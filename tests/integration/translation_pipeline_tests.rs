/*!
 * End-to-end pipeline runs against mock translators
 */

use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use lingvasub::errors::AppError;
use lingvasub::providers::mock::MockTranslator;
use lingvasub::translation::{MissingTimestampPolicy, PipelineOptions, TranslationPayload, TranslationPipeline};
use crate::common;

fn options(max_chars: usize) -> PipelineOptions {
    PipelineOptions { max_chars, ..PipelineOptions::default() }
}

#[tokio::test]
async fn test_process_translation_withEchoTranslator_shouldReproduceRecords() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;
    let output = temp_dir.path().join("sample_sr.srt");
    let translator = Arc::new(MockTranslator::echo());

    let report = TranslationPipeline::new(translator.clone(), PipelineOptions::default())
        .process_translation(TranslationPayload::new(&input, &output, "English", "Српски"))
        .await?;

    assert!(report.written);
    assert_eq!(report.chunks, 1);
    assert_eq!(report.failed_chunks, 0);
    assert_eq!(report.records, 2);
    assert_eq!(translator.requests(), vec!["1 Hello 2 World"]);
    assert_eq!(common::read_output(&output)?, vec![
        "1",
        "00:00:01,000 --> 00:00:02,000",
        "Hello",
        "",
        "2",
        "00:00:03,000 --> 00:00:04,000",
        "World",
    ]);
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withUppercaseTranslator_shouldTranslateTextOnly() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "markup.srt",
        "1\n00:00:01,000 --> 00:00:02,000\n<i>Ready?</i>\n",
    )?;
    let output = temp_dir.path().join("markup_sr.srt");
    let translator = Arc::new(MockTranslator::echo().with_custom_response(|text| text.to_uppercase()));

    TranslationPipeline::new(translator.clone(), PipelineOptions::default())
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await?;

    // Markup travels as placeholders and comes back intact
    assert_eq!(translator.requests(), vec!["1 ;;Ready;;;;"]);
    assert_eq!(common::read_output(&output)?, vec!["1", "00:00:01,000 --> 00:00:02,000", "<i>READY</i>?"]);
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withOneFailingChunk_shouldKeepEveryRecord() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "three.srt", &common::numbered_subtitle(3))?;
    let output = temp_dir.path().join("three_sr.srt");
    let translator = Arc::new(MockTranslator::fail_on_call(2));

    // "N Line #N" is 9 chars, so every record is its own chunk
    let report = TranslationPipeline::new(translator.clone(), options(10))
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await?;

    assert!(report.written);
    assert_eq!(report.chunks, 3);
    assert_eq!(report.failed_chunks, 1);
    assert_eq!(report.records, 3);
    assert_eq!(translator.call_count(), 3);

    let lines = common::read_output(&output)?;
    assert_eq!(lines, vec![
        "1",
        "00:00:01,000 --> 00:00:01,500",
        "Line #1",
        "",
        "2",
        "00:00:02,000 --> 00:00:02,500",
        "Error: Simulated failure on call 2",
        "",
        "3",
        "00:00:03,000 --> 00:00:03,500",
        "Line #3",
    ]);
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withManyRecords_shouldChunkAndRestoreAll() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "many.srt", &common::numbered_subtitle(50))?;
    let output = temp_dir.path().join("many_sr.srt");
    let translator = Arc::new(MockTranslator::echo());

    let report = TranslationPipeline::new(translator.clone(), options(100))
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await?;

    assert!(report.chunks > 1);
    assert_eq!(report.records, 50);
    assert!(translator.requests().iter().all(|chunk| chunk.chars().count() <= 100));

    let expected: Vec<String> = common::numbered_subtitle(50).lines().map(str::to_string).collect();
    assert_eq!(common::read_output(&output)?, expected);
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withNumberInTranslation_shouldAbortByDefault() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "apples.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nI have 3 apples\n",
    )?;
    let output = temp_dir.path().join("apples_sr.srt");

    let result = TranslationPipeline::new(Arc::new(MockTranslator::echo()), PipelineOptions::default())
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await;

    assert!(matches!(result, Err(AppError::Subtitle(_))));
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withTreatAsTextPolicy_shouldKeepNumber() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "apples.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nI have 3 apples\n",
    )?;
    let output = temp_dir.path().join("apples_sr.srt");
    let options = PipelineOptions {
        missing_timestamp_policy: MissingTimestampPolicy::TreatAsText,
        ..PipelineOptions::default()
    };

    let report = TranslationPipeline::new(Arc::new(MockTranslator::echo()), options)
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await?;

    assert!(report.written);
    assert_eq!(common::read_output(&output)?, vec!["1", "00:00:01,000 --> 00:00:02,000", "I have 3 apples"]);
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withMissingInput_shouldNotWriteOrNotify() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("out_sr.srt");
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let translator = Arc::new(MockTranslator::echo());

    let report = TranslationPipeline::new(translator.clone(), PipelineOptions::default())
        .on_complete(move |_| { counter.fetch_add(1, Ordering::SeqCst); })
        .process_translation(TranslationPayload::new(temp_dir.path().join("missing.srt"), &output, "en", "sr"))
        .await?;

    assert!(!report.written);
    assert_eq!(report.chunks, 0);
    assert_eq!(translator.call_count(), 0);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_process_translation_withCallbacks_shouldNotifyOnceWithOutputPath() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "five.srt", &common::numbered_subtitle(5))?;
    let output = temp_dir.path().join("five_sr.srt");
    let completed = Arc::new(Mutex::new(Vec::new()));
    let progress = Arc::new(Mutex::new(Vec::new()));
    let completed_sink = Arc::clone(&completed);
    let progress_sink = Arc::clone(&progress);

    TranslationPipeline::new(Arc::new(MockTranslator::echo()), options(10))
        .on_progress(move |done, total| progress_sink.lock().unwrap().push((done, total)))
        .on_complete(move |path| completed_sink.lock().unwrap().push(path.to_path_buf()))
        .process_translation(TranslationPayload::new(&input, &output, "en", "sr"))
        .await?;

    assert_eq!(*completed.lock().unwrap(), vec![output.clone()]);
    assert_eq!(*progress.lock().unwrap(), vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    Ok(())
}

#[tokio::test]
async fn test_translate_chunks_withIntermittentFailures_shouldMarkEachFailure() {
    let pipeline = TranslationPipeline::new(Arc::new(MockTranslator::intermittent(2)), PipelineOptions::default());
    let chunks: Vec<String> = vec!["1 a".into(), "2 b".into(), "3 c".into(), "4 d".into()];

    let outcomes = pipeline.translate_chunks(&chunks, "en", "sr").await;

    let failed: Vec<bool> = outcomes
        .iter()
        .map(|o| matches!(o, lingvasub::translation::ChunkOutcome::Failed { .. }))
        .collect();
    assert_eq!(failed, vec![false, true, false, true]);
}
