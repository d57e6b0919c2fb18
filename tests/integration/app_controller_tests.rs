/*!
 * Controller runs over single files and folders with a mock translator
 */

use anyhow::Result;
use std::sync::Arc;
use lingvasub::app_config::Config;
use lingvasub::app_controller::Controller;
use lingvasub::providers::mock::MockTranslator;
use crate::common;

fn controller_with(translator: MockTranslator) -> Controller {
    Controller::with_translator(Config::default(), Arc::new(translator))
}

#[tokio::test]
async fn test_run_withSingleFile_shouldWriteNextToInput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = controller_with(MockTranslator::echo());

    let report = controller.run(&input, None, false).await?;

    let report = report.expect("file should not be skipped");
    assert!(report.written);
    assert_eq!(report.output_path, temp_dir.path().join("movie_sr.srt"));
    assert!(report.output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    common::create_test_file(temp_dir.path(), "movie_sr.srt", "old")?;
    let translator = MockTranslator::echo();
    let controller = controller_with(translator.clone());

    assert!(controller.run(&input, None, false).await?.is_none());
    assert_eq!(translator.call_count(), 0);

    assert!(controller.run(&input, None, true).await?.is_some());
    assert_eq!(translator.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_withOutputDir_shouldWriteThere() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let out_dir = temp_dir.path().join("translated");
    let controller = controller_with(MockTranslator::echo());

    controller.run(&input, Some(&out_dir), false).await?;

    assert!(out_dir.join("movie_sr.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingInput_shouldFail() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_with(MockTranslator::echo());

    assert!(controller.run(&temp_dir.path().join("nope.srt"), None, false).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withPreviousOutputs_shouldOnlyTranslateSources() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_subtitle(temp_dir.path(), "c_sr.srt")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;
    let translator = MockTranslator::echo();
    let controller = controller_with(translator.clone());

    let reports = controller.run_folder(temp_dir.path(), None, false).await?;

    assert_eq!(reports.len(), 2);
    assert_eq!(translator.call_count(), 2);
    assert!(temp_dir.path().join("a_sr.srt").exists());
    assert!(temp_dir.path().join("b_sr.srt").exists());
    assert!(!temp_dir.path().join("c_sr_sr.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withFailingTranslator_shouldStillWriteMarkers() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let controller = controller_with(MockTranslator::failing());

    let reports = controller.run_folder(temp_dir.path(), None, false).await?;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].failed_chunks, 1);
    assert_eq!(reports[0].records, 2);
    let lines = common::read_output(&temp_dir.path().join("a_sr.srt"))?;
    assert_eq!(lines, vec![
        "1",
        "00:00:01,000 --> 00:00:02,000",
        "Error: Simulated failure on call 1",
        "",
        "2",
        "00:00:03,000 --> 00:00:04,000",
        "Error: Simulated failure on call 1",
    ]);
    Ok(())
}

#[tokio::test]
async fn test_check_connection_withFailingTranslator_shouldFail() {
    let controller = controller_with(MockTranslator::failing());
    assert!(controller.check_connection().await.is_err());

    let controller = controller_with(MockTranslator::echo());
    assert!(controller.check_connection().await.is_ok());
}
