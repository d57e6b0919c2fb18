use anyhow::{anyhow, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, warn, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils::map_language_label;
use crate::providers::Translator;
use crate::providers::lingva::Lingva;
use crate::translation::{RunReport, TranslationPayload, TranslationPipeline};

// @module: Application controller for subtitle translation

/// Extension of the subtitle files picked up in folder mode
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared translator client
    translator: Arc<dyn Translator>,
}

impl Controller {
    /// Create a controller talking to the configured Lingva endpoint
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = Lingva::new(&config.translator.endpoint, config.translator.timeout_secs)?;
        Ok(Self::with_translator(config, Arc::new(translator)))
    }

    /// Create a controller with an explicit translator
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self { config, translator }
    }

    /// Check that the translator endpoint answers
    pub async fn check_connection(&self) -> Result<()> {
        self.translator.test_connection().await?;
        info!("Translator at {} is reachable", self.config.translator.endpoint);
        Ok(())
    }

    /// Output path for a subtitle file, next to it or under `output_dir`
    pub fn output_path_for(&self, input_file: &Path, output_dir: Option<&Path>) -> PathBuf {
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input_file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let target = map_language_label(&self.config.target_language);
        FileManager::generate_output_path(input_file, output_dir, &target)
    }

    /// Translate a single subtitle file
    ///
    /// Returns `None` when the file was skipped because its output already exists.
    pub async fn run(&self, input_file: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<Option<RunReport>> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output_dir, &multi_progress, force_overwrite).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: Option<&Path>,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<Option<RunReport>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = self.output_path_for(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let payload = TranslationPayload::new(
            input_file,
            &output_path,
            &self.config.source_language,
            &self.config.target_language,
        );
        payload.validate()?;

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("#>-"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let pipeline = TranslationPipeline::new(Arc::clone(&self.translator), self.config.translator.pipeline_options())
            .on_progress(move |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            })
            .on_complete(|path| info!("Success: {}", path.display()));

        let result = pipeline.process_translation(payload).await;
        progress_bar.finish_and_clear();
        let report = result?;

        if report.failed_chunks > 0 {
            warn!("{} of {} chunk(s) failed to translate in {:?}", report.failed_chunks, report.chunks, input_file);
        }
        if !report.written {
            error!("No translation written for {:?}", input_file);
        }

        Ok(Some(report))
    }

    /// Translate every subtitle file under a directory
    /// Files that already have a translation are skipped
    pub async fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<Vec<RunReport>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let target = map_language_label(&self.config.target_language);
        let suffix = format!("_{}", target);
        let files: Vec<PathBuf> = FileManager::find_files(input_dir, SUBTITLE_EXTENSION)?
            .into_iter()
            // Earlier outputs live next to their inputs
            .filter(|path| !path.file_stem().is_some_and(|stem| stem.to_string_lossy().ends_with(&suffix)))
            .collect();

        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(Vec::new());
        }

        info!("Found {} subtitle file(s) in {:?}", files.len(), input_dir);

        let multi_progress = MultiProgress::new();
        let mut reports = Vec::new();
        for file in &files {
            match self.run_with_progress(file, output_dir, &multi_progress, force_overwrite).await {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(e) => error!("Error processing {:?}: {:#}", file, e),
            }
        }

        info!("Finished processing {} of {} file(s)", reports.len(), files.len());
        Ok(reports)
    }
}
