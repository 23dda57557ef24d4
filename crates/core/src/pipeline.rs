use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::extractor::{self, ExifTool, MetadataSource};
use crate::models::{Category, OutputRecord};
use crate::{scanner, writer};
use providers::noop::NoopProvider;
use providers::openai::{OpenAiConfig, OpenAiProvider};
use providers::LlmProvider;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub discovered: usize,
    pub recorded: usize,
    pub uncategorized: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Recorded {
        record: OutputRecord,
        category: Category,
    },
    SkippedNoMetadata,
}

pub struct Pipeline {
    source: Arc<dyn MetadataSource>,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(source: Arc<dyn MetadataSource>, classifier: Classifier) -> Self {
        Self { source, classifier }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let source = Arc::new(ExifTool::new(&config.exiftool_path));
        let classifier = Classifier::new(build_llm(config), config.max_tokens);
        Self::new(source, classifier)
    }

    /// Extract, then classify if the metadata is usable.
    pub async fn process_file(&self, path: &Path) -> FileOutcome {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let span = info_span!("file", name = %filename);
        let meta = extractor::extract(self.source.as_ref(), path)
            .instrument(span.clone())
            .await;
        if !meta.is_usable() {
            info!("File: {filename}, No metadata found");
            return FileOutcome::SkippedNoMetadata;
        }

        let category = self
            .classifier
            .classify(&meta.title, &meta.keywords)
            .instrument(span)
            .await;
        if category.is_uncategorized() {
            info!("File: {filename}, Category not found");
        } else {
            info!("File: {filename}, Category: {}", category.name);
        }

        FileOutcome::Recorded {
            record: OutputRecord::new(filename, &meta, category),
            category,
        }
    }

    /// Processes every candidate file under `root`, one at a time, in
    /// discovery order.
    pub async fn process_folder(&self, root: &Path) -> (Vec<OutputRecord>, PipelineSummary) {
        let files = scanner::discover(root);
        let mut summary = PipelineSummary {
            discovered: files.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(files.len());

        for path in files {
            match self.process_file(&path).await {
                FileOutcome::Recorded { record, category } => {
                    if category.is_uncategorized() {
                        summary.uncategorized += 1;
                    }
                    summary.recorded += 1;
                    records.push(record);
                }
                FileOutcome::SkippedNoMetadata => summary.skipped += 1,
            }
        }

        (records, summary)
    }
}

pub fn build_llm(config: &AppConfig) -> Arc<dyn LlmProvider> {
    if !config.has_api_key() {
        warn!("OPENAI_API_KEY is not set; every file will be uncategorized");
        return Arc::new(NoopProvider);
    }
    Arc::new(OpenAiProvider::new(OpenAiConfig {
        api_key: config.openai_api_key.clone(),
        base_url: config.openai_base_url.clone(),
        chat_model: config.openai_model.clone(),
    }))
}

pub async fn run(config: &AppConfig) -> anyhow::Result<PipelineSummary> {
    run_with(&Pipeline::from_config(config), config).await
}

pub async fn run_with(pipeline: &Pipeline, config: &AppConfig) -> anyhow::Result<PipelineSummary> {
    let root = Path::new(&config.folder_path);
    info!("Processing {}", root.display());
    let (records, summary) = pipeline.process_folder(root).await;
    writer::write_records(&records, Path::new(&config.output_csv))?;
    Ok(summary)
}
