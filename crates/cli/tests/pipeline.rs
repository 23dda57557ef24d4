use providers::{Completion, CompletionRequest, LlmProvider, ProviderError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stockcat_core::classifier::Classifier;
use stockcat_core::config;
use stockcat_core::extractor::{ExtractError, MetadataSource};
use stockcat_core::models::{AssetMetadata, OutputRecord};
use stockcat_core::pipeline::{self, Pipeline};
use tempfile::tempdir;

/// Answers per file name; unknown names fail like a crashed tool.
#[derive(Default)]
struct FakeExif {
    by_name: HashMap<String, AssetMetadata>,
    calls: AtomicUsize,
}

impl FakeExif {
    fn with(mut self, name: &str, title: &str, keywords: &[&str]) -> Self {
        self.by_name.insert(
            name.to_string(),
            AssetMetadata {
                title: title.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl MetadataSource for FakeExif {
    async fn read_metadata(&self, path: &Path) -> Result<AssetMetadata, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.by_name
            .get(&name)
            .cloned()
            .ok_or_else(|| ExtractError::NonZeroExit {
                code: Some(1),
                stderr: format!("Error: File format error - {name}"),
            })
    }
}

/// Replies by looking for a trigger word from the prompt.
struct FakeLlm {
    replies: Vec<(&'static str, &'static str)>,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl LlmProvider for FakeLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for (trigger, reply) in &self.replies {
            if request.prompt.contains(trigger) {
                return Ok(Completion {
                    text: reply.to_string(),
                });
            }
        }
        Err(ProviderError::Status {
            status: 429,
            body: "rate limited".into(),
        })
    }
}

fn llm() -> Arc<FakeLlm> {
    Arc::new(FakeLlm {
        replies: vec![
            ("Sunset Beach", "This falls under Landscapes or Travel."),
            ("No Title", "Probably Technology."),
            ("Mystery", "I am not sure."),
        ],
        calls: AtomicUsize::new(0),
    })
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"bytes").unwrap();
}

#[tokio::test]
async fn records_classified_file() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "sunset.jpg");

    let exif = Arc::new(FakeExif::default().with("sunset.jpg", "Sunset Beach", &["beach", "sunset"]));
    let pipeline = Pipeline::new(exif, Classifier::new(llm(), 60));
    let (records, summary) = pipeline.process_folder(temp.path()).await;

    assert_eq!(
        records,
        vec![OutputRecord {
            filename: "sunset.jpg".into(),
            title: "Sunset Beach".into(),
            keywords: "beach, sunset".into(),
            category: 11,
            releases: String::new(),
        }]
    );
    assert_eq!(summary.recorded, 1);
}

#[tokio::test]
async fn sidecar_and_unsupported_files_are_never_touched() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "._thumbnail.jpg");
    touch(temp.path(), "notes.txt");
    touch(temp.path(), "shot.cr2");

    let exif = Arc::new(FakeExif::default());
    let llm = llm();
    let pipeline = Pipeline::new(exif.clone(), Classifier::new(llm.clone(), 60));
    let (records, summary) = pipeline.process_folder(temp.path()).await;

    assert!(records.is_empty());
    assert_eq!(summary.discovered, 0);
    assert_eq!(exif.calls.load(Ordering::SeqCst), 0);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_extraction_still_classified_with_placeholders() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "clip.mp4");

    let llm = llm();
    let pipeline = Pipeline::new(Arc::new(FakeExif::default()), Classifier::new(llm.clone(), 60));
    let (records, _) = pipeline.process_folder(temp.path()).await;

    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filename, "clip.mp4");
    assert_eq!(records[0].title, "No Title");
    assert_eq!(records[0].keywords, "No Keywords");
    assert_eq!(records[0].category, 19);
}

#[tokio::test]
async fn empty_metadata_is_skipped_and_unmatched_is_zero() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "blank.png");
    touch(temp.path(), "odd.mov");
    touch(temp.path(), "quiet.jpeg");

    let exif = Arc::new(
        FakeExif::default()
            .with("blank.png", "", &["tag"])
            .with("odd.mov", "Mystery", &["fog"])
            .with("quiet.jpeg", "Unknown reply", &["x"]),
    );
    let llm = llm();
    let pipeline = Pipeline::new(exif, Classifier::new(llm.clone(), 60));
    let (records, summary) = pipeline.process_folder(temp.path()).await;

    // blank.png never reaches the classifier.
    assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.uncategorized, 2);
    let got: Vec<_> = records.iter().map(|r| (r.filename.as_str(), r.category)).collect();
    assert_eq!(got, vec![("odd.mov", 0), ("quiet.jpeg", 0)]);
}

#[tokio::test]
async fn writes_identical_output_on_rerun() {
    let temp = tempdir().unwrap();
    let media = temp.path().join("media");
    fs::create_dir_all(media.join("day2")).unwrap();
    touch(&media, "sunset.jpg");
    touch(&media.join("day2"), "clip.mp4");
    let out = temp.path().join("output.csv");

    let cfg = config::from_str(&format!(
        "FOLDER_PATH = {}\nOUTPUT_CSV = {}\n",
        media.display(),
        out.display()
    ))
    .unwrap();
    let exif = Arc::new(FakeExif::default().with("sunset.jpg", "Sunset Beach", &["beach", "sunset"]));
    let pipeline = Pipeline::new(exif, Classifier::new(llm(), 60));

    let summary = pipeline::run_with(&pipeline, &cfg).await.unwrap();
    assert_eq!(summary.recorded, 2);
    let first = fs::read_to_string(&out).unwrap();
    pipeline::run_with(&pipeline, &cfg).await.unwrap();
    let second = fs::read_to_string(&out).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        "Filename,Title,Keywords,Category,Releases\n\
         clip.mp4,No Title,No Keywords,19,\n\
         sunset.jpg,Sunset Beach,\"beach, sunset\",11,\n"
    );
}
