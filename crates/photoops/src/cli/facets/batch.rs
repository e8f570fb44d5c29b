//! Batch run: document loading with progress, skip-existing, and record output.

use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::Path;

use photoops_core::input::DiscoveredDocument;
use photoops_core::{DocumentDiscovery, OutputFormat as CoreOutputFormat, OutputWriter, RunStats};
use serde_json::Value;
use tempfile::{NamedTempFile, TempPath};

use super::{FacetsArgs, FacetsContext};

/// Build and write facet records for every discovered document.
///
/// A document that fails to load or build is counted and logged; the run
/// carries on with the next one.
pub async fn process_batch(
    ctx: FacetsContext,
    args: &FacetsArgs,
    documents: Vec<DiscoveredDocument>,
) -> anyhow::Result<()> {
    let existing_keys = match (&args.output, args.skip_existing) {
        (Some(path), true) => load_existing_keys(path)?,
        _ => HashSet::new(),
    };
    if !existing_keys.is_empty() {
        tracing::info!(
            "Loaded {} existing partition keys from output file",
            existing_keys.len()
        );
    }

    let (mut writer, staged) = open_writer(&ctx, args, &existing_keys)?;

    let total_bytes = DocumentDiscovery::total_size(&documents);
    let progress = create_progress_bar(documents.len() as u64);
    let mut stats = RunStats::default();
    let mut skipped: usize = 0;
    let start_time = std::time::Instant::now();

    for document in &documents {
        progress.inc(1);

        let doc = match ctx.loader.load_async(&document.path).await {
            Ok(doc) => doc,
            Err(e) => {
                stats.failed += 1;
                tracing::error!("Failed: {:?} - {}", document.path, e);
                continue;
            }
        };

        if existing_keys.contains(doc.partition_key().as_str()) {
            skipped += 1;
            continue;
        }

        match ctx.engine.build(&doc) {
            Ok(set) => {
                writer.write_set(&set)?;
                stats.succeeded += 1;
            }
            Err(e) => {
                stats.failed += 1;
                tracing::error!("Failed: {:?} - {}", document.path, e);
            }
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            let rate = (stats.succeeded + stats.failed) as f64 / elapsed;
            progress.set_message(format!("{:.1} docs/sec", rate));
        }
    }

    writer.finish()?;
    stats.records = writer.items_written();
    drop(writer);
    if let (Some(staged), Some(output_path)) = (staged, &args.output) {
        staged.persist(output_path)?;
    }
    stats.finish(start_time.elapsed());
    progress.finish_and_clear();

    if let Some(output_path) = &args.output {
        tracing::info!("Output written to {:?}", output_path);
    }
    print_summary(&stats, skipped, total_bytes);

    if stats.succeeded == 0 && stats.failed > 0 {
        anyhow::bail!("All {} document(s) failed", stats.failed);
    }
    Ok(())
}

/// Open the output sink, carrying over earlier records when resuming a run.
///
/// JSONL output is appended to. A JSON array cannot be appended to, so its
/// existing records are re-written ahead of the new ones into a temp file
/// beside the target. The returned path must be persisted after `finish`;
/// until then the previous output is left as it was.
fn open_writer(
    ctx: &FacetsContext,
    args: &FacetsArgs,
    existing_keys: &HashSet<String>,
) -> anyhow::Result<(OutputWriter<Box<dyn Write>>, Option<TempPath>)> {
    let resume = args.skip_existing && !existing_keys.is_empty();

    let sink: Box<dyn Write> = match &args.output {
        Some(path) if resume && ctx.output_format == CoreOutputFormat::JsonLines => {
            let file = std::fs::OpenOptions::new().append(true).open(path)?;
            Box::new(BufWriter::new(file))
        }
        Some(path) => {
            let carried = if resume {
                load_existing_array(path)
            } else {
                Vec::new()
            };
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (file, staged) = NamedTempFile::new_in(dir)?.into_parts();
            let mut writer = OutputWriter::new(
                Box::new(BufWriter::new(file)) as Box<dyn Write>,
                ctx.output_format,
                ctx.pretty,
            );
            for record in &carried {
                writer.write(record)?;
            }
            return Ok((writer, Some(staged)));
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    Ok((OutputWriter::new(sink, ctx.output_format, ctx.pretty), None))
}

/// Records of an existing JSON array output, or nothing if it isn't one.
fn load_existing_array(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<Vec<Value>>(&content).ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "--skip-existing: existing output at {:?} is not a JSON array, \
                 earlier records will not be kept",
                path
            );
            Vec::new()
        })
}

/// Load partition keys already present in a JSON or JSONL output file.
fn load_existing_keys(path: &Path) -> anyhow::Result<HashSet<String>> {
    let mut keys = HashSet::new();
    if !path.exists() {
        return Ok(keys);
    }

    let content = std::fs::read_to_string(path)?;
    let mut insert = |record: &Value| {
        if let Some(pk) = record.get("pk").and_then(Value::as_str) {
            keys.insert(pk.to_string());
        }
    };

    // Try JSON array first (handles --format json output)
    if let Ok(records) = serde_json::from_str::<Vec<Value>>(&content) {
        records.iter().for_each(&mut insert);
        return Ok(keys);
    }

    tracing::debug!("Output file is not a JSON array, trying JSONL line-by-line");
    let mut skipped_lines = 0u64;
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<Value>(line) {
            Ok(record) => insert(&record),
            Err(_) => skipped_lines += 1,
        }
    }
    if skipped_lines > 0 {
        tracing::warn!(
            "--skip-existing: {skipped_lines} lines in output file could not be parsed, \
             those documents will be rebuilt"
        );
    }

    Ok(keys)
}

/// Create a progress bar for the run; hidden for a single document.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if total <= 1 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the run.
fn print_summary(stats: &RunStats, skipped: usize, total_bytes: u64) {
    let total = stats.succeeded + stats.failed + skipped;
    let mb_read = total_bytes as f64 / 1_000_000.0;
    let throughput = if stats.total_seconds > 0.0 {
        mb_read / stats.total_seconds
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    if skipped > 0 {
        eprintln!("    Skipped:      {:>8}", skipped);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Records:      {:>8}", stats.records);
    eprintln!("    Duration:     {:>7.1}s", stats.total_seconds);
    eprintln!("    Rate:         {:>7.1} docs/sec", stats.documents_per_second);
    eprintln!("    Throughput:   {:>7.1} MB/sec", throughput);
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoops_core::input::DocumentLoader;
    use photoops_core::{Config, FacetEngine, FacetKind};
    use std::path::PathBuf;

    fn write_document(dir: &Path, name: &str, key: &str) -> PathBuf {
        let path = dir.join(name);
        let doc = serde_json::json!({
            "bucket": "photos",
            "key": key,
            "size": 1024,
            "container": "jpg",
            "exif": {"ifd0": {"make": "Canon", "model": "Canon EOS R5"}}
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        path
    }

    fn context(format: CoreOutputFormat) -> FacetsContext {
        let config = Config::default();
        FacetsContext {
            engine: FacetEngine::new(&config)
                .with_facets(vec![FacetKind::Camera, FacetKind::File]),
            loader: DocumentLoader::new(config.limits),
            output_format: format,
            pretty: false,
        }
    }

    #[tokio::test]
    async fn test_batch_writes_jsonl_records() {
        let dir = tempfile::tempdir().unwrap();
        let docs_dir = dir.path().join("docs");
        std::fs::create_dir(&docs_dir).unwrap();
        write_document(&docs_dir, "a.json", "a.jpg");
        write_document(&docs_dir, "b.json", "b.jpg");
        std::fs::write(docs_dir.join("broken.json"), "{\"bucket\": 7}").unwrap();

        let output = dir.path().join("out.jsonl");
        let args = FacetsArgs {
            input: docs_dir.clone(),
            output: Some(output.clone()),
            ..FacetsArgs::default()
        };
        let documents = DocumentDiscovery::new().discover(&docs_dir);
        assert_eq!(documents.len(), 3);

        process_batch(context(CoreOutputFormat::JsonLines), &args, documents)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let records: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["pk"], "photos#a.jpg");
        assert_eq!(records[0]["sk"], "camera#v0");
        assert_eq!(records[3]["sk"], "file#v0");
    }

    #[tokio::test]
    async fn test_skip_existing_appends_only_new_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs_dir = dir.path().join("docs");
        std::fs::create_dir(&docs_dir).unwrap();
        write_document(&docs_dir, "a.json", "a.jpg");

        let output = dir.path().join("out.json");
        let args = FacetsArgs {
            input: docs_dir.clone(),
            output: Some(output.clone()),
            skip_existing: true,
            ..FacetsArgs::default()
        };

        let first = DocumentDiscovery::new().discover(&docs_dir);
        process_batch(context(CoreOutputFormat::Json), &args, first)
            .await
            .unwrap();

        write_document(&docs_dir, "b.json", "b.jpg");
        let second = DocumentDiscovery::new().discover(&docs_dir);
        process_batch(context(CoreOutputFormat::Json), &args, second)
            .await
            .unwrap();

        let records: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r["pk"].as_str().unwrap()).collect();
        assert_eq!(
            keys,
            vec!["photos#a.jpg", "photos#a.jpg", "photos#b.jpg", "photos#b.jpg"]
        );
    }

    #[test]
    fn test_resumed_json_output_untouched_until_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let earlier = serde_json::json!([{"pk": "photos#a.jpg", "sk": "camera#v0"}]);
        std::fs::write(&output, earlier.to_string()).unwrap();

        let args = FacetsArgs {
            output: Some(output.clone()),
            skip_existing: true,
            ..FacetsArgs::default()
        };
        let ctx = context(CoreOutputFormat::Json);
        let existing = load_existing_keys(&output).unwrap();

        // Abandoned mid-run: the earlier output survives and no temp file lingers
        let (mut writer, staged) = open_writer(&ctx, &args, &existing).unwrap();
        writer.write(&serde_json::json!({"pk": "photos#b.jpg"})).unwrap();
        drop(writer);
        drop(staged);
        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(on_disk, earlier);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        // Completed: earlier records are carried ahead of the new ones
        let (mut writer, staged) = open_writer(&ctx, &args, &existing).unwrap();
        writer.write(&serde_json::json!({"pk": "photos#b.jpg"})).unwrap();
        writer.finish().unwrap();
        drop(writer);
        staged.unwrap().persist(&output).unwrap();
        let records: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["pk"], "photos#a.jpg");
        assert_eq!(records[1]["pk"], "photos#b.jpg");
    }

    #[tokio::test]
    async fn test_batch_fails_when_every_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let output = dir.path().join("out.json");
        let args = FacetsArgs {
            input: path.clone(),
            output: Some(output),
            ..FacetsArgs::default()
        };
        let documents = DocumentDiscovery::new().discover(&path);
        let result = process_batch(context(CoreOutputFormat::Json), &args, documents).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_load_existing_keys_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let records = serde_json::json!([
            {"pk": "photos#a.jpg", "sk": "camera#v0"},
            {"pk": "photos#a.jpg", "sk": "file#v0"},
            {"pk": "photos#b.jpg", "sk": "camera#v0"}
        ]);
        std::fs::write(&path, records.to_string()).unwrap();

        let keys = load_existing_keys(&path).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("photos#b.jpg"));
    }

    #[test]
    fn test_load_existing_keys_jsonl_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.jsonl");
        std::fs::write(
            &path,
            "{\"pk\":\"photos#a.jpg\",\"sk\":\"lens#v0\"}\nnot json\n\n{\"pk\":\"photos#c.jpg\"}\n",
        )
        .unwrap();

        let keys = load_existing_keys(&path).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("photos#a.jpg"));
        assert!(keys.contains("photos#c.jpg"));
    }

    #[test]
    fn test_load_existing_keys_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let keys = load_existing_keys(&dir.path().join("nonexistent.json")).unwrap();
        assert!(keys.is_empty());
    }
}
