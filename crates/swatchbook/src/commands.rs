// ABOUTME: Subcommand implementations for the swatch binary
// ABOUTME: Loads snapshots and configs, then prints collections, reports or serves host requests

use anyhow::{Context, Result, anyhow};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use swatchbook_core::{
    DocumentConfig, InMemoryStore, ReportDocument, VariableStore, build_report,
    resolve_tokens_for_collection,
};
use swatchbook_host::{
    HostRequest, HostResponse, HostSession, decode_request, encode_response,
};
use swatchbook_logging::{info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::cli::{Cli, CollectionsArgs, Commands, OutputFormat, ReportArgs, ServeArgs};
use crate::table::render_text;

pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Collections(args) => run_collections(&args, out).await,
        Commands::Report(args) => run_report(&args, out).await,
        Commands::Serve(args) => run_serve(&args).await,
    }
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    InMemoryStore::load(path)
        .with_context(|| format!("failed to load variable snapshot {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<DocumentConfig> {
    match path {
        Some(path) => DocumentConfig::load(path)
            .with_context(|| format!("failed to load document config {}", path.display())),
        None => Ok(DocumentConfig::default()),
    }
}

pub async fn run_collections(args: &CollectionsArgs, out: &mut impl Write) -> Result<()> {
    let store = load_store(&args.snapshot)?;
    let collections = store.list_collections().await?;
    if collections.is_empty() {
        writeln!(out, "No variable collections found.")?;
    }
    for collection in &collections {
        writeln!(out, "{} ({})", collection.name, collection.id)?;
        for mode in &collection.modes {
            writeln!(out, "  {} ({})", mode.name, mode.mode_id)?;
        }
    }
    Ok(())
}

pub async fn run_report(args: &ReportArgs, out: &mut impl Write) -> Result<()> {
    let store = load_store(&args.snapshot)?;
    let config = load_config(args.config.as_deref())?;

    let collection = store
        .collection(&args.collection)
        .ok_or_else(|| anyhow!("collection not found: {}", args.collection))?;
    let mode = match &args.mode {
        Some(key) => collection.find_mode(key).ok_or_else(|| {
            anyhow!("mode '{key}' not found in collection '{}'", collection.name)
        })?,
        None => collection
            .default_mode()
            .ok_or_else(|| anyhow!("collection '{}' has no modes", collection.name))?,
    };
    info!(collection = %collection.name, mode = %mode.name, "Generating report");

    let tokens = resolve_tokens_for_collection(&store, &collection.id, &mode.mode_id).await;
    let report = build_report(&tokens);

    match args.format {
        OutputFormat::Text => {
            let title = format!("{} / {}", collection.name, mode.name);
            write!(out, "{}", render_text(&report, &title))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Tree => {
            let node = ReportDocument::build(&report, &config);
            serde_json::to_writer_pretty(&mut *out, &node)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Bridge stdin/stdout JSON lines to a host session until cancel or EOF
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let store: Arc<dyn VariableStore> = Arc::new(load_store(&args.snapshot)?);
    let config = load_config(args.config.as_deref())?;
    let mut session = HostSession::new(store, config);

    let input = std::io::BufReader::new(std::io::stdin());
    let mut output = tokio::io::stdout();
    serve_lines(&mut session, input, &mut output).await
}

/// Run a session over line-delimited JSON.
///
/// Input is read on a detached thread, so a `cancel` returns even while the
/// input is still open.
pub async fn serve_lines<R, W>(session: &mut HostSession, input: R, output: &mut W) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (request_tx, request_rx) = mpsc::channel(16);
    let (response_tx, mut response_rx) = mpsc::channel::<HostResponse>(16);

    std::thread::Builder::new()
        .name("swatch-stdin".to_string())
        .spawn(move || read_requests(input, request_tx))
        .context("failed to start request reader")?;

    let writer = async {
        while let Some(response) = response_rx.recv().await {
            let line = encode_response(&response)?;
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        anyhow::Ok(())
    };

    let (served, written) =
        tokio::join!(swatchbook_host::run(session, request_rx, response_tx), writer);
    served?;
    written
}

fn read_requests(input: impl BufRead, requests: mpsc::Sender<HostRequest>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "Failed to read host request");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_request(&line) {
            Ok(request) => {
                if requests.blocking_send(request).is_err() {
                    break;
                }
            }
            Err(err) => warn!(error = %err, "Ignoring malformed host request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::path::PathBuf;
    use swatchbook_host::DOCUMENT_GENERATED;

    const SNAPSHOT: &str = r#"{
        "collections": [
            {"id": "c1", "name": "Semantic", "modes": [
                {"modeId": "light", "name": "Light"},
                {"modeId": "dark", "name": "Dark"}
            ]}
        ],
        "variables": [
            {"id": "bg", "name": "Primary/Background", "resolvedType": "COLOR",
             "variableCollectionId": "c1",
             "valuesByMode": {"light": {"r": 1, "g": 1, "b": 1}, "dark": {"r": 0, "g": 0, "b": 0}}},
            {"id": "fg", "name": "Primary/Foreground", "resolvedType": "COLOR",
             "variableCollectionId": "c1",
             "valuesByMode": {"light": {"r": 0, "g": 0, "b": 0}, "dark": {"r": 1, "g": 1, "b": 1}}}
        ]
    }"#;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file
    }

    fn report_args(snapshot: PathBuf, format: OutputFormat) -> ReportArgs {
        ReportArgs {
            snapshot,
            collection: "semantic".to_string(),
            mode: None,
            format,
            config: None,
        }
    }

    #[tokio::test]
    async fn test_collections_output() {
        let file = snapshot_file();
        let mut out = Vec::new();
        run_collections(
            &CollectionsArgs {
                snapshot: file.path().to_path_buf(),
            },
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Semantic (c1)\n  Light (light)\n  Dark (dark)\n");
    }

    #[tokio::test]
    async fn test_text_report_defaults_to_first_mode() {
        let file = snapshot_file();
        let mut out = Vec::new();
        run_report(&report_args(file.path().to_path_buf(), OutputFormat::Text), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Semantic / Light"));
        assert!(text.contains("#ffffff"));
        assert!(text.contains("21.00:1 AAA / AAA"));
    }

    #[tokio::test]
    async fn test_json_report() {
        let file = snapshot_file();
        let mut args = report_args(file.path().to_path_buf(), OutputFormat::Json);
        args.mode = Some("Dark".to_string());
        let mut out = Vec::new();
        run_report(&args, &mut out).await.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["primary"]["primary"]["background"]["hex"], "#000000");
        assert_eq!(json["primary"]["primary"]["grade"]["large_text"], "AAA");
    }

    #[tokio::test]
    async fn test_tree_report_uses_config() {
        let file = snapshot_file();
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "title = \"Brand\"").unwrap();

        let mut args = report_args(file.path().to_path_buf(), OutputFormat::Tree);
        args.config = Some(config.path().to_path_buf());
        let mut out = Vec::new();
        run_report(&args, &mut out).await.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["name"], "Color System");
        assert_eq!(json["children"][0]["children"][0]["children"][0]["content"], "Brand");
    }

    #[tokio::test]
    async fn test_unknown_collection_and_mode() {
        let file = snapshot_file();
        let mut args = report_args(file.path().to_path_buf(), OutputFormat::Text);
        args.collection = "Missing".to_string();
        let err = run_report(&args, &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "collection not found: Missing");

        args.collection = "c1".to_string();
        args.mode = Some("sepia".to_string());
        let err = run_report(&args, &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "mode 'sepia' not found in collection 'Semantic'");
    }

    #[tokio::test]
    async fn test_missing_snapshot_has_context() {
        let args = report_args(PathBuf::from("/nonexistent/vars.json"), OutputFormat::Text);
        let err = run_report(&args, &mut Vec::new()).await.unwrap_err();
        assert!(err.to_string().starts_with("failed to load variable snapshot"));
    }

    /// Yields its lines, then blocks like a pipe whose writer never closes
    struct OpenInput(Cursor<Vec<u8>>);

    impl Read for OpenInput {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let read = self.0.read(buf)?;
            if read > 0 {
                return Ok(read);
            }
            loop {
                std::thread::park();
            }
        }
    }

    fn session() -> HostSession {
        let store = InMemoryStore::from_json_str(SNAPSHOT).unwrap();
        HostSession::new(Arc::new(store), DocumentConfig::default())
    }

    fn response_lines(output: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(output.to_vec())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_serve_stops_on_cancel_with_input_open() {
        let lines = [
            r#"{"type":"ui-ready"}"#,
            "not json",
            "",
            r#"{"type":"generate-doc","collectionId":"c1","modeId":"dark"}"#,
            r#"{"type":"cancel"}"#,
            r#"{"type":"ui-ready"}"#,
        ];
        let input = std::io::BufReader::new(OpenInput(Cursor::new(
            format!("{}\n", lines.join("\n")).into_bytes(),
        )));
        let mut output = Vec::new();

        let served = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            serve_lines(&mut session(), input, &mut output),
        )
        .await;
        served.expect("session should end after cancel").unwrap();

        let responses = response_lines(&output);
        let types: Vec<&str> = responses
            .iter()
            .map(|response| response["type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["collections", "document", "notify", "closed"]);
        assert_eq!(responses[0]["collections"][0]["name"], "Semantic");
        assert_eq!(responses[1]["summary"]["graded"], 1);
        assert_eq!(responses[2]["message"], DOCUMENT_GENERATED);
    }

    #[tokio::test]
    async fn test_serve_ends_at_end_of_input() {
        let input = Cursor::new(
            br#"{"type":"generate-doc","collectionId":"nope","modeId":"light"}"#.to_vec(),
        );
        let mut output = Vec::new();
        serve_lines(&mut session(), input, &mut output).await.unwrap();

        let responses = response_lines(&output);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["type"], "notify");
        assert_eq!(responses[0]["message"], "Collection not found: nope");
    }
}
