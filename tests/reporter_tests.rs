use async_trait::async_trait;
use resource_images::report::{DuplicatePolicy, ReportFormat};
use resource_images::{ReportError, Reporter, ResourceImageRow, ResourceSource};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stand-in for a database: hands out canned rows (or a canned failure) and counts closes.
struct CannedSource {
    rows: Mutex<Option<Result<Vec<ResourceImageRow>, ReportError>>>,
    queried: Mutex<Vec<String>>,
    closes: AtomicUsize,
}

impl CannedSource {
    fn with(result: Result<Vec<ResourceImageRow>, ReportError>) -> Self {
        Self {
            rows: Mutex::new(Some(result)),
            queried: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        }
    }

    fn rows(rows: &[(&str, Option<&str>)]) -> Self {
        Self::with(Ok(rows
            .iter()
            .map(|(name, url)| ResourceImageRow::new(*name, *url))
            .collect()))
    }
}

#[async_trait]
impl ResourceSource for CannedSource {
    async fn fetch_resource_images(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ResourceImageRow>, ReportError> {
        self.queried.lock().unwrap().push(guild_id.to_string());
        self.rows
            .lock()
            .unwrap()
            .take()
            .expect("fetched more than once")
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn snippet_reporter() -> Reporter {
    Reporter::new(
        "house-melange",
        DuplicatePolicy::LastWins,
        ReportFormat::Snippet,
    )
}

#[tokio::test]
async fn report_keeps_only_rows_with_urls() {
    let source = CannedSource::rows(&[
        ("Alpha", Some("http://a")),
        ("Beta", Some("")),
        ("Gamma", Some("http://g")),
    ]);

    let (map, fetched) = snippet_reporter().collect(&source).await.unwrap();
    assert_eq!(fetched, 3);
    assert_eq!(
        map.iter().collect::<Vec<_>>(),
        vec![("Alpha", "http://a"), ("Gamma", "http://g")]
    );
    assert_eq!(source.closes.load(Ordering::SeqCst), 1);
    assert_eq!(*source.queried.lock().unwrap(), vec!["house-melange"]);
}

#[tokio::test]
async fn output_is_sorted_regardless_of_row_order() {
    let source = CannedSource::rows(&[("Zed", Some("u1")), ("Abe", Some("u2"))]);

    let mut out = Vec::new();
    let summary = snippet_reporter().run(&source, &mut out).await.unwrap();
    assert_eq!(summary.entries, 2);

    let out = String::from_utf8(out).unwrap();
    let abe = out.find("// Abe").unwrap();
    let zed = out.find("// Zed").unwrap();
    assert!(abe < zed);
}

#[tokio::test]
async fn count_line_counts_retained_entries_not_rows() {
    let source = CannedSource::rows(&[
        ("Alpha", Some("http://a")),
        ("Beta", None),
        ("Gamma", Some("")),
    ]);

    let mut out = Vec::new();
    let summary = snippet_reporter().run(&source, &mut out).await.unwrap();
    assert_eq!(summary.rows_fetched, 3);
    assert_eq!(summary.entries, 1);
    assert!(
        String::from_utf8(out)
            .unwrap()
            .starts_with("Found 1 resources with images\n")
    );
}

#[tokio::test]
async fn source_is_closed_when_fetch_fails() {
    let source = CannedSource::with(Err(ReportError::ProtocolError(
        "connection reset".to_string(),
    )));

    let mut out = Vec::new();
    let err = snippet_reporter().run(&source, &mut out).await.unwrap_err();
    assert!(matches!(err, ReportError::ProtocolError(_)));
    assert_eq!(source.closes.load(Ordering::SeqCst), 1);
    assert!(out.is_empty());
}

#[tokio::test]
async fn source_is_closed_when_duplicates_are_rejected() {
    let source = CannedSource::rows(&[("Iron Ore", Some("a")), ("Iron Ore", Some("b"))]);
    let reporter = Reporter::new("house-melange", DuplicatePolicy::Reject, ReportFormat::Snippet);

    let err = reporter.collect(&source).await.unwrap_err();
    assert!(matches!(err, ReportError::DuplicateName(_)));
    assert_eq!(source.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reporter_works_through_a_trait_object() {
    let source: Box<dyn ResourceSource> = Box::new(CannedSource::rows(&[("Abe", Some("u"))]));

    let mut out = Vec::new();
    let summary = snippet_reporter()
        .run(source.as_ref(), &mut out)
        .await
        .unwrap();
    assert_eq!(summary.entries, 1);
}
