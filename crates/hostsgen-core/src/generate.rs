//! The merge engine: fetch every source, normalize, deduplicate, and write the
//! combined `hosts` file to each output directory.
//!
//! Sources are processed sequentially in the given order. A source that cannot be
//! fetched is reported and skipped; the run still completes with whatever was
//! gathered. Output directories are written independently of each other.

use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

use crate::artifact::{self, WriteError};
use crate::fetch::{FetchError, Fetcher};
use crate::merge::{EntrySet, MergeStats};

/// What happened to one consulted source.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched(MergeStats),
    Unreachable(FetchError),
}

#[derive(Debug)]
pub struct SourceReport {
    pub url: String,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Fetched(_))
    }
}

/// Result of one generation run. Unreachable sources and failed directories are
/// partial failures; the artifact is still built from everything else.
#[derive(Debug)]
pub struct GenerateReport {
    pub generated_at: NaiveDateTime,
    pub sources: Vec<SourceReport>,
    pub unique_entries: usize,
    pub written: Vec<PathBuf>,
    pub write_failures: Vec<(PathBuf, WriteError)>,
}

impl GenerateReport {
    /// True when every source was fetched and every directory written.
    pub fn is_complete(&self) -> bool {
        self.write_failures.is_empty() && self.sources.iter().all(SourceReport::is_reachable)
    }

    pub fn unreachable_sources(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.sources.iter().filter_map(|s| match &s.outcome {
            SourceOutcome::Unreachable(e) => Some((s.url.as_str(), e)),
            SourceOutcome::Fetched(_) => None,
        })
    }

    pub fn reachable_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_reachable()).count()
    }
}

/// Fetch and merge every source into one [`EntrySet`].
pub fn merge_sources<F: Fetcher + ?Sized>(
    fetcher: &F,
    sources: &[String],
) -> (EntrySet, Vec<SourceReport>) {
    let mut entries = EntrySet::new();
    let mut reports = Vec::with_capacity(sources.len());

    for url in sources {
        tracing::info!(url = %url, "fetching source");
        let outcome = match fetcher.fetch(url) {
            Ok(body) => {
                let stats = entries.extend_from_text(&body);
                tracing::info!(
                    url = %url,
                    entries = stats.entries,
                    added = stats.added,
                    "merged source"
                );
                SourceOutcome::Fetched(stats)
            }
            Err(e) => {
                tracing::warn!(url = %url, "unable to reach source: {}", e);
                SourceOutcome::Unreachable(e)
            }
        };
        reports.push(SourceReport {
            url: url.clone(),
            outcome,
        });
    }

    (entries, reports)
}

/// Run generation stamped with the current local time.
///
/// An empty `output_dirs` writes to the current directory.
pub fn generate<F: Fetcher + ?Sized>(
    fetcher: &F,
    sources: &[String],
    output_dirs: &[PathBuf],
) -> GenerateReport {
    generate_at(fetcher, sources, output_dirs, Local::now().naive_local())
}

pub fn generate_at<F: Fetcher + ?Sized>(
    fetcher: &F,
    sources: &[String],
    output_dirs: &[PathBuf],
    generated_at: NaiveDateTime,
) -> GenerateReport {
    let (entries, reports) = merge_sources(fetcher, sources);
    let content = artifact::render(generated_at, sources, &entries);

    let default_dirs;
    let dirs: &[PathBuf] = if output_dirs.is_empty() {
        default_dirs = vec![PathBuf::from(".")];
        &default_dirs
    } else {
        output_dirs
    };
    let summary = artifact::write_all(dirs, &content);

    tracing::info!(
        sources = sources.len(),
        unique_entries = entries.len(),
        written = summary.written.len(),
        failed = summary.failed.len(),
        "generation finished"
    );

    GenerateReport {
        generated_at,
        sources: reports,
        unique_entries: entries.len(),
        written: summary.written,
        write_failures: summary.failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::HOSTS_FILE_NAME;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// Serves canned bodies; URLs without a body answer 404.
    struct FakeFetcher {
        bodies: HashMap<String, String>,
    }

    impl FakeFetcher {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                bodies: pairs
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
            }
        }
    }

    impl Fetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.bodies.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn entry_lines(artifact: &str) -> Vec<&str> {
        artifact
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter(|l| *l != "127.0.0.1 localhost" && *l != "::1 localhost")
            .collect()
    }

    #[test]
    fn end_to_end_single_source() {
        let fetcher = FakeFetcher::new(&[(
            "http://s1/hosts.txt",
            "0.0.0.0  bad.com\n# comment\n127.0.0.1\tworse.com\n",
        )]);
        let out = tempdir().unwrap();
        let report = generate_at(
            &fetcher,
            &urls(&["http://s1/hosts.txt"]),
            &[out.path().to_path_buf()],
            at(),
        );

        assert!(report.is_complete());
        assert_eq!(report.generated_at, at());
        assert_eq!(report.unique_entries, 2);
        let text = std::fs::read_to_string(out.path().join(HOSTS_FILE_NAME)).unwrap();
        assert!(text.starts_with("# Updated on 2015-01-02 03:04:05\n"));
        assert!(text.contains("# http://s1/hosts.txt\n"));
        assert_eq!(entry_lines(&text), vec!["0.0.0.0 bad.com", "0.0.0.0 worse.com"]);
        assert!(!text.contains("# comment"));
    }

    #[test]
    fn unreachable_source_is_skipped_but_listed() {
        let fetcher = FakeFetcher::new(&[
            ("http://a/list", "0.0.0.0 a.com\n0.0.0.0 shared.com\n"),
            ("http://c/list", "0.0.0.0 shared.com\n0.0.0.0 c.com\n"),
        ]);
        let sources = urls(&["http://a/list", "http://b/missing", "http://c/list"]);
        let out = tempdir().unwrap();
        let report = generate_at(&fetcher, &sources, &[out.path().to_path_buf()], at());

        assert!(!report.is_complete());
        assert_eq!(report.reachable_count(), 2);
        let unreachable: Vec<&str> = report.unreachable_sources().map(|(u, _)| u).collect();
        assert_eq!(unreachable, vec!["http://b/missing"]);
        assert!(report.written.len() == 1 && report.write_failures.is_empty());

        let text = std::fs::read_to_string(out.path().join(HOSTS_FILE_NAME)).unwrap();
        for url in &sources {
            assert!(text.contains(&format!("# {url}\n")), "header must list {url}");
        }
        assert_eq!(
            entry_lines(&text),
            vec!["0.0.0.0 a.com", "0.0.0.0 shared.com", "0.0.0.0 c.com"]
        );
    }

    #[test]
    fn empty_body_still_appears_in_header() {
        let fetcher = FakeFetcher::new(&[("http://empty/", "")]);
        let out = tempdir().unwrap();
        let report = generate_at(
            &fetcher,
            &urls(&["http://empty/"]),
            &[out.path().to_path_buf()],
            at(),
        );
        assert!(report.is_complete());
        assert_eq!(report.unique_entries, 0);
        let text = std::fs::read_to_string(out.path().join(HOSTS_FILE_NAME)).unwrap();
        assert!(text.contains("# http://empty/\n"));
        assert!(text.contains("127.0.0.1 localhost\n::1 localhost\n"));
        assert!(entry_lines(&text).is_empty());
    }

    #[test]
    fn duplicate_source_urls_are_tolerated() {
        let fetcher = FakeFetcher::new(&[("http://dup/", "0.0.0.0 x.com\n")]);
        let (entries, reports) = merge_sources(&fetcher, &urls(&["http://dup/", "http://dup/"]));
        assert_eq!(reports.len(), 2);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn fans_out_to_every_directory() {
        let fetcher = FakeFetcher::new(&[("http://s/", "0.0.0.0 y.com\n")]);
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let report = generate_at(
            &fetcher,
            &urls(&["http://s/"]),
            &[a.path().to_path_buf(), b.path().to_path_buf()],
            at(),
        );
        assert_eq!(report.written.len(), 2);
        let ca = std::fs::read_to_string(a.path().join(HOSTS_FILE_NAME)).unwrap();
        let cb = std::fs::read_to_string(b.path().join(HOSTS_FILE_NAME)).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn failed_directory_does_not_stop_the_others() {
        let fetcher = FakeFetcher::new(&[("http://s/", "0.0.0.0 y.com\n")]);
        let good = tempdir().unwrap();
        let bad = good.path().join("missing");
        let report = generate_at(
            &fetcher,
            &urls(&["http://s/"]),
            &[bad.clone(), good.path().to_path_buf()],
            at(),
        );
        assert!(!report.is_complete());
        assert_eq!(report.write_failures.len(), 1);
        assert_eq!(report.write_failures[0].0, bad);
        assert!(good.path().join(HOSTS_FILE_NAME).exists());
    }
}
