// src/record/mod.rs
// =============================================================================
// This module writes what the crawler finds to disk.
//
// Layout of the output directory:
//
//   Scraper Output/
//   ├── emails_found.txt                 one "email, url" line per discovery
//   ├── example.com_info@example.io.txt  page text where the address appeared
//   └── ...
//
// Errors here are NOT swallowed: if we can't write the results there is no
// point in continuing to crawl, so they bubble up and end the run.
// =============================================================================

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::crawl::domain_of;
use crate::error::Result;

pub const EMAIL_LOG_FILE: &str = "emails_found.txt";

const MAX_FILENAME_LEN: usize = 255;

// Persists the emails found on one page
pub trait Recorder {
    fn record(&mut self, page: &Url, text: &str, emails: &BTreeSet<String>) -> Result<()>;
}

// Writes page text and the discovery log into a directory
#[derive(Debug, Clone)]
pub struct FileRecorder {
    output_dir: PathBuf,
}

impl FileRecorder {
    // Creates the output directory if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // One file per (domain, email); a later page with the same pair
    // overwrites the earlier one
    fn save_page_text(&self, page: &Url, text: &str, emails: &BTreeSet<String>) -> Result<()> {
        let domain = domain_of(page);

        for email in emails {
            let filename = sanitize_filename(&format!("{}_{}.txt", domain, email));
            let path = self.output_dir.join(filename);
            fs::write(&path, text)?;
            log::info!("Saved page content where email was found to {}", path.display());
        }

        Ok(())
    }

    fn append_log(&self, page: &Url, emails: &BTreeSet<String>) -> Result<()> {
        let path = self.output_dir.join(EMAIL_LOG_FILE);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        for email in emails {
            writeln!(file, "{}, {}", email, page)?;
        }

        Ok(())
    }
}

impl Recorder for FileRecorder {
    fn record(&mut self, page: &Url, text: &str, emails: &BTreeSet<String>) -> Result<()> {
        self.save_page_text(page, text, emails)?;
        self.append_log(page, emails)
    }
}

// Keeps only characters that are safe in a filename on every platform
// (ASCII letters and digits plus "-_.() ") and cuts the result to 255
// characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')' | ' '))
        .take(MAX_FILENAME_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sanitize_strips_disallowed_characters() {
        let name = sanitize_filename("sub.example.com_weird<>name@x.io.txt");
        assert_eq!(name, "sub.example.com_weirdnamex.io.txt");
        assert_eq!(name, sanitize_filename("sub.example.com_weird<>name@x.io.txt"));
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = format!("{}@x.io.txt", "a".repeat(400));
        let name = sanitize_filename(&long);
        assert_eq!(name.len(), 255);
        assert!(name.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_sanitize_keeps_spaces_and_parens() {
        assert_eq!(sanitize_filename("a (1) b:c/d.txt"), "a (1) bcd.txt");
    }

    #[test]
    fn test_file_recorder_writes_pages_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Scraper Output");
        let mut recorder = FileRecorder::new(&out).unwrap();

        let page = Url::parse("https://acme.io/team").unwrap();
        recorder
            .record(&page, "Team page text", &emails(&["bob@acme.io", "amy@acme.io"]))
            .unwrap();

        let saved = fs::read_to_string(out.join("acme.io_bobacme.io.txt")).unwrap();
        assert_eq!(saved, "Team page text");
        assert!(out.join("acme.io_amyacme.io.txt").exists());

        let log = fs::read_to_string(out.join(EMAIL_LOG_FILE)).unwrap();
        assert_eq!(
            log,
            "amy@acme.io, https://acme.io/team\nbob@acme.io, https://acme.io/team\n"
        );
    }

    #[test]
    fn test_file_recorder_appends_across_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = FileRecorder::new(dir.path()).unwrap();

        let first = Url::parse("https://acme.io/").unwrap();
        let second = Url::parse("https://acme.io/about").unwrap();
        recorder.record(&first, "one", &emails(&["a@acme.io"])).unwrap();
        recorder.record(&second, "two", &emails(&["a@acme.io"])).unwrap();

        let log = fs::read_to_string(dir.path().join(EMAIL_LOG_FILE)).unwrap();
        assert_eq!(log.lines().count(), 2);

        // same (domain, email) pair: the later page wins
        let saved = fs::read_to_string(dir.path().join("acme.io_aacme.io.txt")).unwrap();
        assert_eq!(saved, "two");
    }

    #[test]
    fn test_unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        assert!(FileRecorder::new(&blocker).is_err());
    }
}
