use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use tally_core::Message;

/// Markdown transcript under ~/.tally/chat, one file per UTC day.
/// A disabled transcript accepts appends and writes nothing.
pub struct Transcript {
    dir: Option<PathBuf>,
}

impl Transcript {
    pub fn open(enabled: bool) -> Result<Self> {
        if !enabled {
            return Ok(Self { dir: None });
        }
        let dir = crate::state::chat_dir()?;
        tracing::info!(dir = %dir.display(), "chat transcript");
        Ok(Self { dir: Some(dir) })
    }

    pub fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    /// Log a session message with its role
    pub fn append_message(&mut self, msg: &Message) -> Result<()> {
        match msg {
            Message::User(text) => self.append("user", text),
            Message::Assistant(text) => self.append("assistant", text),
            Message::Chart(chart) => {
                let parts: Vec<String> = chart
                    .iter()
                    .map(|(label, value)| format!("{label}={value}"))
                    .collect();
                self.append("chart", &parts.join(", "))
            }
        }
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        // file name and timestamp come from the same instant
        let now = Utc::now();
        let path = day_file(dir, now);
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        writeln!(f, "{}", entry_line(now, role, msg))
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

fn day_file(dir: &Path, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{}.md", at.format("%Y-%m-%d")))
}

fn entry_line(at: DateTime<Utc>, role: &str, msg: &str) -> String {
    format!("- {} [{}] {}", at.to_rfc3339(), role, msg.replace('\n', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_disabled_transcript_is_noop() {
        let mut t = Transcript::open(false).unwrap();
        t.append_system("session_start").unwrap();
        t.append_message(&Message::User("income=1".to_string())).unwrap();
        assert!(t.dir.is_none());
    }

    #[test]
    fn test_file_and_entry_share_utc_date() {
        // 23:30 UTC is already the next day in Asia/Kolkata
        let at = Utc.with_ymd_and_hms(2024, 3, 31, 23, 30, 0).unwrap();
        let path = day_file(Path::new("/tmp/chat"), at);
        assert_eq!(path, PathBuf::from("/tmp/chat/2024-03-31.md"));

        let line = entry_line(at, "user", "income=1\nfood=2");
        assert_eq!(line, "- 2024-03-31T23:30:00+00:00 [user] income=1 food=2");
    }

    #[test]
    fn test_append_writes_into_day_file() {
        let dir = std::env::temp_dir().join(format!("tally-transcript-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut t = Transcript {
            dir: Some(dir.clone()),
        };
        t.append_system("session_start").unwrap();
        t.append_message(&Message::Assistant("hi".to_string())).unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        let body = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[system] session_start"));
        assert!(lines[1].ends_with("[assistant] hi"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
