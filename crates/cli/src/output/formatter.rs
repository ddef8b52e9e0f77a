//! Rendering of command results
//!
//! Each command hands its result to one typed method here. JSON mode prints
//! the result struct as pretty JSON on stdout; otherwise a short line is
//! printed, colored unless disabled.

use humansize::{BINARY, format_size};
use serde::Serialize;

use super::OutputConfig;

/// Entries found under a listed path
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub path: &'a str,
    pub entries: &'a [String],
}

/// Answer to an existence check
#[derive(Debug, Serialize)]
pub struct Existence<'a> {
    pub path: &'a str,
    pub exists: bool,
}

impl Existence<'_> {
    fn line(&self) -> String {
        if self.exists {
            format!("{} exists", self.path)
        } else {
            format!("{} does not exist", self.path)
        }
    }
}

/// What a mutating command did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Downloaded,
    Uploaded,
    Wrote,
    Deleted,
}

/// Result of a command that moved, wrote or removed data
#[derive(Debug, Serialize)]
pub struct Outcome<'a> {
    pub status: &'static str,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    pub target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl<'a> Outcome<'a> {
    /// `source` copied to `target`
    pub fn transfer(action: Action, source: &'a str, target: &'a str, size: u64) -> Self {
        Self {
            status: "success",
            action,
            source: Some(source),
            target,
            size_bytes: Some(size),
        }
    }

    /// `size` bytes written to `target`
    pub fn written(target: &'a str, size: u64) -> Self {
        Self {
            status: "success",
            action: Action::Wrote,
            source: None,
            target,
            size_bytes: Some(size),
        }
    }

    pub fn deleted(target: &'a str) -> Self {
        Self {
            status: "success",
            action: Action::Deleted,
            source: None,
            target,
            size_bytes: None,
        }
    }

    fn line(&self) -> String {
        let verb = match self.action {
            Action::Downloaded => "Downloaded",
            Action::Uploaded => "Uploaded",
            Action::Wrote => "Wrote",
            Action::Deleted => "Deleted",
        };
        let mut line = match self.source {
            Some(source) => format!("{verb} {source} to {}", self.target),
            None => format!("{verb} {}", self.target),
        };
        if let Some(size) = self.size_bytes {
            line.push_str(&format!(" ({})", format_size(size, BINARY)));
        }
        line
    }
}

/// Prints command results in the configured style
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Print listed names, one per line
    pub fn listing(&self, listing: &Listing<'_>) {
        if self.config.json {
            self.json(listing);
        } else {
            for entry in listing.entries {
                self.println(entry);
            }
        }
    }

    pub fn existence(&self, existence: &Existence<'_>) {
        if self.config.json {
            self.json(existence);
        } else {
            self.println(&existence.line());
        }
    }

    pub fn outcome(&self, outcome: &Outcome<'_>) {
        if self.config.json {
            self.json(outcome);
            return;
        }
        let mark = if self.colors_enabled() {
            "\x1b[32m✓\x1b[0m"
        } else {
            "✓"
        };
        self.println(&format!("{mark} {}", outcome.line()));
    }

    /// Print an error to stderr, even in quiet mode
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            match serde_json::to_string_pretty(&error) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{message}"),
            }
        } else if self.colors_enabled() {
            eprintln!("\x1b[31m✗\x1b[0m {message}");
        } else {
            eprintln!("✗ {message}");
        }
    }

    fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_flags() {
        assert!(Formatter::default().colors_enabled());

        let json = Formatter::new(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(!json.colors_enabled());

        let plain = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert!(!plain.colors_enabled());
    }

    #[test]
    fn test_listing_json() {
        let entries = vec!["a.txt".to_string(), "dir/".to_string()];
        let json = serde_json::to_value(Listing {
            path: "s3://bucket/prefix/",
            entries: &entries,
        })
        .unwrap();
        assert_eq!(json["path"], "s3://bucket/prefix/");
        assert_eq!(json["entries"], serde_json::json!(["a.txt", "dir/"]));
    }

    #[test]
    fn test_existence_line() {
        let yes = Existence {
            path: "s3://b/k",
            exists: true,
        };
        assert_eq!(yes.line(), "s3://b/k exists");

        let no = Existence {
            path: "/tmp/x",
            exists: false,
        };
        assert_eq!(no.line(), "/tmp/x does not exist");
        assert_eq!(serde_json::to_value(&no).unwrap()["exists"], false);
    }

    #[test]
    fn test_outcome_lines() {
        let download = Outcome::transfer(Action::Downloaded, "s3://b/k", "/tmp/k", 2048);
        assert_eq!(download.line(), "Downloaded s3://b/k to /tmp/k (2 KiB)");

        assert_eq!(Outcome::written("/tmp/out", 5).line(), "Wrote /tmp/out (5 B)");
        assert_eq!(Outcome::deleted("s3://b/k").line(), "Deleted s3://b/k");
    }

    #[test]
    fn test_outcome_json_omits_missing_fields() {
        let json = serde_json::to_value(Outcome::deleted("s3://b/k")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["action"], "deleted");
        assert!(json.get("source").is_none());
        assert!(json.get("size_bytes").is_none());

        let json =
            serde_json::to_value(Outcome::transfer(Action::Uploaded, "/tmp/a", "s3://b/a", 3))
                .unwrap();
        assert_eq!(json["action"], "uploaded");
        assert_eq!(json["source"], "/tmp/a");
        assert_eq!(json["size_bytes"], 3);
    }
}
