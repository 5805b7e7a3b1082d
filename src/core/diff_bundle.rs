use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DIFF_CHARS: usize = 3000;
pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

/// One changed file as reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub filename: String,
    /// `None` for binary files and for patches the platform declines to render.
    #[serde(default)]
    pub patch: Option<String>,
}

impl FileDiff {
    pub fn new(filename: impl Into<String>, patch: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.map(str::to_string),
        }
    }
}

/// The length-capped text handed to the model.
///
/// Files without a patch are skipped. The remaining `"<filename>:\n<patch>"`
/// blocks are joined by a blank line. When the joined text is longer than
/// `max_chars` characters it is cut to exactly `max_chars` characters and
/// [`TRUNCATION_MARKER`] is appended; the marker does not count toward the cap.
/// A cap of `0` disables truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBundle {
    text: String,
    file_count: usize,
    truncated: bool,
}

impl DiffBundle {
    /// Returns `None` when no file carries a patch.
    pub fn from_files(files: &[FileDiff], max_chars: usize) -> Option<Self> {
        let blocks: Vec<String> = files
            .iter()
            .filter_map(|file| {
                file.patch
                    .as_ref()
                    .map(|patch| format!("{}:\n{}", file.filename, patch))
            })
            .collect();

        if blocks.is_empty() {
            return None;
        }

        let file_count = blocks.len();
        let mut text = blocks.join("\n\n");
        let mut truncated = false;

        if max_chars > 0 {
            if let Some((cut, _)) = text.char_indices().nth(max_chars) {
                text.truncate(cut);
                text.push_str(TRUNCATION_MARKER);
                truncated = true;
            }
        }

        Some(Self {
            text,
            file_count,
            truncated,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
