//! Detection of inline `run:` commands in workflow YAML.
//!
//! This is a line-oriented heuristic, not a YAML parser. It tracks just enough
//! structure to tell a step's command key apart from look-alike keys and from
//! text inside block scalars. Flow-style mappings, anchors and unusual
//! indentation can be misclassified.

use crate::engine::ScanOutcome;
use crate::fingerprint::fingerprint_for_violation;
use crate::model::{TextError, WorkflowSet};
use crate::policy::GovernancePolicy;
use driftguard_types::{RepoPath, ScanWarning, Violation, ViolationKind, ids};

const RUN_KEY: &str = "run";

/// What a single line turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    /// Blank, comment, or block-scalar text.
    Ignored,
    /// A list item whose first key is `run` (`- run: ...`).
    StepCommand,
    /// A bare `run` key at a step's own key level, or outside any step.
    KeyCommand,
    /// Any other structural line.
    Other,
}

impl LineClass {
    pub fn is_command(self) -> bool {
        matches!(self, LineClass::StepCommand | LineClass::KeyCommand)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepState {
    OutsideStep,
    /// `key_indent` is `None` after a bare `-` until the item's first key is seen.
    InsideStep {
        item_indent: usize,
        key_indent: Option<usize>,
    },
}

/// Line-by-line state machine over `{outside-step, inside-step}`.
#[derive(Clone, Debug)]
pub struct StepTracker {
    state: StepState,
    /// Indent of the key that opened a `|` or `>` block scalar.
    block_scalar_owner: Option<usize>,
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StepTracker {
    pub fn new() -> Self {
        Self {
            state: StepState::OutsideStep,
            block_scalar_owner: None,
        }
    }

    pub fn in_step(&self) -> bool {
        matches!(self.state, StepState::InsideStep { .. })
    }

    pub fn classify(&mut self, line: &str) -> LineClass {
        let stripped = line.trim_start();
        let indent = line.len() - stripped.len();

        // Blank lines neither close steps nor end block scalars.
        if stripped.trim_end().is_empty() {
            return LineClass::Ignored;
        }

        if let Some(owner) = self.block_scalar_owner {
            if indent > owner {
                return LineClass::Ignored;
            }
            self.block_scalar_owner = None;
        }

        if stripped.starts_with('#') {
            return LineClass::Ignored;
        }

        if indent == 0 && is_document_marker(stripped) {
            self.state = StepState::OutsideStep;
            return LineClass::Other;
        }

        if let Some(offset) = list_item_offset(stripped) {
            let content = &stripped[offset..];
            let key_indent = indent + offset;
            let has_inline_key = !content.trim_end().is_empty() && !content.starts_with('#');
            self.state = StepState::InsideStep {
                item_indent: indent,
                key_indent: has_inline_key.then_some(key_indent),
            };
            if opens_block_scalar(content) {
                self.block_scalar_owner = Some(key_indent);
            }
            return if is_run_key(content) {
                LineClass::StepCommand
            } else {
                LineClass::Other
            };
        }

        if let StepState::InsideStep {
            item_indent,
            key_indent,
        } = self.state
        {
            if indent <= item_indent {
                self.state = StepState::OutsideStep;
            } else if key_indent.is_none() {
                self.state = StepState::InsideStep {
                    item_indent,
                    key_indent: Some(indent),
                };
            }
        }

        if opens_block_scalar(stripped) {
            self.block_scalar_owner = Some(indent);
        }

        if !is_run_key(stripped) {
            return LineClass::Other;
        }

        match self.state {
            StepState::OutsideStep => LineClass::KeyCommand,
            StepState::InsideStep { key_indent, .. } if key_indent == Some(indent) => {
                LineClass::KeyCommand
            }
            // Nested under another key of the step (e.g. `with:`): an input, not a command.
            StepState::InsideStep { .. } => LineClass::Other,
        }
    }
}

/// 1-based numbers of every line classified as a command.
pub fn scan_lines(text: &str) -> Vec<u32> {
    let mut tracker = StepTracker::new();
    text.lines()
        .enumerate()
        .filter(|(_, line)| tracker.classify(line).is_command())
        .map(|(idx, _)| (idx + 1) as u32)
        .collect()
}

pub fn run(workflows: &WorkflowSet, policy: &GovernancePolicy, out: &mut ScanOutcome) {
    for file in &workflows.files {
        if policy.is_allowlisted(file.file_name()) {
            continue;
        }

        let text = match file.text() {
            Ok(text) => text,
            Err(err) => {
                let warning = skipped_file_warning(file.path.as_str(), &err);
                tracing::warn!(file = %file.path, code = %warning.code, "{}", warning.message);
                out.warnings.push(warning);
                continue;
            }
        };

        let lines = scan_lines(text);
        if lines.is_empty() {
            continue;
        }

        let kind = ViolationKind::BespokeRunCommand;
        out.violations.push(Violation {
            kind,
            check_id: kind.check_id().to_string(),
            file: Some(file.path.clone()),
            message: format!("Contains {} bespoke 'run:' command(s)", lines.len()),
            lines,
            help: Some(
                "Call an approved reusable workflow with `uses:` instead of inline commands."
                    .to_string(),
            ),
            fingerprint: Some(fingerprint_for_violation(
                kind.check_id(),
                kind.code(),
                file.path.as_str(),
            )),
        });
    }
}

fn skipped_file_warning(path: &str, err: &TextError) -> ScanWarning {
    let (code, message) = match err {
        TextError::Unreadable(reason) => (
            ids::WARN_UNREADABLE_FILE,
            format!("could not read {path}: {reason}; skipped inline-command scan"),
        ),
        TextError::InvalidUtf8 { valid_up_to } => (
            ids::WARN_INVALID_UTF8,
            format!(
                "{path} is not valid UTF-8 (first invalid byte at offset {valid_up_to}); skipped inline-command scan"
            ),
        ),
    };
    ScanWarning {
        file: RepoPath::new(path),
        code: code.to_string(),
        message,
    }
}

/// Offset of the item content if `stripped` is a block sequence entry (`- ...` or a bare `-`).
fn list_item_offset(stripped: &str) -> Option<usize> {
    let rest = stripped.strip_prefix('-')?;
    if rest.is_empty() {
        return Some(1);
    }
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let content = rest.trim_start_matches([' ', '\t']);
    Some(stripped.len() - content.len())
}

/// `run` as a whole mapping key: `run:` followed by whitespace or end of line.
fn is_run_key(content: &str) -> bool {
    let Some(rest) = content.strip_prefix(RUN_KEY) else {
        return false;
    };
    let Some(after) = rest.strip_prefix(':') else {
        return false;
    };
    after.is_empty() || after.starts_with(char::is_whitespace)
}

fn is_document_marker(stripped: &str) -> bool {
    let marker = stripped.trim_end();
    marker == "---" || marker == "..." || stripped.starts_with("--- ")
}

/// `key: |`, `key: >-`, `key: |2 # comment` and similar.
fn opens_block_scalar(content: &str) -> bool {
    let Some(value) = mapping_value(content) else {
        return false;
    };
    let value = match value.find(" #") {
        Some(idx) => &value[..idx],
        None => value,
    }
    .trim();

    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>')) && chars.all(|c| matches!(c, '+' | '-' | '1'..='9'))
}

/// Text after the first `: ` (or trailing `:`) separator of a `key: value` line.
fn mapping_value(content: &str) -> Option<&str> {
    let bytes = content.as_bytes();
    for (idx, b) in bytes.iter().enumerate() {
        if *b != b':' {
            continue;
        }
        match bytes.get(idx + 1) {
            None => return Some(""),
            Some(b' ' | b'\t') => return Some(&content[idx + 1..]),
            Some(_) => {}
        }
    }
    None
}
