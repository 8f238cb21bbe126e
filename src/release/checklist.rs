//! The release checklist for the current HEAD
//!
//! Five steps: bump versions, review breaking changes, publish, tag, write
//! release notes. Each step reports what is left to do for the workspace as
//! it is right now.

use crate::core::config::CruxConfig;
use crate::release::notes::NotesStatus;
use crate::release::review::Review;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;

/// State of a checklist step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
  Done,
  Pending,
  /// Needs a human decision before continuing
  Attention,
}

impl StepStatus {
  fn icon(self) -> &'static str {
    match self {
      StepStatus::Done => "✅",
      StepStatus::Pending => "⏳",
      StepStatus::Attention => "⚠️ ",
    }
  }
}

impl fmt::Display for StepStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      StepStatus::Done => "done",
      StepStatus::Pending => "pending",
      StepStatus::Attention => "attention",
    };
    write!(f, "{}", s)
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistStep {
  pub number: usize,
  pub title: String,
  /// Command the maintainer runs for this step
  #[serde(skip_serializing_if = "Option::is_none")]
  pub command: Option<String>,
  pub status: StepStatus,
  pub items: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
}

/// Everything the checklist is computed from
pub struct ChecklistInput<'a> {
  pub head: String,
  pub generated_at: DateTime<Utc>,
  pub config: &'a CruxConfig,
  /// Derived publish order, or why there is none
  pub order: Result<&'a [String], String>,
  pub review: &'a Review,
  /// Notes status of pending releases of notes crates
  pub notes: &'a [NotesStatus],
}

#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
  pub generated_at: DateTime<Utc>,
  pub head: String,
  pub steps: Vec<ChecklistStep>,
}

impl Checklist {
  pub fn build(input: &ChecklistInput<'_>) -> Self {
    let pending = &input.review.pending;
    let config = &input.config.release;

    let bump = ChecklistStep {
      number: 1,
      title: "Bump versions".to_string(),
      command: Some(config.bump_command.clone()),
      status: if pending.is_empty() {
        StepStatus::Pending
      } else {
        StepStatus::Done
      },
      items: pending
        .iter()
        .map(|r| match r.previous_version() {
          Some(prev) => format!("{}: {} → {} ({})", r.crate_name, prev, r.version, r.bump),
          None => format!("{}: {} (first release)", r.crate_name, r.version),
        })
        .collect(),
      note: pending
        .is_empty()
        .then(|| "No crate version differs from its latest tag".to_string()),
    };

    let findings = &input.review.findings;
    let review = ChecklistStep {
      number: 2,
      title: "Review breaking changes".to_string(),
      command: None,
      status: if !findings.is_empty() {
        StepStatus::Attention
      } else if pending.is_empty() {
        StepStatus::Pending
      } else {
        StepStatus::Done
      },
      items: findings
        .iter()
        .flat_map(|f| {
          let head = format!(
            "{}: {} → {} is {}, changes suggest {} ({})",
            f.crate_name, f.from, f.to, f.bump, f.required, f.suggested_version
          );
          std::iter::once(head).chain(f.reasons.iter().map(|r| format!("  {}", r)))
        })
        .collect(),
      note: (!findings.is_empty())
        .then(|| "Open a review PR with the corrected versions before publishing".to_string()),
    };

    let publish = match &input.order {
      Ok(order) => ChecklistStep {
        number: 3,
        title: "Publish".to_string(),
        command: Some(config.publish_script.clone()),
        status: if pending.is_empty() {
          StepStatus::Done
        } else {
          StepStatus::Pending
        },
        items: order
          .iter()
          .filter(|name| pending.iter().any(|r| &&r.crate_name == name))
          .map(|name| name.to_string())
          .collect(),
        note: None,
      },
      Err(problem) => ChecklistStep {
        number: 3,
        title: "Publish".to_string(),
        command: Some(config.publish_script.clone()),
        status: StepStatus::Attention,
        items: Vec::new(),
        note: Some(problem.clone()),
      },
    };

    let tag = ChecklistStep {
      number: 4,
      title: "Tag releases".to_string(),
      command: Some("cargo crux-release tag --apply".to_string()),
      status: if pending.is_empty() {
        StepStatus::Done
      } else {
        StepStatus::Pending
      },
      items: pending.iter().map(|r| r.tag_name()).collect(),
      note: None,
    };

    let notes_status = if input.notes.iter().any(|n| n.present && n.required() && !n.callout) {
      StepStatus::Attention
    } else if input.notes.iter().all(NotesStatus::satisfied) {
      StepStatus::Done
    } else {
      StepStatus::Pending
    };
    let notes = ChecklistStep {
      number: 5,
      title: "Write release notes".to_string(),
      command: None,
      status: notes_status,
      items: input
        .notes
        .iter()
        .map(|n| {
          let state = match (n.required(), n.present, n.callout) {
            (true, true, true) => "breaking, notes ready",
            (true, true, false) => "breaking, notes lack a breaking-changes callout",
            (true, false, _) => "breaking, notes required",
            (false, _, _) => "notes optional",
          };
          format!("{}: {} ({})", n.tag, state, n.location)
        })
        .collect(),
      note: None,
    };

    Self {
      generated_at: input.generated_at,
      head: input.head.clone(),
      steps: vec![bump, review, publish, tag, notes],
    }
  }

  /// Whether any step needs a human decision
  pub fn needs_attention(&self) -> bool {
    self.steps.iter().any(|s| s.status == StepStatus::Attention)
  }

  pub fn render_text(&self) -> String {
    let mut out = String::new();
    let short_head = &self.head[..self.head.len().min(12)];
    let _ = writeln!(out, "📋 Release checklist for {}", short_head);
    let _ = writeln!(out, "   generated {}", self.generated_at.to_rfc3339());
    let _ = writeln!(out);

    for step in &self.steps {
      let _ = writeln!(out, "{} {}. {} [{}]", step.status.icon(), step.number, step.title, step.status);
      if let Some(cmd) = &step.command {
        let _ = writeln!(out, "     $ {}", cmd);
      }
      for item in &step.items {
        let _ = writeln!(out, "     - {}", item);
      }
      if let Some(note) = &step.note {
        let _ = writeln!(out, "     💡 {}", note);
      }
    }

    out
  }
}
