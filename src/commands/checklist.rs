//! `cargo crux-release checklist` - the release checklist for HEAD

use crate::core::context::WorkspaceContext;
use crate::core::error::ReleaseResult;
use crate::release::checklist::{Checklist, ChecklistInput};
use crate::release::notes::NotesStatus;
use chrono::Utc;

pub fn run_checklist(ctx: &WorkspaceContext, json: bool) -> ReleaseResult<()> {
  let git = ctx.git()?;
  let head = git.head_commit()?;
  let review = ctx.review()?;

  let order = ctx.graph.publish_order();
  let source = ctx.notes_source();

  let notes_crates = ctx.config.notes_crates();
  let mut notes = Vec::new();
  for release in review.pending.iter().filter(|r| notes_crates.contains(&r.crate_name)) {
    notes.push(NotesStatus::evaluate(
      &release.crate_name,
      &release.version,
      release.previous_version(),
      &source,
    )?);
  }

  let checklist = Checklist::build(&ChecklistInput {
    head,
    generated_at: Utc::now(),
    config: &ctx.config,
    order: order.as_deref().map_err(|e| e.to_string()),
    review: &review,
    notes: &notes,
  });

  if json {
    println!("{}", serde_json::to_string_pretty(&checklist)?);
  } else {
    print!("{}", checklist.render_text());
    if checklist.needs_attention() {
      println!("\n⚠️  Some steps need a decision before the release can continue");
    }
  }

  Ok(())
}
