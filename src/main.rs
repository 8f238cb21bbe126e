mod cargo;
mod checks;
mod commands;
mod core;
mod graph;
mod release;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use core::error::{ReleaseError, print_error};

/// Check and drive the release process of a multi-crate workspace
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  CruxRelease(ReleaseCli),
}

#[derive(Parser)]
#[command(name = "crux-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct ReleaseCli {
  /// Verbosity (-v, -vv, -vvv)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run release checks (publish order, tags, notes, version review)
  Check {
    /// Run only the named check (repeatable)
    #[arg(long = "only", value_name = "CHECK")]
    only: Vec<String>,
    /// Restrict per-crate checks to one crate
    #[arg(long = "crate", value_name = "NAME")]
    crate_name: Option<String>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
  },

  /// Show the publish order with crate roles
  Order {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List release tags per crate
  Tags {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
    /// List the tags still to create for the versions at HEAD
    #[arg(long)]
    pending: bool,
  },

  /// Create release tags at HEAD for pending releases
  Tag {
    /// Actually create the tags (default: dry-run)
    #[arg(long)]
    apply: bool,
    /// Only tag this crate
    #[arg(long = "crate", value_name = "NAME")]
    crate_name: Option<String>,
  },

  /// Draft release notes for the pending release of a crate
  Notes {
    /// Crate to draft notes for
    crate_name: String,
    /// Write the draft to the notes directory (default: print it)
    #[arg(long)]
    apply: bool,
  },

  /// Print the release checklist for HEAD
  Checklist {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Log to stderr; `RUST_LOG` directives are honored on top of the `-v` level
fn setup_logging(verbosity: u8) {
  use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

  let level = match verbosity {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

  let fmt_layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false)
    .with_thread_names(false)
    .with_line_number(false);

  tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn main() {
  let CargoCli::CruxRelease(cli) = CargoCli::parse();
  setup_logging(cli.verbose);

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(ReleaseError::message(format!("Failed to get current directory: {}", e))),
  };

  // Build workspace context once (metadata, config, publish graph)
  let ctx = match core::context::WorkspaceContext::build(&workspace_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e.context("Failed to load workspace")),
  };

  let result = match cli.command {
    Commands::Check {
      only,
      crate_name,
      json,
      strict,
    } => commands::run_check(&ctx, only, crate_name, json, strict),
    Commands::Order { json } => commands::run_order(&ctx, json),
    Commands::Tags { json, pending } => commands::run_tags(&ctx, json, pending),
    Commands::Tag { apply, crate_name } => commands::run_tag(&ctx, apply, crate_name),
    Commands::Notes { crate_name, apply } => commands::run_notes(&ctx, crate_name, apply),
    Commands::Checklist { json } => commands::run_checklist(&ctx, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
