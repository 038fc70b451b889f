use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::FlowKind;
use storage::{DraftSlot, DraftStore, FileSlot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wizard_core::{rules::InputKind, FlowDefinition, LoggingSubmitter, View, WizardSession};

mod config;
mod line;
mod view;

use config::load_settings;
use line::{parse_line, Line, HELP};
use view::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "intake", about = "Multi-step payment intake forms")]
struct Cli {
    /// Directory holding saved drafts. Overrides the settings file.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = "education")]
    flow: FlowKind,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the form interactively, one command per line.
    Session {
        /// Echo fields that pass validation too.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the saved draft as JSON.
    Show,
    /// Discard the saved draft.
    Clear,
    /// List the steps and fields of the flow.
    Describe,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, warnings) = load_settings();
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();
    for warning in &warnings {
        warn!("{warning}");
    }

    let flow = FlowDefinition::for_kind(cli.flow);

    match cli.command {
        Command::Session { verbose } => {
            let drafts = open_drafts(&settings.data_dir)?;
            info!(flow = %cli.flow, data_dir = %settings.data_dir.display(), "session started");
            let stdin = io::stdin();
            run_session(flow, drafts, stdin.lock(), io::stdout(), verbose, settings.today())?;
        }
        Command::Show => {
            let drafts = open_drafts(&settings.data_dir)?;
            match drafts.try_load(cli.flow)? {
                Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                None => println!("no saved draft for {}", cli.flow),
            }
        }
        Command::Clear => {
            let drafts = open_drafts(&settings.data_dir)?;
            drafts
                .slot()
                .remove(cli.flow.draft_key())
                .with_context(|| format!("failed to clear draft for {}", cli.flow))?;
            println!("cleared draft for {}", cli.flow);
        }
        Command::Describe => {
            let mut out = io::stdout().lock();
            describe(&flow, &mut out)?;
        }
    }

    Ok(())
}

fn open_drafts(data_dir: &std::path::Path) -> Result<DraftStore<FileSlot>> {
    let slot = FileSlot::open(data_dir)?;
    slot.health_check()?;
    Ok(DraftStore::new(slot))
}

/// Drives a session from line input until `quit` or end of input.
fn run_session<S, R, W>(
    flow: FlowDefinition,
    drafts: DraftStore<S>,
    input: R,
    out: W,
    verbose: bool,
    today: chrono::NaiveDate,
) -> Result<W>
where
    S: DraftSlot,
    R: BufRead,
    W: Write,
{
    let view = TerminalView::new(out, &flow).verbose(verbose);
    let mut session = WizardSession::start(flow, drafts, view, LoggingSubmitter, today);

    for raw in input.lines() {
        let raw = raw.context("failed to read command")?;
        match parse_line(&raw) {
            Ok(Line::Dispatch(command)) => session.dispatch(command),
            Ok(Line::Summary) => {
                let groups = session.controller().summary();
                session.view_mut().summary_data(&groups);
            }
            Ok(Line::Status) => {
                let controller = session.controller();
                let status = format!(
                    "{}: step {} of {}, {} answer(s)",
                    controller.flow().title,
                    controller.current_step(),
                    controller.state().total_steps,
                    controller.answers().len()
                );
                session.view_mut().say(&status);
            }
            Ok(Line::Help) => session.view_mut().say(HELP),
            Ok(Line::Quit) => break,
            Ok(Line::Blank) => {}
            Err(err) => session.view_mut().say(&format!("? {err}")),
        }
    }

    let (_, view) = session.into_parts();
    Ok(view.into_inner())
}

fn describe(flow: &FlowDefinition, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} ({} steps)", flow.title, flow.total_steps())?;
    for (number, step) in flow.steps.iter().enumerate() {
        writeln!(out, "{}. {}", number + 1, step.title)?;
        for field in step.fields.iter().chain(&step.choices) {
            let marker = if field.rule.required { "*" } else { " " };
            writeln!(
                out,
                "   {marker} {:<28} {} [{}]",
                field.name,
                field.label,
                input_name(field.input)
            )?;
        }
        for kind in &step.blocks {
            let Some(template) = flow.template(*kind) else {
                continue;
            };
            let cap = template
                .max_blocks
                .map_or_else(|| "unbounded".to_string(), |max| format!("max {max}"));
            writeln!(out, "   {} ({cap})", template.title)?;
            for field in &template.fields {
                writeln!(
                    out,
                    "     {:<26} {} [{}]",
                    format!("{}_<n>", field.stem),
                    field.label,
                    input_name(field.input)
                )?;
            }
        }
    }
    if let Some(policy) = flow.file_policy() {
        let count = policy
            .max_files
            .map_or_else(|| "any number of".to_string(), |max| format!("up to {max}"));
        writeln!(
            out,
            "   uploads: {count} file(s) per slot, {} KiB each, {}",
            policy.max_file_bytes / 1024,
            policy.allowed_types.join(", ")
        )?;
    }
    writeln!(out, "{}. {}", flow.total_steps(), flow.step_title(flow.total_steps()))
}

fn input_name(input: InputKind) -> String {
    match input {
        InputKind::Text => "text".into(),
        InputKind::Email => "email".into(),
        InputKind::Phone => "phone".into(),
        InputKind::Number => "number".into(),
        InputKind::Date => "date".into(),
        InputKind::Url => "url".into(),
        InputKind::TextArea => "textarea".into(),
        InputKind::Select(options) => format!("select: {}", options.join("|")),
        InputKind::Radio(options) => format!("radio: {}", options.join("|")),
        InputKind::Files => "files".into(),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
