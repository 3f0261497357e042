//! Line-oriented console driving the user page.
//!
//! Each line is parsed into a [`Command`], applied through the handles the
//! pipeline publishes, and the page is printed once the pipeline settles.
//! Like and dislike commands act on the user in the published context.

mod command;

pub use command::{Command, CommandParseError, HELP};

use std::io::Write;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::domain::{ReactionId, ReactionKind, SelectionContext, UserName, UserPagePipeline};

/// Errors that end a console session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the console until `quit` or end of input.
pub async fn run_console<R, W>(
    pipeline: &mut UserPagePipeline,
    input: R,
    output: &mut W,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_page(pipeline, output)?;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        debug!(?command, "console command");
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Show => {}
            other => {
                if let Err(message) = dispatch(pipeline, other) {
                    writeln!(output, "error: {message}")?;
                    continue;
                }
                pipeline.settle().await;
            }
        }
        print_page(pipeline, output)?;
    }
    output.flush()?;
    Ok(())
}

fn dispatch(pipeline: &UserPagePipeline, command: Command) -> Result<(), String> {
    match command {
        Command::Select(user) => pipeline.user_select().select(user),
        Command::Open(path) => pipeline.open(&path),
        Command::Reload => pipeline.refresh(),
        Command::Like(payload) => {
            let context = context(pipeline)?;
            let user = selected_name(&context)?;
            context.update_functions.add_like(&user, payload);
        }
        Command::Dislike(payload) => {
            let context = context(pipeline)?;
            let user = selected_name(&context)?;
            context.update_functions.add_dislike(&user, payload);
        }
        Command::Unlike(id) => delete(pipeline, ReactionKind::Like, id)?,
        Command::Undislike(id) => delete(pipeline, ReactionKind::Dislike, id)?,
        Command::Show | Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn delete(pipeline: &UserPagePipeline, kind: ReactionKind, id: ReactionId) -> Result<(), String> {
    let context = context(pipeline)?;
    let Some(user) = context.user.as_ref() else {
        return Err("no user selected".to_owned());
    };
    let Some(reaction) = user.find_reaction(kind, id) else {
        return Err(format!("{} has no {kind} #{id}", user.name()));
    };
    match kind {
        ReactionKind::Like => context.update_functions.delete_like(user.name(), reaction),
        ReactionKind::Dislike => context
            .update_functions
            .delete_dislike(user.name(), reaction),
    }
    Ok(())
}

fn context(pipeline: &UserPagePipeline) -> Result<SelectionContext, String> {
    pipeline
        .current_page()
        .map(|page| page.context.clone())
        .ok_or_else(|| "page not rendered yet".to_owned())
}

fn selected_name(context: &SelectionContext) -> Result<UserName, String> {
    context
        .user
        .as_ref()
        .map(|user| user.name().clone())
        .ok_or_else(|| "no user selected".to_owned())
}

fn print_page<W: Write>(pipeline: &UserPagePipeline, output: &mut W) -> Result<(), ConsoleError> {
    if let Some(page) = pipeline.current_page() {
        write!(output, "{}", page.view)?;
        writeln!(output, "[{} {}]", page.status.label(), pipeline.route().path())?;
    }
    Ok(())
}
