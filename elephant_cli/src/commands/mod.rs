use std::path::PathBuf;

use elephant_backend::{actions::*, notify::{build_transport, notify_participants}, View};
use elephant_entities::prelude::*;
use elephant_reports::{ExportedDeck, TurnOrderDeck};
use tracing::error;

use crate::config::Config;

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a participant to the roster
    Add {
        name: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Import participants from a CSV file
    Import {
        path: PathBuf,
    },
    /// List all participants
    List,
    /// Assign random numbers to all participants
    Assign {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print participants in turn order
    Order,
    /// Remove every participant with the given name
    Delete {
        name: String,
    },
    /// Remove participants without a name
    Prune,
    /// Remove all participants
    Clear,
    /// Email every participant their number
    Notify,
    /// Create a slide deck that shows the turn order
    Deck {
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Compile the deck with pdflatex
        #[arg(long)]
        pdf: bool,
    },
}

/// Turns errors that the user can act on into a printed line. Storage
/// failures stay errors.
fn report<T>(result: Result<T, RosterError>, on_success: impl FnOnce(T) -> Vec<String>) -> anyhow::Result<Vec<String>> {
    match result {
        Ok(value) => Ok(on_success(value)),
        Err(e) if !e.is_fatal() => Ok(vec![e.to_string()]),
        Err(e) => Err(e.into()),
    }
}

impl Command {
    fn into_action(self) -> Option<Action> {
        Some(match self {
            Command::Add { name, email } => Action::AddParticipant { action: AddParticipantAction { name, email } },
            Command::Import { path } => Action::UploadParticipantsList { action: UploadParticipantsListAction { path, parser_config: None } },
            Command::Assign { seed } => Action::AssignNumbers { action: AssignNumbersAction { seed } },
            Command::Delete { name } => Action::DeleteParticipant { action: DeleteParticipantAction { name } },
            Command::Prune => Action::PruneParticipants { action: PruneParticipantsAction {} },
            Command::Clear => Action::ClearRoster { action: ClearRosterAction {} },
            Command::List | Command::Order | Command::Notify | Command::Deck { .. } => return None,
        })
    }

    /// Runs the command and returns the lines to print.
    pub async fn run<S>(self, store: &S, config: &Config) -> anyhow::Result<Vec<String>> where S: RosterStore + ?Sized {
        match self {
            Command::List => report(View::ParticipantsList.load_lines(store).await, |lines| lines),
            Command::Order => report(View::TurnOrder.load_lines(store).await, |lines| lines),
            Command::Notify => {
                let Some(mail) = &config.mail else {
                    return Ok(vec!["Mail is not configured, add a mail section to the configuration".into()]);
                };
                let transport = match build_transport(mail) {
                    Ok(transport) => transport,
                    Err(e) if !e.is_fatal() => return Ok(vec![e.to_string()]),
                    Err(e) => return Err(e.into()),
                };
                report(notify_participants(store, mail, transport.as_ref()).await, |report| {
                    let mut lines = vec![format!("Sent {} messages", report.sent)];
                    lines.extend(report.failures.iter().map(
                        |f| format!("Could not notify {} at {:?}: {}", f.name, f.email, f.reason)
                    ));
                    lines
                })
            },
            Command::Deck { output_dir, pdf } => {
                let ordered = match ordered_roster(store).await {
                    Ok(ordered) => ordered,
                    Err(e) if !e.is_fatal() => return Ok(vec![e.to_string()]),
                    Err(e) => return Err(e.into()),
                };
                let output_dir = output_dir.unwrap_or_else(|| config.deck.output_dir.clone());
                let deck = TurnOrderDeck::new(config.deck.title.clone())?;

                match deck.export(&ordered, &output_dir, pdf || config.deck.compile_pdf) {
                    Ok(ExportedDeck::Pdf(path)) => Ok(vec![format!("Presentation created successfully at {}", path.display())]),
                    Ok(ExportedDeck::Source(path)) => Ok(vec![format!("Presentation source written to {}", path.display())]),
                    Err(e) => {
                        error!("Presentation export failed: {:#}", e);
                        Ok(vec![format!("An error occurred while creating the presentation: {:#}", e)])
                    }
                }
            },
            command => {
                let Some(action) = command.into_action() else {
                    return Ok(vec![]);
                };
                let response = action.run(store).await?;
                Ok(response.message.into_iter().collect())
            }
        }
    }
}
