//! Subcommands and how each one drives a session.

use crate::shell;
use crate::terminal::{Panel, TerminalNotifier, TerminalView};
use clap::Subcommand;
use pex_core::{Code, ExpertApi, ExpertSession};
use std::io::Write;

#[derive(Subcommand)]
pub enum Commands {
    /// List the symptom catalog
    Symptoms {
        /// Only show symptoms whose code or description contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Search symptoms on the server
    Lookup {
        /// Keyword to search for
        keyword: String,
    },
    /// List the diseases available for backward lookup
    Diseases,
    /// Diagnose a set of symptom codes
    Diagnose {
        /// Symptom codes, e.g. G01 G04
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Show the symptoms and control methods of a disease
    Backward {
        /// Disease code
        code: String,
    },
    /// Interactive session
    Shell,
}

impl Commands {
    /// A terminal view showing only the panels this command prints.
    pub fn view<W: Write>(&self, out: W) -> TerminalView<W> {
        match self {
            Commands::Symptoms { .. } => TerminalView::new(out, [Panel::Grid]),
            Commands::Lookup { .. } => TerminalView::new(out, []),
            Commands::Diseases => TerminalView::new(out, [Panel::Options]),
            Commands::Diagnose { .. } => {
                TerminalView::new(out, [Panel::Summary, Panel::Diagnosis])
            }
            Commands::Backward { .. } => TerminalView::new(out, [Panel::Backward]),
            Commands::Shell => TerminalView::new(out, Panel::ALL).with_progress(),
        }
    }

    /// Run the command. `Ok(false)` means the operation failed and was reported.
    pub async fn run<A, W>(
        self,
        session: &mut ExpertSession<A, TerminalView<W>, TerminalNotifier>,
    ) -> anyhow::Result<bool>
    where
        A: ExpertApi,
        W: Write,
    {
        let succeeded = match self {
            Commands::Symptoms { filter } => {
                let loaded = session.load_symptoms().await.is_ok();
                if let Some(filter) = filter {
                    session.filter_symptoms(&filter);
                }
                loaded
            }
            Commands::Lookup { keyword } => match session.lookup_symptoms(&keyword).await {
                Ok(found) => {
                    for symptom in found {
                        println!("{:<5} {}", symptom.code, symptom.description);
                    }
                    true
                }
                Err(_) => false,
            },
            Commands::Diseases => session.load_diseases().await.is_ok(),
            Commands::Diagnose { codes } => {
                let codes = codes
                    .iter()
                    .map(Code::new)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| anyhow::anyhow!("invalid symptom code: {e}"))?;
                // Catalog failures are reported; matched symptoms then show raw codes.
                let _ = session.init().await;
                for code in codes {
                    if !session.selection().contains(code.as_str()) {
                        session.toggle_symptom(code);
                    }
                }
                session.diagnose().await.is_ok()
            }
            Commands::Backward { code } => {
                // Options are not printed; the load refreshes the catalog the lookup runs against.
                let _ = session.load_diseases().await;
                matches!(session.select_disease(&code).await, Ok(Some(_)))
            }
            Commands::Shell => {
                shell::run(session).await?;
                true
            }
        };
        session.view_mut().flush();
        Ok(succeeded)
    }
}
