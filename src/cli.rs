//! CLI interface for Dealhub.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//! Deals come in from the browser extension as JSON lines (`ingest`) or by
//! hand (`capture`); campaigns are generated from a selection of identifiers.

mod campaign;
mod deals;
mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::campaign::CampaignOptions;
use crate::config::Config;
use crate::hub::DealHub;
use crate::model::{Persona, RawCapture};
use crate::storage::Storage;

/// Dealhub: collect product deals and turn them into video campaigns.
#[derive(Debug, Parser)]
#[command(name = "dealhub", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: from captures to a campaign
  1. dealhub ingest captures.jsonl
  2. dealhub list --ready
  3. dealhub generate --persona leisure-king --csv deals.csv B0ABC12345 B0DEF67890
  4. dealhub show

Captures are JSON objects, one per line:
  {"asin": "B0ABC12345", "title": "Widget", "price": "19.99", "code": "SAVE10"}"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge one capture into the store.
    Capture {
        /// Product identifier (ASIN).
        #[arg(long)]
        asin: String,

        #[arg(long)]
        title: Option<String>,

        /// Regular price, e.g. `19.99`.
        #[arg(long)]
        price: Option<String>,

        /// Promo code.
        #[arg(long)]
        code: Option<String>,

        /// Discount percentage, e.g. `25`.
        #[arg(long)]
        discount: Option<String>,
    },

    /// Merge captures from a JSON-lines file, or stdin when no file is given.
    ///
    /// Lines that fail to parse or validate are reported and skipped.
    Ingest {
        file: Option<PathBuf>,
    },

    /// List deals, newest first.
    List {
        /// Only show deals ready for a campaign.
        #[arg(long)]
        ready: bool,
    },

    /// Remove every deal.
    Clear,

    /// Generate a campaign from the given deals.
    ///
    /// Prints the video script, or writes the whole campaign as JSON to
    /// `--out`.
    Generate {
        /// Deal identifiers, in campaign order.
        #[arg(required = true)]
        asins: Vec<String>,

        /// Persona; falls back to `DEALHUB_PERSONA`, then the config file.
        #[arg(long, value_enum)]
        persona: Option<PersonaArg>,

        /// Write the campaign JSON to this file instead of printing the script.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the CSV export to this file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Skip the text generator and use the built-in lines.
        #[arg(long)]
        offline: bool,
    },

    /// Show the last generated campaign.
    Show {
        /// Print the campaign as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// CLI-facing persona, mapped to the domain `Persona`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PersonaArg {
    /// Upbeat savings math.
    GirlMath,
    /// Cynical, with long-form content and a scene prompt.
    LeisureKing,
}

impl PersonaArg {
    fn to_domain(self) -> Persona {
        match self {
            Self::GirlMath => Persona::GirlMath,
            Self::LeisureKing => Persona::LeisureKing,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();
    let mut hub = DealHub::open(storage).with_options(CampaignOptions {
        site_url: config.site_url().to_string(),
    });

    match cli.command {
        Command::Capture {
            asin,
            title,
            price,
            code,
            discount,
        } => deals::cmd_capture(
            &mut hub,
            RawCapture {
                asin: Some(asin),
                title,
                price,
                code,
                discount,
                image_url: None,
            },
        ),
        Command::Ingest { file } => deals::cmd_ingest(&mut hub, file.as_deref()),
        Command::List { ready } => {
            deals::cmd_list(&hub, ready);
            Ok(())
        }
        Command::Clear => {
            deals::cmd_clear(&mut hub);
            Ok(())
        }
        Command::Generate {
            asins,
            persona,
            out,
            csv,
            offline,
        } => campaign::cmd_generate(
            &hub,
            config,
            &campaign::GenerateArgs {
                asins,
                persona: persona.map(PersonaArg::to_domain),
                out,
                csv,
                offline,
            },
        ),
        Command::Show { json } => campaign::cmd_show(&hub, json),
    }
}
