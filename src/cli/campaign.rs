//! Campaign commands: generate, show.

use std::fs;
use std::path::{Path, PathBuf};

use crate::campaign::RandomPicker;
use crate::config::{self, Config};
use crate::generate::{GeminiCli, Offline, TextGenerator};
use crate::hub::DealHub;
use crate::model::{CampaignOutput, Persona};
use crate::storage::DealBackend;

use super::format::{format_campaign, format_tagline_source};

pub(super) struct GenerateArgs {
    pub asins: Vec<String>,
    pub persona: Option<Persona>,
    pub out: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub offline: bool,
}

pub(super) fn cmd_generate<B: DealBackend>(
    hub: &DealHub<B>,
    config: &Config,
    args: &GenerateArgs,
) -> Result<(), String> {
    let persona = config::resolve_persona(args.persona, config)?;
    let generator: Box<dyn TextGenerator> = if args.offline {
        Box::new(Offline)
    } else {
        Box::new(GeminiCli::new(config.gemini_command(), config.gemini_model()))
    };

    let campaign = hub
        .generate_campaign(
            &args.asins,
            persona,
            generator.as_ref(),
            &mut RandomPicker::thread(),
        )
        .map_err(|e| e.to_string())?;

    if let Some(path) = &args.csv {
        fs::write(path, &campaign.csv_content)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        eprintln!("CSV written to {}", path.display());
    }

    match &args.out {
        Some(path) => {
            write_json(&campaign, path)?;
            eprintln!("Campaign written to {}", path.display());
        }
        None => println!("{}", campaign.video_script),
    }

    eprintln!(
        "{} campaign {} with {} product(s); taglines: {}",
        persona.display_name(),
        &campaign.id.to_string()[..8],
        campaign.products.len(),
        format_tagline_source(campaign.tagline_source),
    );
    Ok(())
}

pub(super) fn cmd_show<B: DealBackend>(hub: &DealHub<B>, json: bool) -> Result<(), String> {
    let Some(campaign) = hub.last_campaign() else {
        println!("No campaigns");
        return Ok(());
    };

    if json {
        let text = serde_json::to_string_pretty(&campaign)
            .map_err(|e| format!("failed to serialize campaign: {e}"))?;
        println!("{text}");
    } else {
        print!("{}", format_campaign(&campaign));
    }
    Ok(())
}

fn write_json(campaign: &CampaignOutput, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(campaign)
        .map_err(|e| format!("failed to serialize campaign: {e}"))?;
    fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
