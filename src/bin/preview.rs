//! Preview binary - renders an invitation from a seed file to stdout
//!
//! Usage:
//!   cargo run --bin preview -- data/seed.json
//!   cargo run --bin preview -- data/seed.json --lang es --invite EVA123
//!   cargo run --bin preview -- data/seed.json --wedding w2 > preview.html
//!
//! The translation provider is read from the environment like the server
//! (TRANSLATION_PROVIDER, OPENAI_API_KEY, ...); with none configured the
//! couple's copy is rendered as written.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::info;
use wedding_invite::{
    config::Config,
    i18n::Language,
    invitation,
    memory::MemoryBackend,
    preferences::{PreferenceChange, Preferences},
    services::{GuestService, WeddingService},
    storage::MemoryStore,
    translation::TranslationClient,
    views::{render_template, Chrome, InvitationTemplate, Page},
};

struct PreviewArgs {
    seed_file: String,
    wedding_id: Option<String>,
    invite: Option<String>,
    language: Language,
}

impl PreviewArgs {
    fn parse() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let mut seed_file = None;
        let mut wedding_id = None;
        let mut invite = None;
        let mut language = Language::canonical();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--wedding" => wedding_id = Some(args.next().context("--wedding needs an id")?),
                "--invite" => invite = Some(args.next().context("--invite needs a code")?),
                "--lang" => {
                    let code = args.next().context("--lang needs a language code")?;
                    language = Language::from_code(&code)?;
                }
                other if other.starts_with("--") => bail!("Unknown option: {}", other),
                path => seed_file = Some(path.to_string()),
            }
        }

        Ok(Self {
            seed_file: seed_file.context(
                "Usage: preview <seed.json> [--wedding ID] [--invite CODE] [--lang en|es]",
            )?,
            wedding_id,
            invite,
            language,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays clean HTML
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wedding_invite=info".parse()?),
        )
        .init();

    let args = PreviewArgs::parse()?;
    let config = Config::from_env()?;
    let backend = MemoryBackend::from_seed_file(&args.seed_file)?;

    let wedding_id = match &args.wedding_id {
        Some(id) => id.clone(),
        None => backend
            .wedding_ids()
            .into_iter()
            .next()
            .context("Seed file has no weddings")?,
    };
    let wedding = backend
        .wedding_by_id(&wedding_id)
        .await?
        .context("Wedding not found in seed file")?;

    let guest = match &args.invite {
        Some(code) => Some(
            backend
                .guest_by_invite_code(code)
                .await?
                .filter(|g| g.wedding_id == wedding.id)
                .context("Invite code not found for this wedding")?,
        ),
        None => None,
    };

    let remote = wedding_invite::remote_translator(
        &config.translation_provider,
        wedding_invite::http_client()?,
    );
    let translations = TranslationClient::new(remote, Arc::new(MemoryStore::new()))
        .with_default_ttl(config.translation_cache_ttl);

    info!(
        "Rendering {} in {}",
        wedding.id,
        args.language.native_name()
    );

    let mut localized = wedding.clone();
    localized.settings =
        invitation::localize_settings(&translations, &wedding.settings, args.language).await;
    let view = invitation::compose(&localized, guest.as_ref(), args.language, Utc::now());

    let mut preferences = Preferences::default();
    preferences.apply(PreferenceChange::Language(args.language));
    let invite = guest.as_ref().map(|g| g.invite_code.as_str());
    let chrome = Chrome::new(&preferences, view.title.clone(), format!("/w/{}", wedding.id))
        .with_colors(&view.primary_color, &view.accent_color)
        .with_wedding_nav(&wedding.id, invite, Page::Invitation, args.language.strings());

    let html = render_template(InvitationTemplate { chrome, view })?;
    println!("{}", html.0);

    let report = translations.metrics().report();
    info!(
        "Translations: {} cache hits, {} remote calls, {} failures",
        report.cache_hits, report.api_calls, report.api_failures
    );
    Ok(())
}
