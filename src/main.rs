//! dpr-translate - command line front end for the translation layer

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use dpr_translate::{
    find_by_code, Config, FileStore, LanguageSelector, MemoryStore, PreferenceStore, SelectorVariant,
    TranslatedText, TranslationContext, Translator,
};

const LOG_ENV: &str = "DPR_TRANSLATE_LOG";

#[derive(Parser)]
#[command(name = "dpr-translate", version, about = "Translate DPR dashboard text into Indian languages")]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported languages
    Languages,
    /// Show the saved language
    Current,
    /// Save the display language
    Use { code: String },
    /// Translate texts from English
    Translate {
        /// Target language code (defaults to the saved language)
        #[arg(long)]
        to: Option<String>,
        /// Source language code
        #[arg(long, default_value = "en")]
        from: String,
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Look up a pre-translated UI label
    Label {
        key: String,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Resolve a few sample strings in the saved language
    Demo,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn language(code: &str) -> Result<dpr_translate::Language> {
    find_by_code(code).ok_or_else(|| anyhow::anyhow!("Unknown language code: {}", code))
}

fn preference_store() -> Arc<dyn PreferenceStore> {
    match Config::preferences_path() {
        Ok(path) => Arc::new(FileStore::open(path)),
        Err(e) => {
            tracing::warn!("Preferences will not be saved: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default();
    let translator = Arc::new(Translator::from_config(&config)?);
    let ctx = Arc::new(TranslationContext::new(translator, preference_store()));

    match cli.command {
        Command::Languages => {
            let picker = LanguageSelector::new(Arc::clone(&ctx), SelectorVariant::Full);
            for option in picker.options() {
                let marker = if option.selected { "*" } else { " " };
                println!(
                    "{} {}  {} {}  ({})",
                    marker,
                    option.language.code,
                    option.language.flag,
                    option.label,
                    option.detail.unwrap_or_default()
                );
            }
        }
        Command::Current => {
            let current = ctx.current_language();
            println!("{} {} ({})", current.flag, current.native_name, current.code);
        }
        Command::Use { code } => {
            let mut picker = LanguageSelector::new(Arc::clone(&ctx), SelectorVariant::Compact);
            let chosen = picker.select_code(&code)?;
            println!("Language set to {}", chosen);
        }
        Command::Translate { to, from, texts } => {
            let target = match to {
                Some(code) => language(&code)?,
                None => ctx.current_language(),
            };
            let source = language(&from)?;
            if !ctx.translator().has_credential() {
                eprintln!("No API key configured (set {}); printing text unchanged", dpr_translate::config::API_KEY_ENV);
            }
            for line in ctx.translator().translate_batch(texts.as_slice(), &target, &source).await {
                println!("{}", line);
            }
        }
        Command::Label { key, lang } => {
            let code = match lang {
                Some(code) => language(&code)?.code,
                None => ctx.current_language().code,
            };
            println!("{}", dpr_translate::i18n::get_label(&key, code));
        }
        Command::Demo => {
            let current = ctx.current_language();
            println!("Current language: {} {} ({})", current.flag, current.native_name, current.code);
            let samples = ["Hello World", "Welcome to our application", "Upload a DPR"];
            for (i, sample) in samples.iter().enumerate() {
                let binding = TranslatedText::new(Arc::clone(&ctx), *sample);
                binding.refresh().await;
                println!("Test {}: {}", i + 1, binding.display_text());
            }
            println!("{}: {}", ctx.translate_label("status"), ctx.translate_label("loading"));
        }
    }

    Ok(())
}
