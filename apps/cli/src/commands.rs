//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail};
use growthnews_core::{
    CampaignClient, ChatClient, Extractor, ProgressReporter, compose_subject, extract_issue,
    subject_inputs,
};
use growthnews_render::{render_email, render_template};
use growthnews_shared::{
    AppConfig, ContentKind, IssueSources, NewsletterBundle, Slot, config_file_path, init_config,
    load_config,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// GrowthNews: summarize the week's links into a newsletter.
#[derive(Parser)]
#[command(
    name = "growthnews",
    version,
    about = "Summarize articles and tools into the weekly newsletter and ship it as a campaign.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output markup for `render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum RenderFormat {
    Email,
    Template,
    Both,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract and summarize a single page, printing the record as JSON.
    Extract {
        /// Page URL.
        url: String,

        /// Prompt set: article, tool, or companion.
        #[arg(short, long, default_value = "article")]
        kind: ContentKind,
    },

    /// Extract every link of an issue file into an editable bundle.
    Fetch {
        /// Issue TOML listing the sequence id and source URLs.
        issue: PathBuf,

        /// Where to write the bundle JSON (stdout when omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a bundle into newsletter markup.
    Render {
        /// Bundle JSON produced by `fetch`.
        bundle: PathBuf,

        #[arg(short, long, value_enum, default_value = "email")]
        format: RenderFormat,

        /// Output directory.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Generate a subject line for a bundle.
    Subject {
        bundle: PathBuf,
    },

    /// Render the email and create the campaign.
    Send {
        bundle: PathBuf,

        /// Email subject (see `subject`).
        #[arg(short, long)]
        subject: String,
    },

    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "growthnews=info",
        1 => "growthnews=debug",
        _ => "growthnews=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so JSON on stdout stays pipeable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { url, kind } => cmd_extract(&url, kind).await,
        Command::Fetch { issue, out } => cmd_fetch(&issue, out.as_deref()).await,
        Command::Render {
            bundle,
            format,
            out_dir,
        } => cmd_render(&bundle, format, &out_dir),
        Command::Subject { bundle } => cmd_subject(&bundle).await,
        Command::Send { bundle, subject } => cmd_send(&bundle, &subject).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

async fn cmd_extract(url: &str, kind: ContentKind) -> Result<()> {
    let config = load_config()?;
    let extractor = Extractor::from_config(&config)?;

    info!(url, %kind, "extracting");
    let record = extractor.extract(url, kind).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn cmd_fetch(issue: &Path, out: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(issue)
        .wrap_err_with(|| format!("failed to read issue file {}", issue.display()))?;
    let sources: IssueSources = toml::from_str(&raw)
        .wrap_err_with(|| format!("invalid issue file {}", issue.display()))?;

    let config = load_config()?;
    let extractor = Extractor::from_config(&config)?;

    let reporter = CliProgress::new();
    let result = extract_issue(&extractor, &sources, &reporter).await;
    if !reporter.spinner.is_finished() {
        reporter.spinner.finish_and_clear();
    }
    let bundle = result?;

    let json = serde_json::to_string_pretty(&bundle)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("  Bundle written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_render(bundle_path: &Path, format: RenderFormat, out_dir: &Path) -> Result<()> {
    let bundle = read_bundle(bundle_path)?;
    std::fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("failed to create {}", out_dir.display()))?;

    let seq = bundle.sequence_id.as_str();

    if matches!(format, RenderFormat::Email | RenderFormat::Both) {
        let html = render_email(&bundle);
        if html.is_empty() {
            bail!("nothing to render: the bundle has no article and no tool");
        }
        let path = out_dir.join(format!("newsletter-{seq}.html"));
        write_output(&path, &html)?;
    }

    if matches!(format, RenderFormat::Template | RenderFormat::Both) {
        let doc = render_template(&bundle);
        if doc.is_empty() {
            bail!("the template needs all three articles and the tool");
        }
        let path = out_dir.join(format!("newsletter-{seq}.yaml"));
        write_output(&path, &doc)?;
    }

    Ok(())
}

async fn cmd_subject(bundle_path: &Path) -> Result<()> {
    let bundle = read_bundle(bundle_path)?;
    let config = load_config()?;
    let client = ChatClient::from_config(&config.openai)?;

    info!(model = client.model(), sequence_id = %bundle.sequence_id, "composing subject");
    let subject = compose_subject(&client, subject_inputs(&bundle)).await?;
    println!("{subject}");
    Ok(())
}

async fn cmd_send(bundle_path: &Path, subject: &str) -> Result<()> {
    let bundle = read_bundle(bundle_path)?;
    let config = load_config()?;
    let client = CampaignClient::from_config(&config.brevo)?;

    let html = render_email(&bundle);
    if html.is_empty() {
        bail!("nothing to send: the bundle has no article and no tool");
    }

    let id = client
        .create_campaign(&html, &bundle.sequence_id, subject)
        .await?;

    println!();
    println!("  Campaign created!");
    println!("  ID:      {id}");
    println!("  Name:    {} {}", config.brevo.campaign_prefix, bundle.sequence_id);
    println!("  Subject: {subject}");
    println!();
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("# {}", config_file_path()?.display());
    println!("{toml_str}");
    Ok(())
}

fn read_bundle(path: &Path) -> Result<NewsletterBundle> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read bundle {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("invalid bundle {}", path.display()))
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    println!("  Wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_strings(SPINNER_TICKS));
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.spinner.set_message(format!("Extracting {total} links"));
    }

    fn slot_done(&self, slot: Slot, ok: bool, completed: usize, total: usize) {
        let status = if ok { "done" } else { "failed" };
        self.spinner.set_message(format!(
            "Extracting [{completed}/{total}] {} {status}",
            slot.as_str()
        ));
    }

    fn done(&self, bundle: &NewsletterBundle) {
        self.spinner
            .finish_with_message(format!("Issue {} extracted", bundle.sequence_id));
    }
}
