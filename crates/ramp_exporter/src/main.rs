use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use color_ramp::{
    Appearance, Delivery, DeliveryOutcome, ExportFormat, FileDelivery, RampSpecContent,
    RampSpecRegistry, RegistryVariant, WriterDelivery, deliver_with_fallback, export,
    generate_variant_palette,
};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AppearanceArg {
    Light,
    Dark,
}

impl From<AppearanceArg> for Appearance {
    fn from(value: AppearanceArg) -> Self {
        match value {
            AppearanceArg::Light => Self::Light,
            AppearanceArg::Dark => Self::Dark,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ramp_exporter",
    about = "Generates HSLuv color ramps and exports them as JSON, CSV, design tokens, or Figma styles."
)]
struct Args {
    /// Appearance of the chromatic palette.
    #[arg(long, value_enum, default_value_t = AppearanceArg::Dark)]
    appearance: AppearanceArg,
    /// Export the neutral ramps instead of the chromatic ones.
    #[arg(long)]
    neutral: bool,
    /// Document format: json, csv, tokens, or figma.
    #[arg(short, long, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
    /// JSON file overriding the built-in color definitions and step schedules.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory to write the document into. Without it, or if writing fails,
    /// the document is printed to stdout.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Print the JSON schema of the configuration file and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn variant(&self) -> RegistryVariant {
        if self.neutral {
            RegistryVariant::Neutral
        } else {
            Appearance::from(self.appearance).into()
        }
    }
}

fn load_registry(config: Option<&Path>) -> Result<RampSpecRegistry> {
    let Some(path) = config else {
        return Ok(RampSpecRegistry::builtin().clone());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let content: RampSpecContent = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    let registry = RampSpecRegistry::try_from(content)
        .with_context(|| format!("invalid config {}", path.display()))?;

    log::info!("loaded color definitions from {}", path.display());
    Ok(registry)
}

fn main() -> Result<()> {
    let args = Args::parse();

    TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("could not initialize logger")?;

    if args.print_schema {
        let schema = schemars::schema_for!(RampSpecContent);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let registry = load_registry(args.config.as_deref())?;

    if args.print_config {
        let content = RampSpecContent::from(&registry);
        println!("{}", serde_json::to_string_pretty(&content)?);
        return Ok(());
    }

    let variant = args.variant();
    log::info!("generating {variant} palette");
    let palette = generate_variant_palette(&registry, variant);

    let document = export(&palette, args.format)
        .with_context(|| format!("failed to export {variant} palette as {}", args.format))?;

    let stdout = WriterDelivery::new(io::stdout());
    match &args.output {
        Some(directory) => {
            let files = FileDelivery::new(directory);
            if let DeliveryOutcome::Fallback { .. } =
                deliver_with_fallback(&document, &files, &stdout)?
            {
                log::warn!(
                    "could not write {} into {}, printed it instead",
                    document.suggested_filename(),
                    directory.display()
                );
            }
        }
        None => stdout.deliver(
            document.payload(),
            document.suggested_filename(),
            document.mime_type(),
        )?,
    }

    Ok(())
}
