use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrlogo::{Generator, GeneratorOption, GeneratorProfile, RecoveryLevel, ResampleFilter, ops};

/// Path argument meaning stdin or stdout.
const STDIO: &str = "-";

#[derive(Parser)]
#[command(name = "qrlogo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a QR code PNG with an optional logo in the middle")]
struct Cli {
    /// Text to encode.
    #[arg(long, default_value = "It will b file, tomorrow.")]
    content: String,

    /// Logo image file, or `-` to read it from stdin.
    #[arg(long)]
    logo: Option<String>,

    /// Output PNG file, or `-` to write to stdout.
    #[arg(short = 'o', long = "output", default_value = "out.png")]
    output: String,

    /// JSON profile applied before the flags below.
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long)]
    size: Option<u32>,

    #[arg(long)]
    logo_occupancy: Option<f64>,

    #[arg(long)]
    logo_margin: Option<u32>,

    #[arg(long, value_enum)]
    level: Option<RecoveryLevel>,

    #[arg(long, value_enum)]
    filter: Option<ResampleFilter>,
}

impl Cli {
    /// Logo path to read, treating `--logo ""` as no logo.
    fn logo_path(&self) -> Option<&str> {
        self.logo.as_deref().filter(|path| !path.is_empty())
    }

    fn options(&self) -> Result<Vec<GeneratorOption>> {
        let mut options = match &self.profile {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read profile {}", path.display()))?;
                GeneratorProfile::from_json(&json)
                    .with_context(|| format!("Failed to parse profile {}", path.display()))?
                    .options()
            }
            None => Vec::new(),
        };

        options.extend(self.size.map(GeneratorOption::Size));
        options.extend(self.logo_occupancy.map(GeneratorOption::LogoOccupancy));
        options.extend(self.logo_margin.map(GeneratorOption::LogoMargin));
        options.extend(self.level.map(GeneratorOption::RecoveryLevel));
        options.extend(self.filter.map(GeneratorOption::ResampleFilter));
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let logo = match cli.logo_path() {
        Some(path) => {
            let bytes = read_input(path)?;
            Some(ops::decode(&bytes).with_context(|| format!("Failed to decode logo {path}"))?)
        }
        None => None,
    };

    let generator = Generator::new(cli.options()?);
    let img = generator
        .generate(&cli.content, logo.as_ref())
        .context("Failed to generate QR code")?;
    let png = ops::encode_png(&img)?;

    write_output(&cli.output, &png)?;
    info!(output = %cli.output, bytes = png.len(), "Wrote QR code");

    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == STDIO {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read logo from stdin")?;
        return Ok(bytes);
    }
    fs::read(path).with_context(|| format!("Failed to read logo {path}"))
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if path == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).context("Failed to write to stdout")?;
        return stdout.flush().context("Failed to flush stdout");
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_logo_flag_means_no_logo() {
        let cli = Cli::parse_from(["qrlogo", "--logo", ""]);
        assert_eq!(cli.logo_path(), None);
    }

    #[test]
    fn missing_logo_flag_means_no_logo() {
        let cli = Cli::parse_from(["qrlogo"]);
        assert_eq!(cli.logo_path(), None);
        assert_eq!(cli.output, "out.png");
    }

    #[test]
    fn logo_path_and_stdin_marker_pass_through() {
        let cli = Cli::parse_from(["qrlogo", "--logo", "brand.png"]);
        assert_eq!(cli.logo_path(), Some("brand.png"));

        let cli = Cli::parse_from(["qrlogo", "--logo", "-"]);
        assert_eq!(cli.logo_path(), Some(STDIO));
    }

    #[test]
    fn flags_follow_profile_options() {
        let cli = Cli::parse_from(["qrlogo", "--size", "420", "--level", "quartile"]);
        let options = cli.options().unwrap();
        assert_eq!(
            options,
            vec![
                GeneratorOption::Size(420),
                GeneratorOption::RecoveryLevel(RecoveryLevel::Quartile),
            ]
        );
    }
}
