//! saledoc CLI - sale agreement generator

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use saledoc::{
    render, ContractData, ContractGenerator, ContractInput, ContractSink, DirectorySink,
    JsonFormat, OutputFormat, RenderOptions, Template, TemplateBlock,
};

#[derive(Parser)]
#[command(name = "saledoc")]
#[command(author = "Respectabullz")]
#[command(version)]
#[command(about = "Generate dog sale agreements from JSON templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a contract file from a sale record
    Generate {
        /// Sale input JSON (breeder, client, dog, terms, sire, dam)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        common: CommonArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "docx")]
        format: Format,
    },

    /// Print a plain text preview of a contract
    Preview {
        /// Sale input JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Dump the assembled document as JSON
    Json {
        /// Sale input JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show template information and the rule each block hits
    Inspect {
        /// Template JSON (bundled template if not specified)
        #[arg(short, long, value_name = "FILE", env = "SALEDOC_TEMPLATE")]
        template: Option<PathBuf>,
    },

    /// Generate contracts for an array of sale records
    Batch {
        /// JSON array of sale inputs
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "contracts")]
        output: PathBuf,

        /// Template JSON (bundled template if not specified)
        #[arg(short, long, value_name = "FILE", env = "SALEDOC_TEMPLATE")]
        template: Option<PathBuf>,

        /// Date used in filenames (YYYY-MM-DD, default today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Template JSON (bundled template if not specified)
    #[arg(short, long, value_name = "FILE", env = "SALEDOC_TEMPLATE")]
    template: Option<PathBuf>,

    /// Treat the input as a flat contract record instead of sale records
    #[arg(long)]
    record: bool,

    /// Date used in filenames (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Word document
    Docx,
    /// Assembled document JSON
    Json,
    /// Plain text
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Docx => OutputFormat::Docx,
            Format::Json => OutputFormat::Json,
            Format::Text => OutputFormat::Text,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            output,
            common,
            format,
        }) => cmd_generate(&input, &output, &common, format.into()),
        Some(Commands::Preview {
            input,
            output,
            common,
        }) => cmd_preview(&input, output.as_deref(), &common),
        Some(Commands::Json {
            input,
            output,
            compact,
            common,
        }) => cmd_json(&input, output.as_deref(), compact, &common),
        Some(Commands::Inspect { template }) => cmd_inspect(template.as_deref()),
        Some(Commands::Batch {
            input,
            output,
            template,
            date,
        }) => cmd_batch(&input, &output, template.as_deref(), date.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: saledoc generate <FILE> [-o DIR]".yellow());
            println!("       saledoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Run `f` with the template from `path`, or the bundled one.
fn with_template<T>(
    path: Option<&Path>,
    f: impl FnOnce(&Template) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let template = Template::from_path(path)?;
            log::debug!("Loaded template {}", path.display());
            f(&template)
        }
        None => f(Template::bundled()?),
    }
}

fn load_record(input: &Path, flat: bool) -> Result<ContractData, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    if flat {
        let data: ContractData = serde_json::from_str(&json)
            .map_err(|e| saledoc::Error::InvalidInput(e.to_string()))?;
        Ok(data)
    } else {
        Ok(ContractInput::from_json(&json)?.to_contract_data())
    }
}

fn filename_date(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(text) => saledoc::format::parse_date(text)
            .ok_or_else(|| format!("Invalid date: {}", text).into()),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_generate(input: &Path, output: &Path, common: &CommonArgs, format: OutputFormat) -> CliResult {
    let data = load_record(input, common.record)?;
    let date = filename_date(common.date.as_deref())?;

    let path = with_template(common.template.as_deref(), |template| {
        let contract = ContractGenerator::with_template(template)
            .with_format(format)
            .generate(&data, date)?;
        Ok(DirectorySink::new(output).save(&contract)?)
    })?;

    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_preview(input: &Path, output: Option<&Path>, common: &CommonArgs) -> CliResult {
    let data = load_record(input, common.record)?;
    let text = with_template(common.template.as_deref(), |template| {
        let doc = ContractGenerator::with_template(template).assemble(&data)?;
        Ok(render::to_text(&doc))
    })?;
    write_or_print(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, common: &CommonArgs) -> CliResult {
    let data = load_record(input, common.record)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = with_template(common.template.as_deref(), |template| {
        let doc = ContractGenerator::with_template(template).assemble(&data)?;
        Ok(render::to_json(&doc, format)?)
    })?;
    write_or_print(output, &json)
}

fn cmd_inspect(path: Option<&Path>) -> CliResult {
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());

    with_template(path, |template| {
        let generator = ContractGenerator::with_template(template);
        let layout = template.layout();

        println!("{}", "Template Information".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Source".bold(), source);
        println!("{}: {}", "Version".bold(), template.version().unwrap_or("-"));
        println!(
            "{}: {} x {} twips ({:?})",
            "Page".bold(),
            layout.geometry.width,
            layout.geometry.height,
            layout.geometry.orientation
        );
        let margins = &layout.geometry.margins;
        println!(
            "{}: {} / {} / {} / {}",
            "Margins".bold(),
            margins.top,
            margins.right,
            margins.bottom,
            margins.left
        );
        println!(
            "{}: {} {}pt, line {}",
            "Font".bold(),
            layout.default_font,
            layout.default_font_size / 2,
            layout.line_spacing
        );
        println!(
            "{}: {}",
            "Styles".bold(),
            template.styles().keys().cloned().collect::<Vec<_>>().join(", ")
        );

        println!();
        println!("{}", "Blocks".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());

        for (i, block) in template.blocks().iter().enumerate() {
            match block {
                TemplateBlock::Paragraph { style, text } => {
                    let trimmed = text.trim_start();
                    let rule = generator
                        .resolver()
                        .matching_rule(trimmed)
                        .map(|r| r.name.green().to_string())
                        .unwrap_or_else(|| "tokens".dimmed().to_string());
                    println!("{:>3} {:<10} {:<22} {}", i, style, rule, snippet(trimmed));
                }
                TemplateBlock::Table { style, rows } => {
                    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
                    println!(
                        "{:>3} {:<10} {:<22} {} rows x {} columns",
                        i,
                        style,
                        "table".blue().to_string(),
                        rows.len(),
                        columns
                    );
                }
            }
        }
        Ok(())
    })
}

fn snippet(text: &str) -> String {
    const MAX: usize = 48;
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > MAX {
        format!("{}...", first_line.chars().take(MAX).collect::<String>())
    } else {
        first_line.to_string()
    }
}

fn cmd_batch(input: &Path, output: &Path, template: Option<&Path>, date: Option<&str>) -> CliResult {
    let inputs = ContractInput::list_from_json(&fs::read_to_string(input)?)?;
    let date = filename_date(date)?;
    let sink = DirectorySink::new(output);

    let (saved, failed) = with_template(template, |template| {
        let generator = ContractGenerator::with_template(template)
            .with_options(RenderOptions::new().with_format(OutputFormat::Docx));

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Generating {} contracts...", inputs.len()));
        let results = generator.generate_batch(&inputs, date);
        spinner.finish_and_clear();

        let pb = ProgressBar::new(results.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        let mut saved = 0usize;
        let mut failed = 0usize;
        for (i, result) in results.into_iter().enumerate() {
            match result.and_then(|contract| {
                pb.set_message(contract.filename.clone());
                sink.save(&contract)
            }) {
                Ok(_) => saved += 1,
                Err(e) => {
                    failed += 1;
                    pb.println(format!("{} record {}: {}", "Failed".red(), i, e));
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("Done!");
        Ok((saved, failed))
    })?;

    println!(
        "\n{} {} saved to {}",
        "Done!".green().bold(),
        saved,
        output.display()
    );
    if failed > 0 {
        return Err(format!("{} of {} contracts failed", failed, saved + failed).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "saledoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Sale agreement generator");
    println!();
    println!("License: MIT");
}
