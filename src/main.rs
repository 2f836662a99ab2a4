use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use park_inventory_analyzer::{
    analysis::parse_count,
    config::DEFAULT_CONFIG_FILE,
    io,
    report::{
        generate_district_parks_report, generate_district_report, generate_ranking_report,
        generate_type_report, unique_slugs, ReportWriter,
    },
    Analyzer, ColorScheme, Config, Dataset, DatasetWriter,
};

#[derive(Parser)]
#[command(
    name = "park-analyzer",
    about = "Park Inventory Analyzer - district summaries, area rankings and park-type breakdowns",
    version,
    author
)]
struct Cli {
    /// Configuration file (defaults to ./park-analyzer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored terminal output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every report.
#[derive(Args)]
struct ReportArgs {
    /// Path to input file (CSV, JSON, or Excel)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for report files (overrides the configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print computed aggregates as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Park name column (labels records in error messages)
    #[arg(long)]
    name_column: Option<String>,

    /// District column
    #[arg(long)]
    district_column: Option<String>,

    /// Park type column
    #[arg(long)]
    type_column: Option<String>,

    /// Area column
    #[arg(long)]
    area_column: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupBy {
    District,
    Type,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-district park count and area statistics with charts and highlights
    Districts {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// The N largest parks by area
    Top {
        #[command(flatten)]
        report: ReportArgs,

        /// Number of parks to list
        #[arg(short = 'n', long = "count", default_value = "10", value_parser = parse_count)]
        n: usize,
    },

    /// The N smallest parks by area
    Bottom {
        #[command(flatten)]
        report: ReportArgs,

        /// Number of parks to list
        #[arg(short = 'n', long = "count", default_value = "10", value_parser = parse_count)]
        n: usize,
    },

    /// Park counts and mean area per park type, with the district x type heatmap
    Types {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Area of every park, one chart per district
    Parks {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Write a group summary to an Excel workbook
    Export {
        #[command(flatten)]
        report: ReportArgs,

        /// Output .xlsx path (defaults to <output-dir>/park_summary.xlsx)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Column to group by
        #[arg(long, value_enum, default_value = "district")]
        by: GroupBy,
    },

    /// Convert a park dataset between CSV, JSON and Excel
    Convert {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (.csv, .json or .xlsx)
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Write a configuration file with the default settings
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Everything a report command needs once the input is loaded.
struct Session {
    config: Config,
    dataset: Dataset,
    scheme: ColorScheme,
    writer: ReportWriter,
    json: bool,
}

impl Session {
    fn open(cli: &Cli, args: &ReportArgs) -> Result<Self> {
        let mut config = load_config(cli.config.as_deref())?;
        if let Some(dir) = &args.output_dir {
            config.report.output_directory = dir.clone();
        }
        if cli.no_color {
            config.report.color_scheme.enabled = false;
        }
        let columns = &mut config.columns;
        for (slot, flag) in [
            (&mut columns.name, &args.name_column),
            (&mut columns.district, &args.district_column),
            (&mut columns.park_type, &args.type_column),
            (&mut columns.area, &args.area_column),
        ] {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
        config.validate()?;

        let mut dataset = io::load_dataset(&args.input)
            .with_context(|| format!("failed to load {}", args.input.display()))?;
        if dataset.has_column(&config.columns.name) {
            dataset = dataset.with_label_column(config.columns.name.clone())?;
        }
        tracing::info!(
            records = dataset.len(),
            "analyzing '{}'",
            dataset.name
        );

        let scheme = config.report.color_scheme.clone();
        let writer = ReportWriter::new(config.report.clone(), dataset.name.clone());
        Ok(Self {
            config,
            dataset,
            scheme,
            writer,
            json: args.json,
        })
    }

    fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.dataset, self.config.columns.clone())
    }

    /// Print a report and save it; `render` is called once per color scheme.
    fn emit<T, F>(&self, section: &str, report: &str, value: &T, render: F) -> Result<()>
    where
        T: Serialize,
        F: Fn(&ColorScheme) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
            let path = self.writer.write_json(section, report, value)?;
            saved(&path);
        } else {
            print!("{}", render(&self.scheme));
            let path = self.writer.write(section, report, &render(&ColorScheme::plain()))?;
            saved(&path);
        }
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_from_dir(Path::new("."))?.unwrap_or_default(),
    };
    Ok(config)
}

fn saved(path: &Path) {
    eprintln!("{} {}", "Saved:".green().bold(), path.display());
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Districts { report } => {
            let session = Session::open(&cli, report)?;
            let overview = session.analyzer().district_overview()?;
            let title = session.writer.title("District summary");
            session.emit("overall", "park_summary", &overview, |scheme| {
                generate_district_report(&title, &overview, scheme)
            })?;
        }

        Commands::Top { report, n } => {
            let session = Session::open(&cli, report)?;
            let ranked = session.analyzer().largest(*n)?;
            let title = session.writer.title(&format!("Top {n} largest parks"));
            let columns = &session.config.columns;
            session.emit("rankingTop", &format!("top_{n}_parks"), &ranked, |scheme| {
                generate_ranking_report(&title, &ranked, columns, scheme)
            })?;
        }

        Commands::Bottom { report, n } => {
            let session = Session::open(&cli, report)?;
            let ranked = session.analyzer().smallest(*n)?;
            let title = session.writer.title(&format!("Bottom {n} smallest parks"));
            let columns = &session.config.columns;
            session.emit("rankingLow", &format!("bottom_{n}_parks"), &ranked, |scheme| {
                generate_ranking_report(&title, &ranked, columns, scheme)
            })?;
        }

        Commands::Types { report } => {
            let session = Session::open(&cli, report)?;
            let breakdown = session.analyzer().type_breakdown()?;
            let title = session.writer.title("Park types");
            session.emit("type", "park_type_summary", &breakdown, |scheme| {
                generate_type_report(&title, &breakdown, scheme)
            })?;
        }

        Commands::Parks { report } => {
            let session = Session::open(&cli, report)?;
            let areas = session.analyzer().district_park_areas()?;
            if session.json {
                println!("{}", serde_json::to_string_pretty(&areas)?);
            }
            let sections = unique_slugs(areas.keys().map(String::as_str));
            for ((district, parks), section) in areas.iter().zip(&sections) {
                let title = session.writer.title(&format!("{district} park areas"));
                if session.json {
                    saved(&session.writer.write_json(section, "park_areas", parks)?);
                    continue;
                }
                print!(
                    "{}",
                    generate_district_parks_report(&title, parks, &session.scheme)
                );
                let body = generate_district_parks_report(&title, parks, &ColorScheme::plain());
                saved(&session.writer.write(section, "park_areas", &body)?);
            }
        }

        Commands::Export { report, output, by } => {
            let session = Session::open(&cli, report)?;
            let analyzer = session.analyzer();
            let summary = match by {
                GroupBy::District => analyzer.district_summary()?,
                GroupBy::Type => analyzer.type_summary()?,
            };
            let path = match output {
                Some(p) => p.clone(),
                None => session
                    .writer
                    .options()
                    .output_directory
                    .join("park_summary.xlsx"),
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            io::write_summary_excel(&summary, &path)?;
            if session.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                saved(&path);
            } else {
                println!(
                    "{} Exported {} groups -> {}",
                    "Success:".green().bold(),
                    summary.len(),
                    path.display()
                );
            }
        }

        Commands::Convert {
            input,
            output,
            pretty,
        } => {
            let dataset = io::load_dataset(input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            io::writer_for(output, *pretty)?.write(&dataset, output)?;
            println!(
                "{} Converted {} records {} -> {}",
                "Success:".green().bold(),
                dataset.len(),
                input.display(),
                output.display()
            );
        }

        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            std::fs::write(path, Config::default_toml()?)?;
            println!(
                "{} Wrote default configuration to {}",
                "Success:".green().bold(),
                path.display()
            );
        }
    }

    Ok(())
}
