//! @ai:module:intent CLI for the RAG benchmark dataset tools
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ragbench::{
    config::{BenchConfig, FilterConfig},
    dataset::{DatasetLoader, JsonDatasetLoader, QuestionCategory},
    evaluator::Evaluator,
    generator::{FileGenerator, FileGeneratorTrait},
    report::{
        ConsoleReporter, JsonReporter, JsonReporterTrait, MarkdownReporter, MarkdownReporterTrait,
        ReportGenerator,
    },
    sqlite::build_database,
    validation::{DatasetValidator, Severity},
};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "ragbench.toml";

#[derive(Parser)]
#[command(name = "ragbench")]
#[command(about = "Synthetic RAG benchmark: dataset generation, validation and answer scoring")]
#[command(version)]
struct Cli {
    /// Path to configuration file (default: ragbench.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayFormat {
    Rich,
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a submissions file against the ground truth
    Evaluate {
        /// Path to submissions JSON file
        submissions: PathBuf,

        /// Path to ground truth JSON
        #[arg(short, long)]
        ground_truth: Option<PathBuf>,

        /// Path to rubrics JSON
        #[arg(short, long)]
        rubrics: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output display format
        #[arg(short, long, value_enum, default_value = "rich")]
        display: DisplayFormat,

        /// Only evaluate these categories (comma-separated)
        #[arg(long)]
        categories: Option<String>,
    },

    /// Write results.json, results.md and charts from a results file
    Report {
        /// Path to results JSON file
        results: PathBuf,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate .eml and .md files from documents.json
    GenerateFiles {
        /// Path to documents JSON
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the SQLite database from database.json
    GenerateDb {
        /// Path to database JSON
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for the database file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the dataset files
    Validate,

    /// List ground-truth questions
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ragbench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = load_or_default_config(cli.config)?;

    match cli.command {
        Commands::Evaluate {
            submissions,
            ground_truth,
            rubrics,
            output,
            display,
            categories,
        } => evaluate(
            config,
            EvaluateArgs {
                submissions,
                ground_truth,
                rubrics,
                output,
                display,
                categories,
            },
        ),
        Commands::Report { results, output } => generate_reports(config, results, output),
        Commands::GenerateFiles { input, output } => generate_files(config, input, output),
        Commands::GenerateDb { input, output } => generate_db(config, input, output),
        Commands::Validate => validate(config),
        Commands::List { category } => list_questions(config, category),
        Commands::Init { output } => init_config(output),
    }
}

struct EvaluateArgs {
    submissions: PathBuf,
    ground_truth: Option<PathBuf>,
    rubrics: Option<PathBuf>,
    output: Option<PathBuf>,
    display: DisplayFormat,
    categories: Option<String>,
}

/// @ai:intent Evaluate submissions and print or write the report
/// @ai:effects fs:read, fs:write, io
fn evaluate(config: BenchConfig, args: EvaluateArgs) -> Result<()> {
    let loader = JsonDatasetLoader::new();
    let ground_truth_path = args.ground_truth.unwrap_or(config.paths.ground_truth);
    let rubrics_path = args.rubrics.unwrap_or(config.paths.rubrics);

    let ground_truth = loader.load_ground_truth(&ground_truth_path)?;
    let submissions = loader.load_submissions(&args.submissions)?;
    let rubrics = loader.load_rubrics(&rubrics_path)?;

    let mut filter = config.filter;
    if let Some(categories) = args.categories {
        filter.categories = Some(category_keys(&categories)?);
    }

    let results = Evaluator::new(config.scoring)
        .with_filter(filter)
        .evaluate(&ground_truth, &submissions)
        .with_rubrics(rubrics);

    match args.display {
        DisplayFormat::Rich => ConsoleReporter::new().print(&results),
        DisplayFormat::Json => {
            let output = JsonReporter::new().render(&results)?;
            emit(&output, args.output.as_deref())?;
            eprintln!("\nSCORE: {}", results.summary.score_line());
        }
        DisplayFormat::Markdown => {
            let output = MarkdownReporter::new().render(&results);
            emit(&output, args.output.as_deref())?;
        }
    }

    Ok(())
}

/// @ai:intent Write report text to a file, or stdout when no path is given
/// @ai:effects fs:write, io
fn emit(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Results written to {}", path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// @ai:intent Generate reports from results file
/// @ai:effects fs:read, fs:write
fn generate_reports(config: BenchConfig, results_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let results = JsonReporter::new().load(&results_path)?;
    let output_dir = output.unwrap_or(config.paths.output_dir);

    ReportGenerator::new().generate_all(&results, &output_dir)?;

    println!("Reports generated in {}", output_dir.display());
    Ok(())
}

/// @ai:intent Generate document files from documents.json
/// @ai:effects fs:read, fs:write
fn generate_files(config: BenchConfig, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or(config.paths.documents);
    let output_dir = output.unwrap_or_else(|| config.paths.output_dir.join("files"));

    let documents = JsonDatasetLoader::new().load_documents(&input)?;
    let summary = FileGenerator::new().generate(&documents, &output_dir)?;

    println!(
        "Generated {} files in {} ({} skipped)",
        summary.generated,
        output_dir.display(),
        summary.skipped
    );
    Ok(())
}

/// @ai:intent Build the SQLite database from database.json
/// @ai:effects fs:read, fs:write, db:write
fn generate_db(config: BenchConfig, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or(config.paths.database);
    let output_dir = output.unwrap_or(config.paths.output_dir);

    let definition = JsonDatasetLoader::new().load_database(&input)?;
    let summary = build_database(&definition, &output_dir)
        .with_context(|| format!("Failed to build database from {}", input.display()))?;

    println!("Database created: {}", summary.path.display());
    println!("{}", "-".repeat(40));
    for table in &summary.tables {
        println!("  {:<24} {:>6} rows", table.table, table.rows);
    }
    println!("{}", "-".repeat(40));
    println!(
        "  {} rows, {} indexes, {} views",
        summary.total_rows(),
        summary.indexes,
        summary.views
    );
    Ok(())
}

/// @ai:intent Validate dataset files and exit non-zero on errors
/// @ai:effects fs:read, io
fn validate(config: BenchConfig) -> Result<()> {
    let validator = DatasetValidator::new(config.validation);
    let report = validator.validate_paths(&JsonDatasetLoader::new(), &config.paths);

    for issue in &report.issues {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("{}[{}]: {}", label, issue.scope, issue.message);
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 {
        anyhow::bail!("Dataset validation failed: {} errors, {} warnings", errors, warnings);
    }

    println!(
        "{} ({} warnings)",
        "Dataset validation passed!".green(),
        warnings
    );
    Ok(())
}

/// @ai:intent List ground-truth questions
/// @ai:effects fs:read
fn list_questions(config: BenchConfig, category: Option<String>) -> Result<()> {
    let ground_truth = JsonDatasetLoader::new().load_ground_truth(&config.paths.ground_truth)?;

    let filter = FilterConfig {
        categories: category.as_deref().map(category_keys).transpose()?,
        ..Default::default()
    };

    let questions: Vec<_> = ground_truth
        .iter()
        .filter(|(cat, q)| filter.matches(cat.as_str(), &q.id))
        .collect();

    println!("Questions ({}):", questions.len());
    println!();
    println!("{:<10} {:<36} {:<50}", "ID", "Category", "Question");
    println!("{}", "-".repeat(96));

    for (category, question) in &questions {
        println!(
            "{:<10} {:<36} {:<50}",
            question.id,
            category.as_str(),
            truncate(question.display_text(), 50)
        );
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchConfig> {
    match path {
        Some(p) => BenchConfig::load(&p).with_context(|| format!("Failed to load {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                BenchConfig::load(&default_path)
            } else {
                Ok(BenchConfig::default())
            }
        }
    }
}

/// @ai:intent Validate a comma-separated category list and return its keys
/// @ai:effects pure
fn category_keys(value: &str) -> Result<Vec<String>> {
    let categories = QuestionCategory::parse_list(value)?;
    Ok(categories.iter().map(|c| c.as_str().to_string()).collect())
}
