//! Command-line front end for the checklist engine.
//!
//! Every subcommand prints a single JSON document to stdout; logs go to
//! stderr so output stays machine-parseable.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use checklist_protocol::{ApplicationType, Discipline, Level, Role, Technology};
use checklist_query::{build_checklist, search_requirements, ChecklistQuery, RequirementFilters};
use checklist_scoring::{
    score_application, score_pipeline, Answers, ApplicationRecommendation, PipelineRecommendation,
    Question, APPLICATION_QUESTIONS, PIPELINE_QUESTIONS,
};
use checklist_taxonomy::{
    application_index, pipeline_index, Category, Control, PipelineCategory, PipelineIndex,
    Requirement, StandardInfo, Subcategory, TaxonomyIndex,
};

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "Security-standard checklists and questionnaire scoring", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a role/context checklist from the application standard
    Checklist(ChecklistArgs),

    /// Search requirements of the pipeline standard
    Requirements(RequirementsArgs),

    /// Print a questionnaire catalog
    Questions(QuestionsArgs),

    /// Score an application questionnaire into a recommendation
    Score(ScoreArgs),

    /// Score a pipeline questionnaire into a recommendation
    #[command(name = "score-pipeline")]
    ScorePipeline(ScorePipelineArgs),

    /// List the categories of a standard
    Categories(CategoriesArgs),
}

#[derive(Args)]
struct ChecklistArgs {
    /// Target assurance level: l1, l2, or l3
    #[arg(long)]
    level: String,

    /// Audience role, e.g. developer, tester, architect
    #[arg(long)]
    role: String,

    /// Application type: web, mobile, or api
    #[arg(long = "app-type")]
    application_type: String,

    /// Optional discipline refinement, e.g. frontend, backend
    #[arg(long)]
    discipline: Option<String>,

    /// Optional technology refinement, e.g. typescript, java
    #[arg(long)]
    technology: Option<String>,

    /// Restrict to these category codes (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Load the standard from this JSON file instead of the built-in copy
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Args)]
struct RequirementsArgs {
    /// Case-insensitive free-text search
    #[arg(long)]
    search: Option<String>,

    /// Only requirements applicable at these levels (repeatable)
    #[arg(long = "level")]
    levels: Vec<String>,

    /// Restrict to these category codes (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Restrict to these subcategory codes (repeatable)
    #[arg(long = "subcategory")]
    subcategories: Vec<String>,

    /// Load the standard from this CSV file instead of the built-in copy
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Args)]
struct QuestionsArgs {
    /// Which questionnaire to print
    #[arg(long, value_enum, default_value = "application")]
    standard: StandardKind,
}

#[derive(Args)]
struct ScoreArgs {
    /// Role of the respondent, e.g. developer
    #[arg(long)]
    role: String,

    /// Answers as an inline JSON object of booleans keyed by question id
    #[arg(long, conflicts_with = "answers_file")]
    answers: Option<String>,

    /// Read answers from this JSON file ("-" for stdin)
    #[arg(long = "answers-file")]
    answers_file: Option<PathBuf>,

    /// Load the standard from this JSON file instead of the built-in copy
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Args)]
struct ScorePipelineArgs {
    /// Answers as an inline JSON object of booleans keyed by question id
    #[arg(long, conflicts_with = "answers_file")]
    answers: Option<String>,

    /// Read answers from this JSON file ("-" for stdin)
    #[arg(long = "answers-file")]
    answers_file: Option<PathBuf>,

    /// Load the standard from this CSV file instead of the built-in copy
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Args)]
struct CategoriesArgs {
    /// Which standard to list
    #[arg(long, value_enum, default_value = "application")]
    standard: StandardKind,

    /// Load the standard from this file instead of the built-in copy
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum StandardKind {
    Application,
    Pipeline,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Checklist(args) => run_checklist(args),
        Commands::Requirements(args) => run_requirements(args),
        Commands::Questions(args) => run_questions(&args),
        Commands::Score(args) => run_score(args),
        Commands::ScorePipeline(args) => run_score_pipeline(args),
        Commands::Categories(args) => run_categories(args),
    }
}

#[derive(Serialize)]
struct ChecklistOutput<'a> {
    standard: &'a StandardInfo,
    query: &'a ChecklistQuery,
    total: usize,
    controls: Vec<&'a Control>,
}

fn run_checklist(args: ChecklistArgs) -> Result<()> {
    let loaded;
    let index: &TaxonomyIndex = match &args.document {
        Some(path) => {
            loaded = TaxonomyIndex::from_path(path)
                .with_context(|| format!("Failed to load standard from {}", path.display()))?;
            &loaded
        }
        None => application_index(),
    };

    let mut query = ChecklistQuery::new(
        args.level.parse::<Level>()?,
        args.role.parse::<Role>()?,
        args.application_type.parse::<ApplicationType>()?,
    );
    if let Some(discipline) = &args.discipline {
        query = query.with_discipline(discipline.parse::<Discipline>()?);
    }
    if let Some(technology) = &args.technology {
        query = query.with_technology(technology.parse::<Technology>()?);
    }
    if !args.categories.is_empty() {
        query = query.with_categories(&args.categories);
    }

    let controls = build_checklist(index, &query);
    print_json(&ChecklistOutput {
        standard: index.info(),
        query: &query,
        total: controls.len(),
        controls,
    })
}

#[derive(Serialize)]
struct RequirementsOutput<'a> {
    standard: &'a StandardInfo,
    filters: &'a RequirementFilters,
    total: usize,
    requirements: Vec<&'a Requirement>,
}

fn run_requirements(args: RequirementsArgs) -> Result<()> {
    let loaded;
    let index: &PipelineIndex = match &args.document {
        Some(path) => {
            loaded = PipelineIndex::from_path(path)
                .with_context(|| format!("Failed to load standard from {}", path.display()))?;
            &loaded
        }
        None => pipeline_index(),
    };

    let levels = args
        .levels
        .iter()
        .map(|raw| raw.parse::<Level>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut filters = RequirementFilters::new()
        .with_levels(levels)
        .with_categories(&args.categories)
        .with_subcategories(&args.subcategories);
    if let Some(search) = args.search {
        filters = filters.with_search(search);
    }

    let requirements = search_requirements(index, &filters);
    print_json(&RequirementsOutput {
        standard: index.info(),
        filters: &filters,
        total: requirements.len(),
        requirements,
    })
}

#[derive(Serialize)]
struct QuestionsOutput<'a> {
    standard: &'static str,
    total: usize,
    questions: &'a [Question],
}

fn run_questions(args: &QuestionsArgs) -> Result<()> {
    let (standard, questions): (&'static str, &[Question]) = match args.standard {
        StandardKind::Application => ("application", &APPLICATION_QUESTIONS),
        StandardKind::Pipeline => ("pipeline", &PIPELINE_QUESTIONS),
    };
    print_json(&QuestionsOutput {
        standard,
        total: questions.len(),
        questions,
    })
}

#[derive(Serialize)]
struct ScoreOutput {
    role: Role,
    recommendation: ApplicationRecommendation,
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let loaded;
    let index: &TaxonomyIndex = match &args.document {
        Some(path) => {
            loaded = TaxonomyIndex::from_path(path)
                .with_context(|| format!("Failed to load standard from {}", path.display()))?;
            &loaded
        }
        None => application_index(),
    };

    let role = args.role.parse::<Role>()?;
    let answers = load_answers(args.answers.as_deref(), args.answers_file.as_ref())?;
    let recommendation = score_application(&answers, role, index);
    print_json(&ScoreOutput {
        role,
        recommendation,
    })
}

#[derive(Serialize)]
struct PipelineScoreOutput {
    recommendation: PipelineRecommendation,
}

fn run_score_pipeline(args: ScorePipelineArgs) -> Result<()> {
    let loaded;
    let index: &PipelineIndex = match &args.document {
        Some(path) => {
            loaded = PipelineIndex::from_path(path)
                .with_context(|| format!("Failed to load standard from {}", path.display()))?;
            &loaded
        }
        None => pipeline_index(),
    };

    let answers = load_answers(args.answers.as_deref(), args.answers_file.as_ref())?;
    let recommendation = score_pipeline(&answers, index);
    print_json(&PipelineScoreOutput { recommendation })
}

#[derive(Serialize)]
struct ApplicationCategoriesOutput<'a> {
    standard: &'a StandardInfo,
    categories: &'a [Category],
}

#[derive(Serialize)]
struct PipelineCategoriesOutput<'a> {
    standard: &'a StandardInfo,
    categories: &'a [PipelineCategory],
    subcategories: &'a [Subcategory],
}

fn run_categories(args: CategoriesArgs) -> Result<()> {
    match args.standard {
        StandardKind::Application => {
            let loaded;
            let index: &TaxonomyIndex = match &args.document {
                Some(path) => {
                    loaded = TaxonomyIndex::from_path(path).with_context(|| {
                        format!("Failed to load standard from {}", path.display())
                    })?;
                    &loaded
                }
                None => application_index(),
            };
            print_json(&ApplicationCategoriesOutput {
                standard: index.info(),
                categories: index.categories(),
            })
        }
        StandardKind::Pipeline => {
            let loaded;
            let index: &PipelineIndex = match &args.document {
                Some(path) => {
                    loaded = PipelineIndex::from_path(path).with_context(|| {
                        format!("Failed to load standard from {}", path.display())
                    })?;
                    &loaded
                }
                None => pipeline_index(),
            };
            print_json(&PipelineCategoriesOutput {
                standard: index.info(),
                categories: index.categories(),
                subcategories: index.subcategories(),
            })
        }
    }
}

/// Read answers from an inline JSON string, a file, or stdin ("-" or no
/// source given).
fn load_answers(inline: Option<&str>, file: Option<&PathBuf>) -> Result<Answers> {
    let raw = match (inline, file) {
        (Some(inline), _) => inline.to_string(),
        (None, Some(path)) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read answers from stdin")?;
            buf
        }
    };
    serde_json::from_str(raw.trim())
        .context("Answers must be a JSON object of booleans keyed by question id")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn inline_answers_parse_into_a_boolean_map() {
        let answers =
            load_answers(Some(r#"{"handlesPayments": true, "storesPII": false}"#), None).unwrap();
        assert_eq!(answers.get("handlesPayments"), Some(&true));
        assert_eq!(answers.get("storesPII"), Some(&false));
    }

    #[test]
    fn answers_load_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"deploysToProduction": true}}"#).unwrap();

        let answers = load_answers(None, Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(answers.get("deploysToProduction"), Some(&true));
    }

    #[test]
    fn malformed_answers_are_rejected() {
        assert!(load_answers(Some("not json"), None).is_err());
        assert!(load_answers(Some(r#"{"q": "yes"}"#), None).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
