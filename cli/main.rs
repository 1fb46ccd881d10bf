#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(clippy::no_effect_underscore_binding)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::borrow::Cow;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use qrisk::batch::{self, BatchRequest};
use qrisk::registry;
use qrisk::{
    CoefficientTable, Ethnicity, ModelRegistry, ModelVersion, PatientProfile, Sex, SmokingStatus,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum SexCli {
    Male,
    Female,
}

impl From<SexCli> for Sex {
    fn from(value: SexCli) -> Self {
        match value {
            SexCli::Male => Sex::Male,
            SexCli::Female => Sex::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SmokingCli {
    NonSmoker,
    ExSmoker,
    /// Fewer than 10 a day
    Light,
    /// 10 to 19 a day
    Moderate,
    /// 20 or more a day
    Heavy,
}

impl From<SmokingCli> for SmokingStatus {
    fn from(value: SmokingCli) -> Self {
        match value {
            SmokingCli::NonSmoker => SmokingStatus::NonSmoker,
            SmokingCli::ExSmoker => SmokingStatus::ExSmoker,
            SmokingCli::Light => SmokingStatus::Light,
            SmokingCli::Moderate => SmokingStatus::Moderate,
            SmokingCli::Heavy => SmokingStatus::Heavy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EthnicityCli {
    NotRecorded,
    White,
    Indian,
    Pakistani,
    Bangladeshi,
    OtherAsian,
    BlackCaribbean,
    BlackAfrican,
    Chinese,
    Other,
}

impl From<EthnicityCli> for Ethnicity {
    fn from(value: EthnicityCli) -> Self {
        match value {
            EthnicityCli::NotRecorded => Ethnicity::NotRecorded,
            EthnicityCli::White => Ethnicity::White,
            EthnicityCli::Indian => Ethnicity::Indian,
            EthnicityCli::Pakistani => Ethnicity::Pakistani,
            EthnicityCli::Bangladeshi => Ethnicity::Bangladeshi,
            EthnicityCli::OtherAsian => Ethnicity::OtherAsian,
            EthnicityCli::BlackCaribbean => Ethnicity::BlackCaribbean,
            EthnicityCli::BlackAfrican => Ethnicity::BlackAfrican,
            EthnicityCli::Chinese => Ethnicity::Chinese,
            EthnicityCli::Other => Ethnicity::Other,
        }
    }
}

fn parse_model(text: &str) -> Result<ModelVersion, String> {
    ModelVersion::parse(text)
        .ok_or_else(|| format!("'{text}' is not a QRISK2 release (expected 2011, 2012 or 2015)"))
}

#[derive(Args)]
pub struct ModelArgs {
    /// QRISK2 release to score with: 2011, 2012 or 2015
    #[arg(long, value_name = "RELEASE", value_parser = parse_model, default_value = "2015")]
    pub model: ModelVersion,

    /// Follow-up horizon in years (1 to 15)
    #[arg(long, default_value_t = 10)]
    pub years: u32,

    /// Coefficient table (TOML) replacing the built-in model for its release and sex.
    /// May be given more than once.
    #[arg(long, value_name = "PATH")]
    pub table: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, value_enum)]
    pub sex: SexCli,

    /// Age in years
    #[arg(long)]
    pub age: f64,

    /// Body mass index (kg/m^2)
    #[arg(long)]
    pub bmi: f64,

    /// Townsend deprivation score
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub townsend: f64,

    /// Systolic blood pressure (mmHg)
    #[arg(long)]
    pub sbp: f64,

    /// Total cholesterol / HDL ratio
    #[arg(long)]
    pub cholesterol_ratio: f64,

    #[arg(long, value_enum, default_value_t = SmokingCli::NonSmoker)]
    pub smoking: SmokingCli,

    #[arg(long, value_enum, default_value_t = EthnicityCli::NotRecorded)]
    pub ethnicity: EthnicityCli,

    /// Atrial fibrillation
    #[arg(long)]
    pub af: bool,

    /// Rheumatoid arthritis
    #[arg(long)]
    pub ra: bool,

    /// Chronic kidney disease
    #[arg(long)]
    pub renal: bool,

    #[arg(long)]
    pub treated_hypertension: bool,

    #[arg(long)]
    pub type1_diabetes: bool,

    #[arg(long)]
    pub type2_diabetes: bool,

    /// Angina or heart attack in a first degree relative under 60
    #[arg(long)]
    pub family_history: bool,

    /// Existing cardiovascular disease (not modelled; scored with a warning)
    #[arg(long)]
    pub prior_cvd: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Tab-separated patient file (see `qrisk template` for the columns)
    pub input: PathBuf,

    /// Output path; defaults to the input path with a `.qrisk.tsv` extension
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct TableArgs {
    #[arg(long, value_name = "RELEASE", value_parser = parse_model)]
    pub model: ModelVersion,

    #[arg(long, value_enum)]
    pub sex: SexCli,

    /// Where to write the TOML table
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
}

#[derive(Parser)]
#[command(
    name = "qrisk",
    about = "QRISK2 cardiovascular risk scoring",
    long_about = "Scores the 1 to 15 year risk of a cardiovascular event with the 2011, 2012 \
                 or 2015 release of the QRISK2 models, for a single patient or a whole cohort."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single patient described on the command line
    #[command(about = "Score one patient")]
    Score(ScoreArgs),

    /// Score every row of a tab-separated patient file
    #[command(about = "Score a cohort file (outputs: <input>.qrisk.tsv)")]
    Batch(BatchArgs),

    /// Write a built-in coefficient table as TOML, as a starting point for --table
    #[command(about = "Export a built-in coefficient table (outputs: TOML)")]
    Table(TableArgs),

    /// Print the header line expected by `batch`
    #[command(about = "Print the batch input header")]
    Template,

    /// Display version and build information
    #[command(about = "Display version and build information")]
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Cli { command } = cli;

    let result = match command {
        Some(Commands::Score(args)) => run_score(args),
        Some(Commands::Batch(args)) => run_batch(args),
        Some(Commands::Table(args)) => run_table(args),
        Some(Commands::Template) => {
            println!("{}", batch::template());
            Ok(())
        }
        Some(Commands::Version) => {
            print_version_info();
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map(|()| println!())
            .map_err(|err| Box::new(err) as Box<dyn Error>),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_version_info() {
    println!("qrisk {}", env!("CARGO_PKG_VERSION"));
    let labels: Vec<String> = registry::builtin()
        .models()
        .map(|model| format!("{} {}", model.version(), model.sex()))
        .collect();
    println!("Built-in models: {}", labels.join(", "));
}

/// The built-in registry, or a copy of it with the user's tables registered on top.
fn load_registry(tables: &[PathBuf]) -> Result<Cow<'static, ModelRegistry>, Box<dyn Error>> {
    if tables.is_empty() {
        return Ok(Cow::Borrowed(registry::builtin()));
    }
    let mut registry = registry::builtin().clone();
    for path in tables {
        let table = CoefficientTable::load(path)?;
        log::info!(
            "Using {} {} coefficients from '{}'",
            table.version,
            table.sex,
            path.display()
        );
        registry.register(table)?;
    }
    Ok(Cow::Owned(registry))
}

fn run_score(args: ScoreArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(&args.model.table)?;
    let sex = Sex::from(args.sex);
    let profile = PatientProfile {
        age: args.age,
        bmi: args.bmi,
        townsend: args.townsend,
        systolic_bp: args.sbp,
        cholesterol_ratio: args.cholesterol_ratio,
        smoking: args.smoking.into(),
        ethnicity: args.ethnicity.into(),
        atrial_fibrillation: args.af,
        rheumatoid_arthritis: args.ra,
        renal_disease: args.renal,
        treated_hypertension: args.treated_hypertension,
        type1_diabetes: args.type1_diabetes,
        type2_diabetes: args.type2_diabetes,
        family_history: args.family_history,
        prior_cvd: args.prior_cvd,
    };

    let evaluation = registry
        .resolve(args.model.model, sex)?
        .evaluate(&profile, args.model.years)?;

    println!("model\t{}", evaluation.version);
    println!("sex\t{}", evaluation.sex);
    println!("years\t{}", evaluation.follow_up_year);
    println!("linear_predictor\t{}", evaluation.linear_predictor);
    println!("baseline_survival\t{}", evaluation.baseline_survival);
    println!("risk_percent\t{}", evaluation.risk_percent);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(&args.model.table)?;
    let output = args
        .out
        .unwrap_or_else(|| args.input.with_extension("qrisk.tsv"));
    let request = BatchRequest {
        version: args.model.model,
        follow_up_year: args.model.years,
    };

    let summary = batch::score_file(&args.input, &output, request, &registry)?;
    println!(
        "Scored {} patients with {} ({}-year risk); results written to {}",
        summary.rows,
        request.version,
        request.follow_up_year,
        output.display()
    );
    Ok(())
}

fn run_table(args: TableArgs) -> Result<(), Box<dyn Error>> {
    let model = registry::builtin().resolve(args.model, args.sex.into())?;
    model.table().save(&args.out)?;
    println!(
        "{} {} coefficients written to {}",
        model.version(),
        model.sex(),
        args.out.display()
    );
    Ok(())
}
