use crate::console;
use crate::infra::{build_service, parse_domain};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use energyscan::assessments::{write_history_csv, AssessmentService, Domain};
use energyscan::config::AppConfig;
use energyscan::error::AppError;
use energyscan::history::{AppendOutcome, StoreError};
use energyscan::telemetry::{self, LogSink};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(
    name = "energyscan",
    about = "Take energy self-assessments and review their history",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    #[command(flatten)]
    Assessment(AssessmentCommand),
}

#[derive(Subcommand, Debug)]
enum AssessmentCommand {
    /// Print a questionnaire with its options and maximum score
    Questionnaire(DomainArgs),
    /// Answer a questionnaire interactively and save the scored result
    Take(TakeArgs),
    /// List stored submissions for a domain
    History(HistoryArgs),
    /// Re-score one stored submission and list strengths and improvement areas
    Analyze(AnalyzeArgs),
    /// Aggregate statistics over a domain's history
    Summary(DomainArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct DomainArgs {
    /// awareness, routine, wellbeing or activities
    #[arg(value_parser = parse_domain)]
    domain: Domain,
}

#[derive(Args, Debug)]
struct TakeArgs {
    #[arg(value_parser = parse_domain)]
    domain: Domain,
    /// Score the answers without saving them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum HistoryFormat {
    #[default]
    Table,
    Csv,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[arg(value_parser = parse_domain)]
    domain: Domain,
    #[arg(long, value_enum, default_value_t = HistoryFormat::Table)]
    format: HistoryFormat,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(value_parser = parse_domain)]
    domain: Domain,
    /// Zero-based position of the submission in the history
    #[arg(long)]
    index: usize,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assessment(command) => run_assessment(command).await,
    }
}

async fn run_assessment(command: AssessmentCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let service = build_service(&config.store)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        AssessmentCommand::Questionnaire(args) => {
            console::render_questionnaire(service.questionnaire(args.domain), &mut out)?;
            Ok(())
        }
        AssessmentCommand::Take(args) => take(&service, args, &mut out).await,
        AssessmentCommand::History(args) => history(&service, args, &mut out).await,
        AssessmentCommand::Analyze(args) => {
            let analysis = service.analyze(args.domain, args.index).await?;
            console::render_analysis(&analysis, &mut out)?;
            Ok(())
        }
        AssessmentCommand::Summary(args) => {
            let (summary, issue) = service.summary(args.domain).await;
            console::render_summary(&summary, issue.as_ref(), &mut out)?;
            Ok(())
        }
    }
}

async fn take<W: Write>(
    service: &AssessmentService,
    args: TakeArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let questionnaire = service.questionnaire(args.domain);
    let completed = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        console::prompt_responses(questionnaire, &mut input, out)?
    };

    if args.dry_run {
        let outcome = service.engine().score(&completed);
        console::render_outcome(&outcome, out)?;
        writeln!(out, "Dry run: response not saved.")?;
        return Ok(());
    }

    let receipt = service
        .submit(args.domain, completed.into_responses())
        .await?;
    console::render_outcome(&receipt.outcome, out)?;
    console::render_persistence(&receipt.persistence, out)?;

    match receipt.persistence {
        AppendOutcome::Applied { .. } => Ok(()),
        AppendOutcome::VersionConflict { message } => {
            Err(StoreError::VersionConflict { message }.into())
        }
        AppendOutcome::Failed(error) => Err(error.into()),
    }
}

async fn history<W: Write>(
    service: &AssessmentService,
    args: HistoryArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let questionnaire = service.questionnaire(args.domain);
    match args.format {
        HistoryFormat::Table => {
            let load = service.history(args.domain).await;
            console::render_history_table(questionnaire, &load, out)?;
        }
        HistoryFormat::Csv => {
            let snapshot = service.store().fetch(args.domain).await?;
            write_history_csv(out, questionnaire, &snapshot.records)?;
        }
    }
    Ok(())
}
