use aigito::console::TerminalInteraction;
use aigito::engine::ApplySummary;
use aigito::oracle::{OracleSettings, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use aigito::processor::{RunOptions, RunOutcome, DEFAULT_TOKEN_BUDGET};
use aigito::{rules, style, RunConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Skip confirmations and commit everything automatically
    #[arg(short, long)]
    yolo: bool,

    /// Decide and report every commit without staging or committing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Rules file passed to the model (defaults to .aigito-rules in the repository)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Extra context passed to the model
    #[arg(short, long)]
    context: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Ask before sending a grouping request estimated above this many tokens
    #[arg(long, default_value_t = DEFAULT_TOKEN_BUDGET)]
    max_tokens: usize,

    /// Path inside the Git repository (operations run from its top level)
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Model used to group the changes
    #[arg(long, env = "AIGITO_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// API key for the grouping request
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    if verbose {
        fmt()
            .with_env_filter(env_filter)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .pretty()
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .without_time()
            .with_ansi(true)
            .compact()
            .init();
    }
}

fn print_summary(summary: &ApplySummary, dry_run: bool) {
    println!("\n{}", style::label("📊 Commit Summary:"));
    println!("==================");
    println!("Total groups: {}", summary.outcomes.len());
    if dry_run {
        println!("  Would commit: {}", summary.would_commit());
    } else {
        println!("  Committed:    {}", summary.committed());
    }
    println!("  Skipped:      {}", summary.skipped());
    if summary.failed() > 0 {
        println!("  Failed:       {}", style::error(&summary.failed().to_string()));
    }
}

fn run(cli: Cli) -> aigito::Result<RunOutcome> {
    let config = RunConfig {
        auto_approve: cli.yolo,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    let settings = OracleSettings {
        api_base_url: cli.api_base_url,
        model: cli.model,
        ..OracleSettings::new(cli.api_key)
    };
    let processor = aigito::new(&cli.repo, settings)?;

    let rules = rules::load_rules(cli.rules.as_deref(), processor.repo().repo_path())?;
    let options = RunOptions {
        config,
        extra_context: cli.context,
        rules,
        token_budget: cli.max_tokens,
    };

    debug!(?config, repo = %processor.repo().repo_path().display(), "Starting run");
    let mut interaction = TerminalInteraction::new();
    processor.run(&options, &mut interaction)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let dry_run = cli.dry_run;

    println!("\n{}\n", style::banner("🤖 aigito - AI-Powered Git Assistant"));

    // The grouping request and the prompts both block.
    let result = match tokio::task::spawn_blocking(move || run(cli)).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", style::error(&format!("❌ An error occurred: {err}")));
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(RunOutcome::Completed(summary)) => {
            print_summary(&summary, dry_run);
            println!("\n{}", style::success("✅ All done! 🎉"));
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoChanges) => {
            println!("{}", style::warning("No changes detected"));
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::AlreadyStaged(paths)) => {
            eprintln!(
                "{}",
                style::error("Error: There are already staged files. Please commit or unstage them first:")
            );
            for path in paths {
                eprintln!("  - {}", style::path(&path));
            }
            eprintln!("\nTo unstage files, run: git reset");
            eprintln!("To commit staged files, run: git commit");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Unmerged(paths)) => {
            eprintln!(
                "{}",
                style::error("Error: The repository has unresolved merge conflicts:")
            );
            for path in paths {
                eprintln!("  - {}", style::path(&path));
            }
            eprintln!("\nResolve the conflicts and commit the merge first");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => {
            println!("Cancelled, nothing was sent");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", style::error(&format!("❌ An error occurred: {err}")));
            ExitCode::FAILURE
        }
    }
}
