use std::collections::BTreeMap;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use synthea_trigger_core::config::StdEnvSource;
use synthea_trigger_core::stack::{parse_context_pair, StackSettings};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the Synthea trigger workspace",
    long_about = "A unified CLI for deploying the Synthea processing stack through\n\
                  the CDK CLI and running CI checks in this workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the CloudFormation template
    Synth(StackArgs),
    /// Deploy the stack
    Deploy(StackArgs),
    /// Remove all stack resources from AWS
    Destroy {
        #[command(flatten)]
        stack: StackArgs,
        /// Skip the CDK confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved stack settings without invoking the CDK CLI
    Settings(StackArgs),
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::All)]
        job: CiJob,
    },
}

#[derive(clap::Args)]
struct StackArgs {
    /// CDK context parameter, e.g. `-c vpc_id=vpc-0abc` (beats VPC_ID / S3_BUCKET_NAME)
    #[arg(short = 'c', long = "context", value_parser = parse_context_pair)]
    context: Vec<(String, String)>,
    /// Directory holding the CDK app
    #[arg(long, env = "CDK_APP_DIR", default_value = "cdk")]
    app_dir: String,
}

impl StackArgs {
    fn settings(&self) -> StackSettings {
        let context: BTreeMap<String, String> = self.context.iter().cloned().collect();
        StackSettings::resolve(&context, &StdEnvSource)
    }
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Check,
    /// Unit and integration tests
    Test,
    /// Run check + test
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn describe(settings: &StackSettings) {
    let show = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| format!("<{fallback}>"))
    };
    eprintln!("stack:          {}", settings.stack_name);
    eprintln!("description:    {}", settings.description);
    eprintln!("vpc_id:         {}", show(&settings.vpc_id, "default VPC"));
    eprintln!(
        "s3_bucket_name: {}",
        show(&settings.s3_bucket_name, "created by stack")
    );
    eprintln!(
        "account:        {}",
        show(&settings.account, "from credentials")
    );
    eprintln!("region:         {}", show(&settings.region, "from profile"));
}

fn run_cdk(action: &str, stack: &StackArgs, extra: &[&str]) {
    let app_dir = Path::new(&stack.app_dir);
    if !app_dir.is_dir() {
        eprintln!(
            "CDK app directory '{}' not found; pass --app-dir or set CDK_APP_DIR",
            app_dir.display()
        );
        exit(1);
    }

    let settings = stack.settings();
    step(&format!("cdk {action} {}", settings.stack_name));
    describe(&settings);

    let mut args = vec![action.to_string(), settings.stack_name.clone()];
    args.extend(settings.context_args());
    args.extend(extra.iter().map(|arg| arg.to_string()));

    eprintln!("+ cdk {}", args.join(" "));
    let mut command = Command::new("cdk");
    command.args(&args).current_dir(app_dir);
    if let Some(account) = &settings.account {
        command.env("CDK_DEFAULT_ACCOUNT", account);
    }
    if let Some(region) = &settings.region {
        command.env("CDK_DEFAULT_REGION", region);
    }

    let status = command.status().expect("failed to execute cdk");
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test synthea_trigger_core");
    run_cargo(&["test", "-p", "synthea_trigger_core"]);

    step("Test synthea_trigger_aws");
    run_cargo(&["test", "-p", "synthea_trigger_aws"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth(stack) => run_cdk("synth", &stack, &[]),
        Commands::Deploy(stack) => run_cdk("deploy", &stack, &[]),
        Commands::Destroy { stack, force } => {
            let extra: &[&str] = if force { &["--force"] } else { &[] };
            run_cdk("destroy", &stack, extra);
        }
        Commands::Settings(stack) => describe(&stack.settings()),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Test => ci_test(),
                CiJob::All => {
                    ci_check();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
