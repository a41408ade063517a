use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use conventional_release::analyzer::{AnalyzerOptions, ReleaseAnalyzer};
use conventional_release::clock::SystemClock;
use conventional_release::config;
use conventional_release::git::Git2Client;
use conventional_release::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "conventional-release",
    version,
    about = "Compute the next semantic version and release notes from conventional commits"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Path inside the git repository to analyze. Also where conventional-release.toml is looked up"
    )]
    repo: PathBuf,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v, -vv, -vvv)"
    )]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Use commits since the most recent semantic-version tag to determine the
    /// next version and release notes
    Release(ParseFlags),

    /// Like `release`, but fail unless the current branch has conventional
    /// commits that are not on the target branch
    #[command(alias = "merge-request")]
    PullRequest(PullRequestArgs),
}

#[derive(clap::Args)]
struct PullRequestArgs {
    #[arg(
        short,
        long,
        help = "Target branch for the pull request. Used to find the commits that only exist on the source branch"
    )]
    target_branch: Option<String>,

    #[command(flatten)]
    flags: ParseFlags,
}

#[derive(clap::Args)]
struct ParseFlags {
    #[arg(
        short,
        long,
        help = "Error message shown when no formatted commits are found"
    )]
    no_formatted_commits_error_message: Option<String>,

    #[arg(long, help = "Remove commit hashes from release notes")]
    hide_commit_hashes: bool,

    #[arg(
        long,
        help = "Strict Conventional Commits: `fix:` is a patch bump and `hotfix:` bumps nothing"
    )]
    strict: bool,
}

impl ParseFlags {
    /// Command-line flags win over configuration file values
    fn apply(&self, options: &mut AnalyzerOptions) {
        options.strict |= self.strict;
        options.hide_commit_hashes |= self.hide_commit_hashes;
        if let Some(message) = &self.no_formatted_commits_error_message {
            options.no_formatted_commits_message = message.clone();
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config_from(args.config.as_deref(), &args.repo)?;
    let mut options = config.parser.to_options();

    match &args.command {
        Command::Release(flags) => {
            options.target_branch = None;
            flags.apply(&mut options);
        }
        Command::PullRequest(pr) => {
            if let Some(target) = &pr.target_branch {
                options.target_branch = Some(target.clone());
            }
            if options.target_branch.is_none() {
                return Err(anyhow!(
                    "A target branch is required: pass --target-branch or set parser.target_branch"
                ));
            }
            pr.flags.apply(&mut options);
        }
    }

    let git = Git2Client::open(&args.repo)?;
    let notes = ReleaseAnalyzer::new(options).analyze(&git, &SystemClock)?;

    if args.verbose > 0 {
        ui::display_summary(&notes);
    }
    ui::display_release(&notes)
}
