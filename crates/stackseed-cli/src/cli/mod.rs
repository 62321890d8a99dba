//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};
use clap_complete::Shell;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "stackseed",
    bin_name = "stackseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Generate a FastAPI + HTMX + Tailwind web project",
    long_about = "Stackseed copies a ready-to-run web application skeleton \
                  (FastAPI, Jinja2, HTMX, Tailwind/Flowbite, Supabase) into \
                  TARGET_PATH, substituting PROJECT_NAME wherever the template \
                  refers to the project.",
    after_help = "EXAMPLES:\n\
        \x20 stackseed ./demo Demo\n\
        \x20 stackseed ./demo Demo --dry-run\n\
        \x20 stackseed ./demo Demo --force\n\
        \x20 stackseed ./api \"Billing API\" --template-dir ~/templates/fastapi\n\
        \x20 stackseed --completions bash > ~/.local/share/bash-completion/completions/stackseed",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Print a shell completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions and exit"
    )]
    pub completions: Option<Shell>,
}

/// Arguments of the generate operation.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory to create the project in. Created if missing.
    #[arg(
        value_name = "TARGET_PATH",
        required_unless_present = "completions",
        help = "Where the project is created"
    )]
    pub target: Option<PathBuf>,

    /// Name substituted into the generated files.
    #[arg(
        value_name = "PROJECT_NAME",
        required_unless_present = "completions",
        help = "Project name (e.g. \"Demo\" or \"my-app\")"
    )]
    pub name: Option<String>,

    /// Write over files in a non-empty target. Unrelated files are kept.
    #[arg(
        short = 'f',
        long = "force",
        conflicts_with = "interactive",
        help = "Overwrite same-named files in a non-empty target"
    )]
    pub force: bool,

    #[arg(
        short = 'i',
        long = "interactive",
        help = "Ask before writing into a non-empty target"
    )]
    pub interactive: bool,

    /// Preview what would be created without writing any files.
    #[arg(
        short = 'n',
        long = "dry-run",
        help = "Show what would be created without creating"
    )]
    pub dry_run: bool,

    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        env = "STACKSEED_TEMPLATES_DIR",
        help = "Use a template directory instead of the bundled template"
    )]
    pub template_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("stackseed").chain(args.iter().copied()))
    }

    #[test]
    fn positional_arguments_parse() {
        let cli = parse(&["/tmp/demo", "Demo"]).unwrap();
        assert_eq!(cli.generate.target, Some(PathBuf::from("/tmp/demo")));
        assert_eq!(cli.generate.name.as_deref(), Some("Demo"));
        assert!(!cli.generate.force);
    }

    #[test]
    fn empty_name_is_accepted_by_the_parser() {
        // Rejected later, by ProjectName::parse.
        let cli = parse(&["/tmp/demo", ""]).unwrap();
        assert_eq!(cli.generate.name.as_deref(), Some(""));
    }

    #[test]
    fn name_is_required() {
        assert!(parse(&["/tmp/demo"]).is_err());
    }

    #[test]
    fn force_conflicts_with_interactive() {
        assert!(parse(&["/tmp/demo", "Demo", "--force", "--interactive"]).is_err());
    }

    #[test]
    fn completions_need_no_positionals() {
        let cli = parse(&["--completions", "zsh"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Zsh));
        assert!(cli.generate.target.is_none());
    }

    #[test]
    fn no_color_flag_takes_no_value() {
        let cli = parse(&["/tmp/demo", "Demo", "--no-color"]).unwrap();
        assert!(cli.global.no_color);
    }

    #[test]
    fn global_flags_parse_after_positionals() {
        let cli = parse(&["/tmp/demo", "Demo", "-vv", "--output-format", "json"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }
}
