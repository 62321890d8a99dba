//! The generate operation: validate arguments, pick a template source and an
//! overwrite policy, then hand off to [`GenerateService`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use stackseed_adapters::{DirectoryTemplate, EmbeddedTemplate, LocalFilesystem};
use stackseed_core::{
    application::{
        ApplicationError, GenerateReport, GenerateRequest, GenerateService, OverwritePolicy,
        ports::{Filesystem, TargetState, TemplateSource},
    },
    domain::{ProjectName, ProjectStructure, TargetPath},
    error::StackseedError,
};

use crate::{
    cli::GenerateArgs,
    config::{AppConfig, OverwriteMode},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    // 1. Validate inputs before anything touches the filesystem.
    let (target, name) = parse_inputs(&args)?;

    // 2. Template source: flag/env, then config, then the bundled tree.
    let template_dir = args
        .template_dir
        .clone()
        .or_else(|| config.generate.template_dir.clone());
    let source = template_source(template_dir);

    let filesystem = LocalFilesystem::new();
    let mode = overwrite_mode(&args, config);
    debug!(?mode, template = source.name(), "Resolved options");

    let service_fs: Box<dyn Filesystem> = Box::new(filesystem);
    let state = service_fs.inspect(target.as_path())?;

    // 3. Dry run: render the plan only.
    if args.dry_run {
        let request = GenerateRequest::new(target, name);
        let service = GenerateService::new(source, service_fs);
        let plan = service.plan(&request)?;
        return show_plan(&plan, service.template_name(), state, mode, output);
    }

    // 4. Overwrite policy, asking the user when configured to.
    let policy = resolve_policy(mode, state, target.as_path())?;
    let request = GenerateRequest::new(target, name).overwrite(policy);
    let service = GenerateService::new(source, service_fs);

    output.header(&format!(
        "Generating '{}' from {} into {}",
        request.name(),
        service.template_name(),
        request.target()
    ))?;
    info!(project = %request.name(), path = %request.target(), "Generation started");

    let report = service.generate(&request)?;

    show_report(&report, request.name(), output)
}

fn parse_inputs(args: &GenerateArgs) -> CliResult<(TargetPath, ProjectName)> {
    let (Some(target), Some(name)) = (&args.target, &args.name) else {
        return Err(CliError::InvalidInput {
            message: "both TARGET_PATH and PROJECT_NAME are required".into(),
        });
    };

    let target = TargetPath::parse(target.clone()).map_err(StackseedError::from)?;
    let name = ProjectName::parse(name).map_err(StackseedError::from)?;
    Ok((target, name))
}

fn template_source(template_dir: Option<PathBuf>) -> Box<dyn TemplateSource> {
    match template_dir {
        Some(dir) => Box::new(DirectoryTemplate::new(dir)),
        None => Box::new(EmbeddedTemplate::new()),
    }
}

fn overwrite_mode(args: &GenerateArgs, config: &AppConfig) -> OverwriteMode {
    if args.force {
        OverwriteMode::Force
    } else if args.interactive {
        OverwriteMode::Prompt
    } else {
        config.generate.overwrite
    }
}

fn resolve_policy(
    mode: OverwriteMode,
    state: TargetState,
    target: &Path,
) -> CliResult<OverwritePolicy> {
    match mode {
        OverwriteMode::Fail => Ok(OverwritePolicy::Fail),
        OverwriteMode::Force => Ok(OverwritePolicy::Overwrite),
        OverwriteMode::Prompt if state != TargetState::NonEmptyDirectory => {
            Ok(OverwritePolicy::Fail)
        }
        OverwriteMode::Prompt => {
            if confirm_overwrite(target)? {
                Ok(OverwritePolicy::Overwrite)
            } else {
                Err(StackseedError::from(ApplicationError::TargetExists {
                    path: target.to_path_buf(),
                })
                .into())
            }
        }
    }
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(target: &Path) -> CliResult<bool> {
    use std::io::IsTerminal;

    use dialoguer::{Confirm, theme::ColorfulTheme};

    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        warn!("Cannot prompt without a terminal; refusing to overwrite");
        return Ok(false);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "'{}' is not empty. Write the template over it?",
            target.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e.to_string()),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_target: &Path) -> CliResult<bool> {
    warn!("Built without the `interactive` feature; refusing to overwrite");
    Ok(false)
}

// ── Presentation ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PlanView<'a> {
    dry_run: bool,
    root: &'a Path,
    template: &'a str,
    target_state: &'static str,
    would_refuse: bool,
    directories: Vec<&'a Path>,
    files: Vec<PlannedFile<'a>>,
    total_bytes: u64,
}

#[derive(Debug, Serialize)]
struct PlannedFile<'a> {
    path: &'a Path,
    bytes: usize,
    substituted: bool,
}

fn target_state_label(state: TargetState) -> &'static str {
    match state {
        TargetState::Missing => "missing",
        TargetState::EmptyDirectory => "empty",
        TargetState::NonEmptyDirectory => "not-empty",
        TargetState::NotADirectory => "not-a-directory",
    }
}

fn show_plan(
    plan: &ProjectStructure,
    template: &str,
    state: TargetState,
    mode: OverwriteMode,
    output: &OutputManager,
) -> CliResult<()> {
    let would_refuse = match state {
        TargetState::NotADirectory => true,
        TargetState::NonEmptyDirectory => mode != OverwriteMode::Force,
        TargetState::Missing | TargetState::EmptyDirectory => false,
    };

    let view = PlanView {
        dry_run: true,
        root: plan.root(),
        template,
        target_state: target_state_label(state),
        would_refuse,
        directories: plan.directories().map(|d| d.path.as_path()).collect(),
        files: plan
            .files()
            .map(|f| PlannedFile {
                path: f.path.as_path(),
                bytes: f.size(),
                substituted: f.substituted,
            })
            .collect(),
        total_bytes: plan.total_bytes(),
    };

    if output.is_json() {
        return output.json(&view);
    }

    output.info(&format!(
        "Dry run: would create {} directories and {} files ({} bytes) in {}",
        view.directories.len(),
        view.files.len(),
        view.total_bytes,
        plan.root().display()
    ))?;
    for dir in &view.directories {
        output.print(&format!("  {}/", dir.display()))?;
    }
    for file in &view.files {
        let marker = if file.substituted { "  *" } else { "" };
        output.print(&format!("  {}{marker}", file.path.display()))?;
    }
    output.print("")?;
    output.print("  * project name substituted")?;

    if would_refuse {
        output.warning(&match state {
            TargetState::NotADirectory => format!("{} is not a directory", plan.root().display()),
            _ => format!(
                "{} is not empty; a real run needs --force or --interactive",
                plan.root().display()
            ),
        })?;
    }
    Ok(())
}

fn show_report(
    report: &GenerateReport,
    name: &ProjectName,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        return output.json(report);
    }

    output.success(&format!(
        "Project '{name}' created at {} ({} files, {} directories)",
        report.root.display(),
        report.files_written,
        report.directories_created
    ))?;
    if report.files_overwritten > 0 {
        output.warning(&format!(
            "{} existing files were overwritten",
            report.files_overwritten
        ))?;
    }

    if report.template == EmbeddedTemplate::NAME {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  python -m venv .venv && .venv/bin/pip install -r requirements.txt")?;
        output.print("  npm install && npm run dev")?;
        output.print("  python main.py")?;
    }
    Ok(())
}
