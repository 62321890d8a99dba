//! Generate Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Inspect the target and apply the overwrite policy
//! 2. Load the template tree and render it into a plan
//! 3. Write the plan to the filesystem
//!
//! Writes are not transactional. An I/O failure stops the run and files
//! written before it are left in place.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TargetState, TemplateSource},
    },
    domain::{
        DomainValidator as validator, FsEntry, ProjectName, ProjectStructure, RenderContext,
        TargetPath,
    },
    error::StackseedResult,
};

/// What to do when the target directory already has content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Refuse with `TargetExists`.
    #[default]
    Fail,
    /// Write over same-named files; unrelated files are kept.
    Overwrite,
}

/// Input to a single generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    target: TargetPath,
    name: ProjectName,
    overwrite: OverwritePolicy,
}

impl GenerateRequest {
    pub fn new(target: TargetPath, name: ProjectName) -> Self {
        Self {
            target,
            name,
            overwrite: OverwritePolicy::default(),
        }
    }

    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    pub fn target(&self) -> &TargetPath {
        &self.target
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(&self.name)
    }
}

/// Aggregate outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub root: PathBuf,
    pub template: String,
    pub directories_created: usize,
    pub files_written: usize,
    pub files_overwritten: usize,
    pub files_substituted: usize,
    pub bytes_written: u64,
}

/// Main generation service.
pub struct GenerateService {
    source: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(source: Box<dyn TemplateSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { source, filesystem }
    }

    pub fn template_name(&self) -> &str {
        self.source.name()
    }

    /// Render the template for `request` without touching the target.
    #[instrument(skip_all, fields(template = %self.source.name(), project = %request.name()))]
    pub fn plan(&self, request: &GenerateRequest) -> StackseedResult<ProjectStructure> {
        let tree = self.source.load()?;
        validator::validate_template(&tree)?;
        debug!(
            files = tree.file_count(),
            directories = tree.directory_count(),
            "Template loaded"
        );

        let structure = tree.render(&request.render_context(), request.target().as_path())?;
        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }

    /// Generate the project described by `request`.
    #[instrument(
        skip_all,
        fields(
            target = %request.target(),
            project = %request.name(),
            overwrite = ?request.overwrite_policy()
        )
    )]
    pub fn generate(&self, request: &GenerateRequest) -> StackseedResult<GenerateReport> {
        let root = request.target().as_path();

        // Checked before the template is even loaded so a refused run has no
        // side effects at all.
        let state = self.filesystem.inspect(root)?;
        debug!(?state, "Target inspected");

        match state {
            TargetState::NotADirectory => {
                return Err(ApplicationError::NotADirectory {
                    path: root.to_path_buf(),
                }
                .into());
            }
            TargetState::NonEmptyDirectory => match request.overwrite_policy() {
                OverwritePolicy::Fail => {
                    return Err(ApplicationError::TargetExists {
                        path: root.to_path_buf(),
                    }
                    .into());
                }
                OverwritePolicy::Overwrite => {
                    warn!(
                        path = %root.display(),
                        "Target is not empty, overwriting matching files"
                    );
                }
            },
            TargetState::Missing | TargetState::EmptyDirectory => {}
        }

        let structure = self.plan(request)?;
        let report = self.write_structure(&structure, state == TargetState::NonEmptyDirectory)?;

        info!(
            files = report.files_written,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "Project generated"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_structure(
        &self,
        structure: &ProjectStructure,
        may_overwrite: bool,
    ) -> StackseedResult<GenerateReport> {
        let mut report = GenerateReport {
            root: structure.root().to_path_buf(),
            template: self.source.name().to_string(),
            directories_created: 0,
            files_written: 0,
            files_overwritten: 0,
            files_substituted: 0,
            bytes_written: 0,
        };

        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            let path = structure.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => {
                    self.filesystem.create_dir_all(&path)?;
                    report.directories_created += 1;
                    debug!(path = %path.display(), "Created directory");
                }
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    if may_overwrite && self.filesystem.is_file(&path) {
                        report.files_overwritten += 1;
                        debug!(path = %path.display(), "Overwriting file");
                    }

                    self.filesystem.write_file(&path, &file.contents)?;
                    if file.executable {
                        self.filesystem.set_executable(&path)?;
                    }

                    report.files_written += 1;
                    report.bytes_written += file.size() as u64;
                    if file.substituted {
                        report.files_substituted += 1;
                    }
                    debug!(path = %path.display(), bytes = file.size(), "Wrote file");
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::predicate::*;

    use super::*;
    use crate::{
        application::ports::MockFilesystem,
        domain::{RelativePath, TemplateTree},
        error::{ErrorKind, StackseedError},
    };

    struct FixedSource(TemplateTree);

    impl TemplateSource for FixedSource {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn load(&self) -> StackseedResult<TemplateTree> {
            Ok(self.0.clone())
        }
    }

    fn tree() -> TemplateTree {
        TemplateTree::new("fixture")
            .with_directory(RelativePath::from_slash("tests").unwrap())
            .with_file(
                RelativePath::from_slash("README.md").unwrap(),
                b"# {{PROJECT_NAME}}".to_vec(),
            )
            .with_executable(
                RelativePath::from_slash("bin/run.sh").unwrap(),
                b"#!/bin/sh\n".to_vec(),
            )
    }

    fn request(overwrite: OverwritePolicy) -> GenerateRequest {
        GenerateRequest::new(
            TargetPath::parse("/work/demo").unwrap(),
            ProjectName::parse("Demo").unwrap(),
        )
        .overwrite(overwrite)
    }

    fn service(fs: MockFilesystem) -> GenerateService {
        GenerateService::new(Box::new(FixedSource(tree())), Box::new(fs))
    }

    #[test]
    fn non_empty_target_fails_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect()
            .with(eq(Path::new("/work/demo")))
            .returning(|_| Ok(TargetState::NonEmptyDirectory));
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let err = service(fs)
            .generate(&request(OverwritePolicy::Fail))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TargetExists);
    }

    #[test]
    fn file_at_target_is_invalid_argument() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect()
            .returning(|_| Ok(TargetState::NotADirectory));
        fs.expect_write_file().never();

        let err = service(fs)
            .generate(&request(OverwritePolicy::Overwrite))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn writes_substituted_content_and_marks_executables() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect().returning(|_| Ok(TargetState::Missing));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_is_file().never();
        fs.expect_write_file()
            .with(eq(Path::new("/work/demo/README.md")), eq(&b"# Demo"[..]))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("/work/demo/bin/run.sh")), always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_executable()
            .with(eq(Path::new("/work/demo/bin/run.sh")))
            .times(1)
            .returning(|_| Ok(()));

        let report = service(fs)
            .generate(&request(OverwritePolicy::Fail))
            .unwrap();
        assert_eq!(report.files_written, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_substituted, 1);
        assert_eq!(report.files_overwritten, 0);
        assert_eq!(report.template, "fixture");
    }

    #[test]
    fn overwrite_counts_replaced_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect()
            .returning(|_| Ok(TargetState::NonEmptyDirectory));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_is_file()
            .returning(|p| p.ends_with("README.md"));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_executable().returning(|_| Ok(()));

        let report = service(fs)
            .generate(&request(OverwritePolicy::Overwrite))
            .unwrap();
        assert_eq!(report.files_overwritten, 1);
        assert_eq!(report.files_written, 2);
    }

    #[test]
    fn io_failure_stops_the_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect().returning(|_| Ok(TargetState::Missing));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|p, _| {
            Err(ApplicationError::IoFailure {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_set_executable().never();

        let err = service(fs)
            .generate(&request(OverwritePolicy::Fail))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::IoFailure { ref path, .. })
                if path.ends_with("README.md")
        ));
    }

    #[test]
    fn plan_does_not_touch_the_filesystem() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let plan = service(fs).plan(&request(OverwritePolicy::Fail)).unwrap();
        assert_eq!(plan.entry_count(), 3);
        assert_eq!(plan.root(), Path::new("/work/demo"));
    }

    #[test]
    fn empty_template_is_rejected_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_inspect().returning(|_| Ok(TargetState::Missing));
        fs.expect_create_dir_all().never();

        let svc = GenerateService::new(
            Box::new(FixedSource(TemplateTree::new("empty"))),
            Box::new(fs),
        );
        let err = svc.generate(&request(OverwritePolicy::Fail)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTemplate);
    }

    #[test]
    fn report_serializes_for_json_output() {
        let report = GenerateReport {
            root: PathBuf::from("demo"),
            template: "fixture".into(),
            directories_created: 1,
            files_written: 2,
            files_overwritten: 0,
            files_substituted: 1,
            bytes_written: 10,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files_written"], 2);
        assert_eq!(json["root"], "demo");
    }
}
