//! Generation service - the main application orchestrator.
//!
//! Coordinates one run:
//! 1. Check the model path against the location contracts
//! 2. Extract the Structural Model
//! 3. Run each selected generator in layer order
//! 4. Write every artifact set through the filesystem port
//!
//! A failing generator or write is recorded against its layer and the run
//! continues, unless the request asks to stop at the first failure.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        generators::{ArtifactGenerator, GenerationError, default_generators},
        ports::Filesystem,
    },
    domain::{
        ArtifactEntry, ArtifactSet, DEFAULT_ANCHOR, DomainValidator as validator, Extractor, Layer,
        MigrationSettings, Placement, PlacementConfig, ProjectLayout, StructuralModel,
    },
    error::StratumResult,
};

/// Everything one generation run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model_path: PathBuf,
    pub placement: Placement,
    pub migration: MigrationSettings,
    /// Marker directory below the domain project.
    pub anchor: String,
    pub db_context: Option<String>,
    /// Layers to run; empty means all.
    pub layers: Vec<Layer>,
    /// Compute artifacts without writing them.
    pub dry_run: bool,
    /// Stop after the first failed layer.
    pub fail_fast: bool,
}

impl GenerationRequest {
    pub fn new(
        model_path: impl Into<PathBuf>,
        placement: Placement,
        migration: MigrationSettings,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            placement,
            migration,
            anchor: DEFAULT_ANCHOR.to_string(),
            db_context: None,
            layers: Vec::new(),
            dry_run: false,
            fail_fast: false,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    pub fn with_db_context(mut self, db_context: impl Into<String>) -> Self {
        self.db_context = Some(db_context.into());
        self
    }

    pub fn only(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers = layers.into_iter().collect();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Selected layers, deduplicated, in layer order.
    pub fn selected_layers(&self) -> Vec<Layer> {
        if self.layers.is_empty() {
            return Layer::ALL.to_vec();
        }
        let mut layers = self.layers.clone();
        layers.sort();
        layers.dedup();
        layers
    }
}

/// What happened to one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LayerOutcome {
    /// Files were written.
    Written { files: Vec<PathBuf> },
    /// Dry run: files that would be written.
    Planned { files: Vec<PathBuf> },
    /// Generation or writing failed; nothing further was written for this layer.
    Failed {
        #[serde(serialize_with = "as_display")]
        error: ApplicationError,
    },
    /// Not run because an earlier layer failed under fail-fast.
    Skipped,
}

fn as_display<S: serde::Serializer>(error: &ApplicationError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerReport {
    pub layer: Layer,
    #[serde(flatten)]
    pub outcome: LayerOutcome,
}

/// Result of a generation run, one entry per selected layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub model: String,
    pub plural: String,
    pub placement: Placement,
    pub dry_run: bool,
    pub layers: Vec<LayerReport>,
}

impl GenerationReport {
    /// True when no layer failed or was skipped.
    pub fn is_success(&self) -> bool {
        self.layers.iter().all(|l| {
            matches!(
                l.outcome,
                LayerOutcome::Written { .. } | LayerOutcome::Planned { .. }
            )
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (Layer, &ApplicationError)> {
        self.layers.iter().filter_map(|l| match &l.outcome {
            LayerOutcome::Failed { error } => Some((l.layer, error)),
            _ => None,
        })
    }

    /// Files written, or planned on a dry run.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.layers.iter().flat_map(|l| match &l.outcome {
            LayerOutcome::Written { files } | LayerOutcome::Planned { files } => files.as_slice(),
            LayerOutcome::Failed { .. } | LayerOutcome::Skipped => &[][..],
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn outcome(&self, layer: Layer) -> Option<&LayerOutcome> {
        self.layers
            .iter()
            .find(|l| l.layer == layer)
            .map(|l| &l.outcome)
    }
}

/// Main generation service.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    extractor: Extractor,
    generators: Vec<Box<dyn ArtifactGenerator>>,
}

impl GenerationService {
    /// Create a service with the standard generator for every layer.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use stratum_core::application::{GenerationRequest, GenerationService, ports::Filesystem};
    /// use stratum_core::domain::{MigrationSettings, Placement};
    ///
    /// # fn run(filesystem: Box<dyn Filesystem>) -> stratum_core::error::StratumResult<()> {
    /// let service = GenerationService::new(filesystem);
    /// let request = GenerationRequest::new(
    ///     "src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs",
    ///     Placement::Shared,
    ///     MigrationSettings::new("ayse", "202401151030"),
    /// );
    /// let report = service.generate(&request)?;
    /// assert!(report.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self::with_generators(filesystem, default_generators())
    }

    /// Create a service with an explicit generator list.
    pub fn with_generators(
        filesystem: Box<dyn Filesystem>,
        generators: Vec<Box<dyn ArtifactGenerator>>,
    ) -> Self {
        Self {
            filesystem,
            extractor: Extractor::new(),
            generators,
        }
    }

    /// Read and extract the model after checking its location.
    ///
    /// Fails before anything is written when the file is missing or sits in
    /// the wrong directory.
    #[instrument(skip_all, fields(model_path = %model_path.display()))]
    pub fn inspect(&self, model_path: &Path) -> StratumResult<StructuralModel> {
        if !self.filesystem.exists(model_path) {
            return Err(ApplicationError::SourceNotFound {
                path: model_path.to_path_buf(),
            }
            .into());
        }

        let name = validator::model_name_from_path(model_path)?;
        validator::validate_model_location(&name, model_path)?;

        let source = self.filesystem.read_to_string(model_path)?;
        let model = self.extractor.extract(name, &source);
        debug!(
            model = model.name(),
            properties = model.properties().len(),
            navigations = model.navigations().len(),
            id_type = %model.id_type(),
            multi_language = model.has_multi_language(),
            "model extracted"
        );
        Ok(model)
    }

    /// Generate every selected layer for one model.
    ///
    /// Returns `Err` only for precondition failures; per-layer failures are
    /// reported in the [`GenerationReport`].
    #[instrument(
        skip_all,
        fields(
            model_path = %request.model_path.display(),
            placement = %request.placement,
            dry_run = request.dry_run
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> StratumResult<GenerationReport> {
        let model = self.inspect(&request.model_path)?;
        let layout = ProjectLayout::resolve(&request.model_path, &request.anchor)?;
        layout.validate()?;

        let mut config =
            PlacementConfig::new(layout, request.placement, request.migration.clone());
        if let Some(db_context) = &request.db_context {
            config = config.with_db_context(db_context);
        }

        info!(model = model.name(), "Generating layers");
        let layers = self.run(&model, &config, request);

        Ok(GenerationReport {
            model: model.name().to_string(),
            plural: model.plural().to_string(),
            placement: request.placement,
            dry_run: request.dry_run,
            layers,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
        request: &GenerationRequest,
    ) -> Vec<LayerReport> {
        let selected = request.selected_layers();
        let mut reports = Vec::with_capacity(selected.len());
        let mut stopped = false;

        for generator in self
            .generators
            .iter()
            .filter(|g| selected.contains(&g.layer()))
        {
            let layer = generator.layer();
            if stopped {
                reports.push(LayerReport {
                    layer,
                    outcome: LayerOutcome::Skipped,
                });
                continue;
            }

            let outcome = match self.run_one(generator.as_ref(), model, config, request.dry_run) {
                Ok(files) if request.dry_run => LayerOutcome::Planned { files },
                Ok(files) => {
                    info!(%layer, files = files.len(), "Layer written");
                    LayerOutcome::Written { files }
                }
                Err(error) => {
                    warn!(%layer, %error, "Layer failed");
                    stopped = request.fail_fast;
                    LayerOutcome::Failed { error }
                }
            };
            reports.push(LayerReport { layer, outcome });
        }
        reports
    }

    fn run_one(
        &self,
        generator: &dyn ArtifactGenerator,
        model: &StructuralModel,
        config: &PlacementConfig,
        dry_run: bool,
    ) -> Result<Vec<PathBuf>, ApplicationError> {
        let set = generator
            .generate(model, config)
            .map_err(|e| generation_failed(e, config))?;

        if dry_run {
            return Ok(set.file_paths());
        }
        self.write_set(generator.layer(), &set)
    }

    /// Write all entries of a set. Files already written stay in place if a
    /// later write fails.
    fn write_set(&self, layer: Layer, set: &ArtifactSet) -> Result<Vec<PathBuf>, ApplicationError> {
        let failed = |path: &Path, reason: String| ApplicationError::GenerationFailed {
            layer,
            path: path.to_path_buf(),
            reason,
        };

        self.filesystem
            .create_dir_all(set.root())
            .map_err(|e| failed(set.root(), e.to_string()))?;

        let mut written = Vec::new();
        for entry in set.entries() {
            let path = set.root().join(entry.path());
            match entry {
                ArtifactEntry::Directory(_) => {
                    self.filesystem
                        .create_dir_all(&path)
                        .map_err(|e| failed(&path, e.to_string()))?;
                }
                ArtifactEntry::File(artifact) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem
                            .create_dir_all(parent)
                            .map_err(|e| failed(parent, e.to_string()))?;
                    }
                    self.filesystem
                        .write_file(&path, &artifact.content)
                        .map_err(|e| failed(&path, e.to_string()))?;
                    debug!(path = %path.display(), bytes = artifact.size(), "Wrote file");
                    written.push(path);
                }
            }
        }
        Ok(written)
    }
}

fn generation_failed(error: GenerationError, config: &PlacementConfig) -> ApplicationError {
    let path = error
        .path()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.layout.model_path().to_path_buf());
    ApplicationError::GenerationFailed {
        layer: error.layer(),
        path,
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::StratumError;

    const MODEL_PATH: &str = "/repo/src/Bapsis.Api.Domain/AggregateRoots/Categories/Category.cs";
    const SOURCE: &str = r#"
        public class Category : AuditEntity<int>, IMultiLanguageEntity<CategoryLanguage>
        {
            public string Title { get; private set; }
            public int? Order { get; private set; }
        }
    "#;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            MODEL_PATH,
            Placement::Shared,
            MigrationSettings::new("ayse", "202401151030"),
        )
    }

    fn readable_source(mock: &mut MockFilesystem) {
        mock.expect_exists().returning(|_| true);
        mock.expect_read_to_string()
            .returning(|_| Ok(SOURCE.to_string()));
    }

    #[test]
    fn missing_source_is_reported_before_anything_runs() {
        let mut mock = MockFilesystem::new();
        mock.expect_exists().returning(|_| false);
        mock.expect_write_file().never();

        let service = GenerationService::new(Box::new(mock));
        let err = service.generate(&request()).unwrap_err();
        assert!(matches!(
            err,
            StratumError::Application(ApplicationError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn directory_mismatch_writes_nothing() {
        let mut mock = MockFilesystem::new();
        mock.expect_exists().returning(|_| true);
        mock.expect_read_to_string().never();
        mock.expect_write_file().never();

        let service = GenerationService::new(Box::new(mock));
        let req = GenerationRequest::new(
            "/repo/src/Bapsis.Api.Domain/AggregateRoots/Categorys/Category.cs",
            Placement::Shared,
            MigrationSettings::new("ayse", "202401151030"),
        );
        let err = service.generate(&req).unwrap_err();
        assert!(matches!(
            err,
            StratumError::Domain(DomainError::DirectoryMismatch { .. })
        ));
    }

    #[test]
    fn project_without_domain_suffix_writes_nothing() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().never();
        mock.expect_write_file().never();

        let service = GenerationService::new(Box::new(mock));
        let req = GenerationRequest::new(
            "/repo/src/Core/AggregateRoots/Categories/Category.cs",
            Placement::Shared,
            MigrationSettings::new("ayse", "202401151030"),
        );
        let err = service.generate(&req).unwrap_err();
        assert!(matches!(
            err,
            StratumError::Domain(DomainError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn write_failure_is_isolated_to_its_layer() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_write_file().returning(|path, _| {
            if path.to_string_lossy().contains("Repositories") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let service = GenerationService::new(Box::new(mock));
        let report = service.generate(&request()).unwrap();

        assert!(!report.is_success());
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, Layer::Repository);
        assert!(failures[0].1.to_string().contains("disk full"));

        for layer in [Layer::Domain, Layer::Application, Layer::Controller, Layer::Migration, Layer::UnitTest] {
            assert!(matches!(
                report.outcome(layer),
                Some(LayerOutcome::Written { .. })
            ));
        }
    }

    #[test]
    fn fail_fast_skips_remaining_layers() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_write_file().returning(|path, _| {
            if path.to_string_lossy().contains("Repositories") {
                Err(ApplicationError::LockPoisoned.into())
            } else {
                Ok(())
            }
        });

        let service = GenerationService::new(Box::new(mock));
        let report = service.generate(&request().fail_fast(true)).unwrap();
        assert!(matches!(report.outcome(Layer::Domain), Some(LayerOutcome::Written { .. })));
        assert!(matches!(report.outcome(Layer::Repository), Some(LayerOutcome::Failed { .. })));
        assert_eq!(report.outcome(Layer::UnitTest), Some(&LayerOutcome::Skipped));
    }

    #[test]
    fn dry_run_plans_without_writing() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().never();
        mock.expect_write_file().never();

        let service = GenerationService::new(Box::new(mock));
        let report = service.generate(&request().dry_run(true)).unwrap();
        assert!(report.is_success());
        assert!(report.file_count() > 0);
        assert!(matches!(report.outcome(Layer::Migration), Some(LayerOutcome::Planned { .. })));
    }

    #[test]
    fn only_runs_selected_layers_in_order() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_write_file().returning(|_, _| Ok(()));

        let service = GenerationService::new(Box::new(mock));
        let report = service
            .generate(&request().only([Layer::Migration, Layer::Domain, Layer::Migration]))
            .unwrap();
        let layers: Vec<Layer> = report.layers.iter().map(|l| l.layer).collect();
        assert_eq!(layers, vec![Layer::Domain, Layer::Migration]);
    }

    #[test]
    fn render_failure_names_the_layer() {
        let mut mock = MockFilesystem::new();
        readable_source(&mut mock);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_write_file().returning(|_, _| Ok(()));

        let service = GenerationService::new(Box::new(mock));
        let req = GenerationRequest::new(
            MODEL_PATH,
            Placement::Shared,
            MigrationSettings::new("not valid", "202401151030"),
        );
        let report = service.generate(&req).unwrap();
        let (layer, error) = report.failures().next().unwrap();
        assert_eq!(layer, Layer::Migration);
        assert!(matches!(error, ApplicationError::GenerationFailed { layer: Layer::Migration, .. }));
    }

    #[test]
    fn report_serializes_outcomes_with_status_tag() {
        let report = GenerationReport {
            model: "Category".into(),
            plural: "Categories".into(),
            placement: Placement::Shared,
            dry_run: false,
            layers: vec![
                LayerReport {
                    layer: Layer::UnitTest,
                    outcome: LayerOutcome::Skipped,
                },
                LayerReport {
                    layer: Layer::Domain,
                    outcome: LayerOutcome::Failed {
                        error: ApplicationError::LockPoisoned,
                    },
                },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["layers"][0]["layer"], "unit-test");
        assert_eq!(json["layers"][0]["status"], "skipped");
        assert_eq!(json["layers"][1]["error"], "Filesystem adapter lock poisoned");
        assert_eq!(json["placement"]["area"], "shared");
    }
}
