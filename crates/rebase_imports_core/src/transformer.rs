use std::{path::PathBuf, sync::Arc};

use sugar_path::SugarPath;

use crate::{rebase_imports, CompiledUnit, CompilerOptions, Error, Result, TransformerOptions};

/// Resolution settings shared by every unit of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub root_prefix: String,
    /// Absolute, normalized `baseUrl`.
    pub project_root_path: PathBuf,
}

/// What a transformer factory may ask of the host.
pub trait TransformationContext {
    fn compiler_options(&self) -> &CompilerOptions;
}

impl TransformationContext for CompilerOptions {
    fn compiler_options(&self) -> &CompilerOptions {
        self
    }
}

pub trait Transformer: Send + Sync {
    fn transform(&self, unit: CompiledUnit) -> CompiledUnit;
}

impl<F> Transformer for F
where
    F: Fn(CompiledUnit) -> CompiledUnit + Send + Sync,
{
    fn transform(&self, unit: CompiledUnit) -> CompiledUnit {
        self(unit)
    }
}

/// Invoked once per emission phase; the returned transformer then runs on
/// every unit of that phase.
pub trait TransformerFactory: Send + Sync {
    fn create(&self, ctx: &dyn TransformationContext) -> Result<Box<dyn Transformer>>;
}

impl<F> TransformerFactory for F
where
    F: Fn(&dyn TransformationContext) -> Result<Box<dyn Transformer>> + Send + Sync,
{
    fn create(&self, ctx: &dyn TransformationContext) -> Result<Box<dyn Transformer>> {
        self(ctx)
    }
}

#[derive(Debug, Clone)]
pub struct RebaseImportsFactory {
    pub options: TransformerOptions,
}

impl RebaseImportsFactory {
    pub fn new(options: TransformerOptions) -> Self {
        Self { options }
    }

    pub fn resolution_config(&self, ctx: &dyn TransformationContext) -> Result<ResolutionConfig> {
        let base_url = ctx
            .compiler_options()
            .base_url
            .as_ref()
            .filter(|base_url| !base_url.as_os_str().is_empty())
            .ok_or(Error::MissingBaseUrl)?;
        Ok(ResolutionConfig {
            root_prefix: self.options.root_dir.clone(),
            project_root_path: base_url.absolutize().to_path_buf(),
        })
    }
}

impl TransformerFactory for RebaseImportsFactory {
    fn create(&self, ctx: &dyn TransformationContext) -> Result<Box<dyn Transformer>> {
        let config = self.resolution_config(ctx)?;
        tracing::debug!("resolution config {:?}", config);
        Ok(Box::new(RebaseImports {
            config: Arc::new(config),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct RebaseImports {
    config: Arc<ResolutionConfig>,
}

impl Transformer for RebaseImports {
    fn transform(&self, unit: CompiledUnit) -> CompiledUnit {
        rebase_imports(unit, &self.config)
    }
}
