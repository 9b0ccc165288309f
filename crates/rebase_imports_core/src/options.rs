use std::path::{Path, PathBuf};

use serde::Deserialize;
use sugar_path::SugarPath;

use crate::{Error, Result};

/// Options accepted by the transformer plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerOptions {
    /// Specifiers starting with this prefix are treated as `baseUrl`-rooted.
    pub root_dir: String,
}

impl TransformerOptions {
    pub fn new<T: Into<String>>(root_dir: T) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }
}

/// The subset of the host's compiler options the rewriter and the host care about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub base_url: Option<PathBuf>,
    #[serde(default)]
    pub declaration: bool,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

impl CompilerOptions {
    /// Reads `compilerOptions` out of a `tsconfig.json`.
    ///
    /// Relative `baseUrl` and `outDir` are resolved against the directory
    /// containing the config file.
    pub fn from_tsconfig<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: TsConfigFile =
            serde_json::from_str(&content).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;
        let config_dir = path
            .absolutize()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut options = config.compiler_options;
        options.base_url = options
            .base_url
            .map(|base_url| resolve_against(&config_dir, &base_url));
        options.out_dir = options
            .out_dir
            .map(|out_dir| resolve_against(&config_dir, &out_dir));
        tracing::trace!("compiler options from {:?}: {:?}", path, options);
        Ok(options)
    }
}

fn resolve_against(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.normalize().to_path_buf()
    } else {
        dir.join(path).normalize().to_path_buf()
    }
}
