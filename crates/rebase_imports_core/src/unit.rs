use std::path::{Path, PathBuf};

use swc_core::ecma::ast::Module;

/// One source file flowing through a transform pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    /// Absolute path of the source file.
    pub file_name: PathBuf,
    pub module: Module,
}

impl CompiledUnit {
    pub fn new<P: Into<PathBuf>>(file_name: P, module: Module) -> Self {
        Self {
            file_name: file_name.into(),
            module,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }
}
