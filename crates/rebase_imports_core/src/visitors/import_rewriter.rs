use std::path::Path;

use swc_core::ecma::{
    ast::{ExportAll, ImportDecl, NamedExport, Str, TsExternalModuleRef},
    visit::{Fold, FoldWith},
};

use crate::{relativize_path, CompiledUnit, ResolutionConfig};

/// Rewrites `baseUrl`-rooted specifiers of one unit into relative ones.
///
/// Handles `import ... from`, `export ... from`, `export * from` and
/// `import x = require(...)`. Nodes nested in `declare module` and
/// `namespace` bodies are reached through the default traversal.
pub struct ImportRewriter<'a> {
    pub config: &'a ResolutionConfig,
    pub file_name: &'a Path,
}

impl<'a> ImportRewriter<'a> {
    pub fn new(config: &'a ResolutionConfig, file_name: &'a Path) -> Self {
        Self { config, file_name }
    }

    fn relative_specifier(&self, src: &Str) -> Option<Str> {
        if !src.value.starts_with(self.config.root_prefix.as_str()) {
            return None;
        }
        let relative =
            relativize_path(self.file_name, &self.config.project_root_path, &src.value)?;
        tracing::debug!(
            "{:?}: rewrite {:?} -> {:?}",
            self.file_name,
            src.value,
            relative
        );
        Some(Str {
            span: src.span,
            value: relative.into(),
            raw: None,
        })
    }

    fn rebase(&self, src: Box<Str>) -> Box<Str> {
        match self.relative_specifier(&src) {
            Some(relative) => Box::new(relative),
            None => src,
        }
    }
}

impl Fold for ImportRewriter<'_> {
    fn fold_import_decl(&mut self, node: ImportDecl) -> ImportDecl {
        ImportDecl {
            src: self.rebase(node.src),
            ..node
        }
    }

    fn fold_named_export(&mut self, node: NamedExport) -> NamedExport {
        NamedExport {
            src: node.src.map(|src| self.rebase(src)),
            ..node
        }
    }

    fn fold_export_all(&mut self, node: ExportAll) -> ExportAll {
        ExportAll {
            src: self.rebase(node.src),
            ..node
        }
    }

    fn fold_ts_external_module_ref(&mut self, node: TsExternalModuleRef) -> TsExternalModuleRef {
        match self.relative_specifier(&node.expr) {
            Some(expr) => TsExternalModuleRef { expr, ..node },
            None => node,
        }
    }
}

/// Runs [ImportRewriter] over a whole unit.
pub fn rebase_imports(unit: CompiledUnit, config: &ResolutionConfig) -> CompiledUnit {
    let CompiledUnit { file_name, module } = unit;
    let module = module.fold_with(&mut ImportRewriter::new(config, &file_name));
    CompiledUnit { file_name, module }
}
