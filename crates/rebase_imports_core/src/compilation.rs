use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;
use sugar_path::SugarPath;
use swc_core::{
    common::{comments::SingleThreadedComments, sync::Lrc, SourceMap},
    ecma::parser::{Syntax, TsConfig},
};
use tracing::instrument;

use crate::{
    is_declaration_file_name, parse_file, print_module, syntax_by_file_name, CompiledUnit,
    CompilerOptions, Error, Result, TransformationContext, Transformer, TransformerFactory,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: PathBuf,
    pub code: String,
    /// Declaration text paired with `code`, as produced by a declaration
    /// generator.
    pub declaration: Option<String>,
    /// Where `declaration` was read from, when it came from disk.
    pub declaration_file_name: Option<PathBuf>,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>, C: Into<String>>(file_name: P, code: C) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
            declaration: None,
            declaration_file_name: None,
        }
    }

    pub fn with_declaration<C: Into<String>>(mut self, declaration: C) -> Self {
        self.declaration = Some(declaration.into());
        self
    }

    fn is_declaration_file(&self) -> bool {
        is_declaration_file_name(&self.file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmitKind {
    Code,
    Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub file_name: PathBuf,
    pub code: String,
    pub kind: EmitKind,
}

/// Transformers plugged into the two emission phases.
#[derive(Default)]
pub struct CustomTransformers {
    pub after: Vec<Box<dyn TransformerFactory>>,
    pub after_declarations: Vec<Box<dyn TransformerFactory>>,
}

#[derive(Debug, Default)]
pub struct Compilation {
    pub options: Arc<CompilerOptions>,
    source_files: Vec<SourceFile>,
}

impl TransformationContext for Compilation {
    fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }
}

impl Compilation {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options: Arc::new(options),
            source_files: Default::default(),
        }
    }

    /// Reads every path from disk. With `declaration` enabled, a `.d.ts`
    /// lying next to a source file is taken as its declaration text.
    pub fn from_files<I, P>(options: CompilerOptions, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut compilation = Self::new(options);
        for path in paths {
            let file_name = path.as_ref().absolutize().to_path_buf();
            let mut source_file = SourceFile::new(&file_name, std::fs::read_to_string(&file_name)?);
            if compilation.options.declaration && !source_file.is_declaration_file() {
                let declaration_path = declaration_file_name(&file_name);
                if declaration_path.is_file() {
                    source_file.declaration = Some(std::fs::read_to_string(&declaration_path)?);
                    source_file.declaration_file_name = Some(declaration_path);
                }
            }
            compilation.add_source_file(source_file);
        }
        Ok(compilation)
    }

    pub fn add_source_file(&mut self, source_file: SourceFile) {
        self.source_files.push(source_file);
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }

    /// Runs both emission phases and returns the output in input order.
    ///
    /// Every factory is instantiated before the first unit is parsed, so a
    /// factory error aborts the emit with nothing produced. Output paths are
    /// checked before returning: no output may replace an input file or
    /// another output.
    #[instrument(skip_all)]
    pub fn emit(&self, transformers: &CustomTransformers) -> Result<Vec<EmittedFile>> {
        let after = self.create_transformers(&transformers.after)?;
        let after_declarations = if self.options.declaration {
            self.create_transformers(&transformers.after_declarations)?
        } else {
            vec![]
        };
        let root = self.output_root();
        let root = root.as_deref();

        let emitted = self
            .source_files
            .par_iter()
            .filter(|source_file| !source_file.is_declaration_file())
            .map(|source_file| -> Result<Vec<EmittedFile>> {
                let mut emitted = vec![self.emit_unit(
                    &source_file.file_name,
                    source_file.code.clone(),
                    EmitKind::Code,
                    &after,
                    root,
                )?];
                if let Some(declaration) = source_file
                    .declaration
                    .as_ref()
                    .filter(|_| self.options.declaration)
                {
                    emitted.push(self.emit_unit(
                        &source_file.file_name,
                        declaration.clone(),
                        EmitKind::Declaration,
                        &after_declarations,
                        root,
                    )?);
                }
                Ok(emitted)
            })
            .collect::<Result<Vec<_>>>()?;

        let emitted = emitted.into_iter().flatten().collect::<Vec<_>>();
        self.check_output_file_names(&emitted)?;
        Ok(emitted)
    }

    /// [Compilation::emit] followed by writing every file to disk.
    pub fn write(&self, transformers: &CustomTransformers) -> Result<Vec<EmittedFile>> {
        let emitted = self.emit(transformers)?;
        for file in &emitted {
            if let Some(dir) = file.file_name.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&file.file_name, &file.code)?;
            tracing::trace!("wrote {:?}", file.file_name);
        }
        Ok(emitted)
    }

    fn create_transformers(
        &self,
        factories: &[Box<dyn TransformerFactory>],
    ) -> Result<Vec<Box<dyn Transformer>>> {
        factories.iter().map(|factory| factory.create(self)).collect()
    }

    fn emit_unit(
        &self,
        source_name: &Path,
        code: String,
        kind: EmitKind,
        transformers: &[Box<dyn Transformer>],
        root: Option<&Path>,
    ) -> Result<EmittedFile> {
        let cm: Lrc<SourceMap> = Default::default();
        let comments = SingleThreadedComments::default();
        let syntax = match kind {
            EmitKind::Code => syntax_by_file_name(source_name),
            EmitKind::Declaration => Syntax::Typescript(TsConfig {
                dts: true,
                ..Default::default()
            }),
        };
        let module = parse_file(&cm, Some(&comments), source_name, syntax, code)?;
        let unit = transformers
            .iter()
            .fold(CompiledUnit::new(source_name, module), |unit, transformer| {
                transformer.transform(unit)
            });
        let code = print_module(&cm, Some(&comments), unit.file_name(), &unit.module)?;
        let file_name = self.output_file_name(unit.file_name(), kind, root)?;
        tracing::trace!("emitted {:?} from {:?}", file_name, unit.file_name());
        Ok(EmittedFile {
            file_name,
            code,
            kind,
        })
    }

    /// The directory that maps onto `out_dir`: `base_url` when set, otherwise
    /// the deepest directory holding every source file.
    fn output_root(&self) -> Option<PathBuf> {
        self.options.out_dir.as_ref()?;
        self.options
            .base_url
            .as_ref()
            .filter(|base_url| !base_url.as_os_str().is_empty())
            .map(|base_url| base_url.absolutize().to_path_buf())
            .or_else(|| {
                common_dir(
                    self.source_files()
                        .iter()
                        .filter(|source_file| !source_file.is_declaration_file())
                        .map(|source_file| source_file.file_name.absolutize().to_path_buf()),
                )
            })
    }

    fn output_file_name(
        &self,
        source_name: &Path,
        kind: EmitKind,
        root: Option<&Path>,
    ) -> Result<PathBuf> {
        let file_name = match kind {
            EmitKind::Code => code_file_name(source_name),
            EmitKind::Declaration => declaration_file_name(source_name),
        };
        match (&self.options.out_dir, root) {
            (Some(out_dir), Some(root)) => {
                let relative = file_name.relative(root);
                if matches!(relative.components().next(), Some(Component::ParentDir)) {
                    return Err(Error::OutsideRootDir {
                        file_name: source_name.to_path_buf(),
                        root_dir: root.to_path_buf(),
                    });
                }
                Ok(out_dir.join(relative).normalize().to_path_buf())
            }
            _ => Ok(file_name),
        }
    }

    fn check_output_file_names(&self, emitted: &[EmittedFile]) -> Result<()> {
        let inputs = self
            .source_files()
            .iter()
            .flat_map(|source_file| {
                std::iter::once(&source_file.file_name).chain(&source_file.declaration_file_name)
            })
            .map(|file_name| file_name.absolutize().to_path_buf())
            .collect::<HashSet<_>>();
        let mut outputs = HashSet::with_capacity(emitted.len());
        for file in emitted {
            let file_name = file.file_name.absolutize().to_path_buf();
            if inputs.contains(&file_name) {
                return Err(Error::OverwritesInput { file_name });
            }
            if !outputs.insert(file_name.clone()) {
                return Err(Error::DuplicateOutput { file_name });
            }
        }
        Ok(())
    }
}

/// Longest directory shared by the parents of every file name.
fn common_dir<I>(file_names: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    file_names
        .into_iter()
        .filter_map(|file_name| file_name.parent().map(Path::to_path_buf))
        .reduce(|common, dir| {
            common
                .components()
                .zip(dir.components())
                .take_while(|(a, b)| a == b)
                .map(|(component, _)| component)
                .collect()
        })
}

fn code_file_name(source_name: &Path) -> PathBuf {
    let ext = match source_name.extension().and_then(|ext| ext.to_str()) {
        Some("mts" | "mjs") => "mjs",
        Some("cts" | "cjs") => "cjs",
        _ => "js",
    };
    source_name.with_extension(ext)
}

fn declaration_file_name(source_name: &Path) -> PathBuf {
    let ext = match source_name.extension().and_then(|ext| ext.to_str()) {
        Some("mts") => "d.mts",
        Some("cts") => "d.cts",
        _ => "d.ts",
    };
    source_name.with_extension(ext)
}
