pub mod log;

use std::path::Path;

use sugar_path::SugarPath;
use swc_core::{
    common::{comments::Comments, sync::Lrc, FileName, SourceMap},
    ecma::{
        ast::{EsVersion, Module},
        codegen::{text_writer::JsWriter, Emitter},
        parser::{parse_file_as_module, EsConfig, Syntax, TsConfig},
    },
};

use crate::{Error, Result};

/// Turns a `baseUrl`-rooted specifier into one relative to `importer`.
///
/// The target is `project_root_path/import_path`, normalized. The result
/// always uses `/` and starts with either `./` or `../`. Returns `None` when
/// `importer` has no parent directory.
pub fn relativize_path(
    importer: &Path,
    project_root_path: &Path,
    import_path: &str,
) -> Option<String> {
    let importer_dir = importer.parent()?.normalize();
    let joined = project_root_path.join(import_path);
    let absolute_import_path = joined.normalize();
    let relative_import_path = absolute_import_path.relative(&importer_dir);
    let relative_import_path = relative_import_path.to_slash_lossy();

    let relativized = if relative_import_path.is_empty() || relative_import_path == "." {
        "./".to_string()
    } else if starts_with_parent_dir(&relative_import_path) {
        relative_import_path.into_owned()
    } else {
        // Same directory or below it.
        format!("./{}", relative_import_path)
    };
    tracing::trace!(
        "relativized {:?} from {:?} to {:?}",
        import_path,
        importer,
        relativized
    );
    Some(relativized)
}

#[inline]
fn starts_with_parent_dir(path: &str) -> bool {
    path == ".." || path.starts_with("../")
}

pub fn is_declaration_file_name(file_name: &Path) -> bool {
    file_name
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
        })
}

pub fn syntax_by_file_name(file_name: &Path) -> Syntax {
    if is_declaration_file_name(file_name) {
        return Syntax::Typescript(TsConfig {
            dts: true,
            ..Default::default()
        });
    }
    let ext = file_name
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("ts");
    match ext {
        "ts" | "mts" | "cts" | "tsx" => Syntax::Typescript(TsConfig {
            tsx: ext == "tsx",
            ..Default::default()
        }),
        _ => Syntax::Es(EsConfig {
            jsx: ext == "jsx",
            ..Default::default()
        }),
    }
}

pub fn parse_file(
    cm: &Lrc<SourceMap>,
    comments: Option<&dyn Comments>,
    file_name: &Path,
    syntax: Syntax,
    source_code: String,
) -> Result<Module> {
    let fm = cm.new_source_file(FileName::Real(file_name.to_path_buf()), source_code);
    let mut recovered_errors = vec![];
    let module = parse_file_as_module(
        &fm,
        syntax,
        EsVersion::Es2022,
        comments,
        &mut recovered_errors,
    )
    .map_err(|err| Error::Parse {
        file_name: file_name.to_path_buf(),
        message: err.kind().msg().into_owned(),
    })?;
    recovered_errors.iter().for_each(|err| {
        tracing::warn!("{:?}: {}", file_name, err.kind().msg());
    });
    Ok(module)
}

pub fn print_module(
    cm: &Lrc<SourceMap>,
    comments: Option<&dyn Comments>,
    file_name: &Path,
    module: &Module,
) -> Result<String> {
    let mut buf = vec![];
    {
        let mut emitter = Emitter {
            cfg: Default::default(),
            cm: cm.clone(),
            comments,
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        emitter
            .emit_module(module)
            .map_err(|source| Error::Codegen {
                file_name: file_name.to_path_buf(),
                source,
            })?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
