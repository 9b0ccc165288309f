use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rebase_imports::{
    is_declaration_file_name, transformer_factory, Compilation, CompilerOptions,
    CustomTransformers, TransformerOptions,
};

const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "mts", "cts"];

// Directories of a fixture that never hold inputs.
const SKIPPED_DIRS: [&str; 2] = ["expected", "dist"];

pub fn transformers(options: &TransformerOptions) -> CustomTransformers {
    CustomTransformers {
        after: vec![Box::new(transformer_factory(options.clone()))],
        after_declarations: vec![Box::new(transformer_factory(options.clone()))],
    }
}

pub fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let mut entries = std::fs::read_dir(dir)
        .unwrap()
        .flat_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect_files(&path, files);
        } else {
            files.push(path);
        }
    }
}

pub fn is_source_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    !is_declaration_file_name(path) && SOURCE_EXTENSIONS.contains(&ext)
}

pub fn test_fixture(tsconfig: &Path) {
    let fixture_dir = tsconfig.parent().unwrap();
    let options = CompilerOptions::from_tsconfig(tsconfig).unwrap();
    let transformer_options: TransformerOptions = serde_json::from_str(
        &std::fs::read_to_string(fixture_dir.join("transformer.json")).unwrap(),
    )
    .unwrap();

    let mut sources = vec![];
    std::fs::read_dir(fixture_dir)
        .unwrap()
        .flat_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && !SKIPPED_DIRS
                    .iter()
                    .any(|skipped| path.file_name().is_some_and(|name| name == *skipped))
        })
        .for_each(|dir| collect_files(&dir, &mut sources));
    sources.retain(|path| is_source_file(path));
    sources.sort();

    let compilation = Compilation::from_files(options.clone(), &sources).unwrap();
    let emitted = compilation
        .emit(&transformers(&transformer_options))
        .unwrap();

    let output_root = options
        .out_dir
        .clone()
        .or_else(|| options.base_url.clone())
        .unwrap();
    let expected_dir = fixture_dir.join("expected");
    let mut expected_files = vec![];
    collect_files(&expected_dir, &mut expected_files);
    let mut expected = expected_files
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path).unwrap();
            (path.strip_prefix(&expected_dir).unwrap().to_path_buf(), content)
        })
        .collect::<HashMap<_, _>>();

    emitted.iter().for_each(|file| {
        let relative = file.file_name.strip_prefix(&output_root).unwrap();
        let expected_code = expected.remove(relative).unwrap_or_else(|| {
            panic!(
                "fixture {:?} emits {:?} which has no expected output",
                fixture_dir, relative
            )
        });
        assert_eq!(
            file.code.trim(),
            expected_code.trim(),
            "fixture {:?}, file {:?}",
            fixture_dir,
            relative
        );
    });
    assert!(
        expected.is_empty(),
        "files {:?} are not emitted",
        expected.keys().collect::<Vec<_>>()
    );
}
