use std::path::Path;

use rebase_imports::{
    log::enable_tracing_by_env, transformer_factory, Compilation, CompilerOptions,
    CustomTransformers, SourceFile, TransformerOptions,
};

fn main() -> anyhow::Result<()> {
    enable_tracing_by_env();
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/basic");
    let mut compilation = Compilation::new(CompilerOptions {
        base_url: Some(root.clone()),
        declaration: true,
        out_dir: None,
    });
    compilation.add_source_file(
        SourceFile::new(
            root.join("src/index.ts"),
            std::fs::read_to_string(root.join("src/index.ts"))?,
        )
        .with_declaration(std::fs::read_to_string(root.join("src/index.d.ts"))?),
    );

    let options = TransformerOptions::new("src");
    let transformers = CustomTransformers {
        after: vec![Box::new(transformer_factory(options.clone()))],
        after_declarations: vec![Box::new(transformer_factory(options))],
    };
    for file in compilation.emit(&transformers)? {
        println!("// {}\n{}", file.file_name.display(), file.code);
    }
    Ok(())
}
