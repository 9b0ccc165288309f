pub use rebase_imports_core::*;

/// Plugin entry point. The returned factory fits both the `after` and the
/// `after_declarations` slot of [CustomTransformers].
pub fn transformer_factory(options: TransformerOptions) -> RebaseImportsFactory {
    RebaseImportsFactory::new(options)
}

/// Entry point for hosts that hand the whole compilation to plugins.
pub fn transform(_compilation: &Compilation, options: TransformerOptions) -> RebaseImportsFactory {
    transformer_factory(options)
}
