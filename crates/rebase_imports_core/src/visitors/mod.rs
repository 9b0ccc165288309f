mod import_rewriter;
pub use import_rewriter::*;
