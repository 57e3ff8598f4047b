pub mod literal;
pub mod sample;
pub mod text;
mod types;

pub use literal::{TreeError, parse_literal};
pub use text::{ParseWarning, ParsedTree, ROOT_LABEL, parse_tree};
pub use types::*;

/// Builds a tree from either source format: a JSON literal when the source
/// starts with `{`, indented text otherwise.
pub fn load_source(source: &str) -> Result<ParsedTree, TreeError> {
    if source.trim_start().starts_with('{') {
        let tree = parse_literal(source)?;
        Ok(ParsedTree {
            tree,
            warnings: Vec::new(),
        })
    } else {
        Ok(parse_tree(source))
    }
}
