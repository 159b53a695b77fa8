use itertools::Itertools;

use crate::error::{CoreError, Result};
use crate::model::{Collection, Token};
use crate::reference::{token_segments, NamingOptions};
use crate::registry::NameRegistry;
use crate::tree::{Branch, Leaf, Node};

/// Nests `leaf` under `segments`, one level per segment.
pub fn nest(segments: &[String], leaf: Leaf) -> Option<Branch> {
    let (last, parents) = segments.split_last()?;
    let mut branch = Branch::new();
    branch.insert(last.clone(), Node::Leaf(leaf));
    for segment in parents.iter().rev() {
        let mut parent = Branch::new();
        parent.insert(segment.clone(), Node::Branch(branch));
        branch = parent;
    }
    Some(branch)
}

/// Builds the branch a single token contributes to a document.
///
/// The token's full key is claimed in `registry`; a collision suffix is
/// appended to the terminal segment only.
pub fn token_hierarchy(
    token: &Token,
    leaf: Leaf,
    collections: &[Collection],
    naming: &NamingOptions,
    registry: &mut NameRegistry,
) -> Result<Branch> {
    let unnamed = || CoreError::UnnamedToken {
        id: token.id.clone(),
        name: token.name.clone(),
    };
    let mut segments = token_segments(token, collections, naming);
    let flat = segments.iter().join(".");
    let last = segments.last_mut().ok_or_else(unnamed)?;
    let claimed = registry.claim(&flat);
    last.push_str(&claimed[flat.len()..]);
    nest(&segments, leaf).ok_or_else(unnamed)
}
