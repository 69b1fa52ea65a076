mod hierarchy;
mod position;
pub(crate) mod types;
pub use types::*;

use crate::config::LayoutConfig;
use crate::index::FamilyIndex;
use crate::ir::FamilyData;

/// Run the full pipeline: index the flat records, build the forest, assign
/// generations and coordinates, and classify the flat edge list.
///
/// Never fails: malformed relations are dropped during indexing, cyclic or
/// disconnected data degrades to a best-effort forest, and empty input
/// yields an empty layout. Each call is independent; nothing is shared
/// between invocations.
pub fn compute_layout(data: &FamilyData, config: &LayoutConfig) -> Layout {
    let index = FamilyIndex::build(data);
    let mut arena = hierarchy::build_forest(&index, config);
    let (width, height) = position::assign_positions(&mut arena, config);
    let edges = collect_edges(&index);
    Layout {
        roots: arena.into_roots(),
        edges,
        width,
        height,
    }
}

/// One `parent-child` edge per surviving ordered pair, one `spouse` edge per
/// unordered pair, in input order.
fn collect_edges(index: &FamilyIndex) -> Vec<LayoutEdge> {
    let mut edges =
        Vec::with_capacity(index.parent_relations().len() + index.spouse_relations().len());
    for relation in index.parent_relations() {
        edges.push(LayoutEdge {
            kind: EdgeKind::ParentChild,
            from: relation.parent_id.clone(),
            to: relation.child_id.clone(),
        });
    }
    for relation in index.spouse_relations() {
        edges.push(LayoutEdge {
            kind: EdgeKind::Spouse,
            from: relation.spouse1_id.clone(),
            to: relation.spouse2_id.clone(),
        });
    }
    edges
}
