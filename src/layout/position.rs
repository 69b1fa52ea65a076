use crate::config::LayoutConfig;

use super::hierarchy::Arena;
use super::types::NodeKind;

/// Assign every arena node its generation row and horizontal slot, returning
/// the bounding (width, height).
///
/// Vertical: `y = base_offset + generation * generation_spacing`, plus an
/// optional deterministic stagger for siblings (cosmetic only). Horizontal:
/// subtree spans are computed bottom-up, leaves take the center of their
/// slot, and every parent is centered over the midpoint of its first and
/// last child. Couple nodes span two cards plus the marriage gap; siblings
/// are separated by the sibling gap and whole trees by the tree gap.
pub(super) fn assign_positions(arena: &mut Arena, config: &LayoutConfig) -> (f32, f32) {
    let count = arena.nodes.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    // Bottom-up subtree spans. Children always sit at higher indices, so a
    // reverse index walk sees them before their parent.
    let mut spans = vec![0.0f32; count];
    for idx in (0..count).rev() {
        let node = &arena.nodes[idx];
        let own = node_width(&node.kind, config);
        let children_span = children_span(&node.children, &spans, config.sibling_gap);
        spans[idx] = own.max(children_span);
    }

    // Top-down slot assignment: roots left to right, children centered
    // within their parent's span.
    let mut starts = vec![0.0f32; count];
    let mut jitter = vec![0.0f32; count];
    let mut cursor = config.margin;
    for &root in &arena.roots {
        starts[root] = cursor;
        cursor += spans[root] + config.tree_gap;
    }
    for idx in 0..count {
        let children = arena.nodes[idx].children.clone();
        if children.is_empty() {
            continue;
        }
        let block = children_span(&children, &spans, config.sibling_gap);
        let mut child_cursor = starts[idx] + (spans[idx] - block) / 2.0;
        for (slot, &child) in children.iter().enumerate() {
            starts[child] = child_cursor;
            jitter[child] = (slot as i32 % 3 - 1) as f32 * config.sibling_jitter;
            child_cursor += spans[child] + config.sibling_gap;
        }
    }

    // Bottom-up centering: leaves at their slot center, parents over the
    // midpoint of their children.
    for idx in (0..count).rev() {
        let node = &arena.nodes[idx];
        let x = match (node.children.first(), node.children.last()) {
            (Some(&first), Some(&last)) => (arena.nodes[first].x + arena.nodes[last].x) / 2.0,
            _ => starts[idx] + spans[idx] / 2.0,
        };
        let node = &mut arena.nodes[idx];
        node.x = x;
        node.y = config.base_offset
            + node.generation as f32 * config.generation_spacing
            + jitter[idx];
    }

    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in &arena.nodes {
        max_x = max_x.max(node.x + node_width(&node.kind, config) / 2.0);
        max_y = max_y.max(node.y);
    }
    (max_x + config.margin, max_y + config.card_height)
}

fn node_width(kind: &NodeKind, config: &LayoutConfig) -> f32 {
    if kind.is_couple() {
        config.card_width * 2.0 + config.marriage_gap
    } else {
        config.card_width
    }
}

fn children_span(children: &[usize], spans: &[f32], gap: f32) -> f32 {
    if children.is_empty() {
        return 0.0;
    }
    let total: f32 = children.iter().map(|&child| spans[child]).sum();
    total + gap * (children.len() as f32 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FamilyIndex;
    use crate::ir::{FamilyData, ParentChildKind, ParentChildRelation, Person};
    use crate::layout::hierarchy::build_forest;
    use crate::layout::types::TreeNode;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            first_name: id.to_uppercase(),
            last_name: None,
            birth_date: None,
            death_date: None,
            gender: Default::default(),
            bio: None,
            image_url: None,
        }
    }

    fn parent_child(parent: &str, child: &str) -> ParentChildRelation {
        ParentChildRelation {
            parent_id: parent.to_string(),
            child_id: child.to_string(),
            kind: ParentChildKind::Biological,
        }
    }

    fn positioned(data: &FamilyData, config: &LayoutConfig) -> Vec<TreeNode> {
        let index = FamilyIndex::build(data);
        let mut arena = build_forest(&index, config);
        assign_positions(&mut arena, config);
        arena.into_roots()
    }

    #[test]
    fn parent_is_centered_over_children() {
        let data = FamilyData {
            people: vec![person("p"), person("a"), person("b"), person("c")],
            parent_child: vec![
                parent_child("p", "a"),
                parent_child("p", "b"),
                parent_child("p", "c"),
            ],
            spouses: Vec::new(),
        };
        let config = LayoutConfig::default();
        let roots = positioned(&data, &config);
        let parent = &roots[0];
        let first = &parent.children[0];
        let last = &parent.children[2];
        assert_eq!(parent.x, (first.x + last.x) / 2.0);
        // Siblings keep the configured gap between card centers.
        assert_eq!(
            parent.children[1].x - first.x,
            config.card_width + config.sibling_gap
        );
    }

    #[test]
    fn rows_follow_generation_spacing() {
        let data = FamilyData {
            people: vec![person("p"), person("c"), person("g")],
            parent_child: vec![parent_child("p", "c"), parent_child("c", "g")],
            spouses: Vec::new(),
        };
        let config = LayoutConfig::default();
        let roots = positioned(&data, &config);
        let mut expected_gen = 0;
        let mut node = &roots[0];
        loop {
            assert_eq!(node.generation, expected_gen);
            assert_eq!(
                node.y,
                config.base_offset + expected_gen as f32 * config.generation_spacing
            );
            match node.children.first() {
                Some(child) => {
                    node = child;
                    expected_gen += 1;
                }
                None => break,
            }
        }
        assert_eq!(expected_gen, 2);
    }

    #[test]
    fn sibling_jitter_staggers_rows_deterministically() {
        let data = FamilyData {
            people: vec![person("p"), person("a"), person("b"), person("c")],
            parent_child: vec![
                parent_child("p", "a"),
                parent_child("p", "b"),
                parent_child("p", "c"),
            ],
            spouses: Vec::new(),
        };
        let config = LayoutConfig {
            sibling_jitter: 10.0,
            ..LayoutConfig::default()
        };
        let first = positioned(&data, &config);
        let second = positioned(&data, &config);
        let row = config.base_offset + config.generation_spacing;
        let ys: Vec<f32> = first[0].children.iter().map(|c| c.y).collect();
        assert_eq!(ys, [row - 10.0, row, row + 10.0]);
        // Jitter never touches generations, and reruns are identical.
        for (a, b) in first[0].children.iter().zip(&second[0].children) {
            assert_eq!(a.generation, 1);
            assert_eq!(a.y, b.y);
            assert_eq!(a.x, b.x);
        }
    }

    #[test]
    fn separate_trees_do_not_overlap() {
        let data = FamilyData {
            people: vec![person("r1"), person("a"), person("r2"), person("b")],
            parent_child: vec![parent_child("r1", "a"), parent_child("r2", "b")],
            spouses: Vec::new(),
        };
        let config = LayoutConfig::default();
        let roots = positioned(&data, &config);
        assert_eq!(roots.len(), 2);
        let right_of_first = roots[0].x + config.card_width / 2.0;
        let left_of_second = roots[1].x - config.card_width / 2.0;
        assert!(left_of_second - right_of_first >= config.tree_gap);
    }

    #[test]
    fn empty_forest_has_zero_extent() {
        let data = FamilyData::new();
        let config = LayoutConfig::default();
        let index = FamilyIndex::build(&data);
        let mut arena = build_forest(&index, &config);
        assert_eq!(assign_positions(&mut arena, &config), (0.0, 0.0));
    }
}
