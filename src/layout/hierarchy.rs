use std::collections::HashSet;

use crate::config::{LayoutConfig, UndatedOrder};
use crate::index::FamilyIndex;
use crate::ir::Date;

use super::types::{NodeKind, TreeNode};

/// Flat node storage for the forest under construction. Children are always
/// created after their parent, so a child's index is strictly greater than
/// its parent's; both the positioning passes and the nested conversion rely
/// on that ordering instead of recursion.
pub(super) struct Arena {
    pub nodes: Vec<ArenaNode>,
    pub roots: Vec<usize>,
}

pub(super) struct ArenaNode {
    pub kind: NodeKind,
    pub generation: usize,
    pub x: f32,
    pub y: f32,
    pub children: Vec<usize>,
}

impl Arena {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Convert to the nested output forest. Walks indices in reverse so every
    /// child is already converted when its parent is assembled.
    pub fn into_roots(self) -> Vec<TreeNode> {
        let mut slots: Vec<Option<TreeNode>> = Vec::with_capacity(self.nodes.len());
        slots.resize_with(self.nodes.len(), || None);
        let mut pending: Vec<Option<ArenaNode>> = self.nodes.into_iter().map(Some).collect();
        for idx in (0..pending.len()).rev() {
            let node = pending[idx].take().expect("arena node taken once");
            let children = node
                .children
                .iter()
                .map(|&child| slots[child].take().expect("child converted before parent"))
                .collect();
            slots[idx] = Some(TreeNode {
                kind: node.kind,
                generation: node.generation,
                x: node.x,
                y: node.y,
                children,
            });
        }
        self.roots
            .iter()
            .map(|&root| slots[root].take().expect("root converted"))
            .collect()
    }
}

/// Per-invocation traversal state; never shared between runs.
struct TraversalContext<'a> {
    visited: HashSet<&'a str>,
}

impl<'a> TraversalContext<'a> {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
        }
    }

    /// First spouse of `id` that has not been placed yet. First-found wins;
    /// later marriages fall back to their own subtree or orphan promotion.
    fn free_partner(&self, index: &FamilyIndex<'a>, id: &str) -> Option<&'a str> {
        index
            .spouses_of(id)
            .iter()
            .copied()
            .find(|spouse| !self.visited.contains(spouse))
    }
}

/// Build the forest covering every indexed person exactly once.
///
/// Root selection, spouse merge, fallback roots and orphan promotion follow
/// the order: people without parents first (couples merged when neither
/// spouse has parents), then the chronologically oldest person if nothing
/// qualified, then everyone still unplaced as their own root. Cyclic or
/// converging parent links are broken by the visited set; the first traversal
/// to reach a person keeps them.
pub(super) fn build_forest<'a>(index: &FamilyIndex<'a>, config: &LayoutConfig) -> Arena {
    let mut arena = Arena::new();
    let mut ctx = TraversalContext::new();

    for &id in index.person_order() {
        if index.has_parents(id) || ctx.visited.contains(id) {
            continue;
        }
        if let Some(partner) = ctx.free_partner(index, id)
            && index.has_parents(partner)
        {
            // The couple renders once, under the partner's own ancestry.
            continue;
        }
        spawn_tree(&mut arena, &mut ctx, index, id);
    }

    // No parentless person at all (cyclic or partial data): seed with the
    // chronologically oldest individual so non-empty input never yields an
    // empty forest.
    if arena.roots.is_empty()
        && let Some(oldest) = oldest_person(index, config.undated_order)
    {
        spawn_tree(&mut arena, &mut ctx, index, oldest);
    }

    // Orphan promotion: whoever is still unplaced becomes their own root.
    loop {
        let next = index
            .person_order()
            .iter()
            .copied()
            .find(|id| !ctx.visited.contains(id));
        let Some(id) = next else { break };
        spawn_tree(&mut arena, &mut ctx, index, id);
    }

    arena
}

/// Create a root node for `id` and attach its descendants depth-first using
/// an explicit work stack.
fn spawn_tree<'a>(
    arena: &mut Arena,
    ctx: &mut TraversalContext<'a>,
    index: &FamilyIndex<'a>,
    id: &'a str,
) {
    let root = spawn_node(arena, ctx, index, id, 0);
    arena.roots.push(root);

    let mut stack = vec![root];
    while let Some(node_idx) = stack.pop() {
        let kids = unit_children(index, ctx, &arena.nodes[node_idx].kind);
        let generation = arena.nodes[node_idx].generation + 1;
        let mut child_indices = Vec::with_capacity(kids.len());
        for kid in kids {
            // An earlier sibling's spawn may have merged this kid in as its
            // spouse (married step-siblings share a unit).
            if ctx.visited.contains(kid) {
                continue;
            }
            child_indices.push(spawn_node(arena, ctx, index, kid, generation));
        }
        for &child in child_indices.iter().rev() {
            stack.push(child);
        }
        arena.nodes[node_idx].children = child_indices;
    }
}

/// Materialize one node for `id`, merging in the first unplaced spouse as a
/// couple unit. Marks everyone in the node visited.
fn spawn_node<'a>(
    arena: &mut Arena,
    ctx: &mut TraversalContext<'a>,
    index: &FamilyIndex<'a>,
    id: &'a str,
    generation: usize,
) -> usize {
    ctx.visited.insert(id);
    let person = index.person(id).expect("spawned person is indexed").clone();
    let kind = match ctx.free_partner(index, id) {
        Some(partner_id) => {
            ctx.visited.insert(partner_id);
            let partner = index
                .person(partner_id)
                .expect("indexed spouse resolves")
                .clone();
            NodeKind::Couple(person, partner)
        }
        None => NodeKind::Person(person),
    };
    arena.nodes.push(ArenaNode {
        kind,
        generation,
        x: 0.0,
        y: 0.0,
        children: Vec::new(),
    });
    arena.nodes.len() - 1
}

/// Children of a person or couple unit: the union of every adult's children,
/// deduplicated, skipping anyone already placed elsewhere.
fn unit_children<'a>(
    index: &FamilyIndex<'a>,
    ctx: &TraversalContext<'a>,
    kind: &NodeKind,
) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut kids = Vec::new();
    for adult in kind.adults() {
        for &child in index.children_of(&adult.id) {
            if ctx.visited.contains(child) || !seen.insert(child) {
                continue;
            }
            kids.push(child);
        }
    }
    kids
}

fn oldest_person<'a>(index: &FamilyIndex<'a>, order: UndatedOrder) -> Option<&'a str> {
    let mut best: Option<(&str, Option<Date>)> = None;
    for &id in index.person_order() {
        let birth = index.person(id).and_then(|p| p.birth_date);
        let better = match &best {
            None => true,
            Some((_, current)) => sorts_before(birth, *current, order),
        };
        if better {
            best = Some((id, birth));
        }
    }
    best.map(|(id, _)| id)
}

/// Strict "older than" under the configured undated rule; ties keep the
/// earlier input position.
fn sorts_before(a: Option<Date>, b: Option<Date>, order: UndatedOrder) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a < b,
        (None, None) => false,
        (None, Some(_)) => order == UndatedOrder::Oldest,
        (Some(_), None) => order == UndatedOrder::Youngest,
    }
}
