use crate::index::canonical_pair_key;
use crate::ir::Person;

/// A node in the output forest: a single person, or two spouses merged into
/// one couple unit so their shared descendants attach once.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Person(Person),
    Couple(Person, Person),
}

impl NodeKind {
    /// Stable identifier for the node: the person id, or `couple_` plus the
    /// canonical pair key.
    pub fn node_id(&self) -> String {
        match self {
            Self::Person(person) => person.id.clone(),
            Self::Couple(a, b) => format!("couple_{}", canonical_pair_key(&a.id, &b.id)),
        }
    }

    /// The adults represented by this node, in stored order.
    pub fn adults(&self) -> Vec<&Person> {
        match self {
            Self::Person(person) => vec![person],
            Self::Couple(a, b) => vec![a, b],
        }
    }

    pub fn person_count(&self) -> usize {
        match self {
            Self::Person(_) => 1,
            Self::Couple(..) => 2,
        }
    }

    pub fn is_couple(&self) -> bool {
        matches!(self, Self::Couple(..))
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub kind: NodeKind,
    /// Depth from the root of this tree; roots are generation 0.
    pub generation: usize,
    /// Center of the node. For couples this is the midpoint between the two
    /// cards.
    pub x: f32,
    pub y: f32,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Visit this node and every descendant, depth-first, without recursion.
    pub fn walk(&self, visit: &mut impl FnMut(&TreeNode)) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    ParentChild,
    Spouse,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParentChild => "parent-child",
            Self::Spouse => "spouse",
        }
    }
}

/// Flat edge, for renderers that prefer edge lists over nested trees.
#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub kind: EdgeKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// Root nodes in traversal order; together they cover every input person
    /// exactly once.
    pub roots: Vec<TreeNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn walk(&self, visit: &mut impl FnMut(&TreeNode)) {
        for root in &self.roots {
            root.walk(visit);
        }
    }

    /// Total people covered by the forest, counting couple nodes as two.
    pub fn person_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| count += node.kind.person_count());
        count
    }

    pub fn couple_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if node.kind.is_couple() {
                count += 1;
            }
        });
        count
    }
}
