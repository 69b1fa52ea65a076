use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::ir::Person;
use crate::layout::{EdgeKind, Layout, LayoutEdge, NodeKind, TreeNode};

/// Serializable snapshot of a computed layout: nested forest for tree
/// renderers, flat edge list for graph renderers, and summary stats.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub stats: StatsDump,
    pub width: f32,
    pub height: f32,
    pub roots: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDump {
    pub people: usize,
    pub couples: usize,
    pub roots: usize,
    pub parent_child_edges: usize,
    pub spouse_edges: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeDump {
    #[serde(rename = "person")]
    Person {
        person: PersonDump,
        generation: usize,
        x: f32,
        y: f32,
        children: Vec<NodeDump>,
    },
    #[serde(rename = "couple")]
    Couple {
        #[serde(rename = "personA")]
        person_a: PersonDump,
        #[serde(rename = "personB")]
        person_b: PersonDump,
        generation: usize,
        x: f32,
        y: f32,
        children: Vec<NodeDump>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDump {
    pub id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub kind: String,
    pub from_id: String,
    pub to_id: String,
}

impl PersonDump {
    fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birth_date: person.birth_date.map(|d| d.to_string()),
            death_date: person.death_date.map(|d| d.to_string()),
            gender: person.gender.as_str().to_string(),
            bio: person.bio.clone(),
            image_url: person.image_url.clone(),
        }
    }
}

impl NodeDump {
    fn from_node(node: &TreeNode) -> Self {
        let children = node.children.iter().map(NodeDump::from_node).collect();
        match &node.kind {
            NodeKind::Person(person) => NodeDump::Person {
                person: PersonDump::from_person(person),
                generation: node.generation,
                x: node.x,
                y: node.y,
                children,
            },
            NodeKind::Couple(a, b) => NodeDump::Couple {
                person_a: PersonDump::from_person(a),
                person_b: PersonDump::from_person(b),
                generation: node.generation,
                x: node.x,
                y: node.y,
                children,
            },
        }
    }
}

impl EdgeDump {
    fn from_edge(edge: &LayoutEdge) -> Self {
        Self {
            kind: edge.kind.as_str().to_string(),
            from_id: edge.from.clone(),
            to_id: edge.to.clone(),
        }
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let parent_child_edges = layout
            .edges
            .iter()
            .filter(|edge| edge.kind == EdgeKind::ParentChild)
            .count();
        LayoutDump {
            stats: StatsDump {
                people: layout.person_count(),
                couples: layout.couple_count(),
                roots: layout.roots.len(),
                parent_child_edges,
                spouse_edges: layout.edges.len() - parent_child_edges,
            },
            width: layout.width,
            height: layout.height,
            roots: layout.roots.iter().map(NodeDump::from_node).collect(),
            edges: layout.edges.iter().map(EdgeDump::from_edge).collect(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, pretty: bool) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    if pretty {
        serde_json::to_writer_pretty(writer, &dump)?;
    } else {
        serde_json::to_writer(writer, &dump)?;
    }
    Ok(())
}
