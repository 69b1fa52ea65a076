use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::ir::{FamilyData, ParentChildRelation, Person, SpousalRelation};

/// Order-independent identifier for an unordered pair of person ids. Used to
/// deduplicate spousal edges and couple nodes.
pub fn canonical_pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}_{b}")
    } else {
        format!("{b}_{a}")
    }
}

/// Lookup structures over one input snapshot. Dirty relations (unknown ids,
/// self references, duplicates) are dropped here with a warning so the later
/// stages only ever see a consistent graph.
pub struct FamilyIndex<'a> {
    person_by_id: HashMap<&'a str, &'a Person>,
    /// Person ids in input order.
    order: Vec<&'a str>,
    children: HashMap<&'a str, Vec<&'a str>>,
    parents: HashMap<&'a str, Vec<&'a str>>,
    spouses: HashMap<&'a str, Vec<&'a str>>,
    /// Surviving parent-child relations, input order, one per ordered pair.
    parent_relations: Vec<&'a ParentChildRelation>,
    /// Surviving spousal relations, input order, one per unordered pair.
    spouse_relations: Vec<&'a SpousalRelation>,
}

impl<'a> FamilyIndex<'a> {
    pub fn build(data: &'a FamilyData) -> Self {
        let mut person_by_id: HashMap<&str, &Person> = HashMap::new();
        let mut order: Vec<&str> = Vec::with_capacity(data.people.len());
        for person in &data.people {
            if person_by_id.contains_key(person.id.as_str()) {
                warn!(id = %person.id, "duplicate person id, keeping first record");
                continue;
            }
            person_by_id.insert(person.id.as_str(), person);
            order.push(person.id.as_str());
        }

        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut parent_relations: Vec<&ParentChildRelation> = Vec::new();
        let mut seen_parent_pairs: HashSet<(&str, &str)> = HashSet::new();
        for relation in &data.parent_child {
            let parent_id = relation.parent_id.as_str();
            let child_id = relation.child_id.as_str();
            if parent_id == child_id {
                warn!(id = parent_id, "self parent-child relation dropped");
                continue;
            }
            if !person_by_id.contains_key(parent_id) || !person_by_id.contains_key(child_id) {
                warn!(
                    parent = parent_id,
                    child = child_id,
                    "parent-child relation references unknown person, dropped"
                );
                continue;
            }
            if !seen_parent_pairs.insert((parent_id, child_id)) {
                // Duplicate ordered pair collapses to the first occurrence.
                continue;
            }
            children.entry(parent_id).or_default().push(child_id);
            parents.entry(child_id).or_default().push(parent_id);
            parent_relations.push(relation);
        }

        let mut spouses: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut spouse_relations: Vec<&SpousalRelation> = Vec::new();
        let mut seen_spouse_pairs: HashSet<String> = HashSet::new();
        for relation in &data.spouses {
            let a = relation.spouse1_id.as_str();
            let b = relation.spouse2_id.as_str();
            if a == b {
                warn!(id = a, "self spousal relation dropped");
                continue;
            }
            if !person_by_id.contains_key(a) || !person_by_id.contains_key(b) {
                warn!(
                    spouse1 = a,
                    spouse2 = b,
                    "spousal relation references unknown person, dropped"
                );
                continue;
            }
            if !seen_spouse_pairs.insert(canonical_pair_key(a, b)) {
                continue;
            }
            spouses.entry(a).or_default().push(b);
            spouses.entry(b).or_default().push(a);
            spouse_relations.push(relation);
        }

        Self {
            person_by_id,
            order,
            children,
            parents,
            spouses,
            parent_relations,
            spouse_relations,
        }
    }

    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.person_by_id.get(id).copied()
    }

    /// Person ids in input order, duplicates removed.
    pub fn person_order(&self) -> &[&'a str] {
        &self.order
    }

    pub fn children_of(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents_of(&self, id: &str) -> &[&'a str] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn spouses_of(&self, id: &str) -> &[&'a str] {
        self.spouses.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_parents(&self, id: &str) -> bool {
        !self.parents_of(id).is_empty()
    }

    pub fn parent_relations(&self) -> &[&'a ParentChildRelation] {
        &self.parent_relations
    }

    pub fn spouse_relations(&self) -> &[&'a SpousalRelation] {
        &self.spouse_relations
    }
}
