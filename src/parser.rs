use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::ir::{
    Date, FamilyData, Gender, ParentChildKind, ParentChildRelation, Person, SpousalRelation,
    SpouseKind,
};

// Accepts plain dates and ISO timestamps; everything after the day is ignored.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("date regex"));

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid family snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("person record at index {0} has an empty id")]
    EmptyPersonId(usize),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    #[serde(default)]
    people: Vec<PersonRecord>,
    #[serde(default, alias = "relationships")]
    parent_child_relations: Vec<ParentChildRecord>,
    #[serde(default, alias = "spouses")]
    spouse_relations: Vec<SpouseRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonRecord {
    id: String,
    first_name: String,
    last_name: Option<String>,
    birth_date: Option<String>,
    death_date: Option<String>,
    gender: Option<String>,
    bio: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParentChildRecord {
    parent_id: String,
    child_id: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpouseRecord {
    #[serde(alias = "spouseAId")]
    spouse1_id: String,
    #[serde(alias = "spouseBId")]
    spouse2_id: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Parse a JSON family snapshot into the flat input model. Record order is
/// preserved; the layout pipeline relies on it for deterministic tie-breaks.
pub fn parse_family_data(input: &str) -> Result<FamilyData, ParseError> {
    let snapshot: SnapshotFile = serde_json::from_str(input)?;
    let mut data = FamilyData::new();

    for (idx, record) in snapshot.people.into_iter().enumerate() {
        if record.id.is_empty() {
            return Err(ParseError::EmptyPersonId(idx));
        }
        data.people.push(Person {
            birth_date: parse_date(record.birth_date.as_deref(), &record.id, "birthDate"),
            death_date: parse_date(record.death_date.as_deref(), &record.id, "deathDate"),
            gender: record
                .gender
                .as_deref()
                .map(Gender::from_token)
                .unwrap_or_default(),
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            bio: record.bio,
            image_url: record.image_url,
        });
    }

    for record in snapshot.parent_child_relations {
        let kind = match record.kind.as_deref() {
            None => ParentChildKind::default(),
            Some(token) => ParentChildKind::from_token(token).unwrap_or_else(|| {
                warn!(
                    parent = %record.parent_id,
                    child = %record.child_id,
                    token,
                    "unknown parent-child relation type, treating as biological"
                );
                ParentChildKind::default()
            }),
        };
        data.parent_child.push(ParentChildRelation {
            parent_id: record.parent_id,
            child_id: record.child_id,
            kind,
        });
    }

    for record in snapshot.spouse_relations {
        let kind = match record.kind.as_deref() {
            None => SpouseKind::default(),
            Some(token) => SpouseKind::from_token(token).unwrap_or_else(|| {
                warn!(
                    spouse1 = %record.spouse1_id,
                    spouse2 = %record.spouse2_id,
                    token,
                    "unknown spousal relation type, treating as married"
                );
                SpouseKind::default()
            }),
        };
        data.spouses.push(SpousalRelation {
            start_date: parse_date(record.start_date.as_deref(), &record.spouse1_id, "startDate"),
            end_date: parse_date(record.end_date.as_deref(), &record.spouse1_id, "endDate"),
            spouse1_id: record.spouse1_id,
            spouse2_id: record.spouse2_id,
            kind,
        });
    }

    Ok(data)
}

fn parse_date(raw: Option<&str>, owner: &str, field: &str) -> Option<Date> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let captures = DATE_RE.captures(raw);
    let Some(captures) = captures else {
        warn!(owner, field, raw, "unparseable date, treating as undated");
        return None;
    };
    let year: i32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let day: u32 = captures[3].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        warn!(owner, field, raw, "date out of range, treating as undated");
        return None;
    }
    Some(Date::new(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snapshot_with_aliases() {
        let input = r#"{
            "people": [
                {"id": "p1", "firstName": "Ada", "lastName": "Byron",
                 "birthDate": "1815-12-10T00:00:00.000Z", "gender": "FEMALE"},
                {"id": "p2", "firstName": "William"}
            ],
            "relationships": [
                {"parentId": "p1", "childId": "p2", "type": "BIOLOGICAL"}
            ],
            "spouses": [
                {"spouse1Id": "p1", "spouse2Id": "p2", "type": "MARRIED"}
            ]
        }"#;
        let data = parse_family_data(input).expect("parse failed");
        assert_eq!(data.people.len(), 2);
        assert_eq!(data.people[0].birth_date, Some(Date::new(1815, 12, 10)));
        assert_eq!(data.people[0].gender, Gender::Female);
        assert_eq!(data.people[1].gender, Gender::Unknown);
        assert_eq!(data.parent_child.len(), 1);
        assert_eq!(data.spouses.len(), 1);
    }

    #[test]
    fn bad_dates_become_undated() {
        let input = r#"{
            "people": [
                {"id": "p1", "firstName": "Ada", "birthDate": "sometime in 1815"},
                {"id": "p2", "firstName": "Eve", "birthDate": "1815-40-99"}
            ]
        }"#;
        let data = parse_family_data(input).expect("parse failed");
        assert_eq!(data.people[0].birth_date, None);
        assert_eq!(data.people[1].birth_date, None);
    }

    #[test]
    fn unknown_relation_types_fall_back() {
        let input = r#"{
            "people": [
                {"id": "p1", "firstName": "A"},
                {"id": "p2", "firstName": "B"}
            ],
            "relationships": [
                {"parentId": "p1", "childId": "p2", "type": "GODPARENT"}
            ],
            "spouses": [
                {"spouse1Id": "p1", "spouse2Id": "p2", "type": "ENGAGED"}
            ]
        }"#;
        let data = parse_family_data(input).expect("parse failed");
        assert_eq!(data.parent_child[0].kind, ParentChildKind::Biological);
        assert_eq!(data.spouses[0].kind, SpouseKind::Married);
    }

    #[test]
    fn empty_person_id_is_rejected() {
        let input = r#"{"people": [{"id": "", "firstName": "A"}]}"#;
        assert!(matches!(
            parse_family_data(input),
            Err(ParseError::EmptyPersonId(0))
        ));
    }
}
