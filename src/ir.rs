use std::fmt;

/// Plain calendar date with total ordering. Undated people compare via
/// `Option<Date>`; the pipeline treats `None` as sorting after every dated
/// value (undated = youngest) wherever age matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "MALE" | "M" => Self::Male,
            "FEMALE" | "F" => Self::Female,
            "OTHER" => Self::Other,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentChildKind {
    #[default]
    Biological,
    Adopted,
    Step,
    Foster,
}

impl ParentChildKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "BIOLOGICAL" => Some(Self::Biological),
            "ADOPTED" => Some(Self::Adopted),
            "STEP" => Some(Self::Step),
            "FOSTER" => Some(Self::Foster),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Biological => "biological",
            Self::Adopted => "adopted",
            Self::Step => "step",
            Self::Foster => "foster",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpouseKind {
    #[default]
    Married,
    Divorced,
    Separated,
    Partner,
}

impl SpouseKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "MARRIED" => Some(Self::Married),
            "DIVORCED" => Some(Self::Divorced),
            "SEPARATED" => Some(Self::Separated),
            "PARTNER" => Some(Self::Partner),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Separated => "separated",
            Self::Partner => "partner",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
    pub gender: Gender,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl Person {
    /// Full name, falling back to the first name alone.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Directed parent -> child edge.
#[derive(Debug, Clone)]
pub struct ParentChildRelation {
    pub parent_id: String,
    pub child_id: String,
    pub kind: ParentChildKind,
}

/// Spousal edge; stored directed but undirected in meaning. The indexer
/// canonicalizes the pair so (A,B) and (B,A) resolve identically.
#[derive(Debug, Clone)]
pub struct SpousalRelation {
    pub spouse1_id: String,
    pub spouse2_id: String,
    pub kind: SpouseKind,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Immutable input snapshot. Vec order is preserved from the input and is the
/// deterministic tie-break for every traversal in the pipeline.
#[derive(Debug, Clone, Default)]
pub struct FamilyData {
    pub people: Vec<Person>,
    pub parent_child: Vec<ParentChildRelation>,
    pub spouses: Vec<SpousalRelation>,
}

impl FamilyData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
