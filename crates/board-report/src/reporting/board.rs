use super::parser::{lenient_id_list, lenient_string, lenient_timestamp, null_as_default};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("failed to read board export: {0}")]
    Io(#[from] std::io::Error),
    #[error("board export is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board export must be an object with a string `name` and `cards`, `lists`, `members` arrays")]
    InvalidStructure,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "desc", default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(rename = "due", default, deserialize_with = "lenient_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(
        rename = "dateLastActivity",
        default,
        deserialize_with = "lenient_timestamp"
    )]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(rename = "idList", default, deserialize_with = "lenient_string")]
    pub list_id: String,
    #[serde(rename = "idMembers", default, deserialize_with = "lenient_id_list")]
    pub member_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed: bool,
}

impl Card {
    /// Due strictly before `now`.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct List {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(rename = "fullName", default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// Structural check on a raw export. Element shapes are not inspected.
pub fn validate(raw: &Value) -> bool {
    let Some(object) = raw.as_object() else {
        return false;
    };

    ["cards", "lists", "members"]
        .iter()
        .all(|key| object.get(*key).is_some_and(Value::is_array))
        && object.get("name").is_some_and(Value::is_string)
}

/// Read-only snapshot of one board export.
#[derive(Debug, Clone)]
pub struct Board {
    name: String,
    cards: Vec<Card>,
    lists: Vec<List>,
    members: Vec<Member>,
    list_index: HashMap<String, usize>,
    member_index: HashMap<String, usize>,
    skipped_elements: usize,
}

impl Board {
    pub fn new(name: String, cards: Vec<Card>, lists: Vec<List>, members: Vec<Member>) -> Self {
        let list_index = index_by_id(lists.iter().map(|list| list.id.as_str()));
        let member_index = index_by_id(members.iter().map(|member| member.id.as_str()));

        Self {
            name,
            cards,
            lists,
            members,
            list_index,
            member_index,
            skipped_elements: 0,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BoardError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BoardError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, BoardError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Builds a board from an export that passes [`validate`]. Elements that
    /// don't match the expected shape are dropped and counted rather than
    /// failing the whole load.
    pub fn from_value(value: Value) -> Result<Self, BoardError> {
        if !validate(&value) {
            return Err(BoardError::InvalidStructure);
        }

        let Value::Object(mut object) = value else {
            return Err(BoardError::InvalidStructure);
        };
        let Some(Value::String(name)) = object.remove("name") else {
            return Err(BoardError::InvalidStructure);
        };

        let mut skipped = 0;
        let cards = take_elements::<Card>(&mut object, "cards", &mut skipped);
        let lists = take_elements::<List>(&mut object, "lists", &mut skipped);
        let members = take_elements::<Member>(&mut object, "members", &mut skipped);

        if skipped > 0 {
            warn!(board = %name, skipped, "ignored malformed board elements");
        }

        let mut board = Self::new(name, cards, lists, members);
        board.skipped_elements = skipped;

        info!(
            board = %board.name,
            cards = board.cards.len(),
            lists = board.lists.len(),
            members = board.members.len(),
            "board export loaded"
        );

        Ok(board)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn skipped_elements(&self) -> usize {
        self.skipped_elements
    }

    pub fn list(&self, id: &str) -> Option<&List> {
        self.list_index.get(id).map(|&idx| &self.lists[idx])
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.member_index.get(id).map(|&idx| &self.members[idx])
    }
}

// The first element wins when ids repeat. Empty ids are never indexed.
fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (idx, id) in ids.enumerate().filter(|(_, id)| !id.is_empty()) {
        index.entry(id.to_string()).or_insert(idx);
    }
    index
}

fn take_elements<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &str,
    skipped: &mut usize,
) -> Vec<T> {
    let Some(Value::Array(items)) = object.remove(key) else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(element) => Some(element),
            Err(_) => {
                *skipped += 1;
                None
            }
        })
        .collect()
}
