use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single to-do document as stored in the item collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Primary key. Empty or null on a create request, assigned by the server.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub item_name: String,

    /// Omitted from the document when the payload had none
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub item_owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_create_date: Option<DateTime<Utc>>,

    /// Caller fields the service does not interpret (e.g. `isComplete`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoItem {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            item_name: item_name.into(),
            item_owner: String::new(),
            item_create_date: None,
            extra: Map::new(),
        }
    }

    /// Items without an id are new; anything else is an upsert
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_owned_by(&self, unique_name: &str) -> bool {
        self.item_owner == unique_name
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body for the list operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub user_name: String,
    pub items: Vec<TodoItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_create_payload() {
        let item: TodoItem = serde_json::from_value(json!({ "itemName": "Buy milk" })).unwrap();
        assert!(item.is_new());
        assert_eq!(item.item_name, "Buy milk");
        assert!(item.item_owner.is_empty());
        assert!(item.item_create_date.is_none());
    }

    #[test]
    fn unknown_fields_pass_through() {
        let input = json!({
            "id": "abc",
            "itemName": "Walk dog",
            "itemOwner": "alice",
            "isComplete": true,
            "tags": ["home"]
        });
        let item: TodoItem = serde_json::from_value(input).unwrap();
        assert_eq!(item.extra.get("isComplete"), Some(&json!(true)));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["isComplete"], json!(true));
        assert_eq!(out["tags"], json!(["home"]));
        assert_eq!(out["itemOwner"], json!("alice"));
    }

    #[test]
    fn null_fields_read_as_empty() {
        let input = json!({
            "id": null,
            "itemName": "Buy milk",
            "itemOwner": null,
            "itemCreateDate": null
        });
        let item: TodoItem = serde_json::from_value(input).unwrap();
        assert!(item.is_new());
        assert!(item.item_owner.is_empty());
        assert!(item.item_create_date.is_none());
    }

    #[test]
    fn absent_owner_and_date_stay_absent() {
        let input = json!({ "id": "abc", "itemName": "Imported" });
        let item: TodoItem = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn list_uses_camel_case_wire_names() {
        let list = TodoList { user_name: "Dev User".into(), items: vec![] };
        let out = serde_json::to_value(&list).unwrap();
        assert_eq!(out, json!({ "userName": "Dev User", "items": [] }));
    }
}
