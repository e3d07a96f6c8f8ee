use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Mirrors of the Airtable metadata API payloads. Serde lives in the domain on
// purpose: these types are the wire contract and nothing else.

// A base the token can see, as returned by `GET meta/bases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    pub id: String,
    pub name: String,
    pub permission_level: String,
}

// One page of bases. `offset` is present while more pages remain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    pub bases: Vec<Base>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // Type-specific options, e.g. `choices` for singleSelect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl Field {
    pub fn new(field_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            field_type: field_type.into(),
            name: name.into(),
            description: None,
            options: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    #[serde(rename = "type")]
    pub view_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_field_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<View>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: None,
            primary_field_id: None,
            name: name.into(),
            description: None,
            fields,
            views: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Field referenced by `primaryFieldId`, if the server reported one.
    pub fn primary_field(&self) -> Option<&Field> {
        let primary_id = self.primary_field_id.as_deref()?;
        self.fields
            .iter()
            .find(|field| field.id.as_deref() == Some(primary_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    pub tables: Vec<TableSchema>,
}

impl Tables {
    /// Look a table up by id first, then by exact name.
    pub fn find(&self, name_or_id: &str) -> Option<&TableSchema> {
        self.tables
            .iter()
            .find(|table| table.id.as_deref() == Some(name_or_id))
            .or_else(|| self.tables.iter().find(|table| table.name == name_or_id))
    }
}

// Payload for `POST meta/bases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBaseRequest {
    pub name: String,
    #[serde(rename = "workspaceId")]
    pub workspace_id: String,
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBaseResponse {
    // Id of the created base.
    #[serde(rename = "id")]
    pub base_id: String,
    pub tables: Vec<TableSchema>,
}
