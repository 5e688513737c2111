use crate::enums::Board;
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `schools` table, exactly as the listing returns it.
///
/// The `email_id` column is published under the field name `email`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: i64,
    #[serde(rename = "email")]
    pub email_id: String,
    pub board: String,
    pub image: String,
    pub website: String,
    pub description: Option<String>,
}

/// A validated school, ready to be inserted. Only produced by
/// [`SchoolSubmission::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: i64,
    pub email_id: String,
    pub board: Board,
    pub website: String,
    pub image: String,
    pub description: Option<String>,
}

/// The raw fields of an add-school request, before any checks.
///
/// Multipart forms fill this field by field; JSON bodies deserialize into it
/// directly. `contact` accepts either a string or a JSON number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchoolSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub contact: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub board: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SchoolSubmission {
    /// Assigns a named text field. Returns `false` for names the form does not
    /// know. `image` is not a text field: a form sets it only by uploading a file.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "contact" => &mut self.contact,
            "email_id" => &mut self.email_id,
            "board" => &mut self.board,
            "website" => &mut self.website,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Checks every field and produces the insert payload.
    pub fn validate(self) -> Result<NewSchool, ValidationError> {
        crate::validation::validate_submission(self)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
    }))
}
