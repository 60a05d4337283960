use serde::{Deserialize, Serialize};

/// Fallback shown when a record carries neither a first nor a last name
pub const UNNAMED_USER: &str = "No Username";

/// Wire wrapper used by every users endpoint: the payload lives under `data`.
/// Other top-level keys (`page`, `total`, `support`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A single user as returned by the users API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRecord {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    #[serde(rename = "avatar")]
    avatar_url: String,
}

impl UserRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// "First Last", or whichever half is present
    pub fn full_name(&self) -> Option<String> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Full name for display, never empty
    pub fn display_name(&self) -> String {
        self.full_name().unwrap_or_else(|| UNNAMED_USER.to_string())
    }

    /// `mailto:` link for handing the address to a mail client
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Build a record the way the API would send it. Test-only.
#[cfg(test)]
pub(crate) fn sample_user(id: i64) -> UserRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "email": format!("user{id}@reqres.in"),
        "first_name": "Test",
        "last_name": format!("User{id}"),
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
    }))
    .expect("sample user JSON is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANET_JSON: &str = r#"{"data":{"id":2,"email":"janet.weaver@reqres.in","first_name":"Janet","last_name":"Weaver","avatar":"https://reqres.in/img/faces/2-image.jpg"}}"#;

    #[test]
    fn test_parse_single_user_envelope() {
        let env: Envelope<UserRecord> =
            serde_json::from_str(JANET_JSON).expect("Failed to parse user test JSON");
        let user = env.data;
        assert_eq!(user.id(), 2);
        assert_eq!(user.email(), "janet.weaver@reqres.in");
        assert_eq!(user.first_name(), "Janet");
        assert_eq!(user.last_name(), "Weaver");
        assert_eq!(user.avatar_url(), "https://reqres.in/img/faces/2-image.jpg");
    }

    #[test]
    fn test_parse_list_envelope_ignores_paging_fields() {
        let json = r#"{
            "page": 1, "per_page": 2, "total": 12, "total_pages": 6,
            "data": [
                {"id":1,"email":"george.bluth@reqres.in","first_name":"George","last_name":"Bluth","avatar":"https://reqres.in/img/faces/1-image.jpg"},
                {"id":2,"email":"janet.weaver@reqres.in","first_name":"Janet","last_name":"Weaver","avatar":"https://reqres.in/img/faces/2-image.jpg"}
            ],
            "support": {"url": "https://reqres.in/#support-heading", "text": "..."}
        }"#;
        let env: Envelope<Vec<UserRecord>> =
            serde_json::from_str(json).expect("Failed to parse list test JSON");
        assert_eq!(env.data.len(), 2);
        assert_eq!(env.data[0].full_name().as_deref(), Some("George Bluth"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"{"data":{"id":2,"email":"janet.weaver@reqres.in"}}"#;
        assert!(serde_json::from_str::<Envelope<UserRecord>>(json).is_err());
    }

    #[test]
    fn test_serialized_form_uses_wire_names() {
        let env: Envelope<UserRecord> = serde_json::from_str(JANET_JSON).unwrap();
        let value = serde_json::to_value(&env.data).unwrap();
        assert_eq!(value["first_name"], "Janet");
        assert_eq!(value["avatar"], "https://reqres.in/img/faces/2-image.jpg");
    }

    #[test]
    fn test_display_name_fallback() {
        let json = r#"{"id":7,"email":"x@reqres.in","first_name":" ","last_name":"","avatar":""}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name(), None);
        assert_eq!(user.display_name(), UNNAMED_USER);
    }

    #[test]
    fn test_mailto() {
        let env: Envelope<UserRecord> = serde_json::from_str(JANET_JSON).unwrap();
        assert_eq!(env.data.mailto(), "mailto:janet.weaver@reqres.in");
    }
}
