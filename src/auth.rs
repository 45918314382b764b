//! Authentication context supplied by the host application.
//!
//! The widget never authenticates anyone itself. The host hands over a
//! snapshot of who is signed in, and the panel forwards it to the BFF as
//! request headers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shape violations for host-supplied auth values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthContextError {
    #[error("authContext must be an object or null")]
    NotAnObject,
    #[error("authContext.userId must be a string")]
    InvalidUserId,
    #[error("authContext.roles must be an array of strings")]
    InvalidRoles,
}

/// Who the host says is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthContext {
    pub fn new(
        user_id: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty `userId` counts as signed out.
    pub fn is_authenticated(&self) -> bool {
        !self.user_id.is_empty()
    }

    /// Value for the `x-roles` request header.
    pub fn roles_header(&self) -> String {
        self.roles.join(",")
    }

    /// Validate an untyped property value coming from the host.
    ///
    /// `null` maps to `Ok(None)`. Anything that is not `{userId: string,
    /// roles: string[]}` is rejected; a missing `roles` key is read as an
    /// empty list.
    pub fn from_value(value: &Value) -> Result<Option<Self>, AuthContextError> {
        let obj = match value {
            Value::Null => return Ok(None),
            Value::Object(obj) => obj,
            _ => return Err(AuthContextError::NotAnObject),
        };

        let user_id = obj
            .get("userId")
            .and_then(Value::as_str)
            .ok_or(AuthContextError::InvalidUserId)?;

        let roles = match obj.get("roles") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|r| r.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .ok_or(AuthContextError::InvalidRoles)?,
            Some(_) => return Err(AuthContextError::InvalidRoles),
        };

        Ok(Some(Self {
            user_id: user_id.to_string(),
            roles,
        }))
    }
}

/// Borrow the context only when it identifies a user.
pub fn authenticated(auth: Option<&AuthContext>) -> Option<&AuthContext> {
    auth.filter(|a| a.is_authenticated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roles_header_joins_with_comma() {
        let auth = AuthContext::new("u-1", ["admin", "viewer"]);
        assert_eq!(auth.roles_header(), "admin,viewer");
        assert_eq!(AuthContext::new("u-1", Vec::<String>::new()).roles_header(), "");
    }

    #[test]
    fn test_empty_user_id_is_not_authenticated() {
        let auth = AuthContext::new("", ["admin"]);
        assert!(!auth.is_authenticated());
        assert!(authenticated(Some(&auth)).is_none());
        assert!(authenticated(None).is_none());
    }

    #[test]
    fn test_from_value_null() {
        assert_eq!(AuthContext::from_value(&Value::Null), Ok(None));
    }

    #[test]
    fn test_from_value_valid_object() {
        let value = json!({"userId": "u-42", "roles": ["admin", "ops"]});
        let auth = AuthContext::from_value(&value).unwrap().unwrap();
        assert_eq!(auth, AuthContext::new("u-42", ["admin", "ops"]));
    }

    #[test]
    fn test_from_value_missing_roles_is_empty() {
        let auth = AuthContext::from_value(&json!({"userId": "u-1"}))
            .unwrap()
            .unwrap();
        assert!(auth.roles.is_empty());
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        assert_eq!(
            AuthContext::from_value(&json!("u-1")),
            Err(AuthContextError::NotAnObject)
        );
        assert_eq!(
            AuthContext::from_value(&json!({"roles": []})),
            Err(AuthContextError::InvalidUserId)
        );
        assert_eq!(
            AuthContext::from_value(&json!({"userId": 7})),
            Err(AuthContextError::InvalidUserId)
        );
        assert_eq!(
            AuthContext::from_value(&json!({"userId": "u", "roles": "admin"})),
            Err(AuthContextError::InvalidRoles)
        );
        assert_eq!(
            AuthContext::from_value(&json!({"userId": "u", "roles": ["a", 1]})),
            Err(AuthContextError::InvalidRoles)
        );
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let auth = AuthContext::new("u-1", ["admin"]);
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json, json!({"userId": "u-1", "roles": ["admin"]}));
    }
}
