use serde::{Deserialize, Serialize};

/// A `(resource, method, role)` triple to decide on.
///
/// Tokens are compared verbatim: no case folding, no trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationRequest {
    resource: String,
    method: String,
    role: String,
}

impl AuthorizationRequest {
    pub fn new(
        resource: impl Into<String>,
        method: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            method: method.into(),
            role: role.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    pub authorized: bool,
}

impl From<bool> for AuthorizationDecision {
    fn from(authorized: bool) -> Self {
        Self { authorized }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_request() {
        let request: AuthorizationRequest =
            serde_json::from_value(json!({"resource": "/users", "method": "GET", "role": "admin"}))
                .unwrap();

        assert_eq!(AuthorizationRequest::new("/users", "GET", "admin"), request);
    }

    #[test]
    fn keeps_tokens_verbatim() {
        let payload = json!({"resource": " /Users", "method": "get", "role": "ADMIN "});
        let request: AuthorizationRequest = serde_json::from_value(payload).unwrap();

        assert_eq!(" /Users", request.resource());
        assert_eq!("get", request.method());
        assert_eq!("ADMIN ", request.role());
    }

    #[test]
    fn rejects_missing_field() {
        let result = serde_json::from_value::<AuthorizationRequest>(
            json!({"resource": "/users", "method": "GET"}),
        );

        assert_matches!(result, Err(_));
    }

    #[test]
    fn rejects_extra_field() {
        let result = serde_json::from_value::<AuthorizationRequest>(
            json!({"resource": "/users", "method": "GET", "role": "admin", "roles": ["user"]}),
        );

        assert_matches!(result, Err(_));
    }

    #[test]
    fn rejects_wrong_type() {
        let result = serde_json::from_value::<AuthorizationRequest>(
            json!({"resource": "/users", "method": "GET", "role": ["admin", "user"]}),
        );

        assert_matches!(result, Err(_));
    }

    #[test]
    fn serializes_decision() {
        let json = serde_json::to_value(AuthorizationDecision::from(true)).unwrap();

        assert_eq!(json!({"authorized": true}), json);
    }
}
