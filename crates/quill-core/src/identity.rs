use serde::{Deserialize, Serialize};

/// A tenant the user is authorized for, as carried in the access token's
/// `domains` claim. Field names match the wire format of the posts service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRef {
    #[serde(rename = "UUID")]
    pub uuid: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// How a session was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email/password login or registration.
    Local,
    /// Federated login callback.
    Social,
}

/// Consumer-facing projection of the access token claims.
///
/// Produced by `quill-auth`, consumed by the CLI for display. Contains only
/// data fields, no token logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub provider: AuthProvider,
    pub verified: bool,
    pub domains: Vec<DomainRef>,
}

impl UserProfile {
    /// Deterministic placeholder used when an access token cannot be decoded.
    ///
    /// Callers that only need identity data for display degrade to this
    /// instead of failing.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            id: 0,
            email: "unknown@example.com".into(),
            name: "Unknown User".into(),
            provider: AuthProvider::Social,
            verified: false,
            domains: Vec::new(),
        }
    }

    /// First authorized tenant, if any.
    #[must_use]
    pub fn first_domain(&self) -> Option<&DomainRef> {
        self.domains.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_profile_is_deterministic() {
        assert_eq!(UserProfile::unknown(), UserProfile::unknown());
        let profile = UserProfile::unknown();
        assert_eq!(profile.id, 0);
        assert_eq!(profile.name, "Unknown User");
        assert!(!profile.verified);
        assert!(profile.domains.is_empty());
    }

    #[test]
    fn domain_ref_uses_wire_field_names() {
        let json = r#"{"UUID":"d1","Name":"Main"}"#;
        let domain: DomainRef = serde_json::from_str(json).expect("should parse");
        assert_eq!(domain.uuid, "d1");
        assert_eq!(domain.name, "Main");
    }

    #[test]
    fn domain_ref_name_is_optional() {
        let domain: DomainRef = serde_json::from_str(r#"{"UUID":"d2"}"#).expect("should parse");
        assert_eq!(domain.uuid, "d2");
        assert!(domain.name.is_empty());
    }

    #[test]
    fn first_domain_is_none_without_domains() {
        assert!(UserProfile::unknown().first_domain().is_none());
    }
}
