//! Session gate holding the authenticated analyst identity.
//!
//! The gate is constructed once at startup and passed by reference to
//! whatever needs it (route resolution, the home surface header). It is a
//! demo stub over a fixed in-memory directory - no lockout, no hashing,
//! not a security boundary.

use crate::models::Identity;

/// One entry of the fixed credential directory.
struct DirectoryEntry {
    email: &'static str,
    credential: &'static str,
    id: &'static str,
    name: &'static str,
    role: &'static str,
    department: &'static str,
    avatar: &'static str,
}

const DIRECTORY: [DirectoryEntry; 2] = [
    DirectoryEntry {
        email: "officer@forensiq.gov",
        credential: "forensiq123",
        id: "u1",
        name: "Insp. Ravi Sharma",
        role: "Investigating Officer",
        department: "Cyber Crime Cell - Mumbai",
        avatar: "RS",
    },
    DirectoryEntry {
        email: "admin@forensiq.gov",
        credential: "admin123",
        id: "u2",
        name: "DSP Priya Mehta",
        role: "Case Supervisor",
        department: "Economic Offences Wing - Delhi",
        avatar: "PM",
    },
];

/// Holds at most one authenticated identity for the process lifetime.
#[derive(Debug, Default)]
pub struct SessionGate {
    current: Option<Identity>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the pair against the directory. On match, the matching public
    /// profile becomes current (the credential itself is never stored) and
    /// true is returned. On no match, state is unchanged and false is
    /// returned - the caller cannot distinguish unknown email from wrong
    /// credential.
    pub fn challenge(&mut self, email: &str, credential: &str) -> bool {
        let found = DIRECTORY
            .iter()
            .find(|e| e.email == email && e.credential == credential);
        match found {
            Some(entry) => {
                tracing::info!(user = entry.id, "session established");
                self.current = Some(Identity {
                    id: entry.id.to_string(),
                    name: entry.name.to_string(),
                    email: entry.email.to_string(),
                    role: entry.role.to_string(),
                    department: entry.department.to_string(),
                    avatar: entry.avatar.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Unconditionally drop the current identity.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_accepts_every_directory_pair() {
        let pairs = [
            ("officer@forensiq.gov", "forensiq123", "u1"),
            ("admin@forensiq.gov", "admin123", "u2"),
        ];
        for (email, credential, id) in pairs {
            let mut gate = SessionGate::new();
            assert!(gate.challenge(email, credential));
            let identity = gate.current().unwrap();
            assert_eq!(identity.id, id);
            assert_eq!(identity.email, email);
        }
    }

    #[test]
    fn test_identity_never_carries_the_credential() {
        let mut gate = SessionGate::new();
        gate.challenge("officer@forensiq.gov", "forensiq123");
        let serialized = serde_json::to_string(gate.current().unwrap()).unwrap();
        assert!(!serialized.contains("forensiq123"));
    }

    #[test]
    fn test_challenge_rejects_wrong_credential_without_state_change() {
        let mut gate = SessionGate::new();
        assert!(!gate.challenge("officer@forensiq.gov", "wrong"));
        assert!(gate.current().is_none());

        // An established session survives a failed re-challenge.
        assert!(gate.challenge("admin@forensiq.gov", "admin123"));
        assert!(!gate.challenge("nobody@forensiq.gov", "admin123"));
        assert_eq!(gate.current().unwrap().id, "u2");
    }

    #[test]
    fn test_clear_is_unconditional() {
        let mut gate = SessionGate::new();
        gate.clear();
        assert!(gate.current().is_none());

        gate.challenge("officer@forensiq.gov", "forensiq123");
        gate.clear();
        assert!(gate.current().is_none());
    }
}
