use futflare_types::is_valid_email;

use crate::ValidationError;

pub const MAX_PARTICIPANTS: usize = 10;

/// Ordered, de-duplicated list of invited participant emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantList {
    emails: Vec<String>,
}

impl ParticipantList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explain why `email` cannot be added, if it cannot.
    ///
    /// Derived only from the current list and the candidate; the add control
    /// is enabled exactly when this returns `Ok`.
    pub fn check(&self, email: &str) -> Result<(), ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::BlankEmail);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        if self.emails.len() >= MAX_PARTICIPANTS {
            return Err(ValidationError::ParticipantLimit(MAX_PARTICIPANTS));
        }
        if self.contains(email) {
            return Err(ValidationError::DuplicateParticipant(email.to_string()));
        }
        Ok(())
    }

    pub fn can_add(&self, email: &str) -> bool {
        self.check(email).is_ok()
    }

    /// Add `email` if allowed. Rejections are silent; returns whether the
    /// list changed.
    pub fn add(&mut self, email: &str) -> bool {
        if !self.can_add(email) {
            return false;
        }
        self.emails.push(email.trim().to_string());
        true
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.emails.len()).then(|| self.emails.remove(index))
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.emails.len() >= MAX_PARTICIPANTS
    }

    pub fn as_slice(&self) -> &[String] {
        &self.emails
    }

    pub fn clear(&mut self) {
        self.emails.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_valid_email() {
        let mut list = ParticipantList::new();
        assert!(list.add("ana@example.com"));
        assert_eq!(list.as_slice(), ["ana@example.com"]);
    }

    #[test]
    fn test_blank_and_invalid_are_refused() {
        let mut list = ParticipantList::new();
        assert_eq!(list.check("  "), Err(ValidationError::BlankEmail));
        assert!(!list.add(""));
        assert!(matches!(list.check("nope"), Err(ValidationError::InvalidEmail(_))));
        assert!(!list.add("nope"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        let mut list = ParticipantList::new();
        assert!(list.add("ana@example.com"));
        assert!(!list.add("ana@example.com"));
        assert!(!list.add(" ana@example.com "));
        assert!(list.add("Ana@example.com"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_capacity_is_ten() {
        let mut list = ParticipantList::new();
        for i in 0..MAX_PARTICIPANTS {
            assert!(list.add(&format!("user{i}@example.com")));
        }
        assert!(list.is_full());
        assert_eq!(
            list.check("late@example.com"),
            Err(ValidationError::ParticipantLimit(MAX_PARTICIPANTS))
        );
        assert!(!list.add("late@example.com"));
        assert_eq!(list.len(), MAX_PARTICIPANTS);
    }

    #[test]
    fn test_remove_is_unconditional_and_frees_capacity() {
        let mut list = ParticipantList::new();
        for i in 0..MAX_PARTICIPANTS {
            list.add(&format!("user{i}@example.com"));
        }
        assert_eq!(list.remove(0).as_deref(), Some("user0@example.com"));
        assert_eq!(list.remove(42), None);
        assert!(list.can_add("late@example.com"));
    }

    #[test]
    fn test_can_add_matches_add_outcome() {
        let candidates = [
            "a@example.com",
            "",
            "bad",
            "a@example.com",
            "b@example.com",
            "   ",
            "c@example.org",
        ];
        let mut list = ParticipantList::new();
        for candidate in candidates {
            let predicted = list.can_add(candidate);
            assert_eq!(list.add(candidate), predicted, "candidate {candidate:?}");
        }
        assert_eq!(list.len(), 3);
    }
}
