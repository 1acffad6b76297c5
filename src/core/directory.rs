use crate::domain::model::Member;
use crate::utils::error::{Entity, LibraryError, Result};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Directory {
    members: Vec<Member>,
    index: HashMap<String, usize>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, member_id: &str, name: &str) -> Result<&Member> {
        if self.index.contains_key(member_id) {
            return Err(LibraryError::DuplicateId {
                entity: Entity::Member,
                id: member_id.to_string(),
            });
        }

        let slot = self.members.len();
        self.members.push(Member {
            member_id: member_id.to_string(),
            name: name.to_string(),
        });
        self.index.insert(member_id.to_string(), slot);
        Ok(&self.members[slot])
    }

    pub fn find_member(&self, member_id: &str) -> Result<&Member> {
        self.index
            .get(member_id)
            .map(|&slot| &self.members[slot])
            .ok_or_else(|| LibraryError::NotFound {
                entity: Entity::Member,
                id: member_id.to_string(),
            })
    }

    pub fn list_members(&self) -> &[Member] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_rejects_duplicate() {
        let mut directory = Directory::new();
        directory.add_member("M1", "Alice").unwrap();

        assert!(matches!(
            directory.add_member("M1", "Bob"),
            Err(LibraryError::DuplicateId { entity: Entity::Member, .. })
        ));
        assert_eq!(directory.find_member("M1").unwrap().name, "Alice");
        assert_eq!(directory.list_members().len(), 1);
    }

    #[test]
    fn test_find_unknown_member() {
        let directory = Directory::new();
        assert!(directory.list_members().is_empty());
        assert!(matches!(
            directory.find_member("M9"),
            Err(LibraryError::NotFound { entity: Entity::Member, .. })
        ));
    }
}
