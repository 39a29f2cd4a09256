/// Name and owner a callable answers to in name-based lookups.
///
/// `owner` is the enclosing class name, or empty when the callable has none
/// or the lookup did not ask for one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub owner: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }

    pub fn matches(&self, name: &str, owner: &str) -> bool {
        self.name == name && self.owner == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_requires_both_parts() {
        let identifier = Identifier::new("f1", "SomeClass");
        assert!(identifier.matches("f1", "SomeClass"));
        assert!(!identifier.matches("f1", ""));
        assert!(!identifier.matches("f2", "SomeClass"));
    }
}
