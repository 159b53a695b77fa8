use std::collections::HashMap;

/// Tracks which document keys were handed out during one generation pass.
///
/// Owned by the caller of a pass. The processor resets it on entry, so a
/// registry never carries names from one document into the next.
#[derive(Debug, Default)]
pub struct NameRegistry {
    /// Every key handed out, with the last suffix tried for it.
    claims: HashMap<String, usize>,
}
impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        self.claims.clear();
    }
    /// Returns `candidate` if it is free, otherwise `candidate-n` with the
    /// smallest `n >= 2` not handed out yet. The returned key is claimed too.
    pub fn claim(&mut self, candidate: &str) -> String {
        let Some(&tried) = self.claims.get(candidate) else {
            self.claims.insert(candidate.to_string(), 1);
            return candidate.to_string();
        };
        let mut n = tried;
        let key = loop {
            n += 1;
            let key = format!("{candidate}-{n}");
            if !self.claims.contains_key(&key) {
                break key;
            }
        };
        self.claims.insert(candidate.to_string(), n);
        self.claims.insert(key.clone(), 1);
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_claims_are_suffixed() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("gap"), "gap");
        assert_eq!(registry.claim("gap"), "gap-2");
        assert_eq!(registry.claim("gap"), "gap-3");
        assert_eq!(registry.claim("margin"), "margin");
    }

    #[test]
    fn reset_restarts_the_sequence() {
        let mut registry = NameRegistry::new();
        registry.claim("gap");
        registry.claim("gap");
        registry.reset();
        assert_eq!(registry.claim("gap"), "gap");
        assert_eq!(registry.claim("gap"), "gap-2");
    }

    #[test]
    fn suffixed_keys_are_claimed_too() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("gap"), "gap");
        assert_eq!(registry.claim("gap"), "gap-2");
        assert_eq!(registry.claim("gap-2"), "gap-2-2");

        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("gap-2"), "gap-2");
        assert_eq!(registry.claim("gap"), "gap");
        assert_eq!(registry.claim("gap"), "gap-3");
        assert_eq!(registry.claim("gap"), "gap-4");
    }
}
