//! Access modifier detection from signature text

use regex::Regex;
use std::sync::LazyLock;
use testscribe_model::AccessModifier;

static RE_PUBLIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)public\s").unwrap());
static RE_PROTECTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)protected\s").unwrap());
static RE_PRIVATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)private\s").unwrap());

/// Classifies a declaration's visibility from its signature text
///
/// Checks run in a fixed order: `public`, `protected`, then the implicit
/// policy when no keyword is present at all, then `private`. The implicit
/// policy is `Public` unless configured otherwise; set it to `PackageLocal`
/// to follow the language's real default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessModifierDetector {
    implicit: AccessModifier,
}

impl AccessModifierDetector {
    pub fn new(implicit: AccessModifier) -> Self {
        Self { implicit }
    }

    pub fn implicit(&self) -> AccessModifier {
        self.implicit
    }

    pub fn is_public(&self, signature: &str) -> bool {
        RE_PUBLIC.is_match(signature)
    }

    pub fn is_protected(&self, signature: &str) -> bool {
        RE_PROTECTED.is_match(signature)
    }

    pub fn is_private(&self, signature: &str) -> bool {
        RE_PRIVATE.is_match(signature)
    }

    /// True when the signature names no visibility keyword
    pub fn has_no_modifier(&self, signature: &str) -> bool {
        !self.is_public(signature) && !self.is_protected(signature) && !self.is_private(signature)
    }

    pub fn detect(&self, signature: &str) -> AccessModifier {
        if self.is_public(signature) {
            AccessModifier::Public
        } else if self.is_protected(signature) {
            AccessModifier::Protected
        } else if self.has_no_modifier(signature) {
            self.implicit
        } else {
            AccessModifier::Private
        }
    }
}

impl Default for AccessModifierDetector {
    fn default() -> Self {
        Self::new(AccessModifier::Public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_keywords() {
        let detector = AccessModifierDetector::default();
        assert_eq!(detector.detect("public int size()"), AccessModifier::Public);
        assert_eq!(detector.detect(" protected void run()"), AccessModifier::Protected);
        assert_eq!(detector.detect("private static String name()"), AccessModifier::Private);
    }

    #[test]
    fn test_no_keyword_uses_implicit_policy() {
        assert_eq!(
            AccessModifierDetector::default().detect("int size()"),
            AccessModifier::Public
        );
        assert_eq!(
            AccessModifierDetector::new(AccessModifier::PackageLocal).detect("static int size()"),
            AccessModifier::PackageLocal
        );
    }

    #[test]
    fn test_keyword_must_be_whitespace_delimited() {
        let detector = AccessModifierDetector::new(AccessModifier::PackageLocal);
        assert_eq!(detector.detect("int publicCount()"), AccessModifier::PackageLocal);
        assert_eq!(detector.detect("void setprivate ()"), AccessModifier::PackageLocal);
    }

    #[test]
    fn test_public_wins_over_later_keywords() {
        let detector = AccessModifierDetector::default();
        assert_eq!(detector.detect("public private int x()"), AccessModifier::Public);
        assert_eq!(detector.detect("protected private int x()"), AccessModifier::Protected);
    }
}
