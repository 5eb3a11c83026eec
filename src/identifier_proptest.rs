//! Property-based tests for identifiers and pattern expansion.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::path::PathBuf;

    use crate::identifier::{build_file_key, stable_id};
    use crate::path::{expand_braces, relative_to};
    use proptest::prelude::*;

    // ============================================================================
    // stable_id property tests
    // ============================================================================

    proptest! {
        /// Property: the same key always yields the same identifier
        #[test]
        fn stable_id_is_deterministic(key in ".*") {
            prop_assert_eq!(stable_id(&key), stable_id(&key));
        }

        /// Property: identifiers are 24 upper-case hex characters
        #[test]
        fn stable_id_is_uppercase_hex(key in ".*") {
            let id = stable_id(&key);
            prop_assert_eq!(id.as_str().len(), 24);
            prop_assert!(id
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_digit() || ('A'..='F').contains(&ch)));
        }

        /// Property: distinct keys yield distinct identifiers
        #[test]
        fn stable_id_separates_keys(a in "[a-zA-Z0-9/._]{1,40}", b in "[a-zA-Z0-9/._]{1,40}") {
            prop_assume!(a != b);
            prop_assert_ne!(stable_id(&a), stable_id(&b));
        }

        /// Property: the same file in two targets gets two build files
        #[test]
        fn build_file_ids_differ_per_target(path in "[a-zA-Z0-9/._]{1,40}") {
            prop_assert_ne!(
                stable_id(&build_file_key("App", &path)),
                stable_id(&build_file_key("AppTests", &path))
            );
        }
    }

    // ============================================================================
    // expand_braces property tests
    // ============================================================================

    proptest! {
        /// Property: patterns without braces expand to themselves
        #[test]
        fn expand_braces_without_braces_is_identity(pattern in "[a-zA-Z0-9*/._]*") {
            prop_assert_eq!(expand_braces(&pattern), vec![pattern]);
        }

        /// Property: one alternation expands to one pattern per alternative, in order
        #[test]
        fn expand_braces_single_alternation(
            prefix in "[a-z*/]{0,8}",
            alternatives in prop::collection::vec("[a-z]{1,5}", 1..6),
            suffix in "[a-z*/.]{0,8}",
        ) {
            let pattern = format!("{}{{{}}}{}", prefix, alternatives.join(","), suffix);
            let expected: Vec<String> = alternatives
                .iter()
                .map(|alternative| format!("{}{}{}", prefix, alternative, suffix))
                .collect();
            prop_assert_eq!(expand_braces(&pattern), expected);
        }

        /// Property: two alternations expand to their cross product
        #[test]
        fn expand_braces_cross_product(
            left in prop::collection::vec("[a-z]{1,3}", 1..4),
            right in prop::collection::vec("[a-z]{1,3}", 1..4),
        ) {
            let pattern = format!("{{{}}}/{{{}}}", left.join(","), right.join(","));
            prop_assert_eq!(expand_braces(&pattern).len(), left.len() * right.len());
        }
    }

    // ============================================================================
    // relative_to property tests
    // ============================================================================

    proptest! {
        /// Property: a path joined onto a base is relativized back to its parts
        #[test]
        fn relative_to_inverts_join(parts in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 1..5)) {
            let base = PathBuf::from("/work/app");
            let mut path = base.clone();
            for part in &parts {
                path.push(part);
            }
            prop_assert_eq!(relative_to(&path, &base), parts.join("/"));
        }
    }
}
