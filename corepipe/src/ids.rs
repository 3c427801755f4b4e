// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Slug and Id Utilities
//!
//! `slugify` uses the replace-with-hyphen variant: every byte outside
//! `[a-z0-9- ]` becomes `-`, rather than being stripped outright. This
//! collapses `"My Agent!!"` and `"My Agent__"` onto the same slug, which is
//! an acceptable trade against the alternative (strip-then-collapse)
//! colliding `"a.b"` and `"ab"` instead — replace-with-hyphen was chosen
//! because it keeps punctuation visually present as a separator rather than
//! silently deleting it.
//!
//! `mint_id` mints a ULID rather than a clock-plus-random scheme: ULIDs are
//! lexicographically sortable and carry 128 bits of entropy, so ids
//! minted in the same millisecond still sort by insertion order.

use regex::Regex;
use std::sync::OnceLock;

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("valid regex"))
}

/// Lowercases `name`, replaces every byte outside `[a-z0-9- ]` with `-`,
/// replaces spaces with `-`, collapses runs of `-`, and trims leading and
/// trailing `-`. Performs no length truncation.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut mapped = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch == ' ' {
            mapped.push('-');
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            mapped.push(ch);
        } else {
            mapped.push('-');
        }
    }

    let mut collapsed = String::with_capacity(mapped.len());
    let mut last_was_hyphen = false;
    for ch in mapped.chars() {
        if ch == '-' {
            if !last_was_hyphen {
                collapsed.push('-');
            }
            last_was_hyphen = true;
        } else {
            collapsed.push(ch);
            last_was_hyphen = false;
        }
    }

    collapsed.trim_matches('-').to_string()
}

/// Matches `^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$`. Empty is invalid.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug_pattern().is_match(slug)
}

/// Mints `"<prefix>-<ulid>"`, lowercasing the ULID's Crockford base32
/// encoding to match the slug/id style used elsewhere in the core. Distinct
/// across any number of rapid successive calls: a ULID's 80 bits of random
/// payload make a same-millisecond collision astronomically unlikely, and
/// its monotonic-within-millisecond generator (when available) makes it
/// impossible within a single thread.
pub fn mint_id(prefix: &str) -> String {
    let ulid = ulid::Ulid::new();
    format!("{prefix}-{}", ulid.to_string().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates_spaces() {
        assert_eq!(slugify("My Agent"), "my-agent");
    }

    #[test]
    fn slugify_replaces_punctuation_with_hyphen_and_collapses() {
        assert_eq!(slugify("Hello, World!!"), "hello-world");
        assert_eq!(slugify("a.b.c"), "a-b-c");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_hyphens() {
        assert_eq!(slugify("  --Weird Name--  "), "weird-name");
    }

    #[test]
    fn slugify_never_truncates() {
        let long_name = "a".repeat(300);
        assert_eq!(slugify(&long_name).len(), 300);
    }

    #[test]
    fn reslugify_is_identity_on_slugs() {
        for name in ["My Agent", "Hello, World!!", "already-a-slug", "a.b.c"] {
            let slug = slugify(name);
            assert_eq!(slugify(&slug), slug, "slugify should be idempotent on its own output");
        }
    }

    #[test]
    fn is_valid_slug_accepts_lowercase_alphanumeric_and_hyphen() {
        assert!(is_valid_slug("my-agent"));
        assert!(is_valid_slug("a"));
        assert!(is_valid_slug("a1-b2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("Has-Upper"));
        assert!(!is_valid_slug("has_underscore"));
    }

    #[test]
    fn mint_id_produces_distinct_prefixed_ids_across_rapid_calls() {
        let ids: Vec<String> = (0..100).map(|_| mint_id("agt")).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 100, "100 rapid calls must yield 100 distinct ids");
        for id in &ids {
            assert!(id.starts_with("agt-"));
        }
    }
}
