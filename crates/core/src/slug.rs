//! Canonical slug used by completion-key derivation.
//!
//! Two slightly different sluggers existed historically (one per view);
//! this is the single canonical one. Keys already written with this
//! scheme must keep deriving identically, so the steps below are fixed:
//!
//! 1. lower-case
//! 2. strip a leading `http://` / `https://`
//! 3. collapse runs of characters outside `[a-z0-9/_-]` into a single `-`
//! 4. collapse repeated `/` into one
//! 5. replace every `/` with `_`
//! 6. collapse repeated `_`
//! 7. trim leading/trailing `_`

/// Slugify a string for use inside a completion key. Idempotent.
pub fn slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = lowered
        .strip_prefix("http://")
        .or_else(|| lowered.strip_prefix("https://"))
        .unwrap_or(&lowered);

    // Steps 3 and 4 in one pass.
    let mut collapsed = String::with_capacity(stripped.len());
    let mut pending_dash = false;
    for c in stripped.chars() {
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '/' | '_' | '-');
        if keep {
            if pending_dash {
                collapsed.push('-');
                pending_dash = false;
            }
            if c == '/' && collapsed.ends_with('/') {
                continue;
            }
            collapsed.push(c);
        } else {
            pending_dash = true;
        }
    }
    if pending_dash {
        collapsed.push('-');
    }

    // Steps 5 and 6.
    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        let c = if c == '/' { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    // Step 7.
    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_protocol() {
        assert_eq!(slug("https://Example.com/Path"), "example-com_path");
        assert_eq!(slug("HTTP://host/a"), "host_a");
    }

    #[test]
    fn collapses_disallowed_runs_into_one_dash() {
        assert_eq!(slug("hello  world!!"), "hello-world-");
        assert_eq!(slug("a.b,c"), "a-b-c");
    }

    #[test]
    fn slashes_become_underscores() {
        assert_eq!(slug("onboarding/policies"), "onboarding_policies");
        assert_eq!(slug("a//b///c"), "a_b_c");
    }

    #[test]
    fn collapses_and_trims_underscores() {
        assert_eq!(slug("__a__b__"), "a_b");
        assert_eq!(slug("/leading/and/trailing/"), "leading_and_trailing");
    }

    #[test]
    fn empty_and_degenerate_inputs() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("___"), "");
        assert_eq!(slug("///"), "");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "https://Example.com/Path",
            "hello  world!!",
            "a//b///c",
            "__a__b__",
            "signed_contract",
            "/onboarding/policies",
            "",
        ] {
            let once = slug(input);
            assert_eq!(slug(&once), once, "slug must be idempotent for {input:?}");
        }
    }
}
