//! Chapter file naming.
//!
//! File names are derived from the chapter title so the archive stays
//! readable when unzipped, but the 1-based chapter number is always part of
//! the name, so two chapters with the same title can't collide.

/// Longest slug kept from a title, in characters.
pub const MAX_SLUG_LEN: usize = 50;

/// Derive the archive file name for the chapter at the 0-based `index`.
///
/// `"My Story!"` at index 0 becomes `chapter_01_my_story.xhtml`. A title with
/// nothing usable left after stripping becomes `chapter_01.xhtml`.
pub fn sanitize(title: &str, index: usize) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("chapter_{:02}.xhtml", index + 1)
    } else {
        format!("chapter_{:02}_{}.xhtml", index + 1, slug)
    }
}

fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            // whitespace runs collapse to a single underscore
            if !in_whitespace {
                slug.push('_');
                in_whitespace = true;
            }
        } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            slug.push(c);
            in_whitespace = false;
        }
    }

    slug.chars().take(MAX_SLUG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_sanitize_simple_title() {
        assert_eq!(sanitize("Introduction", 0), "chapter_01_introduction.xhtml");
        assert_eq!(sanitize("My Story!", 11), "chapter_12_my_story.xhtml");
    }

    #[test]
    fn can_keep_dots_hyphens_and_underscores() {
        assert_eq!(
            sanitize("notes-v1.2_final.txt", 2),
            "chapter_03_notes-v1.2_final.txt.xhtml"
        );
    }

    #[test]
    fn can_collapse_whitespace_runs() {
        assert_eq!(sanitize("a \t\n  b", 0), "chapter_01_a_b.xhtml");
    }

    #[test]
    fn can_degrade_empty_titles() {
        assert_eq!(sanitize("", 0), "chapter_01.xhtml");
        assert_eq!(sanitize("!!!???", 4), "chapter_05.xhtml");
    }

    #[test]
    fn can_truncate_long_titles() {
        let title = "x".repeat(200);
        let name = sanitize(&title, 0);
        assert_eq!(name, format!("chapter_01_{}.xhtml", "x".repeat(MAX_SLUG_LEN)));
    }

    #[test]
    fn identical_titles_do_not_collide() {
        let a = sanitize("Same Title", 0);
        let b = sanitize("Same Title", 1);
        assert_ne!(a, b);
        assert!(a.ends_with("_same_title.xhtml"));
        assert!(b.ends_with("_same_title.xhtml"));
    }

    #[test]
    fn pads_past_two_digits_without_truncating() {
        assert_eq!(sanitize("end", 99), "chapter_100_end.xhtml");
    }
}
