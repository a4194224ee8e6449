use unicode_normalization::UnicodeNormalization;

/// Derives a URL slug from free text.
///
/// Lower-cases, decomposes (NFD) and drops combining marks, maps `đ` to `d`,
/// turns every run of characters outside `[a-z0-9]` into one hyphen and trims
/// hyphens at both ends. The output is a fixed point: `slugify(slugify(x)) ==
/// slugify(x)`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = if c == 'đ' { 'd' } else { c };
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Machine fallback used when a new posting has no usable slug.
pub fn fallback_job_slug(millis: i64) -> String {
    format!("job-{}", millis)
}

/// Disambiguates a slug already taken by another record.
pub fn disambiguate(slug: &str, millis: i64) -> String {
    format!("{}-{}", slug, millis)
}
