//! Class-name string helpers.

/// Joins class names with single spaces.
///
/// Each input may itself hold several space-separated classes. Empty inputs
/// are skipped and repeated classes keep their first position.
///
/// # Example
///
/// ```rust
/// use tincture::join_classes;
///
/// assert_eq!(join_classes(["a b", "", "c a"]), "a b c");
/// ```
pub fn join_classes<'a, I>(classes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for class in classes.into_iter().flat_map(str::split_whitespace) {
        if !seen.contains(&class) {
            seen.push(class);
        }
    }
    seen.join(" ")
}
