//! Postal address strings.

/// Join the non-blank parts with `separator`, trimming each part.
pub fn join_non_empty<'a, I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Single-line address: street lines, then "City, State, Postal".
///
/// Missing parts are skipped without leaving dangling separators.
pub fn format_address(
    line1: Option<&str>,
    line2: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    postal_code: Option<&str>,
) -> String {
    let locality = join_non_empty([city, state, postal_code], ", ");
    let locality = (!locality.is_empty()).then_some(locality);
    join_non_empty([line1, line2, locality.as_deref()], ", ")
}
