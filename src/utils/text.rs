//! Text helpers

/// Derive a pull request title from a branch name
///
/// Separators become spaces and every word is capitalized, so
/// `feature/add-login_page` becomes `Feature/Add Login Page`.
pub fn title_from_branch(branch: &str) -> String {
    let spaced = branch.replace(['-', '_'], " ");

    let mut title = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                title.extend(c.to_uppercase());
            } else {
                title.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            title.push(c);
            at_word_start = true;
        }
    }
    title
}
