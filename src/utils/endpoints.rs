use crate::models::traffic::RepoRef;
use regex::{Captures, Regex};
use lazy_static::lazy_static;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"##(owner|name)##").unwrap();
}

/// Substitutes `##owner##` and `##name##` in an endpoint template.
pub fn render_endpoint(template: &str, repo: &RepoRef) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "owner" => repo.owner,
            _ => repo.name,
        })
        .into_owned()
}
