/// Trim surrounding newlines and fold the remaining ones into single spaces.
/// Other whitespace (`\r`, tabs, runs of spaces) is left untouched.
pub fn clean_contents(contents: &str) -> String {
    contents.trim_matches('\n').replace('\n', " ")
}

pub fn fragment_link(url: &str, id: Option<&str>) -> String {
    format!("{}#{}", url, id.unwrap_or_default())
}
