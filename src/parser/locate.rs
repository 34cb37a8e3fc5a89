use regex::Regex;

/// Finds an object-literal assignment to a named variable inside script text.
///
/// Matches `name = {`, `window.name = {` and `window["name"] = {`. A name that is only the
/// tail of a longer identifier does not match.
#[derive(Debug, Clone)]
pub struct Locator {
    variable: String,
    re: Regex,
}

impl Locator {
    pub fn for_variable(variable: &str) -> Result<Self, regex::Error> {
        let name = regex::escape(variable);
        let pattern = format!(r#"(?m)(?:(?:^|[^\w$.]|\bwindow\.){name}|\[\s*["']{name}["']\s*\])\s*=\s*\{{"#);
        Ok(Locator {
            variable: variable.to_string(),
            re: Regex::new(&pattern)?,
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Remainder of the first matching script, starting at the value's `{`.
    /// Later scripts are never considered once one matches.
    pub fn locate<'a>(&self, scripts: &[&'a str]) -> Option<&'a str> {
        scripts.iter().find_map(|&script| {
            let m = self.re.find(script)?;
            // The match always ends with the opening brace.
            Some(&script[m.end() - 1..])
        })
    }
}
