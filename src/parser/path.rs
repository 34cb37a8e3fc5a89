use std::fmt;

use serde_json::Value;

/// One typed navigation step into a parsed JSON tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
    /// Fan out over every element of an array.
    Each,
}

impl Step {
    fn apply<'a>(&self, node: &'a Value, out: &mut Vec<&'a Value>) {
        match self {
            Step::Key(key) => out.extend(node.as_object().and_then(|o| o.get(key))),
            Step::Index(i) => out.extend(node.as_array().and_then(|a| a.get(*i))),
            Step::Each => out.extend(node.as_array().into_iter().flatten()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, ".{}", key),
            Step::Index(i) => write!(f, "[{}]", i),
            Step::Each => f.write_str("[*]"),
        }
    }
}

/// Fixed route from the root object to the arrays holding result entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPath {
    steps: Vec<Step>,
}

/// Where walking a `ResultsPath` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMiss {
    /// Path walked successfully before the failing step.
    pub walked: String,
    pub step: Step,
    pub found: &'static str,
}

impl fmt::Display for PathMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step `{}` not satisfied after `{}` (found {})",
            self.step,
            if self.walked.is_empty() { "$" } else { self.walked.as_str() },
            self.found
        )
    }
}

impl ResultsPath {
    pub fn new(steps: Vec<Step>) -> Self {
        ResultsPath { steps }
    }

    /// Dotted keys, one `Key` step each. `[*]` and `[n]` suffixes become
    /// `Each`/`Index` steps, e.g. `"contents[*].items"`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let mut steps = Vec::new();
        for part in spec.split('.').filter(|p| !p.is_empty()) {
            let (key, mut rest) = match part.find(['[', ']']) {
                Some(i) => part.split_at(i),
                None => (part, ""),
            };
            if !key.is_empty() {
                steps.push(Step::Key(key.to_string()));
            }
            while !rest.is_empty() {
                let (inner, tail) = rest
                    .strip_prefix('[')
                    .and_then(|r| r.split_once(']'))
                    .ok_or_else(|| format!("bad index in `{}` of path `{}`", part, spec))?;
                let step = match inner {
                    "*" => Step::Each,
                    n => Step::Index(
                        n.parse()
                            .map_err(|_| format!("bad index `[{}]` in path `{}`", n, spec))?,
                    ),
                };
                steps.push(step);
                rest = tail;
            }
        }
        Ok(ResultsPath { steps })
    }

    /// Search results layout of the public results page.
    pub fn youtube_search() -> Self {
        let key = |k: &str| Step::Key(k.to_string());
        ResultsPath::new(vec![
            key("contents"),
            key("twoColumnSearchResultsRenderer"),
            key("primaryContents"),
            key("sectionListRenderer"),
            key("contents"),
            Step::Each,
            key("itemSectionRenderer"),
            key("contents"),
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Walk the path and return every entry found at its end, in order.
    ///
    /// After an `Each` some branches may lack the next key (continuation
    /// markers, ads); those are dropped. A step only fails when no node at
    /// all satisfies it.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<Vec<&'a Value>, PathMiss> {
        let mut frontier = vec![root];
        let mut walked = String::new();

        for step in &self.steps {
            let mut next = Vec::new();
            for node in &frontier {
                step.apply(node, &mut next);
            }
            let drifted = match step {
                Step::Each => !frontier.iter().any(|v| v.is_array()),
                _ => next.is_empty(),
            };
            // An empty frontier means an empty array upstream, not drift.
            if drifted && !frontier.is_empty() {
                return Err(PathMiss {
                    walked,
                    step: step.clone(),
                    found: kind(frontier[0]),
                });
            }
            walked.push_str(&step.to_string());
            frontier = next;
        }

        // The path ends at the entry arrays.
        if !frontier.is_empty() && !frontier.iter().any(|v| v.is_array()) {
            return Err(PathMiss {
                walked,
                step: Step::Each,
                found: kind(frontier[0]),
            });
        }
        Ok(frontier
            .into_iter()
            .filter_map(Value::as_array)
            .flatten()
            .collect())
    }
}

impl Default for ResultsPath {
    fn default() -> Self {
        ResultsPath::youtube_search()
    }
}

impl fmt::Display for ResultsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
