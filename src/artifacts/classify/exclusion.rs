/// Ordered list of relative-path prefixes to leave out of a comparison.
///
/// Matching is whole-segment: an entry excludes the path equal to it and
/// everything below it, but never a sibling whose name merely starts with
/// the entry ("build" excludes "build/sub/x", not "build2").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: Vec<String>,
}

impl ExclusionSet {
    pub fn new(entries: Vec<String>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                entry
                    .replace('\\', "/")
                    .trim_matches('/')
                    .to_string()
            })
            .filter(|entry| !entry.is_empty())
            .collect();

        ExclusionSet { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.entries.iter().any(|entry| {
            relative == entry
                || relative
                    .strip_prefix(entry.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExclusionSet::new(iter.into_iter().map(Into::into).collect())
    }
}
