//! Class catalogs consumed by the completion engine: flat sets of fully
//! qualified class names populated by an external indexer at startup (see
//! the glossary entry for "qualified name").

use langsvc_parse::{last_name, matches_partial_name};
use std::collections::HashSet;

/// One class discovered by walking the workspace's own sourcepath, as
/// opposed to the JDK or external classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcepathClass {
    pub qualified_name: String,
    pub is_public: bool,
    pub package: String,
}

/// The three class lists the identifier- and member-completion rules
/// consult: `jdkClasses`, `classPathClasses`, and the workspace's own
/// sourcepath.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalogs {
    pub jdk_classes: HashSet<String>,
    pub classpath_classes: HashSet<String>,
    pub sourcepath_classes: Vec<SourcepathClass>,
}

impl ClassCatalogs {
    pub fn new(
        jdk_classes: HashSet<String>,
        classpath_classes: HashSet<String>,
        sourcepath_classes: Vec<SourcepathClass>,
    ) -> Self {
        Self { jdk_classes, classpath_classes, sourcepath_classes }
    }

    /// Every class in the JDK or classpath catalog whose simple name starts
    /// with `prefix`, tagged with whether it came from the JDK list.
    pub fn classes_matching_simple_name<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, bool)> {
        self.jdk_classes
            .iter()
            .map(|n| (n.as_str(), true))
            .chain(self.classpath_classes.iter().map(|n| (n.as_str(), false)))
            .filter(move |(name, _)| matches_partial_name(last_name(name), prefix))
    }

    /// Sourcepath classes visible from `current_package`: public classes
    /// anywhere, plus non-public classes from the same package, whose simple
    /// name starts with `prefix`.
    pub fn sourcepath_matching_simple_name<'a>(
        &'a self,
        prefix: &'a str,
        current_package: &'a str,
    ) -> impl Iterator<Item = &'a SourcepathClass> {
        self.sourcepath_classes.iter().filter(move |c| {
            (c.is_public || c.package == current_package)
                && matches_partial_name(last_name(&c.qualified_name), prefix)
        })
    }

    /// Every immediate child segment of `package_prefix` (class or
    /// sub-package) across the JDK and classpath catalogs whose name starts
    /// with `segment_prefix`.
    pub fn next_segments(&self, package_prefix: &str, segment_prefix: &str) -> HashSet<String> {
        let dotted_prefix =
            if package_prefix.is_empty() { String::new() } else { format!("{package_prefix}.") };
        let mut out = HashSet::new();
        for name in self.jdk_classes.iter().chain(self.classpath_classes.iter()) {
            let Some(rest) = name.strip_prefix(dotted_prefix.as_str()) else { continue };
            if rest.is_empty() {
                continue;
            }
            let segment = rest.split('.').next().unwrap_or(rest);
            if matches_partial_name(segment, segment_prefix) {
                out.insert(segment.to_string());
            }
        }
        out
    }
}
