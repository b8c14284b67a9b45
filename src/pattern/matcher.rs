use super::{MatchResult, Pattern, PatternElement};
use crate::{SymbolFormat, Tree, TreeMatcher};
use std::collections::HashMap;

impl<'t> MatchResult<'t> {
    fn success(matched: &'t Tree, labels: HashMap<String, Vec<&'t Tree>>) -> Self {
        Self {
            succeeded: true,
            matched: Some(matched),
            labels,
        }
    }

    fn failure() -> Self {
        Self {
            succeeded: false,
            matched: None,
            labels: HashMap::new(),
        }
    }

    /// The first node bound to `label`.
    pub fn get(&self, label: &str) -> Option<&'t Tree> {
        self.labels.get(label).and_then(|bound| bound.first().copied())
    }

    /// Every node bound to `label`, in match order.
    pub fn all(&self, label: &str) -> &[&'t Tree] {
        self.labels.get(label).map_or(&[], |bound| bound.as_slice())
    }
}

impl TreeMatcher {
    /// A matcher for a standalone pattern. The symbol format supplies the field equalizer:
    /// concrete elements are compared on the fields the format can print, which makes
    /// matching tolerant of index and position noise by default.
    pub fn new(pattern: Pattern, format: &SymbolFormat) -> Self {
        Self {
            template: Tree::Pattern(pattern),
            coverage: format.coverage().to_vec(),
        }
    }

    /// A matcher for a tree template; pattern nodes may appear anywhere inside it.
    pub fn template(template: Tree, format: &SymbolFormat) -> Self {
        Self {
            template,
            coverage: format.coverage().to_vec(),
        }
    }

    /// Match the template against `tree`. On success the result reports `tree` itself as the
    /// matched subtree together with every hole binding; a failure carries no bindings.
    pub fn match_tree<'t>(&self, tree: &'t Tree) -> MatchResult<'t> {
        let mut labels = HashMap::new();
        if self.impl_match(&self.template, tree, &mut labels) {
            MatchResult::success(tree, labels)
        } else {
            MatchResult::failure()
        }
    }

    /// Collect every node of the tree, in pre-order, at which the template matches. Matched
    /// subtrees are descended into, so nested occurrences are all reported.
    pub fn find_all<'t>(&self, root: &'t Tree) -> Vec<&'t Tree> {
        let mut found = Vec::new();
        root.walk(&mut |node| {
            if self.match_tree(node).succeeded {
                found.push(node);
            }
        });
        found
    }

    fn impl_match<'t>(
        &self,
        template: &Tree,
        node: &'t Tree,
        labels: &mut HashMap<String, Vec<&'t Tree>>,
    ) -> bool {
        match (template, node) {
            (Tree::Pattern(pattern), Tree::Rule { rule, children }) => {
                if pattern.rule.map_or(false, |expected| expected != *rule) {
                    return false;
                }
                if children.len() != pattern.elements.len() {
                    return false;
                }
                pattern
                    .elements
                    .iter()
                    .zip(children)
                    .all(|(element, child)| self.impl_element(element, child, labels))
            }
            (
                Tree::Rule {
                    rule: expected_rule,
                    children: expected_children,
                },
                Tree::Rule { rule, children },
            ) => {
                expected_rule == rule
                    && expected_children.len() == children.len()
                    && expected_children
                        .iter()
                        .zip(children)
                        .all(|(expected, child)| self.impl_match(expected, child, labels))
            }
            (
                Tree::Terminal(expected) | Tree::Error(expected),
                Tree::Terminal(actual) | Tree::Error(actual),
            ) => expected.equals_on(actual, &self.coverage),
            _ => false,
        }
    }

    fn impl_element<'t>(
        &self,
        element: &PatternElement,
        child: &'t Tree,
        labels: &mut HashMap<String, Vec<&'t Tree>>,
    ) -> bool {
        match element {
            PatternElement::Symbol(expected) => match child {
                Tree::Terminal(actual) | Tree::Error(actual) => {
                    expected.equals_on(actual, &self.coverage)
                }
                _ => false,
            },
            PatternElement::RuleHole { rule, label } => match child {
                Tree::Rule { rule: actual, .. } if actual == rule => {
                    Self::bind(labels, label, child);
                    true
                }
                _ => false,
            },
            PatternElement::TokenHole { token_type, label } => {
                // A terminal wrapped in a chain of single-child rules still satisfies a token
                // hole; the binding is the outermost wrapped node.
                let mut unwrapped = child;
                loop {
                    match unwrapped {
                        Tree::Terminal(actual) | Tree::Error(actual) => {
                            if actual.token_type == *token_type {
                                Self::bind(labels, label, child);
                                return true;
                            }
                            return false;
                        }
                        Tree::Rule { children, .. } if children.len() == 1 => {
                            unwrapped = &children[0];
                        }
                        _ => return false,
                    }
                }
            }
        }
    }

    fn bind<'t>(
        labels: &mut HashMap<String, Vec<&'t Tree>>,
        label: &Option<String>,
        node: &'t Tree,
    ) {
        if let Some(label) = label {
            labels.entry(label.clone()).or_default().push(node);
        }
    }
}
