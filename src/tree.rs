use crate::{Symbol, Tree, TreeKind};
use ptree::TreeItem;
use std::fmt::{Display, Formatter};

impl Tree {
    /// Create a rule node owning `children`.
    pub fn rule(rule: i32, children: Vec<Tree>) -> Self {
        Tree::Rule { rule, children }
    }

    /// Create a terminal leaf for `symbol`.
    pub fn terminal(symbol: Symbol) -> Self {
        Tree::Terminal(symbol)
    }

    pub fn kind(&self) -> TreeKind {
        match self {
            Tree::Rule { .. } => TreeKind::Rule,
            Tree::Terminal(_) => TreeKind::Terminal,
            Tree::Error(_) => TreeKind::Error,
            Tree::Pattern(_) => TreeKind::Pattern,
        }
    }

    /// The node's children; leaves report an empty slice.
    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Rule { children, .. } => children,
            _ => &[],
        }
    }

    /// The symbol of a terminal or error leaf.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Tree::Terminal(symbol) | Tree::Error(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// The rule identifier of a rule or pattern node.
    pub fn rule_id(&self) -> Option<i32> {
        match self {
            Tree::Rule { rule, .. } => Some(*rule),
            Tree::Pattern(pattern) => pattern.rule,
            _ => None,
        }
    }

    /// The longest downward distance from this node to a leaf.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Visit this node and every descendant in pre-order.
    pub fn walk<'t, F: FnMut(&'t Tree)>(&'t self, visit: &mut F) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Search this subtree in pre-order and return the first node the predicate accepts.
    pub fn find<F: Fn(&Tree) -> bool>(&self, predicate: &F) -> Option<&Tree> {
        if predicate(self) {
            Some(self)
        } else {
            self.children()
                .iter()
                .find_map(|child| child.find(predicate))
        }
    }

    /// Collect every node of this subtree the predicate accepts, in pre-order.
    pub fn list<'t, F: Fn(&Tree) -> bool>(&'t self, predicate: &F) -> Vec<&'t Tree> {
        let mut listed = Vec::new();
        self.walk(&mut |node| {
            if predicate(node) {
                listed.push(node);
            }
        });
        listed
    }

    pub fn contains<F: Fn(&Tree) -> bool>(&self, predicate: &F) -> bool {
        self.find(predicate).is_some()
    }

    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tree::Rule { rule, children } => {
                write!(f, "(#{}", rule)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
            Tree::Terminal(symbol) => write!(f, "{:?}", symbol.text),
            Tree::Error(symbol) => write!(f, "<error {:?}>", symbol.text),
            Tree::Pattern(pattern) => write!(f, "{:?}", pattern),
        }
    }
}

impl TreeItem for Tree {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            Tree::Rule { rule, .. } => write!(f, "rule #{}", rule),
            Tree::Terminal(symbol) => write!(f, "{} {:?}", symbol.token_type, symbol.text),
            Tree::Error(symbol) => write!(f, "error {} {:?}", symbol.token_type, symbol.text),
            Tree::Pattern(pattern) => write!(f, "pattern {:?}", pattern.rule),
        }
    }

    fn children(&self) -> std::borrow::Cow<[Self::Child]> {
        std::borrow::Cow::from(self.children())
    }
}
