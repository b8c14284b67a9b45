use super::NodeDraft;
use crate::{Fault, IDraft, Tree, TreeKind};

impl NodeDraft {
    pub fn new(kind: TreeKind, depth: usize) -> Self {
        Self {
            kind,
            depth,
            rule: None,
            symbol: None,
            pattern: None,
            children: Vec::new(),
            fault: Fault::new(),
        }
    }

    /// Build the node for the draft's kind; a missing required binding is a message for the
    /// caller's fault record.
    pub fn finish(self) -> Result<Tree, String> {
        match self.kind {
            TreeKind::Rule => Ok(Tree::Rule {
                rule: self
                    .rule
                    .ok_or("The rule format bound no rule identifier.")?,
                children: self.children,
            }),
            TreeKind::Terminal => Ok(Tree::Terminal(
                self.symbol.ok_or("The terminal format bound no symbol.")?,
            )),
            TreeKind::Error => Ok(Tree::Error(
                self.symbol.ok_or("The error format bound no symbol.")?,
            )),
            TreeKind::Pattern => {
                let mut pattern = self
                    .pattern
                    .ok_or("The pattern format bound no pattern body.")?;
                pattern.rule = self.rule.or(pattern.rule);
                Ok(Tree::Pattern(pattern))
            }
        }
    }
}

impl IDraft for NodeDraft {
    fn fault(&self) -> &Fault {
        &self.fault
    }

    fn fault_mut(&mut self) -> &mut Fault {
        &mut self.fault
    }
}
