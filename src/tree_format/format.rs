use super::{
    Binding, BlankPiece, ChildrenSlot, ConstantPiece, INodePiece, NodeDraft, PadPiece,
    PatternPiece, RulePiece, SymbolPiece, TreeFormatBuilder,
};
use crate::fragment::FragmentLogger;
use crate::symbol_format::skip_blank;
use crate::{
    BuildError, Fault, FormatError, IDraft, IRecognizer, Log, ParseError, PatternFormat,
    SymbolFormat, Tree, TreeFormat, TreeKind,
};
use once_cell::unsync::OnceCell;
use std::fmt::Write;
use std::rc::Rc;

impl TreeFormatBuilder {
    pub fn new(symbol_format: Rc<SymbolFormat>) -> Self {
        Self {
            symbol_format,
            entries: Vec::new(),
            separator: vec![Rc::new(BlankPiece::new(" "))],
        }
    }

    /// Register the piece sequence for one node variant. The registration order is the order
    /// the parser probes variants in.
    pub fn entry(
        &mut self,
        kind: TreeKind,
        pieces: Vec<Rc<dyn INodePiece>>,
    ) -> Result<&mut Self, BuildError> {
        if self.entries.iter().any(|(registered, _)| *registered == kind) {
            return Err(BuildError::new(
                "DuplicateEntry".to_string(),
                format!("A sequence for {:?} nodes is already registered.", kind),
            ));
        }
        let slots = pieces.iter().filter(|piece| piece.is_children_slot()).count();
        match kind {
            TreeKind::Rule => {
                if slots != 1 {
                    return Err(BuildError::new(
                        "MisplacedChildren".to_string(),
                        "A rule sequence carries exactly one children placeholder.".to_string(),
                    ));
                }
                self.require(&pieces, Binding::Rule, kind)?;
            }
            _ => {
                if slots != 0 {
                    return Err(BuildError::new(
                        "MisplacedChildren".to_string(),
                        format!("A {:?} sequence may not carry a children placeholder.", kind),
                    ));
                }
                match kind {
                    TreeKind::Terminal | TreeKind::Error => {
                        self.require(&pieces, Binding::Symbol, kind)?
                    }
                    TreeKind::Pattern => self.require(&pieces, Binding::Pattern, kind)?,
                    TreeKind::Rule => {}
                }
            }
        }
        self.entries.push((kind, pieces));
        Ok(self)
    }

    fn require(
        &self,
        pieces: &[Rc<dyn INodePiece>],
        binding: Binding,
        kind: TreeKind,
    ) -> Result<(), BuildError> {
        if pieces.iter().any(|piece| piece.binding() == Some(binding)) {
            Ok(())
        } else {
            Err(BuildError::new(
                "IncompleteEntry".to_string(),
                format!(
                    "The {:?} sequence binds no {:?} and could never build its node.",
                    kind, binding
                ),
            ))
        }
    }

    /// Replace the default single-space separator run before every child.
    pub fn separator(&mut self, pieces: Vec<Rc<dyn INodePiece>>) -> &mut Self {
        self.separator = pieces;
        self
    }

    pub fn build(&mut self) -> Result<TreeFormat, BuildError> {
        if self.entries.is_empty() {
            return Err(BuildError::new(
                "EmptyFormat".to_string(),
                "The tree format registers no node sequences.".to_string(),
            ));
        }
        Ok(TreeFormat {
            entries: std::mem::take(&mut self.entries),
            separator: std::mem::take(&mut self.separator),
            symbol_format: self.symbol_format.clone(),
            debugger: OnceCell::new(),
        })
    }
}

impl TreeFormat {
    pub fn builder(symbol_format: Rc<SymbolFormat>) -> TreeFormatBuilder {
        TreeFormatBuilder::new(symbol_format)
    }

    /// The LISP-style notation `( rule child* )` with terminals in the SIMPLE symbol
    /// notation, `(<error> symbol)` wrappers for error nodes and `(<rule> ( pattern ))` for
    /// pattern nodes.
    pub fn simple(recognizer: Option<Rc<dyn IRecognizer>>) -> Self {
        let vocabulary = recognizer.as_ref().map(|r| r.vocabulary());
        let symbol_format = Rc::new(SymbolFormat::simple(vocabulary));
        Self::lisp_style(symbol_format, recognizer, None)
    }

    /// The SIMPLE notation on one line per node: every child starts on its own line, prefixed
    /// by `unit` repeated depth times.
    pub fn indented(unit: &str, recognizer: Option<Rc<dyn IRecognizer>>) -> Self {
        let vocabulary = recognizer.as_ref().map(|r| r.vocabulary());
        let symbol_format = Rc::new(SymbolFormat::simple(vocabulary));
        Self::lisp_style(symbol_format, recognizer, Some(unit))
    }

    /// The ANTLR `toStringTree` notation: `( rule child* )` with terminals rendered as their
    /// escaped text alone.
    pub fn antlr(recognizer: Option<Rc<dyn IRecognizer>>) -> Self {
        let mut symbol_builder = SymbolFormat::builder();
        symbol_builder
            .append_pattern("X")
            .expect("the ANTLR terminal pattern is well formed");
        let symbol_format =
            Rc::new(symbol_builder.build().expect("the ANTLR terminal format always builds"));

        let terminal: Rc<dyn INodePiece> = Rc::new(SymbolPiece::bounded(
            symbol_format.clone(),
            vec!["(", ")"],
            true,
        ));
        let mut builder = TreeFormat::builder(symbol_format);
        builder
            .entry(
                TreeKind::Rule,
                vec![
                    Rc::new(ConstantPiece::new("(")),
                    Rc::new(RulePiece::new(recognizer)),
                    Rc::new(ChildrenSlot),
                    Rc::new(BlankPiece::new("")),
                    Rc::new(ConstantPiece::new(")")),
                ],
            )
            .and_then(|b| b.entry(TreeKind::Terminal, vec![terminal.clone()]))
            .and_then(|b| b.entry(TreeKind::Error, vec![terminal]))
            .expect("the ANTLR tree entries are well formed");
        builder.build().expect("the ANTLR tree format always builds")
    }

    fn lisp_style(
        symbol_format: Rc<SymbolFormat>,
        recognizer: Option<Rc<dyn IRecognizer>>,
        indent_unit: Option<&str>,
    ) -> Self {
        let pattern_format = Rc::new(PatternFormat::new(
            symbol_format.clone(),
            recognizer.clone(),
        ));
        let mut builder = TreeFormat::builder(symbol_format.clone());
        builder
            .entry(
                TreeKind::Rule,
                vec![
                    Rc::new(ConstantPiece::new("(")),
                    Rc::new(RulePiece::new(recognizer.clone())),
                    Rc::new(ChildrenSlot),
                    Rc::new(BlankPiece::new("")),
                    Rc::new(ConstantPiece::new(")")),
                ],
            )
            .and_then(|b| {
                b.entry(
                    TreeKind::Terminal,
                    vec![Rc::new(SymbolPiece::new(symbol_format.clone()))],
                )
            })
            .and_then(|b| {
                b.entry(
                    TreeKind::Error,
                    vec![
                        Rc::new(ConstantPiece::new("(<error>")),
                        Rc::new(BlankPiece::new(" ")),
                        Rc::new(SymbolPiece::new(symbol_format.clone())),
                        Rc::new(BlankPiece::new("")),
                        Rc::new(ConstantPiece::new(")")),
                    ],
                )
            })
            .and_then(|b| {
                b.entry(
                    TreeKind::Pattern,
                    vec![
                        Rc::new(ConstantPiece::new("(<")),
                        Rc::new(RulePiece::new(recognizer)),
                        Rc::new(ConstantPiece::new(">")),
                        Rc::new(BlankPiece::new(" ")),
                        Rc::new(ConstantPiece::new("(")),
                        Rc::new(PatternPiece::new(pattern_format)),
                        Rc::new(ConstantPiece::new(")")),
                        Rc::new(BlankPiece::new("")),
                        Rc::new(ConstantPiece::new(")")),
                    ],
                )
            })
            .expect("the SIMPLE tree entries are well formed");
        if let Some(unit) = indent_unit {
            let unit = unit.to_string();
            builder.separator(vec![Rc::new(PadPiece::with(move |depth| {
                format!("\n{}", unit.repeat(depth))
            }))]);
        }
        builder.build().expect("the SIMPLE tree format always builds")
    }

    pub fn symbol_format(&self) -> &Rc<SymbolFormat> {
        &self.symbol_format
    }

    /// Set a log label to debug the format based on the level of [Log].
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// A readable rendering of the registered node sequences.
    pub fn outline(&self) -> String {
        let mut rendered = String::new();
        for (kind, pieces) in &self.entries {
            let _ = write!(rendered, "{:?}:", kind);
            for piece in pieces {
                let _ = write!(rendered, " {}", piece);
            }
            rendered.push('\n');
        }
        rendered
    }

    /// Render a tree.
    pub fn format(&self, tree: &Tree) -> Result<String, FormatError> {
        let mut buffer = String::new();
        if self.write_node(tree, 0, &mut buffer) {
            #[cfg(debug_assertions)]
            self.log_format_result(true);
            Ok(buffer)
        } else {
            #[cfg(debug_assertions)]
            self.log_format_result(false);
            Err(FormatError::new(
                "UnformattableTree".to_string(),
                format!("No registered node sequence applies within {}.", tree),
            ))
        }
    }

    /// Parse a tree from the whole of `text`, surrounding whitespace aside.
    pub fn parse(&self, text: &str) -> Result<Tree, ParseError> {
        let mut fault = Fault::new();
        let start = skip_blank(text, 0);
        match self.advance_node(text, start, 0, &mut fault) {
            Ok((tree, end)) => {
                let end = skip_blank(text, end);
                if end == text.len() {
                    Ok(tree)
                } else {
                    let mut trailing = Fault::new();
                    trailing.report(end, "Unexpected trailing input.".to_string());
                    Err(ParseError::failure(text, &trailing))
                }
            }
            Err(_) => Err(ParseError::failure(text, &fault)),
        }
    }

    fn entry_of(&self, kind: TreeKind) -> Option<&Vec<Rc<dyn INodePiece>>> {
        self.entries
            .iter()
            .find(|(registered, _)| *registered == kind)
            .map(|(_, pieces)| pieces)
    }

    /// Render one node at `depth`, recursing over children at the placeholder.
    fn write_node(&self, node: &Tree, depth: usize, buffer: &mut String) -> bool {
        let pieces = match self.entry_of(node.kind()) {
            Some(pieces) => pieces,
            None => return false,
        };
        let mark = buffer.len();
        for piece in pieces.iter() {
            if piece.is_children_slot() {
                for child in node.children() {
                    for separator in &self.separator {
                        if !separator.format(child, depth + 1, buffer) {
                            buffer.truncate(mark);
                            return false;
                        }
                    }
                    if !self.write_node(child, depth + 1, buffer) {
                        buffer.truncate(mark);
                        return false;
                    }
                }
            } else if !piece.format(node, depth, buffer) {
                buffer.truncate(mark);
                return false;
            }
        }
        true
    }

    /// Parse one node at `depth`: probe the registered sequences in order and commit to the
    /// first whose prefix matches.
    pub(crate) fn advance_node(
        &self,
        text: &str,
        pointer: usize,
        depth: usize,
        fault: &mut Fault,
    ) -> Result<(Tree, usize), usize> {
        #[cfg(debug_assertions)]
        self.log_entry();

        for (kind, pieces) in &self.entries {
            if self.opens(*kind, pieces, text, pointer, depth) {
                let advanced = self.advance_with(*kind, pieces, text, pointer, depth, fault);
                #[cfg(debug_assertions)]
                self.log_scan_result(text, &advanced.as_ref().map(|(_, end)| *end).map_err(|at| *at));
                return advanced;
            }
        }
        fault.report(pointer, "expected a tree node".to_string());
        Err(pointer)
    }

    /// Whether the sequence's prefix up to the children placeholder matches at `pointer`.
    fn opens(
        &self,
        kind: TreeKind,
        pieces: &[Rc<dyn INodePiece>],
        text: &str,
        pointer: usize,
        depth: usize,
    ) -> bool {
        let probe = NodeDraft::new(kind, depth);
        let mut moved = pointer;
        for piece in pieces {
            if piece.is_children_slot() {
                return true;
            }
            match piece.peek(&probe, text, moved) {
                Ok(end) => moved = end,
                Err(_) => return false,
            }
        }
        true
    }

    fn opens_any(&self, text: &str, pointer: usize, depth: usize) -> bool {
        self.entries
            .iter()
            .any(|(kind, pieces)| self.opens(*kind, pieces, text, pointer, depth))
    }

    fn advance_with(
        &self,
        kind: TreeKind,
        pieces: &[Rc<dyn INodePiece>],
        text: &str,
        pointer: usize,
        depth: usize,
        fault: &mut Fault,
    ) -> Result<(Tree, usize), usize> {
        let mut draft = NodeDraft::new(kind, depth);
        let mut moved = pointer;
        for piece in pieces {
            if piece.is_children_slot() {
                loop {
                    let mut ahead = moved;
                    let mut scratch = NodeDraft::new(kind, depth + 1);
                    let mut separated = true;
                    for separator in &self.separator {
                        match separator.parse(&mut scratch, text, ahead) {
                            Ok(end) => ahead = end,
                            Err(_) => {
                                separated = false;
                                break;
                            }
                        }
                    }
                    if !separated || !self.opens_any(text, ahead, depth + 1) {
                        break;
                    }
                    let (child, end) = self.advance_node(text, ahead, depth + 1, fault)?;
                    if end == ahead {
                        // A node that consumed nothing is no child at all.
                        break;
                    }
                    draft.children.push(child);
                    moved = end;
                }
            } else {
                match piece.parse(&mut draft, text, moved) {
                    Ok(end) => moved = end,
                    Err(at) => {
                        fault.merge(draft.fault());
                        return Err(at);
                    }
                }
            }
        }
        fault.merge(draft.fault());
        match draft.finish() {
            Ok(tree) => Ok((tree, moved)),
            Err(message) => {
                fault.report(moved, message.to_string());
                Err(moved)
            }
        }
    }
}

impl FragmentLogger for TreeFormat {
    fn debug_label(&self) -> Option<&Log<&'static str>> {
        self.debugger.get()
    }
}
