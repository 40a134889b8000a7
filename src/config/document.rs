//! Thin wrapper over the `kdl` crate.
//!
//! The rest of the config module reads settings through [`ConfigDocument`],
//! [`ConfigSection`] and [`ParseNode`] and never touches KDL types directly.

/// Parsed KDL document paired with its source text.
pub(super) struct ConfigDocument {
    doc: kdl::KdlDocument,
    source: String,
}

/// Borrowed view into the children block of a top-level node.
pub(super) struct ConfigSection<'a> {
    doc: &'a kdl::KdlDocument,
    source: &'a str,
}

/// Single KDL node with source context for line-number reporting.
pub(super) struct ParseNode<'a> {
    node: &'a kdl::KdlNode,
    source: &'a str,
}

impl ConfigDocument {
    pub(super) fn parse(source: &str) -> Result<Self, super::ConfigError> {
        let doc: kdl::KdlDocument = source
            .parse()
            .map_err(|e: kdl::KdlError| super::ConfigError::ParseError(e.to_string()))?;
        Ok(Self {
            doc,
            source: source.to_string(),
        })
    }

    /// All top-level nodes, for rejecting unknown sections.
    pub(super) fn top_level(&self) -> Vec<ParseNode<'_>> {
        self.doc
            .nodes()
            .iter()
            .map(|node| ParseNode {
                node,
                source: &self.source,
            })
            .collect()
    }

    /// `section("commit-spec")` returns the contents of the `commit-spec { … }` block.
    pub(super) fn section(&self, name: &str) -> Option<ConfigSection<'_>> {
        self.doc
            .get(name)
            .and_then(|n| n.children())
            .map(|doc| ConfigSection {
                doc,
                source: &self.source,
            })
    }
}

impl<'a> ConfigSection<'a> {
    pub(super) fn nodes(&self) -> Vec<ParseNode<'a>> {
        self.doc
            .nodes()
            .iter()
            .map(|node| ParseNode {
                node,
                source: self.source,
            })
            .collect()
    }
}

impl<'a> ParseNode<'a> {
    pub(super) fn name(&self) -> &str {
        self.node.name().value()
    }

    /// Positional string arguments, in order.
    pub(super) fn string_values(&self) -> Vec<&'a str> {
        self.node
            .entries()
            .iter()
            .filter(|e| e.name().is_none())
            .filter_map(|e| e.value().as_string())
            .collect()
    }

    /// The single positional boolean argument, if that is all the node carries.
    pub(super) fn bool_value(&self) -> Option<bool> {
        match self.node.entries() {
            [entry] if entry.name().is_none() => entry.value().as_bool(),
            _ => None,
        }
    }

    /// Total number of entries (all types, not just strings).
    pub(super) fn entry_count(&self) -> usize {
        self.node.entries().len()
    }

    /// 1-based line number of this node in the settings file.
    pub(super) fn line(&self) -> usize {
        let offset = self.node.span().offset();
        self.source.as_bytes()[..offset.min(self.source.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}
