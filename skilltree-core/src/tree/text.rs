// Indented text tree source.
//
// Format:
// - one node per line, two spaces of indentation per level
// - each node line starts with a numeric prefix: `1. Run 1km`
// - the label is the text after the prefix, up to the next ". " if any
// - optional trailing direction: `1. Health 🏋️ @right`
// - `@layout <name>` picks the layout strategy
// - blank lines are skipped
//
// Top-level lines become children of a synthetic `Start` root.
// Parsing is best-effort: malformed lines become empty-label nodes and are
// reported as warnings, never as errors.

use serde::Serialize;

use crate::tree::types::{Direction, Node, NodeId, SkillTree, first_emoji};

/// Label (and id) of the synthetic root node.
pub const ROOT_LABEL: &str = "Start";

/// Spaces per indentation level.
const INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub line: usize, // 1-based
    pub msg: String,
}

#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub tree: SkillTree,
    pub warnings: Vec<ParseWarning>,
}

pub fn parse_tree(input: &str) -> ParsedTree {
    let parsed = Parser::new(input).run();
    for w in &parsed.warnings {
        log::warn!("tree source line {}: {}", w.line, w.msg);
    }
    parsed
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    i: usize,
    warnings: Vec<ParseWarning>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let lines = input
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect::<Vec<_>>();
        Self {
            lines,
            i: 0,
            warnings: Vec::new(),
        }
    }

    fn eof(&self) -> bool {
        self.i >= self.lines.len()
    }

    fn line_no(&self) -> usize {
        self.i + 1
    }

    fn advance(&mut self) {
        self.i += 1;
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(ParseWarning {
            line: self.line_no(),
            msg: msg.into(),
        });
    }

    fn run(mut self) -> ParsedTree {
        let mut layout: Option<String> = None;

        // stack[0] is the root; stack[k] is the open node at depth k
        let mut stack: Vec<Node> = vec![Node::new(ROOT_LABEL)];

        while !self.eof() {
            let raw = self.lines[self.i];
            let t = raw.trim();

            if t.is_empty() {
                self.advance();
                continue;
            }

            if let Some(rest) = t.strip_prefix("@layout") {
                let name = rest.trim();
                if name.is_empty() {
                    self.warn("expected a strategy name after '@layout'");
                } else {
                    layout = Some(name.to_string());
                }
                self.advance();
                continue;
            }

            let level = indent_level(raw);
            let node = self.parse_node_line(t);

            while stack.len() > level + 1 {
                attach_top(&mut stack);
            }
            stack.push(node);
            self.advance();
        }

        while stack.len() > 1 {
            attach_top(&mut stack);
        }
        let root = stack.pop().unwrap_or_else(|| Node::new(ROOT_LABEL));

        let tree = SkillTree { root, layout };
        for dup in tree.duplicate_ids() {
            self.warnings.push(ParseWarning {
                line: 0,
                msg: format!("duplicate node name '{}'; expand/complete will affect all copies", dup),
            });
        }

        ParsedTree {
            tree,
            warnings: self.warnings,
        }
    }

    fn parse_node_line(&mut self, t: &str) -> Node {
        let Some(rest) = strip_number_prefix(t) else {
            self.warn(format!("expected 'N. ' prefix before label in '{}'", t));
            return self.unlabeled_node();
        };

        let label_part = match rest.split_once(". ") {
            Some((label, _)) => label,
            None => rest,
        };

        let (label, direction) = self.split_annotation(label_part.trim());
        if label.is_empty() {
            self.warn("empty label");
            let mut node = self.unlabeled_node();
            node.direction = direction;
            return node;
        }

        Node {
            id: NodeId(label.to_string()),
            label: label.to_string(),
            glyph: first_emoji(label),
            direction,
            children: Vec::new(),
        }
    }

    /// Empty-label node with a line-derived id so children still nest under it.
    fn unlabeled_node(&self) -> Node {
        Node::new("").with_id(format!("#line{}", self.line_no()))
    }

    /// Splits a trailing `@direction` off the label.
    fn split_annotation<'s>(&mut self, label: &'s str) -> (&'s str, Option<Direction>) {
        let Some((head, tail)) = label.rsplit_once('@') else {
            return (label, None);
        };
        // `@` inside a word (e.g. an e-mail address) is not an annotation
        if !(head.is_empty() || head.ends_with(char::is_whitespace)) || tail.contains(char::is_whitespace) {
            return (label, None);
        }
        match Direction::from_keyword(tail) {
            Some(d) => (head.trim_end(), Some(d)),
            None => {
                self.warn(format!("unknown annotation '@{}'", tail));
                (head.trim_end(), None)
            }
        }
    }
}

/// Pops the top node and appends it to its parent.
fn attach_top(stack: &mut Vec<Node>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn indent_level(raw: &str) -> usize {
    let width: usize = raw
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum();
    width / INDENT_WIDTH
}

/// `"12. Label"` -> `Some("Label")`. Dotted numbering like `1.2. ` is accepted.
fn strip_number_prefix(t: &str) -> Option<&str> {
    let (prefix, rest) = t.split_once(". ")?;
    if prefix.is_empty() || !prefix.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if !prefix.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_labels(node: &Node) -> Vec<&str> {
        node.children.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_parse_nested() {
        let input = "1. Health\n  1. Running\n    1. Run 1km\n    2. Run 10km\n  2. Strength\n2. Wealth\n";
        let parsed = parse_tree(input);
        assert!(parsed.warnings.is_empty());

        let root = &parsed.tree.root;
        assert_eq!(root.label, ROOT_LABEL);
        assert_eq!(child_labels(root), vec!["Health", "Wealth"]);

        let health = &root.children[0];
        assert_eq!(child_labels(health), vec!["Running", "Strength"]);
        assert_eq!(child_labels(&health.children[0]), vec!["Run 1km", "Run 10km"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let input = "\n1. A\n\n   \n  1. B\n\n2. C\n";
        let parsed = parse_tree(input);
        assert!(parsed.warnings.is_empty());
        assert_eq!(child_labels(&parsed.tree.root), vec!["A", "C"]);
        assert_eq!(child_labels(&parsed.tree.root.children[0]), vec!["B"]);
    }

    #[test]
    fn test_dedent_pops_multiple_levels() {
        let input = "1. A\n  1. B\n    1. C\n      1. D\n2. E\n";
        let parsed = parse_tree(input);
        let root = &parsed.tree.root;
        assert_eq!(child_labels(root), vec!["A", "E"]);
        assert_eq!(parsed.tree.len(), 6);
    }

    #[test]
    fn test_label_stops_at_next_sentence() {
        let parsed = parse_tree("1. Do 10 push ups. Every day\n");
        assert_eq!(parsed.tree.root.children[0].label, "Do 10 push ups");
    }

    #[test]
    fn test_malformed_line_kept_with_empty_label() {
        let input = "1. A\n  no prefix here\n    1. Child of malformed\n2. B\n";
        let parsed = parse_tree(input);

        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].line, 2);

        let a = &parsed.tree.root.children[0];
        let malformed = &a.children[0];
        assert_eq!(malformed.label, "");
        assert_eq!(malformed.id, NodeId::from("#line2"));
        assert_eq!(child_labels(malformed), vec!["Child of malformed"]);
        assert_eq!(parsed.tree.root.children[1].label, "B");
    }

    #[test]
    fn test_direction_annotation() {
        let input = "1. Health 🏋️ @right\n  1. Run 1km\n2. Wealth @Top\n";
        let parsed = parse_tree(input);
        assert!(parsed.warnings.is_empty());

        let health = &parsed.tree.root.children[0];
        assert_eq!(health.label, "Health 🏋️");
        assert_eq!(health.direction, Some(Direction::Right));
        assert_eq!(health.glyph.as_deref(), Some("🏋"));
        assert_eq!(health.children[0].direction, None);
        assert_eq!(parsed.tree.root.children[1].direction, Some(Direction::Top));
    }

    #[test]
    fn test_unknown_annotation_warns() {
        let parsed = parse_tree("1. Health @sideways\n");
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.tree.root.children[0].label, "Health");
        assert_eq!(parsed.tree.root.children[0].direction, None);
    }

    #[test]
    fn test_at_sign_inside_word_is_label_text() {
        let parsed = parse_tree("1. Mail me@home\n");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.tree.root.children[0].label, "Mail me@home");
    }

    #[test]
    fn test_layout_directive() {
        let parsed = parse_tree("@layout spoke\n1. A\n");
        assert_eq!(parsed.tree.layout.as_deref(), Some("spoke"));
        assert_eq!(child_labels(&parsed.tree.root), vec!["A"]);

        let parsed = parse_tree("@layout\n1. A\n");
        assert_eq!(parsed.tree.layout, None);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_duplicate_names_warn() {
        let parsed = parse_tree("1. A\n  1. X\n2. B\n  1. X\n");
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].msg.contains("'X'"));
    }

    #[test]
    fn test_indent_level() {
        assert_eq!(indent_level("1. A"), 0);
        assert_eq!(indent_level("  1. A"), 1);
        assert_eq!(indent_level("   1. A"), 1);
        assert_eq!(indent_level("\t\t1. A"), 2);
    }

    #[test]
    fn test_strip_number_prefix() {
        assert_eq!(strip_number_prefix("1. A"), Some("A"));
        assert_eq!(strip_number_prefix("12. A. B"), Some("A. B"));
        assert_eq!(strip_number_prefix("1.2. A"), Some("A"));
        assert_eq!(strip_number_prefix("A. B"), None);
        assert_eq!(strip_number_prefix(". B"), None);
        assert_eq!(strip_number_prefix("1 A"), None);
    }
}
