//! Tree-sitter parsing of JavaScript/TypeScript sources.
//!
//! The grammar is picked from the file extension. A file that fails to parse
//! yields a [`ParseFailure`] for that file only; callers keep going with the
//! rest of the batch.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use super::{AnalysisError, AnalysisResult};

/// One input file: a name unique within the batch plus its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The grammar this file will be parsed with.
    pub fn grammar(&self) -> Grammar {
        Grammar::for_file_name(&self.name)
    }
}

/// Grammar variant used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// JavaScript with JSX, decorators, class fields and the other
    /// syntax extensions tree-sitter-javascript ships with.
    JavaScript,
    /// TypeScript without JSX (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl Grammar {
    /// Select the grammar from a file name. Anything that is not TypeScript
    /// is parsed as JavaScript.
    pub fn for_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "ts" | "mts" | "cts" => Grammar::TypeScript,
            "tsx" => Grammar::Tsx,
            _ => Grammar::JavaScript,
        }
    }

    /// Get tree-sitter language for this grammar.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Why a single file could not be turned into a usable syntax tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("parser produced no syntax tree")]
    NoTree,

    #[error("syntax error at line {line}, column {column}: {detail}")]
    Syntax {
        line: usize,
        column: usize,
        detail: String,
    },
}

/// A parsed file, tagged with the grammar used.
///
/// Borrowing the [`SourceFile`] keeps the unit from outliving the run.
pub struct ParsedUnit<'a> {
    file: &'a SourceFile,
    grammar: Grammar,
    tree: Tree,
    syntax_error: Option<ParseFailure>,
}

impl<'a> ParsedUnit<'a> {
    pub fn file_name(&self) -> &'a str {
        &self.file.name
    }

    pub fn source(&self) -> &'a str {
        &self.file.content
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The first syntax error, when the parser was told to tolerate errors.
    pub fn syntax_error(&self) -> Option<&ParseFailure> {
        self.syntax_error.as_ref()
    }
}

/// One tree-sitter parser per grammar variant.
///
/// Parsers are not shareable across threads; create one per worker.
pub struct SourceParser {
    javascript: Parser,
    typescript: Parser,
    tsx: Parser,
    tolerate_syntax_errors: bool,
}

impl SourceParser {
    /// Create a strict parser: any syntax error fails the file.
    pub fn new() -> AnalysisResult<Self> {
        Ok(Self {
            javascript: parser_for(Grammar::JavaScript)?,
            typescript: parser_for(Grammar::TypeScript)?,
            tsx: parser_for(Grammar::Tsx)?,
            tolerate_syntax_errors: false,
        })
    }

    /// When enabled, files with syntax errors still produce a unit built from
    /// tree-sitter's error-recovered tree.
    pub fn tolerate_syntax_errors(mut self, tolerate: bool) -> Self {
        self.tolerate_syntax_errors = tolerate;
        self
    }

    /// Parse a file with the grammar chosen by its extension.
    pub fn parse<'a>(&mut self, file: &'a SourceFile) -> Result<ParsedUnit<'a>, ParseFailure> {
        let grammar = file.grammar();
        let parser = match grammar {
            Grammar::JavaScript => &mut self.javascript,
            Grammar::TypeScript => &mut self.typescript,
            Grammar::Tsx => &mut self.tsx,
        };

        let tree = parser
            .parse(&file.content, None)
            .ok_or(ParseFailure::NoTree)?;

        let syntax_error = if tree.root_node().has_error() {
            Some(first_syntax_error(tree.root_node(), &file.content))
        } else {
            None
        };

        if let Some(failure) = syntax_error.clone() {
            if !self.tolerate_syntax_errors {
                return Err(failure);
            }
        }

        Ok(ParsedUnit {
            file,
            grammar,
            tree,
            syntax_error,
        })
    }
}

fn parser_for(grammar: Grammar) -> AnalysisResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.tree_sitter_language())
        .map_err(|_| AnalysisError::LanguageInit)?;
    Ok(parser)
}

/// Visit every node in pre-order, without recursion.
///
/// The visitor returns `false` to stop the walk early.
pub fn walk_preorder<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut cursor = root.walk();
    loop {
        if !visit(cursor.node()) {
            return;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Extract the text content of a node.
pub fn node_text<'s>(node: &Node<'_>, source: &'s str) -> Option<&'s str> {
    source.get(node.start_byte()..node.end_byte())
}

fn first_syntax_error(root: Node<'_>, source: &str) -> ParseFailure {
    let mut found = None;
    walk_preorder(root, |node| {
        if node.is_error() || node.is_missing() {
            found = Some(node);
            return false;
        }
        true
    });

    let Some(node) = found else {
        let pos = root.start_position();
        return ParseFailure::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
            detail: "unrecognized syntax".to_string(),
        };
    };

    let pos = node.start_position();
    let detail = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = node_text(&node, source)
            .unwrap_or("")
            .chars()
            .take(40)
            .collect();
        format!("unexpected `{}`", snippet.trim())
    };

    ParseFailure::Syntax {
        line: pos.row + 1,
        column: pos.column + 1,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str, content: &str) -> Result<Grammar, ParseFailure> {
        let mut parser = SourceParser::new().unwrap();
        let file = SourceFile::new(name, content);
        parser.parse(&file).map(|unit| unit.grammar())
    }

    #[test]
    fn test_grammar_from_extension() {
        assert_eq!(Grammar::for_file_name("src/a.ts"), Grammar::TypeScript);
        assert_eq!(Grammar::for_file_name("src/a.d.ts"), Grammar::TypeScript);
        assert_eq!(Grammar::for_file_name("src/a.mts"), Grammar::TypeScript);
        assert_eq!(Grammar::for_file_name("src/App.TSX"), Grammar::Tsx);
        assert_eq!(Grammar::for_file_name("src/a.jsx"), Grammar::JavaScript);
        assert_eq!(Grammar::for_file_name("src/a.cjs"), Grammar::JavaScript);
        assert_eq!(Grammar::for_file_name("Makefile"), Grammar::JavaScript);
    }

    #[test]
    fn test_javascript_syntax_extensions() {
        let source = r#"
@observer
class Store {
    count = 0;
    static instances = 1;
}
const el = <div className="x">{value ?? 'none'}</div>;
const deep = a?.b?.c;
const mod = await import('lodash');
"#;
        assert_eq!(parse("app.jsx", source), Ok(Grammar::JavaScript));
    }

    #[test]
    fn test_top_level_return_is_accepted() {
        assert_eq!(parse("script.js", "if (done) { return; }\nreturn;"), Ok(Grammar::JavaScript));
    }

    #[test]
    fn test_typescript_types() {
        let source = r#"
import type { FC } from 'react';
interface Props { name: string; count?: number }
export function greet<T extends Props>(p: T): string { return p.name as string; }
"#;
        assert_eq!(parse("greet.ts", source), Ok(Grammar::TypeScript));
    }

    #[test]
    fn test_tsx_allows_jsx() {
        let source = "const App = (p: { n: number }) => <span>{p.n}</span>;";
        assert_eq!(parse("App.tsx", source), Ok(Grammar::Tsx));
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let result = parse("broken.js", "const x = ;\nfunction (");
        assert!(matches!(result, Err(ParseFailure::Syntax { line: 1, .. })
            | Err(ParseFailure::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_tolerant_parser_keeps_error() {
        let mut parser = SourceParser::new().unwrap().tolerate_syntax_errors(true);
        let file = SourceFile::new("broken.js", "import _ from 'lodash';\nconst = ;");
        let unit = parser.parse(&file).unwrap();
        assert!(unit.syntax_error().is_some());
        assert_eq!(unit.file_name(), "broken.js");
    }

    #[test]
    fn test_walk_preorder_visits_root_first() {
        let mut parser = SourceParser::new().unwrap();
        let file = SourceFile::new("a.js", "a(); b();");
        let unit = parser.parse(&file).unwrap();

        let mut kinds = Vec::new();
        walk_preorder(unit.root_node(), |node| {
            kinds.push(node.kind().to_string());
            true
        });
        assert_eq!(kinds[0], "program");
        assert_eq!(kinds.iter().filter(|k| *k == "call_expression").count(), 2);
    }
}
