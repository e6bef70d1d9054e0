//! Per-file usage extraction.
//!
//! One pre-order walk over a [`ParsedUnit`] collects import sites, member
//! calls and structural counts. Imports are attributed first so that the
//! binding table is complete before any call is resolved, whatever the
//! textual order of the file.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use tree_sitter::Node;

use super::identifiers::IdentifierMapper;
use super::resolver::resolve_package_name;
use super::source::{node_text, walk_preorder, ParsedUnit};
use crate::parser::DependencySet;

/// How one file imports and invokes one declared package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageEvidence {
    pub import_statements: Vec<String>,
    pub usage_snippets: Vec<String>,
    pub symbols_touched: IndexSet<String>,
    pub line_numbers: Vec<usize>,
    /// One point per attributed call.
    pub complexity: u64,
}

/// Structural counts for one file, independent of attribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileMetrics {
    pub functions: usize,
    pub classes: usize,
    pub imports: usize,
    /// Branching constructs: `if`, loops, `case`, `catch`, `?:`, `&&`, `||`, `??`.
    pub decision_points: usize,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default)]
pub struct FileExtraction {
    pub file_name: String,
    /// Keyed by package, in order of first reference.
    pub evidence: IndexMap<String, UsageEvidence>,
    pub metrics: FileMetrics,
}

/// An import/require/re-export found in the tree.
#[derive(Debug)]
struct ImportSite {
    specifier: String,
    text: String,
    line: usize,
    /// Names pulled out of the module (`{ a, b as c }`, `{ a, b: c }`).
    symbols: Vec<String>,
    /// Local identifiers bound to the module or one of its members.
    bindings: Vec<String>,
}

/// Base of a member-call chain.
enum Receiver<'s> {
    Identifier(&'s str),
    Module(String),
}

/// Walks parsed files and attributes usage to declared packages.
pub struct UsageExtractor<'a> {
    declared: &'a DependencySet,
    mapper: &'a IdentifierMapper,
}

impl<'a> UsageExtractor<'a> {
    pub fn new(declared: &'a DependencySet, mapper: &'a IdentifierMapper) -> Self {
        Self { declared, mapper }
    }

    /// Extract usage evidence and structural counts from one file.
    pub fn extract(&self, unit: &ParsedUnit<'_>) -> FileExtraction {
        let source = unit.source();
        let mut imports = Vec::new();
        let mut calls = Vec::new();
        let mut metrics = FileMetrics::default();

        walk_preorder(unit.root_node(), |node| {
            match node.kind() {
                "import_statement" => {
                    if let Some(site) = parse_es_import(&node, source) {
                        imports.push(site);
                    }
                }
                "export_statement" => {
                    if let Some(site) = parse_reexport(&node, source) {
                        imports.push(site);
                    }
                }
                "call_expression" => {
                    if let Some(specifier) = module_call_specifier(&node, source) {
                        imports.push(parse_module_call(&node, specifier, source));
                    } else if node.child_by_field_name("function").is_some_and(|f| {
                        matches!(f.kind(), "member_expression" | "subscript_expression")
                    }) {
                        calls.push(node);
                    }
                }
                "function_declaration" | "generator_function_declaration" => {
                    metrics.functions += 1;
                }
                "class_declaration" | "abstract_class_declaration" => {
                    metrics.classes += 1;
                }
                "if_statement" | "for_statement" | "for_in_statement" | "while_statement"
                | "do_statement" | "switch_case" | "catch_clause" | "ternary_expression" => {
                    metrics.decision_points += 1;
                }
                "binary_expression" => {
                    let logical = node
                        .child_by_field_name("operator")
                        .is_some_and(|op| matches!(op.kind(), "&&" | "||" | "??"));
                    if logical {
                        metrics.decision_points += 1;
                    }
                }
                _ => {}
            }
            true
        });

        metrics.imports = imports.len();

        let mut evidence: IndexMap<String, UsageEvidence> = IndexMap::new();
        // local name -> declared package, or None for a non-dependency import
        let mut bindings: HashMap<String, Option<String>> = HashMap::new();

        for site in imports {
            let package = self.declared_package(&site.specifier);
            for local in &site.bindings {
                bindings.insert(local.clone(), package.clone());
            }
            let Some(package) = package else {
                continue;
            };

            let entry = evidence.entry(package).or_default();
            entry.import_statements.push(site.text);
            entry.line_numbers.push(site.line);
            entry.symbols_touched.extend(site.symbols);
        }

        for call in calls {
            let Some(callee) = call.child_by_field_name("function") else {
                continue;
            };
            let Some(method) = called_method(&callee, source) else {
                continue;
            };
            let Some(object) = callee.child_by_field_name("object") else {
                continue;
            };

            let package = match root_receiver(object, source) {
                Some(Receiver::Identifier(name)) => match bindings.get(name) {
                    Some(bound) => bound.clone(),
                    None => self
                        .mapper
                        .map_identifier(name, self.declared)
                        .map(str::to_string),
                },
                Some(Receiver::Module(specifier)) => self.declared_package(&specifier),
                None => None,
            };
            let Some(package) = package else {
                continue;
            };

            let entry = evidence.entry(package).or_default();
            entry
                .usage_snippets
                .push(node_text(&call, source).unwrap_or_default().to_string());
            entry.line_numbers.push(call.start_position().row + 1);
            entry.symbols_touched.insert(method);
            entry.complexity += 1;
        }

        debug!(
            file = %unit.file_name(),
            packages = evidence.len(),
            imports = metrics.imports,
            "extracted usage"
        );

        FileExtraction {
            file_name: unit.file_name().to_string(),
            evidence,
            metrics,
        }
    }

    fn declared_package(&self, specifier: &str) -> Option<String> {
        resolve_package_name(specifier)
            .filter(|name| self.declared.contains(name))
            .map(str::to_string)
    }
}

/// Parse `import ... from 'm'`, `import 'm'` and TypeScript `import x = require('m')`.
fn parse_es_import(node: &Node<'_>, source: &str) -> Option<ImportSite> {
    let mut specifier = None;
    let mut symbols = Vec::new();
    let mut bindings = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "string" => specifier = string_value(&child, source),
            "import_clause" => parse_import_clause(&child, source, &mut symbols, &mut bindings),
            "import_require_clause" => {
                let mut inner = child.walk();
                for part in child.named_children(&mut inner) {
                    match part.kind() {
                        "identifier" => {
                            bindings.extend(node_text(&part, source).map(str::to_string))
                        }
                        "string" => specifier = string_value(&part, source),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    Some(ImportSite {
        specifier: specifier?,
        text: node_text(node, source)?.to_string(),
        line: node.start_position().row + 1,
        symbols,
        bindings,
    })
}

/// The clause between `import` and `from`.
fn parse_import_clause(
    node: &Node<'_>,
    source: &str,
    symbols: &mut Vec<String>,
    bindings: &mut Vec<String>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            // import foo from 'm'
            "identifier" => bindings.extend(node_text(&child, source).map(str::to_string)),
            // import * as foo from 'm'
            "namespace_import" => {
                let mut inner = child.walk();
                let name = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "identifier");
                if let Some(name) = name {
                    bindings.extend(node_text(&name, source).map(str::to_string));
                }
            }
            // import { foo, bar as baz } from 'm'
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(imported) = spec
                        .child_by_field_name("name")
                        .and_then(|n| name_value(&n, source))
                    else {
                        continue;
                    };
                    let local = spec
                        .child_by_field_name("alias")
                        .and_then(|n| node_text(&n, source))
                        .map(str::to_string)
                        .unwrap_or_else(|| imported.clone());
                    symbols.push(imported);
                    bindings.push(local);
                }
            }
            _ => {}
        }
    }
}

/// Parse `export { a } from 'm'` and `export * from 'm'`. Local exports are ignored.
fn parse_reexport(node: &Node<'_>, source: &str) -> Option<ImportSite> {
    let specifier = node
        .child_by_field_name("source")
        .and_then(|s| string_value(&s, source))?;

    let mut symbols = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut inner = child.walk();
        for spec in child.named_children(&mut inner) {
            if spec.kind() == "export_specifier" {
                symbols.extend(
                    spec.child_by_field_name("name")
                        .and_then(|n| name_value(&n, source)),
                );
            }
        }
    }

    Some(ImportSite {
        specifier,
        text: node_text(node, source)?.to_string(),
        line: node.start_position().row + 1,
        symbols,
        bindings: Vec::new(),
    })
}

/// Returns the literal specifier of `require('m')` or `import('m')`.
fn module_call_specifier(node: &Node<'_>, source: &str) -> Option<String> {
    let function = node.child_by_field_name("function")?;
    let is_module_call = match function.kind() {
        "import" => true,
        "identifier" => node_text(&function, source) == Some("require"),
        _ => false,
    };
    if !is_module_call {
        return None;
    }

    let args = node.child_by_field_name("arguments")?;
    let first = args.named_child(0)?;
    match first.kind() {
        "string" => string_value(&first, source),
        "template_string" if !has_substitution(&first) => string_value(&first, source),
        _ => None,
    }
}

fn has_substitution(template: &Node<'_>) -> bool {
    let mut cursor = template.walk();
    let found = template
        .named_children(&mut cursor)
        .any(|n| n.kind() == "template_substitution");
    found
}

/// Build the import site for a `require`/`import()` call, following it up to
/// the declaration that binds it when there is one.
fn parse_module_call(node: &Node<'_>, specifier: String, source: &str) -> ImportSite {
    let line = node.start_position().row + 1;

    // require('m').x, await import('m'), (require('m'))
    let mut current = *node;
    let mut parent = node.parent();
    while let Some(p) = parent {
        let wraps_current = match p.kind() {
            "member_expression" => p.child_by_field_name("object") == Some(current),
            "await_expression" | "parenthesized_expression" => true,
            _ => false,
        };
        if !wraps_current {
            break;
        }
        current = p;
        parent = p.parent();
    }

    let mut symbols = Vec::new();
    let mut bindings = Vec::new();
    let mut statement = *node;

    match parent {
        Some(p)
            if p.kind() == "variable_declarator"
                && p.child_by_field_name("value") == Some(current) =>
        {
            if let Some(pattern) = p.child_by_field_name("name") {
                collect_pattern(&pattern, source, &mut symbols, &mut bindings);
            }
            statement = match p.parent() {
                Some(decl)
                    if matches!(decl.kind(), "lexical_declaration" | "variable_declaration") =>
                {
                    decl
                }
                _ => p,
            };
        }
        Some(p) if p.kind() == "expression_statement" && current == *node => {
            statement = p;
        }
        _ => {}
    }

    ImportSite {
        specifier,
        text: node_text(&statement, source).unwrap_or_default().to_string(),
        line,
        symbols,
        bindings,
    }
}

/// Collect names from the left side of `const <pattern> = require('m')`.
fn collect_pattern(
    pattern: &Node<'_>,
    source: &str,
    symbols: &mut Vec<String>,
    bindings: &mut Vec<String>,
) {
    match pattern.kind() {
        "identifier" => bindings.extend(node_text(pattern, source).map(str::to_string)),
        "object_pattern" => {
            let mut cursor = pattern.walk();
            for prop in pattern.named_children(&mut cursor) {
                match prop.kind() {
                    // { merge }
                    "shorthand_property_identifier_pattern" => {
                        if let Some(name) = node_text(&prop, source) {
                            symbols.push(name.to_string());
                            bindings.push(name.to_string());
                        }
                    }
                    // { get: lodashGet }
                    "pair_pattern" => {
                        symbols.extend(
                            prop.child_by_field_name("key")
                                .and_then(|k| name_value(&k, source)),
                        );
                        if let Some(value) = prop.child_by_field_name("value") {
                            if value.kind() == "identifier" {
                                bindings.extend(node_text(&value, source).map(str::to_string));
                            }
                        }
                    }
                    // { merge = fallback }
                    "object_assignment_pattern" => {
                        if let Some(left) = prop.child_by_field_name("left") {
                            if let Some(name) = node_text(&left, source) {
                                symbols.push(name.to_string());
                                bindings.push(name.to_string());
                            }
                        }
                    }
                    // { ...rest }
                    "rest_pattern" => {
                        let mut inner = prop.walk();
                        let ident = prop
                            .named_children(&mut inner)
                            .find(|n| n.kind() == "identifier");
                        if let Some(ident) = ident {
                            bindings.extend(node_text(&ident, source).map(str::to_string));
                        }
                    }
                    _ => {}
                }
            }
        }
        "array_pattern" => {
            let mut cursor = pattern.walk();
            for element in pattern.named_children(&mut cursor) {
                if element.kind() == "identifier" {
                    bindings.extend(node_text(&element, source).map(str::to_string));
                }
            }
        }
        _ => {}
    }
}

/// Method name of a member callee: `obj.name` or `obj['name']`.
/// A computed index that is not a string literal has no name.
fn called_method(callee: &Node<'_>, source: &str) -> Option<String> {
    match callee.kind() {
        "member_expression" => callee
            .child_by_field_name("property")
            .and_then(|p| node_text(&p, source))
            .map(str::to_string),
        "subscript_expression" => {
            let index = callee.child_by_field_name("index")?;
            match index.kind() {
                "string" => string_value(&index, source),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Walk a member-call receiver down to its base: an identifier, or a
/// `require('m')` / `import('m')` call.
fn root_receiver<'s>(mut node: Node<'_>, source: &'s str) -> Option<Receiver<'s>> {
    loop {
        match node.kind() {
            "identifier" => return node_text(&node, source).map(Receiver::Identifier),
            "member_expression" | "subscript_expression" => {
                node = node.child_by_field_name("object")?;
            }
            "call_expression" => {
                if let Some(specifier) = module_call_specifier(&node, source) {
                    return Some(Receiver::Module(specifier));
                }
                node = node.child_by_field_name("function")?;
            }
            "parenthesized_expression" | "non_null_expression" | "as_expression"
            | "satisfies_expression" | "await_expression" => {
                node = node.named_child(0)?;
            }
            _ => return None,
        }
    }
}

/// Text of a name that may be written as an identifier or a string.
fn name_value(node: &Node<'_>, source: &str) -> Option<String> {
    if node.kind() == "string" {
        string_value(node, source)
    } else {
        node_text(node, source).map(str::to_string)
    }
}

/// Extract string value (removes quotes).
fn string_value(node: &Node<'_>, source: &str) -> Option<String> {
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\'', '`'])
        .trim_end_matches(['"', '\'', '`']);
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::source::{SourceFile, SourceParser};

    fn declared(names: &[&str]) -> DependencySet {
        names.iter().map(|n| (*n, "1.0.0")).collect()
    }

    fn extract_named(name: &str, source: &str, deps: &DependencySet) -> FileExtraction {
        let mut parser = SourceParser::new().unwrap();
        let file = SourceFile::new(name, source);
        let unit = parser.parse(&file).unwrap();
        let mapper = IdentifierMapper::new();
        UsageExtractor::new(deps, &mapper).extract(&unit)
    }

    fn extract(source: &str, deps: &DependencySet) -> FileExtraction {
        extract_named("test.js", source, deps)
    }

    // ===== Imports =====

    #[test]
    fn test_require_then_member_calls() {
        let deps = declared(&["lodash"]);
        let result = extract(
            "const _ = require('lodash'); _.merge(a, b); _.get(a, 'x');",
            &deps,
        );

        let lodash = &result.evidence["lodash"];
        assert_eq!(lodash.import_statements, vec!["const _ = require('lodash');"]);
        assert_eq!(lodash.usage_snippets, vec!["_.merge(a, b)", "_.get(a, 'x')"]);
        assert_eq!(
            lodash.symbols_touched.iter().collect::<Vec<_>>(),
            vec!["merge", "get"]
        );
        assert_eq!(lodash.complexity, 2);
        assert_eq!(lodash.line_numbers, vec![1, 1, 1]);
    }

    #[test]
    fn test_es_named_imports_touch_symbols() {
        let deps = declared(&["react"]);
        let result = extract(
            "import React, { useState, useEffect as effect } from 'react';",
            &deps,
        );

        let react = &result.evidence["react"];
        assert_eq!(react.import_statements.len(), 1);
        assert!(react.symbols_touched.contains("useState"));
        assert!(react.symbols_touched.contains("useEffect"));
        assert!(!react.symbols_touched.contains("effect"));
        assert!(react.usage_snippets.is_empty());
    }

    #[test]
    fn test_namespace_import_binding() {
        let deps = declared(&["date-fns"]);
        let result = extract(
            "import * as dates from 'date-fns';\ndates.format(now, 'yyyy');",
            &deps,
        );

        let evidence = &result.evidence["date-fns"];
        assert_eq!(evidence.usage_snippets, vec!["dates.format(now, 'yyyy')"]);
        assert_eq!(evidence.line_numbers, vec![1, 2]);
    }

    #[test]
    fn test_destructured_require() {
        let deps = declared(&["lodash"]);
        let result = extract(
            "const { merge, get: lodashGet, pick = fallback } = require('lodash/fp');",
            &deps,
        );

        let lodash = &result.evidence["lodash"];
        assert_eq!(
            lodash.symbols_touched.iter().collect::<Vec<_>>(),
            vec!["merge", "get", "pick"]
        );
    }

    #[test]
    fn test_side_effect_and_dynamic_imports() {
        let deps = declared(&["polyfill", "chart.js"]);
        let result = extract(
            "require('polyfill');\nconst charts = await import('chart.js');\ncharts.render();",
            &deps,
        );

        assert_eq!(
            result.evidence["polyfill"].import_statements,
            vec!["require('polyfill');"]
        );
        let charts = &result.evidence["chart.js"];
        assert_eq!(
            charts.import_statements,
            vec!["const charts = await import('chart.js');"]
        );
        assert_eq!(charts.usage_snippets, vec!["charts.render()"]);
    }

    #[test]
    fn test_reexport_counts_as_import() {
        let deps = declared(&["zod"]);
        let result = extract("export { z, ZodError as Err } from 'zod';", &deps);

        let zod = &result.evidence["zod"];
        assert_eq!(zod.import_statements.len(), 1);
        assert!(zod.symbols_touched.contains("z"));
        assert!(zod.symbols_touched.contains("ZodError"));
    }

    #[test]
    fn test_typescript_import_equals_require() {
        let deps = declared(&["express"]);
        let result = extract_named(
            "server.ts",
            "import express = require('express');\nconst app = express.Router();",
            &deps,
        );

        let evidence = &result.evidence["express"];
        assert_eq!(evidence.import_statements.len(), 1);
        assert_eq!(evidence.usage_snippets, vec!["express.Router()"]);
    }

    #[test]
    fn test_import_without_calls_is_import_only() {
        let deps = declared(&["axios"]);
        let result = extract("import axios from 'axios';\nexport default axios;", &deps);

        let axios = &result.evidence["axios"];
        assert_eq!(axios.import_statements.len(), 1);
        assert!(axios.usage_snippets.is_empty());
        assert_eq!(axios.complexity, 0);
    }

    #[test]
    fn test_undeclared_and_relative_imports_ignored() {
        let deps = declared(&["react"]);
        let result = extract(
            "import utils from './utils';\nimport chalk from 'chalk';\nutils.run();",
            &deps,
        );

        assert!(result.evidence.is_empty());
        assert_eq!(result.metrics.imports, 2);
    }

    #[test]
    fn test_star_reexport_counts_as_import() {
        let deps = declared(&["rxjs"]);
        let result = extract("export * from 'rxjs/operators';", &deps);

        let rxjs = &result.evidence["rxjs"];
        assert_eq!(rxjs.import_statements, vec!["export * from 'rxjs/operators';"]);
        assert!(rxjs.symbols_touched.is_empty());
        assert_eq!(result.metrics.imports, 1);
    }

    #[test]
    fn test_require_member_binding() {
        let deps = declared(&["express"]);
        let result = extract(
            "const router = require('express').Router;\nrouter.use(auth);",
            &deps,
        );

        let express = &result.evidence["express"];
        assert_eq!(
            express.import_statements,
            vec!["const router = require('express').Router;"]
        );
        assert_eq!(express.usage_snippets, vec!["router.use(auth)"]);
        assert!(express.symbols_touched.contains("use"));
        assert_eq!(express.line_numbers, vec![1, 2]);
    }

    #[test]
    fn test_destructured_dynamic_import() {
        let deps = declared(&["date-fns"]);
        let result = extract(
            "const { format, addDays: add } = await import('date-fns');\nformat.call(null, d);",
            &deps,
        );

        let evidence = &result.evidence["date-fns"];
        assert_eq!(
            evidence.import_statements,
            vec!["const { format, addDays: add } = await import('date-fns');"]
        );
        assert_eq!(
            evidence.symbols_touched.iter().collect::<Vec<_>>(),
            vec!["format", "addDays", "call"]
        );
        assert_eq!(evidence.usage_snippets, vec!["format.call(null, d)"]);
    }

    // ===== Call attribution =====

    #[test]
    fn test_relative_binding_blocks_fuzzy_fallback() {
        let deps = declared(&["utils"]);
        let result = extract("import utils from './utils';\nutils.run();", &deps);

        assert!(result.evidence.is_empty());
    }

    #[test]
    fn test_alias_fallback_without_import() {
        let deps = declared(&["jquery"]);
        let result = extract("$.ajax({ url: '/x' });", &deps);

        let jquery = &result.evidence["jquery"];
        assert!(jquery.import_statements.is_empty());
        assert_eq!(jquery.usage_snippets, vec!["$.ajax({ url: '/x' })"]);
        assert!(jquery.symbols_touched.contains("ajax"));
    }

    #[test]
    fn test_fuzzy_fallback_normalized_name() {
        let deps = declared(&["my-pkg"]);
        let result = extract("myPkg.start();", &deps);

        assert_eq!(result.evidence["my-pkg"].complexity, 1);
    }

    #[test]
    fn test_chained_receiver_resolves_to_base() {
        let deps = declared(&["lodash"]);
        let result = extract(
            "import _ from 'lodash';\n_.chain(items).map(f).value();",
            &deps,
        );

        let lodash = &result.evidence["lodash"];
        assert_eq!(lodash.complexity, 3);
        assert!(lodash.symbols_touched.contains("chain"));
        assert!(lodash.symbols_touched.contains("map"));
        assert!(lodash.symbols_touched.contains("value"));
    }

    #[test]
    fn test_require_as_receiver() {
        let deps = declared(&["debug"]);
        let result = extract("require('debug').enable('app:*');", &deps);

        let debug = &result.evidence["debug"];
        assert_eq!(debug.import_statements, vec!["require('debug')"]);
        assert_eq!(debug.usage_snippets, vec!["require('debug').enable('app:*')"]);
    }

    #[test]
    fn test_calls_before_import_still_resolve() {
        let deps = declared(&["dayjs"]);
        let result = extract(
            "function now() { return time.format(); }\nimport time from 'dayjs';",
            &deps,
        );

        assert_eq!(result.evidence["dayjs"].usage_snippets, vec!["time.format()"]);
    }

    #[test]
    fn test_untraceable_calls_ignored() {
        let deps = declared(&["lodash"]);
        let result = extract("console.log('x'); this.save(); items.map(f);", &deps);

        assert!(result.evidence.is_empty());
    }

    #[test]
    fn test_optional_call_chain() {
        let deps = declared(&["lodash"]);
        let result = extract("import _ from 'lodash';\n_?.merge?.(a);", &deps);

        assert_eq!(result.evidence["lodash"].usage_snippets.len(), 1);
    }

    #[test]
    fn test_computed_member_call_with_string_index() {
        let deps = declared(&["lodash"]);
        let result = extract(
            "import _ from 'lodash';\n_['merge'](a, b);\n_[name](a);",
            &deps,
        );

        let lodash = &result.evidence["lodash"];
        assert_eq!(lodash.usage_snippets, vec!["_['merge'](a, b)"]);
        assert_eq!(
            lodash.symbols_touched.iter().collect::<Vec<_>>(),
            vec!["merge"]
        );
        assert_eq!(lodash.complexity, 1);
    }

    // ===== Metrics =====

    #[test]
    fn test_structural_counts() {
        let deps = declared(&[]);
        let result = extract(
            r#"
import a from 'a';
const b = require('./b');
function one() { if (x && y) { return 1; } return 2; }
function* two() { for (const i of xs) { yield i; } }
class Three {}
const arrow = () => (flag ? 1 : 2);
"#,
            &deps,
        );

        assert_eq!(result.metrics.functions, 2);
        assert_eq!(result.metrics.classes, 1);
        assert_eq!(result.metrics.imports, 2);
        // if, &&, for..of, ?:
        assert_eq!(result.metrics.decision_points, 4);
    }

    #[test]
    fn test_remaining_decision_points() {
        let deps = declared(&[]);
        let result = extract(
            r#"
switch (kind) {
  case 'a': break;
  case 'b': break;
  default: break;
}
try { run(); } catch (err) { report(err); }
while (busy) { tick(); }
do { step(); } while (pending);
for (const key in table) { visit(key); }
const pick = (a || b) ?? c;
"#,
            &deps,
        );

        // case x2, catch, while, do, for..in, ||, ??
        assert_eq!(result.metrics.decision_points, 8);
        assert_eq!(result.metrics.functions, 0);
    }

    #[test]
    fn test_typescript_abstract_class_counted() {
        let deps = declared(&[]);
        let result = extract_named(
            "shape.ts",
            "export abstract class Shape { abstract area(): number; }\nexport class Square extends Shape { area() { return 1; } }",
            &deps,
        );

        assert_eq!(result.metrics.classes, 2);
    }
}
