use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::Error;
use crate::grammar::Dialect;
use crate::reader::SourceFile;
use crate::types::{Definition, EntityKind, Extent, LookupKind};

/// Declaration kinds the resolver tells apart. Every other grammar node is `Other`
/// and is walked through without being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    /// `class Name { ... }`.
    ClassSpecifier,
    /// A function or method definition with a return type.
    FunctionDefinition,
    /// Any grammar node not listed above.
    Other,
    /// Constructor, destructor, or conversion operator (C++ definitions with no return type).
    SpecialMember,
    /// `struct Name { ... }`.
    StructSpecifier,
}

impl NodeKind {
    /// Classify a grammar node.
    fn classify(node: Node<'_>, dialect: Dialect) -> Self {
        return match node.kind() {
            "class_specifier" => Self::ClassSpecifier,
            "function_definition"
                if dialect == Dialect::Cpp && node.child_by_field_name("type").is_none() =>
            {
                Self::SpecialMember
            },
            "function_definition" => Self::FunctionDefinition,
            "struct_specifier" => Self::StructSpecifier,
            _ => Self::Other,
        };
    }

    /// The lookup kind this node answers to, if any.
    const fn lookup_kind(self) -> Option<LookupKind> {
        return match self {
            Self::ClassSpecifier | Self::StructSpecifier => Some(LookupKind::ClassLike),
            Self::FunctionDefinition => Some(LookupKind::FunctionLike),
            Self::Other | Self::SpecialMember => None,
        };
    }
}

/// Resolve the first definition of `name` accepted by `lookup`.
///
/// Class lookups always parse as C++. Ties go to the first match in
/// pre-order, so an overloaded name yields the overload that appears first.
/// Only definitions with a body are candidates: a prototype that precedes its
/// definition is skipped rather than winning as the first declaration.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if no usable tree could be built: non-UTF-8
/// input, grammar load failure, no tree, or a tree with syntax errors and no
/// declaration structure at all.
/// Returns `Error::EntityNotFound` if a usable tree, with or without syntax
/// errors, holds no matching definition.
pub fn resolve(
    file: &SourceFile,
    dialect: Dialect,
    lookup: LookupKind,
    name: &str,
) -> Result<Extent, Error> {
    let dialect = match lookup {
        LookupKind::ClassLike => Dialect::Cpp,
        LookupKind::FunctionLike => dialect,
    };

    let tree = parse_translation_unit(file, dialect)?;
    let root = tree.root_node();
    let source = file.text().as_bytes();

    if let Some(node) = find_first_definition(root, source, dialect, lookup, name) {
        return Ok(definition_extent(node));
    }

    if !has_declaration_structure(root, dialect) {
        return Err(Error::ParseFailed {
            file: file.path().to_path_buf(),
            reason: "syntax errors and no recognisable declarations".to_string(),
        });
    }

    return Err(Error::EntityNotFound {
        entity: name.to_string(),
        file: file.path().to_path_buf(),
    });
}

/// List every function, method, class, and struct definition in pre-order.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if no tree could be built.
pub fn list_definitions(file: &SourceFile, dialect: Dialect) -> Result<Vec<Definition>, Error> {
    let tree = parse_translation_unit(file, dialect)?;
    let source = file.text().as_bytes();
    let mut definitions = Vec::new();

    walk_preorder(tree.root_node(), |node| {
        let kind = NodeKind::classify(node, dialect);
        let entity_kind = match kind.lookup_kind() {
            None => return false,
            Some(LookupKind::ClassLike) => EntityKind::Class,
            Some(LookupKind::FunctionLike) => EntityKind::Function,
        };
        if let Some(name) = spelled_name(node, kind, source) {
            definitions.push(Definition {
                extent: definition_extent(node),
                kind: entity_kind,
                name: name.to_string(),
            });
        }
        return false;
    });

    return Ok(definitions);
}

/// Build a tree for the whole file with a parser scoped to this call.
///
/// # Errors
///
/// Returns `Error::ParseFailed` for non-UTF-8 input, grammar load failure,
/// or when tree-sitter returns no tree.
fn parse_translation_unit(file: &SourceFile, dialect: Dialect) -> Result<Tree, Error> {
    let file_path: &Path = file.path();
    if !file.is_valid_utf8() {
        return Err(Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: "source is not valid UTF-8".to_string(),
        });
    }

    let mut parser = Parser::new();
    parser.set_language(&dialect.language()).map_err(|e| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: e.to_string(),
        };
    })?;

    return parser.parse(file.text(), None).ok_or_else(|| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        };
    });
}

/// Pre-order search for the first node accepted by `lookup` and spelled `name`.
fn find_first_definition<'t>(
    root: Node<'t>,
    source: &[u8],
    dialect: Dialect,
    lookup: LookupKind,
    name: &str,
) -> Option<Node<'t>> {
    let mut found = None;
    walk_preorder(root, |node| {
        let kind = NodeKind::classify(node, dialect);
        if kind.lookup_kind() != Some(lookup) {
            return false;
        }
        if spelled_name(node, kind, source) == Some(name) {
            found = Some(node);
            return true;
        }
        return false;
    });
    return found;
}

/// Whether a tree is usable for lookups. A clean tree always is; a tree with
/// syntax errors is usable while it still holds at least one declaration or
/// definition somewhere.
fn has_declaration_structure(root: Node<'_>, dialect: Dialect) -> bool {
    if root.is_error() {
        return false;
    }
    if !root.has_error() {
        return true;
    }

    let mut found = false;
    walk_preorder(root, |node| {
        if node.is_error() {
            return false;
        }
        found = node.kind() == "declaration"
            || NodeKind::classify(node, dialect) != NodeKind::Other;
        return found;
    });
    return found;
}

/// Visit every node in pre-order until `visit` returns `true`.
fn walk_preorder<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut cursor = root.walk();
    loop {
        if visit(cursor.node()) {
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

/// The identifier a definition is spelled with, unqualified.
/// Class and struct specifiers without a body are references, not definitions.
fn spelled_name<'s>(node: Node<'_>, kind: NodeKind, source: &'s [u8]) -> Option<&'s str> {
    return match kind {
        NodeKind::ClassSpecifier | NodeKind::StructSpecifier => {
            node.child_by_field_name("body")?;
            identifier_text(node.child_by_field_name("name")?, source)
        },
        NodeKind::FunctionDefinition | NodeKind::SpecialMember => {
            let declarator = function_declarator(node.child_by_field_name("declarator")?)?;
            identifier_text(declarator.child_by_field_name("declarator")?, source)
        },
        NodeKind::Other => None,
    };
}

/// Descend through pointer, reference, and parenthesized wrappers to the function declarator.
fn function_declarator(mut node: Node<'_>) -> Option<Node<'_>> {
    loop {
        match node.kind() {
            "function_declarator" => return Some(node),
            "attributed_declarator" | "parenthesized_declarator" | "pointer_declarator"
            | "reference_declarator" => {
                node = node
                    .child_by_field_name("declarator")
                    .or_else(|| return node.named_children(&mut node.walk()).find(is_declarator))?;
            },
            _ => return None,
        }
    }
}

/// Whether a node can sit in declarator position.
fn is_declarator(node: &Node<'_>) -> bool {
    let kind = node.kind();
    return kind.ends_with("declarator") || kind.ends_with("identifier");
}

/// Unqualified text of a name node: `Widget::draw` is spelled `draw`,
/// `Box<int>` is spelled `Box`.
fn identifier_text<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    return match node.kind() {
        "destructor_name" | "field_identifier" | "identifier" | "operator_name"
        | "type_identifier" => node.utf8_text(source).ok(),
        "qualified_identifier" | "template_function" | "template_method" | "template_type" => {
            identifier_text(node.child_by_field_name("name")?, source)
        },
        _ => None,
    };
}

/// One-based inclusive line range of a definition. A definition directly under
/// `template <...>` starts at the template header.
fn definition_extent(node: Node<'_>) -> Extent {
    let outer = node
        .parent()
        .filter(|p| return p.kind() == "template_declaration")
        .unwrap_or(node);
    let start = outer.start_position();
    let end = node.end_position();

    // A node ending at column 0 ends on the previous line's terminator.
    let end_row = if end.column == 0 && end.row > start.row {
        end.row.saturating_sub(1)
    } else {
        end.row
    };

    return Extent::new(start.row.saturating_add(1), end_row.saturating_add(1));
}
