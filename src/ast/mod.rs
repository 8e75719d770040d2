/// AST (Abstract Syntax Tree) module
/// Contains the search expression tree produced by the parser
///
/// Submodules:
/// - expressions: the closed set of search expression nodes
pub mod expressions;
