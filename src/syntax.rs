//! Syntax module for cstjson
//!
//! Concrete syntax trees and the parse stage that builds them. A tree keeps
//! every token the grammar matched, trivia included, with its line and
//! column, so it can be encoded without consulting the source again.

pub mod parser;
pub mod tree;

pub use parser::{parse, ParseLimits};
pub use tree::{Node, NodeId, Production, Token, Tree, TreeBuilder};
