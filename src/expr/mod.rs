mod lexer;
mod parser;

pub use lexer::Token;
pub use parser::{Expr, ScriptParser, Stmt};

/// Seam to the host language's expression parser. The breakpoint table only
/// needs enough of it to vet condition strings; a full evaluator plugs in
/// here in the real interpreter.
pub trait ExprParser {
    /// Parse `source` into a list of statements, or fail with a message.
    fn parse_program(&self, source: &str) -> Result<Vec<Stmt>, String>;
}

impl ExprParser for ScriptParser {
    fn parse_program(&self, source: &str) -> Result<Vec<Stmt>, String> {
        let tokens = lexer::tokenize(source)?;
        parser::parse_statements(tokens)
    }
}
