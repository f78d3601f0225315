pub mod ast;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod native;
pub mod parser;
pub mod string;
pub mod value;

pub use interpreter::evaluate;
pub use lexer::tokenize;
pub use parser::parse;
