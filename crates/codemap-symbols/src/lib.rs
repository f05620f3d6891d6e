//! Symbol extractor: turns a parse tree plus the language's capture query
//! into structured function/type/import records at a configurable detail
//! level. Grounded on the teacher's `ParserHost` dissection pipeline,
//! generalized from Python to every supported language.

pub mod extractor;
pub mod model;
pub mod signature;

pub use extractor::analyze_file;
pub use model::{FileAnalysis, FunctionRecord, TypeKind, TypeRecord};
