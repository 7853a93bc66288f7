//! IDE features: high-level APIs for LSP handlers.
//!
//! Each query corresponds to an LSP request and works on our own types; the
//! request layer converts them at the protocol boundary.
//!
//! The recommended entry point is [`AnalysisHost`]:
//!
//! ```ignore
//! let host = AnalysisHost::new();
//! host.set_file_content("file:///Calc.groovy", source)?;
//!
//! let analysis = host.analysis();
//! let definitions = analysis.find_definition(uri, position)?;
//! let hover = analysis.hover(uri, position)?;
//! ```

mod analysis;
mod definition;
mod document_store;
mod error;
mod hover;
mod symbols;
mod type_info;

pub use analysis::{Analysis, AnalysisHost};
pub use definition::DefinitionFinder;
pub use document_store::{DocumentStore, InMemoryDocumentStore};
pub use error::{AnalysisError, AnalysisResult};
pub use hover::{DYNAMIC_FALLBACK, HoverResult, MarkupKind, hover, render_markdown};
pub use symbols::{DocumentSymbol, document_symbols};
pub use type_info::{TypeInfo, TypeInfoKind, type_info_at};
