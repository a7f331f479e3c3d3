//! IDE features: high-level APIs for editor hosts.
//!
//! Editor features query only the [`SemanticModel`](crate::hir::SemanticModel);
//! this module adds the document cache in front of it.
//!
//! ## Usage
//!
//! ```ignore
//! use hlsl::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("main.hlsl", "float4 main() : SV_Target { return 0; }");
//!
//! let analysis = host.analysis();
//! let diagnostics = analysis.diagnostics("main.hlsl");
//! ```

mod analysis;
mod quick_info;

pub use analysis::{Analysis, AnalysisHost};
pub use quick_info::{QuickInfo, quick_info};
