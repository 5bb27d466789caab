//! Extract normalization, classification and aggregation.

pub mod accessors;
pub mod document;
pub mod error;
pub mod expansion;
pub mod layers;
pub mod legend;
pub mod normalize;
pub mod provisions;
pub mod themes;
pub mod view;


pub use document::{load_extract, read_extract};
pub use error::{ExtractError, Result};
pub use expansion::{ExpansionPhase, ExpansionState};
pub use layers::{InMemoryLayerRegistry, LayerProperty, LayerRegistry, OverlayLayerDescriptor};
pub use normalize::{SourceDocument, normalize};
pub use view::{ExtractView, SectionKind, ThemeContents, ViewModel};
