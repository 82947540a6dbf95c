pub mod doc;
pub mod id;
pub mod model;

pub use doc::Document;
pub use id::ElementId;
pub use model::*;
