pub mod brand;
pub mod classify;
pub mod differ;
pub mod emitter;
pub mod reader;
pub mod schema;
pub mod themes;
pub mod types;

pub use brand::{BrandRegistry, BrandRegistryEntry, BrandStatus, NewBrand};
pub use classify::{classify_property, classify_variable, slugify, ResolvedType, ValueFormat};
pub use differ::{apply_to_scss, TokenDiffer};
pub use emitter::{emit_json, emit_scss, BrandFiles, BrandWriter};
pub use reader::{ThemedTokens, TokenReader};
pub use schema::{SchemaValidator, TOKEN_SCHEMA};
pub use types::*;
