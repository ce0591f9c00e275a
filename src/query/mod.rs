//! Filter model and the Filter Compiler.
//!
//! Filters compile into a query string for the external engine plus a
//! frontmatter predicate evaluated on retrieved pages. Clauses inside one
//! filter are AND-ed; several filters are OR-ed.

mod compiler;
mod filter;
mod legacy;
mod yaml;

pub use compiler::{CompiledFilter, compile_filter, compile_filters};
pub use filter::{Filter, YamlFilter, split_list};
pub use legacy::{parse_legacy_query, parse_tag_shorthand};
pub use yaml::{FieldValue, Frontmatter, YamlClause, YamlPredicate, lookup_field};
