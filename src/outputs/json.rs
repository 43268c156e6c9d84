//! JSON rendering of the results panel.
//!
//! The output is the rendered state, not the raw service response, so every
//! fallback is already applied:
//!
//! ```json
//! {"state":"articles","articles":[{"title":"A","author":"Unknown", ...}]}
//! {"state":"no_results"}
//! ```

use crate::render::Rendered;

pub fn page(rendered: &Rendered) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rendered)
}
