//! Language detection and part-of-speech tagging for Indian languages.
//!
//! Sentences are first assigned a language. Hindi, Marathi and Gujarati are then tagged with a
//! dictionary (unigram) tagger trained on the NLTK `indian` corpus; every other language, and every
//! case where the dictionary tagger fails or finds nothing, is handled by a pretrained multilingual
//! token classification model loaded through `rust-bert`.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use indic_pos::pipelines::pos_tagging::POSTaggingPipeline;
//! use indic_pos::render::render_text;
//!
//! let pipeline = POSTaggingPipeline::new(Default::default())?;
//! let response = pipeline.tag("मैं स्कूल जा रहा हूँ।");
//! print!("{}", render_text(&response));
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//! - `remote` (default): download the tagged corpora on first use (cached under
//!   `$INDIC_POS_CACHE`, or `.indic-pos` in the user cache directory)
//! - `transformer`: compile the transformer fallback tagger. Requires libtorch, see the `tch`
//!   crate for installation instructions, or enable `download-libtorch`.

pub mod common;
pub mod pipelines;
pub mod render;

pub use common::error::TaggerError;
pub use common::resources;
pub use common::Config;
