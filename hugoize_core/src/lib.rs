//! `hugoize_core` is the core library for the hugoize content migration
//! tool. It rewrites static site content written with `+++` TOML front
//! matter holding a nested `[extra]` section and `{% name(args) %} ... {%
//! end %}` shortcodes into flattened front matter and `{{< name args >}} ...
//! {{< /name >}}` shortcodes.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Content file
//!   → Front matter normalizer (drops the `[extra]` header, outdents its keys)
//!   → Opening tag rewrite (`{% name(a=1) %}` → `{{< name a="1" >}}`)
//!   → Closing tag resolution (`{% end %}` → `{{< /name >}}` via a tag stack)
//!   → Atomic write back to the same path
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `hugoize.toml`.
//! - [`front_matter`]: Front matter flattening.
//! - [`shortcode`]: Opening tag rewrite and stack based closing tag
//!   resolution.
//! - [`params`]: Shortcode argument rewriting.
//! - [`project`]: Directory walking and file discovery.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hugoize_core::FrontMatterConfig;
//! use hugoize_core::convert_document;
//!
//! let input = "+++\ntitle = \"x\"\n[extra]\n  foo = 1\n+++\n{% note() %}hi{% end %}\n";
//! let conversion = convert_document(input, &FrontMatterConfig::default());
//! assert_eq!(
//! 	conversion.content,
//! 	"+++\ntitle = \"x\"\nfoo = 1\n+++\n{{< note >}}hi{{< /note >}}\n"
//! );
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use front_matter::*;
pub use params::*;
pub use project::*;
pub use shortcode::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod front_matter;
pub mod params;
pub mod project;
pub mod shortcode;
