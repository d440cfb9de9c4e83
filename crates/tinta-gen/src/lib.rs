#![forbid(unsafe_code)]

//! Build-time theme generator.
//!
//! Reads a tenant theme file and writes three artifacts into the output
//! directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `theme.css` | light tokens on `:root`, dark tokens for `data-theme="dark"` and for the system dark scheme |
//! | `theme.json` | `{ "light": {...}, "dark": {...} }` resolved token maps |
//! | `theme-bootstrap.js` | inline script that applies the persisted mode before first paint |

pub mod cli;
pub mod generate;

pub use generate::{Artifacts, GenError, generate, render_css, run, write_artifacts};
