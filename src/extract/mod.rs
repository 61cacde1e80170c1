// src/extract/mod.rs
// =============================================================================
// This module pulls data out of fetched pages.
//
// Submodules:
// - html: plain text and links from an HTML document
// - email: email addresses from plain text
// =============================================================================

mod email;
mod html;

pub use email::find_emails;
pub use html::parse_page;
