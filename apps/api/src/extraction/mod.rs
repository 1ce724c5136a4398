// Document → keywords.
// `document` turns upload bytes into text; `keywords` turns text into terms.

pub mod document;
pub mod keywords;
