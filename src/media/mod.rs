//! Media module for item representation, filtering and resolution.

pub mod filter;
pub mod item;
pub mod parser;
pub mod resolver;

pub use filter::matches;
pub use item::{ItemDescriptor, Media, MediaType, MediaUrl};
pub use parser::{parse_shortcode_media, parse_timeline};
pub use resolver::resolve;
