pub mod contact;
pub mod links;
pub mod tag;
pub mod wire;

pub use contact::{ContactReference, DEFAULT_MESSAGING_BASE, greeting, sanitize_contact};
pub use links::{ScanLink, clean_base_url, is_local_base, scan_links};
pub use tag::{Resolution, TagRecord, TagStatus};
