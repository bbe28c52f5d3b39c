//! # Commands Module
//!
//! Everything a front end can ask of the application.
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── quote.rs     ◄─── Listing, numbering, editor record, edits, save/delete
//! ├── address.rs   ◄─── Client address book
//! ├── template.rs  ◄─── Saved line-item templates
//! ├── export.rs    ◄─── PDF export
//! └── assist.rs    ◄─── AI text suggestions
//! ```
//!
//! ## Command Shape
//! Each command takes only the state it needs and returns
//! `Result<T, ApiError>`. Validation happens here, before a record reaches
//! the store:
//! ```text
//! save_address(store, record)
//!     │
//!     ├── validate_client_address ── fail ──► VALIDATION_ERROR
//!     ▼
//! store.write().save(record) ── fail ──► STORAGE_ERROR / NOT_FOUND
//! ```

pub mod address;
pub mod assist;
pub mod export;
pub mod quote;
pub mod template;
