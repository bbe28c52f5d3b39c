//! # State Module
//!
//! Separate state types, each command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │   Session    │  │    AppConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<RwLock< │  │  view        │  │  storage, export │              │
//! │  │  EntityStore │  │  selected    │  │  sender, assist  │              │
//! │  │  >>          │  │  quote       │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • StoreState: shared, clone freely                                    │
//! │  • Session: owned by the front end driving navigation                  │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;
mod store;

pub use config::{
    AppConfig, AssistSettings, ConfigError, ConfigResult, ExportSettings, SenderSettings,
    StorageSettings, CONFIG_FILE, DATABASE_FILE,
};
pub use session::{Session, View};
pub use store::StoreState;
