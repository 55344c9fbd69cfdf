//! Authorization engine for the YouDu gateway.
//!
//! Every operation the gateway proxies to the YouDu server is first put to
//! this crate: *may this action run on this resource, for this identifier,
//! to these recipients?*
//!
//! # Model
//!
//! ```text
//! PolicyStore (shared, RwLock)
//!     └── PermissionState
//!           ├── enabled / allow_all        global bypass
//!           └── Resource → ResourcePolicy
//!                   ├── create/read/update/delete   coarse action flags
//!                   ├── allowlist                   row-level identifiers
//!                   └── allowsend {users, dept}     message recipients
//! ```
//!
//! | Entry point | Decides |
//! |-------------|---------|
//! | [`PolicyStore::check`] | action on resource |
//! | [`PolicyStore::check_with_id`] | action on one identified row |
//! | [`PolicyStore::check_message_send`] | a send to `|`-delimited recipients |
//!
//! A refusal is a [`PermissionDenied`] value; its [`DenialKind::marker`]
//! substring is stable for callers that pattern-match messages.
//!
//! # Crate Architecture
//!
//! ```text
//! youdu-auth     ◄── THIS CRATE (model + decisions, no I/O)
//!     ↑
//! youdu-runtime  (config loading → Arc<PolicyStore>)
//!     ↑
//! youdu-cli      (permission status / list / check)
//! ```

pub mod decision;
pub mod error;
pub mod policy;
pub mod recipients;
pub mod resource;
pub mod store;

pub use decision::PermissionState;
pub use error::{DenialKind, PermissionDenied, RecipientKind};
pub use policy::{AllowSend, ResourcePolicy};
pub use recipients::{RecipientList, RECIPIENT_DELIMITER};
pub use resource::{Action, ParseResourceError, Resource};
pub use store::PolicyStore;
