//! Authentication: the context backed by the API client, the login form
//! flow that drives it, and the terminal renditions of the form's
//! collaborators.

pub mod context;
pub mod form;
pub mod ui;

pub use context::{ApiAuthContext, AuthContext, LoadingHandle};
pub use form::{FormState, LoginForm, Navigator, Notifier, Toast, ToastVariant};
