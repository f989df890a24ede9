//! Clubsite client: HTTP resource fetching and session persistence.
mod error;
mod request;
mod resource;
mod session;
mod settings;
mod transport;

pub use error::{RequestError, INVALID_JSON_MESSAGE};
pub use request::{PreparedRequest, RequestConfig};
pub use resource::Resource;
pub use session::{SessionError, SessionStore, SessionUser};
pub use settings::ClientSettings;
pub use transport::{HttpSend, RawResponse, ReqwestSender};
