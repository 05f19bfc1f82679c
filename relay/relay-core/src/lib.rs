pub mod contracts;
pub mod error;
pub mod logging;
pub mod transport;

pub use error::{RelayError, RelayResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestTransport};
