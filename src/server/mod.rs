mod error;
mod initialize;
mod io;
mod rpc;
mod setup;
mod state;
mod transport;

pub use initialize::{InitializeResult, PROTOCOL_VERSION, SERVER_NAME};
pub use io::run_with_io;
pub use setup::{build_client, build_state};
pub use state::AppState;
pub use transport::{build_server, run, run_with_server};
